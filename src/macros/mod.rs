//! opsdata declarative macros
//!
//! Small declarative macros that remove boilerplate from the enumerated
//! domain definitions.

pub mod domain_macros;
