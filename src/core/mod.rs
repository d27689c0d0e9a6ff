pub mod domain;
pub mod errors;
pub mod execution;
pub mod generation;
pub mod metrics;
pub mod pipeline;
pub mod random;
pub mod records;
pub mod snapshot;
pub mod types;

#[cfg(test)]
mod tests;
