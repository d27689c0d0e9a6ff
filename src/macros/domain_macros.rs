//! Enumerated domain macros for opsdata
//!
//! These macros turn a list of `Variant => "Label"` pairs into a closed,
//! string-backed enum that serializes to its label in the output tables.

/// Macro for declaring a named constant set
///
/// Generates the enum plus `ALL`, `as_str()`, `Display`, `FromStr` and
/// label-based serde impls.
///
/// # Example
/// ```rust
/// use opsdata::named_set;
///
/// named_set! {
///     /// Shipment origins
///     pub enum Origin {
///         NewYork => "New York",
///         London => "London",
///     }
/// }
///
/// assert_eq!(Origin::ALL.len(), 2);
/// assert_eq!(Origin::NewYork.as_str(), "New York");
/// ```
#[macro_export]
macro_rules! named_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $label:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            /// Every member of the set, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The label written to the output tables
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|member| member.as_str() == s)
                    .ok_or_else(|| format!("Unknown {} '{}'", stringify!($name), s))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}
