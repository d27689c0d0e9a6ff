use serde::{Deserialize, Serialize};

/// Opaque identifier of a staffing assignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a resource ID from its raw string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a shipment, formatted `SHP-<digits>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentId(String);

impl ShipmentId {
    pub const PREFIX: &'static str = "SHP-";

    /// Create a shipment ID from its raw string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a shipment ID from its numeric part
    pub fn from_number(number: u32) -> Self {
        Self(format!("{}{}", Self::PREFIX, number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
