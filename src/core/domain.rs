//! Enumerated domains shared by the generators and the aggregator.

use crate::named_set;

named_set! {
    /// Consultant role on a staffing assignment
    pub enum Role {
        DataAnalyst => "Data Analyst",
        ProjectManager => "Project Manager",
        SoftwareEngineer => "Software Engineer",
        UxDesigner => "UX Designer",
        BusinessAnalyst => "Business Analyst",
    }
}

named_set! {
    /// Owning department of a resource
    pub enum Department {
        It => "IT",
        Operations => "Operations",
        Product => "Product",
        Marketing => "Marketing",
        Finance => "Finance",
    }
}

named_set! {
    pub enum Project {
        A => "Project A",
        B => "Project B",
        C => "Project C",
        D => "Project D",
        E => "Project E",
        F => "Project F",
        G => "Project G",
        H => "Project H",
        I => "Project I",
        J => "Project J",
        K => "Project K",
        L => "Project L",
        M => "Project M",
        N => "Project N",
        O => "Project O",
        P => "Project P",
        Q => "Project Q",
        R => "Project R",
        S => "Project S",
        T => "Project T",
        U => "Project U",
        V => "Project V",
        W => "Project W",
        X => "Project X",
        Y => "Project Y",
        Z => "Project Z",
    }
}

named_set! {
    /// Availability of a resource. Not tied to the assignment dates.
    pub enum ResourceStatus {
        Active => "Active",
        OnBench => "On Bench",
        OnLeave => "On Leave",
    }
}

named_set! {
    /// Observed or predicted outcome of a shipment
    pub enum ShipmentStatus {
        Scheduled => "Scheduled",
        AtRisk => "At Risk",
        OnTime => "On Time",
        Delayed => "Delayed",
    }
}

named_set! {
    pub enum Origin {
        NewYork => "New York",
        London => "London",
        Shanghai => "Shanghai",
        Berlin => "Berlin",
        Tokyo => "Tokyo",
        Mumbai => "Mumbai",
    }
}

named_set! {
    pub enum Destination {
        Paris => "Paris",
        LosAngeles => "Los Angeles",
        Sydney => "Sydney",
        Dubai => "Dubai",
        Toronto => "Toronto",
        Singapore => "Singapore",
    }
}

named_set! {
    /// Primary cause recorded for a delayed shipment
    pub enum DelayReason {
        CustomsHold => "Customs Hold",
        WeatherConditions => "Weather Conditions",
        PortCongestion => "Port Congestion",
        CarrierIssue => "Carrier Issue",
        DocumentationError => "Documentation Error",
    }
}

/// Label written in place of a reason when a shipment is not delayed
pub const NO_DELAY_REASON: &str = "None";

/// Serde adapter for `Option<DelayReason>` using the `None` sentinel label
pub mod delay_reason_label {
    use super::{DelayReason, NO_DELAY_REASON};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        reason: &Option<DelayReason>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match reason {
            Some(reason) => serializer.serialize_str(reason.as_str()),
            None => serializer.serialize_str(NO_DELAY_REASON),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DelayReason>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() || raw == NO_DELAY_REASON {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(serde::de::Error::custom)
    }
}
