//! Attributes of a matched DeSO polygon.
//!
//! The feature service is free to add, drop, or rename fields between layer
//! releases, and some field names are non-ASCII (`Län`). Attributes are
//! therefore kept as an open map instead of a fixed record; [`AreaField`]
//! describes the subset that is presented to the user.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder shown for a presented field that is missing or null.
pub const MISSING_VALUE: &str = "—";

/// A single attribute value as returned by the feature service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl AttributeValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => f.write_str(MISSING_VALUE),
        }
    }
}

/// Field-name → value map for one matched polygon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaAttributes(BTreeMap<String, AttributeValue>);

impl AreaAttributes {
    /// Returns the raw value for `name`, treating an explicit null as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.0.insert(name.into(), value);
    }

    /// Value of the first non-null source field backing `field`.
    #[must_use]
    pub fn field(&self, field: AreaField) -> Option<&AttributeValue> {
        field.source_fields().iter().find_map(|name| self.get(name))
    }

    /// Display text for `field`, or [`MISSING_VALUE`] when none of its
    /// source fields carry a value.
    #[must_use]
    pub fn display(&self, field: AreaField) -> String {
        self.field(field)
            .map_or_else(|| MISSING_VALUE.to_owned(), ToString::to_string)
    }
}

/// The attributes presented in a lookup result, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaField {
    DesoCode,
    RegionCode,
    RegionName,
    Municipality,
    County,
    AreaType,
}

impl AreaField {
    pub const ALL: [AreaField; 6] = [
        AreaField::DesoCode,
        AreaField::RegionCode,
        AreaField::RegionName,
        AreaField::Municipality,
        AreaField::County,
        AreaField::AreaType,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AreaField::DesoCode => "DeSO code",
            AreaField::RegionCode => "Region code",
            AreaField::RegionName => "Region name",
            AreaField::Municipality => "Municipality",
            AreaField::County => "County",
            AreaField::AreaType => "Area type",
        }
    }

    /// Source field names in priority order.
    #[must_use]
    pub fn source_fields(self) -> &'static [&'static str] {
        match self {
            AreaField::DesoCode => &["Deso"],
            AreaField::RegionCode => &["Regsokod"],
            AreaField::RegionName => &["Regsonamn"],
            AreaField::Municipality => &["Kommunnamn", "Kommun"],
            AreaField::County => &["Län"],
            AreaField::AreaType => &["Typ_Av_Omr"],
        }
    }
}
