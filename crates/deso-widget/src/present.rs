//! Display-ready projection of a [`LookupResult`].

use std::fmt;

use deso_core::{AreaField, LookupResult};

/// Shown in place of the attribute table when no polygon matched.
pub const NO_POLYGON_TEXT: &str = "No polygon matched this point.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaView {
    /// One row per presented field, in display order.
    Matched(Vec<AttributeRow>),
    NoPolygon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugView {
    pub text: String,
    /// The feature query that produced the reported area.
    pub request_url: String,
}

/// The result card for one successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub address_label: String,
    /// `"<lat>, <lon> (WGS84)"` with six decimals.
    pub coordinates: String,
    pub area: AreaView,
    pub debug: DebugView,
}

impl ResultView {
    #[must_use]
    pub fn from_result(result: &LookupResult) -> Self {
        let area = match &result.attributes {
            Some(attributes) => AreaView::Matched(
                AreaField::ALL
                    .iter()
                    .map(|&field| AttributeRow {
                        label: field.label(),
                        value: attributes.display(field),
                    })
                    .collect(),
            ),
            None => AreaView::NoPolygon,
        };

        Self {
            address_label: result.address.label.clone(),
            coordinates: format!(
                "{:.6}, {:.6} (WGS84)",
                result.address.latitude, result.address.longitude
            ),
            area,
            debug: DebugView {
                text: format!(
                    "Debug: {}, {}",
                    result.debug.last_longitude, result.debug.last_latitude
                ),
                request_url: result.debug.last_request_url.clone(),
            },
        }
    }

    /// Value of the row labelled `label`, if the area matched.
    #[must_use]
    pub fn row(&self, label: &str) -> Option<&str> {
        match &self.area {
            AreaView::Matched(rows) => rows
                .iter()
                .find(|row| row.label == label)
                .map(|row| row.value.as_str()),
            AreaView::NoPolygon => None,
        }
    }
}

impl From<&LookupResult> for ResultView {
    fn from(result: &LookupResult) -> Self {
        Self::from_result(result)
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.address_label)?;
        writeln!(f, "{}", self.coordinates)?;
        match &self.area {
            AreaView::Matched(rows) => {
                let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
                for row in rows {
                    writeln!(f, "  {:<width$}  {}", row.label, row.value)?;
                }
            }
            AreaView::NoPolygon => writeln!(f, "  {NO_POLYGON_TEXT}")?,
        }
        writeln!(f, "{}", self.debug.text)?;
        write!(f, "{}", self.debug.request_url)
    }
}
