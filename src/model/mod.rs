//! Record types - the typed shape of every collection in the datastore
//!
//! Each collection has one record type:
//! - `Project`: a construction project and its client
//! - `Category`: a bid package within a project, with embedded vendor participation
//! - `Vendor`: a supplier or subcontractor in the vendor catalog
//! - `ProjectGroup`: a program of related projects
//! - `Document`: a file attached to a project
//!
//! Input types (`NewProject`, `ProjectUpdate`, `NewCategory`, `NewVendor`) are
//! validated when constructed, so the repository never sees a missing name or a
//! negative amount.

pub mod project;
pub mod category;
pub mod vendor;
pub mod group;
pub mod document;

pub use project::{ClientContact, Location, NewProject, Project, ProjectStatus, ProjectUpdate};
pub use category::{BidStatus, Category, CategoryStatus, NewCategory, VendorParticipation};
pub use vendor::{Address, ContactInfo, NewVendor, Vendor};
pub use group::{GroupLocation, ProjectGroup};
pub use document::Document;

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

use crate::{Error, Result};

/// Unknown keys carried through a load/save cycle untouched
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Timestamp written into `createdDate`, `lastUpdated` and `dateAdded`
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Trim a required text field, rejecting blank input
pub fn required_text(field: &str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

/// Accept a monetary amount: finite and not negative
pub fn amount(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(Error::validation(field, "must not be negative"));
    }
    Ok(value)
}

/// Accept an item count: a non-negative whole number
pub fn item_count(field: &str, value: f64) -> Result<u32> {
    let value = amount(field, value)?;
    if value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(Error::validation(field, "must be a whole number"));
    }
    Ok(value as u32)
}

/// Stored numbers may have been written as floats or numeric strings
fn stored_number<E: de::Error>(value: &Value) -> std::result::Result<f64, E> {
    match value {
        Value::Null => Ok(0.0),
        Value::Number(n) => n.as_f64().ok_or_else(|| E::custom("number out of range")),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| E::custom(format!("'{}' is not a number", s))),
        other => Err(E::custom(format!("expected a number, found {}", other))),
    }
}

/// Read a stored amount: any JSON number, a numeric string, or null (0)
pub(crate) fn lenient_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<f64, D::Error> {
    stored_number(&Value::deserialize(deserializer)?)
}

/// Read a stored item count like `lenient_amount`, rounded and clamped to `u32`
pub(crate) fn lenient_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<u32, D::Error> {
    let n: f64 = stored_number(&Value::deserialize(deserializer)?)?;
    Ok(n.round().clamp(0.0, f64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("name", "  Tower A ").unwrap(), "Tower A");
        assert!(matches!(
            required_text("name", "   "),
            Err(Error::Validation { field, .. }) if field == "name"
        ));
    }

    #[test]
    fn test_amount_rejects_negative_and_nan() {
        assert_eq!(amount("estimatedValue", 2_500_000.0).unwrap(), 2_500_000.0);
        assert!(amount("estimatedValue", -1.0).is_err());
        assert!(amount("estimatedValue", f64::NAN).is_err());
    }

    #[test]
    fn test_item_count_requires_whole_number() {
        assert_eq!(item_count("totalItems", 12.0).unwrap(), 12);
        assert!(item_count("totalItems", 2.5).is_err());
        assert!(item_count("totalItems", -3.0).is_err());
    }
}
