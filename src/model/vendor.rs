//! Vendor catalog records

use crate::model::{Extra, required_text};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub representative: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Address {
    /// Single-line form: `"{street}, {city}, {state} {zip}"`
    pub fn formatted(&self) -> String {
        format!("{}, {}, {} {}", self.street, self.city, self.state, self.zip_code)
    }
}

/// A supplier or subcontractor in the vendor catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: u64,
    pub company_name: String,
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub date_added: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Vendor {
    pub fn from_new(id: u64, new: NewVendor, now: &str) -> Self {
        Self {
            id,
            company_name: new.company_name,
            contact_info: new.contact_info,
            specialties: new.specialties,
            address: new.address,
            notes: new.notes,
            date_added: now.to_string(),
            last_updated: now.to_string(),
            extra: Extra::new(),
        }
    }
}

/// Validated input for adding a vendor to the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct NewVendor {
    pub company_name: String,
    pub contact_info: ContactInfo,
    pub specialties: Vec<String>,
    pub address: Address,
    pub notes: String,
}

impl NewVendor {
    /// Validate a vendor input.
    ///
    /// Requires a company name, a representative with email and phone, a city
    /// and state, and at least one specialty. Specialties are trimmed and
    /// de-duplicated in first-seen order.
    pub fn new(
        company_name: impl Into<String>,
        contact_info: ContactInfo,
        address: Address,
        specialties: Vec<String>,
    ) -> Result<Self> {
        let company_name = required_text("companyName", company_name)?;

        let contact_info = ContactInfo {
            representative: required_text("contactInfo.representative", contact_info.representative)?,
            email: required_text("contactInfo.email", contact_info.email)?,
            phone: required_text("contactInfo.phone", contact_info.phone)?,
            website: contact_info
                .website
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty()),
        };

        let address = Address {
            street: address.street.trim().to_string(),
            city: required_text("address.city", address.city)?,
            state: required_text("address.state", address.state)?,
            zip_code: address.zip_code.trim().to_string(),
        };

        let mut unique: Vec<String> = Vec::new();
        for specialty in specialties {
            let specialty = specialty.trim();
            if !specialty.is_empty() && !unique.iter().any(|s| s == specialty) {
                unique.push(specialty.to_string());
            }
        }
        if unique.is_empty() {
            return Err(Error::validation("specialties", "at least one specialty is required"));
        }

        Ok(Self {
            company_name,
            contact_info,
            specialties: unique,
            address,
            notes: String::new(),
        })
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}
