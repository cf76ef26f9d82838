//! Request bodies and their conversion into validated inputs
//!
//! Numeric fields arrive as JSON numbers or strings (HTML forms post strings).
//! Both are coerced to `f64` here; anything else is rejected with the field
//! name before the repository is called.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::model::{
    Address, ClientContact, ContactInfo, Location, NewCategory, NewProject, NewVendor,
    ProjectStatus, ProjectUpdate, amount, item_count, required_text,
};
use crate::{Error, Result};

/// Coerce a JSON number or numeric string. `null` and blank strings count as absent.
pub fn coerce_number(field: &str, value: &Value) -> Result<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| Error::validation(field, "must be a number")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| Error::validation(field, format!("'{}' is not a number", s))),
        _ => Err(Error::validation(field, "must be a number")),
    }
}

fn optional_amount(field: &str, value: Option<&Value>) -> Result<Option<f64>> {
    match value {
        Some(value) => coerce_number(field, value)?
            .map(|v| amount(field, v))
            .transpose(),
        None => Ok(None),
    }
}

fn optional_count(field: &str, value: Option<&Value>) -> Result<Option<u32>> {
    match value {
        Some(value) => coerce_number(field, value)?
            .map(|v| item_count(field, v))
            .transpose(),
        None => Ok(None),
    }
}

fn optional_status(value: Option<&str>) -> Result<Option<ProjectStatus>> {
    match value.map(str::trim) {
        Some("") | None => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}

fn text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Body of `POST /api/projects`, flat as the dashboard form sends it
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectPayload {
    pub name: Option<String>,
    pub client: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub bid_deadline: Option<String>,
    pub estimated_value: Option<Value>,
    pub status: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub client_contact_name: Option<String>,
    pub client_contact_email: Option<String>,
    pub client_contact_phone: Option<String>,
    pub group_id: Option<u64>,
}

impl CreateProjectPayload {
    pub fn into_new_project(self) -> Result<NewProject> {
        let mut project = NewProject::new(
            self.name.unwrap_or_default(),
            self.client.unwrap_or_default(),
        )?;

        project.estimated_value =
            optional_amount("estimatedValue", self.estimated_value.as_ref())?.unwrap_or(0.0);
        project.status = optional_status(self.status.as_deref())?.unwrap_or_default();
        project.description = text(self.description);
        project.start_date = text(self.start_date);
        project.bid_deadline = text(self.bid_deadline);
        project.group_id = self.group_id;
        project.location = Location {
            address: text(self.address),
            city: text(self.city),
            state: text(self.state),
            zip_code: text(self.zip_code),
        };
        project.client_contact = ClientContact {
            name: text(self.client_contact_name),
            email: text(self.client_contact_email),
            phone: text(self.client_contact_phone),
        };
        Ok(project)
    }

    /// Parse a merged template/override map
    pub fn from_map(map: Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(map))
            .map_err(|e| Error::validation("projectData", e.to_string()))
    }
}

/// Body of `PUT /api/projects/{id}`; unknown keys are ignored
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectPayload {
    pub name: Option<String>,
    pub client: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub bid_deadline: Option<String>,
    pub estimated_value: Option<Value>,
    pub status: Option<String>,
    pub group_id: Option<u64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub client_contact_name: Option<String>,
    pub client_contact_email: Option<String>,
    pub client_contact_phone: Option<String>,
}

impl UpdateProjectPayload {
    pub fn into_update(self) -> Result<ProjectUpdate> {
        Ok(ProjectUpdate {
            name: self.name.map(|n| required_text("name", n)).transpose()?,
            client: self.client.map(|c| required_text("client", c)).transpose()?,
            description: self.description,
            start_date: self.start_date,
            bid_deadline: self.bid_deadline,
            estimated_value: optional_amount("estimatedValue", self.estimated_value.as_ref())?,
            status: optional_status(self.status.as_deref())?,
            group_id: self.group_id,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            client_contact_name: self.client_contact_name,
            client_contact_email: self.client_contact_email,
            client_contact_phone: self.client_contact_phone,
        })
    }
}

/// Body of `POST /api/projects/{id}/categories`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub total_items: Option<Value>,
    pub estimated_value: Option<Value>,
    pub specifications: Option<String>,
    pub deadline_date: Option<String>,
}

impl CreateCategoryPayload {
    pub fn into_new_category(self) -> Result<NewCategory> {
        let mut category = NewCategory::new(self.name.unwrap_or_default())?;
        category.total_items = optional_count("totalItems", self.total_items.as_ref())?.unwrap_or(0);
        category.estimated_value =
            optional_amount("estimatedValue", self.estimated_value.as_ref())?.unwrap_or(0.0);
        category.description = text(self.description);
        category.specifications = text(self.specifications);
        category.deadline_date = text(self.deadline_date);
        Ok(category)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactInfoPayload {
    pub representative: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Body of `POST /api/vendors`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVendorPayload {
    pub company_name: Option<String>,
    pub contact_info: Option<ContactInfoPayload>,
    pub address: Option<AddressPayload>,
    pub specialties: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl CreateVendorPayload {
    pub fn into_new_vendor(self) -> Result<NewVendor> {
        let contact = self.contact_info.unwrap_or_default();
        let address = self.address.unwrap_or_default();

        let vendor = NewVendor::new(
            self.company_name.unwrap_or_default(),
            ContactInfo {
                representative: contact.representative.unwrap_or_default(),
                email: contact.email.unwrap_or_default(),
                phone: contact.phone.unwrap_or_default(),
                website: contact.website,
            },
            Address {
                street: address.street.unwrap_or_default(),
                city: address.city.unwrap_or_default(),
                state: address.state.unwrap_or_default(),
                zip_code: address.zip_code.unwrap_or_default(),
            },
            self.specialties.unwrap_or_default(),
        )?;
        Ok(vendor.with_notes(text(self.notes)))
    }
}

/// Body of `POST /api/projects/from-template`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FromTemplatePayload {
    pub template_name: String,
    #[serde(default)]
    pub project_data: Map<String, Value>,
    #[serde(default)]
    pub include_categories: bool,
}

/// Body of `POST /api/categories/{id}/invite`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitePayload {
    pub vendor_ids: Vec<u64>,
}

/// Body of `POST /api/categories/{id}/select-quote`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectQuotePayload {
    pub vendor_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project_payload(value: Value) -> CreateProjectPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_string_estimated_value_is_coerced() {
        let new = project_payload(json!({
            "name": "Harbor Point",
            "client": "Acme Dev",
            "estimatedValue": "2500000",
            "city": "Tacoma",
            "clientContactEmail": "lee@acme.test"
        }))
        .into_new_project()
        .unwrap();

        assert_eq!(new.estimated_value, 2_500_000.0);
        assert_eq!(new.location.city, "Tacoma");
        assert_eq!(new.location.address, "");
        assert_eq!(new.client_contact.email, "lee@acme.test");
        assert_eq!(new.status, ProjectStatus::Early);
    }

    #[test]
    fn test_non_numeric_estimated_value_is_rejected() {
        let err = project_payload(json!({
            "name": "Harbor Point",
            "client": "Acme Dev",
            "estimatedValue": "abc"
        }))
        .into_new_project()
        .unwrap_err();

        assert!(matches!(&err, Error::Validation { field, .. } if field == "estimatedValue"));
        assert!(err.to_string().contains("estimatedValue"));
    }

    #[test]
    fn test_missing_client_is_rejected() {
        let err = project_payload(json!({"name": "Harbor Point"}))
            .into_new_project()
            .unwrap_err();
        assert!(matches!(err, Error::Validation { field, .. } if field == "client"));
    }

    #[test]
    fn test_coerce_number_forms() {
        assert_eq!(coerce_number("x", &json!(12)).unwrap(), Some(12.0));
        assert_eq!(coerce_number("x", &json!(" 7.5 ")).unwrap(), Some(7.5));
        assert_eq!(coerce_number("x", &json!("")).unwrap(), None);
        assert_eq!(coerce_number("x", &Value::Null).unwrap(), None);
        assert!(coerce_number("x", &json!(true)).is_err());
        assert!(coerce_number("x", &json!([1])).is_err());
    }

    #[test]
    fn test_update_ignores_unknown_fields() {
        let payload: UpdateProjectPayload = serde_json::from_value(json!({
            "city": "Salem",
            "createdDate": "1999-01-01",
            "id": 77
        }))
        .unwrap();
        let update = payload.into_update().unwrap();
        assert_eq!(update.city.as_deref(), Some("Salem"));
        assert_eq!(
            update,
            ProjectUpdate {
                city: Some("Salem".to_string()),
                ..ProjectUpdate::default()
            }
        );
    }

    #[test]
    fn test_update_rejects_bad_number_and_status() {
        let payload: UpdateProjectPayload =
            serde_json::from_value(json!({"estimatedValue": "lots"})).unwrap();
        assert!(payload.into_update().is_err());

        let payload: UpdateProjectPayload =
            serde_json::from_value(json!({"status": "paused"})).unwrap();
        assert!(matches!(
            payload.into_update(),
            Err(Error::Validation { field, .. }) if field == "status"
        ));
    }

    #[test]
    fn test_category_total_items_coercion() {
        let payload: CreateCategoryPayload = serde_json::from_value(json!({
            "name": "Electrical",
            "totalItems": "40",
            "estimatedValue": 125000
        }))
        .unwrap();
        let new = payload.into_new_category().unwrap();
        assert_eq!(new.total_items, 40);
        assert_eq!(new.estimated_value, 125_000.0);

        let payload: CreateCategoryPayload =
            serde_json::from_value(json!({"name": "Electrical", "totalItems": "forty"})).unwrap();
        assert!(matches!(
            payload.into_new_category(),
            Err(Error::Validation { field, .. }) if field == "totalItems"
        ));
    }

    #[test]
    fn test_vendor_payload_requires_nested_fields() {
        let payload: CreateVendorPayload = serde_json::from_value(json!({
            "companyName": "SteelCo",
            "contactInfo": {"representative": "Dana", "email": "d@steel.test"},
            "address": {"city": "Tulsa", "state": "OK"},
            "specialties": ["Steel"]
        }))
        .unwrap();
        assert!(matches!(
            payload.into_new_vendor(),
            Err(Error::Validation { field, .. }) if field == "contactInfo.phone"
        ));
    }
}
