//! Vendor outreach actions
//!
//! Inviting vendors, contacting a vendor and selecting a quote are accepted and
//! acknowledged but not recorded: bid status changes are not persisted and no
//! message is delivered. Each receipt says so with `persisted: false`.

use serde::Serialize;

use super::Repository;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutreachAction {
    Invite,
    Contact,
    SelectQuote,
}

/// Acknowledgement of an outreach request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachReceipt {
    pub action: OutreachAction,
    pub category_id: u64,
    pub vendor_ids: Vec<u64>,
    pub persisted: bool,
    pub message: String,
}

impl Repository {
    pub fn invite_vendors(&self, category_id: u64, vendor_ids: &[u64]) -> Result<OutreachReceipt> {
        if vendor_ids.is_empty() {
            return Err(Error::validation("vendorIds", "at least one vendor is required"));
        }
        self.check_outreach_targets(category_id, vendor_ids)?;
        Ok(receipt(
            OutreachAction::Invite,
            category_id,
            vendor_ids.to_vec(),
            format!("Invitations queued for {} vendor(s)", vendor_ids.len()),
        ))
    }

    pub fn contact_vendor(&self, category_id: u64, vendor_id: u64) -> Result<OutreachReceipt> {
        self.check_outreach_targets(category_id, &[vendor_id])?;
        Ok(receipt(
            OutreachAction::Contact,
            category_id,
            vec![vendor_id],
            format!("Contact request recorded for vendor {}", vendor_id),
        ))
    }

    pub fn select_quote(&self, category_id: u64, vendor_id: u64) -> Result<OutreachReceipt> {
        self.check_outreach_targets(category_id, &[vendor_id])?;
        Ok(receipt(
            OutreachAction::SelectQuote,
            category_id,
            vec![vendor_id],
            format!("Quote from vendor {} marked for selection", vendor_id),
        ))
    }

    fn check_outreach_targets(&self, category_id: u64, vendor_ids: &[u64]) -> Result<()> {
        self.get_category(category_id)?;
        let vendors = self.list_vendors()?;
        for id in vendor_ids {
            if !vendors.iter().any(|v| v.id == *id) {
                return Err(Error::not_found("Vendor", *id));
            }
        }
        Ok(())
    }
}

fn receipt(
    action: OutreachAction,
    category_id: u64,
    vendor_ids: Vec<u64>,
    message: String,
) -> OutreachReceipt {
    tracing::info!("Outreach {:?} for category {} acknowledged (not persisted)", action, category_id);
    OutreachReceipt {
        action,
        category_id,
        vendor_ids,
        persisted: false,
        message,
    }
}
