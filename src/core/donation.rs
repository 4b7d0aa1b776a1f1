//! Charity donation requests

use crate::core::store::{Row, TableRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A request to donate clothing, submitted by a logged-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRequest {
    pub id: u64,
    pub username: String,
    pub description: String,
    pub quantity: u32,
    pub pickup_address: String,
    pub created_at: DateTime<Utc>,
}

/// Donation form submission
#[derive(Debug, Clone, Deserialize)]
pub struct NewDonation {
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub pickup_address: String,
}

fn default_quantity() -> u32 {
    1
}

impl NewDonation {
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("description must not be empty".to_string());
        }
        if self.quantity == 0 {
            return Err("quantity must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn into_request(self, id: u64, username: &str) -> DonationRequest {
        DonationRequest {
            id,
            username: username.to_string(),
            description: self.description.trim().to_string(),
            quantity: self.quantity,
            pickup_address: self.pickup_address.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

impl TableRecord for DonationRequest {
    const TABLE: &'static str = "donations";

    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "username",
            "description",
            "quantity",
            "pickup_address",
            "created_at",
        ]
    }

    fn required_columns() -> &'static [&'static [&'static str]] {
        &[
            &["id"],
            &["username"],
            &["description"],
            &["quantity"],
            &["created_at"],
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.username.clone(),
            self.description.clone(),
            self.quantity.to_string(),
            self.pickup_address.clone(),
            self.created_at.to_rfc3339(),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, String> {
        let id_raw = row.require(&["id"])?;
        let quantity_raw = row.require(&["quantity"])?;
        let created_raw = row.require(&["created_at"])?;

        Ok(DonationRequest {
            id: id_raw
                .parse()
                .map_err(|_| format!("id '{}' is not a non-negative integer", id_raw))?,
            username: row.require(&["username"])?.to_string(),
            description: row.require(&["description"])?.to_string(),
            quantity: quantity_raw
                .parse()
                .map_err(|_| format!("quantity '{}' is not a non-negative integer", quantity_raw))?,
            pickup_address: row.get(&["pickup_address"]).unwrap_or_default().to_string(),
            created_at: DateTime::parse_from_rfc3339(created_raw)
                .map_err(|e| format!("created_at '{}': {}", created_raw, e))?
                .with_timezone(&Utc),
        })
    }

    fn key(&self) -> String {
        self.id.to_string()
    }
}
