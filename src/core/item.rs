//! Catalog item records

use crate::core::field::FieldValue;
use crate::core::store::{Row, TableRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rental status of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Available,
    Rented,
    Unavailable,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::Rented => "rented",
            ItemStatus::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(ItemStatus::Available),
            "rented" => Ok(ItemStatus::Rented),
            "unavailable" => Ok(ItemStatus::Unavailable),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// A clothing item in the rental catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub brand: String,
    #[serde(alias = "color")]
    pub colour: String,
    pub price: f64,
    pub img: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub status: ItemStatus,
}

/// Columns of the catalog that the engine can search or sort on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemField {
    Id,
    Name,
    Brand,
    #[serde(alias = "color")]
    Colour,
    Price,
    Img,
    Owner,
    Status,
}

impl ItemField {
    /// Every column, in table order
    pub const ALL: [ItemField; 8] = [
        ItemField::Id,
        ItemField::Name,
        ItemField::Brand,
        ItemField::Colour,
        ItemField::Price,
        ItemField::Img,
        ItemField::Owner,
        ItemField::Status,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            ItemField::Id => "id",
            ItemField::Name => "name",
            ItemField::Brand => "brand",
            ItemField::Colour => "colour",
            ItemField::Price => "price",
            ItemField::Img => "img",
            ItemField::Owner => "owner",
            ItemField::Status => "status",
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for ItemField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name == "color" {
            return Ok(ItemField::Colour);
        }
        ItemField::ALL
            .into_iter()
            .find(|field| field.column_name() == name)
            .ok_or_else(|| format!("unknown column '{}'", s.trim()))
    }
}

impl Item {
    /// Value of one column
    pub fn field_value(&self, field: ItemField) -> FieldValue {
        match field {
            ItemField::Id => FieldValue::Integer(self.id),
            ItemField::Name => FieldValue::String(self.name.clone()),
            ItemField::Brand => FieldValue::String(self.brand.clone()),
            ItemField::Colour => FieldValue::String(self.colour.clone()),
            ItemField::Price => FieldValue::Float(self.price),
            ItemField::Img => FieldValue::String(self.img.clone()),
            ItemField::Owner => FieldValue::String(self.owner.clone()),
            ItemField::Status => FieldValue::String(self.status.as_str().to_string()),
        }
    }

    /// Text of a searchable column, without allocating for string columns
    pub fn text_of(&self, field: ItemField) -> std::borrow::Cow<'_, str> {
        match field {
            ItemField::Name => self.name.as_str().into(),
            ItemField::Brand => self.brand.as_str().into(),
            ItemField::Colour => self.colour.as_str().into(),
            ItemField::Img => self.img.as_str().into(),
            ItemField::Owner => self.owner.as_str().into(),
            ItemField::Status => self.status.as_str().into(),
            ItemField::Id | ItemField::Price => self.field_value(field).to_string().into(),
        }
    }

    /// Every column rendered as text, joined by single spaces
    pub fn row_text(&self) -> String {
        ItemField::ALL
            .iter()
            .map(|field| self.text_of(*field))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }
}

/// Form submission for listing a new item
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub brand: String,
    #[serde(alias = "color")]
    pub colour: String,
    pub price: f64,
    #[serde(default)]
    pub img: String,
}

impl NewItem {
    /// Check the listing before it is given an id
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        check_price(self.price)
    }

    /// Turn the submission into a catalog row
    pub fn into_item(self, id: u64, owner: &str) -> Item {
        Item {
            id,
            name: self.name.trim().to_string(),
            brand: self.brand.trim().to_string(),
            colour: self.colour.trim().to_string(),
            price: self.price,
            img: self.img.trim().to_string(),
            owner: owner.to_string(),
            status: ItemStatus::Available,
        }
    }
}

fn check_price(price: f64) -> Result<(), String> {
    if !price.is_finite() {
        return Err(format!("price '{}' is not a finite number", price));
    }
    if price < 0.0 {
        return Err(format!("price '{}' is negative", price));
    }
    Ok(())
}

impl TableRecord for Item {
    const TABLE: &'static str = "catalog";

    fn headers() -> &'static [&'static str] {
        &["id", "name", "brand", "colour", "price", "img", "owner", "status"]
    }

    fn required_columns() -> &'static [&'static [&'static str]] {
        &[
            &["id"],
            &["name"],
            &["brand"],
            &["colour", "color"],
            &["price"],
            &["img"],
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.brand.clone(),
            self.colour.clone(),
            self.price.to_string(),
            self.img.clone(),
            self.owner.clone(),
            self.status.to_string(),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, String> {
        let id_raw = row.require(&["id"])?;
        let id = id_raw
            .parse::<u64>()
            .map_err(|_| format!("id '{}' is not a non-negative integer", id_raw))?;

        let price_raw = row.require(&["price"])?;
        let price = price_raw
            .parse::<f64>()
            .map_err(|_| format!("price '{}' is not a number", price_raw))?;
        check_price(price)?;

        let status = match row.get(&["status"]) {
            Some(raw) if !raw.is_empty() => raw.parse::<ItemStatus>()?,
            _ => ItemStatus::Available,
        };

        Ok(Item {
            id,
            name: row.require(&["name"])?.to_string(),
            brand: row.require(&["brand"])?.to_string(),
            colour: row.require(&["colour", "color"])?.to_string(),
            price,
            img: row.require(&["img"])?.to_string(),
            owner: row.get(&["owner"]).unwrap_or_default().to_string(),
            status,
        })
    }

    fn key(&self) -> String {
        self.id.to_string()
    }
}
