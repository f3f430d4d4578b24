//! Inventory product models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_amount, not_blank, patch_field, required};
use crate::record::{CreateContext, Record, Resource};
use crate::{CoreError, CoreResult};

/// A stocked product. The id is the caller-supplied barcode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    /// Frame, lens, contact lens, accessory, ...
    #[serde(rename = "type", default)]
    pub product_type: String,
    #[serde(default)]
    pub brand: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for adding a product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub brand: Option<String>,
}

/// Patchable product fields. The barcode is fixed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub brand: Option<String>,
}

impl Product {
    /// At or below the reorder threshold.
    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.stock <= threshold
    }
}

impl Record for Product {
    const KIND: &'static str = "products";
    const LABEL: &'static str = "Product";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> &str {
        &self.name
    }
}

impl Resource for Product {
    type Input = NewProduct;
    type Patch = ProductPatch;

    fn create(input: NewProduct, ctx: &CreateContext<'_>) -> CoreResult<Self> {
        let id = required("id", input.id)?;
        let name = required("name", input.name)?;
        let price = input
            .price
            .ok_or_else(|| CoreError::Validation("price is required".into()))?;
        check_amount("price", price)?;

        Ok(Self {
            id,
            name,
            description: input.description.unwrap_or_default(),
            price,
            stock: input.stock.unwrap_or(0),
            product_type: input.product_type.unwrap_or_default(),
            brand: input.brand.unwrap_or_default(),
            created_at: ctx.now,
            updated_at: ctx.now,
        })
    }

    fn validate_patch(patch: &ProductPatch) -> CoreResult<()> {
        not_blank("name", patch.name.as_ref())?;
        if let Some(price) = patch.price {
            check_amount("price", price)?;
        }
        Ok(())
    }

    fn apply_patch(&mut self, patch: &ProductPatch, now: DateTime<Utc>) {
        patch_field(&mut self.name, &patch.name);
        patch_field(&mut self.description, &patch.description);
        patch_field(&mut self.price, &patch.price);
        patch_field(&mut self.stock, &patch.stock);
        patch_field(&mut self.product_type, &patch.product_type);
        patch_field(&mut self.brand, &patch.brand);
        self.updated_at = now;
    }
}
