//! Customer (retail client) records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{not_blank, patch_field, required};
use crate::record::{numeric_key, CreateContext, Record, Resource};
use crate::CoreResult;

/// Name given to customers created at the counter without one.
pub const WALK_IN_NAME: &str = "Walk-in Customer";

/// A retail customer with a counter-assigned numeric id.
///
/// Customers and [`Patient`](super::Patient)s are separate record kinds:
/// customers are billing contacts, patients carry clinical data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a customer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Patchable customer fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Customer {
    pub(crate) fn build(id: u64, input: NewCustomer, name: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            phone: input.phone.unwrap_or_default(),
            address: input.address.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Customer {
    const KIND: &'static str = "customers";
    const LABEL: &'static str = "Customer";

    fn key(&self) -> String {
        self.id.to_string()
    }

    fn normalize_key(raw: &str) -> Option<String> {
        numeric_key(raw)
    }

    fn search_text(&self) -> &str {
        &self.name
    }

    fn sequence(&self) -> Option<u64> {
        Some(self.id)
    }
}

impl Resource for Customer {
    type Input = NewCustomer;
    type Patch = CustomerPatch;

    fn create(mut input: NewCustomer, ctx: &CreateContext<'_>) -> CoreResult<Self> {
        let name = required("name", input.name.take())?;
        let id = ctx.next_sequence()?;
        Ok(Self::build(id, input, name, ctx.now))
    }

    fn validate_patch(patch: &CustomerPatch) -> CoreResult<()> {
        not_blank("name", patch.name.as_ref())
    }

    fn apply_patch(&mut self, patch: &CustomerPatch, now: DateTime<Utc>) {
        patch_field(&mut self.name, &patch.name);
        patch_field(&mut self.phone, &patch.phone);
        patch_field(&mut self.address, &patch.address);
        self.updated_at = now;
    }
}
