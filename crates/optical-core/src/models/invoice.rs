//! Invoice models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    check_amount, check_date, patch_optional, LooseId, NewCustomer,
};
use crate::record::{CreateContext, Record, Resource};
use crate::{CoreError, CoreResult};

/// Prefix of timestamp-derived invoice ids.
pub(crate) const INVOICE_ID_PREFIX: &str = "INV";

/// Payment state of an invoice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InvoiceStatus {
    #[serde(rename = "PAID", alias = "Paid", alias = "paid")]
    Paid,
    #[serde(rename = "UNPAID", alias = "Unpaid", alias = "unpaid")]
    Unpaid,
    #[serde(rename = "OVERDUE", alias = "Overdue", alias = "overdue")]
    Overdue,
}

impl InvoiceStatus {
    /// `Paid` once the amount paid covers the total.
    pub fn for_payment(paid_amount: f64, total_amount: f64) -> Self {
        if paid_amount >= total_amount {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Unpaid
        }
    }
}

/// A billed line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default, alias = "name")]
    pub product_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub unit_price: f64,
}

fn default_quantity() -> u32 {
    1
}

impl InvoiceItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// An invoice. `total_amount` is fixed when the invoice is created and is
/// never recomputed from `items` afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// `INV-<timestamp>` for new invoices; seeded ones look like `INV-2024-001`
    pub id: String,
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    /// Set for invoices raised against a walk-in customer
    pub customer_id: Option<u64>,
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub discount: f64,
    #[serde(alias = "total")]
    pub total_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    pub status: InvoiceStatus,
    pub payment_method: Option<String>,
    /// `YYYY-MM-DD`
    pub issue_date: String,
    pub due_date: Option<String>,
    pub shop_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an invoice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub patient_id: Option<LooseId>,
    pub patient_name: Option<String>,
    pub customer_id: Option<u64>,
    pub items: Option<Vec<InvoiceItem>>,
    pub discount: Option<f64>,
    pub paid_amount: Option<f64>,
    pub status: Option<InvoiceStatus>,
    pub payment_method: Option<String>,
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    pub shop_id: Option<String>,
}

/// Payload for the counter sale: a new customer plus their invoice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWalkInInvoice {
    pub customer: Option<NewCustomer>,
    pub items: Option<Vec<InvoiceItem>>,
    pub discount: Option<f64>,
    pub paid_amount: Option<f64>,
    pub payment_method: Option<String>,
    pub due_date: Option<String>,
    pub shop_id: Option<String>,
}

/// Patchable invoice fields. Items and totals are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    pub patient_name: Option<String>,
    pub paid_amount: Option<f64>,
    pub status: Option<InvoiceStatus>,
    pub payment_method: Option<String>,
    pub due_date: Option<String>,
    pub shop_id: Option<String>,
}

/// `Σ(unit_price × quantity) − discount`, rounded to cents.
pub fn invoice_total(items: &[InvoiceItem], discount: f64) -> f64 {
    let subtotal: f64 = items.iter().map(InvoiceItem::line_total).sum();
    round_cents(subtotal - discount)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Invoice {
    /// Validate a payload and build the invoice under `id`.
    pub(crate) fn build(id: String, input: NewInvoice, now: DateTime<Utc>) -> CoreResult<Self> {
        let items = match input.items {
            Some(items) if !items.is_empty() => items,
            _ => return Err(CoreError::Validation("items are required".into())),
        };
        for item in &items {
            check_amount("unitPrice", item.unit_price)?;
            if item.quantity == 0 {
                return Err(CoreError::Validation(
                    "quantity must be at least 1".into(),
                ));
            }
        }

        let discount = input.discount.unwrap_or(0.0);
        let paid_amount = input.paid_amount.unwrap_or(0.0);
        check_amount("discount", discount)?;
        check_amount("paidAmount", paid_amount)?;

        let total_amount = invoice_total(&items, discount);
        if total_amount < 0.0 {
            return Err(CoreError::Validation(
                "discount cannot exceed the invoice subtotal".into(),
            ));
        }
        check_amount("totalAmount", total_amount)?;

        if let Some(date) = &input.issue_date {
            check_date("issueDate", date)?;
        }
        if let Some(date) = &input.due_date {
            check_date("dueDate", date)?;
        }

        Ok(Self {
            id,
            patient_id: input.patient_id.map(LooseId::into_string),
            patient_name: input.patient_name,
            customer_id: input.customer_id,
            items,
            discount,
            total_amount,
            paid_amount,
            status: input
                .status
                .unwrap_or_else(|| InvoiceStatus::for_payment(paid_amount, total_amount)),
            payment_method: input.payment_method,
            issue_date: input
                .issue_date
                .unwrap_or_else(|| now.date_naive().format("%Y-%m-%d").to_string()),
            due_date: input.due_date,
            shop_id: input.shop_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Amount still owed.
    pub fn balance_due(&self) -> f64 {
        round_cents((self.total_amount - self.paid_amount).max(0.0))
    }
}

impl NewWalkInInvoice {
    /// Split into the customer part and the invoice part.
    pub(crate) fn into_parts(self) -> CoreResult<(NewCustomer, NewInvoice)> {
        let customer = self
            .customer
            .ok_or_else(|| CoreError::Validation("customer is required".into()))?;
        if !matches!(&self.items, Some(items) if !items.is_empty()) {
            return Err(CoreError::Validation("items are required".into()));
        }

        let invoice = NewInvoice {
            items: self.items,
            discount: self.discount,
            paid_amount: self.paid_amount,
            payment_method: self.payment_method,
            due_date: self.due_date,
            shop_id: self.shop_id,
            ..Default::default()
        };
        Ok((customer, invoice))
    }
}

impl Record for Invoice {
    const KIND: &'static str = "invoices";
    const LABEL: &'static str = "Invoice";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> &str {
        self.patient_name.as_deref().unwrap_or("")
    }
}

impl Resource for Invoice {
    type Input = NewInvoice;
    type Patch = InvoicePatch;

    fn create(input: NewInvoice, ctx: &CreateContext<'_>) -> CoreResult<Self> {
        Invoice::build(ctx.stamped_id(INVOICE_ID_PREFIX), input, ctx.now)
    }

    fn validate_patch(patch: &InvoicePatch) -> CoreResult<()> {
        if let Some(paid) = patch.paid_amount {
            check_amount("paidAmount", paid)?;
        }
        if let Some(date) = &patch.due_date {
            check_date("dueDate", date)?;
        }
        Ok(())
    }

    fn apply_patch(&mut self, patch: &InvoicePatch, now: DateTime<Utc>) {
        patch_optional(&mut self.patient_name, &patch.patient_name);
        patch_optional(&mut self.payment_method, &patch.payment_method);
        patch_optional(&mut self.due_date, &patch.due_date);
        patch_optional(&mut self.shop_id, &patch.shop_id);

        if let Some(paid) = patch.paid_amount {
            self.paid_amount = paid;
            self.status = InvoiceStatus::for_payment(paid, self.total_amount);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}
