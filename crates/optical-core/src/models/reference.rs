//! Read-mostly reference data: shops, people and back-office documents.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// A retail branch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub manager: Option<String>,
}

/// An optometrist or ophthalmologist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub phone: String,
    pub email: String,
    pub shop_id: Option<String>,
}

/// A back-office administrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Shop-floor staff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: String,
    pub name: String,
    pub role: String,
    pub phone: String,
    pub shop_id: Option<String>,
}

/// One line of a supplier order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_cost: f64,
}

/// A purchase order placed with a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: String,
    pub supplier: String,
    pub items: Vec<PurchaseOrderLine>,
    pub total: f64,
    pub status: String,
    pub order_date: String,
    pub shop_id: Option<String>,
}

/// A fee notice sent by head office to a shop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminPaymentNotice {
    pub id: String,
    pub shop_id: String,
    pub shop_name: String,
    pub amount: f64,
    pub due_date: String,
    pub status: String,
    pub message: String,
}

impl Record for Shop {
    const KIND: &'static str = "shops";
    const LABEL: &'static str = "Shop";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> &str {
        &self.name
    }
}

impl Record for Doctor {
    const KIND: &'static str = "doctors";
    const LABEL: &'static str = "Doctor";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> &str {
        &self.name
    }
}

impl Record for Admin {
    const KIND: &'static str = "admins";
    const LABEL: &'static str = "Admin";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> &str {
        &self.name
    }
}

impl Record for Staff {
    const KIND: &'static str = "staff";
    const LABEL: &'static str = "Staff member";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> &str {
        &self.name
    }
}

impl Record for PurchaseOrder {
    const KIND: &'static str = "purchaseOrders";
    const LABEL: &'static str = "Purchase order";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> &str {
        &self.supplier
    }
}

impl Record for AdminPaymentNotice {
    const KIND: &'static str = "adminPaymentNotices";
    const LABEL: &'static str = "Payment notice";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> &str {
        &self.shop_name
    }
}
