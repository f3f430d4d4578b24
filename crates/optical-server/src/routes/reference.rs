//! Collections served as bare arrays: invoices, products, appointments and
//! the read-only reference data.

use std::sync::Arc;

use axum::Router;
use optical_core::{
    Admin, AdminPaymentNotice, Appointment, Doctor, Invoice, Product, PurchaseOrder, Shop, Staff,
};

use super::resources::{crud, read_only};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(crud::<Invoice>("/api/invoices"))
        .merge(crud::<Product>("/api/products"))
        .merge(crud::<Appointment>("/api/appointments"))
        .merge(read_only::<Shop>("/api/shops"))
        .merge(read_only::<Doctor>("/api/doctors"))
        .merge(read_only::<Admin>("/api/admins"))
        .merge(read_only::<Staff>("/api/staff"))
        .merge(read_only::<PurchaseOrder>("/api/purchase-orders"))
        .merge(read_only::<AdminPaymentNotice>("/api/admin-payment-notices"))
}
