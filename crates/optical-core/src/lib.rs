//! Optical Retail Core Library
//!
//! Resource store for an optical retail back office: customers, patients,
//! prescriptions, invoices, appointments, products and reference data.
//!
//! # Architecture
//!
//! ```text
//!   HTTP façade (optical-server)
//!              │
//!              ▼
//!   ┌─────────────────────┐      ┌──────────────┐
//!   │        Store        │─────▶│ Clock        │  strictly increasing
//!   │  list/get/create/…  │      └──────────────┘  timestamps + INV ids
//!   └──────────┬──────────┘
//!              │ one Repository<T> per collection
//!      ┌───────┴────────┐
//!      ▼                ▼
//!   MemoryRepository   SqliteRepository
//!   (RwLock<Vec<T>>)   (JSON rows in `records`)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain records with their create payloads and patch allow-lists
//! - [`record`]: The `Record` / `Resource` traits every collection is built on
//! - [`repo`]: Repository trait with in-memory and SQLite backends
//! - [`store`]: The `Store` aggregate and its composite operations
//! - [`pagination`]: Page clamping, search filtering and slicing
//! - [`clock`]: Monotonic timestamp source

pub mod clock;
pub mod models;
pub mod pagination;
pub mod record;
pub mod repo;
pub mod store;

// Re-export commonly used types
pub use clock::Clock;
pub use models::{
    Admin, AdminPaymentNotice, Appointment, Customer, Doctor, Invoice, InvoiceStatus, Patient,
    Prescription, Product, PurchaseOrder, Shop, Staff,
};
pub use pagination::{Page, PageRequest};
pub use record::{Record, Resource};
pub use repo::{RepoError, Repository};
pub use store::{CustomerDetail, PrescriptionDetail, SalesSummary, Store, Stored, WalkInInvoice};

use thiserror::Error;

/// Errors surfaced by store operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected input; the message is shown to the caller as-is.
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

pub type CoreResult<T> = Result<T, CoreError>;
