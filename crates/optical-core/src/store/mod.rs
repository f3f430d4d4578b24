//! The store: one repository per collection plus the shared clock.

mod crud;
mod customers;
mod prescriptions;
mod reports;
mod seed;

pub use customers::{CustomerDetail, WalkInInvoice};
pub use prescriptions::PrescriptionDetail;
pub use reports::{SalesSummary, StatusCounts, DEFAULT_LOW_STOCK_THRESHOLD};

use std::path::Path;

use tracing::info;

use crate::clock::Clock;
use crate::models::{
    Admin, AdminPaymentNotice, Appointment, Customer, Doctor, Invoice, Patient, Prescription,
    Product, PurchaseOrder, Shop, Staff,
};
use crate::record::Record;
use crate::repo::{
    open_connection, open_memory_connection, Backend, MemoryBackend, Repository, SqliteBackend,
};
use crate::CoreResult;

/// Every collection of the back office.
///
/// Each collection serializes its own mutations, so a `Store` can be shared
/// across threads behind an `Arc` with no outer lock.
pub struct Store {
    customers: Box<dyn Repository<Customer>>,
    patients: Box<dyn Repository<Patient>>,
    prescriptions: Box<dyn Repository<Prescription>>,
    invoices: Box<dyn Repository<Invoice>>,
    appointments: Box<dyn Repository<Appointment>>,
    products: Box<dyn Repository<Product>>,
    shops: Box<dyn Repository<Shop>>,
    doctors: Box<dyn Repository<Doctor>>,
    admins: Box<dyn Repository<Admin>>,
    staff: Box<dyn Repository<Staff>>,
    purchase_orders: Box<dyn Repository<PurchaseOrder>>,
    payment_notices: Box<dyn Repository<AdminPaymentNotice>>,
    clock: Clock,
}

impl Store {
    /// Build a store whose collections all come from `backend`.
    pub fn with_backend<B: Backend>(backend: &B) -> Self {
        Self {
            customers: backend.repository(),
            patients: backend.repository(),
            prescriptions: backend.repository(),
            invoices: backend.repository(),
            appointments: backend.repository(),
            products: backend.repository(),
            shops: backend.repository(),
            doctors: backend.repository(),
            admins: backend.repository(),
            staff: backend.repository(),
            purchase_orders: backend.repository(),
            payment_notices: backend.repository(),
            clock: Clock::new(),
        }
    }

    /// Empty process-local store.
    pub fn in_memory() -> Self {
        Self::with_backend(&MemoryBackend)
    }

    /// Store backed by the SQLite database at `path`, created if missing.
    pub fn open_sqlite<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();
        let conn = open_connection(path)?;
        info!(path = %path.display(), "opened sqlite store");
        Ok(Self::with_backend(&SqliteBackend::new(conn)))
    }

    /// SQLite store that lives in memory (for testing).
    pub fn sqlite_in_memory() -> CoreResult<Self> {
        let conn = open_memory_connection()?;
        Ok(Self::with_backend(&SqliteBackend::new(conn)))
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}

/// A record type with a collection in the [`Store`].
pub trait Stored: Record {
    fn repository(store: &Store) -> &dyn Repository<Self>;
}

macro_rules! stored {
    ($($record:ty => $field:ident),* $(,)?) => {
        $(
            impl Stored for $record {
                fn repository(store: &Store) -> &dyn Repository<Self> {
                    store.$field.as_ref()
                }
            }
        )*
    };
}

stored! {
    Customer => customers,
    Patient => patients,
    Prescription => prescriptions,
    Invoice => invoices,
    Appointment => appointments,
    Product => products,
    Shop => shops,
    Doctor => doctors,
    Admin => admins,
    Staff => staff,
    PurchaseOrder => purchase_orders,
    AdminPaymentNotice => payment_notices,
}
