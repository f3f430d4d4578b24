//! Store integration tests, run against both backends.

use optical_core::models::{
    AppointmentPatch, InvoicePatch, NewAppointment, NewCustomer, NewInvoice, NewPatient,
    NewWalkInInvoice, PatientPatch,
};
use optical_core::{
    Appointment, CoreError, Customer, Invoice, InvoiceStatus, PageRequest, Patient, Store,
};

fn stores() -> Vec<(&'static str, Store)> {
    vec![
        ("memory", Store::in_memory()),
        ("sqlite", Store::sqlite_in_memory().unwrap()),
    ]
}

fn json<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_walk_in_invoice_totals() {
    for (backend, store) in stores() {
        let created = store
            .create_walk_in_invoice(json::<NewWalkInInvoice>(serde_json::json!({
                "customer": {"name": "Ravi"},
                "items": [{"unitPrice": 100, "quantity": 2}],
                "discount": 20,
                "paidAmount": 100
            })))
            .unwrap();

        assert_eq!(created.invoice.total_amount, 180.0, "{}", backend);
        assert_eq!(created.invoice.status, InvoiceStatus::Unpaid, "{}", backend);

        // Settling the balance flips the status; the total never moves
        let settled = store
            .update::<Invoice>(
                &created.invoice.id,
                &InvoicePatch {
                    paid_amount: Some(180.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(settled.status, InvoiceStatus::Paid, "{}", backend);
        assert_eq!(settled.total_amount, 180.0, "{}", backend);

        let detail = store
            .customer_detail(&created.customer.id.to_string())
            .unwrap();
        assert_eq!(detail.invoices[0].status, InvoiceStatus::Paid, "{}", backend);
    }
}

#[test]
fn test_invalid_create_leaves_collection_unchanged() {
    for (backend, store) in stores() {
        store.seed().unwrap();
        let before = store.all::<Customer>(None).unwrap();

        let err = store
            .create::<Customer>(NewCustomer {
                phone: Some("555".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "name is required", "{}", backend);
        assert_eq!(store.all::<Customer>(None).unwrap(), before, "{}", backend);
    }
}

#[test]
fn test_ids_strictly_increase_across_deletes() {
    for (backend, store) in stores() {
        let create = |name: &str| {
            store
                .create::<Customer>(NewCustomer {
                    name: Some(name.into()),
                    ..Default::default()
                })
                .unwrap()
        };

        let first = create("A");
        let second = create("B");
        store.delete::<Customer>(&second.id.to_string()).unwrap();
        let third = create("C");

        assert!(second.id > first.id, "{}", backend);
        assert!(third.id > second.id, "{}", backend);
    }
}

#[test]
fn test_update_preserves_unpatched_fields() {
    for (backend, store) in stores() {
        let patient = store
            .create::<Patient>(NewPatient {
                name: Some("Meera".into()),
                phone: Some("555-0300".into()),
                age: Some(41),
                ..Default::default()
            })
            .unwrap();

        let updated = store
            .update::<Patient>(
                &patient.id,
                &PatientPatch {
                    loyalty_points: Some(50),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, patient.id, "{}", backend);
        assert_eq!(updated.phone, "555-0300", "{}", backend);
        assert_eq!(updated.age, Some(41), "{}", backend);
        assert_eq!(updated.loyalty_points, 50, "{}", backend);
        assert_eq!(updated.created_at, patient.created_at, "{}", backend);
        assert!(updated.updated_at > patient.updated_at, "{}", backend);
        assert_eq!(store.get::<Patient>(&patient.id).unwrap(), updated, "{}", backend);
    }
}

#[test]
fn test_delete_then_get_not_found() {
    for (backend, store) in stores() {
        store.seed().unwrap();
        let removed = store.delete::<Appointment>("APP001").unwrap();
        assert_eq!(removed.id, "APP001", "{}", backend);
        assert!(
            matches!(store.get::<Appointment>("APP001"), Err(CoreError::NotFound(_))),
            "{}",
            backend
        );
    }
}

#[test]
fn test_appointment_lifecycle() {
    for (backend, store) in stores() {
        store.seed().unwrap();
        let created = store
            .create::<Appointment>(json::<NewAppointment>(serde_json::json!({
                "patientId": "PAT003",
                "date": "2024-05-01",
                "time": "09:15"
            })))
            .unwrap();
        assert_eq!(created.id, "APP003", "{}", backend);
        assert_eq!(created.status, "Scheduled", "{}", backend);

        let err = store
            .update::<Appointment>(
                &created.id,
                &AppointmentPatch {
                    time: Some("25:00".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)), "{}", backend);
    }
}

#[test]
fn test_list_pages_through_seeded_data() {
    for (backend, store) in stores() {
        store.seed().unwrap();
        let request = PageRequest::from_raw(Some("2"), Some("2"), None, 10, 100);
        let page = store.list::<Customer>(&request).unwrap();

        assert_eq!(page.total, 3, "{}", backend);
        assert_eq!(page.total_pages, 2, "{}", backend);
        assert_eq!(page.items.len(), 1, "{}", backend);

        let request = PageRequest::from_raw(None, None, Some("jane"), 10, 100);
        let page = store.list::<Customer>(&request).unwrap();
        assert_eq!(page.items[0].name, "Jane Smith", "{}", backend);
    }
}

#[test]
fn test_invoice_create_stamps_unique_ids() {
    for (backend, store) in stores() {
        let input = || {
            json::<NewInvoice>(serde_json::json!({
                "patientId": 1,
                "items": [{"productName": "Case", "unitPrice": 5}]
            }))
        };
        let a = store.create::<Invoice>(input()).unwrap();
        let b = store.create::<Invoice>(input()).unwrap();

        assert!(a.id.starts_with("INV-"), "{}", backend);
        assert_ne!(a.id, b.id, "{}", backend);
        assert_eq!(a.patient_id.as_deref(), Some("1"), "{}", backend);
    }
}

#[test]
fn test_out_of_range_invoice_total_is_rejected() {
    for (backend, store) in stores() {
        store.seed().unwrap();
        let before = store.all::<Invoice>(None).unwrap().len();

        for items in [
            serde_json::json!([{"unitPrice": 1e307, "quantity": 1}]),
            serde_json::json!([{"unitPrice": 1e12, "quantity": 4000}]),
        ] {
            let err = store
                .create::<Invoice>(json::<NewInvoice>(serde_json::json!({ "items": items })))
                .unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "{}: {}", backend, err);

            let err = store
                .create_walk_in_invoice(json::<NewWalkInInvoice>(serde_json::json!({
                    "customer": {"name": "Big Spender"},
                    "items": items
                })))
                .unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "{}: {}", backend, err);
        }

        // The collection stays readable and every total is a finite number
        let invoices = store.all::<Invoice>(None).unwrap();
        assert_eq!(invoices.len(), before, "{}", backend);
        assert!(invoices.iter().all(|i| i.total_amount.is_finite()), "{}", backend);
        assert!(store.all::<Customer>(Some("Big Spender")).unwrap().is_empty(), "{}", backend);
        assert!(store.sales_summary(5).unwrap().gross_total.is_finite(), "{}", backend);
    }
}

#[test]
fn test_sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("optical.db");

    let created = {
        let store = Store::open_sqlite(&path).unwrap();
        store.seed().unwrap();
        store
            .create::<Customer>(NewCustomer {
                name: Some("Persisted".into()),
                ..Default::default()
            })
            .unwrap()
    };

    let store = Store::open_sqlite(&path).unwrap();
    assert_eq!(store.seed().unwrap(), 0);
    assert_eq!(
        store.get::<Customer>(&created.id.to_string()).unwrap().name,
        "Persisted"
    );

    let next = store
        .create::<Customer>(NewCustomer {
            name: Some("Next".into()),
            ..Default::default()
        })
        .unwrap();
    assert!(next.id > created.id);
}
