//! Fixture data loaded at startup.

use chrono::{DateTime, Utc};
use tracing::info;

use super::{Store, Stored};
use crate::models::{
    invoice_total, Admin, AdminPaymentNotice, Appointment, Customer, Doctor, EyeMeasurement,
    EyePair, Invoice, InvoiceItem, InvoiceStatus, Patient, Prescription, Product, PurchaseOrder,
    PurchaseOrderLine, Shop, Staff,
};
use crate::CoreResult;

impl Store {
    /// Load fixture records into every collection that is still empty.
    ///
    /// Collections that already hold records are left alone, so seeding a
    /// reopened SQLite store is a no-op. Returns the number of records added.
    pub fn seed(&self) -> CoreResult<usize> {
        let now = self.clock.now();

        let added = self.seed_collection(customers(now))?
            + self.seed_collection(patients(now))?
            + self.seed_collection(prescriptions(now))?
            + self.seed_collection(invoices(now))?
            + self.seed_collection(appointments(now))?
            + self.seed_collection(products(now))?
            + self.seed_collection(shops())?
            + self.seed_collection(doctors())?
            + self.seed_collection(admins())?
            + self.seed_collection(staff())?
            + self.seed_collection(purchase_orders())?
            + self.seed_collection(payment_notices())?;

        info!(records = added, "seeded store");
        Ok(added)
    }

    fn seed_collection<R: Stored>(&self, records: Vec<R>) -> CoreResult<usize> {
        if R::repository(self).count()? > 0 {
            return Ok(0);
        }
        for record in &records {
            self.insert(record)?;
        }
        Ok(records.len())
    }
}

fn customers(now: DateTime<Utc>) -> Vec<Customer> {
    [
        ("Jane Smith", "555-0101", "12 Elm Street"),
        ("John Doe", "555-0102", "48 Oak Avenue"),
        ("Maria Garcia", "555-0103", "7 Pine Road"),
    ]
    .into_iter()
    .zip(1u64..)
    .map(|((name, phone, address), id)| Customer {
        id,
        name: name.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        created_at: now,
        updated_at: now,
    })
    .collect()
}

fn eye(sphere: f64, cylinder: f64, axis: f64) -> EyeMeasurement {
    EyeMeasurement {
        sphere: Some(sphere),
        cylinder: Some(cylinder),
        axis: Some(axis),
        add: None,
    }
}

fn patients(now: DateTime<Utc>) -> Vec<Patient> {
    let mut emily = Patient::new(1, "Emily Carter".into(), now);
    emily.age = Some(34);
    emily.gender = Some("Female".into());
    emily.phone = "555-0201".into();
    emily.address = "3 Birch Lane".into();
    emily.prescription = Some(EyePair {
        right_eye: eye(-1.25, -0.5, 90.0),
        left_eye: eye(-1.0, -0.25, 85.0),
    });
    emily.loyalty_points = 120;
    emily.loyalty_tier = Some("Silver".into());
    emily.shop_id = Some("SHOP001".into());

    let mut michael = Patient::new(2, "Michael Brown".into(), now);
    michael.age = Some(58);
    michael.gender = Some("Male".into());
    michael.phone = "555-0202".into();
    michael.address = "19 Cedar Court".into();
    michael.medical_history = Some("Early cataract, left eye".into());
    michael.loyalty_points = 340;
    michael.loyalty_tier = Some("Gold".into());
    michael.shop_id = Some("SHOP001".into());

    let mut sofia = Patient::new(3, "Sofia Rossi".into(), now);
    sofia.age = Some(9);
    sofia.gender = Some("Female".into());
    sofia.phone = "555-0203".into();
    sofia.shop_id = Some("SHOP002".into());

    vec![emily, michael, sofia]
}

fn prescriptions(now: DateTime<Utc>) -> Vec<Prescription> {
    vec![
        Prescription {
            id: 1,
            patient_id: "PAT001".into(),
            patient_name: Some("Emily Carter".into()),
            right_eye: eye(-1.25, -0.5, 90.0),
            left_eye: eye(-1.0, -0.25, 85.0),
            pd: Some(62.0),
            notes: Some("Anti-glare coating recommended".into()),
            created_at: now,
            updated_at: now,
        },
        Prescription {
            id: 2,
            patient_id: "PAT002".into(),
            patient_name: Some("Michael Brown".into()),
            right_eye: EyeMeasurement {
                add: Some(2.0),
                ..eye(1.5, -0.75, 170.0)
            },
            left_eye: EyeMeasurement {
                add: Some(2.0),
                ..eye(1.75, -0.5, 10.0)
            },
            pd: Some(64.0),
            notes: Some("Progressive lenses".into()),
            created_at: now,
            updated_at: now,
        },
    ]
}

fn item(product_id: &str, product_name: &str, quantity: u32, unit_price: f64) -> InvoiceItem {
    InvoiceItem {
        product_id: Some(product_id.into()),
        product_name: product_name.into(),
        quantity,
        unit_price,
    }
}

fn invoices(now: DateTime<Utc>) -> Vec<Invoice> {
    let invoice = |id: &str,
                   patient: (&str, &str),
                   items: Vec<InvoiceItem>,
                   paid_amount: f64,
                   status: InvoiceStatus,
                   dates: (&str, &str)| {
        let total_amount = invoice_total(&items, 0.0);
        Invoice {
            id: id.into(),
            patient_id: Some(patient.0.into()),
            patient_name: Some(patient.1.into()),
            customer_id: None,
            items,
            discount: 0.0,
            total_amount,
            paid_amount,
            status,
            payment_method: Some("Card".into()),
            issue_date: dates.0.into(),
            due_date: Some(dates.1.into()),
            shop_id: Some("SHOP001".into()),
            created_at: now,
            updated_at: now,
        }
    };

    vec![
        invoice(
            "INV-2024-001",
            ("PAT001", "Emily Carter"),
            vec![
                item("8901001", "Titanium Frame", 1, 120.0),
                item("8902001", "Single Vision Lens", 2, 45.0),
            ],
            210.0,
            InvoiceStatus::Paid,
            ("2024-01-15", "2024-02-15"),
        ),
        invoice(
            "INV-2024-002",
            ("PAT002", "Michael Brown"),
            vec![item("8902002", "Progressive Lens", 2, 150.0)],
            100.0,
            InvoiceStatus::Unpaid,
            ("2024-02-03", "2024-03-03"),
        ),
        invoice(
            "INV-2024-003",
            ("PAT003", "Sofia Rossi"),
            vec![item("8901002", "Kids Flex Frame", 1, 60.0)],
            0.0,
            InvoiceStatus::Overdue,
            ("2024-01-05", "2024-02-05"),
        ),
        Invoice {
            patient_id: None,
            customer_id: Some(1),
            payment_method: Some("Cash".into()),
            due_date: None,
            ..invoice(
                "INV-2024-004",
                ("", "Jane Smith"),
                vec![item("8903001", "Daily Contact Lenses", 2, 25.0)],
                50.0,
                InvoiceStatus::Paid,
                ("2024-02-20", ""),
            )
        },
    ]
}

fn appointments(now: DateTime<Utc>) -> Vec<Appointment> {
    let appointment = |id: &str, patient: (&str, &str), date: &str, time: &str, status: &str| {
        Appointment {
            id: id.into(),
            patient_id: patient.0.into(),
            patient_name: Some(patient.1.into()),
            doctor_name: Some("Dr. Alan Grant".into()),
            date: date.into(),
            time: time.into(),
            status: status.into(),
            notes: None,
            shop_id: Some("SHOP001".into()),
            created_at: now,
            updated_at: now,
        }
    };

    vec![
        appointment("APP001", ("PAT001", "Emily Carter"), "2024-03-10", "10:00", "Completed"),
        appointment("APP002", ("PAT002", "Michael Brown"), "2024-03-12", "14:30", "Scheduled"),
    ]
}

fn products(now: DateTime<Utc>) -> Vec<Product> {
    [
        ("8901001", "Titanium Frame", "Lightweight full-rim frame", 120.0, 14, "Frame", "Lindberg"),
        ("8901002", "Kids Flex Frame", "Bendable frame for children", 60.0, 3, "Frame", "Miraflex"),
        ("8902001", "Single Vision Lens", "1.56 index, anti-glare", 45.0, 40, "Lens", "Essilor"),
        ("8902002", "Progressive Lens", "1.60 index varifocal", 150.0, 4, "Lens", "Zeiss"),
        ("8903001", "Daily Contact Lenses", "30 pack", 25.0, 60, "Contact Lens", "Acuvue"),
    ]
    .into_iter()
    .map(
        |(id, name, description, price, stock, product_type, brand)| Product {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            stock,
            product_type: product_type.into(),
            brand: brand.into(),
            created_at: now,
            updated_at: now,
        },
    )
    .collect()
}

fn shops() -> Vec<Shop> {
    vec![
        Shop {
            id: "SHOP001".into(),
            name: "Downtown Optical".into(),
            address: "100 Main Street".into(),
            phone: "555-1000".into(),
            manager: Some("Priya Nair".into()),
        },
        Shop {
            id: "SHOP002".into(),
            name: "Harbour View Eyecare".into(),
            address: "8 Quay Road".into(),
            phone: "555-2000".into(),
            manager: Some("Tom Walsh".into()),
        },
    ]
}

fn doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: "DOC001".into(),
            name: "Dr. Alan Grant".into(),
            specialization: "Optometrist".into(),
            phone: "555-3001".into(),
            email: "alan.grant@example.com".into(),
            shop_id: Some("SHOP001".into()),
        },
        Doctor {
            id: "DOC002".into(),
            name: "Dr. Ellie Sattler".into(),
            specialization: "Ophthalmologist".into(),
            phone: "555-3002".into(),
            email: "ellie.sattler@example.com".into(),
            shop_id: Some("SHOP002".into()),
        },
    ]
}

fn admins() -> Vec<Admin> {
    vec![Admin {
        id: "ADM001".into(),
        name: "Head Office Admin".into(),
        email: "admin@example.com".into(),
        role: "superadmin".into(),
    }]
}

fn staff() -> Vec<Staff> {
    vec![
        Staff {
            id: "STF001".into(),
            name: "Priya Nair".into(),
            role: "Manager".into(),
            phone: "555-4001".into(),
            shop_id: Some("SHOP001".into()),
        },
        Staff {
            id: "STF002".into(),
            name: "Leo Martin".into(),
            role: "Sales Associate".into(),
            phone: "555-4002".into(),
            shop_id: Some("SHOP001".into()),
        },
    ]
}

fn purchase_orders() -> Vec<PurchaseOrder> {
    let items = vec![
        PurchaseOrderLine {
            product_id: "8901002".into(),
            product_name: "Kids Flex Frame".into(),
            quantity: 20,
            unit_cost: 28.0,
        },
        PurchaseOrderLine {
            product_id: "8902002".into(),
            product_name: "Progressive Lens".into(),
            quantity: 10,
            unit_cost: 70.0,
        },
    ];
    let total = items
        .iter()
        .map(|l| l.unit_cost * f64::from(l.quantity))
        .sum();

    vec![PurchaseOrder {
        id: "PO-2024-001".into(),
        supplier: "Vision Supply Co".into(),
        items,
        total,
        status: "Pending".into(),
        order_date: "2024-03-01".into(),
        shop_id: Some("SHOP001".into()),
    }]
}

fn payment_notices() -> Vec<AdminPaymentNotice> {
    vec![AdminPaymentNotice {
        id: "APN001".into(),
        shop_id: "SHOP002".into(),
        shop_name: "Harbour View Eyecare".into(),
        amount: 450.0,
        due_date: "2024-04-01".into(),
        status: "Pending".into(),
        message: "Quarterly franchise fee".into(),
    }]
}
