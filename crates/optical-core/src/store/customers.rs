//! Customer-centred composites: the walk-in sale and the customer detail view.

use serde::Serialize;
use tracing::{debug, warn};

use super::Store;
use crate::models::{Customer, Invoice, NewWalkInInvoice, INVOICE_ID_PREFIX, WALK_IN_NAME};
use crate::record::Record;
use crate::CoreResult;

/// Invoice created at the counter, returned with its new customer embedded.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WalkInInvoice {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub customer: Customer,
}

/// A customer together with every invoice raised against them.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: Customer,
    pub invoices: Vec<Invoice>,
}

impl Store {
    /// Create a customer and their first invoice in one step.
    ///
    /// Both payload parts are validated before anything is written. If the
    /// invoice cannot be stored the customer is removed again.
    pub fn create_walk_in_invoice(&self, input: NewWalkInInvoice) -> CoreResult<WalkInInvoice> {
        let (mut new_customer, new_invoice) = input.into_parts()?;
        let name = new_customer
            .name
            .take()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| WALK_IN_NAME.to_string());

        let now = self.clock.now();
        let mut invoice = Invoice::build(self.clock.stamped_id(INVOICE_ID_PREFIX), new_invoice, now)?;

        let customer = Customer::build(self.customers.next_sequence()?, new_customer, name, now);
        invoice.customer_id = Some(customer.id);
        invoice.patient_name = Some(customer.name.clone());

        self.insert(&customer)?;
        if let Err(e) = self.insert(&invoice) {
            warn!(customer = customer.id, error = %e, "invoice insert failed, removing walk-in customer");
            self.customers.remove(&customer.key())?;
            return Err(e);
        }

        debug!(customer = customer.id, invoice = %invoice.id, "created walk-in invoice");
        Ok(WalkInInvoice { invoice, customer })
    }

    /// The customer plus their invoices, in invoice insertion order.
    pub fn customer_detail(&self, raw_id: &str) -> CoreResult<CustomerDetail> {
        let customer = self.get::<Customer>(raw_id)?;
        let invoices = self
            .invoices
            .list()?
            .into_iter()
            .filter(|invoice| invoice.customer_id == Some(customer.id))
            .collect();

        Ok(CustomerDetail { customer, invoices })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvoiceStatus;
    use crate::CoreError;

    fn walk_in(json: &str) -> NewWalkInInvoice {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_walk_in_creates_both_records() {
        let store = Store::in_memory();
        let created = store
            .create_walk_in_invoice(walk_in(
                r#"{"customer":{"name":"Ravi","phone":"555"},
                    "items":[{"productName":"Frame","unitPrice":100,"quantity":2}],
                    "discount":20,"paidAmount":180}"#,
            ))
            .unwrap();

        assert_eq!(created.invoice.total_amount, 180.0);
        assert_eq!(created.invoice.status, InvoiceStatus::Paid);
        assert_eq!(created.invoice.customer_id, Some(created.customer.id));
        assert_eq!(created.customer.phone, "555");

        let detail = store
            .customer_detail(&created.customer.id.to_string())
            .unwrap();
        assert_eq!(detail.invoices.len(), 1);
        assert_eq!(detail.invoices[0].id, created.invoice.id);
    }

    #[test]
    fn test_walk_in_defaults_customer_name() {
        let store = Store::in_memory();
        let created = store
            .create_walk_in_invoice(walk_in(
                r#"{"customer":{},"items":[{"unitPrice":50}],"paidAmount":10}"#,
            ))
            .unwrap();
        assert_eq!(created.customer.name, WALK_IN_NAME);
        assert_eq!(created.invoice.status, InvoiceStatus::Unpaid);

        let json = serde_json::to_value(&created).unwrap();
        assert_eq!(json["customer"]["name"], WALK_IN_NAME);
        assert_eq!(json["totalAmount"], 50.0);
    }

    #[test]
    fn test_invalid_walk_in_writes_nothing() {
        let store = Store::in_memory();
        let err = store
            .create_walk_in_invoice(walk_in(r#"{"customer":{"name":"Ravi"},"items":[]}"#))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = store
            .create_walk_in_invoice(walk_in(
                r#"{"customer":{"name":"Ravi"},"items":[{"unitPrice":10}],"discount":50}"#,
            ))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        assert!(store.all::<Customer>(None).unwrap().is_empty());
        assert!(store.all::<Invoice>(None).unwrap().is_empty());
    }

    #[test]
    fn test_customer_detail_not_found() {
        let store = Store::in_memory();
        assert!(matches!(
            store.customer_detail("42"),
            Err(CoreError::NotFound("Customer"))
        ));
    }
}
