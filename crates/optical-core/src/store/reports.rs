//! Back-office sales summary.

use serde::Serialize;

use super::Store;
use crate::models::{InvoiceStatus, Product};
use crate::CoreResult;

/// Default reorder threshold for products.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub paid: usize,
    pub unpaid: usize,
    pub overdue: usize,
}

/// Totals over every invoice, plus products that need reordering.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub invoice_count: usize,
    pub gross_total: f64,
    pub collected: f64,
    pub outstanding: f64,
    pub by_status: StatusCounts,
    pub low_stock_threshold: u32,
    pub low_stock: Vec<Product>,
}

fn cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Store {
    pub fn sales_summary(&self, low_stock_threshold: u32) -> CoreResult<SalesSummary> {
        let invoices = self.invoices.list()?;

        let mut by_status = StatusCounts::default();
        let (mut gross, mut collected, mut outstanding) = (0.0, 0.0, 0.0);
        for invoice in &invoices {
            gross += invoice.total_amount;
            collected += invoice.paid_amount.min(invoice.total_amount);
            outstanding += invoice.balance_due();
            match invoice.status {
                InvoiceStatus::Paid => by_status.paid += 1,
                InvoiceStatus::Unpaid => by_status.unpaid += 1,
                InvoiceStatus::Overdue => by_status.overdue += 1,
            }
        }

        let low_stock = self
            .products
            .list()?
            .into_iter()
            .filter(|p| p.is_low_stock(low_stock_threshold))
            .collect();

        Ok(SalesSummary {
            invoice_count: invoices.len(),
            gross_total: cents(gross),
            collected: cents(collected),
            outstanding: cents(outstanding),
            by_status,
            low_stock_threshold,
            low_stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Invoice, NewInvoice, NewProduct};

    fn invoice(json: &str) -> NewInvoice {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_summary_totals() {
        let store = Store::in_memory();
        store
            .create::<Invoice>(invoice(r#"{"items":[{"unitPrice":100}],"paidAmount":100}"#))
            .unwrap();
        store
            .create::<Invoice>(invoice(r#"{"items":[{"unitPrice":60}],"paidAmount":20}"#))
            .unwrap();
        store
            .create::<Invoice>(invoice(r#"{"items":[{"unitPrice":40}],"status":"OVERDUE"}"#))
            .unwrap();

        let summary = store.sales_summary(DEFAULT_LOW_STOCK_THRESHOLD).unwrap();
        assert_eq!(summary.invoice_count, 3);
        assert_eq!(summary.gross_total, 200.0);
        assert_eq!(summary.collected, 120.0);
        assert_eq!(summary.outstanding, 80.0);
        assert_eq!(
            summary.by_status,
            StatusCounts {
                paid: 1,
                unpaid: 1,
                overdue: 1
            }
        );
    }

    #[test]
    fn test_low_stock_uses_threshold() {
        let store = Store::in_memory();
        for (id, stock) in [("A1", 2), ("B2", 5), ("C3", 30)] {
            store
                .create::<Product>(NewProduct {
                    id: Some(id.into()),
                    name: Some(format!("Lens {}", id)),
                    price: Some(10.0),
                    stock: Some(stock),
                    ..Default::default()
                })
                .unwrap();
        }

        let ids = |threshold| -> Vec<String> {
            store
                .sales_summary(threshold)
                .unwrap()
                .low_stock
                .into_iter()
                .map(|p| p.id)
                .collect()
        };
        assert_eq!(ids(5), vec!["A1", "B2"]);
        assert_eq!(ids(1), Vec::<String>::new());
    }
}
