//! Invoice entity and its lines

use super::record::{contains_ci, EntityKind, Record, SortValue};
use crate::table::Tone;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Finalized,
    Paid,
    Void,
    Uncollectible,
}

impl InvoiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Finalized => "Finalized",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Void => "Void",
            InvoiceStatus::Uncollectible => "Uncollectible",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "○",
            InvoiceStatus::Finalized => "◐",
            InvoiceStatus::Paid => "●",
            InvoiceStatus::Void => "⊘",
            InvoiceStatus::Uncollectible => "✗",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            InvoiceStatus::Draft => Tone::Muted,
            InvoiceStatus::Finalized => Tone::Warning,
            InvoiceStatus::Paid => Tone::Positive,
            InvoiceStatus::Void => Tone::Muted,
            InvoiceStatus::Uncollectible => Tone::Negative,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub total_cents: i64,
    #[serde(default)]
    pub period_start: Option<NaiveDate>,
    #[serde(default)]
    pub period_end: Option<NaiveDate>,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub customer_id: String,
    pub customer_name: String,
    pub status: InvoiceStatus,
    pub currency: String,
    #[serde(default)]
    pub tax_cents: i64,
    pub total_cents: i64,
    pub invoice_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub lines: Vec<InvoiceLine>,
}

impl Record for Invoice {
    const KIND: EntityKind = EntityKind::Invoices;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.invoice_number, needle)
            || contains_ci(&self.customer_name, needle)
            || contains_ci(&self.id, needle)
            || contains_ci(self.status.label(), needle)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "invoice_number" => Some(SortValue::text(&self.invoice_number)),
            "customer" => Some(SortValue::text(&self.customer_name)),
            "status" => Some(SortValue::text(self.status.label())),
            "total" => Some(SortValue::Number(self.total_cents)),
            "invoice_date" => Some(SortValue::Date(self.invoice_date)),
            "due_date" => self.due_date.map(SortValue::Date),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_as_snake_case() {
        let json = serde_json::to_string(&InvoiceStatus::Uncollectible).unwrap();
        assert_eq!(json, "\"uncollectible\"");
        let status: InvoiceStatus = serde_json::from_str("\"paid\"").unwrap();
        assert_eq!(status, InvoiceStatus::Paid);
        assert_eq!(status.tone(), Tone::Positive);
    }

    #[test]
    fn test_line_quantity_defaults_to_one() {
        let line: InvoiceLine =
            serde_json::from_str(r#"{"name":"Seats","unit_price_cents":100,"total_cents":100}"#)
                .unwrap();
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_matches_status_label() {
        let invoice = Invoice {
            id: "inv_1".to_string(),
            invoice_number: "INV-0001".to_string(),
            customer_id: "cus_1".to_string(),
            customer_name: "Acme".to_string(),
            status: InvoiceStatus::Draft,
            currency: "USD".to_string(),
            tax_cents: 0,
            total_cents: 1000,
            invoice_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            due_date: None,
            lines: vec![],
        };
        assert!(invoice.matches("draft"));
        assert!(invoice.matches("inv-0001"));
        assert_eq!(invoice.sort_value("due_date"), None);
    }
}
