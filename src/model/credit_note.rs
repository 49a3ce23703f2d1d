//! Credit note entity

use super::record::{contains_ci, EntityKind, Record, SortValue};
use crate::table::Tone;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditNoteStatus {
    Draft,
    Finalized,
    Voided,
}

impl CreditNoteStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CreditNoteStatus::Draft => "Draft",
            CreditNoteStatus::Finalized => "Finalized",
            CreditNoteStatus::Voided => "Voided",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            CreditNoteStatus::Draft => Tone::Warning,
            CreditNoteStatus::Finalized => Tone::Positive,
            CreditNoteStatus::Voided => Tone::Muted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditNote {
    pub id: String,
    pub credit_note_number: String,
    pub invoice_id: String,
    pub invoice_number: String,
    pub customer_id: String,
    pub customer_name: String,
    pub status: CreditNoteStatus,
    pub currency: String,
    pub total_cents: i64,
    #[serde(default)]
    pub reason: Option<String>,
    pub created_at: NaiveDate,
}

impl Record for CreditNote {
    const KIND: EntityKind = EntityKind::CreditNotes;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.credit_note_number, needle)
            || contains_ci(&self.invoice_number, needle)
            || contains_ci(&self.customer_name, needle)
            || self.reason.as_deref().is_some_and(|r| contains_ci(r, needle))
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "credit_note_number" => Some(SortValue::text(&self.credit_note_number)),
            "customer" => Some(SortValue::text(&self.customer_name)),
            "total" => Some(SortValue::Number(self.total_cents)),
            "created_at" => Some(SortValue::Date(self.created_at)),
            _ => None,
        }
    }
}
