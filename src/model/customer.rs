//! Customer entity

use super::record::{contains_ci, EntityKind, Record, SortValue};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub currency: String,
    /// Prepaid balance in cents
    #[serde(default)]
    pub balance_cents: i64,
    pub created_at: NaiveDate,
}

/// A customer row read from an import file, before the API assigns an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub alias: Option<String>,
    pub email: String,
    pub currency: String,
    pub balance_cents: i64,
}

impl Record for Customer {
    const KIND: EntityKind = EntityKind::Customers;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || contains_ci(&self.id, needle)
            || self.alias.as_deref().is_some_and(|a| contains_ci(a, needle))
            || self.email.as_deref().is_some_and(|e| contains_ci(e, needle))
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "name" => Some(SortValue::text(&self.name)),
            "email" => Some(SortValue::text(self.email.as_deref().unwrap_or(""))),
            "currency" => Some(SortValue::text(&self.currency)),
            "balance" => Some(SortValue::Number(self.balance_cents)),
            "created_at" => Some(SortValue::Date(self.created_at)),
            _ => None,
        }
    }
}
