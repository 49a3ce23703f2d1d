//! Shared traits and keys for billing entities

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

/// The entity families the console lists, one tab each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Customers,
    Invoices,
    Subscriptions,
    Plans,
    CreditNotes,
}

impl EntityKind {
    pub fn all() -> [EntityKind; 5] {
        [
            EntityKind::Customers,
            EntityKind::Invoices,
            EntityKind::Subscriptions,
            EntityKind::Plans,
            EntityKind::CreditNotes,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Customers => "Customers",
            EntityKind::Invoices => "Invoices",
            EntityKind::Subscriptions => "Subscriptions",
            EntityKind::Plans => "Plans",
            EntityKind::CreditNotes => "Credit notes",
        }
    }

    /// Path segment used in routes
    pub fn slug(&self) -> &'static str {
        match self {
            EntityKind::Customers => "customers",
            EntityKind::Invoices => "invoices",
            EntityKind::Subscriptions => "subscriptions",
            EntityKind::Plans => "plans",
            EntityKind::CreditNotes => "credit-notes",
        }
    }

    pub fn from_slug(slug: &str) -> Option<EntityKind> {
        EntityKind::all().into_iter().find(|k| k.slug() == slug)
    }

    pub fn index(&self) -> usize {
        EntityKind::all()
            .iter()
            .position(|k| k == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Comparable value of one field, used for server-side ordering
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Text(String),
    Number(i64),
    Date(NaiveDate),
}

impl SortValue {
    pub fn text(value: &str) -> Self {
        SortValue::Text(value.to_lowercase())
    }
}

/// A listable billing entity
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// Whether the entity matches a lowercase search needle
    fn matches(&self, needle: &str) -> bool;

    /// Value for ordering by `field`, `None` for unknown fields
    fn sort_value(&self, field: &str) -> Option<SortValue>;
}

/// Case-insensitive containment; `needle` must already be lowercase
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
