//! Plan entity and its price components

use super::record::{contains_ci, EntityKind, Record, SortValue};
use crate::table::Tone;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    Standard,
    Free,
    Custom,
}

impl PlanType {
    pub fn label(&self) -> &'static str {
        match self {
            PlanType::Standard => "Standard",
            PlanType::Free => "Free",
            PlanType::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Draft,
    Active,
    Archived,
}

impl PlanStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "Draft",
            PlanStatus::Active => "Active",
            PlanStatus::Archived => "Archived",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            PlanStatus::Draft => Tone::Warning,
            PlanStatus::Active => Tone::Positive,
            PlanStatus::Archived => Tone::Muted,
        }
    }
}

/// How a price component charges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeKind {
    Rate,
    Slot,
    Capacity,
    UsageBased,
    OneTime,
    ExtraRecurring,
}

impl FeeKind {
    pub fn label(&self) -> &'static str {
        match self {
            FeeKind::Rate => "Rate",
            FeeKind::Slot => "Slot",
            FeeKind::Capacity => "Capacity",
            FeeKind::UsageBased => "Usage",
            FeeKind::OneTime => "One-time",
            FeeKind::ExtraRecurring => "Recurring",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComponent {
    pub name: String,
    pub fee: FeeKind,
    /// `None` for usage-based prices computed at invoicing time
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub cadence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub plan_type: PlanType,
    pub status: PlanStatus,
    pub currency: String,
    #[serde(default)]
    pub price_components: Vec<PriceComponent>,
    pub created_at: NaiveDate,
}

impl Record for Plan {
    const KIND: EntityKind = EntityKind::Plans;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || contains_ci(&self.id, needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| contains_ci(d, needle))
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "name" => Some(SortValue::text(&self.name)),
            "status" => Some(SortValue::text(self.status.label())),
            "components" => Some(SortValue::Number(self.price_components.len() as i64)),
            "created_at" => Some(SortValue::Date(self.created_at)),
            _ => None,
        }
    }
}
