//! Subscription entity

use super::record::{contains_ci, EntityKind, Record, SortValue};
use crate::table::Tone;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Pending,
    Trialing,
    Active,
    Cancelled,
    Ended,
}

impl SubscriptionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "Pending",
            SubscriptionStatus::Trialing => "Trialing",
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Cancelled => "Cancelled",
            SubscriptionStatus::Ended => "Ended",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            SubscriptionStatus::Pending => Tone::Muted,
            SubscriptionStatus::Trialing => Tone::Accent,
            SubscriptionStatus::Active => Tone::Positive,
            SubscriptionStatus::Cancelled => Tone::Warning,
            SubscriptionStatus::Ended => Tone::Muted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub plan_name: String,
    #[serde(default = "default_version")]
    pub plan_version: u32,
    pub status: SubscriptionStatus,
    pub currency: String,
    /// Monthly recurring revenue in cents
    pub mrr_cents: i64,
    #[serde(default = "default_billing_day")]
    pub billing_day: u8,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

fn default_version() -> u32 {
    1
}

fn default_billing_day() -> u8 {
    1
}

impl Record for Subscription {
    const KIND: EntityKind = EntityKind::Subscriptions;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.customer_name, needle)
            || contains_ci(&self.plan_name, needle)
            || contains_ci(&self.id, needle)
            || contains_ci(self.status.label(), needle)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "customer" => Some(SortValue::text(&self.customer_name)),
            "plan" => Some(SortValue::text(&self.plan_name)),
            "status" => Some(SortValue::text(self.status.label())),
            "mrr" => Some(SortValue::Number(self.mrr_cents)),
            "start_date" => Some(SortValue::Date(self.start_date)),
            _ => None,
        }
    }
}
