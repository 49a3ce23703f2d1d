//! Dataset served by the fixture API
//!
//! Loaded from a JSON or YAML file, or generated as a deterministic demo.

use super::credit_note::{CreditNote, CreditNoteStatus};
use super::customer::Customer;
use super::invoice::{Invoice, InvoiceLine, InvoiceStatus};
use super::plan::{FeeKind, Plan, PlanStatus, PlanType, PriceComponent};
use super::subscription::{Subscription, SubscriptionStatus};
use anyhow::{bail, Context, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub slug: String,
    pub name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub tenant: Option<Tenant>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub plans: Vec<Plan>,
    #[serde(default)]
    pub credit_notes: Vec<CreditNote>,
}

impl Dataset {
    /// Load a dataset, choosing the format by file extension
    pub fn load(path: &Path) -> Result<Dataset> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let dataset = match extension.as_deref() {
            Some("json") => serde_json::from_str(&contents)
                .with_context(|| format!("Invalid JSON dataset {}", path.display()))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid YAML dataset {}", path.display()))?,
            _ => bail!(
                "Unsupported dataset format for {} (expected .json, .yaml or .yml)",
                path.display()
            ),
        };

        Ok(dataset)
    }

    /// Deterministic demo data for a tenant
    pub fn demo(tenant_slug: &str) -> Dataset {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
        let day = |n: u64| base + Days::new(n);

        let plans = demo_plans(day(0));
        let customers = demo_customers(&day);
        let subscriptions = demo_subscriptions(&customers, &plans, &day);
        let invoices = demo_invoices(&subscriptions, &day);
        let credit_notes = demo_credit_notes(&invoices, &day);

        Dataset {
            tenant: Some(Tenant {
                slug: tenant_slug.to_string(),
                name: title_case(tenant_slug),
                currency: default_currency(),
            }),
            customers,
            invoices,
            subscriptions,
            plans,
            credit_notes,
        }
    }
}

const COMPANY_PREFIXES: [&str; 12] = [
    "Acme", "Globex", "Initech", "Umbrella", "Hooli", "Stark", "Wayne", "Tyrell", "Soylent",
    "Cyberdyne", "Wonka", "Vandelay",
];

const COMPANY_SUFFIXES: [&str; 5] = ["Labs", "Industries", "Systems", "Holdings", "Group"];

const CURRENCIES: [&str; 3] = ["USD", "EUR", "GBP"];

fn title_case(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn demo_plans(created_at: NaiveDate) -> Vec<Plan> {
    let component = |name: &str, fee: FeeKind, price: Option<i64>, cadence: Option<&str>| {
        PriceComponent {
            name: name.to_string(),
            fee,
            price_cents: price,
            cadence: cadence.map(str::to_string),
        }
    };

    vec![
        Plan {
            id: "plan_free".to_string(),
            name: "Free".to_string(),
            description: Some("Evaluation tier".to_string()),
            plan_type: PlanType::Free,
            status: PlanStatus::Active,
            currency: "USD".to_string(),
            price_components: vec![],
            created_at,
        },
        Plan {
            id: "plan_starter".to_string(),
            name: "Starter".to_string(),
            description: Some("Small teams".to_string()),
            plan_type: PlanType::Standard,
            status: PlanStatus::Active,
            currency: "USD".to_string(),
            price_components: vec![
                component("Platform fee", FeeKind::Rate, Some(4_900), Some("monthly")),
                component("Seats", FeeKind::Slot, Some(1_200), Some("monthly")),
            ],
            created_at,
        },
        Plan {
            id: "plan_growth".to_string(),
            name: "Growth".to_string(),
            description: Some("Usage-based API billing".to_string()),
            plan_type: PlanType::Standard,
            status: PlanStatus::Active,
            currency: "USD".to_string(),
            price_components: vec![
                component("Platform fee", FeeKind::Rate, Some(19_900), Some("monthly")),
                component("API calls", FeeKind::UsageBased, None, Some("monthly")),
                component("Onboarding", FeeKind::OneTime, Some(50_000), None),
            ],
            created_at,
        },
        Plan {
            id: "plan_scale".to_string(),
            name: "Scale".to_string(),
            description: Some("Committed capacity".to_string()),
            plan_type: PlanType::Standard,
            status: PlanStatus::Active,
            currency: "USD".to_string(),
            price_components: vec![
                component("Capacity", FeeKind::Capacity, Some(99_000), Some("monthly")),
                component("Overage", FeeKind::UsageBased, None, Some("monthly")),
                component("Support", FeeKind::ExtraRecurring, Some(25_000), Some("quarterly")),
            ],
            created_at,
        },
        Plan {
            id: "plan_enterprise".to_string(),
            name: "Enterprise".to_string(),
            description: None,
            plan_type: PlanType::Custom,
            status: PlanStatus::Draft,
            currency: "USD".to_string(),
            price_components: vec![component(
                "Negotiated rate",
                FeeKind::Rate,
                Some(500_000),
                Some("annual"),
            )],
            created_at,
        },
        Plan {
            id: "plan_legacy".to_string(),
            name: "Legacy Pro".to_string(),
            description: Some("Retired 2023 pricing".to_string()),
            plan_type: PlanType::Standard,
            status: PlanStatus::Archived,
            currency: "USD".to_string(),
            price_components: vec![component("Pro", FeeKind::Rate, Some(9_900), Some("monthly"))],
            created_at,
        },
    ]
}

fn demo_customers(day: &dyn Fn(u64) -> NaiveDate) -> Vec<Customer> {
    let mut customers = Vec::new();
    for (i, suffix) in COMPANY_SUFFIXES.iter().enumerate() {
        for (j, prefix) in COMPANY_PREFIXES.iter().enumerate() {
            let n = i * COMPANY_PREFIXES.len() + j;
            if n % 7 == 6 {
                continue;
            }
            let name = format!("{} {}", prefix, suffix);
            let alias = prefix.to_lowercase();
            customers.push(Customer {
                id: format!("cus_{:04}", n + 1),
                email: Some(format!("billing@{}{}.test", alias, i)),
                alias: Some(format!("{}-{}", alias, suffix.to_lowercase())),
                name,
                currency: CURRENCIES[n % CURRENCIES.len()].to_string(),
                balance_cents: ((n as i64 * 3_779) % 25_000) - 5_000,
                created_at: day((n as u64 * 5) % 300),
            });
        }
    }
    customers
}

fn demo_subscriptions(
    customers: &[Customer],
    plans: &[Plan],
    day: &dyn Fn(u64) -> NaiveDate,
) -> Vec<Subscription> {
    let statuses = [
        SubscriptionStatus::Active,
        SubscriptionStatus::Active,
        SubscriptionStatus::Trialing,
        SubscriptionStatus::Active,
        SubscriptionStatus::Cancelled,
        SubscriptionStatus::Pending,
        SubscriptionStatus::Ended,
    ];
    let billable: Vec<&Plan> = plans
        .iter()
        .filter(|p| p.status != PlanStatus::Draft)
        .collect();

    customers
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 5 != 4)
        .map(|(i, customer)| {
            let plan = billable[i % billable.len()];
            let status = statuses[i % statuses.len()];
            let mrr = plan
                .price_components
                .iter()
                .filter(|c| c.fee != FeeKind::OneTime)
                .filter_map(|c| c.price_cents)
                .sum::<i64>()
                .min(120_000);
            let start = (customer.created_at - day(0)).num_days().max(0) as u64 + 3;
            Subscription {
                id: format!("sub_{:04}", i + 1),
                customer_id: customer.id.clone(),
                customer_name: customer.name.clone(),
                plan_name: plan.name.clone(),
                plan_version: 1 + (i % 3) as u32,
                status,
                currency: customer.currency.clone(),
                mrr_cents: mrr,
                billing_day: (1 + i % 28) as u8,
                start_date: day(start),
                end_date: matches!(status, SubscriptionStatus::Ended | SubscriptionStatus::Cancelled)
                    .then(|| day(start + 120)),
            }
        })
        .collect()
}

fn demo_invoices(subscriptions: &[Subscription], day: &dyn Fn(u64) -> NaiveDate) -> Vec<Invoice> {
    let statuses = [
        InvoiceStatus::Paid,
        InvoiceStatus::Paid,
        InvoiceStatus::Finalized,
        InvoiceStatus::Paid,
        InvoiceStatus::Draft,
        InvoiceStatus::Void,
        InvoiceStatus::Paid,
        InvoiceStatus::Uncollectible,
    ];
    let mut invoices = Vec::new();
    let mut number = 1;

    for (i, sub) in subscriptions.iter().enumerate() {
        if sub.mrr_cents == 0 {
            continue;
        }
        let periods = 1 + i % 3;
        for period in 0..periods {
            let start = (sub.start_date - day(0)).num_days().max(0) as u64 + period as u64 * 30;
            let quantity = 1 + ((i + period) % 4) as u32;
            let seats_price = 1_200;
            let lines = vec![
                InvoiceLine {
                    name: format!("{} subscription", sub.plan_name),
                    quantity: 1,
                    unit_price_cents: sub.mrr_cents,
                    total_cents: sub.mrr_cents,
                    period_start: Some(day(start)),
                    period_end: Some(day(start + 30)),
                },
                InvoiceLine {
                    name: "Additional seats".to_string(),
                    quantity,
                    unit_price_cents: seats_price,
                    total_cents: seats_price * quantity as i64,
                    period_start: Some(day(start)),
                    period_end: Some(day(start + 30)),
                },
            ];
            let subtotal: i64 = lines.iter().map(|l| l.total_cents).sum();
            let tax = subtotal / 10;
            invoices.push(Invoice {
                id: format!("inv_{:05}", number),
                invoice_number: format!("INV-{:05}", number),
                customer_id: sub.customer_id.clone(),
                customer_name: sub.customer_name.clone(),
                status: statuses[(i + period) % statuses.len()],
                currency: sub.currency.clone(),
                tax_cents: tax,
                total_cents: subtotal + tax,
                invoice_date: day(start + 30),
                due_date: Some(day(start + 60)),
                lines,
            });
            number += 1;
        }
    }
    invoices
}

fn demo_credit_notes(invoices: &[Invoice], day: &dyn Fn(u64) -> NaiveDate) -> Vec<CreditNote> {
    let reasons = ["Service outage", "Duplicate charge", "Goodwill", "Downgrade proration"];
    let statuses = [
        CreditNoteStatus::Finalized,
        CreditNoteStatus::Draft,
        CreditNoteStatus::Finalized,
        CreditNoteStatus::Voided,
    ];

    invoices
        .iter()
        .filter(|inv| matches!(inv.status, InvoiceStatus::Paid | InvoiceStatus::Finalized))
        .step_by(6)
        .enumerate()
        .map(|(i, invoice)| {
            let created = (invoice.invoice_date - day(0)).num_days().max(0) as u64 + 7;
            CreditNote {
                id: format!("cn_{:04}", i + 1),
                credit_note_number: format!("CN-{:04}", i + 1),
                invoice_id: invoice.id.clone(),
                invoice_number: invoice.invoice_number.clone(),
                customer_id: invoice.customer_id.clone(),
                customer_name: invoice.customer_name.clone(),
                status: statuses[i % statuses.len()],
                currency: invoice.currency.clone(),
                total_cents: invoice.total_cents / (2 + (i % 3) as i64),
                reason: Some(reasons[i % reasons.len()].to_string()),
                created_at: day(created),
            }
        })
        .collect()
}
