use super::table_page::{PageDefinition, TablePage};
use crate::model::{format_money, EntityKind, Subscription};
use crate::route::Route;
use crate::services::BillingApi;
use crate::table::{CellContent, ColumnDescriptor, RowMode};
use std::sync::Arc;

pub fn columns() -> Vec<ColumnDescriptor<Subscription>> {
    vec![
        ColumnDescriptor::accessor("customer", "Customer", |s: &Subscription| {
            s.customer_name.clone()
        })
        .sortable()
        .max_width(28),
        ColumnDescriptor::accessor("plan", "Plan", |s: &Subscription| {
            format!("{} v{}", s.plan_name, s.plan_version)
        })
        .sortable(),
        ColumnDescriptor::render("status", "Status", |s: &Subscription| {
            CellContent::new(s.status.label(), s.status.tone())
        })
        .sortable(),
        ColumnDescriptor::accessor("mrr", "MRR", |s: &Subscription| {
            format_money(s.mrr_cents, &s.currency)
        })
        .sortable()
        .align_right(),
        ColumnDescriptor::accessor("billing_day", "Bills on", |s: &Subscription| {
            format!("day {}", s.billing_day)
        }),
        ColumnDescriptor::accessor("start_date", "Started", |s: &Subscription| {
            s.start_date.to_string()
        })
        .sortable(),
        ColumnDescriptor::render("end_date", "Ends", |s: &Subscription| match s.end_date {
            Some(date) => CellContent::plain(date.to_string()),
            None => CellContent::muted("—"),
        }),
    ]
}

pub fn page(api: Arc<dyn BillingApi>, tenant: &str, page_size: usize) -> TablePage<Subscription> {
    let link_tenant = tenant.to_string();
    let definition = PageDefinition {
        columns: columns(),
        mode: RowMode::linked(move |s: &Subscription| {
            Route::record(&link_tenant, EntityKind::Subscriptions, &s.id).to_string()
        }),
        fetch: |api, request| api.list_subscriptions(request),
        empty_message: "No subscriptions",
    };
    TablePage::new(definition, api, tenant, page_size)
}
