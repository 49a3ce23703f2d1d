use super::table_page::{PageDefinition, TablePage};
use crate::model::{format_money, Customer, EntityKind};
use crate::route::Route;
use crate::services::BillingApi;
use crate::table::{CellContent, ColumnDescriptor, RowMode, Tone};
use std::sync::Arc;

pub fn columns() -> Vec<ColumnDescriptor<Customer>> {
    vec![
        ColumnDescriptor::accessor("name", "Name", |c: &Customer| c.name.clone())
            .sortable()
            .max_width(28),
        ColumnDescriptor::render("alias", "Alias", |c: &Customer| match &c.alias {
            Some(alias) => CellContent::plain(alias.as_str()),
            None => CellContent::muted("—"),
        })
        .max_width(24),
        ColumnDescriptor::accessor("email", "Email", |c: &Customer| {
            c.email.clone().unwrap_or_default()
        })
        .sortable(),
        ColumnDescriptor::accessor("currency", "Currency", |c: &Customer| c.currency.clone())
            .sortable(),
        ColumnDescriptor::render("balance", "Balance", |c: &Customer| {
            let tone = if c.balance_cents < 0 {
                Tone::Negative
            } else {
                Tone::Default
            };
            CellContent::new(format_money(c.balance_cents, &c.currency), tone)
        })
        .sortable()
        .align_right(),
        ColumnDescriptor::accessor("created_at", "Created", |c: &Customer| {
            c.created_at.to_string()
        })
        .sortable(),
    ]
}

pub fn page(api: Arc<dyn BillingApi>, tenant: &str, page_size: usize) -> TablePage<Customer> {
    let link_tenant = tenant.to_string();
    let definition = PageDefinition {
        columns: columns(),
        mode: RowMode::linked(move |c: &Customer| {
            Route::record(&link_tenant, EntityKind::Customers, &c.id).to_string()
        }),
        fetch: |api, request| api.list_customers(request),
        empty_message: "No customers yet. Press i to import a CSV file.",
    };
    TablePage::new(definition, api, tenant, page_size)
}
