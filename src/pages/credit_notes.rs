use super::table_page::{PageDefinition, TablePage};
use crate::model::{format_money, CreditNote, EntityKind};
use crate::route::Route;
use crate::services::BillingApi;
use crate::table::{CellContent, ColumnDescriptor, RowMode};
use std::sync::Arc;

pub fn columns() -> Vec<ColumnDescriptor<CreditNote>> {
    vec![
        ColumnDescriptor::accessor("credit_note_number", "Number", |c: &CreditNote| {
            c.credit_note_number.clone()
        })
        .sortable(),
        ColumnDescriptor::accessor("invoice", "Invoice", |c: &CreditNote| c.invoice_number.clone()),
        ColumnDescriptor::accessor("customer", "Customer", |c: &CreditNote| {
            c.customer_name.clone()
        })
        .sortable()
        .max_width(28),
        ColumnDescriptor::render("status", "Status", |c: &CreditNote| {
            CellContent::new(c.status.label(), c.status.tone())
        }),
        ColumnDescriptor::accessor("total", "Total", |c: &CreditNote| {
            format_money(c.total_cents, &c.currency)
        })
        .sortable()
        .align_right(),
        ColumnDescriptor::render("reason", "Reason", |c: &CreditNote| match &c.reason {
            Some(reason) => CellContent::plain(reason.as_str()),
            None => CellContent::muted("—"),
        })
        .max_width(30),
        ColumnDescriptor::accessor("created_at", "Created", |c: &CreditNote| {
            c.created_at.to_string()
        })
        .sortable(),
    ]
}

/// Rows link to the credited invoice
pub fn page(api: Arc<dyn BillingApi>, tenant: &str, page_size: usize) -> TablePage<CreditNote> {
    let link_tenant = tenant.to_string();
    let definition = PageDefinition {
        columns: columns(),
        mode: RowMode::linked(move |c: &CreditNote| {
            Route::record(&link_tenant, EntityKind::Invoices, &c.invoice_id).to_string()
        }),
        fetch: |api, request| api.list_credit_notes(request),
        empty_message: "No credit notes",
    };
    TablePage::new(definition, api, tenant, page_size)
}
