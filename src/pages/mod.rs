//! Feature pages, one per entity tab

pub mod credit_notes;
pub mod customers;
pub mod invoices;
pub mod plans;
pub mod subscriptions;
pub mod table_page;

pub use table_page::FeaturePage;

use crate::model::EntityKind;
use crate::services::BillingApi;
use std::sync::Arc;

/// Build the page for one tab
pub fn page_for(
    kind: EntityKind,
    api: Arc<dyn BillingApi>,
    tenant: &str,
    page_size: usize,
) -> Box<dyn FeaturePage> {
    match kind {
        EntityKind::Customers => Box::new(customers::page(api, tenant, page_size)),
        EntityKind::Invoices => Box::new(invoices::page(api, tenant, page_size)),
        EntityKind::Subscriptions => Box::new(subscriptions::page(api, tenant, page_size)),
        EntityKind::Plans => Box::new(plans::page(api, tenant, page_size)),
        EntityKind::CreditNotes => Box::new(credit_notes::page(api, tenant, page_size)),
    }
}

/// Pages for every tab, in tab order
pub fn all_pages(api: Arc<dyn BillingApi>, tenant: &str, page_size: usize) -> Vec<Box<dyn FeaturePage>> {
    EntityKind::all()
        .into_iter()
        .map(|kind| page_for(kind, Arc::clone(&api), tenant, page_size))
        .collect()
}
