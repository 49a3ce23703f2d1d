//! Local implementation of the billing API over a `Dataset`
//!
//! Applies an artificial delay to every call so loading states behave as
//! they would against the remote service.

use super::api::{ApiError, BillingApi, ListRequest, Page};
use crate::model::{
    CreditNote, Customer, Dataset, EntityKind, Invoice, NewCustomer, Plan, Record, Subscription,
};
use crate::table::SortDirection;
use chrono::Local;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

pub struct FixtureApi {
    dataset: RwLock<Dataset>,
    latency: Duration,
    imported: AtomicUsize,
}

impl FixtureApi {
    pub fn new(dataset: Dataset, latency: Duration) -> Self {
        Self {
            dataset: RwLock::new(dataset),
            latency,
            imported: AtomicUsize::new(0),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Dataset>, ApiError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        self.dataset
            .read()
            .map_err(|_| ApiError::Unavailable("dataset lock poisoned".to_string()))
    }

    fn list<T: Record>(
        &self,
        request: &ListRequest,
        select: impl FnOnce(&Dataset) -> &[T],
    ) -> Result<Page<T>, ApiError> {
        let dataset = self.read()?;
        let page = paginate(select(&dataset), request)?;
        debug!(
            kind = %T::KIND,
            offset = request.offset,
            limit = request.limit,
            returned = page.items.len(),
            total = page.total_count,
            "served list request"
        );
        Ok(page)
    }
}

/// Search, order and slice `items` for one list request
pub fn paginate<T: Record>(items: &[T], request: &ListRequest) -> Result<Page<T>, ApiError> {
    if request.limit == 0 {
        return Err(ApiError::InvalidRequest("limit must be positive".to_string()));
    }

    let needle = request.search.as_deref().map(str::to_lowercase);
    let mut matching: Vec<&T> = items
        .iter()
        .filter(|item| needle.as_deref().is_none_or(|n| item.matches(n)))
        .collect();

    if let Some(order) = &request.order_by {
        matching.sort_by(|a, b| {
            let ordering = a.sort_value(&order.column).cmp(&b.sort_value(&order.column));
            match order.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let total_count = matching.len();
    let items = matching
        .into_iter()
        .skip(request.offset)
        .take(request.limit)
        .cloned()
        .collect();

    Ok(Page { items, total_count })
}

fn find_json<T: Record>(items: &[T], id: &str) -> Result<serde_json::Value, ApiError> {
    let item = items
        .iter()
        .find(|item| item.id() == id)
        .ok_or_else(|| ApiError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })?;
    serde_json::to_value(item).map_err(|e| ApiError::Dataset(e.to_string()))
}

impl BillingApi for FixtureApi {
    fn list_customers(&self, request: &ListRequest) -> Result<Page<Customer>, ApiError> {
        self.list(request, |d| &d.customers)
    }

    fn list_invoices(&self, request: &ListRequest) -> Result<Page<Invoice>, ApiError> {
        self.list(request, |d| &d.invoices)
    }

    fn list_subscriptions(&self, request: &ListRequest) -> Result<Page<Subscription>, ApiError> {
        self.list(request, |d| &d.subscriptions)
    }

    fn list_plans(&self, request: &ListRequest) -> Result<Page<Plan>, ApiError> {
        self.list(request, |d| &d.plans)
    }

    fn list_credit_notes(&self, request: &ListRequest) -> Result<Page<CreditNote>, ApiError> {
        self.list(request, |d| &d.credit_notes)
    }

    fn get_record(&self, kind: EntityKind, id: &str) -> Result<serde_json::Value, ApiError> {
        let dataset = self.read()?;
        match kind {
            EntityKind::Customers => find_json(&dataset.customers, id),
            EntityKind::Invoices => find_json(&dataset.invoices, id),
            EntityKind::Subscriptions => find_json(&dataset.subscriptions, id),
            EntityKind::Plans => find_json(&dataset.plans, id),
            EntityKind::CreditNotes => find_json(&dataset.credit_notes, id),
        }
    }

    fn import_customers(&self, customers: Vec<NewCustomer>) -> Result<usize, ApiError> {
        let mut dataset = self
            .dataset
            .write()
            .map_err(|_| ApiError::Unavailable("dataset lock poisoned".to_string()))?;

        let today = Local::now().date_naive();
        let count = customers.len();
        // Newest first, in file order
        let created: Vec<Customer> = customers
            .into_iter()
            .map(|new| {
                let n = self.imported.fetch_add(1, Ordering::Relaxed) + 1;
                Customer {
                    id: format!("cus_imp_{}", n),
                    name: new.name,
                    alias: new.alias,
                    email: Some(new.email),
                    currency: new.currency,
                    balance_cents: new.balance_cents,
                    created_at: today,
                }
            })
            .collect();
        dataset.customers.splice(0..0, created);

        info!(count, total = dataset.customers.len(), "imported customers");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{PaginationState, SortState};

    fn api() -> FixtureApi {
        FixtureApi::new(Dataset::demo("acme"), Duration::ZERO)
    }

    fn request(page_index: usize, page_size: usize) -> ListRequest {
        ListRequest::new(PaginationState::new(page_index, page_size), None, "")
    }

    #[test]
    fn test_pages_cover_all_items_once() {
        let api = api();
        let first = api.list_customers(&request(0, 20)).unwrap();
        let total = first.total_count;
        let pages = PaginationState::new(0, 20).page_count(total);

        let mut seen = Vec::new();
        for page_index in 0..pages {
            let page = api.list_customers(&request(page_index, 20)).unwrap();
            assert_eq!(page.total_count, total);
            seen.extend(page.items.into_iter().map(|c| c.id));
        }
        assert_eq!(seen.len(), total);
    }

    #[test]
    fn test_page_past_end_is_empty_but_reports_total() {
        let page = api().list_plans(&request(5, 20)).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 6);
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let request = ListRequest {
            limit: 0,
            ..ListRequest::default()
        };
        assert!(matches!(
            api().list_invoices(&request),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let request = ListRequest::new(PaginationState::default(), None, "GLOBEX");
        let page = api().list_customers(&request).unwrap();
        assert!(page.total_count > 0);
        assert!(page.items.iter().all(|c| c.name.contains("Globex")));
    }

    #[test]
    fn test_order_by_total_descending() {
        let request = ListRequest::new(
            PaginationState::new(0, 50),
            Some(SortState {
                column: "total".to_string(),
                direction: SortDirection::Desc,
            }),
            "",
        );
        let page = api().list_invoices(&request).unwrap();
        let totals: Vec<i64> = page.items.iter().map(|i| i.total_cents).collect();
        let mut sorted = totals.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(totals, sorted);
    }

    #[test]
    fn test_get_record_and_not_found() {
        let api = api();
        let value = api.get_record(EntityKind::Plans, "plan_growth").unwrap();
        assert_eq!(value["name"], "Growth");

        let err = api.get_record(EntityKind::Plans, "plan_missing").unwrap_err();
        assert_eq!(
            err,
            ApiError::NotFound {
                kind: EntityKind::Plans,
                id: "plan_missing".to_string()
            }
        );
    }

    #[test]
    fn test_import_prepends_with_generated_ids() {
        let api = api();
        let before = api.list_customers(&request(0, 20)).unwrap().total_count;
        let added = api
            .import_customers(vec![
                NewCustomer {
                    name: "Zeta".to_string(),
                    alias: None,
                    email: "a@zeta.test".to_string(),
                    currency: "USD".to_string(),
                    balance_cents: 0,
                },
                NewCustomer {
                    name: "Eta".to_string(),
                    alias: Some("eta".to_string()),
                    email: "b@eta.test".to_string(),
                    currency: "EUR".to_string(),
                    balance_cents: 100,
                },
            ])
            .unwrap();
        assert_eq!(added, 2);

        let page = api.list_customers(&request(0, 20)).unwrap();
        assert_eq!(page.total_count, before + 2);
        assert_eq!(page.items[0].id, "cus_imp_1");
        assert_eq!(page.items[1].name, "Eta");
    }
}
