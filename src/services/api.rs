//! Remote billing API boundary
//!
//! Feature pages only see `BillingApi`. Transport and wire format belong
//! to the implementation.

use crate::model::{CreditNote, Customer, EntityKind, Invoice, NewCustomer, Plan, Subscription};
use crate::table::{PaginationState, SortState};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{kind} record {id} not found")]
    NotFound { kind: EntityKind, id: String },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("billing API unavailable: {0}")]
    Unavailable(String),
    #[error("dataset error: {0}")]
    Dataset(String),
}

/// Query key for one page of a list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListRequest {
    pub offset: usize,
    pub limit: usize,
    pub search: Option<String>,
    pub order_by: Option<SortState>,
}

impl ListRequest {
    pub fn new(pagination: PaginationState, order_by: Option<SortState>, search: &str) -> Self {
        let search = search.trim();
        Self {
            offset: pagination.offset(),
            limit: pagination.limit(),
            search: (!search.is_empty()).then(|| search.to_string()),
            order_by,
        }
    }
}

/// One page of results plus the total across all pages
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
}

pub trait BillingApi: Send + Sync {
    fn list_customers(&self, request: &ListRequest) -> Result<Page<Customer>, ApiError>;

    fn list_invoices(&self, request: &ListRequest) -> Result<Page<Invoice>, ApiError>;

    fn list_subscriptions(&self, request: &ListRequest) -> Result<Page<Subscription>, ApiError>;

    fn list_plans(&self, request: &ListRequest) -> Result<Page<Plan>, ApiError>;

    fn list_credit_notes(&self, request: &ListRequest) -> Result<Page<CreditNote>, ApiError>;

    /// Full record as JSON, for the detail view
    fn get_record(&self, kind: EntityKind, id: &str) -> Result<serde_json::Value, ApiError>;

    /// Create customers, returning how many were added
    fn import_customers(&self, customers: Vec<NewCustomer>) -> Result<usize, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SortDirection;

    #[test]
    fn test_list_request_from_pagination() {
        let sort = SortState {
            column: "name".to_string(),
            direction: SortDirection::Asc,
        };
        let request = ListRequest::new(PaginationState::new(2, 20), Some(sort.clone()), "  acme ");
        assert_eq!(request.offset, 40);
        assert_eq!(request.limit, 20);
        assert_eq!(request.search.as_deref(), Some("acme"));
        assert_eq!(request.order_by, Some(sort));

        let request = ListRequest::new(PaginationState::default(), None, "   ");
        assert_eq!(request.search, None);
    }

    #[test]
    fn test_error_messages() {
        let err = ApiError::NotFound {
            kind: EntityKind::Invoices,
            id: "inv_9".to_string(),
        };
        assert_eq!(err.to_string(), "invoices record inv_9 not found");
    }
}
