//! Services behind the UI
//!
//! - `api`: the billing API trait and its request/response types
//! - `fixture`: the bundled dataset-backed API
//! - `query_runner`: background fetches polled on tick
//! - `import`: customer CSV parsing

pub mod api;
pub mod fixture;
pub mod import;
pub mod query_runner;

pub use api::{ApiError, BillingApi, ListRequest, Page};
pub use fixture::FixtureApi;
pub use import::read_customers_csv;
pub use query_runner::QueryRunner;
