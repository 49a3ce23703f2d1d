//! Model layer
//!
//! Billing entities, the dataset that backs the fixture API, and the
//! modal stack.

pub mod credit_note;
pub mod customer;
pub mod dataset;
pub mod invoice;
pub mod modal;
pub mod money;
pub mod plan;
pub mod record;
pub mod subscription;

pub use credit_note::CreditNote;
pub use customer::{Customer, NewCustomer};
pub use dataset::{Dataset, Tenant};
pub use invoice::{Invoice, InvoiceLine};
pub use modal::{Modal, ModalStack};
pub use money::format_money;
pub use plan::{Plan, PriceComponent};
pub use record::{EntityKind, Record};
pub use subscription::Subscription;
