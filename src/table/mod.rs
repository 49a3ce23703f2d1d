//! Generic paginated table view
//!
//! - `column` - declarative column descriptors
//! - `model` - derives header/row view state from columns and data
//! - `pagination` - page index/size state and its controller
//! - `row` - standard and expandable row rendering
//! - `widget` - draws a table view into the terminal

pub mod column;
pub mod model;
pub mod pagination;
pub mod row;
pub mod widget;

pub use column::{CellContent, ColumnDescriptor, Tone};
pub use model::{SortDirection, SortState, TableModel, TableView};
pub use pagination::{PaginationController, PaginationState, DEFAULT_PAGE_SIZE};
pub use row::{render_rows, ExpansionState, RenderedRow, RowMode};
pub use widget::{draw_table, TableFrame};
