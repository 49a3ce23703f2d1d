//! Table model - derives header and row view state from columns and data
//!
//! This is a pure transformation. It is recomputed on every draw and holds
//! no state of its own.

use super::column::{CellContent, ColumnClass, ColumnDescriptor};
use std::borrow::Cow;

/// Number of placeholder rows shown while the first page loads
pub const SKELETON_ROWS: usize = 10;

/// Message shown when a loaded page has no items
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data to display";

pub type RowId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Current sort column and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub content: CellContent,
    pub sortable: bool,
    pub sorted: Option<SortDirection>,
    pub class: ColumnClass,
}

/// One data row, one cell per column in column order
#[derive(Debug, Clone, PartialEq)]
pub struct RowViewModel {
    pub id: RowId,
    /// Position of the source item in the data slice
    pub index: usize,
    pub cells: Vec<CellContent>,
}

/// Placeholder marker for one loading cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkeletonCell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonRow {
    /// `None` under columns whose header is a render function
    pub cells: Vec<Option<SkeletonCell>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Skeleton(Vec<SkeletonRow>),
    Empty { message: String, colspan: usize },
    Rows(Vec<RowViewModel>),
}

/// Everything needed to draw one table
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub body: TableBody,
}

/// Builder that turns columns and an optional data slice into a `TableView`
pub struct TableModel<'a, T> {
    columns: &'a [ColumnDescriptor<T>],
    row_id: Option<&'a dyn Fn(&T) -> RowId>,
    empty_message: Cow<'a, str>,
    sort: Option<&'a SortState>,
}

impl<'a, T> TableModel<'a, T> {
    pub fn new(columns: &'a [ColumnDescriptor<T>]) -> Self {
        Self {
            columns,
            row_id: None,
            empty_message: Cow::Borrowed(DEFAULT_EMPTY_MESSAGE),
            sort: None,
        }
    }

    /// Use a stable id per item instead of its position
    pub fn with_row_id(mut self, row_id: &'a dyn Fn(&T) -> RowId) -> Self {
        self.row_id = Some(row_id);
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn with_sort(mut self, sort: Option<&'a SortState>) -> Self {
        self.sort = sort;
        self
    }

    pub fn headers(&self) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .map(|column| HeaderCell {
                content: column.header.render(),
                sortable: column.sortable,
                sorted: self
                    .sort
                    .filter(|sort| sort.column == column.id)
                    .map(|sort| sort.direction),
                class: column.class,
            })
            .collect()
    }

    /// Build the view for the current data.
    ///
    /// Defined data always produces rows, even while a refetch is running.
    /// Undefined data produces skeleton rows while loading and the empty
    /// state otherwise.
    pub fn build(&self, data: Option<&[T]>, is_loading: bool) -> TableView {
        let body = match data {
            None if is_loading => TableBody::Skeleton(self.skeleton_rows()),
            Some(items) if !items.is_empty() => TableBody::Rows(self.rows(items)),
            _ => TableBody::Empty {
                message: self.empty_message.to_string(),
                colspan: self.columns.len(),
            },
        };

        TableView {
            headers: self.headers(),
            body,
        }
    }

    fn rows(&self, items: &[T]) -> Vec<RowViewModel> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| RowViewModel {
                id: match self.row_id {
                    Some(row_id) => row_id(item),
                    None => index.to_string(),
                },
                index,
                cells: self.columns.iter().map(|c| c.cell_for(item)).collect(),
            })
            .collect()
    }

    fn skeleton_rows(&self) -> Vec<SkeletonRow> {
        let template: Vec<Option<SkeletonCell>> = self
            .columns
            .iter()
            .map(|column| column.header.is_label().then_some(SkeletonCell))
            .collect();

        (0..SKELETON_ROWS)
            .map(|_| SkeletonRow {
                cells: template.clone(),
            })
            .collect()
    }
}
