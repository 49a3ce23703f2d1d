//! Row rendering - maps row view-models to the rows actually drawn
//!
//! Standard mode draws one row per item with an optional navigation link.
//! Expandable mode adds a full-width sub-row under each expanded item.

use super::column::CellContent;
use super::model::{RowId, RowViewModel, SkeletonRow, TableBody, TableView};
use std::collections::HashMap;

pub enum RowMode<T> {
    Standard {
        /// Route followed when the row is activated
        row_link: Option<Box<dyn Fn(&T) -> String>>,
    },
    Expandable {
        /// Lines shown in the sub-row of an expanded item
        sub_row: Box<dyn Fn(&T) -> Vec<CellContent>>,
    },
}

impl<T> RowMode<T> {
    pub fn standard() -> Self {
        RowMode::Standard { row_link: None }
    }

    pub fn linked<F>(row_link: F) -> Self
    where
        F: Fn(&T) -> String + 'static,
    {
        RowMode::Standard {
            row_link: Some(Box::new(row_link)),
        }
    }

    pub fn expandable<F>(sub_row: F) -> Self
    where
        F: Fn(&T) -> Vec<CellContent> + 'static,
    {
        RowMode::Expandable {
            sub_row: Box::new(sub_row),
        }
    }

    pub fn is_expandable(&self) -> bool {
        matches!(self, RowMode::Expandable { .. })
    }
}

/// Expansion flags keyed by row id, owned by the table container
#[derive(Debug, Default, Clone)]
pub struct ExpansionState {
    expanded: HashMap<RowId, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    /// Flip one row, returning its new state
    pub fn toggle(&mut self, id: &str) -> bool {
        let flag = self.expanded.entry(id.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Collapse every row
    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedRow {
    Main {
        row: RowViewModel,
        link: Option<String>,
        expanded: bool,
    },
    Sub {
        parent: RowId,
        lines: Vec<CellContent>,
    },
    Skeleton(SkeletonRow),
    Empty {
        message: String,
        colspan: usize,
    },
}

impl RenderedRow {
    /// Rows the cursor may stop on
    pub fn is_selectable(&self) -> bool {
        matches!(self, RenderedRow::Main { .. })
    }
}

/// Expand a table view into drawable rows
///
/// `data` must be the slice the view was built from.
pub fn render_rows<T>(
    view: &TableView,
    data: Option<&[T]>,
    mode: &RowMode<T>,
    expansion: &ExpansionState,
) -> Vec<RenderedRow> {
    match &view.body {
        TableBody::Skeleton(rows) => rows.iter().cloned().map(RenderedRow::Skeleton).collect(),
        TableBody::Empty { message, colspan } => vec![RenderedRow::Empty {
            message: message.clone(),
            colspan: *colspan,
        }],
        TableBody::Rows(rows) => {
            let mut rendered = Vec::with_capacity(rows.len());
            for row in rows {
                let item = data.and_then(|items| items.get(row.index));
                match mode {
                    RowMode::Standard { row_link } => {
                        let link = match (row_link, item) {
                            (Some(row_link), Some(item)) => Some(row_link(item)),
                            _ => None,
                        };
                        rendered.push(RenderedRow::Main {
                            row: row.clone(),
                            link,
                            expanded: false,
                        });
                    }
                    RowMode::Expandable { sub_row } => {
                        let expanded = expansion.is_expanded(&row.id);
                        rendered.push(RenderedRow::Main {
                            row: row.clone(),
                            link: None,
                            expanded,
                        });
                        if let (true, Some(item)) = (expanded, item) {
                            rendered.push(RenderedRow::Sub {
                                parent: row.id.clone(),
                                lines: sub_row(item),
                            });
                        }
                    }
                }
            }
            rendered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::column::ColumnDescriptor;
    use crate::table::model::TableModel;

    struct Order {
        id: &'static str,
        lines: Vec<&'static str>,
    }

    fn orders() -> Vec<Order> {
        vec![
            Order { id: "o1", lines: vec!["Seat license", "Support"] },
            Order { id: "o2", lines: vec!["Usage"] },
        ]
    }

    fn columns() -> Vec<ColumnDescriptor<Order>> {
        vec![ColumnDescriptor::accessor("id", "Order", |o: &Order| o.id.to_string())]
    }

    fn expandable() -> RowMode<Order> {
        RowMode::expandable(|o: &Order| {
            o.lines.iter().map(|l| CellContent::plain(*l)).collect()
        })
    }

    #[test]
    fn test_standard_rows_with_links() {
        let data = orders();
        let columns = columns();
        let view = TableModel::new(&columns).build(Some(&data), false);
        let mode = RowMode::linked(|o: &Order| format!("/acme/orders/{}", o.id));

        let rows = render_rows(&view, Some(&data), &mode, &ExpansionState::new());
        assert_eq!(rows.len(), 2);
        match &rows[1] {
            RenderedRow::Main { link, expanded, .. } => {
                assert_eq!(link.as_deref(), Some("/acme/orders/o2"));
                assert!(!expanded);
            }
            other => panic!("unexpected row {:?}", other),
        }
    }

    #[test]
    fn test_standard_rows_without_link() {
        let data = orders();
        let columns = columns();
        let view = TableModel::new(&columns).build(Some(&data), false);
        let rows = render_rows(&view, Some(&data), &RowMode::standard(), &ExpansionState::new());
        assert!(rows
            .iter()
            .all(|r| matches!(r, RenderedRow::Main { link: None, .. })));
    }

    #[test]
    fn test_expanding_adds_sub_row_below_its_parent() {
        let data = orders();
        let columns = columns();
        let id_fn = |o: &Order| o.id.to_string();
        let view = TableModel::new(&columns)
            .with_row_id(&id_fn)
            .build(Some(&data), false);
        let mode = expandable();
        let mut expansion = ExpansionState::new();

        expansion.toggle("o1");
        let rows = render_rows(&view, Some(&data), &mode, &expansion);
        assert_eq!(rows.len(), 3);
        match &rows[1] {
            RenderedRow::Sub { parent, lines } => {
                assert_eq!(parent, "o1");
                assert_eq!(lines.len(), 2);
            }
            other => panic!("unexpected row {:?}", other),
        }
        assert!(!rows[1].is_selectable());
    }

    #[test]
    fn test_toggling_twice_restores_row_count() {
        let data = orders();
        let columns = columns();
        let id_fn = |o: &Order| o.id.to_string();
        let view = TableModel::new(&columns)
            .with_row_id(&id_fn)
            .build(Some(&data), false);
        let mode = expandable();
        let mut expansion = ExpansionState::new();

        let before = render_rows(&view, Some(&data), &mode, &expansion).len();
        assert!(expansion.toggle("o2"));
        let during = render_rows(&view, Some(&data), &mode, &expansion).len();
        assert!(!expansion.toggle("o2"));
        let after = render_rows(&view, Some(&data), &mode, &expansion).len();

        assert_eq!(during, before + 1);
        assert_eq!(after, before);
        assert!(!expansion.is_expanded("o2"));

        expansion.toggle("o1");
        expansion.clear();
        assert_eq!(render_rows(&view, Some(&data), &mode, &expansion).len(), before);
    }

    #[test]
    fn test_skeleton_and_empty_pass_through() {
        let columns = columns();
        let mode = expandable();
        let expansion = ExpansionState::new();

        let loading = TableModel::new(&columns).build(None, true);
        let rows = render_rows::<Order>(&loading, None, &mode, &expansion);
        assert_eq!(rows.len(), crate::table::model::SKELETON_ROWS);
        assert!(rows.iter().all(|r| !r.is_selectable()));

        let empty = TableModel::new(&columns).build(Some(&[][..]), false);
        let rows = render_rows::<Order>(&empty, Some(&[][..]), &mode, &expansion);
        assert_eq!(rows.len(), 1);
        assert!(matches!(rows[0], RenderedRow::Empty { colspan: 1, .. }));
    }
}
