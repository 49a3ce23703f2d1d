//! Column descriptors - declarative description of one table column
//!
//! A feature page builds its column list once and hands it to the
//! table model on every draw.

use std::fmt;

/// Semantic tone of a cell, mapped to a colour by the active theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Default,
    Muted,
    Accent,
    Positive,
    Warning,
    Negative,
}

/// Rendered content of a single cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellContent {
    pub text: String,
    pub tone: Tone,
}

impl CellContent {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Default)
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Muted)
    }
}

impl From<String> for CellContent {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl From<&str> for CellContent {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl fmt::Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Column header: either a plain label or a render function
pub enum Header {
    Label(String),
    /// Icon-only and other custom headers. Skeleton rows leave these columns blank.
    Render(Box<dyn Fn() -> CellContent>),
}

impl Header {
    pub fn render(&self) -> CellContent {
        match self {
            Header::Label(label) => CellContent::new(label.clone(), Tone::Accent),
            Header::Render(render) => render(),
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, Header::Label(_))
    }
}

/// How a cell gets its content from a row item
pub enum CellSource<T> {
    Accessor(Box<dyn Fn(&T) -> String>),
    Render(Box<dyn Fn(&T) -> CellContent>),
}

/// Width policy for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Widest cell (header included), capped at `max`
    Auto { max: usize },
    Fixed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Presentation hint attached to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnClass {
    pub width: ColumnWidth,
    pub align: Align,
}

impl Default for ColumnClass {
    fn default() -> Self {
        Self {
            width: ColumnWidth::Auto { max: 32 },
            align: Align::Left,
        }
    }
}

/// Declarative description of one table column
pub struct ColumnDescriptor<T> {
    /// Stable key, doubles as the sort field sent to the API
    pub id: &'static str,
    pub header: Header,
    pub cell: CellSource<T>,
    pub sortable: bool,
    pub class: ColumnClass,
}

impl<T> ColumnDescriptor<T> {
    /// Column with a text header and a plain string accessor
    pub fn accessor<F>(id: &'static str, header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> String + 'static,
    {
        Self {
            id,
            header: Header::Label(header.into()),
            cell: CellSource::Accessor(Box::new(accessor)),
            sortable: false,
            class: ColumnClass::default(),
        }
    }

    /// Column with a text header and a render function producing styled content
    pub fn render<F>(id: &'static str, header: impl Into<String>, render: F) -> Self
    where
        F: Fn(&T) -> CellContent + 'static,
    {
        Self {
            id,
            header: Header::Label(header.into()),
            cell: CellSource::Render(Box::new(render)),
            sortable: false,
            class: ColumnClass::default(),
        }
    }

    /// Replace the header with a render function (icon-only columns)
    pub fn with_header_fn<F>(mut self, header: F) -> Self
    where
        F: Fn() -> CellContent + 'static,
    {
        self.header = Header::Render(Box::new(header));
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn fixed(mut self, width: usize) -> Self {
        self.class.width = ColumnWidth::Fixed(width);
        self
    }

    pub fn max_width(mut self, max: usize) -> Self {
        self.class.width = ColumnWidth::Auto { max };
        self
    }

    pub fn align_right(mut self) -> Self {
        self.class.align = Align::Right;
        self
    }

    /// Produce this column's cell for one row item
    pub fn cell_for(&self, item: &T) -> CellContent {
        match &self.cell {
            CellSource::Accessor(accessor) => CellContent::plain(accessor(item)),
            CellSource::Render(render) => render(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: String,
        amount: i64,
    }

    #[test]
    fn test_accessor_cell() {
        let column = ColumnDescriptor::accessor("name", "Name", |i: &Item| i.name.clone());
        let item = Item {
            name: "Acme".to_string(),
            amount: 0,
        };
        assert_eq!(column.cell_for(&item), CellContent::plain("Acme"));
        assert!(column.header.is_label());
        assert!(!column.sortable);
    }

    #[test]
    fn test_render_cell_keeps_tone() {
        let column = ColumnDescriptor::render("amount", "Amount", |i: &Item| {
            let tone = if i.amount < 0 { Tone::Negative } else { Tone::Positive };
            CellContent::new(i.amount.to_string(), tone)
        })
        .sortable()
        .align_right();

        let item = Item {
            name: String::new(),
            amount: -5,
        };
        let cell = column.cell_for(&item);
        assert_eq!(cell.text, "-5");
        assert_eq!(cell.tone, Tone::Negative);
        assert!(column.sortable);
        assert_eq!(column.class.align, Align::Right);
    }

    #[test]
    fn test_header_fn_is_not_label() {
        let column = ColumnDescriptor::accessor("status", "Status", |i: &Item| i.name.clone())
            .with_header_fn(|| CellContent::muted("⚑"));
        assert!(!column.header.is_label());
        assert_eq!(column.header.render().text, "⚑");
    }
}
