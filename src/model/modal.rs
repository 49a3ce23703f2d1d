//! Modal stack for overlays drawn above the active page

use super::record::EntityKind;

/// An overlay displayed on top of the tabs
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    QuitConfirm,
    /// Keyboard shortcut reference
    Help,
    /// Full record fetched by id
    RecordDetail { kind: EntityKind, id: String },
    /// CSV path prompt for customer import
    ImportCsv,
}

impl Modal {
    pub fn record_detail(kind: EntityKind, id: impl Into<String>) -> Self {
        Modal::RecordDetail {
            kind,
            id: id.into(),
        }
    }
}

/// Modals draw bottom to top; only the top one receives input.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.stack.iter()
    }

    /// Replace the top detail view instead of stacking another on top
    pub fn show_detail(&mut self, kind: EntityKind, id: &str) {
        if matches!(self.top(), Some(Modal::RecordDetail { .. })) {
            self.stack.pop();
        }
        self.stack.push(Modal::record_detail(kind, id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        stack.push(Modal::Help);

        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_show_detail_replaces_open_detail() {
        let mut stack = ModalStack::new();
        stack.show_detail(EntityKind::Invoices, "inv_00001");
        stack.show_detail(EntityKind::Customers, "cus_0001");

        assert_eq!(stack.iter().count(), 1);
        assert_eq!(
            stack.top(),
            Some(&Modal::record_detail(EntityKind::Customers, "cus_0001"))
        );

        stack.push(Modal::Help);
        stack.show_detail(EntityKind::Plans, "plan_free");
        assert_eq!(stack.iter().count(), 3);
    }
}
