//! Invoices tab, expandable into invoice lines

use super::table_page::{PageDefinition, TablePage};
use crate::model::{format_money, Invoice, InvoiceLine};
use crate::services::BillingApi;
use crate::table::{CellContent, ColumnDescriptor, RowMode, Tone};
use std::sync::Arc;

pub fn columns() -> Vec<ColumnDescriptor<Invoice>> {
    vec![
        // Icon-only column, so no text label and no skeleton placeholder
        ColumnDescriptor::render("status_icon", "", |i: &Invoice| {
            CellContent::new(i.status.icon(), i.status.tone())
        })
        .with_header_fn(|| CellContent::muted("◎"))
        .fixed(1),
        ColumnDescriptor::accessor("invoice_number", "Number", |i: &Invoice| {
            i.invoice_number.clone()
        })
        .sortable(),
        ColumnDescriptor::accessor("customer", "Customer", |i: &Invoice| i.customer_name.clone())
            .sortable()
            .max_width(28),
        ColumnDescriptor::render("status", "Status", |i: &Invoice| {
            CellContent::new(i.status.label(), i.status.tone())
        })
        .sortable(),
        ColumnDescriptor::accessor("total", "Total", |i: &Invoice| {
            format_money(i.total_cents, &i.currency)
        })
        .sortable()
        .align_right(),
        ColumnDescriptor::accessor("invoice_date", "Issued", |i: &Invoice| {
            i.invoice_date.to_string()
        })
        .sortable(),
        ColumnDescriptor::render("due_date", "Due", |i: &Invoice| match i.due_date {
            Some(date) => CellContent::plain(date.to_string()),
            None => CellContent::muted("—"),
        })
        .sortable(),
    ]
}

fn line_cell(line: &InvoiceLine, currency: &str) -> CellContent {
    let mut text = format!(
        "{}  {} × {} = {}",
        line.name,
        line.quantity,
        format_money(line.unit_price_cents, currency),
        format_money(line.total_cents, currency)
    );
    if let (Some(start), Some(end)) = (line.period_start, line.period_end) {
        text.push_str(&format!("  ({} to {})", start, end));
    }
    CellContent::plain(text)
}

/// Sub-row lines for an expanded invoice
pub fn invoice_lines(invoice: &Invoice) -> Vec<CellContent> {
    if invoice.lines.is_empty() {
        return vec![CellContent::muted("No invoice lines")];
    }
    let mut lines: Vec<CellContent> = invoice
        .lines
        .iter()
        .map(|line| line_cell(line, &invoice.currency))
        .collect();
    if invoice.tax_cents != 0 {
        lines.push(CellContent::new(
            format!("Tax  {}", format_money(invoice.tax_cents, &invoice.currency)),
            Tone::Muted,
        ));
    }
    lines
}

pub fn page(api: Arc<dyn BillingApi>, tenant: &str, page_size: usize) -> TablePage<Invoice> {
    let definition = PageDefinition {
        columns: columns(),
        mode: RowMode::expandable(invoice_lines),
        fetch: |api, request| api.list_invoices(request),
        empty_message: "No invoices",
    };
    TablePage::new(definition, api, tenant, page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::invoice::InvoiceStatus;
    use crate::table::column::Header;
    use chrono::NaiveDate;

    fn invoice(lines: Vec<InvoiceLine>, tax_cents: i64) -> Invoice {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Invoice {
            id: "inv_1".to_string(),
            invoice_number: "INV-00001".to_string(),
            customer_id: "cus_1".to_string(),
            customer_name: "Acme Labs".to_string(),
            status: InvoiceStatus::Paid,
            currency: "USD".to_string(),
            tax_cents,
            total_cents: 12_000,
            invoice_date: date,
            due_date: None,
            lines,
        }
    }

    #[test]
    fn test_status_column_has_render_header() {
        let columns = columns();
        assert!(matches!(columns[0].header, Header::Render(_)));
        assert_eq!(columns[0].header.render().text, "◎");
        assert!(columns[1].header.is_label());
    }

    #[test]
    fn test_invoice_lines_sub_row() {
        let line = InvoiceLine {
            name: "Seats".to_string(),
            quantity: 4,
            unit_price_cents: 2_500,
            total_cents: 10_000,
            period_start: None,
            period_end: None,
        };
        let lines = invoice_lines(&invoice(vec![line], 2_000));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Seats  4 × $25.00 = $100.00");
        assert_eq!(lines[1].text, "Tax  $20.00");

        let empty = invoice_lines(&invoice(Vec::new(), 0));
        assert_eq!(empty[0].text, "No invoice lines");
    }
}
