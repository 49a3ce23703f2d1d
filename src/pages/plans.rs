//! Plans tab, expandable into price components

use super::table_page::{PageDefinition, TablePage};
use crate::model::{format_money, Plan, PriceComponent};
use crate::services::BillingApi;
use crate::table::{CellContent, ColumnDescriptor, RowMode, Tone};
use std::sync::Arc;

pub fn columns() -> Vec<ColumnDescriptor<Plan>> {
    vec![
        ColumnDescriptor::accessor("name", "Name", |p: &Plan| p.name.clone()).sortable(),
        ColumnDescriptor::accessor("plan_type", "Type", |p: &Plan| {
            p.plan_type.label().to_string()
        }),
        ColumnDescriptor::render("status", "Status", |p: &Plan| {
            CellContent::new(p.status.label(), p.status.tone())
        })
        .sortable(),
        ColumnDescriptor::accessor("components", "Components", |p: &Plan| {
            p.price_components.len().to_string()
        })
        .sortable()
        .align_right(),
        ColumnDescriptor::accessor("currency", "Currency", |p: &Plan| p.currency.clone()),
        ColumnDescriptor::render("description", "Description", |p: &Plan| {
            match &p.description {
                Some(text) => CellContent::plain(text.as_str()),
                None => CellContent::muted("—"),
            }
        })
        .max_width(40),
        ColumnDescriptor::accessor("created_at", "Created", |p: &Plan| p.created_at.to_string())
            .sortable(),
    ]
}

fn component_cell(component: &PriceComponent, currency: &str) -> CellContent {
    let price = match component.price_cents {
        Some(cents) => format_money(cents, currency),
        None => "usage based".to_string(),
    };
    let mut text = format!("{:<10} {}  {}", component.fee.label(), component.name, price);
    if let Some(cadence) = &component.cadence {
        text.push_str(&format!(" / {}", cadence));
    }
    CellContent::plain(text)
}

/// Sub-row lines for an expanded plan
pub fn price_components(plan: &Plan) -> Vec<CellContent> {
    if plan.price_components.is_empty() {
        return vec![CellContent::new("No price components", Tone::Muted)];
    }
    plan.price_components
        .iter()
        .map(|component| component_cell(component, &plan.currency))
        .collect()
}

pub fn page(api: Arc<dyn BillingApi>, tenant: &str, page_size: usize) -> TablePage<Plan> {
    let definition = PageDefinition {
        columns: columns(),
        mode: RowMode::expandable(price_components),
        fetch: |api, request| api.list_plans(request),
        empty_message: "No plans",
    };
    TablePage::new(definition, api, tenant, page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dataset;

    #[test]
    fn test_price_components_sub_row() {
        let dataset = Dataset::demo("acme");
        for plan in &dataset.plans {
            let lines = price_components(plan);
            assert_eq!(lines.len(), plan.price_components.len().max(1));
        }
    }

    #[test]
    fn test_component_cell_formats_price_and_cadence() {
        let component = PriceComponent {
            name: "Platform fee".to_string(),
            fee: crate::model::plan::FeeKind::Rate,
            price_cents: Some(4_900),
            cadence: Some("monthly".to_string()),
        };
        assert_eq!(
            component_cell(&component, "EUR").text,
            "Rate       Platform fee  €49.00 / monthly"
        );

        let usage = PriceComponent {
            price_cents: None,
            cadence: None,
            ..component
        };
        assert_eq!(component_cell(&usage, "EUR").text, "Rate       Platform fee  usage based");
    }
}
