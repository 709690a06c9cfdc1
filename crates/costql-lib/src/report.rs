//! Serializable form of an invoice, with element names resolved.

use costql_core::Price;
use serde::Serialize;

use crate::environment::Environment;
use crate::invoice::Invoice;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceReport {
    pub resources: Vec<ReportLine>,
    pub parts: Vec<ReportLine>,
    pub fields: Vec<ReportLine>,
    pub total: Price,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub name: String,
    pub cost: Price,
}

impl InvoiceReport {
    /// Lines are sorted by name.
    pub fn new(env: &Environment, invoice: &Invoice) -> Self {
        let lines = |entries: Vec<(&str, Price)>| {
            let mut lines: Vec<ReportLine> = entries
                .into_iter()
                .map(|(name, cost)| ReportLine {
                    name: name.to_owned(),
                    cost,
                })
                .collect();
            lines.sort_by(|a, b| a.name.cmp(&b.name));
            lines
        };

        Self {
            resources: lines(
                invoice
                    .resource_costs()
                    .iter()
                    .map(|(&id, &p)| (env.ty(id).name(), p))
                    .collect(),
            ),
            parts: lines(
                invoice
                    .part_costs()
                    .iter()
                    .map(|(&id, &p)| (env.ty(id).name(), p))
                    .collect(),
            ),
            fields: lines(
                invoice
                    .field_costs()
                    .iter()
                    .map(|(&id, &p)| (env.field(id).qualified_name(), p))
                    .collect(),
            ),
            total: invoice.total(),
        }
    }
}
