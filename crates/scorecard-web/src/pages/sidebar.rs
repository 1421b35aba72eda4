//! Navigation, client selector and client summary

use crate::session::{Page, Session};
use crate::views::{ClientSummary, NavItem, Sidebar, SummaryLine};
use scorecard_core::ClientRecord;

/// Text shown for a missing attribute
pub const MISSING_VALUE: &str = "Non renseigné";

/// Render the sidebar for `page`
pub fn render(session: &Session, page: Page) -> Sidebar {
    let nav = Page::ALL
        .into_iter()
        .map(|item| NavItem {
            page: item,
            label: item.label(),
            path: item.path(),
            active: item == page,
        })
        .collect();

    Sidebar {
        nav,
        selected: session.selected.clone(),
        client_info: session.record.as_ref().map(summary),
    }
}

fn summary(record: &ClientRecord) -> ClientSummary {
    ClientSummary {
        heading: "Informations Client",
        lines: vec![
            line("Âge", record.age, |v| format!("{v:.1} ans")),
            line("Revenu", record.income, |v| format!("{v:.0} €")),
            line("Montant du crédit", record.credit_amount, |v| format!("{v:.0} €")),
            line("Ancienneté emploi", record.employment_length, |v| {
                format!("{v:.1} ans")
            }),
        ],
    }
}

fn line(label: &'static str, value: Option<f64>, format: impl Fn(f64) -> String) -> SummaryLine {
    SummaryLine {
        label,
        value: value.map_or_else(|| MISSING_VALUE.to_string(), format),
    }
}
