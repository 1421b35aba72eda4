//! "Importance des Variables" page

use super::RenderContext;
use crate::views::{
    Block, COLOR_NEGATIVE, COLOR_POSITIVE, Chart, HATCH_CROSS, HATCH_DIAGONAL, ImportanceBar,
    ImportanceChart, LabelAnchor,
};

/// Shown when the score has not been computed or no record is available
pub const COMPUTE_FIRST_WARNING: &str =
    "Veuillez d'abord calculer le score du client dans la page 'Scoring Client'.";

/// Render the importance page
pub fn render(ctx: &RenderContext<'_>) -> Vec<Block> {
    let Some(record) = ctx.session.record.as_ref().filter(|_| ctx.session.score_computed) else {
        return vec![Block::warning(COMPUTE_FIRST_WARNING)];
    };

    vec![
        Block::subheader("Importance globale"),
        Block::Chart(Chart::Importance(chart(
            "Impact sur le modèle",
            record.global_importance(),
        ))),
        Block::text("L'importance globale représente l'effet moyen de chaque variable sur le modèle."),
        Block::Spacer,
        Block::subheader("Importance Locale"),
        Block::Chart(Chart::Importance(chart(
            "Impact pour ce client",
            record.local_importance(),
        ))),
        Block::text("L'importance locale montre l'effet spécifique de chaque variable pour ce client."),
    ]
}

/// Color, hatch and label side of a bar, decided by sign alone
pub fn bar_style(value: f64) -> (&'static str, &'static str, LabelAnchor) {
    if value > 0.0 {
        (COLOR_POSITIVE, HATCH_CROSS, LabelAnchor::Start)
    } else {
        (COLOR_NEGATIVE, HATCH_DIAGONAL, LabelAnchor::End)
    }
}

fn chart<'a>(x_label: &str, pairs: impl Iterator<Item = (&'a str, f64)>) -> ImportanceChart {
    let bars = pairs
        .map(|(name, value)| {
            let (color, hatch, anchor) = bar_style(value);
            ImportanceBar {
                name: name.to_string(),
                value,
                color,
                hatch,
                label: format!("{value:.2}"),
                anchor,
            }
        })
        .collect();

    ImportanceChart {
        x_label: x_label.to_string(),
        bars,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::pages::fixtures;
    use crate::session::Session;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use scorecard_core::ReferenceDataset;

    fn render_for(session: &Session) -> Vec<Block> {
        let reference = ReferenceDataset::default();
        render(&RenderContext {
            session,
            reference: &reference,
            threshold: 0.46,
        })
    }

    fn charts(body: &[Block]) -> Vec<&ImportanceChart> {
        body.iter()
            .filter_map(|block| match block {
                Block::Chart(Chart::Importance(chart)) => Some(chart),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_warning_before_score_is_computed() {
        let session = Session {
            selected: Some("100002".to_string()),
            record: Some(fixtures::record()),
            ..Session::default()
        };

        assert_eq!(render_for(&session), vec![Block::warning(COMPUTE_FIRST_WARNING)]);
    }

    #[test]
    fn test_warning_without_record() {
        let session = Session {
            score_computed: true,
            ..Session::default()
        };

        assert_eq!(render_for(&session), vec![Block::warning(COMPUTE_FIRST_WARNING)]);
    }

    #[test]
    fn test_two_charts_in_input_order() {
        let session = Session {
            record: Some(fixtures::record()),
            score_computed: true,
            ..Session::default()
        };

        let body = render_for(&session);
        let charts = charts(&body);

        assert_eq!(body[0], Block::subheader("Importance globale"));
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].x_label, "Impact sur le modèle");
        assert_eq!(charts[1].x_label, "Impact pour ce client");

        let names: Vec<&str> = charts[0].bars.iter().map(|bar| bar.name.as_str()).collect();
        assert_eq!(names, vec!["EXT_SOURCE_3", "EXT_SOURCE_2", "DAYS_BIRTH"]);
        let labels: Vec<&str> = charts[1].bars.iter().map(|bar| bar.label.as_str()).collect();
        assert_eq!(labels, vec!["-0.05", "0.20"]);
        assert_eq!(
            body.last().unwrap(),
            &Block::text(
                "L'importance locale montre l'effet spécifique de chaque variable pour ce client."
            )
        );
    }

    #[rstest]
    #[case(0.31, "#1f77b4", "xxxx", LabelAnchor::Start)]
    #[case(-0.12, "#ff7f0e", "////", LabelAnchor::End)]
    #[case(0.0, "#ff7f0e", "////", LabelAnchor::End)]
    #[case(-0.0, "#ff7f0e", "////", LabelAnchor::End)]
    fn test_bar_style(
        #[case] value: f64,
        #[case] color: &str,
        #[case] hatch: &str,
        #[case] anchor: LabelAnchor,
    ) {
        assert_eq!(bar_style(value), (color, hatch, anchor));
    }

    proptest! {
        #[test]
        fn prop_style_depends_on_sign_only(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            if (a > 0.0) == (b > 0.0) {
                prop_assert_eq!(bar_style(a), bar_style(b));
            } else {
                prop_assert_ne!(bar_style(a), bar_style(b));
            }
        }
    }
}
