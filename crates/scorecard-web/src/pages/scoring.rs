//! "Scoring Client" page

use super::RenderContext;
use crate::views::{Block, COLOR_NEGATIVE, COLOR_POSITIVE, Chart, HATCH_DIAGONAL, ScoreChart};
use scorecard_core::ClientRecord;

/// Shown when no client is selected or no record is available
pub const SELECT_CLIENT_WARNING: &str =
    "Veuillez sélectionner un ID client pour voir les informations et calculer le score.";

/// Label of the compute trigger
pub const COMPUTE_LABEL: &str = "Calculer le Score";

/// Form target of the compute trigger
pub const COMPUTE_PATH: &str = "/scoring/compute";

/// Render the scoring page; the flag is true when the score was displayed
pub fn render(ctx: &RenderContext<'_>, compute: bool) -> (Vec<Block>, bool) {
    let record = match (&ctx.session.selected, &ctx.session.record) {
        (Some(_), Some(record)) => record,
        _ => return (vec![Block::warning(SELECT_CLIENT_WARNING)], false),
    };

    let mut body = vec![Block::Action {
        label: COMPUTE_LABEL.to_string(),
        path: COMPUTE_PATH.to_string(),
    }];
    if !compute {
        return (body, false);
    }

    body.extend(score_blocks(record, ctx.threshold));
    (body, true)
}

/// Bar length of a score on the [0, 1] axis
pub fn bar_width(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

fn score_blocks(record: &ClientRecord, threshold: f64) -> Vec<Block> {
    let color = if record.decision.is_accepted() {
        COLOR_POSITIVE
    } else {
        COLOR_NEGATIVE
    };

    vec![
        Block::Labeled {
            label: "Seuil de décision".to_string(),
            value: threshold.to_string(),
        },
        Block::Highlight {
            text: format!("Score du client : {:.2}", record.score),
            color,
            size_px: 22,
        },
        Block::Highlight {
            text: format!("Décision : Crédit {}", record.decision.label()),
            color,
            size_px: 24,
        },
        Block::Chart(Chart::Score(ScoreChart {
            width: bar_width(record.score),
            color,
            hatch: HATCH_DIAGONAL,
            threshold,
            threshold_label: format!("Seuil {threshold}"),
            ticks: vec![0.0, threshold, 1.0],
        })),
        Block::text(format!(
            "Le score du client est représenté par une barre horizontale en couleur \
             (bleue pour les crédits acceptés et orange pour les crédits refusés). \
             Un seuil de décision ({threshold}) est marqué par une ligne noire. \
             Si le score dépasse ce seuil, le crédit est accepté."
        )),
    ]
}
