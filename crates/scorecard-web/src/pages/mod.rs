//! Page renderers
//!
//! Rendering is a pure function of the session, the reference data and the
//! page input. The only state change a render can ask for is recorded in
//! [`Rendered::score_computed`], which the controller applies.

pub mod analysis;
pub mod importance;
pub mod scoring;
pub mod sidebar;

use crate::session::{Page, Session};
use crate::views::Rendered;
use scorecard_core::ReferenceDataset;

/// Main title of every page
pub const APP_TITLE: &str = "Scoring Crédit Bancaire";

/// Everything a page renderer reads
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Current session
    pub session: &'a Session,
    /// Historical rows for the analysis page
    pub reference: &'a ReferenceDataset,
    /// Decision threshold shown on the scoring page
    pub threshold: f64,
}

/// Per-request input of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageInput {
    /// Scoring page; `compute` is the "Calculer le Score" trigger
    Scoring {
        /// Whether the compute button was pressed
        compute: bool,
    },
    /// Importance page
    Importance,
    /// Analysis page with the picked variable
    Analysis {
        /// Picked variable, the first important variable when absent
        variable: Option<String>,
    },
}

impl PageInput {
    /// Page this input belongs to
    pub const fn page(&self) -> Page {
        match self {
            Self::Scoring { .. } => Page::Scoring,
            Self::Importance => Page::Importance,
            Self::Analysis { .. } => Page::Analysis,
        }
    }

    /// Input for showing `page` without any trigger
    pub const fn view(page: Page) -> Self {
        match page {
            Page::Scoring => Self::Scoring { compute: false },
            Page::Importance => Self::Importance,
            Page::Analysis => Self::Analysis { variable: None },
        }
    }
}

/// Render the sidebar and the page selected by `input`
pub fn render(ctx: &RenderContext<'_>, input: &PageInput) -> Rendered {
    let page = input.page();
    let sidebar = sidebar::render(ctx.session, page);

    let (body, score_computed) = match input {
        PageInput::Scoring { compute } => scoring::render(ctx, *compute),
        PageInput::Importance => (importance::render(ctx), false),
        PageInput::Analysis { variable } => (analysis::render(ctx, variable.as_deref()), false),
    };

    Rendered {
        page,
        sidebar,
        body,
        score_computed,
    }
}
