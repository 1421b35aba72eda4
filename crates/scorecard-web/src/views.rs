//! Serializable descriptions of rendered pages
//!
//! Page renderers produce these values; the HTML components and the JSON
//! view endpoint consume them.

use crate::session::Page;
use serde::Serialize;

/// Accepted decisions and positive importances
pub const COLOR_POSITIVE: &str = "#1f77b4";
/// Rejected decisions and non-positive importances
pub const COLOR_NEGATIVE: &str = "#ff7f0e";
/// Reference rows with `TARGET = 0`
pub const COLOR_NON_DEFAULTING: &str = "#1f78b4";
/// Reference rows with `TARGET = 1`
pub const COLOR_DEFAULTING: &str = "#ff7f0e";

/// Diagonal hatch for the score bar and non-positive importances
pub const HATCH_DIAGONAL: &str = "////";
/// Crossed hatch for positive importances
pub const HATCH_CROSS: &str = "xxxx";

/// Legend labels of the two outcome classes
pub const OUTCOME_LABELS: [&str; 2] = ["Non-défaillant (0)", "Défaillant (1)"];
/// Label of the client's marker line
pub const CLIENT_MARKER_LABEL: &str = "Valeur client";

/// One rendered page: sidebar plus body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    /// Page that was rendered
    pub page: Page,
    /// Sidebar, identical on every page
    pub sidebar: Sidebar,
    /// Page content, top to bottom
    pub body: Vec<Block>,
    /// Whether this render displayed the score
    pub score_computed: bool,
}

/// Sidebar content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sidebar {
    /// Navigation entries
    pub nav: Vec<NavItem>,
    /// Selected client, `None` for the sentinel
    pub selected: Option<String>,
    /// Summary of the current record
    pub client_info: Option<ClientSummary>,
}

/// Navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Target page
    pub page: Page,
    /// Visible label
    pub label: &'static str,
    /// Link target
    pub path: String,
    /// Whether this is the page being shown
    pub active: bool,
}

/// "Informations Client" block of the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientSummary {
    /// Block heading
    pub heading: &'static str,
    /// One line per attribute
    pub lines: Vec<SummaryLine>,
}

/// One attribute line of the client summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    /// Attribute name
    pub label: &'static str,
    /// Formatted value or the missing-value text
    pub value: String,
}

/// A piece of page content
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Precondition or data warning; nothing else follows on the page
    Warning {
        /// Message
        text: String,
    },
    /// Section heading
    Subheader {
        /// Heading text
        text: String,
    },
    /// Plain paragraph
    Text {
        /// Paragraph text
        text: String,
    },
    /// Paragraph with a bold label
    Labeled {
        /// Bold part
        label: String,
        /// Value after the label
        value: String,
    },
    /// Large colored statement
    Highlight {
        /// Statement text
        text: String,
        /// CSS color
        color: &'static str,
        /// Font size in pixels
        size_px: u8,
    },
    /// Button posting to `path`
    Action {
        /// Button label
        label: String,
        /// Form target
        path: String,
    },
    /// Dropdown submitting `name` to `path`
    Picker {
        /// Prompt
        label: String,
        /// Query parameter
        name: String,
        /// Form target
        path: String,
        /// Choices in display order
        options: Vec<String>,
        /// Current choice
        selected: Option<String>,
    },
    /// Chart
    Chart(Chart),
    /// Vertical space
    Spacer,
}

impl Block {
    /// Create a warning block
    pub fn warning(text: impl Into<String>) -> Self {
        Self::Warning { text: text.into() }
    }

    /// Create a text block
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a subheader block
    pub fn subheader(text: impl Into<String>) -> Self {
        Self::Subheader { text: text.into() }
    }

    /// Whether this is a warning
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::Warning { .. })
    }
}

/// Chart descriptions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Chart {
    /// Single score bar against the decision threshold
    Score(ScoreChart),
    /// Signed horizontal importance bars
    Importance(ImportanceChart),
    /// Mean outcome per category
    Category(CategoryChart),
    /// Outcome-conditional density curves
    Density(DensityChart),
}

/// Score bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreChart {
    /// Bar length, the score clamped to [0, 1]
    pub width: f64,
    /// Bar color
    pub color: &'static str,
    /// Bar hatch
    pub hatch: &'static str,
    /// Position of the dashed threshold line
    pub threshold: f64,
    /// Legend entry of the threshold line
    pub threshold_label: String,
    /// X axis ticks
    pub ticks: Vec<f64>,
}

/// Horizontal importance bars in input order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportanceChart {
    /// X axis label
    pub x_label: String,
    /// Bars top to bottom
    pub bars: Vec<ImportanceBar>,
}

/// Side of the bar end a value label is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAnchor {
    /// Label starts just past the bar end
    Start,
    /// Label ends just before the bar end
    End,
}

/// One importance bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportanceBar {
    /// Feature name
    pub name: String,
    /// Signed importance
    pub value: f64,
    /// Fill color
    pub color: &'static str,
    /// Hatch
    pub hatch: &'static str,
    /// Value label, two decimals
    pub label: String,
    /// Label alignment relative to the bar end
    pub anchor: LabelAnchor,
}

/// Legend shared by the analysis charts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    /// Legend title, the variable name
    pub title: String,
    /// Entries
    pub labels: Vec<String>,
}

/// Dashed vertical line at the client's value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Position on the x axis
    pub x: f64,
    /// Legend entry
    pub label: &'static str,
}

/// Mean outcome per category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryChart {
    /// Bars ascending by category value
    pub bars: Vec<CategoryBar>,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// Legend
    pub legend: Legend,
    /// Client marker, absent when the client's value is null
    pub marker: Option<Marker>,
}

/// One category bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBar {
    /// Category value, also the bar center
    pub category: f64,
    /// Mean outcome of the category
    pub mean: f64,
    /// Fill color
    pub color: &'static str,
    /// Mean label, two decimals
    pub label: String,
}

/// Density curves per outcome class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityChart {
    /// Curves that could be estimated
    pub series: Vec<DensitySeries>,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// Legend
    pub legend: Legend,
    /// Client marker, absent when the client's value is null
    pub marker: Option<Marker>,
}

/// One filled density curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensitySeries {
    /// Legend entry
    pub label: String,
    /// Line and fill color
    pub color: &'static str,
    /// Dashed outline
    pub dashed: bool,
    /// Fill opacity
    pub fill_opacity: f64,
    /// Outline width
    pub line_width: f64,
    /// Evaluation points
    pub xs: Vec<f64>,
    /// Densities
    pub ys: Vec<f64>,
}
