//! Page body block components

use super::charts::ChartSvg;
use crate::views::Block;
use leptos::prelude::*;

/// Page body; charts get ids from their position
#[component]
pub fn PageBody(
    /// Blocks in display order
    blocks: Vec<Block>,
) -> impl IntoView {
    blocks
        .into_iter()
        .enumerate()
        .map(|(index, block)| view! { <BlockView block index /> })
        .collect::<Vec<_>>()
}

/// One body block
#[component]
pub fn BlockView(
    /// Block description
    block: Block,
    /// Position on the page
    index: usize,
) -> impl IntoView {
    match block {
        Block::Warning { text } => view! {
            <div class="warning" role="alert">{text}</div>
        }
        .into_any(),
        Block::Subheader { text } => view! { <h3>{text}</h3> }.into_any(),
        Block::Text { text } => view! { <p>{text}</p> }.into_any(),
        Block::Labeled { label, value } => view! {
            <p><strong>{format!("{label} :")}</strong>{format!(" {value}")}</p>
        }
        .into_any(),
        Block::Highlight {
            text,
            color,
            size_px,
        } => view! {
            <p
                class="highlight"
                style={format!("font-size:{size_px}px; color:{color}; font-weight:bold;")}
            >
                {text}
            </p>
        }
        .into_any(),
        Block::Action { label, path } => view! {
            <form method="post" action={path}>
                <button type="submit">{label}</button>
            </form>
        }
        .into_any(),
        Block::Picker {
            label,
            name,
            path,
            options,
            selected,
        } => picker(label, name, path, options, selected).into_any(),
        Block::Chart(chart) => view! {
            <figure class="chart">
                <ChartSvg chart chart_id={format!("chart-{index}")} />
            </figure>
        }
        .into_any(),
        Block::Spacer => view! { <div class="spacer"></div> }.into_any(),
    }
}

fn picker(
    label: String,
    name: String,
    path: String,
    options: Vec<String>,
    selected: Option<String>,
) -> impl IntoView {
    let select_id = format!("picker-{name}");
    let options = options
        .into_iter()
        .map(|option| {
            let is_selected = selected.as_deref() == Some(option.as_str());
            let value = option.clone();
            view! { <option value={value} selected={is_selected}>{option}</option> }
        })
        .collect::<Vec<_>>();

    view! {
        <form method="get" action={path} class="picker">
            <label for={select_id.clone()}>{label}</label>
            <select id={select_id} name={name} onchange="this.form.submit()">
                {options}
            </select>
            <noscript>
                <button type="submit">"OK"</button>
            </noscript>
        </form>
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;

    fn render(blocks: Vec<Block>) -> String {
        Owner::new().with(|| view! { <PageBody blocks /> }.to_html())
    }

    #[test]
    fn test_text_blocks_are_escaped() {
        let html = render(vec![
            Block::warning("Veuillez d'abord <calculer>"),
            Block::subheader("Importance globale"),
        ]);

        assert!(html.contains("class=\"warning\""));
        assert!(html.contains("&lt;calculer&gt;"));
        assert!(!html.contains("<calculer>"));
        assert!(html.contains("<h3>Importance globale</h3>"));
        assert!(html.find("warning").unwrap() < html.find("<h3>").unwrap());
    }

    #[test]
    fn test_labeled_block() {
        let html = render(vec![Block::Labeled {
            label: "Seuil de décision".to_string(),
            value: "0.46".to_string(),
        }]);

        assert!(html.contains("<strong>Seuil de décision :</strong> 0.46"));
    }

    #[test]
    fn test_highlight_carries_color_and_size() {
        let html = render(vec![Block::Highlight {
            text: "Décision : Crédit Accepte".to_string(),
            color: "#1f77b4",
            size_px: 24,
        }]);

        assert!(html.contains("font-size:24px; color:#1f77b4;"));
        assert!(html.contains("Décision : Crédit Accepte"));
    }

    #[test]
    fn test_picker_marks_selected_option() {
        let html = render(vec![Block::Picker {
            label: "Choisissez une variable importante".to_string(),
            name: "variable".to_string(),
            path: "/analysis".to_string(),
            options: vec!["CODE_GENDER".to_string(), "EXT_SOURCE_3".to_string()],
            selected: Some("EXT_SOURCE_3".to_string()),
        }]);

        assert!(html.contains("action=\"/analysis\""));
        assert!(html.contains("<option value=\"CODE_GENDER\">CODE_GENDER</option>"));
        assert!(html.contains("value=\"EXT_SOURCE_3\" selected"));
        assert!(!html.contains("value=\"CODE_GENDER\" selected"));
    }

    #[test]
    fn test_action_posts_to_path() {
        let html = render(vec![Block::Action {
            label: "Calculer le Score".to_string(),
            path: "/scoring/compute".to_string(),
        }]);

        assert!(html.contains("method=\"post\""));
        assert!(html.contains("action=\"/scoring/compute\""));
        assert!(html.contains("<button type=\"submit\">Calculer le Score</button>"));
    }

    #[test]
    fn test_charts_get_positional_ids() {
        use crate::views::{Chart, HATCH_DIAGONAL, ScoreChart};

        let html = render(vec![
            Block::Spacer,
            Block::Chart(Chart::Score(ScoreChart {
                width: 0.3,
                color: "#ff7f0e",
                hatch: HATCH_DIAGONAL,
                threshold: 0.46,
                threshold_label: "Seuil 0.46".to_string(),
                ticks: vec![0.0, 1.0],
            })),
        ]);

        assert!(html.contains("<figure class=\"chart\"><svg"));
        assert!(html.contains("id=\"chart-1-diag-ff7f0e\""));
    }
}
