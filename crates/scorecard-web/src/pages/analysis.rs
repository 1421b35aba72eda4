//! "Analyse d'une Variable" page

use super::RenderContext;
use super::importance::COMPUTE_FIRST_WARNING;
use crate::views::{
    Block, COLOR_DEFAULTING, COLOR_NON_DEFAULTING, CLIENT_MARKER_LABEL, CategoryBar,
    CategoryChart, Chart, DensityChart, DensitySeries, Legend, Marker, OUTCOME_LABELS,
};
use scorecard_core::{ReferenceDataset, gaussian_kde};

/// Prompt of the variable picker
pub const PICKER_LABEL: &str = "Choisissez une variable importante";

/// Form target of the variable picker
pub const PICKER_PATH: &str = "/analysis";

/// Variables with at most this many distinct values are drawn as categories
pub const MAX_CATEGORIES: usize = 2;

/// Render the analysis page for `variable`, or the first important variable
pub fn render(ctx: &RenderContext<'_>, variable: Option<&str>) -> Vec<Block> {
    let Some(record) = ctx.session.record.as_ref() else {
        return vec![Block::warning(COMPUTE_FIRST_WARNING)];
    };

    let options: Vec<String> = record.important_variables().map(str::to_string).collect();
    let chosen = variable
        .map(str::to_string)
        .or_else(|| options.first().cloned());

    let mut body = vec![Block::Picker {
        label: PICKER_LABEL.to_string(),
        name: "variable".to_string(),
        path: PICKER_PATH.to_string(),
        options,
        selected: chosen.clone(),
    }];
    let Some(variable) = chosen else {
        return body;
    };

    if !record.client_important_values.contains_key(&variable) {
        body.push(Block::warning(format!(
            "La variable {variable} ne fait pas partie des variables importantes de ce client."
        )));
        return body;
    }
    let Some(distinct) = ctx.reference.distinct_values(&variable) else {
        body.push(Block::warning(format!(
            "La variable {variable} est absente des données de référence."
        )));
        return body;
    };

    let marker = record.client_value(&variable).map(|x| Marker {
        x,
        label: CLIENT_MARKER_LABEL,
    });
    let legend = Legend {
        title: variable.clone(),
        labels: OUTCOME_LABELS.iter().map(ToString::to_string).collect(),
    };

    if distinct.len() <= MAX_CATEGORIES {
        body.push(Block::subheader(format!(
            "Moyenne de TARGET selon la catégorie {variable}"
        )));
        body.push(Block::Chart(Chart::Category(category_chart(
            ctx.reference,
            &variable,
            legend,
            marker,
        ))));
    } else {
        body.push(Block::subheader(format!("Distribution de {variable}")));
        body.push(Block::Chart(Chart::Density(density_chart(
            ctx.reference,
            &variable,
            legend,
            marker,
        ))));
    }
    body
}

/// Bar colors for the categories of a variable, ascending by value
///
/// Two categories get the non-defaulting then the defaulting color. A lone
/// category is non-defaulting only when its value is 0.
pub fn category_colors(categories: &[f64]) -> Vec<&'static str> {
    match categories {
        [only] if *only == 0.0 => vec![COLOR_NON_DEFAULTING],
        [_] => vec![COLOR_DEFAULTING],
        _ => categories
            .iter()
            .enumerate()
            .map(|(i, _)| {
                if i == 0 {
                    COLOR_NON_DEFAULTING
                } else {
                    COLOR_DEFAULTING
                }
            })
            .collect(),
    }
}

fn category_chart(
    reference: &ReferenceDataset,
    variable: &str,
    legend: Legend,
    marker: Option<Marker>,
) -> CategoryChart {
    let means = reference.target_mean_by_value(variable).unwrap_or_default();
    let categories: Vec<f64> = means.iter().map(|(category, _)| *category).collect();
    let bars = means
        .iter()
        .zip(category_colors(&categories))
        .map(|((category, mean), color)| CategoryBar {
            category: *category,
            mean: *mean,
            color,
            label: format!("{mean:.2}"),
        })
        .collect();

    CategoryChart {
        bars,
        x_label: variable.to_string(),
        y_label: "Moyenne TARGET".to_string(),
        legend,
        marker,
    }
}

fn density_chart(
    reference: &ReferenceDataset,
    variable: &str,
    legend: Legend,
    marker: Option<Marker>,
) -> DensityChart {
    let classes = [
        (0, OUTCOME_LABELS[0], COLOR_NON_DEFAULTING, true),
        (1, OUTCOME_LABELS[1], COLOR_DEFAULTING, false),
    ];

    let series = classes
        .into_iter()
        .filter_map(|(outcome, label, color, dashed)| {
            let samples = reference.values_for_outcome(variable, outcome)?;
            let curve = gaussian_kde(&samples)?;
            Some(DensitySeries {
                label: label.to_string(),
                color,
                dashed,
                fill_opacity: 0.4,
                line_width: 3.0,
                xs: curve.xs,
                ys: curve.ys,
            })
        })
        .collect();

    DensityChart {
        series,
        x_label: variable.to_string(),
        y_label: "Densité".to_string(),
        legend,
        marker,
    }
}
