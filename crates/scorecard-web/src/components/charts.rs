//! SVG chart components
//!
//! Charts are drawn in data coordinates mapped linearly onto a fixed plot
//! box. Hatches are SVG patterns filled with the bar color.

use crate::views::{
    COLOR_DEFAULTING, COLOR_NON_DEFAULTING, CategoryChart, Chart, DensityChart, HATCH_CROSS,
    ImportanceChart, LabelAnchor, Legend, Marker, ScoreChart,
};
use leptos::prelude::*;

/// Linear map from a data interval onto a pixel interval
#[derive(Debug, Clone, Copy)]
struct Scale {
    lo: f64,
    hi: f64,
    px_lo: f64,
    px_hi: f64,
}

impl Scale {
    const fn new(lo: f64, hi: f64, px_lo: f64, px_hi: f64) -> Self {
        let (lo, hi) = if (hi - lo).abs() < f64::EPSILON {
            (lo - 0.5, hi + 0.5)
        } else {
            (lo, hi)
        };
        Self {
            lo,
            hi,
            px_lo,
            px_hi,
        }
    }

    const fn at(&self, value: f64) -> f64 {
        self.px_lo + (value - self.lo) / (self.hi - self.lo) * (self.px_hi - self.px_lo)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        let steps = count.max(2) - 1;
        (0..=steps)
            .map(|i| self.lo + (self.hi - self.lo) * i as f64 / steps as f64)
            .collect()
    }
}

/// Short numeric label: at most two decimals, no trailing zeros
fn number_label(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Pixel coordinate attribute
fn px(value: f64) -> String {
    format!("{value:.1}")
}

fn pattern_id(chart_id: &str, color: &str, hatch: &str) -> String {
    let kind = if hatch == HATCH_CROSS { "cross" } else { "diag" };
    format!("{chart_id}-{kind}-{}", color.trim_start_matches('#'))
}

fn pattern_fill(chart_id: &str, color: &str, hatch: &str) -> String {
    format!("url(#{})", pattern_id(chart_id, color, hatch))
}

/// Inline SVG for `chart`
#[component]
pub fn ChartSvg(
    /// Chart description
    chart: Chart,
    /// Prefix that keeps pattern ids unique on a page
    chart_id: String,
) -> impl IntoView {
    match chart {
        Chart::Score(chart) => view! { <ScoreSvg chart chart_id /> }.into_any(),
        Chart::Importance(chart) => view! { <ImportanceSvg chart chart_id /> }.into_any(),
        Chart::Category(chart) => view! { <CategorySvg chart /> }.into_any(),
        Chart::Density(chart) => view! { <DensitySvg chart /> }.into_any(),
    }
}

/// Root `<svg>` element of a chart
#[component]
fn Frame(width: f64, height: f64, #[prop(into)] label: String, children: Children) -> impl IntoView {
    view! {
        <svg
            viewBox={format!("0 0 {width} {height}")}
            width={width.to_string()}
            height={height.to_string()}
            role="img"
            aria-label={label}
            font-family="sans-serif"
        >
            {children()}
        </svg>
    }
}

/// Bar color overlaid with a diagonal or crossed hatch
#[component]
fn HatchPattern(chart_id: String, color: &'static str, hatch: &'static str) -> impl IntoView {
    let cross = hatch == HATCH_CROSS;
    view! {
        <pattern id={pattern_id(&chart_id, color, hatch)} patternUnits="userSpaceOnUse" width="8" height="8">
            <rect width="8" height="8" fill={color} />
            <path d="M0,8 L8,0 M-2,2 L2,-2 M6,10 L10,6" stroke="black" stroke-width="1" />
            {cross.then(|| view! {
                <path d="M0,0 L8,8 M-2,6 L2,10 M6,-2 L10,2" stroke="black" stroke-width="1" />
            })}
        </pattern>
    }
}

#[component]
fn XAxis(scale: Scale, y: f64, ticks: Vec<f64>) -> impl IntoView {
    view! {
        <line x1={px(scale.px_lo)} y1={px(y)} x2={px(scale.px_hi)} y2={px(y)} stroke="black" />
        {ticks
            .into_iter()
            .map(|tick| {
                let x = scale.at(tick);
                view! {
                    <line x1={px(x)} y1={px(y)} x2={px(x)} y2={px(y + 5.0)} stroke="black" />
                    <text x={px(x)} y={px(y + 18.0)} font-size="12" text-anchor="middle">
                        {number_label(tick)}
                    </text>
                }
            })
            .collect::<Vec<_>>()}
    }
}

#[component]
fn YAxis(scale: Scale, x: f64, ticks: Vec<f64>) -> impl IntoView {
    view! {
        <line x1={px(x)} y1={px(scale.px_lo)} x2={px(x)} y2={px(scale.px_hi)} stroke="black" />
        {ticks
            .into_iter()
            .map(|tick| {
                view! {
                    <text x={px(x - 6.0)} y={px(scale.at(tick) + 4.0)} font-size="12" text-anchor="end">
                        {number_label(tick)}
                    </text>
                }
            })
            .collect::<Vec<_>>()}
    }
}

fn axis_labels(width: f64, height: f64, x_label: String, y_label: Option<String>) -> impl IntoView {
    view! {
        <text x={px(width / 2.0)} y={px(height - 8.0)} font-size="14" text-anchor="middle">
            {x_label}
        </text>
        {y_label.map(|y_label| view! {
            <text
                transform={format!("translate(16,{:.1}) rotate(-90)", height / 2.0)}
                font-size="14"
                text-anchor="middle"
            >
                {y_label}
            </text>
        })}
    }
}

fn marker_line(marker: Option<f64>, scale: Scale, top: f64, bottom: f64) -> impl IntoView {
    marker.map(|value| {
        let x = scale.at(value);
        view! {
            <line
                class="marker"
                x1={px(x)}
                y1={px(top)}
                x2={px(x)}
                y2={px(bottom)}
                stroke="black"
                stroke-width="3"
                stroke-dasharray="8 5"
                data-value={value.to_string()}
            />
        }
    })
}

/// Legend box: outcome swatches plus the marker entry when present
fn legend_box(legend: Legend, marker: Option<Marker>, x: f64, y: f64) -> impl IntoView {
    let rows = legend.labels.len() + usize::from(marker.is_some());
    let entries = legend
        .labels
        .into_iter()
        .zip([COLOR_NON_DEFAULTING, COLOR_DEFAULTING])
        .enumerate()
        .map(|(row, (label, color))| {
            let row_y = y + 38.0 + 20.0 * row as f64;
            view! {
                <rect x={px(x + 8.0)} y={px(row_y - 9.0)} width="14" height="10" fill={color} fill-opacity="0.6" />
                <text x={px(x + 28.0)} y={px(row_y)} font-size="12">{label}</text>
            }
        })
        .collect::<Vec<_>>();
    let marker_row_y = y + 38.0 + 20.0 * (rows.saturating_sub(1)) as f64;
    let marker_entry = marker.map(|marker| {
        view! {
            <line
                x1={px(x + 8.0)}
                y1={px(marker_row_y - 4.0)}
                x2={px(x + 22.0)}
                y2={px(marker_row_y - 4.0)}
                stroke="black"
                stroke-width="2"
                stroke-dasharray="4 3"
            />
            <text x={px(x + 28.0)} y={px(marker_row_y)} font-size="12">{marker.label}</text>
        }
    });

    view! {
        <g class="legend">
            <rect
                x={px(x)}
                y={px(y)}
                width="190"
                height={px(28.0 + 20.0 * rows as f64)}
                fill="white"
                stroke="#cccccc"
            />
            <text x={px(x + 8.0)} y={px(y + 18.0)} font-size="13" font-weight="bold">{legend.title}</text>
            {entries}
            {marker_entry}
        </g>
    }
}

#[component]
fn ScoreSvg(chart: ScoreChart, chart_id: String) -> impl IntoView {
    let scale = Scale::new(0.0, 1.0, 40.0, 560.0);
    let bar_y = 70.0;
    let fill = pattern_fill(&chart_id, chart.color, chart.hatch);
    let threshold_x = scale.at(chart.threshold);
    let ScoreChart {
        width,
        color,
        hatch,
        threshold,
        threshold_label,
        ticks,
    } = chart;

    view! {
        <Frame width=600.0 height=150.0 label="Score du client">
            <defs>
                <HatchPattern chart_id color hatch />
            </defs>
            <rect
                class="score-bar"
                x={px(scale.at(0.0))}
                y={px(bar_y - 8.0)}
                width={px(scale.at(width) - scale.at(0.0))}
                height="16"
                fill={fill}
                stroke={color}
                data-width={width.to_string()}
            />
            <line
                class="threshold"
                x1={px(threshold_x)}
                y1="30"
                x2={px(threshold_x)}
                y2="110"
                stroke="black"
                stroke-dasharray="6 4"
                data-value={threshold.to_string()}
            />
            <line x1="450" y1="18" x2="475" y2="18" stroke="black" stroke-dasharray="6 4" />
            <text x="482" y="22" font-size="12">{threshold_label}</text>
            <XAxis scale y=110.0 ticks />
        </Frame>
    }
}

#[component]
fn ImportanceSvg(chart: ImportanceChart, chart_id: String) -> impl IntoView {
    let row = 30.0;
    let (left, right, top) = (240.0, 860.0, 20.0);
    let width = 900.0;
    let rows = chart.bars.len().max(1) as f64;
    let height = top + row * rows + 70.0;
    let axis_y = top + row * rows + 10.0;

    let lo = chart.bars.iter().map(|bar| bar.value).fold(0.0, f64::min);
    let hi = chart.bars.iter().map(|bar| bar.value).fold(0.0, f64::max);
    let pad = (hi - lo).max(f64::EPSILON) * 0.15;
    let scale = Scale::new(lo - pad, hi + pad, left, right);
    let zero = scale.at(0.0);

    let mut styles: Vec<(&'static str, &'static str)> = Vec::new();
    for bar in &chart.bars {
        if !styles.contains(&(bar.color, bar.hatch)) {
            styles.push((bar.color, bar.hatch));
        }
    }
    let patterns = styles
        .into_iter()
        .map(|(color, hatch)| view! { <HatchPattern chart_id=chart_id.clone() color hatch /> })
        .collect::<Vec<_>>();

    let bars = chart
        .bars
        .into_iter()
        .enumerate()
        .map(|(i, bar)| {
            let center = top + row * (i as f64 + 0.5);
            let end = scale.at(bar.value);
            let (label_x, text_anchor) = match bar.anchor {
                LabelAnchor::Start => (end + 4.0, "start"),
                LabelAnchor::End => (end - 4.0, "end"),
            };
            view! {
                <text
                    x={px(left - 8.0)}
                    y={px(center + 5.0)}
                    font-size="14"
                    font-weight="bold"
                    text-anchor="end"
                >
                    {bar.name}
                </text>
                <rect
                    class="importance-bar"
                    x={px(zero.min(end))}
                    y={px(center - row * 0.35)}
                    width={px((end - zero).abs())}
                    height={px(row * 0.7)}
                    fill={pattern_fill(&chart_id, bar.color, bar.hatch)}
                    stroke={bar.color}
                    data-value={bar.value.to_string()}
                />
                <text
                    x={px(label_x)}
                    y={px(center + 5.0)}
                    font-size="13"
                    font-weight="bold"
                    text-anchor={text_anchor}
                >
                    {bar.label}
                </text>
            }
        })
        .collect::<Vec<_>>();

    let title = chart.x_label.clone();
    let labels = axis_labels(width, height, chart.x_label, None);
    let ticks = scale.ticks(5);

    view! {
        <Frame width height label={title}>
            <defs>{patterns}</defs>
            {bars}
            <line
                class="zero"
                x1={px(zero)}
                y1={px(top)}
                x2={px(zero)}
                y2={px(axis_y)}
                stroke="black"
                stroke-width="2"
                stroke-dasharray="6 4"
            />
            <XAxis scale y=axis_y ticks />
            {labels}
        </Frame>
    }
}

#[component]
fn CategorySvg(chart: CategoryChart) -> impl IntoView {
    let (width, height) = (800.0, 480.0);
    let (left, right, top, bottom) = (70.0, 560.0, 30.0, 420.0);

    let categories: Vec<f64> = chart.bars.iter().map(|bar| bar.category).collect();
    let gap = categories
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold(f64::INFINITY, f64::min);
    let bar_width = if gap.is_finite() { gap * 0.8 } else { 0.8 };

    let mut lo = categories.iter().copied().fold(f64::INFINITY, f64::min) - bar_width * 0.75;
    let mut hi = categories.iter().copied().fold(f64::NEG_INFINITY, f64::max) + bar_width * 0.75;
    if let Some(marker) = &chart.marker {
        lo = lo.min(marker.x - bar_width * 0.25);
        hi = hi.max(marker.x + bar_width * 0.25);
    }
    if !lo.is_finite() || !hi.is_finite() {
        (lo, hi) = (-1.0, 1.0);
    }
    let x_scale = Scale::new(lo, hi, left, right);

    let peak = chart.bars.iter().map(|bar| bar.mean).fold(0.0, f64::max);
    let y_scale = Scale::new(0.0, (peak * 1.15).max(0.1), bottom, top);

    let bars = chart
        .bars
        .into_iter()
        .map(|bar| {
            let x0 = x_scale.at(bar.category - bar_width / 2.0);
            let x1 = x_scale.at(bar.category + bar_width / 2.0);
            let y = y_scale.at(bar.mean);
            view! {
                <rect
                    class="category-bar"
                    x={px(x0)}
                    y={px(y)}
                    width={px(x1 - x0)}
                    height={px(bottom - y)}
                    fill={bar.color}
                    data-category={bar.category.to_string()}
                    data-mean={bar.mean.to_string()}
                />
                <text
                    x={px((x0 + x1) / 2.0)}
                    y={px(y - 6.0)}
                    font-size="14"
                    font-weight="bold"
                    text-anchor="middle"
                >
                    {bar.label}
                </text>
            }
        })
        .collect::<Vec<_>>();

    let title = chart.x_label.clone();
    let marker = marker_line(chart.marker.as_ref().map(|marker| marker.x), x_scale, top, bottom);
    let labels = axis_labels(width, height, chart.x_label, Some(chart.y_label));
    let legend = legend_box(chart.legend, chart.marker, 590.0, top);
    let y_ticks = y_scale.ticks(5);

    view! {
        <Frame width height label={title}>
            {bars}
            {marker}
            <XAxis scale=x_scale y=bottom ticks=categories />
            <YAxis scale=y_scale x=left ticks=y_ticks />
            {labels}
            {legend}
        </Frame>
    }
}

#[component]
fn DensitySvg(chart: DensityChart) -> impl IntoView {
    let (width, height) = (800.0, 480.0);
    let (left, right, top, bottom) = (70.0, 560.0, 30.0, 420.0);

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut peak: f64 = 0.0;
    for series in &chart.series {
        lo = series.xs.iter().copied().fold(lo, f64::min);
        hi = series.xs.iter().copied().fold(hi, f64::max);
        peak = series.ys.iter().copied().fold(peak, f64::max);
    }
    if let Some(marker) = &chart.marker {
        lo = lo.min(marker.x);
        hi = hi.max(marker.x);
    }
    if !lo.is_finite() || !hi.is_finite() {
        (lo, hi) = (0.0, 1.0);
    }
    let x_scale = Scale::new(lo, hi, left, right);
    let y_scale = Scale::new(0.0, if peak > 0.0 { peak * 1.1 } else { 1.0 }, bottom, top);

    let curves = chart
        .series
        .into_iter()
        .filter_map(|series| {
            let first = *series.xs.first()?;
            let last = *series.xs.last()?;
            let points: Vec<String> = series
                .xs
                .iter()
                .zip(&series.ys)
                .map(|(x, y)| format!("{:.2},{:.2}", x_scale.at(*x), y_scale.at(*y)))
                .collect();
            let area = format!(
                "M{:.2},{bottom:.2} L{} L{:.2},{bottom:.2} Z",
                x_scale.at(first),
                points.join(" L"),
                x_scale.at(last)
            );
            Some(view! {
                <path
                    class="density-fill"
                    d={area}
                    fill={series.color}
                    fill-opacity={series.fill_opacity.to_string()}
                    stroke="none"
                />
                <polyline
                    class="density-line"
                    points={points.join(" ")}
                    fill="none"
                    stroke={series.color}
                    stroke-width={series.line_width.to_string()}
                    stroke-dasharray={series.dashed.then_some("10 6")}
                    aria-label={series.label}
                />
            })
        })
        .collect::<Vec<_>>();

    let title = chart.x_label.clone();
    let marker = marker_line(chart.marker.as_ref().map(|marker| marker.x), x_scale, top, bottom);
    let labels = axis_labels(width, height, chart.x_label, Some(chart.y_label));
    let legend = legend_box(chart.legend, chart.marker, 590.0, top);
    let x_ticks = x_scale.ticks(5);
    let y_ticks = y_scale.ticks(5);

    view! {
        <Frame width height label={title}>
            {curves}
            {marker}
            <XAxis scale=x_scale y=bottom ticks=x_ticks />
            <YAxis scale=y_scale x=left ticks=y_ticks />
            {labels}
            {legend}
        </Frame>
    }
}
