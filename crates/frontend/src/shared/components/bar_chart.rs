use leptos::prelude::*;

use super::chart_geometry::{scale_lengths, short_label};

const WIDTH: f64 = 600.0;
const VERTICAL_HEIGHT: f64 = 240.0;
const VALUE_GUTTER: f64 = 18.0;
const LABEL_GUTTER: f64 = 22.0;
const ROW_HEIGHT: f64 = 22.0;
const LABEL_COLUMN: f64 = 48.0;
const VALUE_COLUMN: f64 = 90.0;

/// Один столбец графика
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    /// Formatted value printed next to the bar
    pub display: String,
    pub color: &'static str,
}

/// SVG bar chart
///
/// Vertical by default; `horizontal` puts labels in a left column (used for
/// the by-state charts). `mirrored` lays bars out right-to-left, the way the
/// "worst" charts read.
#[component]
pub fn BarChart(
    #[prop(into)] title: String,
    #[prop(into)] bars: Signal<Vec<ChartBar>>,
    #[prop(optional)] horizontal: bool,
    #[prop(optional)] mirrored: bool,
    /// Full labels in a legend instead of axis labels (long identifiers)
    #[prop(optional)]
    legend: bool,
) -> impl IntoView {
    let body = move || {
        let bars = bars.get();
        if bars.is_empty() {
            return view! {
                <div class="chart__empty">"No data for the selected period"</div>
            }
            .into_any();
        }

        let values: Vec<f64> = bars.iter().map(|b| b.value).collect();

        if horizontal {
            let height = bars.len() as f64 * ROW_HEIGHT + 4.0;
            let extent = WIDTH - LABEL_COLUMN - VALUE_COLUMN;
            let lengths = scale_lengths(&values, extent);
            let rows = bars
                .into_iter()
                .zip(lengths)
                .enumerate()
                .map(|(i, (bar, len))| {
                    let y = i as f64 * ROW_HEIGHT;
                    view! {
                        <g>
                            <text
                                x=format!("{:.1}", LABEL_COLUMN - 6.0)
                                y=format!("{:.1}", y + ROW_HEIGHT * 0.7)
                                text-anchor="end"
                                font-size="11"
                            >
                                {bar.label}
                            </text>
                            <rect
                                x=format!("{:.1}", LABEL_COLUMN)
                                y=format!("{:.1}", y + 3.0)
                                width=format!("{:.1}", len)
                                height=format!("{:.1}", ROW_HEIGHT - 6.0)
                                fill=bar.color
                                rx="2"
                            />
                            <text
                                x=format!("{:.1}", LABEL_COLUMN + len + 6.0)
                                y=format!("{:.1}", y + ROW_HEIGHT * 0.7)
                                font-size="11"
                            >
                                {bar.display}
                            </text>
                        </g>
                    }
                })
                .collect_view();

            return view! {
                <svg
                    class="chart__svg"
                    viewBox=format!("0 0 {} {:.0}", WIDTH, height)
                    xmlns="http://www.w3.org/2000/svg"
                >
                    {rows}
                </svg>
            }
            .into_any();
        }

        let count = bars.len();
        let slot = WIDTH / count as f64;
        let bar_area = VERTICAL_HEIGHT - VALUE_GUTTER - LABEL_GUTTER;
        let lengths = scale_lengths(&values, bar_area);
        let legend_items = bars.clone();

        let columns = bars
            .into_iter()
            .zip(lengths)
            .enumerate()
            .map(|(i, (bar, len))| {
                let position = if mirrored { count - 1 - i } else { i };
                let x = position as f64 * slot + slot * 0.15;
                let center = position as f64 * slot + slot / 2.0;
                let top = VALUE_GUTTER + bar_area - len;
                let axis_label = (!legend).then(|| {
                    view! {
                        <text
                            x=format!("{:.1}", center)
                            y=format!("{:.1}", VERTICAL_HEIGHT - 6.0)
                            text-anchor="middle"
                            font-size="11"
                        >
                            {short_label(&bar.label, 14)}
                        </text>
                    }
                });
                view! {
                    <g>
                        <text
                            x=format!("{:.1}", center)
                            y=format!("{:.1}", top - 4.0)
                            text-anchor="middle"
                            font-size="11"
                        >
                            {bar.display}
                        </text>
                        <rect
                            x=format!("{:.1}", x)
                            y=format!("{:.1}", top)
                            width=format!("{:.1}", slot * 0.7)
                            height=format!("{:.1}", len)
                            fill=bar.color
                            rx="2"
                        />
                        {axis_label}
                    </g>
                }
            })
            .collect_view();

        let legend_view = legend.then(|| {
            let items = legend_items
                .into_iter()
                .map(|bar| {
                    view! {
                        <li class="chart__legend-item">
                            <span
                                class="chart__legend-swatch"
                                style=format!("background: {};", bar.color)
                            ></span>
                            {bar.label}
                        </li>
                    }
                })
                .collect_view();
            view! { <ul class="chart__legend">{items}</ul> }
        });

        view! {
            <svg
                class="chart__svg"
                viewBox=format!("0 0 {} {}", WIDTH, VERTICAL_HEIGHT)
                xmlns="http://www.w3.org/2000/svg"
            >
                {columns}
            </svg>
            {legend_view}
        }
        .into_any()
    };

    view! {
        <div class="chart">
            <div class="chart__title">{title}</div>
            {body}
        </div>
    }
}
