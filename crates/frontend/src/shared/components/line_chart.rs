use leptos::prelude::*;

use super::chart_geometry::{line_points, points_attr};

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 260.0;
const PAD_X: f64 = 30.0;
const PAD_TOP: f64 = 24.0;
const PAD_BOTTOM: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Period label, "YYYY-MM"
    pub label: String,
    pub value: f64,
    pub display: String,
}

/// SVG line chart with a marker per point and rotated period labels
#[component]
pub fn LineChart(
    #[prop(into)] title: String,
    #[prop(into)] points: Signal<Vec<ChartPoint>>,
    color: &'static str,
) -> impl IntoView {
    let body = move || {
        let points = points.get();
        if points.is_empty() {
            return view! {
                <div class="chart__empty">"No data for the selected period"</div>
            }
            .into_any();
        }

        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        let plot_width = WIDTH - 2.0 * PAD_X;
        let plot_height = HEIGHT - PAD_TOP - PAD_BOTTOM;
        let coords: Vec<(f64, f64)> = line_points(&values, plot_width, plot_height)
            .into_iter()
            .map(|(x, y)| (x + PAD_X, y + PAD_TOP))
            .collect();
        let polyline = points_attr(&coords);

        let markers = points
            .into_iter()
            .zip(coords)
            .map(|(point, (x, y))| {
                let label_y = HEIGHT - PAD_BOTTOM + 14.0;
                view! {
                    <g>
                        <circle
                            cx=format!("{:.1}", x)
                            cy=format!("{:.1}", y)
                            r="4"
                            fill=color
                        />
                        <text
                            x=format!("{:.1}", x)
                            y=format!("{:.1}", y - 8.0)
                            text-anchor="middle"
                            font-size="9"
                        >
                            {point.display}
                        </text>
                        <text
                            x=format!("{:.1}", x)
                            y=format!("{:.1}", label_y)
                            text-anchor="end"
                            font-size="10"
                            transform=format!("rotate(-60 {:.1} {:.1})", x, label_y)
                        >
                            {point.label}
                        </text>
                    </g>
                }
            })
            .collect_view();

        view! {
            <svg
                class="chart__svg"
                viewBox=format!("0 0 {} {}", WIDTH, HEIGHT)
                xmlns="http://www.w3.org/2000/svg"
            >
                <polyline points=polyline fill="none" stroke=color stroke-width="2" />
                {markers}
            </svg>
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
