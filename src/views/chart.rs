use crate::chart::{ChartKind, ChartModel, VIEW_HEIGHT, VIEW_WIDTH, series_color};
use crate::types::ChartSpec;
use dioxus::prelude::*;

/// Stateless: the same spec always renders the same chart.
#[component]
pub fn ChartView(spec: ChartSpec) -> Element {
    let model = ChartModel::from_spec(&spec);
    let view_box = format!("0 0 {VIEW_WIDTH} {VIEW_HEIGHT}");

    if model.is_empty() {
        return rsx! {
            div { class: "chart-card",
                div { class: "chart-placeholder", "No data to chart" }
            }
        };
    }

    let body = match &model.kind {
        ChartKind::Pie => rsx! { PieChart { model: model.clone() } },
        ChartKind::Line | ChartKind::Area => rsx! { LineChart { model: model.clone() } },
        ChartKind::Column => rsx! { ColumnChart { model: model.clone() } },
        ChartKind::Bar => rsx! { BarChart { model: model.clone() } },
        ChartKind::Unsupported(tag) => {
            tracing::debug!(chart_type = %tag, "rendering unsupported chart type as a table");
            return rsx! {
                div { class: "chart-card",
                    DataTable { model: model.clone() }
                }
            };
        }
    };

    rsx! {
        div { class: "chart-card",
            if let Some(title) = model.title.clone() {
                h4 { class: "chart-title", "{title}" }
            }
            svg {
                class: "chart-svg",
                view_box: "{view_box}",
                width: "100%",
                style: format!("background: {};", model.background),
                {body}
            }
            Legend { model: model.clone() }
        }
    }
}

#[component]
fn PieChart(model: ChartModel) -> Element {
    let slices = model.pie_slices();
    let cx = VIEW_WIDTH / 2.0;
    let cy = VIEW_HEIGHT / 2.0;
    let r = model.plot.width.min(model.plot.height) / 2.0;

    rsx! {
        if slices.len() == 1 {
            circle { cx: "{cx}", cy: "{cy}", r: "{r}", fill: series_color(0) }
        } else {
            for (i, slice) in slices.iter().enumerate() {
                path {
                    key: "{i}",
                    d: slice.path(cx, cy, r),
                    fill: series_color(i),
                    stroke: "#ffffff",
                    stroke_width: "1",
                }
            }
        }
    }
}

#[component]
fn LineChart(model: ChartModel) -> Element {
    let lines = model.line_points();
    let bottom = model.plot.y + model.plot.height;
    let fill_area = model.kind == ChartKind::Area;
    let label_y = bottom + 18.0;

    rsx! {
        Axes { model: model.clone() }
        for (series, points) in lines.iter().enumerate() {
            if fill_area {
                polygon {
                    key: "area-{series}",
                    points: area_points(points, bottom),
                    fill: series_color(series),
                    fill_opacity: "0.2",
                }
            }
            polyline {
                key: "line-{series}",
                points: polyline_points(points),
                fill: "none",
                stroke: series_color(series),
                stroke_width: "2",
            }
        }
        for (i, row) in model.rows.iter().enumerate() {
            if let Some((x, _)) = lines.first().and_then(|points| points.get(i)).copied() {
                text {
                    key: "label-{i}",
                    x: "{x}",
                    y: "{label_y}",
                    text_anchor: "middle",
                    font_size: "11",
                    "{row.label}"
                }
            }
        }
    }
}

#[component]
fn ColumnChart(model: ChartModel) -> Element {
    let bars = model.column_bars();
    let per_group = model.series.len().max(1);
    let bottom = model.plot.y + model.plot.height;
    let group_width = model.plot.width / model.rows.len().max(1) as f64;
    let label_y = bottom + 18.0;
    let labels: Vec<(f64, String)> = model
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| (model.plot.x + group_width * (i as f64 + 0.5), row.label.clone()))
        .collect();
    let series_names = model.series.join(", ");
    let legend_x = model.plot.x;
    let legend_y = model.plot.y - 8.0;

    rsx! {
        Axes { model: model.clone() }
        for (i, (x, y, width, height, series)) in bars.iter().copied().enumerate() {
            rect {
                key: "{i}",
                x: "{x}",
                y: "{y}",
                width: "{width}",
                height: "{height}",
                fill: series_color(series),
            }
        }
        for (i, (x, label)) in labels.iter().enumerate() {
            text {
                key: "label-{i}",
                x: "{x}",
                y: "{label_y}",
                text_anchor: "middle",
                font_size: "11",
                "{label}"
            }
        }
        if per_group > 1 {
            text {
                x: "{legend_x}",
                y: "{legend_y}",
                font_size: "11",
                "{series_names}"
            }
        }
    }
}

#[component]
fn BarChart(model: ChartModel) -> Element {
    let bars = model.horizontal_bars();
    let group_height = model.plot.height / model.rows.len().max(1) as f64;
    let label_x = model.plot.x - 6.0;
    let labels: Vec<(f64, String)> = model
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| (model.plot.y + group_height * (i as f64 + 0.5), row.label.clone()))
        .collect();

    rsx! {
        for (i, (x, y, width, height, series)) in bars.iter().copied().enumerate() {
            rect {
                key: "{i}",
                x: "{x}",
                y: "{y}",
                width: "{width}",
                height: "{height}",
                fill: series_color(series),
            }
        }
        for (i, (y, label)) in labels.iter().enumerate() {
            text {
                key: "label-{i}",
                x: "{label_x}",
                y: "{y}",
                text_anchor: "end",
                font_size: "11",
                "{label}"
            }
        }
    }
}

#[component]
fn Axes(model: ChartModel) -> Element {
    let left = model.plot.x;
    let top = model.plot.y;
    let bottom = model.plot.y + model.plot.height;
    let right = model.plot.x + model.plot.width;
    let max = model.max_value();
    let tick_x = left - 6.0;
    let max_y = top + 4.0;

    rsx! {
        line { x1: "{left}", y1: "{bottom}", x2: "{right}", y2: "{bottom}", stroke: "#9ca3af" }
        line { x1: "{left}", y1: "{top}", x2: "{left}", y2: "{bottom}", stroke: "#9ca3af" }
        text { x: "{tick_x}", y: "{max_y}", text_anchor: "end", font_size: "11", "{max:.0}" }
        text { x: "{tick_x}", y: "{bottom}", text_anchor: "end", font_size: "11", "0" }
    }
}

#[component]
fn Legend(model: ChartModel) -> Element {
    let entries: Vec<String> = if model.kind == ChartKind::Pie {
        model.pie_slices().into_iter().map(|slice| slice.label).collect()
    } else {
        model.series.clone()
    };

    rsx! {
        div { class: "chart-legend",
            for (i, label) in entries.iter().enumerate() {
                span { key: "{i}", class: "legend-item",
                    span { class: "legend-swatch", style: format!("background: {};", series_color(i)) }
                    "{label}"
                }
            }
        }
    }
}

#[component]
fn DataTable(model: ChartModel) -> Element {
    rsx! {
        if let Some(title) = model.title.clone() {
            h4 { class: "chart-title", "{title}" }
        }
        table { class: "chart-table",
            thead {
                tr {
                    th {}
                    for (i, name) in model.series.iter().enumerate() {
                        th { key: "{i}", "{name}" }
                    }
                }
            }
            tbody {
                for (i, row) in model.rows.iter().enumerate() {
                    tr { key: "{i}",
                        td { "{row.label}" }
                        for (j, value) in row.values.iter().enumerate() {
                            td { key: "{j}", "{value}" }
                        }
                    }
                }
            }
        }
    }
}

fn polyline_points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn area_points(points: &[(f64, f64)], bottom: f64) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return String::new();
    };
    format!(
        "{:.2},{bottom:.2} {} {:.2},{bottom:.2}",
        first.0,
        polyline_points(points),
        last.0
    )
}
