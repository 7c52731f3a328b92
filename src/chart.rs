//! Chart rendering adapter.
//!
//! Takes a chart spec as the backend returns it (Google Charts style: a
//! header row followed by `[label, value, ...]` rows) and turns it into plot
//! geometry for the SVG views. No business logic lives here.

use crate::types::ChartSpec;
use serde_json::{Map, Value, json};
use std::f64::consts::PI;

pub const VIEW_WIDTH: f64 = 600.0;
pub const VIEW_HEIGHT: f64 = 400.0;

pub const PALETTE: &[&str] = &[
    "#3366cc", "#dc3912", "#ff9900", "#109618", "#990099", "#0099c6", "#dd4477", "#66aa00",
    "#b82e2e", "#316395",
];

/// Plot area as a share of the view, in percent. Always applied over the
/// backend options.
pub const CHART_AREA_WIDTH_PCT: u32 = 80;
pub const CHART_AREA_HEIGHT_PCT: u32 = 70;

pub fn series_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Backend options with the fixed background and plot area laid over them.
pub fn render_options(options: &Value) -> Value {
    let mut merged = match options {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    merged.insert("backgroundColor".into(), json!("transparent"));
    merged.insert(
        "chartArea".into(),
        json!({
            "width": format!("{CHART_AREA_WIDTH_PCT}%"),
            "height": format!("{CHART_AREA_HEIGHT_PCT}%"),
        }),
    );
    Value::Object(merged)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Area,
    Column,
    Bar,
    Pie,
    Unsupported(String),
}

impl ChartKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "LineChart" => ChartKind::Line,
            "AreaChart" => ChartKind::Area,
            "ColumnChart" => ChartKind::Column,
            "BarChart" => ChartKind::Bar,
            "PieChart" => ChartKind::Pie,
            other => ChartKind::Unsupported(other.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartRow {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartModel {
    pub kind: ChartKind,
    pub title: Option<String>,
    pub series: Vec<String>,
    pub rows: Vec<ChartRow>,
    pub plot: PlotArea,
    pub background: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    /// SVG path of the wedge, angles measured clockwise from 12 o'clock.
    pub fn path(&self, cx: f64, cy: f64, r: f64) -> String {
        let (x1, y1) = polar(cx, cy, r, self.start_angle);
        let (x2, y2) = polar(cx, cy, r, self.end_angle);
        let large_arc = if self.end_angle - self.start_angle > PI { 1 } else { 0 };
        format!("M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z")
    }
}

fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.sin(), cy - r * angle.cos())
}

impl ChartModel {
    pub fn from_spec(spec: &ChartSpec) -> Self {
        let options = render_options(&spec.options);
        let mut rows_iter = spec.data.iter();
        let series = rows_iter
            .next()
            .and_then(Value::as_array)
            .map(|header| header.iter().skip(1).map(cell_label).collect())
            .unwrap_or_default();
        let rows = rows_iter
            .filter_map(Value::as_array)
            .filter(|cells| !cells.is_empty())
            .map(|cells| ChartRow {
                label: cell_label(&cells[0]),
                values: cells[1..].iter().map(cell_number).collect(),
            })
            .collect();

        Self {
            kind: ChartKind::from_tag(&spec.chart_type),
            title: options
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string),
            series,
            rows,
            plot: plot_area(),
            background: options
                .get("backgroundColor")
                .and_then(Value::as_str)
                .unwrap_or("transparent")
                .to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest value across all series, never below zero.
    pub fn max_value(&self) -> f64 {
        self.rows
            .iter()
            .flat_map(|row| row.values.iter().copied())
            .filter(|value| value.is_finite())
            .fold(0.0, f64::max)
    }

    /// Slices of the first series. Non-positive values are skipped.
    pub fn pie_slices(&self) -> Vec<PieSlice> {
        let positive: Vec<(&str, f64)> = self
            .rows
            .iter()
            .filter_map(|row| {
                let value = row.values.first().copied()?;
                (value.is_finite() && value > 0.0).then_some((row.label.as_str(), value))
            })
            .collect();
        let total: f64 = positive.iter().map(|(_, value)| value).sum();
        if total <= 0.0 {
            return Vec::new();
        }

        let mut angle = 0.0;
        positive
            .into_iter()
            .map(|(label, value)| {
                let fraction = value / total;
                let start_angle = angle;
                angle += fraction * 2.0 * PI;
                PieSlice {
                    label: label.to_string(),
                    value,
                    fraction,
                    start_angle,
                    end_angle: angle,
                }
            })
            .collect()
    }

    /// Polyline points per series inside the plot area.
    pub fn line_points(&self) -> Vec<Vec<(f64, f64)>> {
        let max = self.max_value();
        let count = self.rows.len();
        let step = if count > 1 {
            self.plot.width / (count - 1) as f64
        } else {
            0.0
        };
        (0..self.series.len().max(1))
            .map(|series| {
                self.rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| {
                        let value = row.values.get(series).copied().unwrap_or(0.0);
                        let x = if count > 1 {
                            self.plot.x + step * i as f64
                        } else {
                            self.plot.x + self.plot.width / 2.0
                        };
                        (x, self.scale_y(value, max))
                    })
                    .collect()
            })
            .collect()
    }

    /// Bars for column charts as `(x, y, width, height, series)`.
    pub fn column_bars(&self) -> Vec<(f64, f64, f64, f64, usize)> {
        let max = self.max_value();
        let groups = self.rows.len().max(1) as f64;
        let per_group = self.series.len().max(1);
        let group_width = self.plot.width / groups;
        let bar_width = group_width * 0.8 / per_group as f64;
        let bottom = self.plot.y + self.plot.height;

        let mut bars = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            for series in 0..per_group {
                let value = row.values.get(series).copied().unwrap_or(0.0).max(0.0);
                let top = self.scale_y(value, max);
                let x = self.plot.x + group_width * i as f64 + group_width * 0.1
                    + bar_width * series as f64;
                bars.push((x, top, bar_width, bottom - top, series));
            }
        }
        bars
    }

    /// Horizontal bars for bar charts as `(x, y, width, height, series)`.
    pub fn horizontal_bars(&self) -> Vec<(f64, f64, f64, f64, usize)> {
        let max = self.max_value();
        let groups = self.rows.len().max(1) as f64;
        let per_group = self.series.len().max(1);
        let group_height = self.plot.height / groups;
        let bar_height = group_height * 0.8 / per_group as f64;

        let mut bars = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            for series in 0..per_group {
                let value = row.values.get(series).copied().unwrap_or(0.0).max(0.0);
                let width = if max > 0.0 {
                    value / max * self.plot.width
                } else {
                    0.0
                };
                let y = self.plot.y + group_height * i as f64 + group_height * 0.1
                    + bar_height * series as f64;
                bars.push((self.plot.x, y, width, bar_height, series));
            }
        }
        bars
    }

    fn scale_y(&self, value: f64, max: f64) -> f64 {
        let bottom = self.plot.y + self.plot.height;
        if max <= 0.0 || !value.is_finite() {
            return bottom;
        }
        bottom - value.max(0.0) / max * self.plot.height
    }
}

fn cell_label(cell: &Value) -> String {
    match cell {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn cell_number(cell: &Value) -> f64 {
    match cell {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Centered in the view, sized by the fixed chart-area percentages.
fn plot_area() -> PlotArea {
    let width = VIEW_WIDTH * f64::from(CHART_AREA_WIDTH_PCT) / 100.0;
    let height = VIEW_HEIGHT * f64::from(CHART_AREA_HEIGHT_PCT) / 100.0;
    PlotArea {
        x: (VIEW_WIDTH - width) / 2.0,
        y: (VIEW_HEIGHT - height) / 2.0,
        width,
        height,
    }
}
