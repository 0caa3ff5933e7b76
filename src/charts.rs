use core::fmt;
use std::{ops::Range, path::PathBuf};

use anyhow::{Context, Result};
use log::info;
use plotters::style::RGBColor;

use crate::datastructures::{AlgorithmRun, PerformanceReport};

mod bitmap;
pub mod palette;


pub use bitmap::BitmapSink;
use palette::{accuracy_color, family_color, set3_color};

/// Separator between an algorithm name and its complexity note.
const COMPLEXITY_SEPARATOR: &str = " - ";

/// The chart types produced for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Execution time per algorithm.
    ExecutionTime,
    /// Total profit per algorithm.
    Profit,
    /// Accuracy of the approximate algorithms.
    Accuracy,
    /// Execution time against profit.
    Tradeoff,
    /// 2x2 overview of time, profit, weight and trade-off.
    Summary,
}

impl ChartKind {
    fn file_stem(self) -> &'static str {
        match self {
            ChartKind::ExecutionTime => "execution_time",
            ChartKind::Profit => "profit_comparison",
            ChartKind::Accuracy => "accuracy_comparison",
            ChartKind::Tradeoff => "performance_tradeoff",
            ChartKind::Summary => "performance_summary",
        }
    }

    /// Name of the image file for `dataset_label`.
    pub fn file_name(self, dataset_label: &str) -> String {
        format!("{}_dataset_{dataset_label}.png", self.file_stem())
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::ExecutionTime => "Execution time chart",
            ChartKind::Profit => "Profit comparison chart",
            ChartKind::Accuracy => "Accuracy comparison chart",
            ChartKind::Tradeoff => "Performance trade-off chart",
            ChartKind::Summary => "Summary report",
        };
        f.write_str(name)
    }
}

/// A single bar with its value caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Category label on the x axis.
    pub label: String,
    /// Bar height.
    pub value: f64,
    /// Text printed above the bar.
    pub caption: String,
    /// Fill colour.
    pub color: RGBColor,
}

/// A horizontal line drawn across a bar panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    /// Height of the line.
    pub value: f64,
    /// Legend entry.
    pub label: String,
}

/// A bar chart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPanel {
    /// Panel title, `None` when the figure title is enough.
    pub title: Option<String>,
    /// Description of the x axis.
    pub x_label: Option<String>,
    /// Description of the y axis.
    pub y_label: String,
    /// Bars from left to right.
    pub bars: Vec<Bar>,
    /// Fixed upper end of the y axis; bars above it are cut off.
    pub y_limit: Option<f64>,
    /// Optional reference line.
    pub reference: Option<ReferenceLine>,
    /// Font size of the bar captions.
    pub caption_size: u32,
}

impl BarPanel {
    /// Upper end of the y axis.
    pub fn y_axis_max(&self) -> f64 {
        if let Some(limit) = self.y_limit {
            return limit;
        }
        let top = self
            .bars
            .iter()
            .map(|bar| bar.value)
            .chain(self.reference.iter().map(|line| line.value))
            .fold(0.0, f64::max);
        if top > 0.0 {
            top * 1.12
        } else {
            1.0
        }
    }
}

/// An annotated point of a scatter panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// Annotation next to the point.
    pub label: String,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Marker colour.
    pub color: RGBColor,
}

/// A scatter plot panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPanel {
    /// Panel title, `None` when the figure title is enough.
    pub title: Option<String>,
    /// Description of the x axis.
    pub x_label: String,
    /// Description of the y axis.
    pub y_label: String,
    /// Points in report order.
    pub points: Vec<ScatterPoint>,
    /// Marker radius in pixels.
    pub marker_size: u32,
    /// Font size of the annotations.
    pub label_size: u32,
}

impl ScatterPanel {
    /// Axis ranges covering every point with some padding.
    pub fn ranges(&self) -> (Range<f64>, Range<f64>) {
        (
            padded_range(self.points.iter().map(|p| p.x)),
            padded_range(self.points.iter().map(|p| p.y)),
        )
    }
}

/// One drawing inside a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    /// Bar chart.
    Bars(BarPanel),
    /// Scatter plot.
    Scatter(ScatterPanel),
}

/// Everything needed to render one image, independent of the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Chart type.
    pub kind: ChartKind,
    /// Image file name.
    pub file_name: String,
    /// Figure title.
    pub title: String,
    /// Image size in pixels.
    pub size: (u32, u32),
    /// Panel grid as (rows, columns).
    pub grid: (usize, usize),
    /// Panels in row major order.
    pub panels: Vec<Panel>,
}

/// Renders chart specs, e.g. into image files.
pub trait ChartSink {
    /// Render `spec` and return the path of the produced file.
    fn render(&self, spec: &ChartSpec) -> Result<PathBuf>;
}

/// The algorithm name without its complexity note.
pub fn display_name(name: &str) -> &str {
    name.split(COMPLEXITY_SEPARATOR).next().unwrap_or(name)
}

/// Format a number without a fractional part when it has none.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let padding = if hi > lo {
        (hi - lo) * 0.1
    } else {
        lo.abs().max(1.0) * 0.1
    };
    (lo - padding)..(hi + padding)
}

fn run_bars(
    runs: &[AlgorithmRun],
    value: impl Fn(&AlgorithmRun) -> f64,
    caption: impl Fn(f64) -> String,
    color: impl Fn(usize, &str) -> RGBColor,
) -> Vec<Bar> {
    runs.iter()
        .enumerate()
        .map(|(i, run)| {
            let name = display_name(&run.name);
            Bar {
                label: name.to_string(),
                value: value(run),
                caption: caption(value(run)),
                color: color(i, name),
            }
        })
        .collect()
}

fn single_panel(
    kind: ChartKind,
    dataset_label: &str,
    title: String,
    size: (u32, u32),
    panel: Panel,
) -> ChartSpec {
    ChartSpec {
        kind,
        file_name: kind.file_name(dataset_label),
        title,
        size,
        grid: (1, 1),
        panels: vec![panel],
    }
}

/// Bar chart of the execution times, coloured by algorithm family.
pub fn execution_time_chart(report: &PerformanceReport, dataset_label: &str) -> ChartSpec {
    let panel = BarPanel {
        title: None,
        x_label: Some("Algorithms".to_string()),
        y_label: "Execution Time (ms)".to_string(),
        bars: run_bars(
            &report.algorithms,
            |run| run.execution_time,
            |t| format!("{t:.1}ms"),
            |_, name| family_color(name),
        ),
        y_limit: None,
        reference: None,
        caption_size: 14,
    };
    single_panel(
        ChartKind::ExecutionTime,
        dataset_label,
        format!("Algorithm Execution Time Comparison - Dataset {dataset_label}"),
        (1200, 700),
        Panel::Bars(panel),
    )
}

/// Bar chart of the total profits, coloured by algorithm family.
pub fn profit_chart(report: &PerformanceReport, dataset_label: &str) -> ChartSpec {
    let panel = BarPanel {
        title: None,
        x_label: Some("Algorithms".to_string()),
        y_label: "Total Profit".to_string(),
        bars: run_bars(
            &report.algorithms,
            |run| run.total_profit,
            format_number,
            |_, name| family_color(name),
        ),
        y_limit: None,
        reference: None,
        caption_size: 14,
    };
    single_panel(
        ChartKind::Profit,
        dataset_label,
        format!("Algorithm Profit Comparison - Dataset {dataset_label}"),
        (1200, 700),
        Panel::Bars(panel),
    )
}

/// Bar chart of the accuracy map, `None` when the report has no accuracy.
pub fn accuracy_chart(report: &PerformanceReport, dataset_label: &str) -> Option<ChartSpec> {
    if report.accuracy.is_empty() {
        return None;
    }
    let bars = report
        .accuracy
        .iter()
        .enumerate()
        .map(|(i, (name, accuracy))| Bar {
            label: name.clone(),
            value: *accuracy,
            caption: format!("{accuracy:.1}%"),
            color: accuracy_color(i),
        })
        .collect();
    let panel = BarPanel {
        title: None,
        x_label: Some("Algorithms".to_string()),
        y_label: "Accuracy (%)".to_string(),
        bars,
        y_limit: Some(105.0),
        reference: Some(ReferenceLine {
            value: 100.0,
            label: "Optimal (100%)".to_string(),
        }),
        caption_size: 14,
    };
    Some(single_panel(
        ChartKind::Accuracy,
        dataset_label,
        format!("Algorithm Accuracy Comparison - Dataset {dataset_label}"),
        (1000, 600),
        Panel::Bars(panel),
    ))
}

fn tradeoff_points(runs: &[AlgorithmRun]) -> Vec<ScatterPoint> {
    runs.iter()
        .enumerate()
        .map(|(i, run)| ScatterPoint {
            label: display_name(&run.name).to_string(),
            x: run.execution_time,
            y: run.total_profit,
            color: set3_color(i, runs.len()),
        })
        .collect()
}

/// Scatter plot of execution time against profit.
pub fn tradeoff_chart(report: &PerformanceReport, dataset_label: &str) -> ChartSpec {
    let panel = ScatterPanel {
        title: None,
        x_label: "Execution Time (ms)".to_string(),
        y_label: "Total Profit".to_string(),
        points: tradeoff_points(&report.algorithms),
        marker_size: 8,
        label_size: 14,
    };
    single_panel(
        ChartKind::Tradeoff,
        dataset_label,
        format!("Algorithm Performance Trade-off - Dataset {dataset_label}"),
        (1200, 800),
        Panel::Scatter(panel),
    )
}

/// 2x2 summary of time, profit, weight usage and trade-off sharing one
/// positional colour assignment.
pub fn summary_chart(report: &PerformanceReport, dataset_label: &str) -> ChartSpec {
    let runs = &report.algorithms;
    let shared_color = |i: usize, _: &str| set3_color(i, runs.len());
    let bar_panel = |title: &str, y_label: &str, bars: Vec<Bar>, reference: Option<ReferenceLine>| {
        Panel::Bars(BarPanel {
            title: Some(title.to_string()),
            x_label: None,
            y_label: y_label.to_string(),
            bars,
            y_limit: None,
            reference,
            caption_size: 10,
        })
    };
    let panels = vec![
        bar_panel(
            "Execution Time Comparison",
            "Time (ms)",
            run_bars(runs, |run| run.execution_time, |t| format!("{t:.1}"), shared_color),
            None,
        ),
        bar_panel(
            "Total Profit Comparison",
            "Profit",
            run_bars(runs, |run| run.total_profit, format_number, shared_color),
            None,
        ),
        bar_panel(
            "Weight Usage Comparison",
            "Total Weight",
            run_bars(runs, |run| run.total_weight, format_number, shared_color),
            Some(ReferenceLine {
                value: report.capacity,
                label: "Capacity Limit".to_string(),
            }),
        ),
        Panel::Scatter(ScatterPanel {
            title: Some("Performance Trade-off (Time vs Profit)".to_string()),
            x_label: "Execution Time (ms)".to_string(),
            y_label: "Total Profit".to_string(),
            points: tradeoff_points(runs),
            marker_size: 6,
            label_size: 10,
        }),
    ];
    ChartSpec {
        kind: ChartKind::Summary,
        file_name: ChartKind::Summary.file_name(dataset_label),
        title: format!("Algorithm Performance Summary - Dataset {dataset_label}"),
        size: (1600, 1200),
        grid: (2, 2),
        panels,
    }
}

/// All charts for a report in rendering order. The accuracy chart is only
/// included when the report carries accuracy values. A report without runs
/// still yields the (empty) time, profit, trade-off and summary charts.
pub fn compose_charts(report: &PerformanceReport, dataset_label: &str) -> Vec<ChartSpec> {
    [
        Some(execution_time_chart(report, dataset_label)),
        Some(profit_chart(report, dataset_label)),
        accuracy_chart(report, dataset_label),
        Some(tradeoff_chart(report, dataset_label)),
        Some(summary_chart(report, dataset_label)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Compose and render every chart, stopping at the first failure.
///
/// Files rendered before a failure are left in place.
pub fn generate_charts(
    report: &PerformanceReport,
    dataset_label: &str,
    sink: &dyn ChartSink,
) -> Result<Vec<PathBuf>> {
    compose_charts(report, dataset_label)
        .iter()
        .map(|spec| {
            let path = sink
                .render(spec)
                .with_context(|| format!("failed to render {}", spec.file_name))?;
            info!("{}: {}", spec.kind, path.display());
            Ok(path)
        })
        .collect()
}
