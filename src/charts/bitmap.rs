use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use log::debug;
use plotters::{
    coord::Shift,
    prelude::*,
    style::{
        register_font,
        text_anchor::{HPos, Pos, VPos},
    },
};

use super::{BarPanel, ChartSink, ChartSpec, Panel, ScatterPanel};

const FONT: &str = "sans-serif";

const FONT_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const FONT_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// Make the bundled DejaVu Sans faces available under [`FONT`].
fn register_fonts() -> Result<()> {
    for (style, bytes) in [(FontStyle::Normal, FONT_REGULAR), (FontStyle::Bold, FONT_BOLD)] {
        register_font(FONT, style, bytes)
            .map_err(|_| anyhow!("failed to load bundled font"))?;
    }
    Ok(())
}

/// Renders charts as PNG files into a directory.
///
/// The directory is created on the first render, so nothing touches the
/// filesystem before a chart is actually produced.
#[derive(Debug, Clone)]
pub struct BitmapSink {
    out_dir: PathBuf,
}

impl BitmapSink {
    /// Sink writing into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Directory the images are written to.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl ChartSink for BitmapSink {
    fn render(&self, spec: &ChartSpec) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir).with_context(|| {
            format!("failed to create {}", self.out_dir.display())
        })?;
        register_fonts()?;
        let path = self.out_dir.join(&spec.file_name);
        {
            let root = BitMapBackend::new(&path, spec.size).into_drawing_area();
            draw_chart(&root, spec)?;
            root.present()?;
        }
        debug!("wrote {}x{} image {}", spec.size.0, spec.size.1, path.display());
        Ok(path)
    }
}

fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let body = root.titled(&spec.title, (FONT, 28).into_font().style(FontStyle::Bold))?;
    for (cell, panel) in body.split_evenly(spec.grid).iter().zip(&spec.panels) {
        match panel {
            Panel::Bars(bars) => draw_bar_panel(cell, bars)?,
            Panel::Scatter(scatter) => draw_scatter_panel(cell, scatter)?,
        }
    }
    Ok(())
}

fn bar_label(names: &[&str], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    names
        .get(index as usize)
        .map(|name| name.to_string())
        .unwrap_or_default()
}

fn draw_bar_panel<DB>(area: &DrawingArea<DB, Shift>, panel: &BarPanel) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let n = panel.bars.len();
    let y_max = panel.y_axis_max();
    let x_range = -0.5..(n.max(1) as f64 - 0.5);

    let mut builder = ChartBuilder::on(area);
    builder.margin(20).x_label_area_size(110).y_label_area_size(70);
    if let Some(title) = &panel.title {
        builder.caption(title, (FONT, 20).into_font().style(FontStyle::Bold));
    }
    let mut chart = builder.build_cartesian_2d(x_range.clone(), 0.0..y_max)?;

    let names: Vec<&str> = panel.bars.iter().map(|bar| bar.label.as_str()).collect();
    let x_formatter = |x: &f64| bar_label(&names, *x);
    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(n + 1)
        .x_label_formatter(&x_formatter)
        .x_label_style((FONT, 13).into_font().transform(FontTransform::Rotate90))
        .y_desc(panel.y_label.as_str())
        .axis_desc_style((FONT, 15).into_font().style(FontStyle::Bold))
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(WHITE);
    if let Some(x_label) = &panel.x_label {
        mesh.x_desc(x_label.as_str());
    }
    mesh.draw()?;

    let bar_top = |value: f64| value.clamp(0.0, y_max);
    chart.draw_series(panel.bars.iter().enumerate().map(|(i, bar)| {
        let x = i as f64;
        Rectangle::new(
            [(x - 0.4, 0.0), (x + 0.4, bar_top(bar.value))],
            bar.color.mix(0.8).filled(),
        )
    }))?;
    chart.draw_series(panel.bars.iter().enumerate().map(|(i, bar)| {
        let x = i as f64;
        Rectangle::new(
            [(x - 0.4, 0.0), (x + 0.4, bar_top(bar.value))],
            BLACK.stroke_width(1),
        )
    }))?;

    let caption_style = TextStyle::from((FONT, panel.caption_size).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(panel.bars.iter().enumerate().map(|(i, bar)| {
        Text::new(
            bar.caption.clone(),
            (i as f64, bar_top(bar.value) + y_max * 0.01),
            caption_style.clone(),
        )
    }))?;

    if let Some(reference) = &panel.reference {
        let style = RED.mix(0.7).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                [(x_range.start, reference.value), (x_range.end, reference.value)],
                style,
            ))?
            .label(reference.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }
    Ok(())
}

fn draw_scatter_panel<DB>(area: &DrawingArea<DB, Shift>, panel: &ScatterPanel) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x_range, y_range) = panel.ranges();

    let mut builder = ChartBuilder::on(area);
    builder.margin(20).x_label_area_size(50).y_label_area_size(70);
    if let Some(title) = &panel.title {
        builder.caption(title, (FONT, 20).into_font().style(FontStyle::Bold));
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_range)?;
    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .axis_desc_style((FONT, 15).into_font().style(FontStyle::Bold))
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(WHITE)
        .draw()?;

    let radius = panel.marker_size as i32;
    chart.draw_series(panel.points.iter().map(|point| {
        EmptyElement::at((point.x, point.y))
            + Circle::new((0, 0), panel.marker_size, point.color.mix(0.7).filled())
            + Circle::new((0, 0), panel.marker_size, BLACK.stroke_width(1))
            + Text::new(
                point.label.clone(),
                (radius, -radius),
                (FONT, panel.label_size).into_font().style(FontStyle::Bold),
            )
    }))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, convert::Infallible, rc::Rc};

    use plotters_backend::{
        BackendColor, BackendCoord, BackendTextStyle, DrawingErrorKind,
    };

    use super::*;
    use crate::{
        charts::{accuracy_chart, summary_chart},
        datastructures::{AlgorithmRun, PerformanceReport},
    };

    /// Backend keeping every piece of text it is asked to draw.
    struct TextRecorder {
        texts: Rc<RefCell<Vec<String>>>,
    }

    impl DrawingBackend for TextRecorder {
        type ErrorType = Infallible;

        fn get_size(&self) -> (u32, u32) {
            (1600, 1200)
        }

        fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
            Ok(())
        }

        fn present(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
            Ok(())
        }

        fn draw_pixel(
            &mut self,
            _point: BackendCoord,
            _color: BackendColor,
        ) -> Result<(), DrawingErrorKind<Infallible>> {
            Ok(())
        }

        fn draw_text<TStyle: BackendTextStyle>(
            &mut self,
            text: &str,
            _style: &TStyle,
            _pos: BackendCoord,
        ) -> Result<(), DrawingErrorKind<Infallible>> {
            self.texts.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn drawn_texts(spec: &ChartSpec) -> Vec<String> {
        register_fonts().unwrap();
        let texts = Rc::new(RefCell::new(Vec::new()));
        let root = TextRecorder {
            texts: Rc::clone(&texts),
        }
        .into_drawing_area();
        draw_chart(&root, spec).unwrap();
        drop(root);
        let texts = texts.borrow().clone();
        texts
    }

    fn report() -> PerformanceReport {
        PerformanceReport {
            capacity: 10.0,
            algorithms: vec![
                AlgorithmRun {
                    name: "Dynamic Programming - O(nW)".to_string(),
                    execution_time: 1.5,
                    total_profit: 20.0,
                    total_weight: 10.0,
                },
                AlgorithmRun {
                    name: "Greedy-A - O(n log n)".to_string(),
                    execution_time: 0.4,
                    total_profit: 16.0,
                    total_weight: 9.0,
                },
            ],
            accuracy: vec![("Greedy-A".to_string(), 80.0)],
        }
    }

    #[test]
    fn test_bar_label() {
        let names = ["Greedy-A", "Backtracking"];
        assert_eq!(bar_label(&names, 0.0), "Greedy-A");
        assert_eq!(bar_label(&names, 1.0000000001), "Backtracking");
        assert_eq!(bar_label(&names, 0.5), "");
        assert_eq!(bar_label(&names, 2.0), "");
        assert_eq!(bar_label(&names, -1.0), "");
    }

    #[test]
    fn test_accuracy_chart_text() {
        let spec = accuracy_chart(&report(), "4").unwrap();
        let texts = drawn_texts(&spec);
        for expected in [
            "Algorithm Accuracy Comparison - Dataset 4",
            "Accuracy (%)",
            "Greedy-A",
            "80.0%",
            "Optimal (100%)",
        ] {
            assert!(texts.iter().any(|t| t == expected), "{expected:?} not in {texts:?}");
        }
    }

    #[test]
    fn test_summary_chart_text() {
        let texts = drawn_texts(&summary_chart(&report(), "4"));
        for expected in [
            "Algorithm Performance Summary - Dataset 4",
            "Weight Usage Comparison",
            "Capacity Limit",
            "Dynamic Programming",
            "1.5",
            "Performance Trade-off (Time vs Profit)",
        ] {
            assert!(texts.iter().any(|t| t == expected), "{expected:?} not in {texts:?}");
        }
    }
}
