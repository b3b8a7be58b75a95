pub use self::style::{color_for, legend_position, marker_for, Marker};

mod style;

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use plotters::coord::ranged1d::{AsRangedCoord, Ranged, ValueFormatter};
use plotters::coord::Shift;
use plotters::element::{Circle, Cross, Pixel, Rectangle, TriangleMarker};
use plotters::prelude::*;

use crate::series::Series;

/// Fixed output density; figure width/height are given in inches.
pub const PIXELS_PER_INCH: f64 = 100.0;

/// Styling directives for the drawing backend.  The extraction pipeline
/// never looks inside; it just hands finished series plus these options
/// over.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub outfile: String,
    pub colors: String,
    pub shapes: String,
    pub add_style: String,
    pub x_log: bool,
    pub y_log: bool,
    pub y_min: f64,
    pub y_max: f64,
    pub legend: String,
    pub fig_width: f64,
    pub fig_height: f64,
    pub bars: bool,
    pub alpha: f64,
}

/// Draws all series into the image file named by the options.
///
/// The backend is picked from the file extension: `.svg` gets a vector
/// backend, everything else goes through the bitmap backend (png, jpeg,
/// bmp...).
pub fn render(series: &[Series], options: &RenderOptions) -> Result<(), Box<dyn Error>> {
    let size = (
        (options.fig_width * PIXELS_PER_INCH) as u32,
        (options.fig_height * PIXELS_PER_INCH) as u32,
    );
    let path = Path::new(&options.outfile);
    let svg = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("svg"));
    if svg {
        draw(SVGBackend::new(path, size).into_drawing_area(), series, options)
    } else {
        draw(BitMapBackend::new(path, size).into_drawing_area(), series, options)
    }
}

fn draw<DB>(
    root: DrawingArea<DB, Shift>,
    series: &[Series],
    options: &RenderOptions,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let (x_range, y_range) = ranges(series, options);
    match (options.x_log, options.y_log) {
        (false, false) => draw_chart(&root, x_range, y_range, series, options),
        (true, false) => draw_chart(&root, x_range.log_scale(), y_range, series, options),
        (false, true) => draw_chart(&root, x_range, y_range.log_scale(), series, options),
        (true, true) => draw_chart(
            &root,
            x_range.log_scale(),
            y_range.log_scale(),
            series,
            options,
        ),
    }
}

fn draw_chart<DB, X, Y>(
    root: &DrawingArea<DB, Shift>,
    x_spec: X,
    y_spec: Y,
    series: &[Series],
    options: &RenderOptions,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    X: AsRangedCoord<Value = f64>,
    Y: AsRangedCoord<Value = f64>,
    X::CoordDescType: Ranged<ValueType = f64> + ValueFormatter<f64>,
    Y::CoordDescType: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_spec, y_spec)?;
    chart.configure_mesh().draw()?;

    for (index, one) in series.iter().enumerate() {
        let color = style::color_for(&options.colors, index);
        if options.bars {
            let fill = color.mix(options.alpha).filled();
            let half = bar_width(one) / 2.0;
            chart
                .draw_series(
                    one.points()
                        .map(|(x, y)| Rectangle::new([(x - half, 0.0), (x + half, y)], fill)),
                )?
                .label(one.label.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 4), (x + 12, y + 4)], color.filled())
                });
            continue;
        }
        if options.add_style.contains('-') {
            chart.draw_series(LineSeries::new(one.points(), &color))?;
        }
        let annotations = match style::marker_for(&options.shapes, index) {
            Marker::Dot(size) => chart.draw_series(
                one.points()
                    .map(|point| Circle::new(point, size, color.filled())),
            )?,
            Marker::Cross(size) => chart.draw_series(
                one.points()
                    .map(|point| Cross::new(point, size, &color)),
            )?,
            Marker::Triangle(size) => chart.draw_series(
                one.points()
                    .map(|point| TriangleMarker::new(point, size, color.filled())),
            )?,
            Marker::Pixel => chart.draw_series(
                one.points().map(|point| Pixel::new(point, &color)),
            )?,
        };
        annotations
            .label(one.label.as_str())
            .legend(move |(x, y)| Circle::new((x + 6, y), 3, color.filled()));
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .position(style::legend_position(&options.legend))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    root.present()?;
    Ok(())
}

/// Data extent of all series, fixed Y limits and log lower bounds applied.
fn ranges(series: &[Series], options: &RenderOptions) -> (Range<f64>, Range<f64>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for one in series {
        for (x, y) in one.points() {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    let x_range = if x_min.is_finite() {
        padded(x_min, x_max)
    } else {
        0.0..1.0
    };
    // Either Y limit being nonzero means the user fixed the Y range
    let y_range = if options.y_min != 0.0 || options.y_max != 0.0 {
        options.y_min..options.y_max
    } else if y_min.is_finite() {
        if options.bars {
            // Bars grow from the zero baseline
            y_min = y_min.min(0.0);
            y_max = y_max.max(0.0);
        }
        padded(y_min, y_max)
    } else {
        0.0..1.0
    };
    (
        clamp_for_log(x_range, options.x_log),
        clamp_for_log(y_range, options.y_log),
    )
}

fn padded(min: f64, max: f64) -> Range<f64> {
    if min == max {
        return (min - 0.5)..(max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

/// Bar width for a series: slightly under the smallest gap between X
/// values, so adjacent bars (histogram bins, typically) do not overlap.
fn bar_width(series: &Series) -> f64 {
    let mut xs = series.xs.clone();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mut gap = f64::INFINITY;
    for pair in xs.windows(2) {
        if pair[1] > pair[0] {
            gap = gap.min(pair[1] - pair[0]);
        }
    }
    if gap.is_finite() {
        gap * 0.9
    } else {
        0.8
    }
}

// A log axis needs a positive lower bound.
fn clamp_for_log(range: Range<f64>, log: bool) -> Range<f64> {
    if log && range.start <= 0.0 {
        let start = f64::MIN_POSITIVE.max(range.end / 1e6);
        start..range.end.max(start * 10.0)
    } else {
        range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn options() -> RenderOptions {
        RenderOptions {
            outfile: String::from("out.png"),
            colors: String::from("rbyg"),
            shapes: String::from("o"),
            add_style: String::new(),
            x_log: false,
            y_log: false,
            y_min: 0.0,
            y_max: 0.0,
            legend: String::from("upper left"),
            fig_width: 15.0,
            fig_height: 5.0,
            bars: false,
            alpha: 1.0,
        }
    }

    fn sample() -> Vec<Series> {
        let mut one = Series::new("one");
        one.push(0.0, 10.0);
        one.push(1.0, 30.0);
        one.push(2.0, 20.0);
        vec![one]
    }

    #[test]
    fn data_ranges() {
        let (xs, ys) = ranges(&sample(), &options());
        assert_float_eq!(xs.start, -0.1, abs <= 1e-9);
        assert_float_eq!(xs.end, 2.1, abs <= 1e-9);
        assert_float_eq!(ys.start, 9.0, abs <= 1e-9);
        assert_float_eq!(ys.end, 31.0, abs <= 1e-9);
    }

    #[test]
    fn fixed_y_range() {
        let mut opts = options();
        opts.y_min = 5.0;
        opts.y_max = 50.0;
        let (_, ys) = ranges(&sample(), &opts);
        assert_eq!(ys, 5.0..50.0);
    }

    #[test]
    fn empty_series_get_default_ranges() {
        let (xs, ys) = ranges(&[Series::new("empty")], &options());
        assert_eq!(xs, 0.0..1.0);
        assert_eq!(ys, 0.0..1.0);
    }

    #[test]
    fn degenerate_extent_is_widened() {
        let mut single = Series::new("single");
        single.push(4.0, 7.0);
        let (xs, ys) = ranges(&[single], &options());
        assert_eq!(xs, 3.5..4.5);
        assert_eq!(ys, 6.5..7.5);
    }

    #[test]
    fn log_axis_lower_bound_is_positive() {
        let mut opts = options();
        opts.y_log = true;
        let mut negative = Series::new("negative");
        negative.push(0.0, -5.0);
        negative.push(1.0, 100.0);
        let (_, ys) = ranges(&[negative], &opts);
        assert!(ys.start > 0.0);
        assert!(ys.end > ys.start);
    }

    #[test]
    fn bars_include_zero_baseline() {
        let mut opts = options();
        opts.bars = true;
        let (_, ys) = ranges(&sample(), &opts);
        assert!(ys.start <= 0.0);
    }

    #[test]
    fn bar_width_from_min_gap() {
        let mut series = Series::new("bins");
        series.push(0.0, 2.0);
        series.push(2.0, 1.0);
        series.push(3.0, 4.0);
        assert_float_eq!(bar_width(&series), 0.9, abs <= 1e-9);
    }

    #[test]
    fn bar_width_single_point() {
        let mut series = Series::new("one");
        series.push(5.0, 2.0);
        assert_float_eq!(bar_width(&series), 0.8, abs <= 1e-9);
    }

    #[test]
    fn renders_a_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut opts = options();
        opts.outfile = String::from(path.to_str().unwrap());
        render(&sample(), &opts).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn renders_an_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        let mut opts = options();
        opts.outfile = String::from(path.to_str().unwrap());
        opts.bars = true;
        opts.alpha = 0.5;
        render(&sample(), &opts).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("<svg"));
    }
}
