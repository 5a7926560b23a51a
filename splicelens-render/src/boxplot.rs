//! Box-and-whisker glyphs for per-position score distributions.

use serde::Serialize;

use splicelens_core::models::IntervalCollection;
use splicelens_stats::{FiveNumberSummary, PerBaseStatistics};

use crate::primitives::{DrawCommand, Style};
use crate::scale::LinearScale;

/// Padding applied to the score extent when no y-scale is supplied.
pub const FALLBACK_Y_PADDING: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct BoxPlotOptions {
    pub box_width: f64,
    pub show_outliers: bool,
    pub fill: String,
    pub stroke: String,
}

impl Default for BoxPlotOptions {
    fn default() -> Self {
        BoxPlotOptions {
            box_width: 6.0,
            show_outliers: true,
            fill: "#9ecae1".to_string(),
            stroke: "#08306b".to_string(),
        }
    }
}

/// Pixel geometry of one box, plus the summary it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGeometry {
    pub summary: FiveNumberSummary,
    pub x_center: f64,
    pub box_top: f64,
    pub box_bottom: f64,
    pub median_y: f64,
    pub whisker_top: f64,
    pub whisker_bottom: f64,
    /// Outlier values and their (range-clamped) y coordinates
    pub outliers: Vec<(f64, f64)>,
}

///
/// y-scale over the 10%-padded extent of every score in the track.
/// `None` for an empty track.
///
pub fn fallback_y_scale(track: &IntervalCollection, range: (f64, f64)) -> Option<LinearScale> {
    let min = track.iter().map(|r| r.score).reduce(f64::min)?;
    let max = track.iter().map(|r| r.score).reduce(f64::max)?;
    Some(LinearScale::padded(min, max, FALLBACK_Y_PADDING, range))
}

///
/// Lay out one box per position holding scores, ascending by position.
/// Positions without scores get no box.
///
/// # Arguments
/// - track: scores, gap-filled beforehand if continuity matters
/// - x_scale: position to pixel
/// - y_scale: score to pixel; derived from the data when `None`
/// - y_range: pixel range used for the derived y-scale
pub fn layout_boxes(
    track: &IntervalCollection,
    x_scale: &LinearScale,
    y_scale: Option<&LinearScale>,
    y_range: (f64, f64),
) -> Vec<BoxGeometry> {
    let derived;
    let y_scale = match y_scale {
        Some(scale) => scale,
        None => match fallback_y_scale(track, y_range) {
            Some(scale) => {
                derived = scale;
                &derived
            }
            None => return Vec::new(),
        },
    };

    let y = |value: f64| y_scale.clamp_pixel(y_scale.map(value));

    track
        .five_number_summaries()
        .into_iter()
        .map(|summary| BoxGeometry {
            x_center: x_scale.map(summary.position as f64),
            box_top: y(summary.q3),
            box_bottom: y(summary.q1),
            median_y: y(summary.median),
            whisker_top: y(summary.adjusted_max),
            whisker_bottom: y(summary.adjusted_min),
            outliers: summary.outliers.iter().map(|&v| (v, y(v))).collect(),
            summary,
        })
        .collect()
}

impl BoxGeometry {
    pub fn commands(&self, options: &BoxPlotOptions) -> Vec<DrawCommand> {
        let half = options.box_width / 2.0;
        let cap = half / 2.0;
        let left = self.x_center - half;
        let stroke = Style::stroked(&options.stroke, 1.0);

        let mut commands = vec![
            // whiskers first so the box covers them
            DrawCommand::line(
                self.x_center,
                self.box_top,
                self.x_center,
                self.whisker_top,
                stroke.clone(),
            ),
            DrawCommand::line(
                self.x_center,
                self.box_bottom,
                self.x_center,
                self.whisker_bottom,
                stroke.clone(),
            ),
            DrawCommand::line(
                self.x_center - cap,
                self.whisker_top,
                self.x_center + cap,
                self.whisker_top,
                stroke.clone(),
            ),
            DrawCommand::line(
                self.x_center - cap,
                self.whisker_bottom,
                self.x_center + cap,
                self.whisker_bottom,
                stroke.clone(),
            ),
            DrawCommand::Rect {
                x: left,
                y: self.box_top,
                width: options.box_width,
                height: self.box_bottom - self.box_top,
                style: stroke.clone().with_fill(&options.fill),
            },
            DrawCommand::line(
                left,
                self.median_y,
                left + options.box_width,
                self.median_y,
                Style::stroked(&options.stroke, 2.0),
            ),
        ];

        if options.show_outliers {
            let r = (options.box_width / 6.0).clamp(1.0, 3.0);
            commands.extend(self.outliers.iter().map(|&(_, cy)| DrawCommand::Circle {
                cx: self.x_center,
                cy,
                r,
                style: Style::stroked(&options.stroke, 0.8).with_fill("none"),
            }));
        }

        commands
    }
}

/// Box-plot drawing commands for a whole track, position-ascending.
pub fn render_box_plot(
    track: &IntervalCollection,
    x_scale: &LinearScale,
    y_scale: Option<&LinearScale>,
    y_range: (f64, f64),
    options: &BoxPlotOptions,
) -> Vec<DrawCommand> {
    layout_boxes(track, x_scale, y_scale, y_range)
        .iter()
        .flat_map(|b| b.commands(options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use splicelens_core::models::ScoredInterval;

    fn track(points: &[(u32, f64)]) -> IntervalCollection {
        points
            .iter()
            .map(|&(p, s)| ScoredInterval::per_base("chr1", p, s))
            .collect()
    }

    fn circles(commands: &[DrawCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    #[rstest]
    fn test_geometry_against_supplied_scale() {
        let t = track(&[(5, 1.0), (5, 2.0), (5, 3.0), (5, 4.0), (5, 5.0)]);
        let x_scale = LinearScale::new((4.5, 5.5), (0.0, 10.0));
        let y_scale = LinearScale::new((0.0, 10.0), (100.0, 0.0));

        let boxes = layout_boxes(&t, &x_scale, Some(&y_scale), (100.0, 0.0));
        assert_eq!(boxes.len(), 1);

        let b = &boxes[0];
        assert_eq!(b.x_center, 5.0);
        assert_eq!(b.box_top, 60.0);
        assert_eq!(b.box_bottom, 80.0);
        assert_eq!(b.median_y, 70.0);
        assert_eq!(b.whisker_top, 50.0);
        assert_eq!(b.whisker_bottom, 90.0);
        assert!(b.outliers.is_empty());
    }

    #[rstest]
    fn test_outliers_toggle() {
        let t = track(&[(1, 1.0), (1, 2.0), (1, 2.0), (1, 2.0), (1, 100.0)]);
        let x_scale = LinearScale::new((0.5, 1.5), (0.0, 10.0));

        let with = render_box_plot(&t, &x_scale, None, (100.0, 0.0), &BoxPlotOptions::default());
        let without = render_box_plot(
            &t,
            &x_scale,
            None,
            (100.0, 0.0),
            &BoxPlotOptions {
                show_outliers: false,
                ..Default::default()
            },
        );

        // 1 and 100 fall outside the zero-width fences
        assert_eq!(circles(&with), 2);
        assert_eq!(circles(&without), 0);
        // box, median, two whiskers and two caps either way
        assert_eq!(without.len(), 6);
    }

    #[rstest]
    fn test_fallback_scale_is_padded() {
        let t = track(&[(1, 0.0), (2, 10.0)]);
        let scale = fallback_y_scale(&t, (100.0, 0.0)).unwrap();
        assert_eq!(scale.domain, (-1.0, 11.0));
        assert!(fallback_y_scale(&IntervalCollection::default(), (1.0, 0.0)).is_none());
    }

    #[rstest]
    fn test_boxes_are_position_ascending_and_skip_empty_positions() {
        let t = track(&[(9, 1.0), (3, 1.0), (6, 2.0)]);
        let x_scale = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        let positions: Vec<u32> = layout_boxes(&t, &x_scale, None, (10.0, 0.0))
            .iter()
            .map(|b| b.summary.position)
            .collect();
        assert_eq!(positions, vec![3, 6, 9]);
    }

    #[rstest]
    fn test_outlier_above_axis_is_clamped_to_panel() {
        let t = track(&[(1, 1.0), (1, 2.0), (1, 2.0), (1, 2.0), (1, 100.0)]);
        let x_scale = LinearScale::new((0.5, 1.5), (0.0, 10.0));
        let y_scale = LinearScale::new((0.0, 2.0), (50.0, 0.0));

        let b = &layout_boxes(&t, &x_scale, Some(&y_scale), (50.0, 0.0))[0];
        assert_eq!(b.outliers.last(), Some(&(100.0, 0.0)));
        assert_eq!(b.whisker_top, 0.0);
    }
}
