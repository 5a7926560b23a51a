//! Figure geometry: grid rows, detail-slot allocation along a zoom strip,
//! and the overview-to-detail mappings that connectors are drawn from.

use log::debug;
use serde::Serialize;

use crate::primitives::{DrawCommand, Style};
use crate::scale::LinearScale;

/// Smallest half-width of an overview interval, so a connector never
/// degenerates to a line on long genomes.
pub const MIN_OVERVIEW_HALF_WIDTH: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Split vertically into `n` equal bands.
    pub fn split_rows(&self, n: usize) -> Vec<Rect> {
        if n == 0 {
            return Vec::new();
        }
        let h = self.height / n as f64;
        (0..n)
            .map(|i| Rect::new(self.x, self.y + i as f64 * h, self.width, h))
            .collect()
    }

    /// Same horizontal extent, different vertical band.
    pub fn with_rows_of(&self, band: &Rect) -> Rect {
        Rect::new(self.x, band.y, self.width, band.height)
    }
}

/// Maps row ratios onto pixel rectangles inside a margin.
pub struct PanelGrid;

impl PanelGrid {
    pub fn rows(width: f64, height: f64, margin: f64, ratios: &[f64]) -> Vec<Rect> {
        let total: f64 = ratios.iter().sum();
        let inner_width = width - 2.0 * margin;
        let inner_height = height - 2.0 * margin;

        let mut y = margin;
        ratios
            .iter()
            .map(|ratio| {
                let h = if total > 0.0 {
                    inner_height * ratio / total
                } else {
                    0.0
                };
                let rect = Rect::new(margin, y, inner_width, h);
                y += h;
                rect
            })
            .collect()
    }
}

/// Pairs a narrow interval on the overview axis with the wider pixel
/// interval of the detail panel that expands it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomMapping {
    pub overview_interval: (f64, f64),
    pub detail_interval: (f64, f64),
}

impl ZoomMapping {
    ///
    /// Trapezoid connector: top edge on the overview interval at `y_top`,
    /// bottom edge on the detail interval at `y_bottom`.
    ///
    pub fn connector(&self, y_top: f64, y_bottom: f64, style: Style) -> DrawCommand {
        DrawCommand::Polygon {
            points: vec![
                (self.overview_interval.0, y_top),
                (self.overview_interval.1, y_top),
                (self.detail_interval.1, y_bottom),
                (self.detail_interval.0, y_bottom),
            ],
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSlot {
    pub position: u32,
    pub rect: Rect,
    pub mapping: ZoomMapping,
}

/// What a [PanelAllocator] is asked to place.
#[derive(Debug, Clone)]
pub struct AllocationRequest<'a> {
    /// Continuous coordinate space (genome length in bases)
    pub genome_length: u32,
    /// Ascending site positions, one slot each
    pub positions: &'a [u32],
    /// Requested slot width in pixels
    pub element_width: f64,
    /// Strip the slots must fit in; the overview axis spans the same x extent
    pub strip: Rect,
    /// Bases covered by one detail panel, projected onto the overview axis
    pub window_bases: u32,
}

impl AllocationRequest<'_> {
    pub fn overview_scale(&self) -> LinearScale {
        LinearScale::new(
            (0.0, self.genome_length as f64),
            (self.strip.x, self.strip.right()),
        )
    }

    /// Midpoint-centered overview interval of the window around `position`.
    pub fn overview_interval(&self, position: u32) -> (f64, f64) {
        let scale = self.overview_scale();
        let center = scale.map(position as f64 + 0.5);
        let half = (self.window_bases as f64 * scale.unit_width() / 2.0)
            .max(MIN_OVERVIEW_HALF_WIDTH);
        (center - half, center + half)
    }
}

/// Places fixed-width detail panels along a strip.
pub trait PanelAllocator {
    /// One slot per requested position, in the same order.
    fn allocate(&self, request: &AllocationRequest) -> Vec<PanelSlot>;
}

///
/// Packs slots as close to their sites' overview coordinates as possible,
/// left to right without overlap, shifting back from the right edge when the
/// strip overflows and narrowing every slot when they can't all fit.
///
#[derive(Debug, Clone)]
pub struct StripAllocator {
    pub gap: f64,
}

impl Default for StripAllocator {
    fn default() -> Self {
        StripAllocator { gap: 8.0 }
    }
}

impl PanelAllocator for StripAllocator {
    fn allocate(&self, request: &AllocationRequest) -> Vec<PanelSlot> {
        let n = request.positions.len();
        if n == 0 {
            return Vec::new();
        }

        let strip = request.strip;
        let mut width = request.element_width;
        let mut gap = self.gap;

        let needed = n as f64 * width + (n - 1) as f64 * gap;
        if needed > strip.width {
            let shrink = strip.width / needed;
            width *= shrink;
            gap *= shrink;
            debug!(
                "{} slots need {:.1}px of {:.1}px, shrinking by {:.3}",
                n, needed, strip.width, shrink
            );
        }

        let scale = request.overview_scale();
        let max_left = strip.right() - width;

        // forward pass: ideal position, pushed right past the previous slot
        let mut lefts: Vec<f64> = Vec::with_capacity(n);
        for (i, &position) in request.positions.iter().enumerate() {
            let ideal = (scale.map(position as f64 + 0.5) - width / 2.0)
                .clamp(strip.x, max_left.max(strip.x));
            let left = match i {
                0 => ideal,
                _ => ideal.max(lefts[i - 1] + width + gap),
            };
            lefts.push(left);
        }

        // backward pass: pull overflowing slots back inside the strip
        if let Some(last) = lefts.last_mut() {
            *last = last.min(max_left);
        }
        for i in (0..n.saturating_sub(1)).rev() {
            lefts[i] = lefts[i].min(lefts[i + 1] - width - gap);
        }

        request
            .positions
            .iter()
            .zip(lefts)
            .map(|(&position, left)| {
                let rect = Rect::new(left, strip.y, width, strip.height);
                PanelSlot {
                    position,
                    rect,
                    mapping: ZoomMapping {
                        overview_interval: request.overview_interval(position),
                        detail_interval: (rect.x, rect.right()),
                    },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn request(positions: &[u32], element_width: f64) -> AllocationRequest<'_> {
        AllocationRequest {
            genome_length: 1000,
            positions,
            element_width,
            strip: Rect::new(0.0, 50.0, 1000.0, 100.0),
            window_bases: 21,
        }
    }

    fn assert_no_overlap_inside_strip(slots: &[PanelSlot], strip: &Rect) {
        for slot in slots {
            assert!(slot.rect.x >= strip.x - 1e-9);
            assert!(slot.rect.right() <= strip.right() + 1e-9);
        }
        for pair in slots.windows(2) {
            assert!(pair[0].rect.right() <= pair[1].rect.x + 1e-9);
        }
    }

    #[rstest]
    fn test_grid_rows_follow_ratios() {
        let rows = PanelGrid::rows(200.0, 120.0, 10.0, &[1.0, 3.0]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], Rect::new(10.0, 10.0, 180.0, 25.0));
        assert_eq!(rows[1], Rect::new(10.0, 35.0, 180.0, 75.0));
    }

    #[rstest]
    fn test_sparse_sites_sit_under_their_coordinates() {
        let positions = [100, 500, 900];
        let slots = StripAllocator { gap: 5.0 }.allocate(&request(&positions, 50.0));

        assert_eq!(slots.len(), 3);
        for slot in &slots {
            let center = slot.position as f64 + 0.5;
            assert!((slot.rect.center_x() - center).abs() < 1e-9);
            assert_eq!(slot.rect.width, 50.0);
        }
    }

    #[rstest]
    fn test_crowded_sites_are_spread_without_overlap() {
        let positions = [500, 501, 502, 503];
        let req = request(&positions, 50.0);
        let slots = StripAllocator { gap: 5.0 }.allocate(&req);
        assert_no_overlap_inside_strip(&slots, &req.strip);
    }

    #[rstest]
    fn test_sites_at_right_edge_are_pulled_back() {
        let positions = [995, 996, 997];
        let req = request(&positions, 100.0);
        let slots = StripAllocator { gap: 0.0 }.allocate(&req);
        assert_no_overlap_inside_strip(&slots, &req.strip);
        assert!((slots[2].rect.right() - 1000.0).abs() < 1e-9);
    }

    #[rstest]
    fn test_too_many_slots_are_narrowed() {
        let positions: Vec<u32> = (0..40).map(|i| i * 20).collect();
        let req = request(&positions, 100.0);
        let slots = StripAllocator { gap: 5.0 }.allocate(&req);

        assert_eq!(slots.len(), 40);
        assert!(slots[0].rect.width < 100.0);
        assert_no_overlap_inside_strip(&slots, &req.strip);
    }

    #[rstest]
    fn test_mapping_connects_overview_to_slot() {
        let positions = [250];
        let slots = StripAllocator::default().allocate(&request(&positions, 80.0));
        let mapping = slots[0].mapping;

        // 21 bases over a 1px-per-base axis, centred on the site midpoint
        assert!((mapping.overview_interval.0 - 240.0).abs() < 1e-9);
        assert!((mapping.overview_interval.1 - 261.0).abs() < 1e-9);
        assert_eq!(mapping.detail_interval, (slots[0].rect.x, slots[0].rect.right()));
    }

    #[rstest]
    fn test_empty_request() {
        assert!(StripAllocator::default().allocate(&request(&[], 10.0)).is_empty());
    }

    #[rstest]
    fn test_connector_is_trapezoid() {
        let mapping = ZoomMapping {
            overview_interval: (10.0, 12.0),
            detail_interval: (0.0, 40.0),
        };
        match mapping.connector(5.0, 25.0, Style::filled("#ccc")) {
            DrawCommand::Polygon { points, .. } => assert_eq!(
                points,
                vec![(10.0, 5.0), (12.0, 5.0), (40.0, 25.0), (0.0, 25.0)]
            ),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
