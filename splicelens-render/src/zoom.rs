//! Zoom strip orchestration.
//!
//! For one site category the strip is built in two phases: [ZoomOrchestrator::plan]
//! sorts the sites, asks the allocator for slots and fixes the track-wide
//! y-axis; [ZoomOrchestrator::detail_panels] then windows, gap-fills and lays
//! out every panel against that shared axis.

use log::{debug, info};

use splicelens_core::models::{CountTrack, IntervalCollection, SiteCategory, TranscriptModel};
use splicelens_stats::gap_fill::PLACEHOLDER_SEQID;
use splicelens_stats::{PerBaseStatistics, PlaceholderFields, fill_gaps};

use crate::boxplot::{BoxGeometry, BoxPlotOptions, layout_boxes};
use crate::config::RenderConfig;
use crate::errors::RenderError;
use crate::layout::{AllocationRequest, PanelAllocator, PanelSlot, Rect};
use crate::logo::stack_glyphs;
use crate::overview::panel_frame;
use crate::primitives::{DrawCommand, Style, TextAnchor};
use crate::scale::LinearScale;

/// Fraction of a per-position slot taken by its box.
pub const BOX_WIDTH_FRACTION: f64 = 0.7;

const CONNECTOR_FILL: &str = "#c6dbef";

/// Scores (and optionally raw nucleotide counts) for one site category.
#[derive(Debug, Clone)]
pub struct SiteTrack {
    pub category: SiteCategory,
    /// Per-base records
    pub scores: IntervalCollection,
    pub counts: Option<CountTrack>,
}

impl SiteTrack {
    pub fn new(category: SiteCategory, scores: IntervalCollection) -> SiteTrack {
        SiteTrack {
            category,
            scores: scores.explode(),
            counts: None,
        }
    }

    /// Scores are the per-row read depth of the count table.
    pub fn from_counts(category: SiteCategory, counts: CountTrack) -> SiteTrack {
        SiteTrack {
            category,
            scores: counts.to_scored_intervals(),
            counts: Some(counts),
        }
    }

    pub fn with_counts(mut self, counts: CountTrack) -> SiteTrack {
        self.counts = Some(counts);
        self
    }

    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    fn seqid(&self) -> Option<&str> {
        self.scores.iter().next().map(|r| r.seqid.as_str())
    }
}

/// Inclusive window `[site - zoom_width, site + zoom_width]`, clipped at 0.
pub fn site_window(site: u32, zoom_width: u32) -> (u32, u32) {
    (site.saturating_sub(zoom_width), site.saturating_add(zoom_width))
}

///
/// Upper bound shared by every detail panel of a track: the largest
/// non-outlier score over the whole track, or 1 when there is nothing
/// positive to scale to.
///
pub fn shared_y_max(track: &IntervalCollection) -> f64 {
    track
        .robust_axis_max()
        .filter(|m| *m > 0.0)
        .unwrap_or(1.0)
}

/// Result of the first phase: where each site's panel goes and the y-axis
/// all panels share.
#[derive(Debug, Clone)]
pub struct ZoomPlan {
    pub category: SiteCategory,
    /// Ascending
    pub sites: Vec<u32>,
    pub slots: Vec<PanelSlot>,
    pub y_max: f64,
}

/// A laid-out detail panel.
#[derive(Debug, Clone)]
pub struct DetailPanel {
    pub site: u32,
    pub window: (u32, u32),
    pub slot: PanelSlot,
    pub y_scale: LinearScale,
    pub boxes: Vec<BoxGeometry>,
    pub logo: Vec<DrawCommand>,
}

/// Bands of the figure a zoom strip occupies, top to bottom.
#[derive(Debug, Clone, Copy)]
pub struct ZoomBands {
    pub connector: Rect,
    pub boxes: Rect,
    pub logos: Option<Rect>,
}

/// Drawing commands of one zoom strip, split by layer.
#[derive(Debug, Clone, Default)]
pub struct ZoomLayers {
    pub connectors: Vec<DrawCommand>,
    pub panels: Vec<DrawCommand>,
    pub logos: Vec<DrawCommand>,
}

pub struct ZoomOrchestrator<'a, A: PanelAllocator + ?Sized> {
    pub model: &'a TranscriptModel,
    pub allocator: &'a A,
    pub config: &'a RenderConfig,
}

impl<'a, A: PanelAllocator + ?Sized> ZoomOrchestrator<'a, A> {
    pub fn new(model: &'a TranscriptModel, allocator: &'a A, config: &'a RenderConfig) -> Self {
        ZoomOrchestrator {
            model,
            allocator,
            config,
        }
    }

    ///
    /// Sort the track's sites, allocate one slot per site inside `strip` and
    /// compute the shared y-axis over the entire track.
    ///
    pub fn plan(&self, track: &SiteTrack, strip: Rect) -> ZoomPlan {
        let sites: Vec<u32> = self.model.sites(track.category).into_iter().collect();

        let request = AllocationRequest {
            genome_length: self.model.genome_length(),
            positions: &sites,
            element_width: self.config.slot_width,
            strip,
            window_bases: self.config.zoom_width.saturating_mul(2).saturating_add(1),
        };
        let slots = self.allocator.allocate(&request);
        let y_max = shared_y_max(&track.scores);

        info!(
            "{}: {} sites, shared y-axis max {:.2}",
            track.label(),
            sites.len(),
            y_max
        );

        ZoomPlan {
            category: track.category,
            sites,
            slots,
            y_max,
        }
    }

    ///
    /// Window, gap-fill and lay out every planned panel, ascending by site.
    /// The box rows use the slot rectangles; logos go in `logo_band` when one
    /// is given and the track carries counts.
    ///
    pub fn detail_panels(
        &self,
        plan: &ZoomPlan,
        track: &SiteTrack,
        logo_band: Option<&Rect>,
    ) -> Result<Vec<DetailPanel>, RenderError> {
        let seqid = track.seqid().unwrap_or(PLACEHOLDER_SEQID);
        let placeholders = PlaceholderFields::with_seqid(seqid);

        let mut panels = Vec::with_capacity(plan.slots.len());
        for slot in &plan.slots {
            let (lo, hi) = site_window(slot.position, self.config.zoom_width);
            let window = track.scores.window(lo, hi);
            let filled = fill_gaps(&window, lo, hi, &placeholders)?;

            let rect = slot.rect;
            let x_scale = LinearScale::new(
                (lo as f64 - 0.5, hi as f64 + 0.5),
                (rect.x, rect.right()),
            );
            let y_scale = LinearScale::new((0.0, plan.y_max), (rect.bottom(), rect.y));
            let boxes = layout_boxes(&filled, &x_scale, Some(&y_scale), y_scale.range);

            let logo = match (logo_band, &track.counts) {
                (Some(band), Some(counts)) if self.config.show_logos => {
                    stack_glyphs(counts.range(lo, hi), &x_scale, &rect.with_rows_of(band))
                }
                _ => Vec::new(),
            };

            debug!(
                "{} site {}: window [{}, {}], {} records after gap fill",
                track.label(),
                slot.position,
                lo,
                hi,
                filled.len()
            );

            panels.push(DetailPanel {
                site: slot.position,
                window: (lo, hi),
                slot: slot.clone(),
                y_scale,
                boxes,
                logo,
            });
        }

        Ok(panels)
    }

    ///
    /// Second phase: connector, panel and logo commands for a plan made
    /// against `bands.boxes`.
    ///
    pub fn draw(
        &self,
        plan: &ZoomPlan,
        track: &SiteTrack,
        bands: &ZoomBands,
    ) -> Result<ZoomLayers, RenderError> {
        let panels = self.detail_panels(plan, track, bands.logos.as_ref())?;

        let mut layers = ZoomLayers::default();
        for panel in &panels {
            layers.connectors.push(panel.slot.mapping.connector(
                bands.connector.y,
                bands.connector.bottom(),
                Style::filled(CONNECTOR_FILL).with_opacity(0.6),
            ));
            layers.panels.extend(panel.commands(self.config.show_outliers));
            layers.logos.extend(panel.logo.iter().cloned());
        }

        Ok(layers)
    }
}

impl DetailPanel {
    /// Frame, site label and boxes.
    pub fn commands(&self, show_outliers: bool) -> Vec<DrawCommand> {
        let rect = self.slot.rect;
        let n = (self.window.1 - self.window.0 + 1) as f64;
        let options = BoxPlotOptions {
            box_width: rect.width / n * BOX_WIDTH_FRACTION,
            show_outliers,
            ..Default::default()
        };

        let mut commands = vec![
            panel_frame(&rect),
            DrawCommand::text(
                rect.center_x(),
                rect.y + 10.0,
                self.site.to_string(),
                9.0,
                TextAnchor::Middle,
            ),
        ];
        commands.extend(self.boxes.iter().flat_map(|b| b.commands(&options)));
        commands
    }
}
