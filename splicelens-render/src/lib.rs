//! Headless figure layout for splice-site read support.
//!
//! A figure relates a genome-wide overview (gene model lanes, mean read
//! support per base) to zoomed detail panels around every donor or acceptor
//! site. Layout is pure: [render_figure] turns a transcript model and its
//! site tracks into a [Scene] of named draw layers, and [SvgBackend] writes
//! that scene out.
//!
//! # Example
//!
//! ```no_run
//! use splicelens_core::models::{CountTrack, SiteCategory, TranscriptModel};
//! use splicelens_render::{RenderConfig, SiteTrack, StripAllocator, SvgBackend, render_figure};
//!
//! let model = TranscriptModel::try_from("genes.gtf").unwrap();
//! let donors = CountTrack::try_from("donor_counts.tsv").unwrap();
//! let tracks = vec![SiteTrack::from_counts(SiteCategory::Donor, donors)];
//!
//! let scene = render_figure(&model, &tracks, &RenderConfig::default(), &StripAllocator::default())
//!     .unwrap();
//! SvgBackend::default().save(&scene, "figure.svg").unwrap();
//! ```

pub mod boxplot;
pub mod config;
pub mod errors;
pub mod export;
pub mod figure;
pub mod layout;
pub mod logo;
pub mod overview;
pub mod primitives;
pub mod scale;
pub mod zoom;

// re-exports
pub use config::RenderConfig;
pub use errors::RenderError;
pub use export::SvgBackend;
pub use figure::render_figure;
pub use layout::{PanelAllocator, StripAllocator};
pub use primitives::{DrawCommand, Layer, Scene};
pub use zoom::SiteTrack;
