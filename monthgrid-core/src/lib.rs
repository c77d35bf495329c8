//! Calendar-grid rendering: one month of absences as a PNG with a matching
//! clickable-region map, plus the absence-type legend.
//!
//! Drawing goes through an ordered [`Scene`] of commands serialized to SVG
//! and rasterized with resvg. Regions are computed from the same
//! [`Geometry`] rectangles the scene was given, so the map and the image
//! cannot drift apart.

pub mod error;
pub mod geometry;
pub mod legend;
pub mod month;
pub mod raster;
pub mod regions;
pub mod scene;

pub use error::RenderError;
pub use geometry::{Geometry, PixelRect, RowAssignment};
pub use legend::{Legend, LegendEntry, RenderedLegend};
pub use month::{DrawnAbsence, MonthGrid, RenderedMonth};
pub use raster::{Rasterizer, encode_png};
pub use regions::{Action, LinkBuilder, Region, RegionMap, RouteLinks, Shape};
pub use scene::{DrawCommand, Scene};

use absence_core::{DataProvider, RenderConfig, Viewer};
use fonts::FontAsset;

/// Renders `year`/`month` (defaulting to today's) for `viewer` with the
/// configured font and the standard absence routes.
pub fn render_month(
    config: &RenderConfig,
    viewer: &Viewer,
    provider: &dyn DataProvider,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<RenderedMonth, RenderError> {
    let font = FontAsset::load(&config.font_path)?;
    let raster = Rasterizer::new(&font);
    let links = RouteLinks::default();
    MonthGrid::new(config, viewer, &links, &raster).build(provider, year, month)
}

/// Renders the legend with the configured font.
pub fn render_legend(
    config: &RenderConfig,
    provider: &dyn DataProvider,
) -> Result<RenderedLegend, RenderError> {
    let font = FontAsset::load(&config.font_path)?;
    Legend::new(&Rasterizer::new(&font)).build(provider)
}
