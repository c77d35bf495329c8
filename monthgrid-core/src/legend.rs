//! Absence-type legend strip: a label followed by one swatch per type.

use absence_core::DataProvider;
use tiny_skia::Pixmap;
use tracing::debug;

use crate::error::RenderError;
use crate::geometry::PixelRect;
use crate::month::{BACKGROUND, FONT_SIZE, TEXT_COLOR};
use crate::raster::{Rasterizer, encode_png, rgba_at};
use crate::scene::Scene;

pub const LEGEND_PADDING: i32 = 5;
pub const LEGEND_HEIGHT: i32 = 30;
const LEGEND_LABEL: &str = "Legend:";

/// One caption of the legend; the leading label has no swatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
    pub caption: String,
    pub color: Option<String>,
    pub swatch: Option<PixelRect>,
}

/// Horizontal key of absence types and their colors.
pub struct Legend<'a> {
    raster: &'a Rasterizer,
}

impl<'a> Legend<'a> {
    pub fn new(raster: &'a Rasterizer) -> Self {
        Self { raster }
    }

    pub fn build(&self, provider: &dyn DataProvider) -> Result<RenderedLegend, RenderError> {
        let font = self.raster.font();
        let types = provider.absence_types()?;

        let mut items = vec![(LEGEND_LABEL.to_string(), None)];
        items.extend(types.into_iter().map(|t| (t.name, Some(t.color))));
        let measured: Vec<(String, Option<String>, i32)> = items
            .into_iter()
            .map(|(caption, color)| {
                let w = font.text_width(&caption, FONT_SIZE).ceil() as i32;
                (caption, color, w)
            })
            .collect();

        let width = LEGEND_PADDING
            + measured
                .iter()
                .map(|(_, _, w)| w + 3 * LEGEND_PADDING)
                .sum::<i32>();
        let mut scene = Scene::new(width as u32, LEGEND_HEIGHT as u32, BACKGROUND);
        let text_y = LEGEND_HEIGHT as f64 / 4.0;

        let mut entries = Vec::with_capacity(measured.len());
        let mut x1 = LEGEND_PADDING;
        for (caption, color, w) in measured {
            let x2 = x1 + w + 2 * LEGEND_PADDING;
            let swatch = match &color {
                Some(c) => {
                    let r = PixelRect::new(x1, LEGEND_PADDING, x2, LEGEND_HEIGHT - LEGEND_PADDING);
                    scene.fill(r, c.as_str());
                    scene.text(
                        ((x1 + LEGEND_PADDING) as f64, text_y),
                        FONT_SIZE,
                        TEXT_COLOR,
                        &caption,
                    );
                    Some(r)
                }
                None => {
                    scene.text((x1 as f64, text_y), FONT_SIZE, TEXT_COLOR, &caption);
                    None
                }
            };
            entries.push(LegendEntry {
                caption,
                color,
                swatch,
            });
            x1 = x2 + LEGEND_PADDING;
        }

        let pixmap = self.raster.render(&scene)?;
        let png = encode_png(&pixmap)?;
        debug!(width, entries = entries.len(), "rendered legend");
        Ok(RenderedLegend {
            png,
            pixmap,
            entries,
        })
    }
}

pub struct RenderedLegend {
    png: Vec<u8>,
    pixmap: Pixmap,
    entries: Vec<LegendEntry>,
}

impl RenderedLegend {
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn into_png(self) -> Vec<u8> {
        self.png
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        rgba_at(&self.pixmap, x, y)
    }
}
