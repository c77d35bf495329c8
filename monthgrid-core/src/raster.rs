//! Scene → pixels → PNG.

use std::sync::Arc;

use fonts::FontAsset;
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use tiny_skia::Pixmap;
use tracing::debug;

use crate::error::RenderError;
use crate::scene::Scene;

/// Rasterizes scenes with one font mapped onto the generic families.
pub struct Rasterizer {
    font: FontAsset,
    opt: usvg::Options<'static>,
}

impl Rasterizer {
    pub fn new(font: &FontAsset) -> Self {
        let mut opt = usvg::Options::default();
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_font_data(font.bytes().to_vec());
        // Map generic families to the loaded face
        let family_name = fontdb
            .faces()
            .next()
            .and_then(|face| face.families.first().map(|(n, _)| n.clone()));
        if let Some(name) = family_name {
            fontdb.set_sans_serif_family(name.clone());
            fontdb.set_monospace_family(name);
        }
        opt.fontdb = Arc::new(fontdb);
        Self {
            font: font.clone(),
            opt,
        }
    }

    pub fn font(&self) -> &FontAsset {
        &self.font
    }

    pub fn render(&self, scene: &Scene) -> Result<Pixmap, RenderError> {
        let svg = scene.to_svg(&self.font);
        let tree = usvg::Tree::from_str(&svg, &self.opt)?;
        let (width, height) = (scene.width(), scene.height());
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::PixmapAlloc { width, height })?;
        let mut pm = pixmap.as_mut();
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pm);
        debug!(width, height, commands = scene.commands().len(), "rasterized scene");
        Ok(pixmap)
    }
}

/// PNG bytes of a pixmap; identical pixels always give identical bytes.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, png::EncodingError> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        enc.set_filter(FilterType::NoFilter);
        enc.set_compression(Compression::Default);
        let mut writer = enc.write_header()?;
        writer.write_image_data(pixmap.data())?;
    }
    Ok(buf)
}

/// Straight RGBA of one pixel.
pub(crate) fn rgba_at(pixmap: &Pixmap, x: u32, y: u32) -> Option<[u8; 4]> {
    let c = pixmap.pixel(x, y)?.demultiply();
    Some([c.red(), c.green(), c.blue(), c.alpha()])
}
