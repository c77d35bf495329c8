//! Font asset used for every caption the renderers draw.
//!
//! The same bytes feed the rasterizer's font database and the glyph-advance
//! measurement used for layout, so measured widths and drawn glyphs come
//! from one face.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use ttf_parser::{Face, GlyphId};

#[derive(Debug, Error)]
pub enum FontError {
    #[error("cannot read font {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a usable font face: {0}")]
    Parse(#[from] ttf_parser::FaceParsingError),

    #[error("font face has zero units per em")]
    NoMetrics,
}

/// A parsed-once, cheaply clonable font face.
#[derive(Clone, Debug)]
pub struct FontAsset {
    data: Arc<Vec<u8>>,
    units_per_em: u16,
    ascender: i16,
}

impl FontAsset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        let (units_per_em, ascender) = {
            let face = Face::parse(&data, 0)?;
            (face.units_per_em(), face.ascender())
        };
        if units_per_em == 0 {
            return Err(FontError::NoMetrics);
        }
        Ok(Self {
            data: Arc::new(data),
            units_per_em,
            ascender,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Distance from the top of a line to its baseline at `size` px.
    pub fn ascent(&self, size: f64) -> f64 {
        self.ascender as f64 * size / self.units_per_em as f64
    }

    /// Advance width of `text` at `size` px. Missing glyphs count as `.notdef`.
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        match Face::parse(&self.data, 0) {
            Ok(face) => self.width_with(&face, text, size),
            Err(_) => 0.0,
        }
    }

    /// Longest prefix of `text` no wider than `max_width`, dropping one
    /// trailing character at a time. May be empty.
    pub fn fit(&self, text: &str, max_width: f64, size: f64) -> String {
        let Ok(face) = Face::parse(&self.data, 0) else {
            return String::new();
        };
        let mut out = text.to_string();
        while !out.is_empty() && self.width_with(&face, &out, size) > max_width {
            out.pop();
        }
        out
    }

    fn width_with(&self, face: &Face<'_>, text: &str, size: f64) -> f64 {
        let units: u32 = text
            .chars()
            .map(|c| {
                let gid = face.glyph_index(c).unwrap_or(GlyphId(0));
                face.glyph_hor_advance(gid).unwrap_or(0) as u32
            })
            .sum();
        units as f64 * size / self.units_per_em as f64
    }
}
