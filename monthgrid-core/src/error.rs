use absence_core::ProviderError;
use fonts::FontError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Font(#[from] FontError),

    #[error("data provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("no such month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("SVG parse error: {0}")]
    Svg(#[from] usvg::Error),

    #[error("pixmap alloc failed ({width}x{height})")]
    PixmapAlloc { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}
