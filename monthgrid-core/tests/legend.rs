use absence_core::{Dataset, MemoryStore, RenderConfig};
use fonts::FontAsset;
use monthgrid_core::{Legend, PixelRect, Rasterizer, render_legend};

const FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../assets/fonts/DejaVuSansMono.ttf");

fn legend() -> monthgrid_core::RenderedLegend {
    let font = FontAsset::load(FONT).unwrap();
    Legend::new(&Rasterizer::new(&font))
        .build(&MemoryStore::new(Dataset::sample()))
        .unwrap()
}

#[test]
fn label_then_one_swatch_per_type() {
    let l = legend();
    let captions: Vec<&str> = l.entries().iter().map(|e| e.caption.as_str()).collect();
    assert_eq!(
        captions,
        vec!["Legend:", "Other", "Vacation", "Busy", "Sick", "Holiday"]
    );
    assert!(l.entries()[0].swatch.is_none());
    assert!(l.entries()[1..].iter().all(|e| e.swatch.is_some()));
}

#[test]
fn width_is_the_sum_of_captions_and_padding() {
    let font = FontAsset::load(FONT).unwrap();
    let l = legend();
    let expected: i32 = 5 + l
        .entries()
        .iter()
        .map(|e| font.text_width(&e.caption, 13.0).ceil() as i32 + 15)
        .sum::<i32>();
    assert_eq!(l.width() as i32, expected);
    assert_eq!(l.height(), 30);
}

#[test]
fn swatches_are_laid_out_left_to_right() {
    let font = FontAsset::load(FONT).unwrap();
    let l = legend();
    let label_w = font.text_width("Legend:", 13.0).ceil() as i32;
    let other_w = font.text_width("Other", 13.0).ceil() as i32;
    let first = l.entries()[1].swatch.unwrap();
    let x1 = 5 + label_w + 10 + 5;
    assert_eq!(first, PixelRect::new(x1, 5, x1 + other_w + 10, 25));

    let swatches: Vec<PixelRect> = l.entries().iter().filter_map(|e| e.swatch).collect();
    for pair in swatches.windows(2) {
        assert_eq!(pair[1].x1, pair[0].x2 + 5);
    }
    assert_eq!(swatches.last().unwrap().x2, l.width() as i32 - 5);
}

#[test]
fn swatch_pixels_carry_the_type_color() {
    let l = legend();
    let vacation = l.entries()[2].swatch.unwrap();
    // bottom-right corner stays clear of the caption
    let (x, y) = (vacation.x2 as u32 - 1, vacation.y2 as u32 - 1);
    assert_eq!(l.pixel(x, y), Some([0xCE, 0x16, 0x16, 255]));
    assert_eq!(l.pixel(1, 1), Some([192, 176, 192, 255]));
}

#[test]
fn rendering_is_deterministic() {
    assert_eq!(legend().png(), legend().png());
}

#[test]
fn empty_catalog_still_shows_the_label() {
    let cfg = RenderConfig {
        font_path: FONT.into(),
        ..RenderConfig::default()
    };
    let l = render_legend(&cfg, &MemoryStore::default()).unwrap();
    assert_eq!(l.entries().len(), 1);
    assert!(l.width() > 15);
}
