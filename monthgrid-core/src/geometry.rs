//! Pixel layout of the month grid.
//!
//! Every rectangle on the calendar, drawn or clickable, comes out of
//! [`Geometry::cell`]. Rows are numbered from the top: row 0 is the strip
//! holding the title and week bands, row 1 the day-number header, and rows
//! `2..=N+1` the objects.

use std::collections::HashMap;

use absence_core::{DaySpan, DisplayObject, ObjectId};
use serde::Serialize;

pub const ROW_LABEL_WIDTH: i32 = 250;
pub const COL_WIDTH: i32 = 25;
pub const ROW_HEIGHT: i32 = 35;
pub const HEADER_ROWS: i32 = 2;
pub const DAY_COLUMNS: i32 = 31;

/// Row of the day-number header.
pub const HEADER_ROW: i32 = 1;
/// First object row.
pub const FIRST_OBJECT_ROW: i32 = HEADER_ROWS;

/// Inclusive pixel rectangle `(x1, y1)`–`(x2, y2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PixelRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl PixelRect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Distance between the left and right edge, the room a caption gets.
    pub fn span_x(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.x1..=self.x2).contains(&x) && (self.y1..=self.y2).contains(&y)
    }

    pub fn coords(&self) -> [i32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

/// Layout of one month image holding `objects` object rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    objects: i32,
}

impl Geometry {
    pub fn new(objects: usize) -> Self {
        Self {
            objects: objects as i32,
        }
    }

    pub fn objects(&self) -> i32 {
        self.objects
    }

    pub const fn width(&self) -> i32 {
        1 + ROW_LABEL_WIDTH + DAY_COLUMNS * (COL_WIDTH + 1)
    }

    pub const fn height(&self) -> i32 {
        (self.objects + HEADER_ROWS) * (ROW_HEIGHT + 1)
    }

    pub fn last_row(&self) -> i32 {
        FIRST_OBJECT_ROW + self.objects - 1
    }

    /// The box for `span` days starting at `day` in `row`.
    pub fn cell(row: i32, day: u32, span: u32) -> PixelRect {
        let (d, n) = (day as i32, span as i32);
        let x1 = ROW_LABEL_WIDTH - COL_WIDTH + d * COL_WIDTH + d;
        let y1 = row * ROW_HEIGHT + row;
        PixelRect {
            x1,
            y1,
            x2: x1 + COL_WIDTH * n + n - 2,
            y2: y1 + ROW_HEIGHT - 1,
        }
    }

    /// One-pixel column separators, from the left edge of the first day to
    /// the right edge of the image.
    pub fn vertical_lines(&self) -> Vec<PixelRect> {
        let h = self.height() - 1;
        (0..=DAY_COLUMNS)
            .map(|k| ROW_LABEL_WIDTH + k * (COL_WIDTH + 1))
            .map(|x| PixelRect::new(x, 0, x, h))
            .collect()
    }

    /// One-pixel separators under the header and under every object row.
    pub fn horizontal_lines(&self) -> Vec<PixelRect> {
        let w = self.width() - 1;
        let first = HEADER_ROWS * ROW_HEIGHT + 1;
        (0..=self.objects)
            .map(|k| first + k * (ROW_HEIGHT + 1))
            .map(|y| PixelRect::new(0, y, w, y))
            .collect()
    }

    /// Weekend shading: the columns of `span` from just below the top edge
    /// to just above the bottom one.
    pub fn weekend_band(&self, span: DaySpan) -> PixelRect {
        let c = Self::cell(0, span.start, span.len);
        PixelRect::new(c.x1, 1, c.x2, self.height() - 1)
    }

    /// Week-number band inside the top strip.
    pub fn week_band(span: DaySpan) -> PixelRect {
        let c = Self::cell(0, span.start, span.len);
        PixelRect::new(c.x1, 1, c.x2, ROW_HEIGHT - 2)
    }

    /// Blanking rectangle over the day columns a month does not have.
    pub fn padding(&self, days_in_month: u32) -> Option<PixelRect> {
        if days_in_month >= DAY_COLUMNS as u32 {
            return None;
        }
        let x1 = Self::cell(0, days_in_month + 1, 1).x1;
        Some(PixelRect::new(x1, 0, self.width() - 1, self.height() - 1))
    }

    /// Column of `day` from the header row down through the last object row.
    pub fn day_column(&self, day: u32) -> PixelRect {
        let top = Self::cell(HEADER_ROW, day, 1);
        let bottom = Self::cell(self.last_row().max(HEADER_ROW), day, 1);
        PixelRect::new(top.x1, top.y1, top.x2, bottom.y2)
    }

    pub fn frame(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width() - 1, self.height() - 1)
    }

    /// Top-left anchor of the day number caption.
    pub fn day_number_origin(day: u32) -> (f64, f64) {
        let x = ROW_LABEL_WIDTH + (day as i32 - 1) * (COL_WIDTH + 1) + 5;
        (x as f64, (ROW_HEIGHT + 5) as f64)
    }

    /// Top-left anchor of an object label.
    pub fn label_origin(row: i32) -> (f64, f64) {
        (5.0, (row * ROW_HEIGHT + row + 7) as f64)
    }

    /// Top-left anchor of a caption inside a bar.
    pub fn caption_origin(rect: &PixelRect) -> (f64, f64) {
        (rect.x1 as f64, rect.y1 as f64 + ROW_HEIGHT as f64 / 4.0)
    }

    /// Top-left anchor of a "CW n" caption, roughly centred in its band.
    pub fn week_caption_origin(band: &PixelRect, span_days: u32) -> (f64, f64) {
        let margin = span_days as f64 * COL_WIDTH as f64 / 2.0 - (COL_WIDTH - 5) as f64;
        let box_height = (band.y2 - band.y1) as f64;
        (band.x1 as f64 + margin, band.y1 as f64 + box_height / 4.0)
    }

    pub fn title_origin() -> (f64, f64) {
        (15.0, ROW_HEIGHT as f64 / 2.0)
    }
}

/// Object → row mapping for one render: objects in provider order get rows
/// `2, 3, ..` with no gaps.
#[derive(Clone, Debug, Default)]
pub struct RowAssignment {
    order: Vec<ObjectId>,
    rows: HashMap<ObjectId, i32>,
}

impl RowAssignment {
    /// Assigns rows in the given order. A repeated id keeps its first row
    /// and does not consume another.
    pub fn new(objects: &[DisplayObject]) -> Self {
        let mut out = Self::default();
        for obj in objects {
            if out.rows.contains_key(&obj.id) {
                continue;
            }
            let row = FIRST_OBJECT_ROW + out.order.len() as i32;
            out.rows.insert(obj.id, row);
            out.order.push(obj.id);
        }
        out
    }

    pub fn row_of(&self, object: ObjectId) -> Option<i32> {
        self.rows.get(&object).copied()
    }

    pub fn object_at(&self, row: i32) -> Option<ObjectId> {
        let idx = usize::try_from(row - FIRST_OBJECT_ROW).ok()?;
        self.order.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(row, object)` pairs top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = (i32, ObjectId)> + '_ {
        self.order
            .iter()
            .enumerate()
            .map(|(i, &id)| (FIRST_OBJECT_ROW + i as i32, id))
    }
}
