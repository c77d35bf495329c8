//! One month of the absence calendar as a PNG plus its region map.

use std::collections::BTreeMap;

use absence_core::{
    AbsenceId, AbsenceRecord, DataProvider, DisplayObject, MonthRef, ObjectId, RenderConfig,
    UserId, Viewer, holiday_captions,
};
use chrono::{Datelike, Local, NaiveDate};
use tiny_skia::Pixmap;
use tracing::{debug, warn};

use crate::error::RenderError;
use crate::geometry::{Geometry, HEADER_ROW, PixelRect, RowAssignment};
use crate::raster::{Rasterizer, encode_png, rgba_at};
use crate::regions::{Action, LinkBuilder, Region, RegionMap};
use crate::scene::Scene;

pub const FONT_SIZE: f64 = 13.0;
pub const TITLE_FONT_SIZE: f64 = 20.0;

pub const BACKGROUND: &str = "#C0B0C0";
pub const WEEKEND_COLOR: &str = "#A090A0";
pub const GRID_COLOR: &str = "#808080";
pub const HOLIDAY_COLOR: &str = "#e121ff";
pub const PADDING_COLOR: &str = "#605060";
pub const WEEK_BAND_COLOR: &str = "#ba90ba";
pub const TEXT_COLOR: &str = "#000000";
pub const CURRENT_TITLE_COLOR: &str = "#2020FF";
pub const HIGHLIGHT_COLOR: &str = "#ffffff";

const ADD_TITLE: &str = "Add";

/// An absence bar as it was drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawnAbsence {
    pub absence_id: AbsenceId,
    pub object_id: ObjectId,
    pub user_id: UserId,
    pub rect: PixelRect,
    pub description: String,
    /// Caption after fitting it into the bar.
    pub caption: String,
}

/// Renders months for one viewer.
pub struct MonthGrid<'a> {
    config: &'a RenderConfig,
    viewer: &'a Viewer,
    links: &'a dyn LinkBuilder,
    raster: &'a Rasterizer,
    today: NaiveDate,
}

impl<'a> MonthGrid<'a> {
    pub fn new(
        config: &'a RenderConfig,
        viewer: &'a Viewer,
        links: &'a dyn LinkBuilder,
        raster: &'a Rasterizer,
    ) -> Self {
        Self {
            config,
            viewer,
            links,
            raster,
            today: Local::now().date_naive(),
        }
    }

    /// Overrides the date the current-month and current-day highlights
    /// compare against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Fetches, lays out and renders `year`/`month`, each defaulting to
    /// today's.
    pub fn build(
        &self,
        provider: &dyn DataProvider,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<RenderedMonth, RenderError> {
        let year = year.unwrap_or(self.today.year());
        let month = month.unwrap_or(self.today.month());
        let month = MonthRef::new(year, month).ok_or(RenderError::InvalidMonth { year, month })?;

        if self.viewer.group_id.is_none() {
            warn!(
                user = self.viewer.user_id,
                "no group selected, rendering an empty calendar"
            );
        }
        let scope = self.viewer.scope(self.config);
        let objects = provider.visible_objects(&scope)?;
        let absences = provider.absences(month, &scope)?;
        let mut holidays = holiday_captions(provider, month)?;
        // a recurring Feb 29 has no cell in other years
        holidays.retain(|&day, _| day <= month.days());

        let rows = RowAssignment::new(&objects);
        let geo = Geometry::new(rows.len());
        let mut scene = Scene::new(geo.width() as u32, geo.height() as u32, BACKGROUND);

        self.draw_calendar(&mut scene, &geo, month, &holidays);
        self.draw_labels(&mut scene, &rows, &objects);
        let bars = self.draw_absences(&mut scene, &rows, month, &absences);
        if MonthRef::of(self.today) == month {
            scene.outline(geo.day_column(self.today.day()), HIGHLIGHT_COLOR, 2);
        }

        let regions = self.region_map(month, &rows, &objects, &absences, &bars, &holidays);

        let pixmap = self.raster.render(&scene)?;
        let png = encode_png(&pixmap)?;
        debug!(
            year = month.year(),
            month = month.month(),
            rows = rows.len(),
            bars = bars.len(),
            regions = regions.len(),
            bytes = png.len(),
            "rendered month"
        );
        Ok(RenderedMonth {
            month,
            png,
            pixmap,
            regions,
            rows,
            bars,
            holidays,
            scene,
        })
    }

    // Stages 1-8: everything that does not depend on object rows.
    fn draw_calendar(
        &self,
        scene: &mut Scene,
        geo: &Geometry,
        month: MonthRef,
        holidays: &BTreeMap<u32, String>,
    ) {
        for span in month.weekend_spans() {
            scene.fill(geo.weekend_band(span), WEEKEND_COLOR);
        }

        for line in geo.vertical_lines().into_iter().chain(geo.horizontal_lines()) {
            scene.fill(line, GRID_COLOR);
        }

        for &day in holidays.keys() {
            scene.fill(Geometry::cell(HEADER_ROW, day, 1), HOLIDAY_COLOR);
        }

        for day in 1..=month.days() {
            scene.text(
                Geometry::day_number_origin(day),
                FONT_SIZE,
                TEXT_COLOR,
                &day.to_string(),
            );
        }

        if let Some(pad) = geo.padding(month.days()) {
            scene.fill(pad, PADDING_COLOR);
        }

        for seg in month.week_segments() {
            let band = Geometry::week_band(seg.span);
            scene.fill(band, WEEK_BAND_COLOR);
            // a single day has no room for the caption
            if seg.span.len > 1 {
                scene.text(
                    Geometry::week_caption_origin(&band, seg.span.len),
                    FONT_SIZE,
                    TEXT_COLOR,
                    &format!("CW {}", seg.iso_week),
                );
            }
        }

        let current = MonthRef::of(self.today);
        let title_color = if current == month {
            CURRENT_TITLE_COLOR
        } else {
            TEXT_COLOR
        };
        scene.text(
            Geometry::title_origin(),
            TITLE_FONT_SIZE,
            title_color,
            &format!("{} {}", month.name(), month.year()),
        );

        // Month number only; the year is not compared.
        if current.month() == month.month() {
            scene.outline(geo.frame(), HIGHLIGHT_COLOR, 2);
        }
    }

    fn draw_labels(&self, scene: &mut Scene, rows: &RowAssignment, objects: &[DisplayObject]) {
        for (row, id) in rows.iter() {
            if let Some(obj) = objects.iter().find(|o| o.id == id) {
                scene.text(Geometry::label_origin(row), FONT_SIZE, TEXT_COLOR, &obj.name);
            }
        }
    }

    fn draw_absences(
        &self,
        scene: &mut Scene,
        rows: &RowAssignment,
        month: MonthRef,
        absences: &[AbsenceRecord],
    ) -> Vec<DrawnAbsence> {
        let font = self.raster.font();
        let mut bars = Vec::new();
        for a in absences {
            let Some(row) = rows.row_of(a.object_id) else {
                debug!(absence = a.id, object = a.object_id, "absence outside visible rows");
                continue;
            };
            let Some((day, span)) = bar_days(a, month) else {
                continue;
            };
            let rect = Geometry::cell(row, day, span);
            scene.fill(rect, a.color.as_str());
            let caption = font.fit(&a.description, rect.span_x() as f64, FONT_SIZE);
            scene.text(Geometry::caption_origin(&rect), FONT_SIZE, TEXT_COLOR, &caption);
            bars.push(DrawnAbsence {
                absence_id: a.id,
                object_id: a.object_id,
                user_id: a.user_id,
                rect,
                description: a.description.clone(),
                caption,
            });
        }
        bars
    }

    // Absences first, then holiday headers, then free object cells.
    fn region_map(
        &self,
        month: MonthRef,
        rows: &RowAssignment,
        objects: &[DisplayObject],
        absences: &[AbsenceRecord],
        bars: &[DrawnAbsence],
        holidays: &BTreeMap<u32, String>,
    ) -> RegionMap {
        let mut map = RegionMap::new(format!("{}{}", month.month(), month.year()));

        for bar in bars {
            if self.viewer.can_modify(bar.user_id, self.config) {
                map.push(Region::link(
                    bar.rect,
                    Action::EditAbsence {
                        absence_id: bar.absence_id,
                    },
                    self.links,
                    &bar.description,
                ));
            }
        }

        for (&day, caption) in holidays {
            map.push(Region::tooltip(Geometry::cell(HEADER_ROW, day, 1), caption));
        }

        for (row, id) in rows.iter() {
            let Some(obj) = objects.iter().find(|o| o.id == id) else {
                continue;
            };
            if !self.viewer.can_modify(obj.user_id, self.config) {
                continue;
            }
            for day in 1..=month.days() {
                let Some(date) = month.date(day) else {
                    continue;
                };
                let taken = absences
                    .iter()
                    .any(|a| a.object_id == id && a.covers(date));
                if taken {
                    continue;
                }
                map.push(Region::link(
                    Geometry::cell(row, day, 1),
                    Action::CreateAbsence {
                        object_id: id,
                        day,
                        month: month.month(),
                        year: month.year(),
                    },
                    self.links,
                    ADD_TITLE,
                ));
            }
        }
        map
    }
}

/// First day and length of an absence's bar inside `month`. Bars of
/// absences reaching into neighbouring months are cut at the month edges.
fn bar_days(a: &AbsenceRecord, month: MonthRef) -> Option<(u32, u32)> {
    let first = month.first_day();
    let skipped = (first - a.start).num_days().max(0);
    let day = if a.start < first { 1 } else { a.start.day() };
    if !month.contains(a.start) && a.start >= first {
        return None;
    }
    let room = (month.days() - day + 1) as i64;
    let span = (a.duration - skipped).min(room);
    if span < 1 {
        return None;
    }
    Some((day, span as u32))
}

/// A finished month image with everything it was drawn from.
pub struct RenderedMonth {
    month: MonthRef,
    png: Vec<u8>,
    pixmap: Pixmap,
    regions: RegionMap,
    rows: RowAssignment,
    bars: Vec<DrawnAbsence>,
    holidays: BTreeMap<u32, String>,
    scene: Scene,
}

impl RenderedMonth {
    pub fn month(&self) -> MonthRef {
        self.month
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn into_png(self) -> Vec<u8> {
        self.png
    }

    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    pub fn rows(&self) -> &RowAssignment {
        &self.rows
    }

    pub fn bars(&self) -> &[DrawnAbsence] {
        &self.bars
    }

    pub fn holidays(&self) -> &BTreeMap<u32, String> {
        &self.holidays
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// RGBA of the rendered pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        rgba_at(&self.pixmap, x, y)
    }
}
