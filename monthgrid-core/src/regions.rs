//! Clickable-region map laid over a month image.

use absence_core::{AbsenceId, ObjectId};
use serde::Serialize;

use crate::geometry::PixelRect;
use crate::scene::xml_chars;

/// What clicking a region does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    EditAbsence {
        absence_id: AbsenceId,
    },
    CreateAbsence {
        object_id: ObjectId,
        day: u32,
        month: u32,
        year: i32,
    },
}

/// Turns an [`Action`] into the URL a region points at.
pub trait LinkBuilder {
    fn url_for(&self, action: &Action) -> String;
}

impl<F> LinkBuilder for F
where
    F: Fn(&Action) -> String,
{
    fn url_for(&self, action: &Action) -> String {
        self(action)
    }
}

/// The web application's absence routes, optionally under a path prefix.
#[derive(Clone, Debug, Default)]
pub struct RouteLinks {
    prefix: String,
}

impl RouteLinks {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix: String = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }
}

impl LinkBuilder for RouteLinks {
    fn url_for(&self, action: &Action) -> String {
        match *action {
            Action::EditAbsence { absence_id } => {
                format!("{}/absences/edit/{absence_id}", self.prefix)
            }
            // trailing 1: return to the calendar after saving
            Action::CreateAbsence {
                object_id,
                day,
                month,
                year,
            } => format!(
                "{}/absences/create/{object_id}/{day}/{month}/{year}/1",
                self.prefix
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Rect,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Region {
    pub shape: Shape,
    pub coords: PixelRect,
    /// `None` for hover-only regions.
    pub action: Option<Action>,
    pub href: Option<String>,
    pub title: String,
}

impl Region {
    pub fn link(coords: PixelRect, action: Action, links: &dyn LinkBuilder, title: &str) -> Self {
        Self {
            shape: Shape::Rect,
            coords,
            href: Some(links.url_for(&action)),
            action: Some(action),
            title: title.to_string(),
        }
    }

    pub fn tooltip(coords: PixelRect, title: &str) -> Self {
        Self {
            shape: Shape::Rect,
            coords,
            action: None,
            href: None,
            title: title.to_string(),
        }
    }

    pub fn is_tooltip(&self) -> bool {
        self.action.is_none()
    }
}

/// Ordered regions of one image, named after the month (`"<month><year>"`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegionMap {
    pub name: String,
    pub regions: Vec<Region>,
}

impl RegionMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            regions: Vec::new(),
        }
    }

    pub fn push(&mut self, region: Region) {
        self.regions.push(region);
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    /// Regions opening the editor for `absence`.
    pub fn for_absence(&self, absence: AbsenceId) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| {
            matches!(r.action, Some(Action::EditAbsence { absence_id }) if absence_id == absence)
        })
    }

    /// Topmost-first hit test, the way a browser resolves overlapping areas.
    pub fn hit(&self, x: i32, y: i32) -> Option<&Region> {
        self.regions.iter().find(|r| r.coords.contains(x, y))
    }

    /// HTML `<map>` element for an `<img usemap="#name">`.
    pub fn to_html(&self) -> String {
        let mut s = format!("<map name=\"{}\">\n", attr_escape(&self.name));
        for r in &self.regions {
            let [x1, y1, x2, y2] = r.coords.coords();
            s.push_str(&format!("<area shape=\"rect\" coords=\"{x1},{y1},{x2},{y2}\" "));
            match &r.href {
                Some(href) => s.push_str(&format!("href=\"{}\" ", attr_escape(href))),
                None => s.push_str("nohref "),
            }
            s.push_str(&format!("title=\"{}\">\n", attr_escape(&r.title)));
        }
        s.push_str("</map>\n");
        s
    }
}

impl<'a> IntoIterator for &'a RegionMap {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

fn attr_escape(s: &str) -> String {
    xml_chars(s)
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
