use std::collections::BTreeMap;

use chrono::Datelike;
use thiserror::Error;

use crate::calendar::MonthRef;
use crate::records::{AbsenceRecord, AbsenceTypeRecord, DisplayObject, HolidayRecord};
use crate::viewer::Scope;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which holidays to fetch for a month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HolidayQuery {
    /// Recurring holidays dated in `month` of any year.
    Recurring { month: u32 },
    /// One-off holidays dated in exactly `year`/`month`.
    Fixed { year: i32, month: u32 },
}

impl HolidayQuery {
    pub fn matches(&self, h: &HolidayRecord) -> bool {
        let d = h.event_date;
        match *self {
            HolidayQuery::Recurring { month } => h.recurring && d.month() == month,
            HolidayQuery::Fixed { year, month } => {
                !h.recurring && d.year() == year && d.month() == month
            }
        }
    }
}

/// Read-only access to the objects, absences, holidays and absence types a
/// calendar is drawn from. Implementations own their own concurrency and
/// duration arithmetic.
pub trait DataProvider {
    /// Objects of the scope's group, in a stable order.
    fn visible_objects(&self, scope: &Scope) -> Result<Vec<DisplayObject>, ProviderError>;

    /// Absences of the scope's objects that overlap `month`.
    fn absences(&self, month: MonthRef, scope: &Scope)
    -> Result<Vec<AbsenceRecord>, ProviderError>;

    fn holidays(&self, query: &HolidayQuery) -> Result<Vec<HolidayRecord>, ProviderError>;

    /// All absence types ordered by id.
    fn absence_types(&self) -> Result<Vec<AbsenceTypeRecord>, ProviderError>;
}

/// Holiday captions of `month` keyed by day. Recurring holidays are applied
/// first and fixed ones after, each in id order, so a later holiday on the
/// same day replaces the earlier caption.
pub fn holiday_captions<P: DataProvider + ?Sized>(
    provider: &P,
    month: MonthRef,
) -> Result<BTreeMap<u32, String>, ProviderError> {
    let mut captions = BTreeMap::new();
    let queries = [
        HolidayQuery::Recurring {
            month: month.month(),
        },
        HolidayQuery::Fixed {
            year: month.year(),
            month: month.month(),
        },
    ];
    for q in queries {
        let mut found = provider.holidays(&q)?;
        found.sort_by_key(|h| h.id);
        for h in found {
            captions.insert(h.event_date.day(), h.description);
        }
    }
    Ok(captions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn holiday(id: i64, y: i32, m: u32, d: u32, recurring: bool) -> HolidayRecord {
        HolidayRecord {
            id,
            country: "pl".into(),
            event_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            description: format!("h{id}"),
            recurring,
        }
    }

    #[test]
    fn recurring_holiday_matches_every_year() {
        let ny = holiday(1, 2021, 1, 1, true);
        assert!(HolidayQuery::Recurring { month: 1 }.matches(&ny));
        assert!(!HolidayQuery::Recurring { month: 2 }.matches(&ny));
        assert!(!HolidayQuery::Fixed { year: 2021, month: 1 }.matches(&ny));
    }

    #[test]
    fn fixed_holiday_matches_only_its_year() {
        let h = holiday(2, 2024, 5, 3, false);
        assert!(HolidayQuery::Fixed { year: 2024, month: 5 }.matches(&h));
        assert!(!HolidayQuery::Fixed { year: 2025, month: 5 }.matches(&h));
        assert!(!HolidayQuery::Recurring { month: 5 }.matches(&h));
    }
}
