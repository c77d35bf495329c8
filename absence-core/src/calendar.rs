//! Calendar arithmetic for one month: lengths, weekend spans, workweek
//! segments with ISO week numbers, and month stepping.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

/// A calendar month that is known to exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthRef {
    year: i32,
    month: u32,
}

/// A run of consecutive days inside a month, `len >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DaySpan {
    pub start: u32,
    pub len: u32,
}

/// Workweek segment of a month with the ISO week number of its first day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeekSegment {
    pub span: DaySpan,
    pub iso_week: u32,
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // validated in the constructors
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    pub fn days(&self) -> u32 {
        self.last_day().day()
    }

    /// Date of `day` in this month, `None` past the month end.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// English month name, e.g. "February".
    pub fn name(&self) -> String {
        self.first_day().format("%B").to_string()
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn offset(&self, months: i32) -> Self {
        let total = self.year * 12 + self.month as i32 - 1 + months;
        Self {
            year: total.div_euclid(12),
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    /// Weekend bands: one per Saturday, two days wide unless the Saturday is
    /// the last day of the month.
    pub fn weekend_spans(&self) -> Vec<DaySpan> {
        let days = self.days();
        (1..=days)
            .filter(|&d| self.weekday(d) == Weekday::Sat)
            .map(|start| DaySpan {
                start,
                len: if start + 1 > days { 1 } else { 2 },
            })
            .collect()
    }

    /// Monday-to-Friday segments. The first segment starts on the 1st when
    /// that is a weekday; every other one starts on a Monday. Segments are
    /// clipped to the month end.
    pub fn week_segments(&self) -> Vec<WeekSegment> {
        let days = self.days();
        let mut out = Vec::new();
        for day in 1..=days {
            let wd = self.weekday(day).num_days_from_monday();
            let len = if day == 1 && wd < 5 {
                5 - wd
            } else if wd == 0 {
                5u32.min(days + 1 - day)
            } else {
                continue;
            };
            let iso_week = self.date(day).map(|d| d.iso_week().week()).unwrap_or(0);
            out.push(WeekSegment {
                span: DaySpan { start: day, len },
                iso_week,
            });
        }
        out
    }

    fn weekday(&self, day: u32) -> Weekday {
        self.date(day).map(|d| d.weekday()).unwrap_or(Weekday::Mon)
    }
}

/// `n` consecutive months starting at `start`.
pub fn month_sequence(start: MonthRef, n: usize) -> Vec<MonthRef> {
    (0..n).map(|i| start.offset(i as i32)).collect()
}

/// Shift `date` by whole months, clamping the day to the target month's
/// length (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let target = MonthRef::of(date).offset(months);
    let day = date.day().min(target.days());
    target.date(day).unwrap_or_else(|| target.first_day())
}
