//! Domain records and data access for the absence calendar: who sees which
//! rows, which absences and holidays fall into a month, and how the month is
//! split into weekends and workweeks.

pub mod calendar;
pub mod config;
pub mod memory;
pub mod provider;
pub mod records;
pub mod viewer;

pub use calendar::{DaySpan, MonthRef, WeekSegment, add_months, month_sequence};
pub use config::{ConfigError, RenderConfig};
pub use memory::{Dataset, MemoryStore};
pub use provider::{DataProvider, HolidayQuery, ProviderError, holiday_captions};
pub use records::*;
pub use viewer::{Scope, Viewer};
