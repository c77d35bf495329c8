use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type GroupId = i64;
pub type ObjectId = i64;
pub type AbsenceId = i64;
pub type AbsenceTypeId = i64;
pub type HolidayId = i64;

/// One row of the calendar grid: a person or resource that accrues absences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayObject {
    pub id: ObjectId,
    pub user_id: UserId,
    pub group_id: GroupId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    // denormalized for display
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
}

/// Absence joined with its object and type, the shape a renderer consumes.
///
/// `duration` is computed by the data source (`end - start + 1` days) and is
/// trusted as is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceRecord {
    pub id: AbsenceId,
    pub object_id: ObjectId,
    pub type_id: AbsenceTypeId,
    pub user_id: UserId,
    pub group_id: GroupId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration: i64,
    #[serde(default)]
    pub description: String,
    pub color: String,
    pub type_name: String,
}

impl AbsenceRecord {
    /// Whether `date` falls inside the inclusive `start..=end` range.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub id: HolidayId,
    pub country: String,
    pub event_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recurring: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceTypeRecord {
    pub id: AbsenceTypeId,
    pub name: String,
    pub color: String,
}
