use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::MonthRef;
use crate::provider::{DataProvider, HolidayQuery, ProviderError};
use crate::records::{
    AbsenceId, AbsenceRecord, AbsenceTypeId, AbsenceTypeRecord, DisplayObject, GroupId,
    HolidayRecord, ObjectId, UserId,
};
use crate::viewer::Scope;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserRow {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GroupRow {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectRow {
    pub id: ObjectId,
    pub user_id: UserId,
    pub group_id: GroupId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AbsenceRow {
    pub id: AbsenceId,
    pub object_id: ObjectId,
    pub type_id: AbsenceTypeId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub description: String,
}

/// Plain tables as stored on disk (JSON).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub users: Vec<UserRow>,
    pub groups: Vec<GroupRow>,
    pub objects: Vec<ObjectRow>,
    pub absence_types: Vec<AbsenceTypeRecord>,
    pub absences: Vec<AbsenceRow>,
    pub holidays: Vec<HolidayRecord>,
}

impl Dataset {
    /// Starter data: an admin with a Default group and one object, the
    /// standard absence types, and a recurring New Year holiday.
    pub fn sample() -> Self {
        let types = [
            ("Other", "#FFA500"),
            ("Vacation", "#CE1616"),
            ("Busy", "#5A5AFF"),
            ("Sick", "#51AC4E"),
            ("Holiday", "#A020F0"),
        ];
        Dataset {
            users: vec![UserRow {
                id: 1,
                username: "admin".into(),
                admin: true,
            }],
            groups: vec![GroupRow {
                id: 1,
                name: "Default".into(),
                description: "Default group".into(),
            }],
            objects: vec![ObjectRow {
                id: 1,
                user_id: 1,
                group_id: 1,
                name: "Admin".into(),
                description: Some("Default object owned by admin".into()),
            }],
            absence_types: types
                .iter()
                .zip(1..)
                .map(|((name, color), id)| AbsenceTypeRecord {
                    id,
                    name: name.to_string(),
                    color: color.to_string(),
                })
                .collect(),
            absences: Vec::new(),
            holidays: vec![HolidayRecord {
                id: 1,
                country: "pl".into(),
                event_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default(),
                description: "New Year".into(),
                recurring: true,
            }],
        }
    }
}

/// In-memory [`DataProvider`] over a [`Dataset`], joining absences with
/// their object and type the way the storage view does.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    data: Dataset,
}

impl MemoryStore {
    pub fn new(data: Dataset) -> Self {
        Self { data }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ProviderError> {
        Ok(Self::new(serde_json::from_str(s)?))
    }

    pub fn load(path: &Path) -> Result<Self, ProviderError> {
        let txt = fs::read_to_string(path)?;
        Self::from_json_str(&txt)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    pub fn user(&self, id: UserId) -> Option<&UserRow> {
        self.data.users.iter().find(|u| u.id == id)
    }

    fn object(&self, id: ObjectId) -> Option<&ObjectRow> {
        self.data.objects.iter().find(|o| o.id == id)
    }

    fn absence_type(&self, id: AbsenceTypeId) -> Option<&AbsenceTypeRecord> {
        self.data.absence_types.iter().find(|t| t.id == id)
    }
}

impl DataProvider for MemoryStore {
    fn visible_objects(&self, scope: &Scope) -> Result<Vec<DisplayObject>, ProviderError> {
        let mut out: Vec<DisplayObject> = self
            .data
            .objects
            .iter()
            .filter(|o| scope.admits(o.group_id, o.user_id))
            .map(|o| DisplayObject {
                id: o.id,
                user_id: o.user_id,
                group_id: o.group_id,
                name: o.name.clone(),
                description: o.description.clone(),
                owner: self.user(o.user_id).map(|u| u.username.clone()),
                group_name: self
                    .data
                    .groups
                    .iter()
                    .find(|g| g.id == o.group_id)
                    .map(|g| g.name.clone()),
            })
            .collect();
        out.sort_by_key(|o| o.id);
        debug!(count = out.len(), ?scope, "fetched objects");
        Ok(out)
    }

    fn absences(
        &self,
        month: MonthRef,
        scope: &Scope,
    ) -> Result<Vec<AbsenceRecord>, ProviderError> {
        let (first, last) = (month.first_day(), month.last_day());
        let mut out = Vec::new();
        for a in &self.data.absences {
            if a.end < first || a.start > last {
                continue;
            }
            let Some(obj) = self.object(a.object_id) else {
                debug!(absence = a.id, object = a.object_id, "absence without object");
                continue;
            };
            if !scope.admits(obj.group_id, obj.user_id) {
                continue;
            }
            let Some(ty) = self.absence_type(a.type_id) else {
                debug!(absence = a.id, type_id = a.type_id, "absence without type");
                continue;
            };
            out.push(AbsenceRecord {
                id: a.id,
                object_id: a.object_id,
                type_id: a.type_id,
                user_id: obj.user_id,
                group_id: obj.group_id,
                start: a.start,
                end: a.end,
                duration: (a.end - a.start).num_days() + 1,
                description: a.description.clone(),
                color: ty.color.clone(),
                type_name: ty.name.clone(),
            });
        }
        out.sort_by_key(|a| a.id);
        debug!(
            count = out.len(),
            year = month.year(),
            month = month.month(),
            "fetched absences"
        );
        Ok(out)
    }

    fn holidays(&self, query: &HolidayQuery) -> Result<Vec<HolidayRecord>, ProviderError> {
        Ok(self
            .data
            .holidays
            .iter()
            .filter(|h| query.matches(h))
            .cloned()
            .collect())
    }

    fn absence_types(&self) -> Result<Vec<AbsenceTypeRecord>, ProviderError> {
        let mut out = self.data.absence_types.clone();
        out.sort_by_key(|t| t.id);
        Ok(out)
    }
}
