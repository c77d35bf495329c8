use absence_core::{
    DataProvider, Dataset, MemoryStore, MonthRef, RenderConfig, Scope, Viewer, holiday_captions,
};
use chrono::NaiveDate;

const DATA: &str = r##"{
  "users": [
    {"id": 1, "username": "admin", "admin": true},
    {"id": 2, "username": "alice"},
    {"id": 3, "username": "bob"}
  ],
  "groups": [
    {"id": 1, "name": "Ops"},
    {"id": 2, "name": "Dev"}
  ],
  "objects": [
    {"id": 12, "user_id": 3, "group_id": 1, "name": "Bob"},
    {"id": 10, "user_id": 2, "group_id": 1, "name": "Alice"},
    {"id": 11, "user_id": 2, "group_id": 2, "name": "Alice (Dev)"}
  ],
  "absence_types": [
    {"id": 2, "name": "Vacation", "color": "#CE1616"},
    {"id": 1, "name": "Other", "color": "#FFA500"}
  ],
  "absences": [
    {"id": 5, "object_id": 10, "type_id": 2, "start": "2024-03-04", "end": "2024-03-08", "description": "Ski"},
    {"id": 6, "object_id": 12, "type_id": 1, "start": "2024-02-27", "end": "2024-03-02"},
    {"id": 7, "object_id": 10, "type_id": 1, "start": "2024-04-01", "end": "2024-04-01"},
    {"id": 8, "object_id": 11, "type_id": 1, "start": "2024-03-10", "end": "2024-03-10"},
    {"id": 9, "object_id": 99, "type_id": 1, "start": "2024-03-10", "end": "2024-03-10"}
  ],
  "holidays": [
    {"id": 3, "country": "pl", "event_date": "2024-03-31", "description": "Easter"},
    {"id": 1, "country": "pl", "event_date": "2020-03-31", "description": "Spring", "recurring": true},
    {"id": 2, "country": "pl", "event_date": "2023-03-15", "description": "Last year only"}
  ]
}"##;

fn store() -> MemoryStore {
    MemoryStore::from_json_str(DATA).unwrap()
}

fn march() -> MonthRef {
    MonthRef::new(2024, 3).unwrap()
}

#[test]
fn objects_are_scoped_to_group_and_sorted_by_id() {
    let s = store();
    let scope = Scope {
        group_id: Some(1),
        owner: None,
    };
    let objs = s.visible_objects(&scope).unwrap();
    let ids: Vec<i64> = objs.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![10, 12]);
    assert_eq!(objs[0].owner.as_deref(), Some("alice"));
    assert_eq!(objs[0].group_name.as_deref(), Some("Ops"));
}

#[test]
fn owner_scope_hides_other_peoples_objects() {
    let s = store();
    let cfg = RenderConfig {
        show_all_group_objects: false,
        ..RenderConfig::default()
    };
    let viewer = Viewer {
        user_id: 3,
        admin: false,
        group_id: Some(1),
    };
    let objs = s.visible_objects(&viewer.scope(&cfg)).unwrap();
    assert_eq!(objs.len(), 1);
    assert_eq!(objs[0].name, "Bob");
}

#[test]
fn missing_group_yields_nothing() {
    let s = store();
    assert!(s.visible_objects(&Scope::default()).unwrap().is_empty());
    assert!(s.absences(march(), &Scope::default()).unwrap().is_empty());
}

#[test]
fn absences_overlapping_the_month_are_joined() {
    let s = store();
    let scope = Scope {
        group_id: Some(1),
        owner: None,
    };
    let abs = s.absences(march(), &scope).unwrap();
    let ids: Vec<i64> = abs.iter().map(|a| a.id).collect();
    // 6 starts in February, 7 is April, 8 is another group, 9 has no object.
    assert_eq!(ids, vec![5, 6]);

    let ski = &abs[0];
    assert_eq!(ski.duration, 5);
    assert_eq!(ski.user_id, 2);
    assert_eq!(ski.color, "#CE1616");
    assert_eq!(ski.type_name, "Vacation");
    assert!(ski.covers(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()));

    assert_eq!(abs[1].duration, 5);
    assert!(abs[1].description.is_empty());
}

#[test]
fn absence_types_come_back_in_id_order() {
    let names: Vec<String> = store()
        .absence_types()
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["Other", "Vacation"]);
}

#[test]
fn fixed_holiday_overrides_recurring_one_on_the_same_day() {
    let captions = holiday_captions(&store(), march()).unwrap();
    assert_eq!(captions.len(), 1);
    assert_eq!(captions.get(&31).map(String::as_str), Some("Easter"));

    let next_year = holiday_captions(&store(), MonthRef::new(2025, 3).unwrap()).unwrap();
    assert_eq!(next_year.get(&31).map(String::as_str), Some("Spring"));
}

#[test]
fn sample_dataset_survives_a_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, serde_json::to_string_pretty(&Dataset::sample()).unwrap()).unwrap();

    let s = MemoryStore::load(&path).unwrap();
    assert_eq!(s.absence_types().unwrap().len(), 5);
    assert!(s.user(1).is_some_and(|u| u.admin));
    let jan = holiday_captions(&s, MonthRef::new(2030, 1).unwrap()).unwrap();
    assert_eq!(jan.get(&1).map(String::as_str), Some("New Year"));
}

#[test]
fn malformed_dataset_is_an_error() {
    assert!(MemoryStore::from_json_str("{\"objects\": 3}").is_err());
}
