use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::records::{GroupId, UserId};

/// The person a calendar is rendered for, with the group selected in their
/// session. Passed explicitly to every render call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub user_id: UserId,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub group_id: Option<GroupId>,
}

impl Viewer {
    /// Rows a viewer may see: the whole group when the configuration allows
    /// it or the viewer is an admin, otherwise only objects they own.
    pub fn scope(&self, config: &RenderConfig) -> Scope {
        let owner = if config.show_all_group_objects || self.admin {
            None
        } else {
            Some(self.user_id)
        };
        Scope {
            group_id: self.group_id,
            owner,
        }
    }

    /// Whether this viewer may create or edit absences on something owned
    /// by `owner`.
    pub fn can_modify(&self, owner: UserId, config: &RenderConfig) -> bool {
        config.modify_all_group_absences || owner == self.user_id || self.admin
    }
}

/// Filter handed to a data provider. A missing group matches nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scope {
    pub group_id: Option<GroupId>,
    pub owner: Option<UserId>,
}

impl Scope {
    pub fn admits(&self, group_id: GroupId, user_id: UserId) -> bool {
        self.group_id == Some(group_id) && self.owner.is_none_or(|o| o == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(show_all: bool, modify_all: bool) -> RenderConfig {
        RenderConfig {
            show_all_group_objects: show_all,
            modify_all_group_absences: modify_all,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn scope_restricts_to_owner_only_when_group_view_is_off() {
        let v = Viewer {
            user_id: 4,
            admin: false,
            group_id: Some(1),
        };
        assert_eq!(v.scope(&config(true, false)).owner, None);
        assert_eq!(v.scope(&config(false, false)).owner, Some(4));

        let admin = Viewer { admin: true, ..v };
        assert_eq!(admin.scope(&config(false, false)).owner, None);
    }

    #[test]
    fn missing_group_admits_nothing() {
        let s = Scope::default();
        assert!(!s.admits(1, 1));
        let s = Scope {
            group_id: Some(1),
            owner: Some(2),
        };
        assert!(s.admits(1, 2));
        assert!(!s.admits(1, 3));
        assert!(!s.admits(2, 2));
    }

    #[test]
    fn modify_predicate() {
        let v = Viewer {
            user_id: 4,
            admin: false,
            group_id: Some(1),
        };
        assert!(v.can_modify(4, &config(true, false)));
        assert!(!v.can_modify(5, &config(true, false)));
        assert!(v.can_modify(5, &config(true, true)));
        let admin = Viewer { admin: true, ..v };
        assert!(admin.can_modify(5, &config(true, false)));
    }
}
