//! Snapshot model - the whole exportable state document.

use std::collections::HashSet;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::error::{Result, TrackerError};
use crate::notification::Notification;
use crate::novel::Novel;
use crate::settings::{Settings, SettingsPatch};
use crate::Time;

/// Full export of store state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Tracked novels in collection order
    pub novels: Vec<Novel>,

    /// User settings
    pub settings: Settings,

    /// Notifications, newest first
    pub notifications: Vec<Notification>,

    /// When the snapshot was taken
    pub export_date: Time,
}

impl Snapshot {
    /// Decode a complete snapshot. Unlike [`SnapshotPatch::parse`] nothing is
    /// skipped: any malformed section or repeated id is a format error.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = serde_json::from_slice(bytes)?;
        for (section, ids) in [
            ("novels", snapshot.novels.iter().map(|n| n.id.get()).collect::<Vec<_>>()),
            ("notifications", snapshot.notifications.iter().map(|n| n.id.get()).collect()),
        ] {
            if let Some((id, problem)) = first_bad_id(ids) {
                return Err(TrackerError::Format(format!("{} id {}: {}", section, id, problem)));
            }
        }
        Ok(snapshot)
    }

    /// Serialize as pretty-printed JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

/// Validated contents of an import payload, ready to apply.
///
/// Each section is decoded independently. A malformed section is dropped
/// rather than failing the import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotPatch {
    /// Replacement novel list
    pub novels: Option<Vec<Novel>>,
    /// Field-wise settings update
    pub settings: SettingsPatch,
    /// Replacement notification list
    pub notifications: Option<Vec<Notification>>,
}

impl SnapshotPatch {
    /// Parse raw bytes. Fails only when the payload is not a JSON object.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Some(obj) = value.as_object() else {
            return Err(TrackerError::Format("expected a JSON object".to_string()));
        };

        let novels = decode_list::<Novel>(obj.get("novels"), "novels")
            .filter(|list| ids_usable(list.iter().map(|n| n.id.get()), "novels"));
        let notifications = decode_list::<Notification>(obj.get("notifications"), "notifications")
            .filter(|list| ids_usable(list.iter().map(|n| n.id.get()), "notifications"));

        Ok(Self {
            novels,
            settings: obj
                .get("settings")
                .map(SettingsPatch::from_value)
                .unwrap_or_default(),
            notifications,
        })
    }

    /// Whether applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.novels.is_none() && self.settings.is_empty() && self.notifications.is_none()
    }
}

fn decode_list<T: DeserializeOwned>(value: Option<&Value>, section: &str) -> Option<Vec<T>> {
    let value = value?;
    if !value.is_array() {
        tracing::warn!(section, "import section ignored: not a list");
        return None;
    }
    match Vec::<T>::deserialize(value) {
        Ok(items) => Some(items),
        Err(e) => {
            tracing::warn!(section, error = %e, "import section ignored: malformed entries");
            None
        }
    }
}

/// First id that is repeated or leaves no room for another id.
fn first_bad_id(ids: impl IntoIterator<Item = u64>) -> Option<(u64, &'static str)> {
    let mut seen = HashSet::new();
    ids.into_iter().find_map(|id| {
        if id == u64::MAX {
            Some((id, "out of range"))
        } else if !seen.insert(id) {
            Some((id, "duplicate"))
        } else {
            None
        }
    })
}

fn ids_usable(ids: impl IntoIterator<Item = u64>, section: &str) -> bool {
    match first_bad_id(ids) {
        Some((id, problem)) => {
            tracing::warn!(section, id, problem, "import section ignored: unusable id");
            false
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn novel_json() -> Value {
        json!({
            "id": 1,
            "title": "Overgeared",
            "url": "https://example.com/overgeared",
            "currentChapter": 2156,
            "userProgress": 1400,
            "milestoneIncrement": 50,
            "milestoneTarget": 1450,
            "status": "active",
            "lastChecked": "2025-08-10T06:00:00Z"
        })
    }

    #[test]
    fn test_rejects_non_json() {
        let err = SnapshotPatch::parse(b"not json {").unwrap_err();
        assert!(matches!(err, TrackerError::Format(_)));
    }

    #[test]
    fn test_rejects_non_object() {
        let err = SnapshotPatch::parse(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, TrackerError::Format(_)));
    }

    #[test]
    fn test_decodes_full_export_shape() {
        let payload = json!({
            "novels": [novel_json()],
            "settings": {"email": "user@gmail.com", "dailyCheckTime": "08:00", "notificationsEnabled": true},
            "notifications": [{
                "id": 2,
                "message": "New chapters available for Overgeared (5 new chapters)",
                "timestamp": "2025-08-08T08:00:00.000Z",
                "type": "update",
                "read": false
            }],
            "exportDate": "2025-08-10T07:00:00.000Z",
            "somethingElse": 1
        });
        let patch = SnapshotPatch::parse(payload.to_string().as_bytes()).unwrap();
        let novels = patch.novels.unwrap();
        assert_eq!(novels.len(), 1);
        assert_eq!(novels[0].milestone_target, 1450);
        assert_eq!(patch.notifications.unwrap().len(), 1);
        assert_eq!(patch.settings.email.as_deref(), Some("user@gmail.com"));
    }

    #[test]
    fn test_malformed_sections_are_dropped() {
        let mut broken = novel_json();
        broken["userProgress"] = json!(-3);
        let payload = json!({
            "novels": [novel_json(), broken],
            "notifications": {"not": "a list"},
        });
        let patch = SnapshotPatch::parse(payload.to_string().as_bytes()).unwrap();
        assert!(patch.novels.is_none());
        assert!(patch.notifications.is_none());
        assert!(patch.is_empty());
    }

    #[test]
    fn test_repeated_ids_drop_the_section() {
        let mut second = novel_json();
        second["title"] = json!("Overgeared Side Stories");
        let note = json!({
            "id": 5,
            "message": "Settings saved successfully",
            "timestamp": "2025-08-08T08:00:00.000Z",
            "type": "update",
            "read": true
        });
        let payload = json!({
            "novels": [novel_json(), second],
            "notifications": [note.clone(), note],
        });
        let patch = SnapshotPatch::parse(payload.to_string().as_bytes()).unwrap();
        assert!(patch.novels.is_none());
        assert!(patch.notifications.is_none());
    }

    #[test]
    fn test_max_id_drops_the_section() {
        let mut novel = novel_json();
        novel["id"] = json!(u64::MAX);
        let payload = json!({"novels": [novel]});
        assert!(SnapshotPatch::parse(payload.to_string().as_bytes()).unwrap().novels.is_none());
    }

    #[test]
    fn test_decode_is_strict() {
        let full = json!({
            "novels": [novel_json()],
            "settings": {"email": "", "dailyCheckTime": "08:00", "notificationsEnabled": true},
            "notifications": [],
            "exportDate": "2025-08-10T07:00:00Z"
        });
        let snapshot = Snapshot::decode(full.to_string().as_bytes()).unwrap();
        assert_eq!(snapshot.novels.len(), 1);

        let mut broken = full.clone();
        broken["novels"][0]["userProgress"] = json!(-3);
        let err = Snapshot::decode(broken.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, TrackerError::Format(_)));

        let mut repeated = full.clone();
        repeated["novels"] = json!([novel_json(), novel_json()]);
        let err = Snapshot::decode(repeated.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, TrackerError::Format(_)));

        let err = Snapshot::decode(br#"{"settings": {}}"#).unwrap_err();
        assert!(matches!(err, TrackerError::Format(_)));
    }

    #[test]
    fn test_empty_object_is_empty_patch() {
        assert!(SnapshotPatch::parse(b"{}").unwrap().is_empty());
    }
}
