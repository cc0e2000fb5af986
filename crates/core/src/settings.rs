//! User settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::input::parse_check_time;

/// Process-wide user settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Address for update mails
    pub email: String,

    /// Daily check time, `HH:MM`
    pub daily_check_time: String,

    /// Whether notifications are produced for the user
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            email: String::new(),
            daily_check_time: "08:00".to_string(),
            notifications_enabled: true,
        }
    }
}

/// Field-wise settings update decoded from an import payload.
///
/// A field is `Some` only if it was present with the right JSON type. The
/// check time must also parse as `HH:MM`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    /// New email
    pub email: Option<String>,
    /// New daily check time
    pub daily_check_time: Option<String>,
    /// New notifications flag
    pub notifications_enabled: Option<bool>,
}

impl SettingsPatch {
    /// Pick the well-typed known fields out of a JSON value.
    ///
    /// Anything that is not an object yields an empty patch.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            email: obj.get("email").and_then(Value::as_str).map(str::to_string),
            daily_check_time: obj
                .get("dailyCheckTime")
                .and_then(Value::as_str)
                .and_then(|raw| match parse_check_time(raw) {
                    Ok(time) => Some(time),
                    Err(e) => {
                        tracing::warn!(error = %e, "import setting ignored: dailyCheckTime");
                        None
                    }
                }),
            notifications_enabled: obj.get("notificationsEnabled").and_then(Value::as_bool),
        }
    }

    /// Whether the patch carries no fields.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.daily_check_time.is_none() && self.notifications_enabled.is_none()
    }

    /// Apply present fields and return how many were applied.
    pub fn apply_to(self, settings: &mut Settings) -> usize {
        let mut applied = 0;
        if let Some(email) = self.email {
            settings.email = email;
            applied += 1;
        }
        if let Some(time) = self.daily_check_time {
            settings.daily_check_time = time;
            applied += 1;
        }
        if let Some(enabled) = self.notifications_enabled {
            settings.notifications_enabled = enabled;
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.email, "");
        assert_eq!(s.daily_check_time, "08:00");
        assert!(s.notifications_enabled);
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut s = Settings::default();
        let applied = SettingsPatch::from_value(&json!({"email": "x@y.com"})).apply_to(&mut s);
        assert_eq!(applied, 1);
        assert_eq!(s.email, "x@y.com");
        assert_eq!(s.daily_check_time, "08:00");
        assert!(s.notifications_enabled);
    }

    #[test]
    fn test_patch_ignores_wrong_types() {
        let patch = SettingsPatch::from_value(&json!({
            "email": 5,
            "dailyCheckTime": "21:30",
            "notificationsEnabled": "yes",
            "theme": "dark"
        }));
        assert_eq!(patch.email, None);
        assert_eq!(patch.daily_check_time.as_deref(), Some("21:30"));
        assert_eq!(patch.notifications_enabled, None);
    }

    #[test]
    fn test_patch_drops_unparseable_check_time() {
        let patch = SettingsPatch::from_value(&json!({"dailyCheckTime": "later"}));
        assert!(patch.is_empty());

        let patch = SettingsPatch::from_value(&json!({"dailyCheckTime": " 06:45 "}));
        assert_eq!(patch.daily_check_time.as_deref(), Some("06:45"));
    }

    #[test]
    fn test_non_object_is_empty_patch() {
        assert!(SettingsPatch::from_value(&json!([1, 2])).is_empty());
        assert!(SettingsPatch::from_value(&json!(null)).is_empty());
    }
}
