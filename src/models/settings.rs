use serde::{Deserialize, Serialize};

/// User preferences.
///
/// Fields default individually so records persisted by older app revisions
/// that lacked a field still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub has_completed_onboarding: bool,
    #[serde(default)]
    pub reminders_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            has_completed_onboarding: false,
            reminders_enabled: false,
        }
    }
}

/// Partial settings update; unset fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub has_completed_onboarding: Option<bool>,
    pub reminders_enabled: Option<bool>,
}

impl Settings {
    /// Shallow-merge `patch` into this record.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(value) = patch.has_completed_onboarding {
            self.has_completed_onboarding = value;
        }
        if let Some(value) = patch.reminders_enabled {
            self.reminders_enabled = value;
        }
    }
}
