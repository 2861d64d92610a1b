use serde::{Deserialize, Serialize};

/// User preferences persisted under the `preferences` key.
///
/// Theme and difficulty stay free-form strings so the stored shape remains
/// compatible with values written by earlier versions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub theme: String,
    pub difficulty: String,
    pub auto_next: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            difficulty: "medium".to_string(),
            auto_next: false,
        }
    }
}
