//! Well-known `UserAssist` category GUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category tracking executable launches.
pub const EXECUTABLE_LAUNCH_GUID: &str = "{CEBFF5CD-ACE2-4F4F-9178-9926F41749EA}";

/// Category tracking shortcut (`.lnk`) launches.
pub const SHORTCUT_LAUNCH_GUID: &str = "{F4E57C4B-2036-45F0-A9AB-443BCFE33D9F}";

/// Informational label for a GUID bucket. Does not affect decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownGuid {
    ExecutableLaunch,
    ShortcutLaunch,
    Other,
}

impl KnownGuid {
    /// Classifies a bucket GUID. Registry key names compare case-insensitively.
    #[must_use]
    pub fn from_guid(guid: &str) -> Self {
        if guid.eq_ignore_ascii_case(EXECUTABLE_LAUNCH_GUID) {
            Self::ExecutableLaunch
        } else if guid.eq_ignore_ascii_case(SHORTCUT_LAUNCH_GUID) {
            Self::ShortcutLaunch
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ExecutableLaunch => "executable_launch",
            Self::ShortcutLaunch => "shortcut_launch",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for KnownGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_guids() {
        assert_eq!(
            KnownGuid::from_guid(EXECUTABLE_LAUNCH_GUID),
            KnownGuid::ExecutableLaunch
        );
        assert_eq!(
            KnownGuid::from_guid("{f4e57c4b-2036-45f0-a9ab-443bcfe33d9f}"),
            KnownGuid::ShortcutLaunch
        );
        assert_eq!(
            KnownGuid::from_guid("{0D6D4F41-2994-4BA0-8FEF-620E43CD2812}"),
            KnownGuid::Other
        );
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&KnownGuid::ShortcutLaunch).unwrap();
        assert_eq!(json, "\"shortcut_launch\"");
        assert_eq!(KnownGuid::Other.to_string(), "other");
    }
}
