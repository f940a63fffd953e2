use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn ps_from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "granted" => Some(Self::Granted),
            "denied" => Some(Self::Denied),
            "undetermined" => Some(Self::Undetermined),
            _ => None,
        }
    }

    pub fn ps_as_str(&self) -> &'static str {
        match self {
            PermissionStatus::Granted => "granted",
            PermissionStatus::Denied => "denied",
            PermissionStatus::Undetermined => "undetermined",
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Snapshot of the OS permission state for location access.
/// `can_ask_again = false` means a fresh prompt is a no-op and the user must
/// be redirected to system settings instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPermissionState {
    pub status: PermissionStatus,
    pub can_ask_again: bool,
    pub services_enabled: bool,
}
