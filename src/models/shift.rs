use super::geo::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle position of a shift. Monotonic: booked → started → completed,
/// never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftStatus {
    Booked,
    Started,
    Completed,
}

impl ShiftStatus {
    pub fn st_from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "booked" => Some(Self::Booked),
            "started" => Some(Self::Started),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn st_as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Booked => "booked",
            ShiftStatus::Started => "started",
            ShiftStatus::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ShiftStatus::Completed)
    }

    /// The only legal edges are Booked→Started and Started→Completed.
    pub fn can_transition_to(&self, target: ShiftStatus) -> bool {
        matches!(
            (self, target),
            (ShiftStatus::Booked, ShiftStatus::Started)
                | (ShiftStatus::Started, ShiftStatus::Completed)
        )
    }
}

/// One scheduled work period as known to the remote scheduling service.
/// Created remotely in `Booked`; this core mutates it exactly twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRecord {
    pub schedule_id: String,
    pub worker_id: String,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_end: Option<DateTime<Utc>>,
    pub status: ShiftStatus,
    pub location_at_start: Option<GeoPoint>,
    pub location_at_end: Option<GeoPoint>,
    pub notes: Option<String>,
}

/// Idempotent "set to target state" write submitted to the remote boundary.
/// Applying the same mutation twice is a no-op on the server, which makes it
/// safe to resubmit after a partial failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftMutation {
    pub schedule_id: String,
    pub worker_id: String,
    pub target: ShiftStatus,
    pub timestamp: DateTime<Utc>,
    pub location: Option<GeoPoint>,
    pub notes: Option<String>,
}

impl ShiftMutation {
    pub fn start(
        schedule_id: &str,
        worker_id: &str,
        timestamp: DateTime<Utc>,
        location: Option<GeoPoint>,
    ) -> Self {
        Self {
            schedule_id: schedule_id.to_string(),
            worker_id: worker_id.to_string(),
            target: ShiftStatus::Started,
            timestamp,
            location,
            notes: None,
        }
    }

    pub fn complete(
        schedule_id: &str,
        worker_id: &str,
        timestamp: DateTime<Utc>,
        location: Option<GeoPoint>,
        notes: Option<String>,
    ) -> Self {
        Self {
            schedule_id: schedule_id.to_string(),
            worker_id: worker_id.to_string(),
            target: ShiftStatus::Completed,
            timestamp,
            location,
            notes,
        }
    }
}
