use serde::Serialize;
use std::fmt;

/// Activity reported by the mower in `dat.ls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MowerCode {
    Unknown,
    Idle,
    Home,
    StartSequence,
    LeavingHome,
    FollowWire,
    SearchingHome,
    SearchingWire,
    Mowing,
    Lifted,
    Trapped,
    BladeBlocked,
    Debug,
    RemoteControl,
    GoingHome,
    ZoneTraining,
    BorderCut,
    SearchingZone,
    Pause,
}

impl MowerCode {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => MowerCode::Idle,
            1 => MowerCode::Home,
            2 => MowerCode::StartSequence,
            3 => MowerCode::LeavingHome,
            4 => MowerCode::FollowWire,
            5 => MowerCode::SearchingHome,
            6 => MowerCode::SearchingWire,
            7 => MowerCode::Mowing,
            8 => MowerCode::Lifted,
            9 => MowerCode::Trapped,
            10 => MowerCode::BladeBlocked,
            11 => MowerCode::Debug,
            12 => MowerCode::RemoteControl,
            30 => MowerCode::GoingHome,
            31 => MowerCode::ZoneTraining,
            32 => MowerCode::BorderCut,
            33 => MowerCode::SearchingZone,
            34 => MowerCode::Pause,
            _ => MowerCode::Unknown,
        }
    }

    /// Vendor number for this state; `Unknown` maps to -1.
    pub fn code(self) -> i64 {
        match self {
            MowerCode::Unknown => -1,
            MowerCode::Idle => 0,
            MowerCode::Home => 1,
            MowerCode::StartSequence => 2,
            MowerCode::LeavingHome => 3,
            MowerCode::FollowWire => 4,
            MowerCode::SearchingHome => 5,
            MowerCode::SearchingWire => 6,
            MowerCode::Mowing => 7,
            MowerCode::Lifted => 8,
            MowerCode::Trapped => 9,
            MowerCode::BladeBlocked => 10,
            MowerCode::Debug => 11,
            MowerCode::RemoteControl => 12,
            MowerCode::GoingHome => 30,
            MowerCode::ZoneTraining => 31,
            MowerCode::BorderCut => 32,
            MowerCode::SearchingZone => 33,
            MowerCode::Pause => 34,
        }
    }
}

impl From<i64> for MowerCode {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for MowerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MowerCode::Unknown => "Unknown",
            MowerCode::Idle => "Idle",
            MowerCode::Home => "Home",
            MowerCode::StartSequence => "Start sequence",
            MowerCode::LeavingHome => "Leaving home",
            MowerCode::FollowWire => "Following wire",
            MowerCode::SearchingHome => "Searching home",
            MowerCode::SearchingWire => "Searching wire",
            MowerCode::Mowing => "Mowing",
            MowerCode::Lifted => "Lifted",
            MowerCode::Trapped => "Trapped",
            MowerCode::BladeBlocked => "Blade blocked",
            MowerCode::Debug => "Debug",
            MowerCode::RemoteControl => "Remote control",
            MowerCode::GoingHome => "Going home",
            MowerCode::ZoneTraining => "Zone training",
            MowerCode::BorderCut => "Border cut",
            MowerCode::SearchingZone => "Searching zone",
            MowerCode::Pause => "Paused",
        };
        f.write_str(label)
    }
}

/// Fault reported by the mower in `dat.le`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MowerErrorCode {
    Unknown,
    NoError,
    Trapped,
    Lifted,
    WireMissing,
    OutsideWire,
    Raining,
}

impl MowerErrorCode {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => MowerErrorCode::NoError,
            1 => MowerErrorCode::Trapped,
            2 => MowerErrorCode::Lifted,
            3 => MowerErrorCode::WireMissing,
            4 => MowerErrorCode::OutsideWire,
            5 => MowerErrorCode::Raining,
            _ => MowerErrorCode::Unknown,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            MowerErrorCode::Unknown => -1,
            MowerErrorCode::NoError => 0,
            MowerErrorCode::Trapped => 1,
            MowerErrorCode::Lifted => 2,
            MowerErrorCode::WireMissing => 3,
            MowerErrorCode::OutsideWire => 4,
            MowerErrorCode::Raining => 5,
        }
    }

    pub fn is_error(self) -> bool {
        self != MowerErrorCode::NoError
    }
}

impl From<i64> for MowerErrorCode {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for MowerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MowerErrorCode::Unknown => "Unknown",
            MowerErrorCode::NoError => "No error",
            MowerErrorCode::Trapped => "Trapped",
            MowerErrorCode::Lifted => "Lifted",
            MowerErrorCode::WireMissing => "Wire missing",
            MowerErrorCode::OutsideWire => "Outside wire",
            MowerErrorCode::Raining => "Raining",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_status_codes() {
        assert_eq!(MowerCode::from_code(0), MowerCode::Idle);
        assert_eq!(MowerCode::from_code(1), MowerCode::Home);
        assert_eq!(MowerCode::from_code(7), MowerCode::Mowing);
        assert_eq!(MowerCode::from_code(34), MowerCode::Pause);
        assert_eq!(MowerCode::Mowing.code(), 7);
        assert_eq!(MowerCode::GoingHome.code(), 30);
    }

    #[test]
    fn test_unknown_status_codes() {
        // The gap between 12 and 30 is unassigned
        assert_eq!(MowerCode::from_code(13), MowerCode::Unknown);
        assert_eq!(MowerCode::from_code(-1), MowerCode::Unknown);
        assert_eq!(MowerCode::from_code(999), MowerCode::Unknown);
        assert_eq!(MowerCode::Unknown.code(), -1);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(MowerErrorCode::from(0), MowerErrorCode::NoError);
        assert_eq!(MowerErrorCode::from(5), MowerErrorCode::Raining);
        assert_eq!(MowerErrorCode::from(6), MowerErrorCode::Unknown);
        assert_eq!(MowerErrorCode::from(-7), MowerErrorCode::Unknown);
        assert!(!MowerErrorCode::NoError.is_error());
        assert!(MowerErrorCode::Raining.is_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(MowerCode::SearchingHome.to_string(), "Searching home");
        assert_eq!(MowerErrorCode::WireMissing.to_string(), "Wire missing");
    }
}
