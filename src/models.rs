use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schemas::status::StatusResponse;
use crate::states::{MowerCode, MowerErrorCode};

/// Format of the `dt` and `tm` fields joined by a space.
const LAST_UPDATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// A mower registered to the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mower {
    pub id: u64,
    pub serial_number: String,
    pub mac_address: String,
    pub name: String,
    pub online: bool,
    pub locked: bool,
}

/// Snapshot of a mower's live telemetry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MowerStatus {
    pub status_code: MowerCode,
    pub error_code: MowerErrorCode,
    pub config: MowerConfig,
    /// `None` when the mower does not report battery telemetry.
    pub battery: Option<Battery>,
    pub statistics: Statistics,
    pub orientation: Orientation,
    pub wifi_rsi: i64,
    pub last_update: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MowerConfig {
    /// Minutes to wait after rain before mowing again.
    pub rain_delay: i64,
    pub serial_number: String,
    pub mac_address: Option<String>,
    pub firmware: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Battery {
    /// Degrees Celsius
    pub temperature: f64,
    pub voltage: f64,
    /// Charge level in percent
    pub level: f64,
    pub charging: bool,
    pub charge_cycle: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Minutes
    pub blade_time: u64,
    /// Minutes
    pub work_time: u64,
    /// Meters
    pub total_distance: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Orientation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl From<[f64; 3]> for Orientation {
    fn from([pitch, yaw, roll]: [f64; 3]) -> Self {
        Self { pitch, yaw, roll }
    }
}

impl MowerStatus {
    /// Decode the body of a `/product-items/{serial}/status` response.
    pub fn from_json(json: &str) -> Result<Self> {
        let response = serde_json::from_str::<StatusResponse>(json)
            .map_err(|e| Error::Decode(format!("Failed to parse mower status: {}", e)))?;
        Self::from_response(response)
    }

    pub fn is_charging(&self) -> bool {
        self.battery.as_ref().map(|b| b.charging).unwrap_or(false)
    }

    fn from_response(response: StatusResponse) -> Result<Self> {
        let StatusResponse { cfg, dat } = response;

        let timestamp = format!("{} {}", cfg.date, cfg.time);
        let last_update = NaiveDateTime::parse_from_str(&timestamp, LAST_UPDATE_FORMAT)
            .map_err(|e| {
                Error::Decode(format!("Invalid last update `{}`: {}", timestamp, e))
            })?;

        Ok(MowerStatus {
            status_code: MowerCode::from_code(dat.status_code),
            error_code: MowerErrorCode::from_code(dat.error_code),
            config: MowerConfig {
                rain_delay: cfg.rain_delay,
                serial_number: cfg.serial_number,
                mac_address: dat.mac_address,
                firmware: dat.firmware,
            },
            battery: dat.battery.map(|bt| Battery {
                temperature: bt.temperature,
                voltage: bt.voltage,
                level: bt.level,
                charging: bt.charging,
                charge_cycle: bt.charge_cycle,
            }),
            statistics: Statistics {
                blade_time: dat.statistics.blade_time,
                work_time: dat.statistics.work_time,
                total_distance: dat.statistics.total_distance,
            },
            orientation: Orientation::from(dat.orientation),
            wifi_rsi: dat.wifi_rsi,
            last_update,
        })
    }
}
