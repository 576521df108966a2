//! Wire format of the Landroid API.
//!
//! The status endpoint abbreviates every key; these structs give them names
//! and nothing outside of `models` should see them.

pub(crate) mod status {
    use serde::{Deserialize, Deserializer};

    #[derive(Debug, Deserialize)]
    pub(crate) struct StatusResponse {
        pub(crate) cfg: StatusConfig,
        pub(crate) dat: StatusData,
    }

    /// Settings the owner can change, plus the timestamp of the report.
    #[derive(Debug, Deserialize)]
    pub(crate) struct StatusConfig {
        #[serde(rename = "dt")]
        pub(crate) date: String,
        #[serde(rename = "tm")]
        pub(crate) time: String,
        #[serde(rename = "rd")]
        pub(crate) rain_delay: i64,
        #[serde(rename = "sn")]
        pub(crate) serial_number: String,
    }

    /// Live telemetry.
    #[derive(Debug, Deserialize)]
    pub(crate) struct StatusData {
        #[serde(rename = "ls")]
        pub(crate) status_code: i64,
        #[serde(rename = "le")]
        pub(crate) error_code: i64,
        #[serde(rename = "fw", deserialize_with = "string_or_number")]
        pub(crate) firmware: String,
        #[serde(rename = "mac")]
        pub(crate) mac_address: Option<String>,
        #[serde(rename = "bt")]
        pub(crate) battery: Option<BatteryData>,
        #[serde(rename = "st")]
        pub(crate) statistics: StatisticsData,
        #[serde(rename = "dmp")]
        pub(crate) orientation: [f64; 3],
        #[serde(rename = "rsi")]
        pub(crate) wifi_rsi: i64,
    }

    #[derive(Debug, Deserialize)]
    pub(crate) struct BatteryData {
        #[serde(rename = "t")]
        pub(crate) temperature: f64,
        #[serde(rename = "v")]
        pub(crate) voltage: f64,
        #[serde(rename = "p")]
        pub(crate) level: f64,
        #[serde(rename = "c", deserialize_with = "flag")]
        pub(crate) charging: bool,
        #[serde(rename = "nr")]
        pub(crate) charge_cycle: u64,
    }

    #[derive(Debug, Deserialize)]
    pub(crate) struct StatisticsData {
        #[serde(rename = "b")]
        pub(crate) blade_time: u64,
        #[serde(rename = "d")]
        pub(crate) total_distance: u64,
        #[serde(rename = "wt")]
        pub(crate) work_time: u64,
    }

    // Firmware versions arrive as either "3.51" or 3.51 depending on the model.
    fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) => number.to_string(),
        })
    }

    // Charging state is 0/1/2 on most firmware, a plain bool on some.
    fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Int(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Bool(value) => value,
            Raw::Int(value) => value != 0,
        })
    }
}
