//! Device inventory and user settings records

use serde::{Deserialize, Serialize};

/// A monitored piece of equipment.
///
/// Read-only for the aggregation core; each computation treats the device
/// list as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,
    pub label: String,
    pub category: String,
    /// Draw in watts while on; the multiplier for all energy derivation
    pub wattage_on: f64,
    #[serde(default)]
    pub wattage_standby: f64,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
}

/// Per-user billing settings from the settings endpoint.
///
/// Only the base rate drives cost derivation; peak/off-peak rates are
/// carried for the settings UI but unused here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub energy_provider: String,
    #[serde(rename = "baseRatePerKWh", default)]
    pub base_rate_per_kwh: f64,
    #[serde(rename = "peakRatePerKWh", default)]
    pub peak_rate_per_kwh: f64,
    #[serde(rename = "offPeakRatePerKWh", default)]
    pub off_peak_rate_per_kwh: f64,
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            energy_provider: String::new(),
            base_rate_per_kwh: 0.0,
            peak_rate_per_kwh: 0.0,
            off_peak_rate_per_kwh: 0.0,
            time_zone: None,
        }
    }
}
