//! Usage records and derived report types

use crate::types::HomewattError;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Time-bucket resolution of a stored usage rollup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Day,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl FromStr for Granularity {
    type Err = HomewattError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Granularity::Day),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            other => Err(HomewattError::Parse(format!(
                "unknown granularity '{other}'"
            ))),
        }
    }
}

/// Compound `granularity#value` key identifying one usage bucket.
///
/// The value part is `YYYY-MM-DD`, `YYYY-MM` or `YYYY` depending on the
/// granularity. Keys are compared as plain strings, so construction always
/// zero-pads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeriodKey {
    pub granularity: Granularity,
    pub value: String,
}

impl PeriodKey {
    pub fn day(date: NaiveDate) -> Self {
        Self {
            granularity: Granularity::Day,
            value: date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self {
            granularity: Granularity::Month,
            value: format!("{year:04}-{month:02}"),
        }
    }

    pub fn year(year: i32) -> Self {
        Self {
            granularity: Granularity::Year,
            value: format!("{year:04}"),
        }
    }

    /// The calendar date this bucket starts on, for range filtering.
    ///
    /// Year rollups have no place on a day/month axis and yield None, as
    /// does a malformed value.
    pub fn bucket_date(&self) -> Option<NaiveDate> {
        match self.granularity {
            Granularity::Day => NaiveDate::parse_from_str(&self.value, "%Y-%m-%d").ok(),
            Granularity::Month => {
                NaiveDate::parse_from_str(&format!("{}-01", self.value), "%Y-%m-%d").ok()
            }
            Granularity::Year => None,
        }
    }
}

impl FromStr for PeriodKey {
    type Err = HomewattError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (granularity, value) = s
            .split_once('#')
            .ok_or_else(|| HomewattError::Parse(format!("period key '{s}' missing '#'")))?;
        if value.is_empty() {
            return Err(HomewattError::Parse(format!(
                "period key '{s}' has empty value"
            )));
        }
        Ok(Self {
            granularity: granularity.parse()?,
            value: value.to_string(),
        })
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.granularity.as_str(), self.value)
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One precomputed usage rollup for a device over one period bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedEntry {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    pub period: PeriodKey,
    /// Seconds the device spent in the on state during the bucket
    pub total_time_on: u64,
    /// Count of off→on transitions during the bucket
    #[serde(default)]
    pub times_on: u32,
}

/// Whether derived values are shown as energy or estimated cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Kwh,
    Cost,
}

impl DisplayMode {
    pub fn unit(&self) -> &'static str {
        match self {
            DisplayMode::Kwh => "kWh",
            DisplayMode::Cost => "$",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DisplayMode::Kwh => "kwh",
            DisplayMode::Cost => "cost",
        };
        f.write_str(s)
    }
}

/// One bucket of a chart series: date (or month) label and derived value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub value: f64,
}

/// Per-device row of the ranked usage table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceStatistics {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    pub name: String,
    pub category: String,
    pub kwh: f64,
    pub cost: f64,
    /// kwh or cost depending on the display mode
    pub value: f64,
    /// Share of the total across all devices, 0 when the total is 0
    pub percentage: f64,
}

/// Scalar usage summary for one device over one exact period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceTotals {
    pub total_usage_kwh: f64,
    pub total_cost: f64,
    pub times_on: u32,
    /// Rendered as "{days}d {hours}h"
    pub total_time_on: String,
}
