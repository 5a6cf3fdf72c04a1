//! Ranked per-device usage table with percentage shares

use crate::services::aggregator::{cost_from_kwh, kwh_from_seconds, round_to};
use crate::types::{AggregatedEntry, DateRange, Device, DeviceStatistics, DisplayMode, PeriodKey};
use std::cmp::Ordering;

/// Builds the device ranking table shown on the dashboard
pub struct Summarizer;

impl Summarizer {
    /// Ranked usage/cost table for all devices over `range`, descending by
    /// value, with percentage-of-total shares.
    ///
    /// A range within one calendar month reads the exact month rollup; any
    /// other range within one calendar year reads the year rollup; anything
    /// else sums every day- and month-granularity rollup whose bucket date
    /// falls inside the range. That last path mixes granularities and can
    /// count a day twice when its month rollup also lies in range — callers
    /// navigating whole calendar periods never feed it overlapping data.
    ///
    /// Percentages are computed over the rounded per-device values and sum
    /// to 100 within rounding, or are all 0 when the total is 0.
    pub fn device_table(
        entries: &[AggregatedEntry],
        devices: &[Device],
        rate_per_kwh: f64,
        mode: DisplayMode,
        range: DateRange,
    ) -> Vec<DeviceStatistics> {
        let mut rows: Vec<DeviceStatistics> = devices
            .iter()
            .map(|device| {
                let kwh = Self::kwh_for_range(entries, device, range);
                let cost = cost_from_kwh(kwh, rate_per_kwh);
                let value = match mode {
                    DisplayMode::Kwh => kwh,
                    DisplayMode::Cost => cost,
                };
                DeviceStatistics {
                    device_id: device.device_id.clone(),
                    name: device.label.clone(),
                    category: device.category.clone(),
                    kwh: round_to(kwh, 2),
                    cost: round_to(cost, 2),
                    value: round_to(value, 2),
                    percentage: 0.0,
                }
            })
            .collect();

        let total: f64 = rows.iter().map(|r| r.value).sum();
        for row in &mut rows {
            row.percentage = if total > 0.0 {
                round_to(row.value / total * 100.0, 1)
            } else {
                0.0
            };
        }

        // Stable sort keeps input order on ties
        rows.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        rows
    }

    fn kwh_for_range(entries: &[AggregatedEntry], device: &Device, range: DateRange) -> f64 {
        if let Some((year, month)) = range.single_month() {
            let key = PeriodKey::month(year, month);
            Self::exact_match_kwh(entries, device, &key)
        } else if let Some(year) = range.single_year() {
            let key = PeriodKey::year(year);
            Self::exact_match_kwh(entries, device, &key)
        } else {
            entries
                .iter()
                .filter(|e| e.device_id == device.device_id)
                .filter_map(|e| e.period.bucket_date().map(|d| (e, d)))
                .filter(|(_, bucket_date)| range.contains(*bucket_date))
                .map(|(e, _)| kwh_from_seconds(device.wattage_on, e.total_time_on))
                .sum()
        }
    }

    fn exact_match_kwh(entries: &[AggregatedEntry], device: &Device, key: &PeriodKey) -> f64 {
        entries
            .iter()
            .find(|e| e.device_id == device.device_id && e.period == *key)
            .map(|e| kwh_from_seconds(device.wattage_on, e.total_time_on))
            .unwrap_or(0.0)
    }
}
