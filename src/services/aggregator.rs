//! Usage aggregation: energy/cost derivation and chart bucketing

use crate::types::{
    AggregatedEntry, ChartPoint, DateRange, Device, DeviceTotals, DisplayMode, Granularity,
    HomewattError, Period, PeriodKey, Result, StatsPeriod,
};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// Watt-seconds in one kWh (1000 W × 3600 s)
const WATT_SECONDS_PER_KWH: f64 = 3_600_000.0;

/// Single conversion routine for turning on-time into energy.
///
/// Every kWh figure in the crate goes through here.
pub fn kwh_from_seconds(wattage_watts: f64, seconds_on: u64) -> f64 {
    (wattage_watts * seconds_on as f64) / WATT_SECONDS_PER_KWH
}

pub fn cost_from_kwh(kwh: f64, rate_per_kwh: f64) -> f64 {
    kwh * rate_per_kwh
}

/// Render on-time seconds as `"{days}d {hours}h"`.
///
/// Minutes and seconds are truncated, not rounded.
pub fn format_time_on(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    format!("{days}d {hours}h")
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Aggregator for charting series and per-device scalar totals
pub struct Aggregator;

impl Aggregator {
    /// Gap-free chart series for the selected period.
    ///
    /// Month ranges bucket day rollups per day; year ranges bucket month
    /// rollups per month. Every bucket in the range is pre-populated with 0
    /// so the chart never loses x-axis ticks, and output order is
    /// chronological regardless of entry order. Entries referencing unknown
    /// devices or dates outside the range are skipped. Values are rounded to
    /// 2 decimals. Week has no stored rollup granularity to bucket from and
    /// returns `UnsupportedPeriod`.
    pub fn chart_series(
        entries: &[AggregatedEntry],
        devices: &[Device],
        rate_per_kwh: f64,
        mode: DisplayMode,
        period: Period,
        range: DateRange,
    ) -> Result<Vec<ChartPoint>> {
        match period {
            Period::Month => Ok(Self::daily_series(entries, devices, rate_per_kwh, mode, range)),
            Period::Year => Ok(Self::monthly_series(entries, devices, rate_per_kwh, mode, range)),
            Period::Week => Err(HomewattError::UnsupportedPeriod(Period::Week)),
        }
    }

    fn daily_series(
        entries: &[AggregatedEntry],
        devices: &[Device],
        rate_per_kwh: f64,
        mode: DisplayMode,
        range: DateRange,
    ) -> Vec<ChartPoint> {
        let keys = range.day_keys();
        let mut buckets: HashMap<String, f64> = keys.iter().map(|k| (k.clone(), 0.0)).collect();
        let index = Self::device_index(devices);

        for entry in entries {
            if entry.period.granularity != Granularity::Day {
                continue;
            }
            let Some(device) = index.get(entry.device_id.as_str()) else {
                continue;
            };
            // Pre-populated keys double as the in-range check
            let Some(bucket) = buckets.get_mut(entry.period.value.as_str()) else {
                continue;
            };
            let kwh = kwh_from_seconds(device.wattage_on, entry.total_time_on);
            *bucket += match mode {
                DisplayMode::Kwh => kwh,
                DisplayMode::Cost => cost_from_kwh(kwh, rate_per_kwh),
            };
        }

        Self::collect_points(keys, &buckets)
    }

    fn monthly_series(
        entries: &[AggregatedEntry],
        devices: &[Device],
        rate_per_kwh: f64,
        mode: DisplayMode,
        range: DateRange,
    ) -> Vec<ChartPoint> {
        let keys = range.month_keys();
        let mut buckets: HashMap<String, f64> = keys.iter().map(|k| (k.clone(), 0.0)).collect();
        let index = Self::device_index(devices);

        for entry in entries {
            if entry.period.granularity != Granularity::Month {
                continue;
            }
            let Some(device) = index.get(entry.device_id.as_str()) else {
                continue;
            };
            let Some(bucket) = buckets.get_mut(entry.period.value.as_str()) else {
                continue;
            };
            let kwh = kwh_from_seconds(device.wattage_on, entry.total_time_on);
            *bucket += match mode {
                DisplayMode::Kwh => kwh,
                DisplayMode::Cost => cost_from_kwh(kwh, rate_per_kwh),
            };
        }

        Self::collect_points(keys, &buckets)
    }

    /// Exact-period scalar totals for one device (stat card).
    ///
    /// Looks up the single `month#YYYY-MM` or `year#YYYY` rollup for the
    /// anchor; a missing rollup means no recorded usage and yields an
    /// all-zero result, never an error.
    pub fn device_totals(
        entries: &[AggregatedEntry],
        device_id: &str,
        period: StatsPeriod,
        anchor: NaiveDate,
        wattage_on: f64,
        rate_per_kwh: f64,
    ) -> DeviceTotals {
        let key = match period {
            StatsPeriod::Month => PeriodKey::month(anchor.year(), anchor.month()),
            StatsPeriod::Year => PeriodKey::year(anchor.year()),
        };

        let Some(entry) = entries
            .iter()
            .find(|e| e.device_id == device_id && e.period == key)
        else {
            return DeviceTotals {
                total_usage_kwh: 0.0,
                total_cost: 0.0,
                times_on: 0,
                total_time_on: "0d 0h".to_string(),
            };
        };

        let kwh = kwh_from_seconds(wattage_on, entry.total_time_on);
        DeviceTotals {
            total_usage_kwh: round_to(kwh, 1),
            total_cost: round_to(cost_from_kwh(kwh, rate_per_kwh), 2),
            times_on: entry.times_on,
            total_time_on: format_time_on(entry.total_time_on),
        }
    }

    fn device_index(devices: &[Device]) -> HashMap<&str, &Device> {
        devices.iter().map(|d| (d.device_id.as_str(), d)).collect()
    }

    fn collect_points(keys: Vec<String>, buckets: &HashMap<String, f64>) -> Vec<ChartPoint> {
        keys.into_iter()
            .map(|key| {
                let value = round_to(buckets[&key], 2);
                ChartPoint { date: key, value }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_device(id: &str, wattage_on: f64) -> Device {
        Device {
            device_id: id.to_string(),
            label: format!("Device {id}"),
            category: "appliance".to_string(),
            wattage_on,
            wattage_standby: 0.0,
            brand: None,
            model: None,
            room: None,
        }
    }

    fn make_entry(device_id: &str, period: &str, total_time_on: u64, times_on: u32) -> AggregatedEntry {
        AggregatedEntry {
            device_id: device_id.to_string(),
            period: period.parse().unwrap(),
            total_time_on,
            times_on,
        }
    }

    // ========== conversion tests ==========

    #[test]
    fn test_kwh_from_seconds_known_fixture() {
        // 100 W for 3600 s is exactly 0.1 kWh
        assert!((kwh_from_seconds(100.0, 3600) - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_kwh_from_seconds_zero_inputs() {
        assert_eq!(kwh_from_seconds(0.0, 3600), 0.0);
        assert_eq!(kwh_from_seconds(100.0, 0), 0.0);
    }

    #[test]
    fn test_cost_from_kwh() {
        assert!((cost_from_kwh(2.0, 0.15) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_format_time_on_truncates_minutes() {
        assert_eq!(format_time_on(0), "0d 0h");
        assert_eq!(format_time_on(7200), "0d 2h");
        assert_eq!(format_time_on(90_000), "1d 1h"); // 25h
        assert_eq!(format_time_on(3599), "0d 0h"); // 59m59s drops, not rounds
        assert_eq!(format_time_on(86_400 * 4 + 3600 * 21), "4d 21h");
    }

    // ========== chart_series() month period ==========

    #[test]
    fn test_month_series_no_entries_is_zero_filled() {
        let devices = vec![make_device("d1", 100.0)];
        let range = DateRange::new(date(2024, 2, 1), date(2024, 2, 29));

        let points =
            Aggregator::chart_series(&[], &devices, 0.15, DisplayMode::Kwh, Period::Month, range)
                .unwrap();

        assert_eq!(points.len(), 29);
        assert_eq!(points[0].date, "2024-02-01");
        assert_eq!(points[28].date, "2024-02-29");
        assert!(points.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_month_series_sums_devices_into_one_day() {
        let devices = vec![make_device("d1", 1000.0), make_device("d2", 500.0)];
        let entries = vec![
            make_entry("d1", "day#2024-06-10", 3600, 1), // 1.0 kWh
            make_entry("d2", "day#2024-06-10", 7200, 2), // 1.0 kWh
        ];
        let range = DateRange::new(date(2024, 6, 1), date(2024, 6, 30));

        let points = Aggregator::chart_series(
            &entries,
            &devices,
            0.15,
            DisplayMode::Kwh,
            Period::Month,
            range,
        )
        .unwrap();

        let point = points.iter().find(|p| p.date == "2024-06-10").unwrap();
        assert!((point.value - 2.0).abs() < f64::EPSILON);
        // All other days untouched
        assert_eq!(points.iter().filter(|p| p.value != 0.0).count(), 1);
    }

    #[test]
    fn test_month_series_skips_unknown_device() {
        let devices = vec![make_device("d1", 1000.0)];
        let entries = vec![make_entry("ghost", "day#2024-06-10", 3600, 1)];
        let range = DateRange::new(date(2024, 6, 1), date(2024, 6, 30));

        let points = Aggregator::chart_series(
            &entries,
            &devices,
            0.15,
            DisplayMode::Kwh,
            Period::Month,
            range,
        )
        .unwrap();

        assert!(points.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_month_series_skips_out_of_range_and_wrong_granularity() {
        let devices = vec![make_device("d1", 1000.0)];
        let entries = vec![
            make_entry("d1", "day#2024-05-31", 3600, 1),   // before range
            make_entry("d1", "day#2024-07-01", 3600, 1),   // after range
            make_entry("d1", "month#2024-06", 36_000, 10), // wrong granularity
        ];
        let range = DateRange::new(date(2024, 6, 1), date(2024, 6, 30));

        let points = Aggregator::chart_series(
            &entries,
            &devices,
            0.15,
            DisplayMode::Kwh,
            Period::Month,
            range,
        )
        .unwrap();

        assert!(points.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_month_series_cost_mode_applies_rate() {
        let devices = vec![make_device("d1", 1000.0)];
        let entries = vec![make_entry("d1", "day#2024-06-10", 7200, 1)]; // 2.0 kWh
        let range = DateRange::new(date(2024, 6, 1), date(2024, 6, 30));

        let points = Aggregator::chart_series(
            &entries,
            &devices,
            0.15,
            DisplayMode::Cost,
            Period::Month,
            range,
        )
        .unwrap();

        let point = points.iter().find(|p| p.date == "2024-06-10").unwrap();
        assert!((point.value - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_month_series_rounds_to_two_decimals() {
        // 123 W for 1000 s = 0.034166... kWh
        let devices = vec![make_device("d1", 123.0)];
        let entries = vec![make_entry("d1", "day#2024-06-10", 1000, 1)];
        let range = DateRange::new(date(2024, 6, 1), date(2024, 6, 30));

        let points = Aggregator::chart_series(
            &entries,
            &devices,
            0.15,
            DisplayMode::Kwh,
            Period::Month,
            range,
        )
        .unwrap();

        let point = points.iter().find(|p| p.date == "2024-06-10").unwrap();
        assert!((point.value - 0.03).abs() < f64::EPSILON);
    }

    // ========== chart_series() year period ==========

    #[test]
    fn test_year_series_buckets_month_rollups() {
        let devices = vec![make_device("d1", 1000.0)];
        let entries = vec![
            make_entry("d1", "month#2024-03", 36_000, 10), // 10.0 kWh
            make_entry("d1", "day#2024-03-05", 3600, 1),   // day rollup ignored here
            make_entry("d1", "month#2023-12", 36_000, 10), // outside range
        ];
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31));

        let points = Aggregator::chart_series(
            &entries,
            &devices,
            0.15,
            DisplayMode::Kwh,
            Period::Year,
            range,
        )
        .unwrap();

        assert_eq!(points.len(), 12);
        assert_eq!(points[0].date, "2024-01");
        let march = points.iter().find(|p| p.date == "2024-03").unwrap();
        assert!((march.value - 10.0).abs() < f64::EPSILON);
        assert_eq!(points.iter().filter(|p| p.value != 0.0).count(), 1);
    }

    #[test]
    fn test_week_series_is_unsupported() {
        let range = DateRange::new(date(2024, 3, 3), date(2024, 3, 9));
        let result =
            Aggregator::chart_series(&[], &[], 0.15, DisplayMode::Kwh, Period::Week, range);
        assert!(matches!(result, Err(HomewattError::UnsupportedPeriod(Period::Week))));
    }

    #[test]
    fn test_chart_series_is_idempotent() {
        let devices = vec![make_device("d1", 1000.0)];
        let entries = vec![make_entry("d1", "day#2024-06-10", 7200, 1)];
        let range = DateRange::new(date(2024, 6, 1), date(2024, 6, 30));

        let first = Aggregator::chart_series(
            &entries,
            &devices,
            0.15,
            DisplayMode::Kwh,
            Period::Month,
            range,
        )
        .unwrap();
        let second = Aggregator::chart_series(
            &entries,
            &devices,
            0.15,
            DisplayMode::Kwh,
            Period::Month,
            range,
        )
        .unwrap();
        assert_eq!(first, second);
    }

    // ========== device_totals() tests ==========

    #[test]
    fn test_device_totals_month_rollup() {
        let entries = vec![make_entry("d1", "month#2024-06", 7200, 2)];

        let totals = Aggregator::device_totals(
            &entries,
            "d1",
            StatsPeriod::Month,
            date(2024, 6, 15),
            1000.0,
            0.15,
        );

        assert!((totals.total_usage_kwh - 2.0).abs() < f64::EPSILON);
        assert!((totals.total_cost - 0.3).abs() < f64::EPSILON);
        assert_eq!(totals.times_on, 2);
        assert_eq!(totals.total_time_on, "0d 2h");
    }

    #[test]
    fn test_device_totals_year_rollup() {
        let entries = vec![make_entry("d1", "year#2024", 86_400 * 4 + 3600 * 21, 120)];

        let totals = Aggregator::device_totals(
            &entries,
            "d1",
            StatsPeriod::Year,
            date(2024, 3, 1),
            150.0,
            0.20,
        );

        // 150 W × 421200 s = 17.55 kWh
        assert!((totals.total_usage_kwh - 17.6).abs() < f64::EPSILON); // 1 decimal
        assert!((totals.total_cost - 3.51).abs() < f64::EPSILON); // 2 decimals
        assert_eq!(totals.times_on, 120);
        assert_eq!(totals.total_time_on, "4d 21h");
    }

    #[test]
    fn test_device_totals_missing_rollup_is_all_zero() {
        let totals = Aggregator::device_totals(
            &[],
            "d1",
            StatsPeriod::Month,
            date(2024, 6, 15),
            1000.0,
            0.15,
        );

        assert_eq!(totals.total_usage_kwh, 0.0);
        assert_eq!(totals.total_cost, 0.0);
        assert_eq!(totals.times_on, 0);
        assert_eq!(totals.total_time_on, "0d 0h");
    }

    #[test]
    fn test_device_totals_matches_exact_device_and_period() {
        let entries = vec![
            make_entry("d2", "month#2024-06", 7200, 2), // other device
            make_entry("d1", "month#2024-05", 7200, 2), // other month
        ];

        let totals = Aggregator::device_totals(
            &entries,
            "d1",
            StatsPeriod::Month,
            date(2024, 6, 15),
            1000.0,
            0.15,
        );

        assert_eq!(totals.total_usage_kwh, 0.0);
    }
}
