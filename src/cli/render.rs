//! Plain-text rendering for the report commands

use crate::types::{ChartPoint, Device, DeviceStatistics, DeviceTotals, DisplayMode};
use std::fmt::Write;

fn format_value(value: f64, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Kwh => format!("{value:.2} kWh"),
        DisplayMode::Cost => format!("${value:.2}"),
    }
}

/// Device inventory listing
pub fn device_list(devices: &[Device]) -> String {
    if devices.is_empty() {
        return "No devices registered.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:<22} {:<14} {:>8} {:>11}  {}",
        "DEVICE", "LABEL", "CATEGORY", "ON (W)", "STANDBY (W)", "ROOM"
    );
    for device in devices {
        let _ = writeln!(
            out,
            "{:<14} {:<22} {:<14} {:>8.1} {:>11.1}  {}",
            device.device_id,
            device.label,
            device.category,
            device.wattage_on,
            device.wattage_standby,
            device.room.as_deref().unwrap_or("-"),
        );
    }
    out
}

/// Chart series as a two-column table, one row per bucket
pub fn chart_table(points: &[ChartPoint], mode: DisplayMode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12} {:>12}", "DATE", mode.unit());
    for point in points {
        let _ = writeln!(out, "{:<12} {:>12.2}", point.date, point.value);
    }
    let total: f64 = points.iter().map(|p| p.value).sum();
    let _ = writeln!(out, "{:<12} {:>12}", "TOTAL", format_value(total, mode));
    out
}

/// Per-device stat card
pub fn totals_card(device: &Device, totals: &DeviceTotals) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", device.label, device.device_id);
    let _ = writeln!(out, "  usage:    {:.1} kWh", totals.total_usage_kwh);
    let _ = writeln!(out, "  cost:     ${:.2}", totals.total_cost);
    let _ = writeln!(out, "  times on: {}", totals.times_on);
    let _ = writeln!(out, "  time on:  {}", totals.total_time_on);
    out
}

/// Ranked device table with percentage shares
pub fn summary_table(rows: &[DeviceStatistics], mode: DisplayMode) -> String {
    if rows.is_empty() {
        return "No devices registered.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<22} {:<14} {:>10} {:>10} {:>7}",
        "DEVICE", "CATEGORY", "kWh", "COST", "SHARE"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<22} {:<14} {:>10.2} {:>10.2} {:>6.1}%",
            row.name, row.category, row.kwh, row.cost, row.percentage
        );
    }
    let total: f64 = rows.iter().map(|r| r.value).sum();
    let _ = writeln!(out, "{:<22} {:<14} {:>33}", "TOTAL", "", format_value(total, mode));
    out
}
