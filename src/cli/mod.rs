use crate::services::{calendar, Aggregator, DataLoaderService, Summarizer};
use crate::types::{Direction, DisplayMode, Period, StatsPeriod};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod render;

/// Home energy usage and cost reports from aggregated device data
#[derive(Parser)]
#[command(name = "homewatt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding devices.json / usage.json / settings.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the device inventory
    Devices {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Gap-free usage series for charting (per day for a month, per month for a year)
    Chart {
        #[arg(long, value_enum, default_value_t = Period::Month)]
        period: Period,

        /// Anchor date as YYYY-MM-DD (default: today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Navigate this many periods from the anchor (negative = back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        shift: i64,

        #[arg(long, value_enum, default_value_t = DisplayMode::Kwh)]
        mode: DisplayMode,

        /// Override the configured base rate per kWh
        #[arg(long)]
        rate: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Usage totals for one device over an exact month or year
    Stats {
        /// Device id
        #[arg(long)]
        device: String,

        #[arg(long, value_enum, default_value_t = StatsPeriod::Month)]
        period: StatsPeriod,

        /// Anchor date as YYYY-MM-DD (default: today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Override the configured base rate per kWh
        #[arg(long)]
        rate: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ranked per-device usage table with percentage shares
    Summary {
        #[arg(long, value_enum, default_value_t = Period::Month)]
        period: Period,

        /// Anchor date as YYYY-MM-DD (default: today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Navigate this many periods from the anchor (negative = back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        shift: i64,

        #[arg(long, value_enum, default_value_t = DisplayMode::Kwh)]
        mode: DisplayMode,

        /// Override the configured base rate per kWh
        #[arg(long)]
        rate: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Walk `shift` periods from the anchor via the calendar step rules.
fn shifted_anchor(period: Period, anchor: NaiveDate, shift: i64) -> NaiveDate {
    let direction = if shift < 0 {
        Direction::Prev
    } else {
        Direction::Next
    };
    let mut anchor = anchor;
    for _ in 0..shift.unsigned_abs() {
        let range = calendar::range_for(period, anchor);
        anchor = calendar::step(period, range.start, direction);
    }
    anchor
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let loader = match &self.data_dir {
            Some(dir) => DataLoaderService::with_dir(dir),
            None => DataLoaderService::new()?,
        };
        let store = loader
            .load()
            .with_context(|| format!("loading data from {}", loader.data_dir().display()))?;

        match self.command {
            Commands::Devices { json } => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&store.devices)?);
                } else {
                    print!("{}", render::device_list(&store.devices));
                }
            }

            Commands::Chart {
                period,
                date,
                shift,
                mode,
                rate,
                json,
            } => {
                let anchor = shifted_anchor(period, date.unwrap_or_else(today), shift);
                let range = calendar::range_for(period, anchor);
                let rate = rate.unwrap_or(store.settings.base_rate_per_kwh);

                let points = Aggregator::chart_series(
                    &store.usage,
                    &store.devices,
                    rate,
                    mode,
                    period,
                    range,
                )?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&points)?);
                } else {
                    print!("{}", render::chart_table(&points, mode));
                }
            }

            Commands::Stats {
                device,
                period,
                date,
                rate,
                json,
            } => {
                let anchor = date.unwrap_or_else(today);
                let rate = rate.unwrap_or(store.settings.base_rate_per_kwh);
                let dev = store
                    .devices
                    .iter()
                    .find(|d| d.device_id == device)
                    .with_context(|| format!("unknown device '{device}'"))?;

                let totals = Aggregator::device_totals(
                    &store.usage,
                    &dev.device_id,
                    period,
                    anchor,
                    dev.wattage_on,
                    rate,
                );

                if json {
                    println!("{}", serde_json::to_string_pretty(&totals)?);
                } else {
                    print!("{}", render::totals_card(dev, &totals));
                }
            }

            Commands::Summary {
                period,
                date,
                shift,
                mode,
                rate,
                json,
            } => {
                let anchor = shifted_anchor(period, date.unwrap_or_else(today), shift);
                let range = calendar::range_for(period, anchor);
                let rate = rate.unwrap_or(store.settings.base_rate_per_kwh);

                let rows =
                    Summarizer::device_table(&store.usage, &store.devices, rate, mode, range);

                if json {
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                } else {
                    print!("{}", render::summary_table(&rows, mode));
                }
            }
        }

        Ok(())
    }
}
