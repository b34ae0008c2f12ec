//! Drive a headless dashboard session and print its results.

use crate::OutputFormat;
use pems_core::day_type::DayType;
use pems_core::granularity::Granularity;
use pems_core::month_year::MonthYear;
use pems_data::FlowProfile;
use pems_db::models::{DashboardView, StationOption};
use pems_db::{Database, Session};
use std::io::Write;

/// Selections for one `aggregate` run. `None` keeps the session default.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRequest {
    pub station: Option<i64>,
    pub from: Option<MonthYear>,
    pub to: Option<MonthYear>,
    pub granularity: Granularity,
}

impl AggregateRequest {
    pub fn parse(
        station: Option<i64>,
        from: Option<&str>,
        to: Option<&str>,
        granularity: &str,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            station,
            from: from.map(str::parse::<MonthYear>).transpose()?,
            to: to.map(str::parse::<MonthYear>).transpose()?,
            granularity: granularity.parse::<Granularity>()?,
        })
    }
}

/// Apply the request to a fresh session in the order a user would: station,
/// From, To, then granularity.
pub fn run_aggregate(db: Database, request: &AggregateRequest) -> anyhow::Result<DashboardView> {
    let mut session = Session::open(db)?;
    if let Some(station) = request.station {
        session.select_station(station)?;
    }
    if let Some(from) = request.from {
        session.select_from(from)?;
    }
    if let Some(to) = request.to {
        session.select_to(to)?;
        if session.to() != to {
            log::warn!(
                "[QPeMS] report: {} is not offered after {}, using {}",
                to,
                session.from(),
                session.to()
            );
        }
    }
    session.select_granularity(request.granularity)
}

pub fn write_view<W: Write>(out: &mut W, view: &DashboardView, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", view.title)?;
            writeln!(out, "{} - {}, {}", view.from, view.to, view.granularity)?;
            write_profile_text(out, &view.flow)
        }
        OutputFormat::Csv => write_profile_csv(out, &view.flow),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, view)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}

fn write_profile_text<W: Write>(out: &mut W, profile: &FlowProfile) -> anyhow::Result<()> {
    if profile.is_empty() {
        writeln!(out, "(no flow samples in range)")?;
        return Ok(());
    }
    write!(out, "{:<8}", "Time")?;
    for day_type in DayType::ALL {
        write!(out, " {:>12}", day_type.legend())?;
    }
    writeln!(out)?;
    for row in &profile.rows {
        write!(out, "{:<8}", row.time.format("%H:%M"))?;
        for day_type in DayType::ALL {
            write!(out, " {:>12}", cell(row.get(day_type)))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_profile_csv<W: Write>(out: &mut W, profile: &FlowProfile) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    let mut header = vec!["time"];
    header.extend(DayType::ALL.iter().map(|d| d.column()));
    wtr.write_record(&header)?;
    for row in &profile.rows {
        let mut record = vec![row.time.format("%H:%M:%S").to_string()];
        record.extend(
            DayType::ALL
                .iter()
                .map(|d| row.get(*d).map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_stations<W: Write>(out: &mut W, stations: &[StationOption]) -> anyhow::Result<()> {
    for s in stations {
        writeln!(out, "{}\t{}", s.station_id, s.label)?;
    }
    Ok(())
}

pub fn write_month_years<W: Write>(out: &mut W, tokens: &[MonthYear]) -> anyhow::Result<()> {
    for t in tokens {
        writeln!(out, "{}", t)?;
    }
    Ok(())
}
