//! Command implementations for the QPeMS CLI.
//!
//! Every command loads the CSV fixtures from a data directory into an
//! in-memory store and drives a dashboard session headlessly.

use clap::{Subcommand, ValueEnum};

pub mod report;
pub mod store;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Average flow by time of day and day type for one station
    Aggregate {
        /// Directory holding pems_data.csv, sta_detail.csv and monyr.csv
        #[arg(short = 'd', long, default_value = "fixtures")]
        data_dir: String,

        /// Station id (defaults to the first station with data)
        #[arg(short = 's', long)]
        station: Option<i64>,

        /// First month of the range, e.g. "Jan, 2015"
        #[arg(long)]
        from: Option<String>,

        /// Last month of the range, e.g. "Mar, 2015"
        #[arg(long)]
        to: Option<String>,

        /// Bucket width: 15min, 30min or 1H
        #[arg(short = 'g', long, default_value = "1H")]
        granularity: String,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List stations that have both detail and flow samples
    Stations {
        #[arg(short = 'd', long, default_value = "fixtures")]
        data_dir: String,
    },

    /// List available month/year tokens
    Months {
        #[arg(short = 'd', long, default_value = "fixtures")]
        data_dir: String,
    },

    /// List the To-range tokens offered for a From token
    Options {
        #[arg(short = 'd', long, default_value = "fixtures")]
        data_dir: String,

        /// From token, e.g. "Jan, 2015"
        #[arg(long)]
        from: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Aggregate {
            data_dir,
            station,
            from,
            to,
            granularity,
            format,
        } => {
            let request = report::AggregateRequest::parse(
                station,
                from.as_deref(),
                to.as_deref(),
                &granularity,
            )?;
            let db = store::load_database(&data_dir)?;
            let view = report::run_aggregate(db, &request)?;
            report::write_view(&mut out, &view, format)
        }
        Command::Stations { data_dir } => {
            let db = store::load_database(&data_dir)?;
            report::write_stations(&mut out, &db.query_station_options()?)
        }
        Command::Months { data_dir } => {
            let db = store::load_database(&data_dir)?;
            report::write_month_years(&mut out, &db.query_month_years()?)
        }
        Command::Options { data_dir, from } => {
            let from = from.parse::<pems_core::month_year::MonthYear>()?;
            let db = store::load_database(&data_dir)?;
            let all = db.query_month_years()?;
            let options = pems_data::month_year_options::to_options(&all, &from);
            report::write_month_years(&mut out, &options)
        }
    }
}
