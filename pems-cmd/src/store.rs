//! Load the CSV fixtures from a data directory into an in-memory store.

use anyhow::Context;
use log::info;
use pems_db::Database;
use std::path::Path;

pub const STATIONS_FILE: &str = "sta_detail.csv";
pub const SAMPLES_FILE: &str = "pems_data.csv";
pub const MONTH_YEARS_FILE: &str = "monyr.csv";

/// Read `sta_detail.csv`, `pems_data.csv` and (optionally) `monyr.csv`
/// from `data_dir`.
///
/// A missing `monyr.csv` is not an error: month/year tokens are then
/// derived from the sample timestamps.
pub fn load_database(data_dir: &str) -> anyhow::Result<Database> {
    let dir = Path::new(data_dir);
    if !dir.is_dir() {
        anyhow::bail!("data directory {} not found", dir.display());
    }

    let stations = read_required(dir, STATIONS_FILE)?;
    let samples = read_required(dir, SAMPLES_FILE)?;
    let month_years_path = dir.join(MONTH_YEARS_FILE);
    let month_years = if month_years_path.exists() {
        std::fs::read_to_string(&month_years_path)?
    } else {
        info!(
            "[QPeMS] store: {} missing, deriving month/year tokens from samples",
            month_years_path.display()
        );
        String::new()
    };

    Database::from_csv(&stations, &samples, &month_years)
}

fn read_required(dir: &Path, file: &str) -> anyhow::Result<String> {
    let path = dir.join(file);
    std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("pems-cmd-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_fixtures(dir: &Path, with_month_years: bool) {
        fs::write(
            dir.join(STATIONS_FILE),
            "ID,Fwy,Dir,Type,Lanes,Name,Latitude,Longitude\n400001,101,N,ML,4,Bascom Ave,37.36,-121.90\n",
        )
        .unwrap();
        fs::write(
            dir.join(SAMPLES_FILE),
            "Station,Timestamp,Total_Flow\n400001,01/06/2015 08:00:00,120\n400001,02/03/2015 08:00:00,80\n",
        )
        .unwrap();
        if with_month_years {
            fs::write(dir.join(MONTH_YEARS_FILE), "m,year\n1,2015\n").unwrap();
        }
    }

    #[test]
    fn missing_directory_is_an_error() {
        let err = load_database("/nonexistent/pems/fixtures").err().unwrap();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn missing_samples_file_is_an_error() {
        let dir = scratch_dir("no-samples");
        fs::write(dir.join(STATIONS_FILE), "ID\n").unwrap();
        let err = load_database(dir.to_str().unwrap()).err().unwrap();
        assert!(err.to_string().contains(SAMPLES_FILE));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn loads_all_fixtures() {
        let dir = scratch_dir("full");
        write_fixtures(&dir, true);
        let db = load_database(dir.to_str().unwrap()).unwrap();
        assert_eq!(db.query_stations().unwrap().len(), 1);
        assert_eq!(db.query_month_years().unwrap().len(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn derives_month_years_without_token_file() {
        let dir = scratch_dir("derived");
        write_fixtures(&dir, false);
        let db = load_database(dir.to_str().unwrap()).unwrap();
        let tokens: Vec<String> = db
            .query_month_years()
            .unwrap()
            .iter()
            .map(|m| m.label())
            .collect();
        assert_eq!(tokens, vec!["Jan, 2015", "Feb, 2015"]);
        fs::remove_dir_all(&dir).unwrap();
    }
}
