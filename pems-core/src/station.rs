use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Earth radius used by the spherical Web Mercator projection (EPSG:3857).
pub const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

/// A PeMS vehicle detector station.
///
/// `x`/`y` are Web Mercator metres, the coordinate space of the station map.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    /// Freeway number (e.g. "101")
    pub freeway: String,
    /// Direction of travel: N, S, E or W
    pub direction: String,
    /// Detector type, e.g. "ML" for mainline
    pub station_type: String,
    pub lanes: u32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub x: f64,
    pub y: f64,
}

impl Station {
    /// Descriptive label: freeway, direction and name.
    pub fn label(&self) -> String {
        format!("{} {} {}", self.freeway, self.direction, self.name)
    }

    /// Chart title for this station.
    pub fn title(&self) -> String {
        format!("Vehicle Flow for Station {}: {}", self.id, self.label())
    }

    /// Parse the station detail CSV.
    ///
    /// Expected columns (with headers): `ID,Fwy,Dir,Type,Lanes,Name,Latitude,Longitude,x,y`.
    /// `x` and `y` may be absent or empty, in which case they are projected
    /// from latitude/longitude. Rows without a numeric ID, or with neither
    /// `x`/`y` nor latitude/longitude, are skipped.
    pub fn parse_station_csv(csv_object: &str) -> Result<Vec<Station>, csv::Error> {
        let mut station_list: Vec<Station> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let field = |i: usize| record.get(i).unwrap_or("").trim();
            let id = match field(0).parse::<i64>() {
                Ok(id) => id,
                Err(_) => {
                    log::warn!("[QPeMS] station: skipping row with ID {:?}", field(0));
                    continue;
                }
            };
            let latitude = field(6).parse::<f64>().ok().filter(|v| v.is_finite());
            let longitude = field(7).parse::<f64>().ok().filter(|v| v.is_finite());
            let projected = match (field(8).parse::<f64>(), field(9).parse::<f64>()) {
                (Ok(x), Ok(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
                _ => None,
            };
            let (latitude, longitude, x, y) = match (latitude, longitude, projected) {
                (Some(lat), Some(lon), Some((x, y))) => (lat, lon, x, y),
                (Some(lat), Some(lon), None) => {
                    let (x, y) = web_mercator(lat, lon);
                    (lat, lon, x, y)
                }
                (_, _, Some((x, y))) => {
                    let (lat, lon) = inverse_web_mercator(x, y);
                    (lat, lon, x, y)
                }
                _ => {
                    log::warn!("[QPeMS] station: skipping {} without a location", id);
                    continue;
                }
            };
            station_list.push(Station {
                id,
                freeway: field(1).to_string(),
                direction: field(2).to_string(),
                station_type: field(3).to_string(),
                lanes: field(4).parse::<u32>().unwrap_or(0),
                name: field(5).to_string(),
                latitude,
                longitude,
                x,
                y,
            });
        }
        Ok(station_list)
    }
}

/// Project latitude/longitude (degrees) to Web Mercator (x, y) metres.
pub fn web_mercator(latitude: f64, longitude: f64) -> (f64, f64) {
    let x = WEB_MERCATOR_RADIUS * longitude.to_radians();
    let y = WEB_MERCATOR_RADIUS
        * (std::f64::consts::FRAC_PI_4 + latitude.to_radians() / 2.0)
            .tan()
            .ln();
    (x, y)
}

/// Latitude/longitude (degrees) of Web Mercator (x, y) metres.
pub fn inverse_web_mercator(x: f64, y: f64) -> (f64, f64) {
    let longitude = (x / WEB_MERCATOR_RADIUS).to_degrees();
    let latitude = (2.0 * (y / WEB_MERCATOR_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    (latitude, longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_CSV: &str = "\
ID,Fwy,Dir,Type,Lanes,Name,Latitude,Longitude,x,y
400001,101,N,ML,4,Bascom Ave,37.364085,-121.901149,-13570000.5,4490000.25
400017,880,S,ML,3,Stevens Creek,37.32,-121.93,,
";

    #[test]
    fn parses_station_detail() {
        let stations = Station::parse_station_csv(DETAIL_CSV).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id, 400001);
        assert_eq!(stations[0].freeway, "101");
        assert_eq!(stations[0].direction, "N");
        assert_eq!(stations[0].station_type, "ML");
        assert_eq!(stations[0].lanes, 4);
        assert_eq!(stations[0].name, "Bascom Ave");
        assert!((stations[0].x - (-13570000.5)).abs() < f64::EPSILON);
        assert!((stations[0].y - 4490000.25).abs() < f64::EPSILON);
    }

    #[test]
    fn projects_missing_coordinates() {
        let stations = Station::parse_station_csv(DETAIL_CSV).unwrap();
        let (x, y) = web_mercator(37.32, -121.93);
        assert!((stations[1].x - x).abs() < 1e-6);
        assert!((stations[1].y - y).abs() < 1e-6);
    }

    #[test]
    fn web_mercator_origin_and_sign() {
        let (x, y) = web_mercator(0.0, 0.0);
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
        let (x, y) = web_mercator(37.0, -122.0);
        assert!(x < 0.0);
        assert!(y > 0.0);
        // One degree of longitude at the equator is ~111 km.
        let (x1, _) = web_mercator(0.0, 1.0);
        assert!((x1 - 111_319.49).abs() < 1.0);
    }

    #[test]
    fn skips_rows_without_numeric_id() {
        let csv = "ID,Fwy,Dir,Type,Lanes,Name,Latitude,Longitude\nabc,101,N,ML,4,X,37.0,-122.0\n";
        let stations = Station::parse_station_csv(csv).unwrap();
        assert!(stations.is_empty());
    }

    #[test]
    fn skips_rows_without_location() {
        let csv = "\
ID,Fwy,Dir,Type,Lanes,Name,Latitude,Longitude
400001,101,N,ML,4,Bascom Ave,37.36,-121.90
400017,880,S,ML,3,Stevens Creek,,
400030,280,N,ML,4,Winchester,abc,-121.95
";
        let stations = Station::parse_station_csv(csv).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, 400001);
        // Still near San Jose, nowhere near (0, 0).
        assert!(stations[0].x < -13_000_000.0);
    }

    #[test]
    fn keeps_projected_coordinates_without_lat_lon() {
        let csv = "\
ID,Fwy,Dir,Type,Lanes,Name,Latitude,Longitude,x,y
400001,101,N,ML,4,Bascom Ave,,,-13570000,4490000
";
        let stations = Station::parse_station_csv(csv).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].x, -13570000.0);
        let (x, y) = web_mercator(stations[0].latitude, stations[0].longitude);
        assert!((x - -13570000.0).abs() < 1e-3);
        assert!((y - 4490000.0).abs() < 1e-3);
    }

    #[test]
    fn title_includes_label() {
        let stations = Station::parse_station_csv(DETAIL_CSV).unwrap();
        assert_eq!(stations[0].label(), "101 N Bascom Ave");
        assert_eq!(
            stations[0].title(),
            "Vehicle Flow for Station 400001: 101 N Bascom Ave"
        );
    }
}
