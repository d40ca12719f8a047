//! Stop records and the directory that indexes them.

use std::collections::HashMap;
use std::ops::{BitOr, BitOrAssign};
use std::path::Path;

use super::error::StopDataError;

/// Which directions a stop currently has service in.
///
/// Stored as a bitmask so the two platform directions of a root station can
/// be combined with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceDirections(u8);

impl ServiceDirections {
    /// No service in either direction.
    pub const NONE: Self = Self(0);
    /// Northbound service.
    pub const NORTH: Self = Self(1);
    /// Southbound service.
    pub const SOUTH: Self = Self(2);

    /// Whether northbound service is present.
    pub fn north(self) -> bool {
        self.0 & Self::NORTH.0 != 0
    }

    /// Whether southbound service is present.
    pub fn south(self) -> bool {
        self.0 & Self::SOUTH.0 != 0
    }
}

impl BitOr for ServiceDirections {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ServiceDirections {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Whether a stop is a boardable platform or the parent station grouping
/// its directional platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationType {
    /// A directional platform (or plain stop), identified by a trailing
    /// `N`/`S` suffix on the id.
    #[default]
    Platform,
    /// A root station: the parent record shared by its platforms.
    Station,
}

impl LocationType {
    /// GTFS encodes root stations as location type `"1"`; everything else
    /// is treated as a platform.
    fn from_field(field: &str) -> Self {
        if field == "1" {
            LocationType::Station
        } else {
            LocationType::Platform
        }
    }
}

/// One stop from the reference table.
///
/// The zero value (via `Default`) is what total lookups return on a miss.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stop {
    /// Identifier in `<line letter><sequence><direction?>` form, e.g.
    /// `L03` (root station) or `L03N` (northbound platform).
    pub id: String,
    /// Display name.
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_type: LocationType,
    /// Root station id for platforms; empty for root stations.
    pub parent_station: String,
    /// Recomputed per line-state request from the live feed; always
    /// `NONE` on freshly loaded stops.
    pub directions: ServiceDirections,
}

/// Immutable index of every stop in the reference table.
#[derive(Debug, Clone, Default)]
pub struct StopDirectory {
    stops: HashMap<String, Stop>,
}

impl StopDirectory {
    /// Load the directory from a reference file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StopDataError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse the delimited reference table.
    ///
    /// The first row is a header and is skipped. Every other row must have
    /// exactly six comma-separated fields:
    /// `id,name,latitude,longitude,location_type,parent_station`.
    pub fn parse(text: &str) -> Result<Self, StopDataError> {
        let mut stops = HashMap::new();

        for (index, line) in text.lines().enumerate().skip(1) {
            let line = line.trim_end_matches('\r');
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 6 {
                return Err(StopDataError::MalformedRow {
                    line: index + 1,
                    found: fields.len(),
                });
            }

            let latitude = parse_coordinate(fields[2], index + 1)?;
            let longitude = parse_coordinate(fields[3], index + 1)?;

            stops.insert(
                fields[0].to_string(),
                Stop {
                    id: fields[0].to_string(),
                    name: fields[1].to_string(),
                    latitude,
                    longitude,
                    location_type: LocationType::from_field(fields[4]),
                    parent_station: fields[5].to_string(),
                    directions: ServiceDirections::NONE,
                },
            );
        }

        Ok(Self { stops })
    }

    /// Look up a stop by id.
    ///
    /// Total: an unknown id yields a zero-value stop rather than an error.
    pub fn get(&self, id: &str) -> Stop {
        self.stops.get(id).cloned().unwrap_or_default()
    }

    /// Whether the directory contains the given id.
    pub fn contains(&self, id: &str) -> bool {
        self.stops.contains_key(id)
    }

    /// Iterate over all stops, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

fn parse_coordinate(field: &str, line: usize) -> Result<f64, StopDataError> {
    field
        .parse()
        .map_err(|_| StopDataError::InvalidCoordinate {
            line,
            value: field.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOPS: &str = "\
stop_id,stop_name,stop_lat,stop_lon,location_type,parent_station
L03,Union Sq,40.734673,-73.989951,1,
L03N,Union Sq,40.734673,-73.989951,0,L03
L03S,Union Sq,40.734673,-73.989951,0,L03
";

    #[test]
    fn parse_skips_header_and_indexes_rows() {
        let directory = StopDirectory::parse(STOPS).unwrap();
        assert_eq!(directory.len(), 3);

        let root = directory.get("L03");
        assert_eq!(root.name, "Union Sq");
        assert_eq!(root.location_type, LocationType::Station);
        assert_eq!(root.parent_station, "");

        let platform = directory.get("L03N");
        assert_eq!(platform.location_type, LocationType::Platform);
        assert_eq!(platform.parent_station, "L03");
    }

    #[test]
    fn lookup_is_total() {
        let directory = StopDirectory::parse(STOPS).unwrap();
        let missing = directory.get("Q99");
        assert_eq!(missing, Stop::default());
        assert!(!directory.contains("Q99"));
    }

    #[test]
    fn wrong_field_count_is_fatal() {
        let text = "header\nL03,Union Sq,40.7,-73.9,1\n";
        match StopDirectory::parse(text) {
            Err(StopDataError::MalformedRow { line, found }) => {
                assert_eq!(line, 2);
                assert_eq!(found, 5);
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn bad_coordinate_is_fatal() {
        let text = "header\nL03,Union Sq,north,-73.9,1,\n";
        match StopDirectory::parse(text) {
            Err(StopDataError::InvalidCoordinate { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "north");
            }
            other => panic!("expected InvalidCoordinate, got {other:?}"),
        }
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stops.txt");
        std::fs::write(&path, STOPS).unwrap();

        let directory = StopDirectory::load(&path).unwrap();
        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn load_missing_file_errors() {
        assert!(matches!(
            StopDirectory::load("/nonexistent/stops.txt"),
            Err(StopDataError::Io(_))
        ));
    }

    #[test]
    fn directions_combine() {
        let mut directions = ServiceDirections::NONE;
        assert!(!directions.north() && !directions.south());

        directions |= ServiceDirections::NORTH;
        assert!(directions.north());
        assert!(!directions.south());

        let both = directions | ServiceDirections::SOUTH;
        assert!(both.north() && both.south());
    }
}
