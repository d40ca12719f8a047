//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::transit::{GapSegment, LineSegment, StationSegment, StopUpdate, TrainLine};

/// Query for the arrivals board.
#[derive(Debug, Deserialize)]
pub struct ArrivalsQuery {
    /// Platform stop id, e.g. `L03S`
    pub stop: String,
}

/// Query for the whole-line view.
#[derive(Debug, Deserialize)]
pub struct LineQuery {
    /// Line name, e.g. `L`; defaults to the L
    pub line: Option<String>,
}

/// Query for bike availability.
#[derive(Debug, Deserialize)]
pub struct BikesQuery {
    /// Station display name
    pub station: String,
}

/// Query for a sensor reading.
#[derive(Debug, Deserialize)]
pub struct SensorQuery {
    /// Device id, e.g. `sensor.outdoor_temperature`
    pub device: String,
}

/// Next arrivals at one stop.
#[derive(Debug, Serialize, PartialEq)]
pub struct ArrivalsResponse {
    pub stop: String,
    pub stop_name: String,
    pub line: String,
    /// Destination of the next train
    pub destination: String,
    /// Minutes until the next train; absent when no trips were found
    pub next_in_mins: Option<i64>,
    /// Minutes until the trains after that
    pub later_mins: Vec<i64>,
    pub has_issues: bool,
}

impl ArrivalsResponse {
    /// Build the board from time-sorted updates (soonest first).
    pub fn build(
        stop_id: &str,
        line: TrainLine,
        upcoming: &[StopUpdate],
        has_issues: bool,
        now: DateTime<Utc>,
    ) -> Self {
        let next = upcoming.first();
        Self {
            stop: stop_id.to_string(),
            stop_name: next.map(|u| u.stop.name.clone()).unwrap_or_default(),
            line: line.to_string(),
            destination: next.map(|u| u.destination.name.clone()).unwrap_or_default(),
            next_in_mins: next.and_then(|u| u.arrival).map(|at| minutes_until(at, now)),
            later_mins: upcoming
                .iter()
                .skip(1)
                .filter_map(|u| u.arrival)
                .map(|at| minutes_until(at, now))
                .collect(),
            has_issues,
        }
    }
}

/// Minutes from `now` until a unix-seconds arrival time, truncated toward
/// zero (an arrival 90 seconds out reads as 1 minute).
pub fn minutes_until(arrival: i64, now: DateTime<Utc>) -> i64 {
    (arrival - now.timestamp()) / 60
}

/// One segment of the whole-line view.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentDto {
    Station {
        name: String,
        no_service_north: bool,
        no_service_south: bool,
        train_north: bool,
        train_south: bool,
    },
    Gap {
        approaching_north: bool,
        approaching_south: bool,
    },
}

impl From<&LineSegment> for SegmentDto {
    fn from(segment: &LineSegment) -> Self {
        match segment {
            LineSegment::Station(StationSegment {
                name,
                no_service_north,
                no_service_south,
                train_north,
                train_south,
            }) => SegmentDto::Station {
                name: name.clone(),
                no_service_north: *no_service_north,
                no_service_south: *no_service_south,
                train_north: *train_north,
                train_south: *train_south,
            },
            LineSegment::Gap(GapSegment {
                approaching_north,
                approaching_south,
            }) => SegmentDto::Gap {
                approaching_north: *approaching_north,
                approaching_south: *approaching_south,
            },
        }
    }
}

/// Whole-line display state.
#[derive(Debug, Serialize)]
pub struct LineResponse {
    pub line: String,
    pub segments: Vec<SegmentDto>,
    pub alerts: Vec<String>,
}

/// Sundial position.
#[derive(Debug, Serialize)]
pub struct SundialResponse {
    pub rotation: f64,
    pub color: String,
}

/// Sunrise/sunset times and moon phase.
#[derive(Debug, Serialize)]
pub struct SunResponse {
    pub sunrise: i64,
    pub sunset: i64,
    pub moon_icon: String,
}

/// Air quality breakdown.
#[derive(Debug, Serialize)]
pub struct AqiResponse {
    pub carbon_monoxide: i32,
    pub ozone: i32,
    pub particulates_2_5: i32,
    pub particulates_10: i32,
    pub sulfur_dioxide: i32,
    pub nitrogen_dioxide: i32,
    pub overall: i32,
    /// 1 (good) through 5 (hazardous)
    pub band: u8,
}

/// Bike availability at one station.
#[derive(Debug, Serialize)]
pub struct BikesResponse {
    pub station: String,
    pub classics: i64,
    pub ebikes: i64,
    pub total: i64,
}

/// One sensor reading with its trend against the previous observation.
#[derive(Debug, Serialize)]
pub struct SensorResponse {
    pub device: String,
    pub state: String,
    pub unit: String,
    /// Absent until two numeric readings have been observed
    pub trending_up: Option<bool>,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::stops::Stop;

    fn update(name: &str, destination: &str, arrival: Option<i64>) -> StopUpdate {
        StopUpdate {
            stop: Stop {
                name: name.to_string(),
                ..Default::default()
            },
            arrival,
            departure: None,
            destination: Stop {
                name: destination.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn minutes_until_truncates_toward_zero() {
        let now = DateTime::from_timestamp(1_000_000, 0).unwrap();
        assert_eq!(minutes_until(1_000_090, now), 1);
        assert_eq!(minutes_until(1_000_600, now), 10);
        assert_eq!(minutes_until(1_000_000, now), 0);
        assert_eq!(minutes_until(999_700, now), -5);
    }

    #[test]
    fn arrivals_board_from_sorted_updates() {
        let now = DateTime::from_timestamp(1_000_000, 0).unwrap();
        let upcoming = vec![
            update("Union Sq", "Canarsie", Some(1_000_120)),
            update("Union Sq", "Canarsie", Some(1_000_480)),
            update("Union Sq", "Canarsie", Some(1_000_900)),
        ];

        let board = ArrivalsResponse::build("L03S", TrainLine::L, &upcoming, false, now);
        assert_eq!(board.stop_name, "Union Sq");
        assert_eq!(board.destination, "Canarsie");
        assert_eq!(board.next_in_mins, Some(2));
        assert_eq!(board.later_mins, vec![8, 15]);
        assert!(!board.has_issues);
    }

    #[test]
    fn arrivals_board_with_no_trips_is_empty_not_a_panic() {
        let now = DateTime::from_timestamp(1_000_000, 0).unwrap();
        let board = ArrivalsResponse::build("L03S", TrainLine::L, &[], true, now);
        assert_eq!(board.next_in_mins, None);
        assert!(board.later_mins.is_empty());
        assert_eq!(board.stop_name, "");
        assert!(board.has_issues);
    }

    #[test]
    fn segment_dto_is_tagged_by_kind() {
        let gap = SegmentDto::from(&LineSegment::Gap(GapSegment {
            approaching_north: true,
            approaching_south: false,
        }));
        let json = serde_json::to_value(&gap).unwrap();
        assert_eq!(json["kind"], "gap");
        assert_eq!(json["approaching_north"], true);

        let station = SegmentDto::from(&LineSegment::Station(StationSegment {
            name: "Union Sq".to_string(),
            no_service_north: false,
            no_service_south: true,
            train_north: true,
            train_south: false,
        }));
        let json = serde_json::to_value(&station).unwrap();
        assert_eq!(json["kind"], "station");
        assert_eq!(json["name"], "Union Sq");
        assert_eq!(json["no_service_south"], true);
    }
}
