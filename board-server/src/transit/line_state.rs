//! Whole-line display state.
//!
//! Turns a flat list of feed entities into an ordered, directional map of
//! one line: which stations have a train sitting in them, which gaps have a
//! train approaching, and which directions have no service at all.

use std::collections::HashMap;

use crate::stops::{LocationType, ServiceDirections, Stop, StopDirectory};

use super::entity::{Alert, FeedEntity};
use super::line::TrainLine;

/// A single vehicle's next stop and whether it has already arrived there.
///
/// Ephemeral: derived from the live feed per request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrainUpdate {
    /// Resolved through the stop directory; zero-value when the feed names
    /// a stop the directory does not know (such a train never renders).
    pub next_stop: Stop,
    pub at_stop: bool,
}

/// One displayable unit of a line's track.
#[derive(Debug, Clone, PartialEq)]
pub enum LineSegment {
    Station(StationSegment),
    Gap(GapSegment),
}

/// A station on the line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationSegment {
    pub name: String,
    pub no_service_north: bool,
    pub no_service_south: bool,
    pub train_north: bool,
    pub train_south: bool,
}

/// The stretch of track between two stations (or beyond the line's ends).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GapSegment {
    pub approaching_north: bool,
    pub approaching_south: bool,
}

/// Display state for a whole line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineState {
    /// Alternating gap/station/…/gap; always `2 × stations + 1` entries.
    pub segments: Vec<LineSegment>,
    /// Active alert description text, flattened.
    pub alerts: Vec<String>,
}

/// Derive every vehicle's position and the feed's active alerts.
pub fn trains(entities: &[FeedEntity], directory: &StopDirectory) -> (Vec<TrainUpdate>, Vec<Alert>) {
    let mut trains = Vec::new();
    let mut alerts = Vec::new();

    for entity in entities {
        match entity {
            FeedEntity::Deleted => {}
            FeedEntity::Trip(_) => {}
            FeedEntity::Alert(alert) => alerts.push(alert.clone()),
            FeedEntity::Vehicle(vehicle) => trains.push(TrainUpdate {
                next_stop: directory.get(&vehicle.next_stop_id),
                at_stop: vehicle.at_stop,
            }),
        }
    }

    (trains, alerts)
}

/// All directory stops on `line`, with their direction bitmasks recomputed
/// from the live feed.
///
/// Platform stops take their own bit (`…N` → north, `…S` → south, set
/// wherever a trip update's stop-time entry names the platform); root
/// stations take the union of their two platforms.
pub fn stops_on_line(
    entities: &[FeedEntity],
    directory: &StopDirectory,
    line: TrainLine,
) -> Vec<Stop> {
    let mut stopping: HashMap<&str, ServiceDirections> = HashMap::new();
    for entity in entities {
        let FeedEntity::Trip(trip) = entity else {
            continue;
        };
        for stop_time in &trip.stop_times {
            if stop_time.stop_id.ends_with('N') {
                *stopping.entry(stop_time.stop_id.as_str()).or_default() |=
                    ServiceDirections::NORTH;
            } else if stop_time.stop_id.ends_with('S') {
                *stopping.entry(stop_time.stop_id.as_str()).or_default() |=
                    ServiceDirections::SOUTH;
            }
        }
    }
    let served = |id: &str| stopping.get(id).copied().unwrap_or_default();

    let mut stops = Vec::new();
    for stop in directory.iter() {
        if !stop.id.starts_with(line.letter()) {
            continue;
        }
        let mut stop = stop.clone();
        stop.directions = if stop.id.ends_with('N') || stop.id.ends_with('S') {
            served(&stop.id)
        } else {
            served(&format!("{}N", stop.id)) | served(&format!("{}S", stop.id))
        };
        stops.push(stop);
    }
    stops
}

/// Build the ordered segment list for a line.
///
/// Root stations are sorted by the numeric suffix of their id (`L03 <
/// L08 < L29`), not lexicographically, which would misorder two- and
/// three-digit suffixes. The walk then emits a leading gap and a station
/// segment per station, plus one trailing gap:
///
/// ```text
///   gap₀  L01  gap₁  L02  gap₂  L03  gap₃
/// ```
///
/// Station numbers grow southward, so a southbound train in transit to
/// L02 is physically in gap₁, the gap already in hand when L02's scan
/// runs. A northbound train in transit to L02 comes the other way and is
/// physically in gap₂, a segment that does not exist yet when L02's scan
/// runs, so the walk carries it forward as pending state and writes it
/// into the next iteration's leading gap. The two directions attach to
/// different loop iterations because of the walk direction; collapsing
/// them into one symmetric rule shifts every northbound approach by one
/// segment.
pub fn line_state(entities: &[FeedEntity], directory: &StopDirectory, line: TrainLine) -> LineState {
    let (trains, alerts) = trains(entities, directory);

    let mut stations: Vec<Stop> = stops_on_line(entities, directory, line)
        .into_iter()
        .filter(|stop| stop.location_type == LocationType::Station)
        .collect();
    stations.sort_by_key(|station| numeric_suffix(&station.id));

    let mut segments = Vec::with_capacity(stations.len() * 2 + 1);
    let mut north_pending = false;

    for station in &stations {
        let mut gap = GapSegment::default();
        if north_pending {
            gap.approaching_north = true;
            north_pending = false;
        }

        let mut here = StationSegment {
            name: station.name.clone(),
            no_service_north: !station.directions.north(),
            no_service_south: !station.directions.south(),
            train_north: false,
            train_south: false,
        };

        for train in &trains {
            if !train.next_stop.id.starts_with(&station.id) {
                continue;
            }
            if train.next_stop.id.ends_with('N') {
                if train.at_stop {
                    here.train_north = true;
                } else {
                    north_pending = true;
                }
            } else if train.next_stop.id.ends_with('S') {
                if train.at_stop {
                    here.train_south = true;
                } else {
                    gap.approaching_south = true;
                }
            }
        }

        segments.push(LineSegment::Gap(gap));
        segments.push(LineSegment::Station(here));
    }

    segments.push(LineSegment::Gap(GapSegment {
        approaching_north: north_pending,
        approaching_south: false,
    }));

    let alerts = alerts
        .into_iter()
        .flat_map(|alert| alert.descriptions)
        .collect();

    LineState { segments, alerts }
}

fn numeric_suffix(id: &str) -> u32 {
    id.get(1..)
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}


#[cfg(test)]
mod proptests {
    use super::*;

    use proptest::prelude::*;

    proptest! {
        /// The segment list is always alternating and sized 2n + 1.
        #[test]
        fn segment_count_is_two_n_plus_one(station_count in 0usize..20) {
            let mut text = String::from(
                "stop_id,stop_name,stop_lat,stop_lon,location_type,parent_station\n",
            );
            for n in 0..station_count {
                text.push_str(&format!("L{n:02},Station {n},40.0,-74.0,1,\n"));
            }
            let directory = StopDirectory::parse(&text).unwrap();

            let state = line_state(&[], &directory, TrainLine::L);
            prop_assert_eq!(state.segments.len(), station_count * 2 + 1);
        }
    }
}
