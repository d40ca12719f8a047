//! Upcoming arrivals at a single stop.

use crate::stops::{Stop, StopDirectory};

use super::entity::{Alert, FeedEntity};

/// A stop's next scheduled visit by one trip. Times are unix seconds.
///
/// Ephemeral: recomputed from the live feed on every request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StopUpdate {
    /// The queried stop (zero-value when unknown to the directory).
    pub stop: Stop,
    pub arrival: Option<i64>,
    pub departure: Option<i64>,
    /// The trip's final stop-time entry, resolved through the directory
    /// (zero-value when the destination stop is unmapped).
    pub destination: Stop,
}

/// Derive upcoming visits to `stop_id` and the feed's active alerts.
///
/// One pass in feed order: deleted entities are skipped, alerts accumulate
/// separately, and each trip update contributes at most one [`StopUpdate`]
/// (the last stop-time entry matching `stop_id` wins if a trip somehow
/// lists the stop twice).
///
/// Output order is feed order, which the upstream source does not promise
/// to be arrival-time order. Callers wanting the next N trains go through
/// [`soonest`].
pub fn trips_at_stop(
    entities: &[FeedEntity],
    directory: &StopDirectory,
    stop_id: &str,
) -> (Vec<StopUpdate>, Vec<Alert>) {
    let mut updates = Vec::new();
    let mut alerts = Vec::new();

    for entity in entities {
        match entity {
            FeedEntity::Deleted => {}
            FeedEntity::Vehicle(_) => {}
            FeedEntity::Alert(alert) => alerts.push(alert.clone()),
            FeedEntity::Trip(trip) => {
                let mut matched = None;
                for stop_time in &trip.stop_times {
                    if stop_time.stop_id == stop_id {
                        matched = Some(stop_time);
                    }
                }

                if let Some(stop_time) = matched {
                    let destination = trip
                        .stop_times
                        .last()
                        .map(|last| directory.get(&last.stop_id))
                        .unwrap_or_default();

                    updates.push(StopUpdate {
                        stop: directory.get(stop_id),
                        arrival: stop_time.arrival,
                        departure: stop_time.departure,
                        destination,
                    });
                }
            }
        }
    }

    (updates, alerts)
}

/// The `n` soonest updates by arrival time.
///
/// Feed order is not a contract; selecting "first, second, third" straight
/// from the feed can hand back out-of-order trains. Updates without an
/// arrival time sort last.
pub fn soonest(mut updates: Vec<StopUpdate>, n: usize) -> Vec<StopUpdate> {
    updates.sort_by_key(|update| update.arrival.unwrap_or(i64::MAX));
    updates.truncate(n);
    updates
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::transit::entity::{StopTimeUpdate, TripUpdate, VehiclePosition};

    fn directory() -> StopDirectory {
        StopDirectory::parse(
            "stop_id,stop_name,stop_lat,stop_lon,location_type,parent_station\n\
             L01N,Eighth Av,40.0,-74.0,0,L01\n\
             L02N,Sixth Av,40.1,-74.1,0,L02\n\
             L03N,Union Sq,40.2,-74.2,0,L03\n",
        )
        .unwrap()
    }

    fn trip(trip_id: &str, stops: &[(&str, i64)]) -> FeedEntity {
        FeedEntity::Trip(TripUpdate {
            trip_id: trip_id.to_string(),
            stop_times: stops
                .iter()
                .map(|(stop_id, arrival)| StopTimeUpdate {
                    stop_id: stop_id.to_string(),
                    arrival: Some(*arrival),
                    departure: Some(*arrival + 30),
                })
                .collect(),
        })
    }

    #[test]
    fn destination_is_the_trips_final_entry() {
        let entities = vec![trip("t1", &[("L01N", 100), ("L02N", 200), ("L03N", 300)])];

        let (updates, alerts) = trips_at_stop(&entities, &directory(), "L02N");
        assert!(alerts.is_empty());
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].stop.name, "Sixth Av");
        assert_eq!(updates[0].arrival, Some(200));
        assert_eq!(updates[0].departure, Some(230));
        assert_eq!(updates[0].destination.name, "Union Sq");
    }

    #[test]
    fn unmapped_destination_yields_zero_value_stop() {
        let entities = vec![trip("t1", &[("L02N", 200), ("Q99N", 300)])];

        let (updates, _) = trips_at_stop(&entities, &directory(), "L02N");
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].destination, Stop::default());
    }

    #[test]
    fn unmapped_target_stop_still_produces_an_update() {
        let entities = vec![trip("t1", &[("X01N", 100), ("X02N", 200)])];

        let (updates, _) = trips_at_stop(&entities, &directory(), "X01N");
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].stop, Stop::default());
        assert_eq!(updates[0].arrival, Some(100));
    }

    #[test]
    fn deleted_entities_never_appear() {
        let entities = vec![FeedEntity::Deleted, trip("t1", &[("L02N", 200)])];

        let (updates, alerts) = trips_at_stop(&entities, &directory(), "L02N");
        assert_eq!(updates.len(), 1);
        assert!(alerts.is_empty());
    }

    #[test]
    fn alerts_accumulate_separately() {
        let entities = vec![
            FeedEntity::Alert(Alert {
                descriptions: vec!["planned work".to_string()],
            }),
            trip("t1", &[("L02N", 200)]),
        ];

        let (updates, alerts) = trips_at_stop(&entities, &directory(), "L02N");
        assert_eq!(updates.len(), 1);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].descriptions, vec!["planned work".to_string()]);
    }

    #[test]
    fn vehicles_and_unrelated_trips_are_ignored() {
        let entities = vec![
            FeedEntity::Vehicle(VehiclePosition {
                next_stop_id: "L02N".to_string(),
                at_stop: true,
            }),
            trip("t1", &[("L01N", 100)]),
        ];

        let (updates, _) = trips_at_stop(&entities, &directory(), "L02N");
        assert!(updates.is_empty());
    }

    #[test]
    fn output_is_feed_order_not_time_order() {
        // The upstream source does not promise time-ordered entities; the
        // derivation must not pretend otherwise.
        let entities = vec![
            trip("late", &[("L02N", 900)]),
            trip("soon", &[("L02N", 100)]),
        ];

        let (updates, _) = trips_at_stop(&entities, &directory(), "L02N");
        assert_eq!(updates[0].arrival, Some(900));
        assert_eq!(updates[1].arrival, Some(100));
    }

    #[test]
    fn soonest_sorts_then_takes() {
        let entities = vec![
            trip("late", &[("L02N", 900)]),
            trip("soon", &[("L02N", 100)]),
            trip("mid", &[("L02N", 500)]),
        ];

        let (updates, _) = trips_at_stop(&entities, &directory(), "L02N");
        let next = soonest(updates, 2);
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].arrival, Some(100));
        assert_eq!(next[1].arrival, Some(500));
    }

    #[test]
    fn soonest_sorts_missing_arrivals_last() {
        let updates = vec![
            StopUpdate {
                arrival: None,
                ..Default::default()
            },
            StopUpdate {
                arrival: Some(100),
                ..Default::default()
            },
        ];

        let next = soonest(updates, 2);
        assert_eq!(next[0].arrival, Some(100));
        assert_eq!(next[1].arrival, None);
    }
}
