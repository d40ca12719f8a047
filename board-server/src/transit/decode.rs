//! Binary feed envelope decoding.

use prost::Message;

use super::entity::{Alert, FeedEntity, StopTimeUpdate, TripUpdate, VehiclePosition};

/// Error returned for a structurally invalid feed payload.
#[derive(Debug, thiserror::Error)]
#[error("malformed transit feed: {0}")]
pub struct MalformedFeed(#[from] prost::DecodeError);

/// Decode a binary feed envelope into typed entities.
///
/// Wire entities that populate none of the known kinds are dropped; deleted
/// markers are kept as [`FeedEntity::Deleted`] so tests can observe that
/// derivations skip them.
pub fn decode(bytes: &[u8]) -> Result<Vec<FeedEntity>, MalformedFeed> {
    let message = gtfs_rt::FeedMessage::decode(bytes).map_err(MalformedFeed)?;
    Ok(message.entity.into_iter().filter_map(convert).collect())
}

/// An entity carrying several populated fields is classified by the first
/// match: deleted, alert, trip update, vehicle position.
fn convert(entity: gtfs_rt::FeedEntity) -> Option<FeedEntity> {
    if entity.is_deleted.unwrap_or(false) {
        return Some(FeedEntity::Deleted);
    }

    if let Some(alert) = entity.alert {
        return Some(FeedEntity::Alert(Alert {
            descriptions: translations(alert.description_text),
        }));
    }

    if let Some(update) = entity.trip_update {
        let stop_times = update
            .stop_time_update
            .into_iter()
            .map(|stop_time| StopTimeUpdate {
                stop_id: stop_time.stop_id.unwrap_or_default(),
                arrival: stop_time.arrival.and_then(|event| event.time),
                departure: stop_time.departure.and_then(|event| event.time),
            })
            .collect();

        return Some(FeedEntity::Trip(TripUpdate {
            trip_id: update.trip.trip_id.unwrap_or_default(),
            stop_times,
        }));
    }

    if let Some(vehicle) = entity.vehicle {
        let at_stop =
            vehicle.current_status() == gtfs_rt::vehicle_position::VehicleStopStatus::StoppedAt;
        return Some(FeedEntity::Vehicle(VehiclePosition {
            next_stop_id: vehicle.stop_id.unwrap_or_default(),
            at_stop,
        }));
    }

    None
}

fn translations(text: Option<gtfs_rt::TranslatedString>) -> Vec<String> {
    text.map(|translated| {
        translated
            .translation
            .into_iter()
            .map(|translation| translation.text)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    use gtfs_rt::vehicle_position::VehicleStopStatus;

    fn encode(entities: Vec<gtfs_rt::FeedEntity>) -> Vec<u8> {
        let message = gtfs_rt::FeedMessage {
            header: gtfs_rt::FeedHeader {
                gtfs_realtime_version: "2.0".to_string(),
                ..Default::default()
            },
            entity: entities,
        };
        message.encode_to_vec()
    }

    fn wire_trip(trip_id: &str, stop_ids: &[&str]) -> gtfs_rt::TripUpdate {
        gtfs_rt::TripUpdate {
            trip: gtfs_rt::TripDescriptor {
                trip_id: Some(trip_id.to_string()),
                ..Default::default()
            },
            stop_time_update: stop_ids
                .iter()
                .map(|stop_id| gtfs_rt::trip_update::StopTimeUpdate {
                    stop_id: Some(stop_id.to_string()),
                    arrival: Some(gtfs_rt::trip_update::StopTimeEvent {
                        time: Some(1_700_000_000),
                        ..Default::default()
                    }),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn invalid_payload_is_malformed() {
        let result = decode(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(MalformedFeed(_))));
    }

    #[test]
    fn empty_payload_decodes_to_no_entities() {
        // An empty buffer is a valid (default) envelope, not a decode error.
        assert_eq!(decode(&[]).unwrap(), vec![]);
    }

    #[test]
    fn trip_update_entity_decodes() {
        let bytes = encode(vec![gtfs_rt::FeedEntity {
            id: "1".to_string(),
            trip_update: Some(wire_trip("trip-1", &["L01N", "L02N"])),
            ..Default::default()
        }]);

        let entities = decode(&bytes).unwrap();
        assert_eq!(entities.len(), 1);
        match &entities[0] {
            FeedEntity::Trip(trip) => {
                assert_eq!(trip.trip_id, "trip-1");
                assert_eq!(trip.stop_times.len(), 2);
                assert_eq!(trip.stop_times[0].stop_id, "L01N");
                assert_eq!(trip.stop_times[0].arrival, Some(1_700_000_000));
                assert_eq!(trip.stop_times[0].departure, None);
            }
            other => panic!("expected trip update, got {other:?}"),
        }
    }

    #[test]
    fn deleted_flag_wins_over_payload() {
        let bytes = encode(vec![gtfs_rt::FeedEntity {
            id: "1".to_string(),
            is_deleted: Some(true),
            trip_update: Some(wire_trip("trip-1", &["L01N"])),
            ..Default::default()
        }]);

        assert_eq!(decode(&bytes).unwrap(), vec![FeedEntity::Deleted]);
    }

    #[test]
    fn alert_wins_over_trip_update() {
        let bytes = encode(vec![gtfs_rt::FeedEntity {
            id: "1".to_string(),
            trip_update: Some(wire_trip("trip-1", &["L01N"])),
            alert: Some(gtfs_rt::Alert {
                description_text: Some(gtfs_rt::TranslatedString {
                    translation: vec![gtfs_rt::translated_string::Translation {
                        text: "trains delayed".to_string(),
                        language: None,
                    }],
                }),
                ..Default::default()
            }),
            ..Default::default()
        }]);

        let entities = decode(&bytes).unwrap();
        match &entities[0] {
            FeedEntity::Alert(alert) => {
                assert_eq!(alert.descriptions, vec!["trains delayed".to_string()]);
            }
            other => panic!("expected alert, got {other:?}"),
        }
    }

    #[test]
    fn vehicle_status_maps_to_at_stop() {
        let stopped = gtfs_rt::FeedEntity {
            id: "1".to_string(),
            vehicle: Some(gtfs_rt::VehiclePosition {
                stop_id: Some("L05N".to_string()),
                current_status: Some(VehicleStopStatus::StoppedAt as i32),
                ..Default::default()
            }),
            ..Default::default()
        };
        let in_transit = gtfs_rt::FeedEntity {
            id: "2".to_string(),
            vehicle: Some(gtfs_rt::VehiclePosition {
                stop_id: Some("L06S".to_string()),
                current_status: Some(VehicleStopStatus::InTransitTo as i32),
                ..Default::default()
            }),
            ..Default::default()
        };

        let entities = decode(&encode(vec![stopped, in_transit])).unwrap();
        assert_eq!(
            entities,
            vec![
                FeedEntity::Vehicle(VehiclePosition {
                    next_stop_id: "L05N".to_string(),
                    at_stop: true,
                }),
                FeedEntity::Vehicle(VehiclePosition {
                    next_stop_id: "L06S".to_string(),
                    at_stop: false,
                }),
            ]
        );
    }

    #[test]
    fn entity_with_no_payload_is_dropped() {
        let bytes = encode(vec![gtfs_rt::FeedEntity {
            id: "1".to_string(),
            ..Default::default()
        }]);

        assert_eq!(decode(&bytes).unwrap(), vec![]);
    }
}
