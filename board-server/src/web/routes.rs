//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use tracing::warn;

use crate::aqi;
use crate::sky;
use crate::sources::bikes::BikeError;
use crate::sources::sensors::SensorError;
use crate::sources::weather::WeatherError;
use crate::transit::{TrainLine, TransitError, soonest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/arrivals", get(arrivals))
        .route("/api/line", get(line_overview))
        .route("/api/sundial", get(sundial))
        .route("/api/sun", get(sun))
        .route("/api/aqi", get(aqi_breakdown))
        .route("/api/bikes", get(bikes))
        .route("/api/sensor", get(sensor))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Next arrivals at a platform stop.
async fn arrivals(
    State(state): State<AppState>,
    Query(query): Query<ArrivalsQuery>,
) -> Result<Json<ArrivalsResponse>, AppError> {
    let line = TrainLine::from_stop_id(&query.stop).ok_or_else(|| AppError::NotFound {
        message: format!("no line serves stop {}", query.stop),
    })?;

    let (updates, alerts) = state.transit.arrivals(&query.stop).await?;
    if updates.is_empty() {
        warn!(stop = %query.stop, "no trips found");
    }

    // Feed order is not time order; sort before taking the next three.
    let upcoming = soonest(updates, 3);
    Ok(Json(ArrivalsResponse::build(
        &query.stop,
        line,
        &upcoming,
        !alerts.is_empty(),
        Utc::now(),
    )))
}

/// Station-by-station view of a whole line.
async fn line_overview(
    State(state): State<AppState>,
    Query(query): Query<LineQuery>,
) -> Result<Json<LineResponse>, AppError> {
    let line = match query.line.as_deref() {
        None | Some("") => TrainLine::L,
        Some(name) => name.parse().map_err(|_| AppError::BadRequest {
            message: format!("unknown line {name:?}"),
        })?,
    };

    let overview = state.transit.line_overview(line).await?;
    Ok(Json(LineResponse {
        line: line.to_string(),
        segments: overview.segments.iter().map(SegmentDto::from).collect(),
        alerts: overview.alerts,
    }))
}

/// Current sundial position.
async fn sundial(State(state): State<AppState>) -> Result<Json<SundialResponse>, AppError> {
    let weather = state.weather.weather().await?;
    let tomorrow = weather.daily.get(1).ok_or_else(|| AppError::Unavailable {
        message: "weather data has no forecast for tomorrow".to_string(),
    })?;

    let dial = sky::sundial(
        Utc::now().timestamp(),
        weather.current.sunrise,
        weather.current.sunset,
        tomorrow.sunrise,
    );
    Ok(Json(SundialResponse {
        rotation: dial.rotation,
        color: dial.color.to_string(),
    }))
}

/// Today's sun times and moon phase.
async fn sun(State(state): State<AppState>) -> Result<Json<SunResponse>, AppError> {
    let weather = state.weather.weather().await?;
    let today = weather.daily.first().ok_or_else(|| AppError::Unavailable {
        message: "weather data has no forecast for today".to_string(),
    })?;

    Ok(Json(SunResponse {
        sunrise: weather.current.sunrise,
        sunset: weather.current.sunset,
        moon_icon: sky::moon_icon(sky::moon_phase_index(today.moon_phase)).to_string(),
    }))
}

/// Air quality breakdown from the latest pollution sample.
async fn aqi_breakdown(State(state): State<AppState>) -> Result<Json<AqiResponse>, AppError> {
    let pollution = state.weather.pollution().await?;
    let sample = pollution
        .samples
        .first()
        .ok_or_else(|| AppError::Unavailable {
            message: "pollution data has no samples".to_string(),
        })?;

    let indices = aqi::pollutant_indices(&sample.components);
    let overall = indices.overall();
    Ok(Json(AqiResponse {
        carbon_monoxide: indices.co,
        ozone: indices.o3,
        particulates_2_5: indices.pm2_5,
        particulates_10: indices.pm10,
        sulfur_dioxide: indices.so2,
        nitrogen_dioxide: indices.no2,
        overall,
        band: aqi::band(overall),
    }))
}

/// Bike availability at a named station.
async fn bikes(
    State(state): State<AppState>,
    Query(query): Query<BikesQuery>,
) -> Result<Json<BikesResponse>, AppError> {
    let count = state.bikes.bikes_at_station(&query.station).await?;
    Ok(Json(BikesResponse {
        station: query.station,
        classics: count.classics,
        ebikes: count.ebikes,
        total: count.classics + count.ebikes,
    }))
}

/// One sensor reading with its trend.
async fn sensor(
    State(state): State<AppState>,
    Query(query): Query<SensorQuery>,
) -> Result<Json<SensorResponse>, AppError> {
    let previous = state.sensors.previous(&query.device);
    let reading = state.sensors.state(&query.device).await?;

    let trending_up = previous
        .and_then(|prior| prior.state.parse::<f64>().ok())
        .zip(reading.state.parse::<f64>().ok())
        .map(|(prior, current)| prior < current);

    Ok(Json(SensorResponse {
        device: query.device,
        state: reading.state.clone(),
        unit: reading.attributes.unit.clone(),
        trending_up,
    }))
}

/// Errors surfaced by the web layer.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
        };

        warn!(%status, message = %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<TransitError> for AppError {
    fn from(err: TransitError) -> Self {
        match err {
            TransitError::UnknownStop(_) => AppError::NotFound {
                message: err.to_string(),
            },
            _ => AppError::Unavailable {
                message: err.to_string(),
            },
        }
    }
}

impl From<WeatherError> for AppError {
    fn from(err: WeatherError) -> Self {
        AppError::Unavailable {
            message: err.to_string(),
        }
    }
}

impl From<BikeError> for AppError {
    fn from(err: BikeError) -> Self {
        match err {
            BikeError::StationNotFound(_) => AppError::NotFound {
                message: err.to_string(),
            },
            _ => AppError::Unavailable {
                message: err.to_string(),
            },
        }
    }
}

impl From<SensorError> for AppError {
    fn from(err: SensorError) -> Self {
        AppError::Unavailable {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transit_errors_map_to_status() {
        let err = AppError::from(TransitError::UnknownStop("X99".to_string()));
        assert!(matches!(err, AppError::NotFound { .. }));

        let err = AppError::from(TransitError::Status { status: 502 });
        assert!(matches!(err, AppError::Unavailable { .. }));
    }

    #[test]
    fn bike_station_miss_is_not_found() {
        let err = AppError::from(BikeError::StationNotFound("nowhere".to_string()));
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
