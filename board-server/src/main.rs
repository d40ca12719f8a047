use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use board_server::config::Config;
use board_server::export::{ExportHub, LogExporter};
use board_server::sources::bikes::{BikeShareClient, BikeShareConfig};
use board_server::sources::sensors::{SensorClient, SensorConfig};
use board_server::sources::weather::{WeatherClient, WeatherConfig};
use board_server::stops::StopDirectory;
use board_server::transit::{TransitClient, TransitConfig};
use board_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    // Stop reference data is load-bearing: refuse to start without it.
    let stops = match StopDirectory::load(&config.stop_data_path) {
        Ok(stops) => Arc::new(stops),
        Err(err) => {
            error!(path = %config.stop_data_path.display(), error = %err, "failed to load stop data");
            std::process::exit(1);
        }
    };
    info!(stops = stops.len(), "loaded stop directory");

    let transit = Arc::new(
        TransitClient::new(TransitConfig::new(), Arc::clone(&stops))
            .expect("failed to create transit client"),
    );

    let (latitude, longitude) = config
        .weather_coords()
        .expect("invalid WEATHER_LOC coordinates");
    let weather = Arc::new(
        WeatherClient::new(WeatherConfig::new(
            &config.weather_api_key,
            latitude,
            longitude,
        ))
        .expect("failed to create weather client"),
    );

    let bikes = Arc::new(
        BikeShareClient::new(BikeShareConfig::new()).expect("failed to create bike-share client"),
    );

    let sensors = Arc::new(
        SensorClient::new(SensorConfig::new(
            &config.sensor_endpoint,
            &config.sensor_api_key,
        ))
        .expect("failed to create sensor client"),
    );

    // Wire the export hub: one provider per bike station, one for the
    // sensor fleet, and the log sink standing in for a metrics database.
    let mut hub = ExportHub::new(config.export_interval);
    if !config.sensor_devices.is_empty() {
        hub.add_provider(sensors.provider(config.sensor_devices.clone()));
    }
    for station in &config.bike_stations {
        hub.add_provider(bikes.provider(station.clone()));
    }
    hub.add_exporter(LogExporter);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let hub_task = tokio::spawn(async move { hub.run(shutdown_rx).await });

    let state = AppState::new(transit, weather, bikes, sensors);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .expect("server error");

    // Let the hub finish its in-flight cycle before exiting.
    let _ = shutdown_tx.send(true);
    let _ = hub_task.await;
}
