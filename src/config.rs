use log::info;
use std::env;
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

const DEFAULT_BROKER_URL: &str = "mqtt://broker.hivemq.com:1883";
const DEFAULT_TOPIC: &str = "receive_collection_script_topic";
const DEFAULT_CLIENT_ID: &str = "uart-telemetry-ingest";
const DEFAULT_MQTT_PORT: u16 = 1883;
const DEFAULT_WINDOW_CAPACITY: usize = 10;
const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub broker_host: String,
    pub broker_port: u16,
    pub topic: String,
    pub client_id: String,
    pub window_capacity: usize,
    pub poll_interval: Duration,
}

impl IngestConfig {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Load environment variables
        dotenv::dotenv().ok();

        let broker_url = env::var("MQTT_BROKER_URL").unwrap_or_else(|_| DEFAULT_BROKER_URL.into());
        let (broker_host, broker_port) = parse_broker_url(&broker_url)?;

        let topic = env::var("MQTT_TOPIC").unwrap_or_else(|_| DEFAULT_TOPIC.into());
        let client_id = env::var("MQTT_CLIENT_ID").unwrap_or_else(|_| DEFAULT_CLIENT_ID.into());

        let window_capacity = match env::var("WINDOW_CAPACITY") {
            Ok(value) => parse_positive("WINDOW_CAPACITY", &value)?,
            Err(_) => DEFAULT_WINDOW_CAPACITY,
        };

        let poll_interval_ms = match env::var("POLL_INTERVAL_MS") {
            Ok(value) => parse_positive("POLL_INTERVAL_MS", &value)? as u64,
            Err(_) => DEFAULT_POLL_INTERVAL_MS,
        };

        info!(
            "Broker {}:{}, topic '{}', window capacity {}, poll every {} ms",
            broker_host, broker_port, topic, window_capacity, poll_interval_ms
        );

        Ok(IngestConfig {
            broker_host,
            broker_port,
            topic,
            client_id,
            window_capacity,
            poll_interval: Duration::from_millis(poll_interval_ms),
        })
    }
}

/// Split an `mqtt://host[:port]` URL into host and port
///
/// `tcp://` is accepted as an alias; the port defaults to 1883.
pub fn parse_broker_url(raw: &str) -> Result<(String, u16), ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::BrokerUrl(format!("{}: {}", raw, e)))?;

    if url.scheme() != "mqtt" && url.scheme() != "tcp" {
        return Err(ConfigError::BrokerUrl(format!(
            "{}: unsupported scheme '{}'",
            raw,
            url.scheme()
        )));
    }

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => return Err(ConfigError::BrokerUrl(format!("{}: missing host", raw))),
    };

    Ok((host, url.port().unwrap_or(DEFAULT_MQTT_PORT)))
}

fn parse_positive(name: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}
