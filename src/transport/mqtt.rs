/// MQTT subscription feeding raw payloads into the pipeline
use log::{debug, error, info, warn};
use rumqttc::{AsyncClient, Event as MqttEvent, MqttOptions, Packet, QoS};
use tokio::time::{sleep, Duration};

use crate::config::IngestConfig;
use crate::pipeline::Pipeline;
use crate::protocol::Event;

const KEEP_ALIVE_SECS: u64 = 30;
const REQUEST_CAPACITY: usize = 10; // outgoing request queue of the client
const RECONNECT_DELAY_SECS: u64 = 5;

/// Feed one received publish to the pipeline
///
/// Payloads from other topics are ignored. Dropped payloads are logged at
/// debug level only; the stream keeps going either way.
///
/// # Returns
/// The pipeline event, or None if the payload was ignored or dropped
pub fn handle_publish(
    topic: &str,
    payload: &[u8],
    expected_topic: &str,
    pipeline: &mut Pipeline,
) -> Option<Event> {
    if topic != expected_topic {
        debug!("Ignoring message on topic '{}'", topic);
        return None;
    }

    match pipeline.process(payload) {
        Ok(event) => {
            match event {
                Event::FlushRequested { delivered: true } => debug!("Published snapshot"),
                Event::FlushRequested { delivered: false } => {
                    warn!("Snapshot consumer is gone, snapshot dropped")
                }
                _ => {}
            }
            Some(event)
        }
        Err(e) => {
            debug!(
                "Dropped payload {:?}: {}",
                String::from_utf8_lossy(payload),
                e
            );
            None
        }
    }
}

/// Receive payloads from the broker until the task is cancelled
///
/// The subscription is (re)issued on every ConnAck, so it survives the client
/// reconnecting after a failed poll.
pub async fn run_ingest(
    config: &IngestConfig,
    pipeline: &mut Pipeline,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = MqttOptions::new(
        config.client_id.clone(),
        config.broker_host.clone(),
        config.broker_port,
    );
    options.set_keep_alive(Duration::from_secs(KEEP_ALIVE_SECS));

    let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);

    info!(
        "Connecting to MQTT broker {}:{}",
        config.broker_host, config.broker_port
    );

    loop {
        match eventloop.poll().await {
            Ok(MqttEvent::Incoming(Packet::ConnAck(_))) => {
                info!("Connected, subscribing to '{}'", config.topic);
                client.try_subscribe(config.topic.clone(), QoS::AtMostOnce)?;
            }
            Ok(MqttEvent::Incoming(Packet::Publish(publish))) => {
                handle_publish(&publish.topic, &publish.payload, &config.topic, pipeline);
            }
            Ok(_) => {}
            Err(e) => {
                error!("MQTT connection error: {}", e);
                sleep(Duration::from_secs(RECONNECT_DELAY_SECS)).await;
            }
        }
    }
}
