// File: sentiric-invite-service/src/rabbitmq/connection.rs

use crate::error::ServiceError;
use lapin::{options::*, types::FieldTable, Channel as LapinChannel, Connection, ConnectionProperties, ExchangeKind};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

pub const RABBITMQ_EXCHANGE_NAME: &str = "sentiric_events";

const MAX_CONNECT_ATTEMPTS: u32 = 10;
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(5);

pub async fn try_connect(url: &str) -> Result<LapinChannel, ServiceError> {
    let conn = Connection::connect(url, ConnectionProperties::default()).await?;
    let channel = conn.create_channel().await?;
    Ok(channel)
}

pub async fn connect_with_retry(url: &str) -> Result<LapinChannel, ServiceError> {
    let mut attempt = 1;
    loop {
        match try_connect(url).await {
            Ok(channel) => {
                info!("RabbitMQ bağlantısı başarıyla kuruldu.");
                return Ok(channel);
            }
            Err(e) if attempt >= MAX_CONNECT_ATTEMPTS => return Err(e),
            Err(e) => {
                warn!(
                    error = %e,
                    attempt,
                    max_attempts = MAX_CONNECT_ATTEMPTS,
                    "RabbitMQ'ya bağlanılamadı. {} saniye sonra tekrar denenecek...",
                    CONNECT_RETRY_DELAY.as_secs()
                );
                attempt += 1;
                sleep(CONNECT_RETRY_DELAY).await;
            }
        }
    }
}

pub async fn declare_exchange(channel: &LapinChannel) -> Result<(), ServiceError> {
    channel
        .exchange_declare(
            RABBITMQ_EXCHANGE_NAME,
            ExchangeKind::Topic,
            ExchangeDeclareOptions {
                durable: true,
                ..Default::default()
            },
            FieldTable::default(),
        )
        .await?;
    Ok(())
}
