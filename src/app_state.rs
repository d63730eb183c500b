// File: src/app_state.rs
use crate::config::AppConfig;
use crate::dial_in::DialInNumbersFetcher;
use crate::error::ServiceError;
use crate::http::{self, dial_in::HttpDialInApi, directory::HttpDirectoryInviter};
use crate::invite::{DirectoryInviter, GatewayInviter};
use crate::rabbitmq::{self, publisher::RabbitPublisher};
use lapin::Channel as LapinChannel;
use std::sync::Arc;
use tracing::info;

pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http_client: reqwest::Client,
    pub rabbit: Arc<LapinChannel>,
    pub publisher: RabbitPublisher,
    pub directory: Arc<dyn DirectoryInviter>,
    pub gateway: Arc<dyn GatewayInviter>,
    pub dial_in: DialInNumbersFetcher,
}

impl AppState {
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, ServiceError> {
        let http_client = http::build_client(config.http_timeout)?;

        info!("Kritik RabbitMQ bağımlılığı başlatılıyor...");
        let rabbit = Arc::new(rabbitmq::connection::connect_with_retry(&config.rabbitmq_url).await?);
        rabbitmq::connection::declare_exchange(&rabbit).await?;
        info!(
            exchange_name = rabbitmq::connection::RABBITMQ_EXCHANGE_NAME,
            "RabbitMQ exchange'i deklare edildi."
        );

        let publisher = RabbitPublisher::new(rabbit.clone());
        let dial_in = DialInNumbersFetcher::new(
            Arc::new(HttpDialInApi::new(http_client.clone())),
            Arc::new(publisher.clone()),
        );

        Ok(AppState {
            directory: Arc::new(HttpDirectoryInviter::new(http_client.clone())),
            gateway: Arc::new(publisher.clone()),
            config,
            http_client,
            rabbit,
            publisher,
            dial_in,
        })
    }
}
