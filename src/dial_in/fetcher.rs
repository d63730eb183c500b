// File: src/dial_in/fetcher.rs
use super::types::{ConferenceIdInfo, DialInEvent, DialInNumbers};
use crate::config::DialInConfig;
use crate::error::ServiceError;
use async_trait::async_trait;
use futures::future::join;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

#[async_trait]
pub trait DialInApi: Send + Sync {
    async fn fetch_dial_in_numbers(&self, url: &str) -> Result<DialInNumbers, ServiceError>;

    async fn fetch_conference_id(
        &self,
        url: &str,
        room: &str,
        muc_host: &str,
    ) -> Result<ConferenceIdInfo, ServiceError>;
}

#[async_trait]
pub trait DialInEventSink: Send + Sync {
    async fn publish(&self, event: &DialInEvent) -> Result<(), ServiceError>;
}

pub struct DialInNumbersFetcher {
    api: Arc<dyn DialInApi>,
    sink: Arc<dyn DialInEventSink>,
}

impl DialInNumbersFetcher {
    pub fn new(api: Arc<dyn DialInApi>, sink: Arc<dyn DialInEventSink>) -> Self {
        Self { api, sink }
    }

    /// Numara kataloğunu ve konferans ID'sini paralel sorgular, sonucu tek bir
    /// bildirim olarak yayınlar. Uç noktalardan biri tanımlı değilse hiçbir şey yapmaz.
    #[instrument(skip(self, config))]
    pub async fn update_dial_in_numbers(&self, config: &DialInConfig, room: &str) {
        let (Some(numbers_url), Some(conf_code_url), Some(muc_host)) = (
            config.numbers_url.as_deref(),
            config.conf_code_url.as_deref(),
            config.muc_host.as_deref(),
        ) else {
            debug!("Dial-in uç noktaları tanımlı değil, sorgu atlanıyor.");
            return;
        };

        let event = match self.fetch(numbers_url, conf_code_url, room, muc_host).await {
            Ok((conference_id, dial_in_numbers)) => {
                info!(conference_id, regions = dial_in_numbers.len(), "Dial-in numaraları alındı.");
                DialInEvent::UpdatedSuccess {
                    conference_id,
                    dial_in_numbers,
                }
            }
            Err(ServiceError::ConferenceIdLookup(message)) => {
                warn!(reason = %message, "Konferans ID yanıtı geçersiz.");
                DialInEvent::UpdatedFailed { error: message }
            }
            Err(e) => {
                warn!(error = %e, "Dial-in numaraları alınamadı.");
                DialInEvent::UpdatedFailed { error: e.to_string() }
            }
        };

        if let Err(e) = self.sink.publish(&event).await {
            error!(error = %e, event_type = event.routing_key(), "Dial-in bildirimi yayınlanamadı.");
        }
    }

    async fn fetch(
        &self,
        numbers_url: &str,
        conf_code_url: &str,
        room: &str,
        muc_host: &str,
    ) -> Result<(u64, DialInNumbers), ServiceError> {
        // İki sorgu da sonuçlanana kadar beklenir; biri başarısız olsa bile diğeri iptal edilmez.
        let (dial_in_numbers, conference_info) = join(
            self.api.fetch_dial_in_numbers(numbers_url),
            self.api.fetch_conference_id(conf_code_url, room, muc_host),
        )
        .await;

        let dial_in_numbers = dial_in_numbers?;
        let conference = conference_info?.validate()?;
        Ok((conference.id, dial_in_numbers))
    }
}
