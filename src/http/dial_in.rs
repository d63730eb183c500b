// File: src/http/dial_in.rs
use super::ensure_success;
use crate::dial_in::{ConferenceIdInfo, DialInApi, DialInNumbers};
use crate::error::ServiceError;
use async_trait::async_trait;
use tracing::{debug, instrument};

pub struct HttpDialInApi {
    http_client: reqwest::Client,
}

impl HttpDialInApi {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

/// Konferans eşleştirme servisinin beklediği tam oda adı: `<oda>@<muc sunucusu>`.
pub fn conference_address(room: &str, muc_host: &str) -> String {
    format!("{}@{}", room, muc_host)
}

#[async_trait]
impl DialInApi for HttpDialInApi {
    #[instrument(skip(self))]
    async fn fetch_dial_in_numbers(&self, url: &str) -> Result<DialInNumbers, ServiceError> {
        let response = ensure_success(self.http_client.get(url).send().await?).await?;
        let numbers = response.json::<DialInNumbers>().await?;
        debug!(regions = numbers.len(), "Numara kataloğu alındı.");
        Ok(numbers)
    }

    #[instrument(skip(self))]
    async fn fetch_conference_id(
        &self,
        url: &str,
        room: &str,
        muc_host: &str,
    ) -> Result<ConferenceIdInfo, ServiceError> {
        let conference = conference_address(room, muc_host);
        let response = ensure_success(
            self.http_client
                .get(url)
                .query(&[("conference", conference.as_str())])
                .send()
                .await?,
        )
        .await?;
        let info = response.json::<ConferenceIdInfo>().await?;
        debug!(id = ?info.id, "Konferans ID yanıtı alındı.");
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conference_address_joins_room_and_muc_host() {
        assert_eq!(
            conference_address("haftalik-toplanti", "conference.meet.sentiric.cloud"),
            "haftalik-toplanti@conference.meet.sentiric.cloud"
        );
    }
}
