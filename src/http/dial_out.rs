// File: src/http/dial_out.rs
use super::ensure_success;
use crate::error::ServiceError;
use crate::invite::utils::normalize_phone_number;
use crate::invite::{ConferenceSession, DialHandle};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct DialOutRequest<'a> {
    room: &'a str,
    number: &'a str,
}

/// Dial-out servisi üzerinden numara çeviren konferans oturumu.
pub struct RemoteConference {
    room: String,
    dial_out_url: Option<String>,
    http_client: reqwest::Client,
}

impl RemoteConference {
    pub fn new(room: String, dial_out_url: Option<String>, http_client: reqwest::Client) -> Self {
        Self {
            room,
            dial_out_url,
            http_client,
        }
    }
}

impl ConferenceSession for RemoteConference {
    fn room(&self) -> &str {
        &self.room
    }

    fn dial(&self, number: &str) -> DialHandle {
        let http_client = self.http_client.clone();
        let dial_out_url = self.dial_out_url.clone();
        let room = self.room.clone();
        let requested = number.to_string();

        let completion = async move {
            let url = dial_out_url
                .ok_or_else(|| ServiceError::InvalidConfig("DIAL_OUT_URL tanımlı değil".to_string()))?;
            let normalized = normalize_phone_number(&requested)
                .ok_or_else(|| ServiceError::InvalidPhoneNumber(requested.clone()))?;

            let request = DialOutRequest {
                room: &room,
                number: &normalized,
            };
            ensure_success(http_client.post(&url).json(&request).send().await?).await?;
            info!(room = %room, number = %normalized, "Numara çevirme isteği kabul edildi.");
            Ok::<(), ServiceError>(())
        };

        DialHandle {
            number: number.to_string(),
            completion: Box::pin(completion),
        }
    }
}
