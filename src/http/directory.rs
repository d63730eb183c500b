// File: src/http/directory.rs
use super::ensure_success;
use crate::error::ServiceError;
use crate::invite::{DirectoryInviter, InviteItem};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, instrument, warn};

#[derive(Debug, Serialize)]
pub struct DirectoryInviteRequest<'a> {
    pub invited: &'a [InviteItem],
    pub url: &'a str,
}

pub struct HttpDirectoryInviter {
    http_client: reqwest::Client,
}

impl HttpDirectoryInviter {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl DirectoryInviter for HttpDirectoryInviter {
    #[instrument(skip_all, fields(count = items.len()))]
    async fn send_directory_invites(
        &self,
        service_url: Option<&str>,
        invite_url: &str,
        jwt: Option<&str>,
        items: &[InviteItem],
    ) -> Result<(), ServiceError> {
        // Davet servisi tanımlı değilse ya da gönderilecek kimse yoksa istek atılmaz.
        let Some(service_url) = service_url else {
            warn!("INVITE_SERVICE_URL tanımlı değil, dizin davetleri gönderilmedi.");
            return Ok(());
        };
        if items.is_empty() {
            return Ok(());
        }

        let mut request = self.http_client.post(service_url).json(&DirectoryInviteRequest {
            invited: items,
            url: invite_url,
        });
        if let Some(token) = jwt {
            request = request.query(&[("token", token)]);
        }

        ensure_success(request.send().await?).await?;
        info!("Dizin davetleri gönderildi.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_service_url_resolves_without_request() {
        let inviter = HttpDirectoryInviter::new(reqwest::Client::new());
        let items = vec![InviteItem::User {
            id: "ayse".to_string(),
            name: None,
        }];

        let result = inviter
            .send_directory_invites(None, "https://meet.sentiric.cloud/oda", Some("jwt"), &items)
            .await;

        assert!(result.is_ok());
    }

    #[test]
    fn request_body_carries_items_and_invite_url() {
        let items = vec![InviteItem::Room {
            id: "destek".to_string(),
            name: Some("Destek".to_string()),
        }];
        let body = serde_json::to_value(DirectoryInviteRequest {
            invited: &items,
            url: "https://meet.sentiric.cloud/oda",
        })
        .unwrap();

        assert_eq!(body["url"], "https://meet.sentiric.cloud/oda");
        assert_eq!(body["invited"][0]["type"], "room");
        assert_eq!(body["invited"][0]["name"], "Destek");
    }
}
