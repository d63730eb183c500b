// ========== DOSYA: sentiric-invite-service/src/handler.rs ==========
use crate::app_state::AppState;
use crate::config::AppConfig;
use crate::error::ServiceError;
use crate::http::dial_out::RemoteConference;
use crate::invite::utils::build_invite_url;
use crate::invite::{ConferenceSession, InviteDispatcher, InviteItem, SessionContext};
use rand::distributions::{Alphanumeric, DistString};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, Span};

pub const INVITE_REQUEST_ROUTING_KEY: &str = "invite.send.request";
pub const DIAL_IN_REFRESH_ROUTING_KEY: &str = "dial_in.refresh.request";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    #[serde(default)]
    pub trace_id: Option<String>,
    pub room: String,
    #[serde(default = "default_conference_active")]
    pub conference_active: bool,
    #[serde(default)]
    pub jwt: Option<String>,
    pub items: Vec<InviteItem>,
}

fn default_conference_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct DialInRefreshRequest {
    pub room: String,
}

#[instrument(skip_all, fields(routing_key = %routing_key, trace_id, room))]
pub async fn handle_request(routing_key: String, body: Vec<u8>, state: Arc<AppState>) {
    let result = match routing_key.as_str() {
        INVITE_REQUEST_ROUTING_KEY => {
            info!("Davet isteği işleniyor...");
            handle_invite_request(&body, &state).await
        }
        DIAL_IN_REFRESH_ROUTING_KEY => {
            info!("Dial-in yenileme isteği işleniyor...");
            handle_dial_in_refresh(&body, &state).await
        }
        _ => {
            debug!("Desteklenmeyen istek tipi, görmezden geliniyor.");
            Ok(())
        }
    };

    if let Err(e) = result {
        error!(error = %e, "İstek işlenirken hata oluştu.");
    }
}

async fn handle_invite_request(body: &[u8], state: &AppState) -> Result<(), ServiceError> {
    let request: InviteRequest = serde_json::from_slice(body)?;
    let trace_id = request.trace_id.clone().unwrap_or_else(new_trace_id);

    Span::current().record("trace_id", trace_id.as_str());
    Span::current().record("room", request.room.as_str());

    let context = build_session_context(
        &state.config,
        &state.http_client,
        &request.room,
        request.conference_active,
        request.jwt.clone(),
    );
    let dispatcher = InviteDispatcher::new(state.directory.clone(), state.gateway.clone())
        .with_span(Span::current());

    let undelivered = dispatcher.send_invites_for_items(&request.items, &context).await;
    state
        .publisher
        .publish_invite_result(&trace_id, &request.room, &undelivered)
        .await
}

async fn handle_dial_in_refresh(body: &[u8], state: &AppState) -> Result<(), ServiceError> {
    let request: DialInRefreshRequest = serde_json::from_slice(body)?;
    Span::current().record("room", request.room.as_str());

    state
        .dial_in
        .update_dial_in_numbers(&state.config.dial_in, &request.room)
        .await;
    Ok(())
}

/// Konferans yalnızca aktifse oturuma eklenir; değilse telefon ve gateway kanalları atlanır.
pub fn build_session_context(
    config: &AppConfig,
    http_client: &reqwest::Client,
    room: &str,
    conference_active: bool,
    jwt: Option<String>,
) -> SessionContext {
    let conference = conference_active.then(|| {
        Arc::new(RemoteConference::new(
            room.to_string(),
            config.dial_out_url.clone(),
            http_client.clone(),
        )) as Arc<dyn ConferenceSession>
    });

    SessionContext {
        conference,
        invite_service_url: config.invite_service_url.clone(),
        invite_url: build_invite_url(&config.public_base_url, room),
        jwt,
    }
}

fn new_trace_id() -> String {
    format!("trace-{}", Alphanumeric.sample_string(&mut rand::thread_rng(), 12))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DialInConfig;
    use std::time::Duration;

    fn config() -> AppConfig {
        AppConfig {
            env: "development".to_string(),
            service_version: "0.1.0".to_string(),
            rust_log: "debug".to_string(),
            rabbitmq_url: "amqp://localhost:5672".to_string(),
            public_base_url: "https://meet.sentiric.cloud/".to_string(),
            dial_in: DialInConfig::default(),
            invite_service_url: Some("https://invite.sentiric.cloud/invite".to_string()),
            dial_out_url: None,
            http_timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn invite_request_defaults_to_active_conference() {
        let raw = br#"{"room": "oda", "items": [{"type": "phone", "number": "+905551112233"}]}"#;

        let request: InviteRequest = serde_json::from_slice(raw).unwrap();

        assert!(request.conference_active);
        assert!(request.trace_id.is_none());
        assert_eq!(request.items.len(), 1);
    }

    #[test]
    fn active_session_context_carries_room_and_invite_url() {
        let context = build_session_context(
            &config(),
            &reqwest::Client::new(),
            "haftalik-toplanti",
            true,
            Some("jwt".to_string()),
        );

        assert_eq!(context.conference.as_ref().map(|c| c.room()), Some("haftalik-toplanti"));
        assert_eq!(context.invite_url, "https://meet.sentiric.cloud/haftalik-toplanti");
        assert_eq!(context.jwt.as_deref(), Some("jwt"));
    }

    #[test]
    fn inactive_conference_has_no_session() {
        let context = build_session_context(&config(), &reqwest::Client::new(), "oda", false, None);

        assert!(context.conference.is_none());
        assert_eq!(
            context.invite_service_url.as_deref(),
            Some("https://invite.sentiric.cloud/invite")
        );
    }

    #[test]
    fn generated_trace_ids_have_prefix() {
        let trace_id = new_trace_id();
        assert!(trace_id.starts_with("trace-"));
        assert_eq!(trace_id.len(), "trace-".len() + 12);
    }
}
