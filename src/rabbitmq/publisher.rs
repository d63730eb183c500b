// File: src/rabbitmq/publisher.rs
use super::connection::RABBITMQ_EXCHANGE_NAME;
use crate::dial_in::{DialInEvent, DialInEventSink};
use crate::error::ServiceError;
use crate::invite::{ConferenceSession, GatewayInviter, InviteItem, VideoSipGwRoom};
use async_trait::async_trait;
use lapin::{options::BasicPublishOptions, BasicProperties, Channel as LapinChannel};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

pub const INVITE_RESULT_ROUTING_KEY: &str = "invite.send.result";
pub const GATEWAY_SESSION_ROUTING_KEY: &str = "videosipgw.session.create";

/// `sentiric_events` exchange'ine kalıcı (delivery_mode=2) JSON olayları yayınlar.
#[derive(Clone)]
pub struct RabbitPublisher {
    channel: Arc<LapinChannel>,
}

impl RabbitPublisher {
    pub fn new(channel: Arc<LapinChannel>) -> Self {
        Self { channel }
    }

    pub async fn publish_json(&self, routing_key: &str, payload: &Value) -> Result<(), ServiceError> {
        debug!(
            event_payload = %payload,
            "{} olayı yayınlanıyor (tam içerik).", routing_key
        );

        self.channel
            .basic_publish(
                RABBITMQ_EXCHANGE_NAME,
                routing_key,
                BasicPublishOptions::default(),
                payload.to_string().as_bytes(),
                BasicProperties::default().with_delivery_mode(2),
            )
            .await?
            .await?;
        Ok(())
    }

    #[instrument(skip(self, undelivered), fields(undelivered = undelivered.len()))]
    pub async fn publish_invite_result(
        &self,
        trace_id: &str,
        room: &str,
        undelivered: &[InviteItem],
    ) -> Result<(), ServiceError> {
        let payload = invite_result_payload(trace_id, room, undelivered)?;
        self.publish_json(INVITE_RESULT_ROUTING_KEY, &payload).await?;
        info!("'{}' olayı yayınlandı.", INVITE_RESULT_ROUTING_KEY);
        Ok(())
    }
}

fn event_envelope(event_type: &str, mut body: Value) -> Value {
    if let Value::Object(map) = &mut body {
        map.insert("eventType".to_string(), Value::String(event_type.to_string()));
        map.insert("timestamp".to_string(), Value::String(chrono::Utc::now().to_rfc3339()));
    }
    body
}

pub fn invite_result_payload(
    trace_id: &str,
    room: &str,
    undelivered: &[InviteItem],
) -> Result<Value, ServiceError> {
    Ok(event_envelope(
        INVITE_RESULT_ROUTING_KEY,
        json!({
            "traceId": trace_id,
            "room": room,
            "undelivered": serde_json::to_value(undelivered)?,
        }),
    ))
}

pub fn dial_in_event_payload(event: &DialInEvent) -> Result<Value, ServiceError> {
    Ok(event_envelope(event.routing_key(), serde_json::to_value(event)?))
}

pub fn gateway_session_payload(room: &str, video_room: &VideoSipGwRoom) -> Value {
    event_envelope(
        GATEWAY_SESSION_ROUTING_KEY,
        json!({
            "room": room,
            "sipAddress": video_room.id,
            "displayName": video_room.name,
        }),
    )
}

#[async_trait]
impl DialInEventSink for RabbitPublisher {
    async fn publish(&self, event: &DialInEvent) -> Result<(), ServiceError> {
        let payload = dial_in_event_payload(event)?;
        self.publish_json(event.routing_key(), &payload).await
    }
}

impl GatewayInviter for RabbitPublisher {
    fn invite_video_rooms(&self, session: &dyn ConferenceSession, rooms: Vec<VideoSipGwRoom>) {
        let publisher = self.clone();
        let room = session.room().to_string();

        // Sonuç beklenmez; hatalar yalnızca loglanır.
        tokio::spawn(async move {
            for video_room in rooms {
                let payload = gateway_session_payload(&room, &video_room);
                if let Err(e) = publisher.publish_json(GATEWAY_SESSION_ROUTING_KEY, &payload).await {
                    error!(error = %e, sip_address = %video_room.id, "SIP gateway oturumu başlatılamadı.");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dial_in::DialInNumbers;

    #[test]
    fn invite_result_lists_undelivered_items() {
        let undelivered = vec![InviteItem::Phone {
            number: "+905551112233".to_string(),
        }];

        let payload = invite_result_payload("trace-abc", "oda", &undelivered).unwrap();

        assert_eq!(payload["eventType"], INVITE_RESULT_ROUTING_KEY);
        assert_eq!(payload["traceId"], "trace-abc");
        assert_eq!(payload["undelivered"][0]["type"], "phone");
        assert!(payload["timestamp"].is_string());
    }

    #[test]
    fn dial_in_payload_keeps_action_fields() {
        let event = DialInEvent::UpdatedSuccess {
            conference_id: 7145,
            dial_in_numbers: DialInNumbers::default(),
        };

        let payload = dial_in_event_payload(&event).unwrap();

        assert_eq!(payload["eventType"], "dial_in.numbers.updated");
        assert_eq!(payload["type"], "DIAL_IN_NUMBERS_UPDATED_SUCCESS");
        assert_eq!(payload["conferenceID"], 7145);
    }

    #[test]
    fn gateway_payload_carries_sip_address() {
        let video_room = VideoSipGwRoom {
            id: "sip:lobby@gw.sentiric.cloud".to_string(),
            name: "Lobi".to_string(),
        };

        let payload = gateway_session_payload("oda", &video_room);

        assert_eq!(payload["sipAddress"], "sip:lobby@gw.sentiric.cloud");
        assert_eq!(payload["displayName"], "Lobi");
        assert_eq!(payload["room"], "oda");
    }
}
