// File: sentiric-invite-service/src/rabbitmq/listener.rs

use super::connection::RABBITMQ_EXCHANGE_NAME;
use crate::app_state::AppState;
use crate::error::ServiceError;
use crate::handler::{handle_request, DIAL_IN_REFRESH_ROUTING_KEY, INVITE_REQUEST_ROUTING_KEY};
use futures::StreamExt;
use lapin::{options::*, types::FieldTable};
use std::sync::Arc;
use tracing::{error, info, instrument};

const REQUEST_QUEUE_NAME: &str = "sentiric.invites.requests";

#[instrument(skip_all)]
pub async fn listen_for_requests(state: Arc<AppState>) -> Result<(), ServiceError> {
    let channel = state.rabbit.clone();

    let queue = channel
        .queue_declare(
            REQUEST_QUEUE_NAME,
            QueueDeclareOptions {
                durable: true,
                ..Default::default()
            },
            FieldTable::default(),
        )
        .await?;

    for routing_key in [INVITE_REQUEST_ROUTING_KEY, DIAL_IN_REFRESH_ROUTING_KEY] {
        channel
            .queue_bind(
                queue.name().as_str(),
                RABBITMQ_EXCHANGE_NAME,
                routing_key,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await?;
    }

    let mut consumer = channel
        .basic_consume(
            queue.name().as_str(),
            "invite_service_worker",
            BasicConsumeOptions::default(),
            FieldTable::default(),
        )
        .await?;

    info!(queue = REQUEST_QUEUE_NAME, "Davet istek kuyruğu dinleniyor...");

    while let Some(delivery) = consumer.next().await {
        let delivery = match delivery {
            Ok(delivery) => delivery,
            Err(e) => {
                error!(error = %e, "RabbitMQ mesajı alınamadı.");
                continue;
            }
        };
        // Hatalı istekler de onaylanır; tekrar kuyruğa dönmez.
        if let Err(e) = delivery.ack(BasicAckOptions::default()).await {
            error!(error = %e, "Mesaj onaylanamadı.");
        }

        tokio::spawn(handle_request(
            delivery.routing_key.as_str().to_string(),
            delivery.data.clone(),
            Arc::clone(&state),
        ));
    }

    Ok(())
}
