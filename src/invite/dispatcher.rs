// File: src/invite/dispatcher.rs
use super::item::{InviteItem, PendingInvite, VideoSipGwRoom};
use super::session::{ConferenceSession, DirectoryInviter, GatewayInviter, SessionContext};
use crate::error::ServiceError;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tracing::{debug, error, info, Span};

/// Bir davet grubunu teslimat kanallarına dağıtır ve teslimi doğrulanamayanları döner.
///
/// Kanallar:
/// - telefon: aktif konferans üzerinden her numara ayrı çevrilir,
/// - dizin: kullanıcı ve odalar tek bir toplu istekle gönderilir (ya hep ya hiç),
/// - SIP gateway: ateşle ve unut, sonucu beklenmeden teslim edilmiş sayılır.
///
/// Hiçbir kanal hatası tüm işlemi durdurmaz; başarısız kanalın davetlileri
/// dönen listede kalır.
pub struct InviteDispatcher {
    directory: Arc<dyn DirectoryInviter>,
    gateway: Arc<dyn GatewayInviter>,
    span: Span,
}

enum ChannelOutcome {
    PhoneDelivered { index: usize, item: InviteItem },
    PhoneFailed { item: InviteItem, error: ServiceError },
    DirectoryDelivered { count: usize },
    DirectoryFailed { count: usize, error: ServiceError },
}

/// Henüz teslim edilmemiş davetliler, girdideki sıralarıyla birlikte.
type InvitesLeft = Vec<(usize, InviteItem)>;

impl ChannelOutcome {
    // Liste yalnızca küçülür; hata sonuçları onu olduğu gibi bırakır.
    fn apply(self, invites_left_to_send: InvitesLeft, span: &Span) -> InvitesLeft {
        match self {
            ChannelOutcome::PhoneDelivered { index, item } => {
                debug!(parent: span, index, number = ?item.phone_number(), "Telefon daveti teslim edildi.");
                invites_left_to_send
                    .into_iter()
                    .filter(|(current, _)| *current != index)
                    .collect()
            }
            ChannelOutcome::PhoneFailed { item, error } => {
                error!(parent: span, number = ?item.phone_number(), error = %error, "Telefon numarası davet edilemedi.");
                invites_left_to_send
            }
            ChannelOutcome::DirectoryDelivered { count } => {
                debug!(parent: span, count, "Dizin davetleri teslim edildi.");
                invites_left_to_send
                    .into_iter()
                    .filter(|(_, current)| !current.is_directory_target())
                    .collect()
            }
            ChannelOutcome::DirectoryFailed { count, error } => {
                error!(parent: span, count, error = %error, "Kullanıcı ve odalar davet edilemedi.");
                invites_left_to_send
            }
        }
    }
}

impl InviteDispatcher {
    pub fn new(directory: Arc<dyn DirectoryInviter>, gateway: Arc<dyn GatewayInviter>) -> Self {
        Self {
            directory,
            gateway,
            span: Span::current(),
        }
    }

    /// Dispatcher'ın tüm log olayları bu span'in altında üretilir.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub async fn send_invites_for_items(
        &self,
        invite_items: &[InviteItem],
        context: &SessionContext,
    ) -> Vec<InviteItem> {
        let mut invites_left_to_send: InvitesLeft = invite_items.iter().cloned().enumerate().collect();
        let mut pending: FuturesUnordered<BoxFuture<'_, ChannelOutcome>> = FuturesUnordered::new();

        // Önce tüm numara çevirme işlemleri başlatılır.
        if let Some(conference) = &context.conference {
            for PendingInvite { index, item, completion } in
                invite_phone_numbers(invite_items, &**conference, &self.span)
            {
                pending.push(Box::pin(async move {
                    match completion.await {
                        Ok(()) => ChannelOutcome::PhoneDelivered { index, item },
                        Err(error) => ChannelOutcome::PhoneFailed { item, error },
                    }
                }));
            }
        }

        // Seçim, telefon sonuçları uygulanmadan önceki listeden yapılır: bu noktada
        // hiçbir tamamlanma işlenmemiştir, liste girdinin kendisidir.
        let users_and_rooms: Vec<InviteItem> = invites_left_to_send
            .iter()
            .filter(|(_, item)| item.is_directory_target())
            .map(|(_, item)| item.clone())
            .collect();

        if !users_and_rooms.is_empty() {
            let directory = &*self.directory;
            pending.push(Box::pin(async move {
                let count = users_and_rooms.len();
                match directory
                    .send_directory_invites(
                        context.invite_service_url.as_deref(),
                        &context.invite_url,
                        context.jwt.as_deref(),
                        &users_and_rooms,
                    )
                    .await
                {
                    Ok(()) => ChannelOutcome::DirectoryDelivered { count },
                    Err(error) => ChannelOutcome::DirectoryFailed { count, error },
                }
            }));
        }

        // SIP gateway davetleri beklenmez; gönderildikleri anda listeden çıkarılır.
        let video_rooms: Vec<VideoSipGwRoom> = invites_left_to_send
            .iter()
            .filter_map(|(_, item)| item.video_room().cloned())
            .collect();

        if let Some(conference) = &context.conference {
            if !video_rooms.is_empty() {
                info!(parent: &self.span, count = video_rooms.len(), "SIP gateway odaları davet ediliyor.");
                self.gateway.invite_video_rooms(&**conference, video_rooms);
                invites_left_to_send.retain(|(_, item)| item.video_room().is_none());
            }
        }

        // Tamamlanma işleyicileri bu görevde sırayla çalışır; liste tek sahiplidir.
        while let Some(outcome) = pending.next().await {
            invites_left_to_send = outcome.apply(invites_left_to_send, &self.span);
        }

        let undelivered: Vec<InviteItem> = invites_left_to_send.into_iter().map(|(_, item)| item).collect();
        info!(
            parent: &self.span,
            total = invite_items.len(),
            undelivered = undelivered.len(),
            undelivered_kinds = ?undelivered.iter().map(InviteItem::kind).collect::<Vec<_>>(),
            "Davet dağıtımı tamamlandı."
        );
        undelivered
    }
}

/// Telefon tipindeki her davetli için bir çevirme işlemi başlatır.
pub fn invite_phone_numbers(
    invite_items: &[InviteItem],
    conference: &dyn ConferenceSession,
    span: &Span,
) -> Vec<PendingInvite> {
    invite_items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| item.phone_number().map(|number| (index, item, number)))
        .map(|(index, item, number)| {
            let handle = conference.dial(number);
            debug!(parent: span, number = %handle.number, room = %conference.room(), "Numara çevriliyor.");
            PendingInvite {
                index,
                item: item.clone(),
                completion: handle.completion,
            }
        })
        .collect()
}
