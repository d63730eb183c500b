// File: src/invite/session.rs
use super::item::{InviteItem, VideoSipGwRoom};
use crate::error::ServiceError;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Numara çevirme işleminin tutamacı: çevrilen numara ve işlemin sonucu.
pub struct DialHandle {
    pub number: String,
    pub completion: BoxFuture<'static, Result<(), ServiceError>>,
}

/// Aktif bir konferans oturumu.
pub trait ConferenceSession: Send + Sync {
    fn room(&self) -> &str;

    /// Tutamaç senkron oluşturulur; çevirme işlemi `completion` beklenirken yürür.
    fn dial(&self, number: &str) -> DialHandle;
}

/// Kullanıcı/oda davetlerini dizin servisine toplu olarak iletir.
#[async_trait]
pub trait DirectoryInviter: Send + Sync {
    async fn send_directory_invites(
        &self,
        service_url: Option<&str>,
        invite_url: &str,
        jwt: Option<&str>,
        items: &[InviteItem],
    ) -> Result<(), ServiceError>;
}

/// SIP gateway davetleri. Ateşle ve unut: sonuç çağırana dönmez.
pub trait GatewayInviter: Send + Sync {
    fn invite_video_rooms(&self, session: &dyn ConferenceSession, rooms: Vec<VideoSipGwRoom>);
}

/// Tek bir dağıtım çağrısının bağlamı.
#[derive(Clone)]
pub struct SessionContext {
    pub conference: Option<Arc<dyn ConferenceSession>>,
    pub invite_service_url: Option<String>,
    pub invite_url: String,
    pub jwt: Option<String>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("room", &self.conference.as_ref().map(|c| c.room().to_string()))
            .field("invite_service_url", &self.invite_service_url)
            .field("invite_url", &self.invite_url)
            .field("jwt", &self.jwt.as_ref().map(|_| "***REDACTED***"))
            .finish()
    }
}
