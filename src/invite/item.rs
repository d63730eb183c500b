// File: src/invite/item.rs
use crate::error::ServiceError;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Tek bir davetli. JSON'da `type` alanı ile ayrıştırılır.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InviteItem {
    User {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Room {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    #[serde(rename = "videosipgw")]
    VideoSipGw(VideoSipGwRoom),
    Phone { number: String },
}

/// SIP gateway üzerinden konferansa bağlanacak sanal oda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSipGwRoom {
    /// SIP adresi.
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl InviteItem {
    pub fn is_directory_target(&self) -> bool {
        matches!(self, InviteItem::User { .. } | InviteItem::Room { .. })
    }

    pub fn phone_number(&self) -> Option<&str> {
        match self {
            InviteItem::Phone { number } => Some(number),
            _ => None,
        }
    }

    pub fn video_room(&self) -> Option<&VideoSipGwRoom> {
        match self {
            InviteItem::VideoSipGw(room) => Some(room),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            InviteItem::User { .. } => "user",
            InviteItem::Room { .. } => "room",
            InviteItem::VideoSipGw(_) => "videosipgw",
            InviteItem::Phone { .. } => "phone",
        }
    }
}

/// Bir davetlinin, teslimatı sürmekte olan işlemle eşleşmesi. Yalnızca tek bir
/// dağıtım çağrısı boyunca yaşar.
pub struct PendingInvite {
    /// Davetlinin girdi listesindeki sırası; aynı numara birden çok kez bulunabilir.
    pub index: usize,
    pub item: InviteItem,
    pub completion: BoxFuture<'static, Result<(), ServiceError>>,
}

impl std::fmt::Debug for PendingInvite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingInvite")
            .field("index", &self.index)
            .field("item", &self.item)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_batch_from_json() {
        let raw = r#"[
            {"type": "user", "id": "ayse@sentiric.cloud", "name": "Ayşe"},
            {"type": "room", "id": "destek"},
            {"type": "videosipgw", "id": "sip:lobby@gw.sentiric.cloud", "name": "Lobi"},
            {"type": "phone", "number": "+905551112233"}
        ]"#;

        let items: Vec<InviteItem> = serde_json::from_str(raw).unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].kind(), "user");
        assert!(items[1].is_directory_target());
        assert_eq!(items[2].video_room().map(|r| r.name.as_str()), Some("Lobi"));
        assert_eq!(items[3].phone_number(), Some("+905551112233"));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let raw = r#"{"type": "fax", "number": "123"}"#;
        assert!(serde_json::from_str::<InviteItem>(raw).is_err());
    }

    #[test]
    fn serializes_with_type_tag() {
        let item = InviteItem::Room { id: "destek".to_string(), name: None };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, serde_json::json!({"type": "room", "id": "destek"}));
    }
}
