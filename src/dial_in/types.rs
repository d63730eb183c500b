// File: src/dial_in/types.rs
use crate::error::ServiceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bölge/tip etiketinden telefon numaralarına eşleme. Katalog her etiket için
/// tek bir numara ya da numara listesi dönebilir; ikisi de listeye çevrilir.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, NumberList>")]
pub struct DialInNumbers(BTreeMap<String, Vec<String>>);

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NumberList {
    One(String),
    Many(Vec<String>),
}

impl From<BTreeMap<String, NumberList>> for DialInNumbers {
    fn from(raw: BTreeMap<String, NumberList>) -> Self {
        let numbers = raw
            .into_iter()
            .map(|(label, list)| match list {
                NumberList::One(number) => (label, vec![number]),
                NumberList::Many(numbers) => (label, numbers),
            })
            .collect();
        DialInNumbers(numbers)
    }
}

impl DialInNumbers {
    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.0.get(label).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Konferans ID sorgusunun ham yanıtı. Başarılı sayılmadan önce `validate` edilmelidir.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConferenceIdInfo {
    #[serde(default)]
    pub conference: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceId {
    pub conference: String,
    pub id: u64,
}

impl ConferenceIdInfo {
    pub fn validate(self) -> Result<ConferenceId, ServiceError> {
        match (self.conference, self.id) {
            (Some(conference), Some(id)) if !conference.is_empty() && id != 0 => Ok(ConferenceId { conference, id }),
            _ => Err(ServiceError::ConferenceIdLookup(
                self.message
                    .unwrap_or_else(|| "Konferans ID yanıtı eksik.".to_string()),
            )),
        }
    }
}

/// Dial-in sorgusunun sonucu olarak gözlemciye iletilen bildirim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum DialInEvent {
    #[serde(rename = "DIAL_IN_NUMBERS_UPDATED_SUCCESS", rename_all = "camelCase")]
    UpdatedSuccess {
        #[serde(rename = "conferenceID")]
        conference_id: u64,
        dial_in_numbers: DialInNumbers,
    },
    #[serde(rename = "DIAL_IN_NUMBERS_UPDATED_FAILED")]
    UpdatedFailed { error: String },
}

impl DialInEvent {
    pub fn routing_key(&self) -> &'static str {
        match self {
            DialInEvent::UpdatedSuccess { .. } => "dial_in.numbers.updated",
            DialInEvent::UpdatedFailed { .. } => "dial_in.numbers.failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_accepts_single_numbers_and_lists() {
        let raw = r#"{"TR": "+908501234567", "US": ["+12125550100", "+13105550100"]}"#;
        let numbers: DialInNumbers = serde_json::from_str(raw).unwrap();

        assert_eq!(numbers.len(), 2);
        assert_eq!(numbers.get("TR"), Some(&["+908501234567".to_string()][..]));
        assert_eq!(numbers.get("US").map(|n| n.len()), Some(2));
    }

    #[test]
    fn conference_without_id_fails_validation_with_server_message() {
        let info: ConferenceIdInfo =
            serde_json::from_str(r#"{"conference": "oda@muc.sentiric.cloud", "message": "Kayıt yok"}"#).unwrap();

        match info.validate() {
            Err(ServiceError::ConferenceIdLookup(message)) => assert_eq!(message, "Kayıt yok"),
            other => panic!("beklenmeyen sonuç: {:?}", other),
        }
    }

    #[test]
    fn zero_id_is_treated_as_missing() {
        let info: ConferenceIdInfo = serde_json::from_str(
            r#"{"conference": "oda@muc.sentiric.cloud", "id": 0, "message": "ID atanmadı"}"#,
        )
        .unwrap();

        assert!(matches!(
            info.validate(),
            Err(ServiceError::ConferenceIdLookup(message)) if message == "ID atanmadı"
        ));
    }

    #[test]
    fn complete_lookup_validates() {
        let info: ConferenceIdInfo =
            serde_json::from_str(r#"{"conference": "oda@muc.sentiric.cloud", "id": 7145}"#).unwrap();
        let conference = info.validate().unwrap();
        assert_eq!(conference.id, 7145);
    }

    #[test]
    fn events_serialize_with_action_type() {
        let event = DialInEvent::UpdatedSuccess {
            conference_id: 42,
            dial_in_numbers: DialInNumbers::default(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "DIAL_IN_NUMBERS_UPDATED_SUCCESS");
        assert_eq!(value["conferenceID"], 42);
        assert!(value["dialInNumbers"].is_object());

        let failed = DialInEvent::UpdatedFailed { error: "zaman aşımı".to_string() };
        assert_eq!(serde_json::to_value(&failed).unwrap()["type"], "DIAL_IN_NUMBERS_UPDATED_FAILED");
        assert_eq!(failed.routing_key(), "dial_in.numbers.failed");
    }
}
