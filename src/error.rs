// sentiric-invite-service/src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Yapılandırma hatası: {0}")]
    Config(#[from] std::env::VarError),

    #[error("Geçersiz yapılandırma değeri: {0}")]
    InvalidConfig(String),

    #[error("HTTP istemci hatası: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} yanıtı alındı: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("RabbitMQ hatası: {0}")]
    RabbitMq(#[from] lapin::Error),

    #[error("Serileştirme hatası (serde_json): {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Loglama filtresi hatası: {0}")]
    TracingFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Konferans ID sorgusu başarısız: {0}")]
    ConferenceIdLookup(String),

    #[error("Geçersiz telefon numarası: {0}")]
    InvalidPhoneNumber(String),

    #[error("Beklenmedik bir hata oluştu: {0}")]
    Generic(String),
}

