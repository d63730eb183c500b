// File: src/http/mod.rs
// Dış HTTP servisleri için reqwest tabanlı istemciler.

pub mod dial_in;
pub mod dial_out;
pub mod directory;

use crate::error::ServiceError;
use std::time::Duration;

pub fn build_client(timeout: Duration) -> Result<reqwest::Client, ServiceError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(5))
        .build()?;
    Ok(client)
}

/// Başarısız HTTP durum kodlarını, yanıt gövdesiyle birlikte hataya çevirir.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::HttpStatus {
        status: status.as_u16(),
        body,
    })
}
