// sentiric-invite-service/src/app.rs
use crate::{app_state::AppState, config::AppConfig, rabbitmq::listener::listen_for_requests};
use anyhow::Result;
use std::{env, panic, sync::Arc};
use tokio::{select, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Uygulamanın ana yapısı. Konfigürasyonu ve durumunu içerir.
pub struct App {
    state: Arc<AppState>,
}

impl App {
    /// Uygulamayı başlatır: config'i yükler, loglamayı ayarlar ve App state'ini oluşturur.
    pub async fn bootstrap() -> Result<Self> {
        setup_panic_hook();
        let config = initialize_config_and_logging()?;

        info!(
            service_name = "sentiric-invite-service",
            version = %config.service_version,
            commit = %env::var("GIT_COMMIT").unwrap_or_else(|_| "unknown".to_string()),
            build_date = %env::var("BUILD_DATE").unwrap_or_else(|_| "unknown".to_string()),
            profile = %config.env,
            "🚀 Servis başlatılıyor..."
        );
        info!(config = ?config, "Konfigürasyon yüklendi.");

        let state = Arc::new(AppState::new(config).await?);
        info!("✅ Tüm bağımlılıklar başarıyla kuruldu. Servis tam işlevsel.");

        Ok(Self { state })
    }

    /// İstek dinleyicisini başlatır ve kapatma sinyaline kadar çalışır.
    pub async fn run(self) -> Result<()> {
        let listener_task = tokio::spawn(listen_for_requests(self.state.clone()));

        select! {
            res = listener_task => match res {
                Ok(Ok(())) => warn!("İstek dinleyicisi sonlandı (consumer kapandı)."),
                Ok(Err(e)) => error!(error = %e, "İstek dinleyicisi hatayla sonlandı."),
                Err(e) => error!(error = ?e, "İstek dinleyici görevi çöktü."),
            },
            _ = signal::ctrl_c() => { warn!("Kapatma sinyali (Ctrl+C) alındı. Servis kapatılıyor..."); }
        }

        info!("✅ Servis başarıyla kapatıldı.");
        Ok(())
    }
}

// --- Yardımcı Fonksiyonlar ---

fn setup_panic_hook() {
    let default_panic_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        error!(%panic_info, "Kritik bir panik oluştu!");
        default_panic_hook(panic_info);
    }));
}

fn initialize_config_and_logging() -> Result<Arc<AppConfig>> {
    let config = Arc::new(AppConfig::load_from_env()?);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.rust_log))?;
    let subscriber = Registry::default().with(env_filter);
    if config.env == "development" {
        subscriber.with(fmt::layer().with_target(true).with_line_number(true)).init();
    } else {
        subscriber.with(fmt::layer().json().with_current_span(true).with_span_list(true)).init();
    }
    Ok(config)
}
