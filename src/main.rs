// File: src/main.rs

mod app;
mod app_state;
mod config;
mod dial_in;
mod error;
mod handler;
mod http;
mod invite;
mod rabbitmq;

use app::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = App::bootstrap().await?;
    app.run().await
}
