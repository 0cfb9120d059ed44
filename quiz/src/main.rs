#![forbid(unsafe_code)]
#![warn(clippy::dbg_macro, clippy::use_debug, clippy::todo)]

use std::sync::Arc;

use anyhow::Context;
use lib::{config, questions::QuestionBank, storage::Storage, SharedState};
use poem::{
    listener::TcpListener,
    middleware::{CatchPanic, Tracing},
    EndpointExt, Route, Server,
};
use poem_openapi::OpenApiService;
use tracing::info;

use crate::endpoints::get_api;

mod endpoints;
mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    info!("Loading config");
    let config = config::load().context("loading config")?;

    info!("Connecting to storage");
    let storage = Storage::connect(&config).await?;

    let shared_state = Arc::new(SharedState {
        storage,
        questions: Arc::new(QuestionBank::builtin()),
    });

    let api_service = OpenApiService::new(
        get_api(shared_state),
        "Self Assessment Quiz Backend",
        env!("CARGO_PKG_VERSION"),
    )
    .external_document("/openapi.json");
    let app = Route::new()
        .nest("/openapi.json", api_service.spec_endpoint())
        .nest("/docs", api_service.swagger_ui())
        .nest("/redoc", api_service.redoc())
        .nest("/", api_service)
        .with(Tracing)
        .with(CatchPanic::new());

    info!("Listening on {}:{}", config.host, config.port);
    Server::new(TcpListener::bind((config.host, config.port)))
        .run(app)
        .await?;

    Ok(())
}
