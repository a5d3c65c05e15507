// src/infrastructure/server.rs
use std::future::Future;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

use crate::application::Credentials;
use crate::constants::{AUTH_PATH, CARDS_PATH};
use crate::domain::{CardId, CardPatch, NewCard};
use crate::infrastructure::json_db::JsonDb;

pub type SharedDb = Arc<Mutex<JsonDb>>;

#[derive(Serialize)]
struct AuthResult {
    success: bool,
}

pub enum ApiError {
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        error!(error = %e, "Store failure");
        ApiError::Internal(e.to_string())
    }
}

/// Run `f` against the store on the blocking pool; every mutation writes the
/// store file.
async fn with_db<F, R>(db: &SharedDb, f: F) -> Result<R, ApiError>
where
    F: FnOnce(&mut JsonDb) -> Result<R, ApiError> + Send + 'static,
    R: Send + 'static,
{
    let db = Arc::clone(db);
    tokio::task::spawn_blocking(move || {
        let mut guard = db
            .lock()
            .map_err(|_| ApiError::Internal("store lock poisoned".to_string()))?;
        f(&mut guard)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Card {} not found", id))
}

/// REST surface of the mock card store.
pub fn router(db: SharedDb) -> Router {
    let card_path = format!("{CARDS_PATH}/{{id}}");
    Router::new()
        .route(AUTH_PATH, post(authenticate))
        .route(CARDS_PATH, get(list_cards).post(create_card))
        .route(
            &card_path,
            get(get_card)
                .put(update_card)
                .patch(update_card)
                .delete(delete_card),
        )
        .layer(CorsLayer::permissive())
        .with_state(db)
}

/// Serve the store on `listener` until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, db: SharedDb, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr().context("Listener has no local address")?;
    info!(%address, "Card store running");

    axum::serve(listener, router(db))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Card store server failed")?;

    info!("Card store shut down");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn authenticate(
    State(db): State<SharedDb>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    let username = credentials.username.clone();
    let success = with_db(&db, move |db| {
        Ok(db.authenticate(&credentials.username, &credentials.password))
    })
    .await?;
    debug!(%username, success, "Auth request");
    Ok(Json(AuthResult { success }))
}

async fn list_cards(State(db): State<SharedDb>) -> Result<impl IntoResponse, ApiError> {
    let cards = with_db(&db, |db| Ok(db.cards())).await?;
    Ok(Json(cards))
}

async fn get_card(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let card = with_db(&db, move |db| Ok(db.card(CardId(id)))).await?;
    card.map(Json).ok_or_else(|| not_found(id))
}

async fn create_card(
    State(db): State<SharedDb>,
    Json(card): Json<NewCard>,
) -> Result<impl IntoResponse, ApiError> {
    let created = with_db(&db, move |db| Ok(db.insert(card)?)).await?;
    info!(id = %created.id, "Card created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_card(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(patch): Json<CardPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = with_db(&db, move |db| Ok(db.update(CardId(id), &patch)?)).await?;
    match updated {
        Some(card) => {
            info!(id, "Card updated");
            Ok(Json(card))
        }
        None => Err(not_found(id)),
    }
}

async fn delete_card(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = with_db(&db, move |db| Ok(db.remove(CardId(id))?)).await?;
    if !removed {
        return Err(not_found(id));
    }
    info!(id, "Card deleted");
    Ok(StatusCode::OK)
}
