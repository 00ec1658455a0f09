use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::ledger::LedgerError;
use crate::models::User;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tickets", post(purchase_ticket))
        .route("/receipts/{email}", get(get_receipt))
        .route("/sections/{section}/users", get(view_seats))
        .route("/users/{email}", delete(remove_user))
        .route("/seats/modify", patch(modify_seat))
}

/* ---------- error mapping ---------- */

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

enum ApiError {
    BadRequest(String),
    Ledger(LedgerError),
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError::Ledger(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "BadRequest",
                    message,
                },
            ),
            ApiError::Ledger(err) => {
                let status = match &err {
                    LedgerError::ReceiptNotFound { .. } | LedgerError::UserNotFound { .. } => {
                        StatusCode::NOT_FOUND
                    }
                    LedgerError::DuplicateReservation { .. }
                    | LedgerError::NoSeatsAvailable
                    | LedgerError::SeatTaken { .. } => StatusCode::CONFLICT,
                    LedgerError::InvalidSection { .. } | LedgerError::SeatNotExist { .. } => {
                        StatusCode::BAD_REQUEST
                    }
                };
                (
                    status,
                    ErrorBody {
                        error: err.kind(),
                        message: err.to_string(),
                    },
                )
            }
        };

        tracing::debug!("request rejected: {}", body.message);
        (status, Json(body)).into_response()
    }
}

/* ---------- TICKETS ---------- */

// POST /api/tickets
#[derive(Debug, Deserialize)]
struct PurchaseRequest {
    pub user: User,
    pub from: String,
    pub to: String,
}

async fn purchase_ticket(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PurchaseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.user.email.trim().is_empty() {
        return Err(ApiError::BadRequest("user.email must not be empty".to_string()));
    }

    let receipt = state.ledger.purchase(req.user, &req.from, &req.to)?;
    tracing::info!("sold seat {} to {}", receipt.seat, receipt.user.email);
    Ok((StatusCode::CREATED, Json(receipt)))
}

// GET /api/receipts/{email}
async fn get_receipt(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let receipt = state.ledger.receipt(&email)?;
    Ok((StatusCode::OK, Json(receipt)))
}

// GET /api/sections/{section}/users
async fn view_seats(
    State(state): State<Arc<AppState>>,
    Path(section): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.ledger.view_section(&section)?;
    Ok((StatusCode::OK, Json(users)))
}

// DELETE /api/users/{email}
async fn remove_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let seat = state.ledger.remove_user(&email)?;
    tracing::info!("removed {} and freed seat {}", email, seat);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "User removed successfully"})),
    ))
}

// PATCH /api/seats/modify
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModifySeatRequest {
    pub email: String,
    pub new_seat: String,
}

async fn modify_seat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ModifySeatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let seat = state.ledger.modify_seat(&req.email, &req.new_seat)?;
    tracing::info!("moved {} to seat {}", req.email, seat);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Seat modified successfully"})),
    ))
}
