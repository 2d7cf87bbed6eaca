use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::dto::{ErrorResponse, LoginRequest, MessageResponse, SignUpRequest},
    state::AppState,
};

type ApiResult = Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)>;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> ApiResult {
    let Json(req) = payload.map_err(rejected)?;
    state.auth.sign_up(req).await.map_err(bad_request)?;
    Ok(message("User Create Successfully"))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult {
    let Json(req) = payload.map_err(rejected)?;
    state.auth.log_in(req).await.map_err(bad_request)?;
    Ok(message("Login Successfull"))
}

fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: text.to_string(),
    })
}

fn rejected(rejection: JsonRejection) -> (StatusCode, Json<ErrorResponse>) {
    warn!(error = %rejection, "invalid request body");
    bad_request(rejection.body_text())
}

// Every failure is a 400; the body carries only the display text.
fn bad_request<E: ToString>(e: E) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
