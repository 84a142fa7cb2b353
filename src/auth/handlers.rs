use actix_web::{HttpResponse, web};
use chrono::Local;
use tracing::instrument;

use crate::{
    auth::service,
    error::AppError,
    models::{LoginReq, MessageResponse, PublicUser, RegisterReq, RegisterResponse},
    state::AppState,
};

/// Register a user
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterReq,
    responses(
        (status = 200, description = "User registered", body = RegisterResponse, example = json!({
            "message": "User registered successfully",
            "user": { "id": 1, "email": "a@x.com" }
        })),
        (status = 400, description = "Missing field or email already registered", body = Object, example = json!({
            "error": "Email already registered"
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "error": "Something went wrong, please try again later"
        }))
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_register", skip(state, payload))]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterReq>,
) -> Result<HttpResponse, AppError> {
    let user = service::register(state.users.as_ref(), payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
    }))
}

/// Log in with email and PIN, marking today's attendance
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Attendance marked, or already marked today", body = MessageResponse, example = json!({
            "message": "Attendance marked successfully"
        })),
        (status = 400, description = "Email or PIN missing", body = Object, example = json!({
            "error": "Email and PIN are required"
        })),
        (status = 401, description = "Wrong PIN", body = Object, example = json!({
            "error": "Invalid credentials"
        })),
        (status = 404, description = "No user with that email", body = Object, example = json!({
            "error": "User not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(state, payload))]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginReq>,
) -> Result<HttpResponse, AppError> {
    let now = Local::now().naive_local();
    let outcome = service::login(
        state.users.as_ref(),
        state.ledger.as_ref(),
        payload.into_inner(),
        now,
    )
    .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: outcome.message().to_string(),
    }))
}
