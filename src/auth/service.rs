//! Registration and PIN login. There are no sessions: every login re-checks
//! the PIN and, on success, marks the day's attendance.

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::attendance::{MarkOutcome, mark_attendance};
use crate::auth::password::{hash_pin, verify_pin};
use crate::error::AppError;
use crate::model::user::{NewUser, User};
use crate::models::{LoginReq, RegisterReq};
use crate::store::{AttendanceLedger, CredentialStore};

fn required(value: Option<String>, msg: &'static str) -> Result<String, AppError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::validation(msg)),
    }
}

/// Like `required` but keeps the value byte-for-byte; whitespace is part of a PIN.
fn required_secret(value: Option<String>, msg: &'static str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::validation(msg)),
    }
}

pub async fn register(users: &dyn CredentialStore, req: RegisterReq) -> Result<User, AppError> {
    const MSG: &str = "All fields (name, email, phone, department, pin) are required";

    let name = required(req.name, MSG)?;
    let email = required(req.email, MSG)?;
    let phone = required(req.phone, MSG)?;
    let department = required(req.department, MSG)?;
    let pin = required_secret(req.pin, MSG)?;

    if users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "Email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let pin_hash = hash_pin(&pin)?;

    let user = users
        .insert(NewUser {
            name,
            email,
            phone,
            department,
            pin_hash,
        })
        .await?;

    info!(user_id = user.id, email = %user.email, "User registered");
    Ok(user)
}

pub async fn login(
    users: &dyn CredentialStore,
    ledger: &dyn AttendanceLedger,
    req: LoginReq,
    now: NaiveDateTime,
) -> Result<MarkOutcome, AppError> {
    const MSG: &str = "Email and PIN are required";

    let email = required(req.email, MSG)?;
    let pin = required_secret(req.pin, MSG)?;

    let user = match users.find_by_email(&email).await? {
        Some(user) => user,
        None => {
            info!(email = %email, "Login for unknown email");
            return Err(AppError::NotFound);
        }
    };

    if !verify_pin(&pin, &user.pin)? {
        info!(user_id = user.id, "Invalid credentials: PIN mismatch");
        return Err(AppError::InvalidCredentials);
    }

    mark_attendance(ledger, user.id, now).await
}
