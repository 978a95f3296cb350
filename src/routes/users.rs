// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile CRUD routes under `/users`.

use crate::error::{AppError, Result};
use crate::models::{validate_msisdn, ProfilePayload, UserProfile, INVALID_MSISDN};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const MSG_CREATED: &str = "User successfully created";
pub const MSG_SUCCESS: &str = "Success process the request";
pub const MSG_UPDATED: &str = "user record successfully updated";
pub const MSG_DELETED: &str = "User record successfully deleted";
pub const MSG_NO_DATA: &str = "No data found";

/// Profile routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_profiles).post(create_profile))
        .route(
            "/users/",
            get(missing_msisdn)
                .patch(missing_msisdn)
                .delete(missing_msisdn),
        )
        .route(
            "/users/{msisdn}",
            get(get_profile)
                .patch(update_profile)
                .delete(delete_profile),
        )
}

/// Success envelope shared by all profile routes.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    fn with_data(message: &str, data: T) -> Self {
        Self {
            response: message.to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    fn message(message: &str) -> Self {
        Self {
            response: message.to_string(),
            data: None,
        }
    }
}

/// Profile as returned to API clients.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileView {
    /// Hex-encoded document ID
    pub id: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub age: Option<i32>,
    pub msisdn: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub inserted_at: DateTime<Utc>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub last_update: DateTime<Utc>,
}

impl From<UserProfile> for ProfileView {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.map(|id| id.to_hex()),
            firstname: profile.firstname,
            lastname: profile.lastname,
            age: profile.age,
            msisdn: profile.msisdn,
            inserted_at: profile.inserted_at,
            last_update: profile.last_update,
        }
    }
}

fn profile_not_found(msisdn: &str) -> AppError {
    AppError::NotFound(format!("not found: no profile with msisdn {}", msisdn))
}

/// `/users/` with an empty msisdn segment.
async fn missing_msisdn() -> AppError {
    AppError::Validation(INVALID_MSISDN.to_string())
}

/// Unwrap a JSON body, turning extractor rejections into validation errors.
fn parse_payload(
    body: std::result::Result<Json<ProfilePayload>, JsonRejection>,
) -> Result<ProfilePayload> {
    let Json(payload) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    payload.check()?;
    Ok(payload)
}

// ─── Create ──────────────────────────────────────────────────

async fn create_profile(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<ProfilePayload>, JsonRejection>,
) -> Result<Json<ApiResponse<ProfileView>>> {
    let payload = parse_payload(body)?;
    let profile = UserProfile::create(payload, Utc::now());

    state.db.insert(&profile).await?;
    tracing::info!(msisdn = %profile.msisdn, "Profile created");

    let created = state
        .db
        .find_by_msisdn(&profile.msisdn)
        .await?
        .ok_or_else(|| profile_not_found(&profile.msisdn))?;

    Ok(Json(ApiResponse::with_data(MSG_CREATED, created.into())))
}

// ─── Read ────────────────────────────────────────────────────

async fn list_profiles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ProfileView>>>> {
    let profiles = state.db.find_all().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list profiles");
        AppError::Store(MSG_NO_DATA.to_string())
    })?;

    tracing::debug!(count = profiles.len(), "Listed profiles");
    let views = profiles.into_iter().map(ProfileView::from).collect();
    Ok(Json(ApiResponse::with_data(MSG_SUCCESS, views)))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(msisdn): Path<String>,
) -> Result<Json<ApiResponse<ProfileView>>> {
    let msisdn = validate_msisdn(&msisdn)?;

    let profile = state
        .db
        .find_by_msisdn(msisdn)
        .await?
        .ok_or_else(|| profile_not_found(msisdn))?;

    Ok(Json(ApiResponse::with_data(MSG_SUCCESS, profile.into())))
}

// ─── Update ──────────────────────────────────────────────────

/// Replace the whole profile at `msisdn` with the request body.
///
/// `inserted_at` is kept from the stored document; the body may move the
/// profile to a new msisdn as long as no other profile holds it.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(msisdn): Path<String>,
    body: std::result::Result<Json<ProfilePayload>, JsonRejection>,
) -> Result<Json<ApiResponse<ProfileView>>> {
    let msisdn = validate_msisdn(&msisdn)?;
    let payload = parse_payload(body)?;

    let current = state
        .db
        .find_by_msisdn(msisdn)
        .await?
        .ok_or_else(|| profile_not_found(msisdn))?;
    let replacement = current.replaced_by(payload, Utc::now());

    // The profile may have been deleted between the read and the write.
    if !state.db.replace_by_msisdn(msisdn, &replacement).await? {
        return Err(profile_not_found(msisdn));
    }
    tracing::info!(
        msisdn = %msisdn,
        new_msisdn = %replacement.msisdn,
        "Profile updated"
    );

    let updated = state
        .db
        .find_by_msisdn(&replacement.msisdn)
        .await?
        .ok_or_else(|| profile_not_found(&replacement.msisdn))?;

    Ok(Json(ApiResponse::with_data(MSG_UPDATED, updated.into())))
}

// ─── Delete ──────────────────────────────────────────────────

async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Path(msisdn): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let msisdn = validate_msisdn(&msisdn)?;

    if !state.db.delete_by_msisdn(msisdn).await? {
        return Err(profile_not_found(msisdn));
    }
    tracing::info!(msisdn = %msisdn, "Profile deleted");

    Ok(Json(ApiResponse::message(MSG_DELETED)))
}
