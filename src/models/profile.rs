// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model for storage and API.

use crate::error::AppError;
use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const INVALID_MSISDN: &str = "Please pass a valid msisdn";

/// Longest accepted msisdn, leaving room for formatting characters.
pub const MAX_MSISDN_LEN: usize = 32;

/// User profile stored in the `profiles` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Document ID assigned on insert
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    /// Phone number, unique across all profiles
    pub msisdn: String,
    /// When the profile was created (never changes).
    ///
    /// Older deployments wrote this field as `isnerted_at`.
    #[serde(with = "chrono_datetime_as_bson_datetime", alias = "isnerted_at")]
    pub inserted_at: DateTime<Utc>,
    /// Last time the profile was written
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub last_update: DateTime<Utc>,
}

/// BSON dates hold milliseconds; stamp at that precision so a profile reads
/// back exactly as it was written.
fn stamp(now: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(3)
}

impl UserProfile {
    /// Build a new profile from a validated payload, stamping both timestamps.
    pub fn create(payload: ProfilePayload, now: DateTime<Utc>) -> Self {
        let now = stamp(now);
        Self {
            id: None,
            firstname: payload.firstname,
            lastname: payload.lastname,
            age: payload.age,
            msisdn: payload.msisdn.trim().to_string(),
            inserted_at: now,
            last_update: now,
        }
    }

    /// Full replacement of this profile by `payload`.
    ///
    /// Only `inserted_at` survives; omitted optional fields are cleared. The
    /// replacement carries no `id`, so the store keeps the `_id` of whichever
    /// document it matches.
    pub fn replaced_by(&self, payload: ProfilePayload, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            firstname: payload.firstname,
            lastname: payload.lastname,
            age: payload.age,
            msisdn: payload.msisdn.trim().to_string(),
            inserted_at: self.inserted_at,
            last_update: stamp(now).max(self.inserted_at),
        }
    }
}

/// Request body for creating or replacing a profile.
///
/// Server-owned fields (`id`, `inserted_at`, `last_update`) are not part of
/// the payload and are ignored if a client sends them.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfilePayload {
    #[validate(length(max = 100))]
    pub firstname: Option<String>,
    #[validate(length(max = 100))]
    pub lastname: Option<String>,
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,
    /// Checked by [`validate_msisdn`] after trimming.
    pub msisdn: String,
}

impl ProfilePayload {
    /// Run field validation, including the blank-msisdn check.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        validate_msisdn(&self.msisdn)?;
        Ok(())
    }
}

/// Reject blank or oversized msisdn values, returning the trimmed value.
pub fn validate_msisdn(raw: &str) -> Result<&str, AppError> {
    let msisdn = raw.trim();
    if msisdn.is_empty() || msisdn.chars().count() > MAX_MSISDN_LEN {
        return Err(AppError::Validation(INVALID_MSISDN.to_string()));
    }
    Ok(msisdn)
}
