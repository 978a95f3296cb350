// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory profile store.
//!
//! Mirrors the MongoDB collection semantics the handlers rely on: insertion
//! order, generated document IDs and the unique `msisdn` constraint.

use super::ProfileStore;
use crate::error::AppError;
use crate::models::UserProfile;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

fn duplicate_key(msisdn: &str) -> AppError {
    AppError::Conflict(format!(
        "duplicate key error: msisdn {:?} already exists",
        msisdn
    ))
}

#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<Vec<UserProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert(&self, profile: &UserProfile) -> Result<(), AppError> {
        let mut profiles = self.profiles.write().await;
        if profiles.iter().any(|p| p.msisdn == profile.msisdn) {
            return Err(duplicate_key(&profile.msisdn));
        }

        let mut stored = profile.clone();
        stored.id.get_or_insert_with(ObjectId::new);
        profiles.push(stored);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<UserProfile>, AppError> {
        Ok(self.profiles.read().await.clone())
    }

    async fn find_by_msisdn(&self, msisdn: &str) -> Result<Option<UserProfile>, AppError> {
        Ok(self
            .profiles
            .read()
            .await
            .iter()
            .find(|p| p.msisdn == msisdn)
            .cloned())
    }

    async fn replace_by_msisdn(
        &self,
        msisdn: &str,
        profile: &UserProfile,
    ) -> Result<bool, AppError> {
        let mut profiles = self.profiles.write().await;
        let Some(index) = profiles.iter().position(|p| p.msisdn == msisdn) else {
            return Ok(false);
        };

        let taken = profiles
            .iter()
            .enumerate()
            .any(|(i, p)| i != index && p.msisdn == profile.msisdn);
        if taken {
            return Err(duplicate_key(&profile.msisdn));
        }

        let mut replacement = profile.clone();
        replacement.id = profiles[index].id;
        profiles[index] = replacement;
        Ok(true)
    }

    async fn delete_by_msisdn(&self, msisdn: &str) -> Result<bool, AppError> {
        let mut profiles = self.profiles.write().await;
        let before = profiles.len();
        if let Some(index) = profiles.iter().position(|p| p.msisdn == msisdn) {
            profiles.remove(index);
        }
        Ok(profiles.len() < before)
    }
}
