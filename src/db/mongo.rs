// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MongoDB-backed profile store.

use super::{ProfileStore, MSISDN_FIELD};
use crate::config::Config;
use crate::error::AppError;
use crate::models::UserProfile;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use std::time::Duration;

const APP_NAME: &str = "profile-service";
const MSISDN_INDEX: &str = "msisdn_unique";
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

fn msisdn_filter(msisdn: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(MSISDN_FIELD, msisdn);
    filter
}

/// Unique, sparse ascending index on the msisdn field.
fn msisdn_index() -> IndexModel {
    let mut keys = Document::new();
    keys.insert(MSISDN_FIELD, 1);

    IndexModel::builder()
        .keys(keys)
        .options(
            IndexOptions::builder()
                .name(MSISDN_INDEX.to_string())
                .unique(true)
                .sparse(true)
                .build(),
        )
        .build()
}

/// MongoDB client wrapper bound to the profile collection.
#[derive(Clone)]
pub struct MongoProfileStore {
    client: Client,
    profiles: Collection<UserProfile>,
}

impl MongoProfileStore {
    /// Connect to MongoDB and verify the server answers a `ping`.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(&config.mongodb_uri)
            .await
            .map_err(|e| AppError::Store(format!("Invalid MongoDB URI: {}", e)))?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

        let client = Client::with_options(options)
            .map_err(|e| AppError::Store(format!("Failed to create MongoDB client: {}", e)))?;

        let database = client.database(&config.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::Store(format!("Failed to connect to MongoDB: {}", e)))?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Connected to MongoDB"
        );

        Ok(Self {
            profiles: database.collection(&config.collection),
            client,
        })
    }
}

#[async_trait]
impl ProfileStore for MongoProfileStore {
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        self.profiles
            .create_index(msisdn_index())
            .await
            .map_err(|e| AppError::Store(format!("Failed to create msisdn index: {}", e)))?;

        tracing::info!(index = MSISDN_INDEX, "Profile indexes ensured");
        Ok(())
    }

    async fn insert(&self, profile: &UserProfile) -> Result<(), AppError> {
        let result = self.profiles.insert_one(profile).await?;
        tracing::debug!(id = %result.inserted_id, msisdn = %profile.msisdn, "Profile inserted");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<UserProfile>, AppError> {
        let cursor = self.profiles.find(doc! {}).await?;
        let profiles: Vec<UserProfile> = cursor.try_collect().await?;
        tracing::debug!(count = profiles.len(), "Profiles fetched");
        Ok(profiles)
    }

    async fn find_by_msisdn(&self, msisdn: &str) -> Result<Option<UserProfile>, AppError> {
        Ok(self.profiles.find_one(msisdn_filter(msisdn)).await?)
    }

    async fn replace_by_msisdn(
        &self,
        msisdn: &str,
        profile: &UserProfile,
    ) -> Result<bool, AppError> {
        let result = self
            .profiles
            .replace_one(msisdn_filter(msisdn), profile)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_by_msisdn(&self, msisdn: &str) -> Result<bool, AppError> {
        let result = self.profiles.delete_one(msisdn_filter(msisdn)).await?;
        Ok(result.deleted_count > 0)
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB client shut down");
    }
}
