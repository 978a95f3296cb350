// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Profile service: CRUD over user profiles keyed by msisdn.
//!
//! This crate provides the HTTP API and the document store layer for a
//! single `profiles` collection with a unique phone-number key.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

use config::Config;
use db::ProfileStore;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Arc<dyn ProfileStore>,
}
