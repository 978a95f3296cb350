// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod profile;

pub use profile::{validate_msisdn, ProfilePayload, UserProfile, INVALID_MSISDN};
