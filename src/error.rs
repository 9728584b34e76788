// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CuriesyncError {
    #[error("Failed to inject curiesync: {0}")]
    InjectionError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to build JSON patch: {0}")]
    PatchError(String),

    #[error("Invalid admission review: {0}")]
    InvalidReview(String),
}

pub type Result<T> = std::result::Result<T, CuriesyncError>;
