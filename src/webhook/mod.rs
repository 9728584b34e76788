// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Mutating admission webhook endpoint.

pub mod patch;
pub mod review;
pub mod server;

pub use review::review;
pub use server::WebhookServer;
