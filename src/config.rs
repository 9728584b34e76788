// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

/// Webhook configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Container image used for the init and sidecar containers
    pub curiesync_image: String,
    /// Default bucket link, empty means the image decides
    pub bucket_link: String,
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let curiesync_image = lookup("CURIESYNC_IMAGE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| defaults::CURIESYNC_IMAGE.to_string());
        let bucket_link = lookup("CURIESYNC_BUCKET_LINK").unwrap_or_default();
        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| defaults::LISTEN_ADDR.to_string());
        let listen_addr = listen_addr
            .parse()
            .with_context(|| format!("LISTEN_ADDR '{}' is not a valid socket address", listen_addr))?;

        Ok(Config {
            curiesync_image,
            bucket_link,
            listen_addr,
        })
    }
}
