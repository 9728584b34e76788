// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::fmt;

/// Operating mode a curiesync container is started with.
///
/// Rendered verbatim into the `RUN_MODE` environment variable of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Fetch the configuration from the bucket once and exit
    SyncOnce,
    /// Copy the bootstrap configuration shipped with the image and exit
    CopyBootstrap,
    /// Keep the configuration in sync with the bucket for the pod's lifetime
    PeriodicSync,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::SyncOnce => "SYNC_ONCE",
            RunMode::CopyBootstrap => "COPY_BOOTSTRAP",
            RunMode::PeriodicSync => "PERIODIC_SYNC",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
