// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolution of the curiesync pod annotations

use crate::constants::annotations;
use crate::types::RunMode;
use k8s_openapi::api::core::v1::Pod;
use std::collections::BTreeMap;
use tracing::debug;

fn pod_annotations(pod: &Pod) -> Option<&BTreeMap<String, String>> {
    pod.metadata.annotations.as_ref().filter(|a| !a.is_empty())
}

/// Get the bucket link from the pod annotation or fall back to the default
pub fn bucket_link<'a>(pod: &'a Pod, default: &'a str) -> &'a str {
    pod_annotations(pod)
        .and_then(|a| a.get(annotations::BUCKET_LINK))
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
}

/// Get the name of the secret to inject, empty if none is requested
pub fn secret_name(pod: &Pod) -> &str {
    pod_annotations(pod)
        .and_then(|a| a.get(annotations::SECRET_NAME))
        .map(|s| s.as_str())
        .unwrap_or_default()
}

/// Get the run mode of the init container.
///
/// Only `sync-once` selects [`RunMode::SyncOnce`]; `bootstrap`, unknown values and a
/// missing annotation all resolve to [`RunMode::CopyBootstrap`].
pub fn init_run_mode(pod: &Pod) -> RunMode {
    let Some(value) = pod_annotations(pod).and_then(|a| a.get(annotations::INIT_RUN_MODE)) else {
        return RunMode::CopyBootstrap;
    };

    match value.as_str() {
        "sync-once" => RunMode::SyncOnce,
        "bootstrap" => RunMode::CopyBootstrap,
        other => {
            debug!(
                "Unknown init run mode '{}', falling back to {}",
                other,
                RunMode::CopyBootstrap
            );
            RunMode::CopyBootstrap
        }
    }
}
