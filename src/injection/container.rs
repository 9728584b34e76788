// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Curiesync container construction

use crate::constants::{env, CONTAINER_NAME, MOUNT_PATH, VOLUME_NAME};
use crate::types::RunMode;
use k8s_openapi::api::core::v1::{
    Container, EnvFromSource, EnvVar, SecretEnvSource, VolumeMount,
};

/// Mount of the shared configuration volume
pub fn config_volume_mount() -> VolumeMount {
    VolumeMount {
        name: VOLUME_NAME.to_string(),
        mount_path: MOUNT_PATH.to_string(),
        ..Default::default()
    }
}

/// Build a curiesync container.
///
/// `CURIE_BUCKET_LINK` is only set for a non-empty bucket link, so the image can fall
/// back to its own default. The secret, if named, is exposed through `envFrom`.
pub fn build_container(
    image: &str,
    bucket_link: &str,
    secret_name: &str,
    run_mode: RunMode,
) -> Container {
    let mut env_vars = vec![EnvVar {
        name: env::RUN_MODE.to_string(),
        value: Some(run_mode.to_string()),
        ..Default::default()
    }];

    if !bucket_link.is_empty() {
        env_vars.push(EnvVar {
            name: env::CURIE_BUCKET_LINK.to_string(),
            value: Some(bucket_link.to_string()),
            ..Default::default()
        });
    }

    let env_from = (!secret_name.is_empty()).then(|| {
        vec![EnvFromSource {
            secret_ref: Some(SecretEnvSource {
                name: secret_name.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }]
    });

    Container {
        name: CONTAINER_NAME.to_string(),
        image: Some(image.to_string()),
        env: Some(env_vars),
        env_from,
        volume_mounts: Some(vec![config_volume_mount()]),
        ..Default::default()
    }
}
