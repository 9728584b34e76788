// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pod mutation that wires curiesync into a pod

use crate::config::Config;
use crate::constants::VOLUME_NAME;
use crate::error::Result;
use crate::injection::annotations;
use crate::injection::container::{build_container, config_volume_mount};
use crate::types::RunMode;
use k8s_openapi::api::core::v1::{Container, EmptyDirVolumeSource, Pod, Volume};
use kube::ResourceExt;
use tracing::{info, instrument};

/// Injects the volumes, mounts, init and sidecar containers into a pod
/// necessary for synchronizing Curiefense configuration.
pub trait Injector {
    fn inject(&self, pod: &mut Pod) -> Result<()>;
}

/// Injection settings resolved for a single pod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionConfig {
    pub image: String,
    /// Empty when the image should use its own default
    pub bucket_link: String,
    /// Empty when no secret should be injected
    pub secret_name: String,
}

impl InjectionConfig {
    /// Resolve the settings from the pod annotations
    pub fn resolve(pod: &Pod, image: &str, default_bucket_link: &str) -> Self {
        Self {
            image: image.to_string(),
            bucket_link: annotations::bucket_link(pod, default_bucket_link).to_string(),
            secret_name: annotations::secret_name(pod).to_string(),
        }
    }

    pub fn container(&self, run_mode: RunMode) -> Container {
        build_container(&self.image, &self.bucket_link, &self.secret_name, run_mode)
    }
}

/// [`Injector`] adding curiesync as an init container and a sidecar.
///
/// Injection is not idempotent: every call appends another volume and another pair of
/// containers.
#[derive(Debug, Clone)]
pub struct CuriesyncInjector {
    /// Container image used for the init and sidecar containers
    pub curiesync_image: String,
    /// Default bucket link used for synchronizing configuration
    pub bucket_link: String,
}

impl CuriesyncInjector {
    pub fn new(curiesync_image: impl Into<String>, bucket_link: impl Into<String>) -> Self {
        Self {
            curiesync_image: curiesync_image.into(),
            bucket_link: bucket_link.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.curiesync_image.clone(), config.bucket_link.clone())
    }
}

impl Injector for CuriesyncInjector {
    #[instrument(skip(self, pod), fields(pod = %pod.name_any()))]
    fn inject(&self, pod: &mut Pod) -> Result<()> {
        let injection = InjectionConfig::resolve(pod, &self.curiesync_image, &self.bucket_link);
        let init_run_mode = annotations::init_run_mode(pod);

        info!(
            "Injecting curiesync into pod {}/{}: init_run_mode={}, bucket_link={}, secret={}",
            pod.namespace().unwrap_or_default(),
            pod.name_any(),
            init_run_mode,
            !injection.bucket_link.is_empty(),
            !injection.secret_name.is_empty()
        );

        let spec = pod.spec.get_or_insert_with(Default::default);

        // Empty dir volume for the configuration
        spec.volumes.get_or_insert_with(Vec::new).push(Volume {
            name: VOLUME_NAME.to_string(),
            empty_dir: Some(EmptyDirVolumeSource::default()),
            ..Default::default()
        });

        // Fetch the initial configuration (bootstrap or the real one) before anything else runs
        spec.init_containers
            .get_or_insert_with(Vec::new)
            .insert(0, injection.container(init_run_mode));

        for container in spec.containers.iter_mut() {
            container
                .volume_mounts
                .get_or_insert_with(Vec::new)
                .push(config_volume_mount());
        }

        spec.containers.push(injection.container(RunMode::PeriodicSync));

        Ok(())
    }
}
