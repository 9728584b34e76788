// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Admission boundary: dispatches admitted objects to the curiesync injector.

pub mod object;

pub use object::AdmittedObject;

use crate::error::{CuriesyncError, Result};
use crate::injection::Injector;
use kube::core::admission::AdmissionRequest;
use kube::core::DynamicObject;
use tracing::{debug, instrument};

/// Outcome of a mutation, `None` when the object is left unchanged
#[derive(Debug, Default)]
pub struct MutatorResult {
    pub mutated_object: Option<AdmittedObject>,
}

/// Mutator implementing the mutating webhook on top of an [`Injector`]
pub struct Mutator<I> {
    injector: I,
}

impl<I: Injector> Mutator<I> {
    pub fn new(injector: I) -> Self {
        Self { injector }
    }

    /// Inject curiesync into pods, every other object passes through unmodified
    #[instrument(skip_all, fields(uid = %request.uid))]
    pub fn mutate(
        &self,
        request: &AdmissionRequest<DynamicObject>,
        object: AdmittedObject,
    ) -> Result<MutatorResult> {
        let mut pod = match object {
            AdmittedObject::Pod(pod) => pod,
            AdmittedObject::Other(_) => {
                debug!("Object of kind {} is not a pod, skipping", request.kind.kind);
                return Ok(MutatorResult::default());
            }
        };

        self.injector
            .inject(&mut pod)
            .map_err(|e| CuriesyncError::InjectionError(e.to_string()))?;

        Ok(MutatorResult {
            mutated_object: Some(AdmittedObject::Pod(pod)),
        })
    }
}
