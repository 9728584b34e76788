// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! JSON patch describing an injection as additions to the admitted pod.
//!
//! Only the entries the injector added are emitted. Entries already present in the
//! admitted object are never rewritten, so fields unknown to the typed model survive.

use crate::error::Result;
use json_patch::{AddOperation, Patch, PatchOperation};
use jsonptr::PointerBuf;
use k8s_openapi::api::core::v1::Pod;
use serde::Serialize;

/// Build the patch turning `original` into `injected`.
///
/// `injected` must be the result of the injector: volumes, regular containers and
/// volume mounts are appended to, init containers are prepended to.
pub fn injection_patch(original: &Pod, injected: &Pod) -> Result<Patch> {
    let Some(injected_spec) = injected.spec.as_ref() else {
        return Ok(Patch(Vec::new()));
    };
    let Some(original_spec) = original.spec.as_ref() else {
        return Ok(Patch(vec![add(["spec"], injected_spec)?]));
    };

    let mut ops = Vec::new();

    appended(
        &mut ops,
        &["spec", "volumes"],
        original_spec.volumes.as_deref(),
        injected_spec.volumes.as_deref(),
    )?;
    prepended(
        &mut ops,
        &["spec", "initContainers"],
        original_spec.init_containers.as_deref(),
        injected_spec.init_containers.as_deref(),
    )?;

    for (index, (original_container, injected_container)) in original_spec
        .containers
        .iter()
        .zip(&injected_spec.containers)
        .enumerate()
    {
        let index = index.to_string();
        appended(
            &mut ops,
            &["spec", "containers", index.as_str(), "volumeMounts"],
            original_container.volume_mounts.as_deref(),
            injected_container.volume_mounts.as_deref(),
        )?;
    }

    appended(
        &mut ops,
        &["spec", "containers"],
        Some(original_spec.containers.as_slice()),
        Some(injected_spec.containers.as_slice()),
    )?;

    Ok(Patch(ops))
}

fn appended<T: Serialize>(
    ops: &mut Vec<PatchOperation>,
    path: &[&str],
    original: Option<&[T]>,
    injected: Option<&[T]>,
) -> Result<()> {
    let injected = injected.unwrap_or_default();

    match original {
        None if injected.is_empty() => {}
        None => ops.push(add(path.iter().copied(), injected)?),
        Some(original) => {
            for item in injected.iter().skip(original.len()) {
                ops.push(add(path.iter().copied().chain(["-"]), item)?);
            }
        }
    }

    Ok(())
}

fn prepended<T: Serialize>(
    ops: &mut Vec<PatchOperation>,
    path: &[&str],
    original: Option<&[T]>,
    injected: Option<&[T]>,
) -> Result<()> {
    let injected = injected.unwrap_or_default();

    match original {
        None if injected.is_empty() => {}
        None => ops.push(add(path.iter().copied(), injected)?),
        Some(original) => {
            let added = injected.len().saturating_sub(original.len());
            for (index, item) in injected[..added].iter().enumerate() {
                let index = index.to_string();
                ops.push(add(path.iter().copied().chain([index.as_str()]), item)?);
            }
        }
    }

    Ok(())
}

fn add<'a>(
    path: impl IntoIterator<Item = &'a str>,
    value: &(impl Serialize + ?Sized),
) -> Result<PatchOperation> {
    Ok(PatchOperation::Add(AddOperation {
        path: PointerBuf::from_tokens(path),
        value: serde_json::to_value(value)?,
    }))
}
