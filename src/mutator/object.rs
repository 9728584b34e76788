// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::Result;
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::Resource;
use kube::core::admission::AdmissionRequest;
use kube::core::{DynamicObject, GroupVersionKind};

/// Object carried by an admission request, typed only where the webhook cares.
#[derive(Debug, Clone)]
pub enum AdmittedObject {
    Pod(Box<Pod>),
    Other(DynamicObject),
}

impl AdmittedObject {
    /// Type the request object, `None` if the request carries no object
    pub fn from_request(request: &AdmissionRequest<DynamicObject>) -> Result<Option<Self>> {
        request
            .object
            .as_ref()
            .map(|object| Self::from_dynamic(&request.kind, object.clone()))
            .transpose()
    }

    pub fn from_dynamic(kind: &GroupVersionKind, object: DynamicObject) -> Result<Self> {
        if !is_pod(kind) {
            return Ok(AdmittedObject::Other(object));
        }

        let pod: Pod = serde_json::from_value(serde_json::to_value(&object)?)?;
        Ok(AdmittedObject::Pod(Box::new(pod)))
    }
}

fn is_pod(kind: &GroupVersionKind) -> bool {
    kind.group == Pod::GROUP && kind.version == Pod::VERSION && kind.kind == Pod::KIND
}
