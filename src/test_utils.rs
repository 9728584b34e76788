// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for building pods and admission reviews.

use k8s_openapi::api::core::v1::{Container, Pod, PodSpec};
use kube::api::ObjectMeta;
use kube::core::admission::AdmissionReview;
use kube::core::DynamicObject;
use serde_json::Value;
use std::collections::BTreeMap;

/// Create a pod in the default namespace with the given containers
pub fn make_pod(containers: Vec<Container>, annotations: Option<BTreeMap<String, String>>) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some("test-pod".to_string()),
            namespace: Some("default".to_string()),
            annotations,
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers,
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn make_container(name: &str, image: &str) -> Container {
    Container {
        name: name.to_string(),
        image: Some(image.to_string()),
        ..Default::default()
    }
}

/// Value of the named environment variable of a container
pub fn env_value<'a>(container: &'a Container, name: &str) -> Option<&'a str> {
    container
        .env
        .as_ref()?
        .iter()
        .find(|e| e.name == name)
        .and_then(|e| e.value.as_deref())
}

/// Name of the secret referenced through `envFrom`, if exactly one is set
pub fn secret_ref(container: &Container) -> Option<&str> {
    match container.env_from.as_deref() {
        Some([source]) => source.secret_ref.as_ref().map(|s| s.name.as_str()),
        _ => None,
    }
}

/// Create an AdmissionReview JSON document for the given kind and object
pub fn admission_review_json(
    group: &str,
    version: &str,
    kind: &str,
    resource: &str,
    operation: &str,
    object: Option<Value>,
) -> Value {
    let gvk = serde_json::json!({ "group": group, "version": version, "kind": kind });
    let gvr = serde_json::json!({ "group": group, "version": version, "resource": resource });

    serde_json::json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
            "kind": gvk,
            "resource": gvr,
            "requestKind": gvk,
            "requestResource": gvr,
            "name": "test-pod",
            "namespace": "default",
            "operation": operation,
            "userInfo": {
                "username": "admin",
                "uid": "014fbff9a07c",
                "groups": ["system:authenticated"]
            },
            "object": object,
            "oldObject": null,
            "dryRun": false
        }
    })
}

/// Create an AdmissionReview JSON document for a pod
pub fn pod_review_json(operation: &str, pod: &Pod) -> Value {
    let mut object = serde_json::to_value(pod).unwrap();
    object["apiVersion"] = Value::from("v1");
    object["kind"] = Value::from("Pod");

    admission_review_json("", "v1", "Pod", "pods", operation, Some(object))
}

/// Create an AdmissionReview for a pod
pub fn pod_review(operation: &str, pod: &Pod) -> AdmissionReview<DynamicObject> {
    serde_json::from_value(pod_review_json(operation, pod)).unwrap()
}

/// Create an AdmissionReview for a ConfigMap
pub fn config_map_review(operation: &str) -> AdmissionReview<DynamicObject> {
    let object = serde_json::json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": { "name": "settings", "namespace": "default" },
        "data": { "key": "value" }
    });

    serde_json::from_value(admission_review_json(
        "", "v1", "ConfigMap", "configmaps", operation, Some(object),
    ))
    .unwrap()
}
