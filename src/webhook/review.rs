// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! AdmissionReview handling: decode, mutate, answer with a JSON patch.

use crate::error::{CuriesyncError, Result};
use crate::injection::Injector;
use crate::mutator::{AdmittedObject, Mutator};
use crate::webhook::patch::injection_patch;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
use kube::core::DynamicObject;
use tracing::{debug, error, info, instrument, warn};

/// Answer an AdmissionReview.
///
/// Only `CREATE` operations are mutated. A failed injection denies the admission so the
/// pod is never admitted half-mutated.
#[instrument(skip_all)]
pub fn review<I: Injector>(
    mutator: &Mutator<I>,
    review: AdmissionReview<DynamicObject>,
) -> AdmissionReview<DynamicObject> {
    let request: AdmissionRequest<DynamicObject> = match review.try_into() {
        Ok(request) => request,
        Err(e) => {
            warn!("Failed to convert admission review to request: {}", e);
            return AdmissionResponse::invalid(format!("failed to convert to request: {e}"))
                .into_review();
        }
    };

    let response = match mutate_request(mutator, &request) {
        Ok(response) => response,
        Err(e) => {
            error!(uid = %request.uid, "Denying admission: {}", e);
            AdmissionResponse::from(&request).deny(e.to_string())
        }
    };

    response.into_review()
}

fn mutate_request<I: Injector>(
    mutator: &Mutator<I>,
    request: &AdmissionRequest<DynamicObject>,
) -> Result<AdmissionResponse> {
    if !matches!(request.operation, Operation::Create) {
        debug!(uid = %request.uid, "Operation {:?} is not mutated", request.operation);
        return Ok(AdmissionResponse::from(request));
    }

    let object = match AdmittedObject::from_request(request) {
        Ok(Some(object)) => object,
        Ok(None) => {
            debug!(uid = %request.uid, "No object in request, allowing unchanged");
            return Ok(AdmissionResponse::from(request));
        }
        Err(e) => {
            return Err(CuriesyncError::InvalidReview(format!(
                "failed to decode {} object: {}",
                request.kind.kind, e
            )))
        }
    };

    let original = match &object {
        AdmittedObject::Pod(pod) => Some(pod.clone()),
        AdmittedObject::Other(_) => None,
    };
    let result = mutator.mutate(request, object)?;

    let (Some(original), Some(AdmittedObject::Pod(injected))) = (original, result.mutated_object)
    else {
        return Ok(AdmissionResponse::from(request));
    };

    let patch = injection_patch(&original, &injected)?;
    if patch.0.is_empty() {
        return Ok(AdmissionResponse::from(request));
    }

    info!(
        uid = %request.uid,
        namespace = request.namespace.as_deref().unwrap_or_default(),
        patch_ops = patch.0.len(),
        "Patching {}",
        request.kind.kind
    );

    AdmissionResponse::from(request)
        .with_patch(patch)
        .map_err(|e| CuriesyncError::PatchError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::annotations;
    use crate::injection::CuriesyncInjector;
    use crate::test_utils::{
        admission_review_json, config_map_review, make_container, make_pod, pod_review,
    };
    use k8s_openapi::api::core::v1::Pod;
    use serde_json::Value;
    use std::collections::BTreeMap;

    struct FailingInjector;

    impl Injector for FailingInjector {
        fn inject(&self, _pod: &mut Pod) -> Result<()> {
            Err(CuriesyncError::InjectionError("volume quota exceeded".to_string()))
        }
    }

    fn make_injector() -> CuriesyncInjector {
        CuriesyncInjector::new("curiefense/curiesync:latest", "")
    }

    fn make_mutator() -> Mutator<CuriesyncInjector> {
        Mutator::new(make_injector())
    }

    fn nginx_pod(annotations: Option<BTreeMap<String, String>>) -> Pod {
        make_pod(
            vec![make_container("nginx-ingress", "nginx-ingress:1.0.0")],
            annotations,
        )
    }

    fn response_json(review: &AdmissionReview<DynamicObject>) -> Value {
        serde_json::to_value(review).unwrap()["response"].clone()
    }

    fn response(review: AdmissionReview<DynamicObject>) -> AdmissionResponse {
        review.response.unwrap()
    }

    fn apply_patch(object: &Value, response: &AdmissionResponse) -> Value {
        let patch: json_patch::Patch =
            serde_json::from_slice(response.patch.as_ref().unwrap()).unwrap();
        let mut doc = object.clone();
        json_patch::patch(&mut doc, &patch.0).unwrap();
        doc
    }

    fn raw_pod_review(object: Value) -> AdmissionReview<DynamicObject> {
        serde_json::from_value(admission_review_json(
            "",
            "v1",
            "Pod",
            "pods",
            "CREATE",
            Some(object),
        ))
        .unwrap()
    }

    #[test]
    fn test_pod_creation_is_patched() {
        let pod = nginx_pod(None);

        let response = response(review(&make_mutator(), pod_review("CREATE", &pod)));

        assert!(response.allowed);
        assert_eq!(response.uid, "705ab4f5-6393-11e8-b7cc-42010a800002");

        let object = serde_json::to_value(&pod).unwrap();
        let patched: Pod = serde_json::from_value(apply_patch(&object, &response)).unwrap();
        let mut expected = pod.clone();
        make_injector().inject(&mut expected).unwrap();
        assert_eq!(patched, expected);
    }

    #[test]
    fn test_patch_keeps_unknown_fields_of_existing_entries() {
        let object = serde_json::json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": { "name": "test-pod", "namespace": "default" },
            "spec": {
                "initContainers": [
                    { "name": "migrate", "image": "migrate:1.0", "futureField": "x" }
                ],
                "containers": [
                    { "name": "nginx-ingress", "image": "nginx-ingress:1.0.0", "futureField": "y" }
                ]
            }
        });

        let response = response(review(&make_mutator(), raw_pod_review(object.clone())));
        assert!(response.allowed);

        let patched = apply_patch(&object, &response);

        let init = patched["spec"]["initContainers"].as_array().unwrap();
        assert_eq!(init.len(), 2);
        assert_eq!(init[0]["name"], "curiesync");
        assert!(init[0].get("futureField").is_none());
        assert_eq!(init[1], object["spec"]["initContainers"][0]);

        let containers = patched["spec"]["containers"].as_array().unwrap();
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0]["futureField"], "y");
        assert_eq!(containers[0]["volumeMounts"][0]["name"], "curieconf");
        assert_eq!(containers[1]["name"], "curiesync");
        assert!(containers[1].get("futureField").is_none());

        assert_eq!(patched["spec"]["volumes"][0]["name"], "curieconf");
    }

    #[test]
    fn test_patch_carries_bucket_link() {
        let pod = nginx_pod(Some(BTreeMap::from([(
            annotations::BUCKET_LINK.to_string(),
            "s3://bucket/prefix/".to_string(),
        )])));

        let response = response(review(&make_mutator(), pod_review("CREATE", &pod)));
        let object = serde_json::to_value(&pod).unwrap();
        let patched: Pod = serde_json::from_value(apply_patch(&object, &response)).unwrap();

        let spec = patched.spec.unwrap();
        let sidecar = spec.containers.last().unwrap();
        assert!(sidecar
            .env
            .as_ref()
            .unwrap()
            .iter()
            .any(|e| e.name == "CURIE_BUCKET_LINK"
                && e.value.as_deref() == Some("s3://bucket/prefix/")));
    }

    #[test]
    fn test_pod_update_is_not_patched() {
        let pod = nginx_pod(None);

        let response = response(review(&make_mutator(), pod_review("UPDATE", &pod)));

        assert!(response.allowed);
        assert!(response.patch.is_none());
    }

    #[test]
    fn test_other_kind_is_allowed_without_patch() {
        let response = response(review(&make_mutator(), config_map_review("CREATE")));

        assert!(response.allowed);
        assert!(response.patch.is_none());
    }

    #[test]
    fn test_injection_failure_denies() {
        let mutator = Mutator::new(FailingInjector);

        let review = review(&mutator, pod_review("CREATE", &nginx_pod(None)));
        let json = response_json(&review);

        assert_eq!(json["allowed"], false);
        assert_eq!(json["uid"], "705ab4f5-6393-11e8-b7cc-42010a800002");
        let message = json["status"]["message"].as_str().unwrap();
        assert!(message.contains("Failed to inject curiesync"));
        assert!(message.contains("volume quota exceeded"));
    }

    #[test]
    fn test_review_without_request_is_invalid() {
        let review_without_request: AdmissionReview<DynamicObject> =
            serde_json::from_value(serde_json::json!({
                "apiVersion": "admission.k8s.io/v1",
                "kind": "AdmissionReview"
            }))
            .unwrap();

        let json = response_json(&review(&make_mutator(), review_without_request));

        assert_eq!(json["allowed"], false);
    }
}
