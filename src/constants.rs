// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Pod annotation keys read by the injector
pub mod annotations {
    /// Overrides the default bucket link for this pod
    pub const BUCKET_LINK: &str = "curiesync.curiefense.sagikazarmark.dev/bucket-link";
    /// Secret injected as environment variables into both curiesync containers
    pub const SECRET_NAME: &str = "curiesync.curiefense.sagikazarmark.dev/secret-name";
    /// Run mode of the init container: "sync-once" or "bootstrap"
    pub const INIT_RUN_MODE: &str = "curiesync.curiefense.sagikazarmark.dev/init-run-mode";
}

/// Environment variables understood by the curiesync image
pub mod env {
    pub const RUN_MODE: &str = "RUN_MODE";
    pub const CURIE_BUCKET_LINK: &str = "CURIE_BUCKET_LINK";
}

/// Name shared by the injected init and sidecar containers
pub const CONTAINER_NAME: &str = "curiesync";

/// Empty dir volume holding the synchronized configuration
pub const VOLUME_NAME: &str = "curieconf";

/// Mount path of the configuration volume in every container
pub const MOUNT_PATH: &str = "/config";

/// Webhook identifier used in logs
pub const WEBHOOK_ID: &str = "curiesync-injector";

/// HTTP routes served by the webhook
pub mod routes {
    pub const MUTATE: &str = "/mutate";
    pub const HEALTHZ: &str = "/healthz";
}

/// Process configuration defaults
pub mod defaults {
    pub const CURIESYNC_IMAGE: &str = "curiefense/curiesync:latest";
    pub const LISTEN_ADDR: &str = "127.0.0.1:8080";
}
