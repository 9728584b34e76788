// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Curiesync injection: annotation resolution, container building and pod mutation.

pub mod annotations;
pub mod container;
pub mod injector;

pub use injector::{CuriesyncInjector, InjectionConfig, Injector};
