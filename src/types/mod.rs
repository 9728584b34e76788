// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

pub mod run_mode;

pub use run_mode::RunMode;
