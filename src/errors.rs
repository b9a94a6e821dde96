// ABOUTME: Unified error handling re-exported from the core crate
// ABOUTME: Keeps crate::errors paths stable for the service layer and binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Error types live in `mobility-core` so the scoring crate and this crate
//! share one [`ErrorCode`] space.

pub use mobility_core::errors::*;
