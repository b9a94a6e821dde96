// ABOUTME: Core types and constants for mobility age assessment
// ABOUTME: Foundation crate with error handling, pose models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mobility Core
//!
//! Foundation crate providing shared types and constants for the mobility age
//! workspace. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AssessmentError`
//! - **constants**: Age bounds, report sentinels, and service names
//! - **models**: Poses, measurements, assessment outcomes, and history records

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;
