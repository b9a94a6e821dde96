// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for mobility-cli
// ABOUTME: Provides single-pose analysis, multi-pose sessions, and history listing

pub mod analyze;
pub mod history;
pub mod session;
