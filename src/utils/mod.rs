// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared numeric helpers

pub mod coords;
pub mod math;

pub use math::{distance_2d, format_fixed, normalize_or_keep, polyline_length, shoelace_area};
