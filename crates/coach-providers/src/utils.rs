// ABOUTME: Shared helpers for provider payload normalization
// ABOUTME: Clamped float-to-integer conversions for durations reported as floats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Type conversion utilities for safe float-to-integer conversions
pub mod conversions {
    /// Safely convert f64 to u64, clamping to valid range
    ///
    /// NaN maps to zero.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        clippy::missing_const_for_fn
    )]
    #[must_use]
    pub fn f64_to_u64(value: f64) -> u64 {
        if value.is_nan() {
            return 0;
        }
        value.max(0.0).min(u64::MAX as f64) as u64
    }

}
