// ABOUTME: Coaching prompts loaded at compile time with optional external instruction templates
// ABOUTME: Shapes activity, lap, and stream data into a bounded system/user message pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coaching Prompts
//!
//! Built-in prompt texts live in markdown files next to this module and are
//! compiled in. A configured template file replaces only the instruction
//! block of the user message; the structured data sections are always
//! appended after it, so a template cannot drop the activity data.

mod builder;

pub use builder::{PromptBuilder, PromptCore};

/// Persona for single-activity analysis
pub const DAILY_SYSTEM_PROMPT: &str = include_str!("daily_system.md");

/// Built-in instructions for single-activity analysis
pub const DAILY_INSTRUCTIONS: &str = include_str!("daily_instructions.md");

/// Persona for the weekly rollup
pub const WEEKLY_SYSTEM_PROMPT: &str = include_str!("weekly_system.md");

/// Built-in instructions for the weekly rollup
pub const WEEKLY_INSTRUCTIONS: &str = include_str!("weekly_instructions.md");
