//! `Estoque` - A product catalog demo web application
//!
//! This crate provides a small server-side-rendered CRUD application over an
//! in-memory product catalog: a seeded store with monotonic id allocation,
//! field and cross-field validation with a closed set of user-safe messages,
//! and an HTTP layer that drives the redirect/flash-message contract.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    // Documentation - missing docs should be added gradually
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Performance
    clippy::inefficient_to_string,
    clippy::needless_pass_by_value,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Complexity and readability
    clippy::cognitive_complexity,
    clippy::match_same_arms,

    // Style consistency
    clippy::enum_glob_use,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Application configuration from config.toml and environment variables
pub mod config;
/// Unified error types and result handling
pub mod errors;
/// Request handler - maps catalog outcomes to views, redirects, and flash messages
pub mod handler;
/// The closed set of user-visible messages
pub mod messages;
/// The product entity
pub mod model;
/// In-memory product store with seeded demo data
pub mod store;
/// HTTP layer - routing, form binding, flash attributes, page rendering
pub mod web;

#[cfg(test)]
pub mod test_utils;
