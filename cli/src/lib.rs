//! brewgo command-line library.
//!
//! This crate holds the argument definitions and command dispatch for the
//! `brewgo` binary, kept apart from `main` so they can be tested without
//! spawning a process.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`command`] - Print and install command dispatch
//! - [`error`] - CLI error types

pub mod cli;
pub mod command;
pub mod error;
