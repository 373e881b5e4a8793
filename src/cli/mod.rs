//! CLI infrastructure for the tilecrush toolkit
//!
//! This module provides the command-line interface for benchmarking the
//! lookahead agent and for playing games interactively.

pub mod commands;
pub mod output;
