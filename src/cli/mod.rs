//! CLI infrastructure for the noughts solver
//!
//! This module provides the command-line interface for querying best moves,
//! running self-play and matches, and verifying the search exhaustively.

pub mod commands;
pub mod config;
pub mod output;
