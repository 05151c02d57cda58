//! # Lumen Studio
//!
//! Command line host for the Lumen theme engine. Builds a provider from
//! `lumen.toml`, remembers the chosen theme in the user's config directory
//! and prints the resulting root CSS.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
