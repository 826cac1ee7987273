//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - serve: Start the web calculator
//! - analyze: Margin analysis in the terminal
//! - catalog: List the product catalog
//! - cost: Manufacturing cost estimate
//! - test: Test configuration validity
//! - config: Configuration display

pub mod analyze;
pub mod catalog;
pub mod config;
pub mod cost;
pub mod serve;
