//! The tools module provides helper functions for the sbro codec.
//!
//! The tools are:
//! - cli: Command line interface for the sbro driver.
//! - context: Classify the previously emitted byte to pick a literal table.

pub mod cli;
pub mod context;
