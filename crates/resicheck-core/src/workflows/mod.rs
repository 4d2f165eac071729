//! # Workflows Module
//!
//! This module provides the high-level entry points that tie the format readers and the
//! completeness analyzer together.
//!
//! ## Architecture
//!
//! - **Check Workflow** ([`check`]) - Parse raw bytes, then analyze the resulting structure;
//!   either one input at a time or as a batch of independent inputs processed in parallel.
//!
//! Each call owns the structure it parses and shares only the read-only residue catalog,
//! so concurrent checks never interfere with each other.

pub mod check;
