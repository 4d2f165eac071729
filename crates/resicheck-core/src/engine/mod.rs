//! # Engine Module
//!
//! This module implements the completeness analysis: it walks a parsed structure,
//! consults the residue template catalog and produces the per-residue missing-atom
//! findings.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Check settings, their builder and the projections used by
//!   the readers and the analyzer
//! - **Analysis** ([`analyzer`]) - The completeness pass and its [`analyzer::AnalysisReport`]
//! - **Findings** ([`record`]) - One [`record::CompletenessRecord`] per incomplete residue
//! - **Error Handling** ([`error`]) - Internal-consistency faults collected during analysis
//! - **Progress Monitoring** ([`progress`]) - Progress callbacks for batch checks

pub mod analyzer;
pub mod config;
pub mod error;
pub mod progress;
pub mod record;
