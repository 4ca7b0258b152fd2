//! DUCK Compliance Facade
//!
//! Compiles rulebases into theories, evaluates documents against them and
//! searches for compliant variants of non-compliant documents.
//!
//! # Architecture
//!
//! - [`Catalog`]: rulebase metadata, compiled fail-closed at startup
//! - [`TheoryCache`]: one theory per rulebase, refreshed on revision mismatch
//! - [`ComplianceChecker`]: assumptions in, verdict out
//! - [`VariantSearch`]: background search streamed through a [`VariantStream`]
//! - [`ComplianceService`]: normalize → unfold → evaluate → explain → fold
//!
//! The reasoning engine is supplied through [`duck_engine::Reasoner`].

#![warn(missing_docs)]

pub mod assumptions;
mod cache;
mod catalog;
mod checker;
mod config;
mod error;
mod search;
mod service;

pub use cache::{CompiledTheory, TheoryCache};
pub use catalog::{read_header, scan, Catalog, DirectorySource, RuleBaseDescription};
pub use checker::ComplianceChecker;
pub use config::{ComplianceConfig, ConfigError, RULEBASE_DIR_ENV, WEB_DIR_ENV};
pub use error::ComplianceError;
pub use search::{
    CancelSignal, Canceller, StatementRemovalSearch, Variant, VariantSearch, VariantStream,
};
pub use service::{ComplianceReport, CompliantPage, ComplianceService};
