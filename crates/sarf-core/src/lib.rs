//! Shared vocabulary for Arabic root-and-pattern morphology.
//!
//! - [`character`] -- Arabic letter constants and per-position weak-letter sets
//! - [`root`] -- Root classification ([`RootType`]) and canonical letters
//! - [`derivative`] -- Derived words with frequency counters
//! - [`transformation`] -- Rewrite rules and rule groups
//! - [`validation`] -- Validation verdicts

pub mod character;
pub mod derivative;
pub mod root;
pub mod transformation;
pub mod validation;

pub use derivative::Derivative;
pub use root::{InvalidRoot, RootType, canonical_letters, classify};
pub use transformation::{RewriteOp, TransformationGroup, TransformationRule};
pub use validation::ValidationResult;
