//! Autolink rule descriptors.
//!
//! The matching/substitution engine lives with the message hooks; this
//! module only owns the persisted rule shape and its compile step.

pub mod rule;

pub use rule::{Autolink, CompiledLink, RuleError};
