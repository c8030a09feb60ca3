//! Rewrites AMD-style module loading calls into CommonJS.
//!
//! `sap.ui.define(...)` and `sap.ui.require(...)` calls become ordered
//! `require(...)` bindings wrapped in an immediately invoked closure; a
//! definition's result is assigned to `module.exports`. Everything else in
//! the tree, comments included, is left untouched.
//!
//! Pipeline stages, one module each:
//! - [`directive`]: per-statement exemption via a marker comment
//! - [`classify`]: recognises qualifying calls and factory shapes
//! - [`deps`]: literal vs. dynamic dependency lists
//! - [`bindings`]: positional parameter bindings with reserved-name
//!   substitution
//! - [`emit`]: assembles the replacement statements/expressions
//! - [`rewrite`]: the driving [`VisitMut`](swc_ecma_visit::VisitMut)

pub mod bindings;
pub mod classify;
pub mod deps;
pub mod directive;
pub mod emit;
pub mod rewrite;

pub use rewrite::{rewrite_module, AmdRewriter};
