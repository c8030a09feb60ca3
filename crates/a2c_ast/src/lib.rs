//! Data model for the AMD-to-CommonJS rewriter.
//!
//! Re-exports the standard SWC AST and adds the structured types the
//! rewrite pipeline passes between its stages:
//!
//! - [`CallKind`] / [`QualifyingCall`]: output of the call classifier
//! - [`DependencySpec`]: output of the dependency-list resolver
//! - [`FactoryShape`]: syntactic category of the factory argument
//! - [`Directive`]: output of the comment-directive scanner
//!
//! plus the fixed string constants the whole pipeline keys on.

pub use swc_ecma_ast::*;

use serde::{Deserialize, Serialize};

/// Fully-qualified callee of an AMD module definition call.
pub const AMD_DEFINE: &str = "sap.ui.define";
/// Fully-qualified callee of a plain AMD loading call.
pub const AMD_REQUIRE: &str = "sap.ui.require";

/// Dependency specifiers that alias the ambient CommonJS environment
/// instead of loadable modules.
pub const REQUIRE: &str = "require";
pub const MODULE: &str = "module";
pub const EXPORTS: &str = "exports";

/// Comment text that opts the following statement out of the rewrite.
pub const IGNORE_COMMENT: &str = "transform-amd-to-commonjs-ignore";

/// Identifier bound to a runtime-resolved dependency array.
pub const AMD_DEPS: &str = "amdDeps";
/// Identifier bound to a factory expression whose shape is only known at runtime.
pub const MAYBE_FUNCTION: &str = "maybeFunction";
/// Identifier holding a fallback factory's result before the export check.
pub const AMD_FACTORY_RESULT: &str = "amdFactoryResult";
/// Identifier holding a definition factory's result before the export check.
pub const AMD_DEFINE_RESULT: &str = "amdDefineResult";

/// Returns the ambient identifier a dependency specifier aliases, if any.
///
/// Specifier values are WTF-8 atoms; one that is not valid UTF-8 cannot
/// spell a reserved name.
pub fn ambient_name(specifier: &Str) -> Option<&'static str> {
    match specifier.value.as_str()? {
        REQUIRE => Some(REQUIRE),
        MODULE => Some(MODULE),
        EXPORTS => Some(EXPORTS),
        _ => None,
    }
}

/// Which of the two qualifying calling forms a call expression uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallKind {
    /// `sap.ui.define(...)`; the result becomes the module's export.
    Define,
    /// `sap.ui.require(...)`; loaded for effect, result discarded.
    Require,
}

impl CallKind {
    /// The dotted callee path this kind matches.
    pub fn callee_path(self) -> &'static str {
        match self {
            CallKind::Define => AMD_DEFINE,
            CallKind::Require => AMD_REQUIRE,
        }
    }
}

/// Whether a statement may be rewritten or was opted out via comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    Eligible,
    Exempt,
}

/// A classified qualifying call, decomposed into its arguments.
///
/// Transient: produced by the classifier, consumed by the emitter within a
/// single rewrite step.
#[derive(Debug, Clone)]
pub struct QualifyingCall {
    pub kind: CallKind,
    pub deps: Expr,
    pub factory: Option<Expr>,
}

/// The dependency-list argument of a qualifying call.
#[derive(Debug, Clone)]
pub enum DependencySpec {
    /// A syntactic array of string literals, in source order,
    /// duplicates preserved.
    Literal(Vec<Str>),
    /// Any other expression; resolved by a runtime-checked fallback.
    Dynamic(Box<Expr>),
}

/// Syntactic category of the factory argument.
#[derive(Debug, Clone)]
pub enum FactoryShape {
    /// A function or arrow expression whose parameters can be bound
    /// statically.
    Func(FactoryFn),
    /// An expression that may evaluate to a function at runtime (member
    /// access, call, logical, conditional, assignment, parenthesized, or
    /// bare identifier); handled by the runtime-checked fallback.
    Deferred(Box<Expr>),
    /// No factory argument, or one of a shape that is never a function
    /// (e.g. an object literal); dependencies load for effect only.
    Absent,
}

/// A statically bindable factory, decomposed.
#[derive(Debug, Clone)]
pub struct FactoryFn {
    /// Formal parameters in declaration order; at most the last is a rest
    /// pattern.
    pub params: Vec<Pat>,
    pub body: FactoryBody,
    pub is_arrow: bool,
    pub is_async: bool,
}

/// Block body, or the single expression of an implicit-return arrow.
#[derive(Debug, Clone)]
pub enum FactoryBody {
    Block(BlockStmt),
    Expr(Box<Expr>),
}
