//! Dependency-list resolution.
//!
//! An array literal made entirely of string literals resolves statically;
//! any other expression is carried unevaluated into the runtime-checked
//! fallback. Specifiers pass through verbatim: no path normalization,
//! no deduplication, source order preserved.

use a2c_ast::DependencySpec;
use swc_ecma_ast as ast;

/// Resolve the dependency argument of a qualifying call.
pub fn resolve(deps: ast::Expr) -> DependencySpec {
    if let ast::Expr::Array(arr) = &deps {
        if let Some(specs) = literal_strings(arr) {
            return DependencySpec::Literal(specs);
        }
    }
    DependencySpec::Dynamic(Box::new(deps))
}

/// Extract the string literals of an array, or `None` if any element is a
/// hole, a spread, or a non-string expression.
fn literal_strings(arr: &ast::ArrayLit) -> Option<Vec<ast::Str>> {
    arr.elems
        .iter()
        .map(|elem| match elem {
            Some(ast::ExprOrSpread { spread: None, expr }) => match &**expr {
                ast::Expr::Lit(ast::Lit::Str(s)) => Some(s.clone()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}
