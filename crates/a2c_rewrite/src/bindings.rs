//! Positional parameter bindings for statically resolvable factories.
//!
//! Pairs the factory's formal parameters with the literal dependency
//! sequence, in order:
//!
//! - a plain parameter binds `var param = require('spec')`, or the ambient
//!   identifier for a reserved specifier;
//! - dependencies past the parameter list load for effect only;
//! - a trailing rest parameter collects every remaining dependency into an
//!   array literal, empty if none remain;
//! - surplus parameters with no matching dependency stay unbound.

use a2c_ast::ambient_name;
use swc_common::DUMMY_SP;
use swc_ecma_ast as ast;

use crate::emit;

/// Synthesize the binding statements for one factory, in dependency order.
pub fn synthesize(params: Vec<ast::Pat>, deps: &[ast::Str]) -> Vec<ast::Stmt> {
    let (plain, rest) = split_rest(params);
    let bound = plain.len().min(deps.len());
    let mut stmts = Vec::with_capacity(deps.len());

    for (pat, dep) in plain.into_iter().zip(deps.iter()) {
        if shadows_ambient(&pat, dep) {
            // `var exports = exports;` would hoist over the ambient binding
            continue;
        }
        stmts.push(emit::var_stmt(pat, emit::load(dep)));
    }

    let remaining = deps.get(bound..).unwrap_or_default();
    match rest {
        Some(pat) => {
            let elems = remaining
                .iter()
                .map(|dep| {
                    Some(ast::ExprOrSpread {
                        spread: None,
                        expr: Box::new(emit::load(dep)),
                    })
                })
                .collect();
            stmts.push(emit::var_stmt(
                pat,
                ast::Expr::Array(ast::ArrayLit {
                    span: DUMMY_SP,
                    elems,
                }),
            ));
        }
        None => {
            for dep in remaining {
                if ambient_name(dep).is_some() {
                    // a bare ambient reference observes nothing
                    continue;
                }
                stmts.push(emit::expr_stmt(emit::require_call(dep.clone())));
            }
        }
    }

    stmts
}

/// Split off a trailing rest parameter, unwrapping to its inner pattern.
fn split_rest(mut params: Vec<ast::Pat>) -> (Vec<ast::Pat>, Option<ast::Pat>) {
    let rest = match params.pop() {
        Some(ast::Pat::Rest(rest)) => Some(*rest.arg),
        Some(other) => {
            params.push(other);
            None
        }
        None => None,
    };
    (params, rest)
}

/// True when binding `pat` to `dep` would shadow the ambient identifier it
/// is supposed to alias, e.g. `function(exports)` paired with `'exports'`.
fn shadows_ambient(pat: &ast::Pat, dep: &ast::Str) -> bool {
    match (pat, ambient_name(dep)) {
        (ast::Pat::Ident(binding), Some(name)) => binding.id.sym.as_ref() == name,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(value: &str) -> ast::Str {
        ast::Str {
            span: DUMMY_SP,
            value: value.into(),
            raw: None,
        }
    }

    fn param(name: &str) -> ast::Pat {
        ast::Pat::Ident(ast::Ident::new_no_ctxt(name.into(), DUMMY_SP).into())
    }

    fn rest_param(name: &str) -> ast::Pat {
        ast::Pat::Rest(ast::RestPat {
            span: DUMMY_SP,
            dot3_token: DUMMY_SP,
            arg: Box::new(param(name)),
            type_ann: None,
        })
    }

    #[test]
    fn binds_params_positionally_and_loads_the_remainder() {
        let stmts = synthesize(vec![param("llama")], &[spec("llamas"), spec("frogs")]);
        assert_eq!(stmts.len(), 2);
        assert!(matches!(stmts[0], ast::Stmt::Decl(_)));
        assert!(matches!(stmts[1], ast::Stmt::Expr(_)));
    }

    #[test]
    fn rest_always_binds_an_array() {
        let stmts = synthesize(vec![param("dep"), rest_param("rest")], &[spec("dep1")]);
        assert_eq!(stmts.len(), 2);
        let ast::Stmt::Decl(ast::Decl::Var(var)) = &stmts[1] else {
            panic!("expected the rest binding");
        };
        let Some(init) = &var.decls[0].init else {
            panic!("rest binding must be initialized");
        };
        assert!(matches!(&**init, ast::Expr::Array(arr) if arr.elems.is_empty()));
    }

    #[test]
    fn surplus_params_stay_unbound() {
        let stmts = synthesize(vec![param("a"), param("b")], &[spec("only")]);
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn reserved_surplus_specifiers_emit_nothing() {
        let stmts = synthesize(vec![param("a")], &[spec("x"), spec("module"), spec("y")]);
        // x binds, module collapses, y loads bare
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn self_shadowing_reserved_binding_is_omitted() {
        let stmts = synthesize(
            vec![param("exports"), param("m")],
            &[spec("exports"), spec("module")],
        );
        // only `var m = module;` survives
        assert_eq!(stmts.len(), 1);
    }
}
