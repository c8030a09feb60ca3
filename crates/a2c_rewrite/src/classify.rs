//! Recognition of qualifying calls and factory shapes.
//!
//! A call qualifies when its callee spells one of the two fully-qualified
//! dotted names and it carries at least a dependency argument. Anything
//! else is inert: the original node is handed back verbatim.

use a2c_ast::{CallKind, FactoryBody, FactoryFn, FactoryShape, QualifyingCall};
use swc_common::{SyntaxContext, DUMMY_SP};
use swc_ecma_ast as ast;

/// Peek at a call expression and report which qualifying form it is, if any.
///
/// Returns `None` for foreign callees, zero-argument calls, and calls using
/// spread arguments, all of which are left untouched by the rewrite.
pub fn kind_of(call: &ast::CallExpr) -> Option<CallKind> {
    let path = callee_path(&call.callee)?;
    let kind = if path == CallKind::Define.callee_path() {
        CallKind::Define
    } else if path == CallKind::Require.callee_path() {
        CallKind::Require
    } else {
        return None;
    };
    if call.args.is_empty() || call.args.iter().any(|a| a.spread.is_some()) {
        return None;
    }
    Some(kind)
}

/// Decompose a qualifying call into its dependency and factory arguments.
///
/// Non-qualifying calls are returned unchanged in the `Err` variant.
pub fn classify(mut call: ast::CallExpr) -> Result<QualifyingCall, ast::CallExpr> {
    let Some(kind) = kind_of(&call) else {
        return Err(call);
    };
    let mut args = std::mem::take(&mut call.args).into_iter();
    let deps = match args.next() {
        Some(arg) => *arg.expr,
        // kind_of guarantees at least one argument
        None => return Err(call),
    };
    let factory = args.next().map(|arg| *arg.expr);
    Ok(QualifyingCall {
        kind,
        deps,
        factory,
    })
}

/// Classify the factory argument into one of the three shapes.
///
/// Function and arrow expressions bind statically. A closed set of
/// expression kinds that may still evaluate to a function at runtime is
/// deferred to the runtime-checked fallback. Everything else (object
/// literals and the like) can never be a function and is treated as if no
/// factory were given.
pub fn factory_shape(factory: Option<ast::Expr>) -> FactoryShape {
    let Some(expr) = factory else {
        return FactoryShape::Absent;
    };
    match expr {
        ast::Expr::Fn(fn_expr) => {
            let function = *fn_expr.function;
            FactoryShape::Func(FactoryFn {
                params: function.params.into_iter().map(|p| p.pat).collect(),
                body: FactoryBody::Block(function.body.unwrap_or_else(empty_block)),
                is_arrow: false,
                is_async: function.is_async,
            })
        }
        ast::Expr::Arrow(arrow) => {
            let body = match *arrow.body {
                ast::BlockStmtOrExpr::BlockStmt(b) => FactoryBody::Block(b),
                ast::BlockStmtOrExpr::Expr(e) => FactoryBody::Expr(e),
            };
            FactoryShape::Func(FactoryFn {
                params: arrow.params,
                body,
                is_arrow: true,
                is_async: arrow.is_async,
            })
        }
        ast::Expr::Member(_)
        | ast::Expr::OptChain(_)
        | ast::Expr::Call(_)
        | ast::Expr::Cond(_)
        | ast::Expr::Assign(_)
        | ast::Expr::Paren(_)
        | ast::Expr::Ident(_) => FactoryShape::Deferred(Box::new(expr)),
        ast::Expr::Bin(bin) if is_logical(bin.op) => {
            FactoryShape::Deferred(Box::new(ast::Expr::Bin(bin)))
        }
        _ => FactoryShape::Absent,
    }
}

fn is_logical(op: ast::BinaryOp) -> bool {
    matches!(
        op,
        ast::BinaryOp::LogicalOr | ast::BinaryOp::LogicalAnd | ast::BinaryOp::NullishCoalescing
    )
}

fn empty_block() -> ast::BlockStmt {
    ast::BlockStmt {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        stmts: vec![],
    }
}

/// Join a chain of plain identifier member accesses into a dotted path.
///
/// Computed properties, calls, and anything non-identifier yield `None`.
fn callee_path(callee: &ast::Callee) -> Option<String> {
    let ast::Callee::Expr(expr) = callee else {
        return None;
    };
    let mut segments = Vec::new();
    if collect_path(expr, &mut segments) {
        Some(segments.join("."))
    } else {
        None
    }
}

fn collect_path(expr: &ast::Expr, out: &mut Vec<String>) -> bool {
    match expr {
        ast::Expr::Ident(i) => {
            out.push(i.sym.to_string());
            true
        }
        ast::Expr::Member(m) => {
            if !collect_path(&m.obj, out) {
                return false;
            }
            match &m.prop {
                ast::MemberProp::Ident(p) => {
                    out.push(p.sym.to_string());
                    true
                }
                _ => false,
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_call(source: &str) -> ast::CallExpr {
        let parsed = a2c_parser::parse_module(source, "test.js").unwrap();
        match parsed.module.body.into_iter().next() {
            Some(ast::ModuleItem::Stmt(ast::Stmt::Expr(s))) => match *s.expr {
                ast::Expr::Call(call) => call,
                other => panic!("expected a call, got {other:?}"),
            },
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    #[test]
    fn recognises_both_calling_forms() {
        assert_eq!(
            kind_of(&first_call("sap.ui.define(['a'], function(a) {});")),
            Some(CallKind::Define)
        );
        assert_eq!(
            kind_of(&first_call("sap.ui.require(['a'], function(a) {});")),
            Some(CallKind::Require)
        );
    }

    #[test]
    fn foreign_callees_are_inert() {
        assert_eq!(kind_of(&first_call("define(['a'], function(a) {});")), None);
        assert_eq!(kind_of(&first_call("sap.ui.loader(['a']);")), None);
        assert_eq!(kind_of(&first_call("sap['ui'].require(['a']);")), None);
    }

    #[test]
    fn zero_arguments_is_not_applicable() {
        assert_eq!(kind_of(&first_call("sap.ui.require();")), None);
    }

    #[test]
    fn spread_arguments_are_not_applicable() {
        assert_eq!(kind_of(&first_call("sap.ui.require(...args);")), None);
    }

    #[test]
    fn classify_hands_back_non_qualifying_calls() {
        let call = first_call("foo(['a']);");
        assert!(classify(call).is_err());
    }

    #[test]
    fn object_literal_factory_is_absent() {
        let call = first_call("sap.ui.require(['a'], { nonFunction: 'factory' });");
        let qc = classify(call).unwrap();
        assert!(matches!(factory_shape(qc.factory), FactoryShape::Absent));
    }

    #[test]
    fn deferred_shapes_cover_runtime_function_candidates() {
        for factory in [
            "this.factory",
            "foo?.factory",
            "getFactory()",
            "getFactory?.()",
            "factories[i]",
            "factory1 || factory2",
            "foo ? factory1 : factory2",
            "factory = myFactory",
            "(factory = myFactory)",
            "factory",
        ] {
            let call = first_call(&format!("sap.ui.require(['a'], {factory});"));
            let qc = classify(call).unwrap();
            assert!(
                matches!(factory_shape(qc.factory), FactoryShape::Deferred(_)),
                "expected {factory} to defer"
            );
        }
    }

    #[test]
    fn arrow_implicit_return_is_an_expression_body() {
        let call = first_call("sap.ui.require(['a'], (a) => a.x());");
        let qc = classify(call).unwrap();
        match factory_shape(qc.factory) {
            FactoryShape::Func(f) => {
                assert!(f.is_arrow);
                assert!(matches!(f.body, FactoryBody::Expr(_)));
            }
            other => panic!("expected a function shape, got {other:?}"),
        }
    }
}
