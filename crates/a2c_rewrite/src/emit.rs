//! Assembly of replacement statements and expressions.
//!
//! Four terminal shapes, picked from the classified call:
//!
//! 1. no factory, literal dependencies: a flat run of `require` calls;
//! 2. function factory, literal dependencies: bindings prepended to the
//!    factory body inside an immediately invoked closure, assigned to
//!    `module.exports` for definitions;
//! 3. deferred factory or dynamic dependency list: a runtime-checked
//!    construct that still loads dependencies in order, exactly once,
//!    before evaluating the factory expression exactly once;
//! 4. no factory, dynamic dependencies: the runtime loader alone.

use a2c_ast::{
    ambient_name, CallKind, DependencySpec, FactoryBody, FactoryFn, FactoryShape, AMD_DEFINE_RESULT,
    AMD_DEPS, AMD_FACTORY_RESULT, EXPORTS, MAYBE_FUNCTION, MODULE, REQUIRE,
};
use swc_common::{Span, SyntaxContext, DUMMY_SP};
use swc_ecma_ast as ast;

use crate::bindings;

/// Local name for one element of a runtime-resolved dependency list.
const AMD_DEP: &str = "amdDep";

/// Build the statements that replace a qualifying call in statement
/// position. The first statement inherits the original statement's span so
/// leading comments re-attach where they were.
pub fn replacement_stmts(
    kind: CallKind,
    deps: DependencySpec,
    factory: FactoryShape,
    span: Span,
) -> Vec<ast::Stmt> {
    let mut stmts = match (factory, deps) {
        (FactoryShape::Absent, DependencySpec::Literal(list)) => bare_loads(&list),
        (FactoryShape::Absent, DependencySpec::Dynamic(expr)) => {
            vec![expr_stmt(runtime_deps(*expr))]
        }
        (FactoryShape::Func(f), DependencySpec::Literal(list)) => {
            let uses_export_object = kind == CallKind::Define
                && list.iter().any(|d| {
                    let ambient = ambient_name(d);
                    ambient == Some(MODULE) || ambient == Some(EXPORTS)
                });
            let result = func_iife(f, &list);
            match kind {
                CallKind::Require => vec![expr_stmt(result)],
                CallKind::Define if uses_export_object => {
                    checked_export(AMD_DEFINE_RESULT, result)
                }
                CallKind::Define => vec![expr_stmt(export_assign(result))],
            }
        }
        (FactoryShape::Func(f), DependencySpec::Dynamic(expr)) => {
            finish_fallback(kind, apply_factory_fn(f, runtime_deps(*expr)))
        }
        (FactoryShape::Deferred(fac), deps) => {
            let deps_expr = match deps {
                DependencySpec::Literal(list) => literal_deps_array(&list),
                DependencySpec::Dynamic(expr) => runtime_deps(*expr),
            };
            finish_fallback(kind, checked_factory_call(deps_expr, *fac))
        }
    };
    if let Some(first) = stmts.first_mut() {
        set_stmt_span(first, span);
    }
    stmts
}

/// Build the single expression that replaces a qualifying call whose value
/// is consumed by surrounding code.
pub fn replacement_expr(kind: CallKind, deps: DependencySpec, factory: FactoryShape) -> ast::Expr {
    let result = match (factory, deps) {
        (FactoryShape::Absent, DependencySpec::Literal(list)) => {
            iife(closure(false, false, vec![], block(bare_loads(&list))), vec![])
        }
        (FactoryShape::Absent, DependencySpec::Dynamic(expr)) => runtime_deps(*expr),
        (FactoryShape::Func(f), DependencySpec::Literal(list)) => func_iife(f, &list),
        (FactoryShape::Func(f), DependencySpec::Dynamic(expr)) => {
            apply_factory_fn(f, runtime_deps(*expr))
        }
        (FactoryShape::Deferred(fac), deps) => {
            let deps_expr = match deps {
                DependencySpec::Literal(list) => literal_deps_array(&list),
                DependencySpec::Dynamic(expr) => runtime_deps(*expr),
            };
            checked_factory_call(deps_expr, *fac)
        }
    };
    match kind {
        CallKind::Define => export_assign(result),
        CallKind::Require => result,
    }
}

/// One `require` statement per non-reserved dependency, in order.
fn bare_loads(deps: &[ast::Str]) -> Vec<ast::Stmt> {
    deps.iter()
        .filter(|d| ambient_name(d).is_none())
        .map(|d| expr_stmt(require_call(d.clone())))
        .collect()
}

/// Bindings plus the factory body, wrapped for immediate invocation.
fn func_iife(f: FactoryFn, deps: &[ast::Str]) -> ast::Expr {
    let is_arrow = f.is_arrow;
    let is_async = f.is_async;
    let mut stmts = bindings::synthesize(f.params, deps);
    match f.body {
        FactoryBody::Block(b) => stmts.extend(b.stmts),
        FactoryBody::Expr(e) => stmts.push(ast::Stmt::Return(ast::ReturnStmt {
            span: DUMMY_SP,
            arg: Some(e),
        })),
    }
    iife(closure(is_arrow, is_async, vec![], block(stmts)), vec![])
}

/// Apply a statically known function factory to a dependency array,
/// preserving its own parameter list: `(factory).apply(null, deps)`.
fn apply_factory_fn(f: FactoryFn, deps_expr: ast::Expr) -> ast::Expr {
    let body = match f.body {
        FactoryBody::Block(b) => b,
        FactoryBody::Expr(e) => block(vec![ast::Stmt::Return(ast::ReturnStmt {
            span: DUMMY_SP,
            arg: Some(e),
        })]),
    };
    let factory = closure(f.is_arrow, f.is_async, f.params, body);
    call(
        member(paren(factory), "apply"),
        vec![null_lit(), deps_expr],
    )
}

/// `(function (amdDeps, maybeFunction) { return typeof maybeFunction ===
/// "function" ? maybeFunction.apply(null, amdDeps) : maybeFunction; })(deps,
/// factory)`: loads happen first (argument order), the factory expression
/// evaluates exactly once, and its value is applied positionally.
fn checked_factory_call(deps_expr: ast::Expr, factory: ast::Expr) -> ast::Expr {
    let applied = call(
        member(ident_expr(MAYBE_FUNCTION), "apply"),
        vec![null_lit(), ident_expr(AMD_DEPS)],
    );
    let body = block(vec![ret(ast::Expr::Cond(ast::CondExpr {
        span: DUMMY_SP,
        test: Box::new(typeof_check(MAYBE_FUNCTION, "function", true)),
        cons: Box::new(applied),
        alt: Box::new(ident_expr(MAYBE_FUNCTION)),
    }))]);
    iife(
        closure(
            false,
            false,
            vec![pat_ident(AMD_DEPS), pat_ident(MAYBE_FUNCTION)],
            body,
        ),
        vec![deps_expr, factory],
    )
}

/// Resolve a dynamic dependency expression at runtime: evaluate it once,
/// then map each element to its load (or ambient identifier) in order.
fn runtime_deps(deps: ast::Expr) -> ast::Expr {
    let mapper = closure(
        false,
        false,
        vec![pat_ident(AMD_DEP)],
        block(vec![ret(reserved_ternary(AMD_DEP))]),
    );
    let is_array = call(
        member(ident_expr("Array"), "isArray"),
        vec![ident_expr(AMD_DEPS)],
    );
    let normalized = paren(ast::Expr::Cond(ast::CondExpr {
        span: DUMMY_SP,
        test: Box::new(is_array),
        cons: Box::new(ident_expr(AMD_DEPS)),
        alt: Box::new(ast::Expr::Array(ast::ArrayLit {
            span: DUMMY_SP,
            elems: vec![],
        })),
    }));
    let mapped = call(member(normalized, "map"), vec![mapper]);
    iife(
        closure(false, false, vec![pat_ident(AMD_DEPS)], block(vec![ret(mapped)])),
        vec![deps],
    )
}

/// `amdDep === "require" ? require : amdDep === "module" ? module : amdDep
/// === "exports" ? exports : require(amdDep)`
fn reserved_ternary(dep_name: &str) -> ast::Expr {
    let mut expr = call(ident_expr(REQUIRE), vec![ident_expr(dep_name)]);
    for name in [EXPORTS, MODULE, REQUIRE] {
        expr = ast::Expr::Cond(ast::CondExpr {
            span: DUMMY_SP,
            test: Box::new(ast::Expr::Bin(ast::BinExpr {
                span: DUMMY_SP,
                op: ast::BinaryOp::EqEqEq,
                left: Box::new(ident_expr(dep_name)),
                right: Box::new(str_lit(name)),
            })),
            cons: Box::new(ident_expr(name)),
            alt: Box::new(expr),
        });
    }
    expr
}

/// The dependency array of a fallback with a literal list: every position
/// is present, reserved names included, so the factory sees its arguments
/// positionally.
fn literal_deps_array(deps: &[ast::Str]) -> ast::Expr {
    ast::Expr::Array(ast::ArrayLit {
        span: DUMMY_SP,
        elems: deps
            .iter()
            .map(|dep| {
                Some(ast::ExprOrSpread {
                    spread: None,
                    expr: Box::new(load(dep)),
                })
            })
            .collect(),
    })
}

/// A fallback result feeds the export slot only for definitions, and only
/// when the factory actually produced a value.
fn finish_fallback(kind: CallKind, result: ast::Expr) -> Vec<ast::Stmt> {
    match kind {
        CallKind::Require => vec![expr_stmt(result)],
        CallKind::Define => checked_export(AMD_FACTORY_RESULT, result),
    }
}

/// `var NAME = result; typeof NAME !== "undefined" && (module.exports = NAME);`
fn checked_export(result_name: &str, result: ast::Expr) -> Vec<ast::Stmt> {
    vec![
        var_stmt(pat_ident(result_name), result),
        expr_stmt(ast::Expr::Bin(ast::BinExpr {
            span: DUMMY_SP,
            op: ast::BinaryOp::LogicalAnd,
            left: Box::new(typeof_check(result_name, "undefined", false)),
            right: Box::new(paren(export_assign(ident_expr(result_name)))),
        })),
    ]
}

/// `module.exports = value`
fn export_assign(value: ast::Expr) -> ast::Expr {
    ast::Expr::Assign(ast::AssignExpr {
        span: DUMMY_SP,
        op: ast::AssignOp::Assign,
        left: ast::AssignTarget::Simple(ast::SimpleAssignTarget::Member(ast::MemberExpr {
            span: DUMMY_SP,
            obj: Box::new(ident_expr(MODULE)),
            prop: ast::MemberProp::Ident(ast::IdentName::new(EXPORTS.into(), DUMMY_SP)),
        })),
        right: Box::new(value),
    })
}

/// The synchronous load of one dependency: the ambient identifier for a
/// reserved specifier, a `require` call otherwise.
pub(crate) fn load(dep: &ast::Str) -> ast::Expr {
    match ambient_name(dep) {
        Some(name) => ident_expr(name),
        None => require_call(dep.clone()),
    }
}

/// `require('spec')`, the specifier passed through verbatim.
pub(crate) fn require_call(spec: ast::Str) -> ast::Expr {
    call(
        ident_expr(REQUIRE),
        vec![ast::Expr::Lit(ast::Lit::Str(spec))],
    )
}

pub(crate) fn var_stmt(name: ast::Pat, init: ast::Expr) -> ast::Stmt {
    ast::Stmt::Decl(ast::Decl::Var(Box::new(ast::VarDecl {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        kind: ast::VarDeclKind::Var,
        declare: false,
        decls: vec![ast::VarDeclarator {
            span: DUMMY_SP,
            name,
            init: Some(Box::new(init)),
            definite: false,
        }],
    })))
}

pub(crate) fn expr_stmt(expr: ast::Expr) -> ast::Stmt {
    ast::Stmt::Expr(ast::ExprStmt {
        span: DUMMY_SP,
        expr: Box::new(expr),
    })
}

fn set_stmt_span(stmt: &mut ast::Stmt, span: Span) {
    match stmt {
        ast::Stmt::Expr(s) => s.span = span,
        ast::Stmt::Decl(ast::Decl::Var(v)) => v.span = span,
        _ => {}
    }
}

fn typeof_check(name: &str, type_name: &str, equals: bool) -> ast::Expr {
    ast::Expr::Bin(ast::BinExpr {
        span: DUMMY_SP,
        op: if equals {
            ast::BinaryOp::EqEqEq
        } else {
            ast::BinaryOp::NotEqEq
        },
        left: Box::new(ast::Expr::Unary(ast::UnaryExpr {
            span: DUMMY_SP,
            op: ast::UnaryOp::TypeOf,
            arg: Box::new(ident_expr(name)),
        })),
        right: Box::new(str_lit(type_name)),
    })
}

fn closure(is_arrow: bool, is_async: bool, params: Vec<ast::Pat>, body: ast::BlockStmt) -> ast::Expr {
    if is_arrow {
        ast::Expr::Arrow(ast::ArrowExpr {
            span: DUMMY_SP,
            ctxt: SyntaxContext::empty(),
            params,
            body: Box::new(ast::BlockStmtOrExpr::BlockStmt(body)),
            is_async,
            is_generator: false,
            type_params: None,
            return_type: None,
        })
    } else {
        ast::Expr::Fn(ast::FnExpr {
            ident: None,
            function: Box::new(ast::Function {
                params: params
                    .into_iter()
                    .map(|pat| ast::Param {
                        span: DUMMY_SP,
                        decorators: vec![],
                        pat,
                    })
                    .collect(),
                decorators: vec![],
                span: DUMMY_SP,
                ctxt: SyntaxContext::empty(),
                body: Some(body),
                is_generator: false,
                is_async,
                type_params: None,
                return_type: None,
            }),
        })
    }
}

fn iife(closure_expr: ast::Expr, args: Vec<ast::Expr>) -> ast::Expr {
    call(paren(closure_expr), args)
}

fn call(callee: ast::Expr, args: Vec<ast::Expr>) -> ast::Expr {
    ast::Expr::Call(ast::CallExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        callee: ast::Callee::Expr(Box::new(callee)),
        args: args
            .into_iter()
            .map(|expr| ast::ExprOrSpread {
                spread: None,
                expr: Box::new(expr),
            })
            .collect(),
        type_args: None,
    })
}

fn member(obj: ast::Expr, prop: &str) -> ast::Expr {
    ast::Expr::Member(ast::MemberExpr {
        span: DUMMY_SP,
        obj: Box::new(obj),
        prop: ast::MemberProp::Ident(ast::IdentName::new(prop.into(), DUMMY_SP)),
    })
}

fn block(stmts: Vec<ast::Stmt>) -> ast::BlockStmt {
    ast::BlockStmt {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        stmts,
    }
}

fn ret(expr: ast::Expr) -> ast::Stmt {
    ast::Stmt::Return(ast::ReturnStmt {
        span: DUMMY_SP,
        arg: Some(Box::new(expr)),
    })
}

fn paren(expr: ast::Expr) -> ast::Expr {
    ast::Expr::Paren(ast::ParenExpr {
        span: DUMMY_SP,
        expr: Box::new(expr),
    })
}

fn ident(sym: &str) -> ast::Ident {
    ast::Ident::new_no_ctxt(sym.into(), DUMMY_SP)
}

fn ident_expr(sym: &str) -> ast::Expr {
    ast::Expr::Ident(ident(sym))
}

fn pat_ident(sym: &str) -> ast::Pat {
    ast::Pat::Ident(ident(sym).into())
}

fn str_lit(value: &str) -> ast::Expr {
    ast::Expr::Lit(ast::Lit::Str(ast::Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }))
}

fn null_lit() -> ast::Expr {
    ast::Expr::Lit(ast::Lit::Null(ast::Null { span: DUMMY_SP }))
}
