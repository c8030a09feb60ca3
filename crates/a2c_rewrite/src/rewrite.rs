//! Depth-first driver for the rewrite.
//!
//! Statement lists are processed with an explicit drain loop: each original
//! statement either passes through (exempt or not applicable), or its
//! replacement statements are spliced into the output. Replacement output
//! is emitted fully formed; factory bodies are rewritten *before* the
//! enclosing closure is assembled, so synthesized statements are never
//! visited again.

use a2c_ast::{CallKind, DependencySpec, Directive, FactoryBody, FactoryShape, QualifyingCall};
use swc_common::{comments::Comments, Span, Spanned, DUMMY_SP};
use swc_ecma_ast as ast;
use swc_ecma_visit::{VisitMut, VisitMutWith};

use crate::{classify, deps, directive, emit};

/// Rewrite every qualifying call in a module, honouring exemption markers
/// recorded in the comment side-table.
pub fn rewrite_module(mut module: ast::Module, comments: &dyn Comments) -> ast::Module {
    let mut rewriter = AmdRewriter::new(comments);
    module.visit_mut_with(&mut rewriter);
    module
}

/// The traversal state: just the comment side-table; the engine itself is
/// stateless between statements.
pub struct AmdRewriter<'a> {
    comments: &'a dyn Comments,
}

impl<'a> AmdRewriter<'a> {
    pub fn new(comments: &'a dyn Comments) -> Self {
        Self { comments }
    }

    /// Process one statement: passthrough, replacement, or recursion.
    fn rewrite_stmt(&mut self, stmt: ast::Stmt) -> Vec<ast::Stmt> {
        if directive::scan(stmt.span_lo(), self.comments) == Directive::Exempt {
            return vec![stmt];
        }
        match stmt {
            ast::Stmt::Expr(expr_stmt) => match self.try_call_stmt(expr_stmt) {
                Ok(replacement) => replacement,
                Err(expr_stmt) => {
                    let mut stmt = ast::Stmt::Expr(expr_stmt);
                    stmt.visit_mut_children_with(self);
                    vec![stmt]
                }
            },
            mut other => {
                other.visit_mut_with(self);
                vec![other]
            }
        }
    }

    /// Attempt the statement-position rewrite; hand the statement back
    /// untouched when the call does not qualify.
    fn try_call_stmt(&mut self, stmt: ast::ExprStmt) -> Result<Vec<ast::Stmt>, ast::ExprStmt> {
        let span = stmt.span;
        match *stmt.expr {
            ast::Expr::Call(call) => match classify::classify(call) {
                Ok(qc) => Ok(self.emit_stmts(qc, span)),
                Err(call) => Err(ast::ExprStmt {
                    span,
                    expr: Box::new(ast::Expr::Call(call)),
                }),
            },
            other => Err(ast::ExprStmt {
                span,
                expr: Box::new(other),
            }),
        }
    }

    fn emit_stmts(&mut self, qc: QualifyingCall, span: Span) -> Vec<ast::Stmt> {
        let (kind, deps_spec, shape) = self.prepare(qc);
        emit::replacement_stmts(kind, deps_spec, shape, span)
    }

    /// Resolve the arguments and rewrite any nested qualifying calls inside
    /// them, so the enclosing replacement is assembled from finished parts.
    fn prepare(&mut self, qc: QualifyingCall) -> (CallKind, DependencySpec, FactoryShape) {
        let mut deps_spec = deps::resolve(qc.deps);
        if let DependencySpec::Dynamic(expr) = &mut deps_spec {
            expr.visit_mut_with(self);
        }
        let mut shape = classify::factory_shape(qc.factory);
        match &mut shape {
            FactoryShape::Func(f) => match &mut f.body {
                FactoryBody::Block(block) => block.visit_mut_with(self),
                FactoryBody::Expr(expr) => expr.visit_mut_with(self),
            },
            FactoryShape::Deferred(expr) => expr.visit_mut_with(self),
            FactoryShape::Absent => {}
        }
        (qc.kind, deps_spec, shape)
    }
}

impl VisitMut for AmdRewriter<'_> {
    fn visit_mut_module_items(&mut self, items: &mut Vec<ast::ModuleItem>) {
        let mut out = Vec::with_capacity(items.len());
        for item in items.drain(..) {
            match item {
                ast::ModuleItem::Stmt(stmt) => {
                    out.extend(self.rewrite_stmt(stmt).into_iter().map(ast::ModuleItem::Stmt));
                }
                mut decl => {
                    if directive::scan(decl.span_lo(), self.comments) == Directive::Eligible {
                        decl.visit_mut_with(self);
                    }
                    out.push(decl);
                }
            }
        }
        *items = out;
    }

    fn visit_mut_stmts(&mut self, stmts: &mut Vec<ast::Stmt>) {
        let mut out = Vec::with_capacity(stmts.len());
        for stmt in stmts.drain(..) {
            out.extend(self.rewrite_stmt(stmt));
        }
        *stmts = out;
    }

    /// A qualifying call whose value is consumed in place is substituted
    /// with the single-expression form of its replacement.
    fn visit_mut_expr(&mut self, expr: &mut ast::Expr) {
        let qualifies =
            matches!(&*expr, ast::Expr::Call(call) if classify::kind_of(call).is_some());
        if !qualifies {
            expr.visit_mut_children_with(self);
            return;
        }
        let taken = std::mem::replace(expr, ast::Expr::Invalid(ast::Invalid { span: DUMMY_SP }));
        if let ast::Expr::Call(call) = taken {
            match classify::classify(call) {
                Ok(qc) => {
                    let (kind, deps_spec, shape) = self.prepare(qc);
                    *expr = emit::replacement_expr(kind, deps_spec, shape);
                }
                Err(call) => *expr = ast::Expr::Call(call),
            }
        }
    }
}
