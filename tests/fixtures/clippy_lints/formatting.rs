use clippy_utils::diagnostics::span_lint_and_note;
use rustc_ast::ast::{BinOpKind, Block, Expr, ExprKind};
use rustc_lint::{EarlyContext, EarlyLintPass};
use rustc_session::declare_lint_pass;

declare_clippy_lint! {
    /// ### What it does
    /// Checks for use of the non-existent `=*`, `=!` and `=-`
    /// operators.
    #[clippy::version = "pre 1.29.0"]
    pub SUSPICIOUS_ASSIGNMENT_FORMATTING,
    suspicious,
    "suspicious formatting of `*=`, `-=` or `!=`"
}

declare_clippy_lint! {
    /// ### What it does
    /// Checks for formatting of `else`.
    #[clippy::version = "pre 1.29.0"]
    pub SUSPICIOUS_ELSE_FORMATTING,
    suspicious,
    "suspicious formatting of `else`"
}

declare_lint_pass!(Formatting => [
    SUSPICIOUS_ASSIGNMENT_FORMATTING,
    SUSPICIOUS_ELSE_FORMATTING,
]);

impl EarlyLintPass for Formatting {
    fn check_block(&mut self, cx: &EarlyContext<'_>, block: &Block) {
        for w in block.stmts.windows(2) {
            check_missing_else(cx, &w[0], &w[1]);
        }
    }

    fn check_expr(&mut self, cx: &EarlyContext<'_>, expr: &Expr) {
        if let ExprKind::Binary(op, _, _) = &expr.kind {
            if op.node == BinOpKind::Eq {
                span_lint_and_note(
                    cx,
                    SUSPICIOUS_ASSIGNMENT_FORMATTING,
                    expr.span,
                    "this looks like you are trying to use `a op= b`",
                    None,
                    "to remove this lint, use either `op=` or `= op`",
                );
            }
        }
    }
}
