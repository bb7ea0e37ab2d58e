mod map_unwrap_or;

use rustc_lint::{LateContext, LateLintPass};
use rustc_session::impl_lint_pass;

declare_clippy_lint! {
    #[clippy::version = "1.45.0"]
    pub MAP_UNWRAP_OR,
    pedantic,
    "using `.map(f).unwrap_or(a)` or `.map(f).unwrap_or_else(func)`, which are more succinctly expressed as `map_or(a, f)` or `map_or_else(a, f)`"
}

pub struct Methods {
    msrv: Msrv,
}

impl_lint_pass!(Methods => [MAP_UNWRAP_OR]);

impl<'tcx> LateLintPass<'tcx> for Methods {
    fn check_expr(&mut self, cx: &LateContext<'tcx>, expr: &'tcx hir::Expr<'_>) {
        if expr.span.from_expansion() {
            return;
        }
        map_unwrap_or::check(cx, expr, self.msrv);
        debug_assert!(!cx.tcx.sess.opts.unstable_opts.ui_testing, "declare_clippy_lint!");
    }
}
