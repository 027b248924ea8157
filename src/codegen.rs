use swc_core::common::{Span, DUMMY_SP};
use swc_core::ecma::ast::*;

use crate::sanitize::{module_specifier, sanitize};

/// Create: `require('./path')`, keeping `span` of the node it replaces.
pub fn create_require_call(path: &str, span: Span) -> Expr {
    Expr::Call(CallExpr {
        span,
        callee: Callee::Expr(Box::new(Expr::Ident(ident("require")))),
        args: vec![ExprOrSpread {
            spread: None,
            expr: Box::new(Expr::Lit(Lit::Str(module_str(path, span)))),
        }],
        type_args: None,
        ctxt: Default::default(),
    })
}

/// Create: `...expr`
pub fn create_spread(expr: Expr) -> ExprOrSpread {
    ExprOrSpread {
        spread: Some(DUMMY_SP),
        expr: Box::new(expr),
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn ident(name: &str) -> Ident {
    Ident {
        span: DUMMY_SP,
        sym: name.into(),
        ctxt: Default::default(),
        optional: false,
    }
}

/// Single-quoted module specifier; `raw` carries the escaped source text.
fn module_str(path: &str, span: Span) -> Str {
    let specifier = module_specifier(path);
    let raw = format!("'{}'", sanitize(path));
    Str {
        span,
        value: specifier.as_str().into(),
        raw: Some(raw.into()),
    }
}
