//! Predicates deciding which AST nodes take part in hook bindings.
//!
//! All of these are pure functions over `swc_ecma_ast` nodes; the
//! orchestrator and the binding resolver compose them.

use std::sync::LazyLock;

use regex::Regex;
use swc_ecma_ast::{CallExpr, Callee, Expr, MemberExpr, MemberProp, Pat, VarDeclarator};

/// The hook naming convention: `use` followed by an uppercase letter or a
/// digit. Rejects lookalikes such as `user` or `used`.
static HOOK_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^use[A-Z0-9].*$").unwrap());

pub fn is_hook_name(name: &str) -> bool {
    HOOK_NAME_REGEX.is_match(name)
}

/// Check if a callee expression denotes a hook: a hook-named identifier,
/// or a hook-named property reached through a PascalCase namespace
/// (`React.useState`). Computed access never qualifies.
pub fn is_hook(expr: &Expr) -> bool {
    match expr {
        Expr::Ident(ident) => is_hook_name(ident.sym.as_str()),
        Expr::Member(member) => is_namespaced_hook(member),
        _ => false,
    }
}

fn is_namespaced_hook(member: &MemberExpr) -> bool {
    let MemberProp::Ident(prop) = &member.prop else {
        return false;
    };
    let Expr::Ident(object) = &*member.obj else {
        return false;
    };
    object.sym.as_str().starts_with(|c: char| c.is_ascii_uppercase())
        && is_hook_name(prop.sym.as_str())
}

/// The callee expression of a call, if it has one (`super(...)` and
/// `import(...)` do not).
pub fn call_callee(call: &CallExpr) -> Option<&Expr> {
    match &call.callee {
        Callee::Expr(expr) => Some(expr),
        _ => None,
    }
}

/// A declarator is a confirmed hook declaration when it is initialized
/// directly from a hook call.
pub fn is_confirmed_hook_declaration(decl: &VarDeclarator) -> bool {
    let Some(Expr::Call(call)) = decl.init.as_deref() else {
        return false;
    };
    call_callee(call).is_some_and(is_hook)
}

/// Check if the declarator calls `useState` or `useReducer`, bare or
/// qualified through the `React` namespace.
pub fn is_state_or_reducer_hook(decl: &VarDeclarator) -> bool {
    let Some(Expr::Call(call)) = decl.init.as_deref() else {
        return false;
    };
    let Some(callee) = call_callee(call) else {
        return false;
    };
    is_react_function(callee, "useState") || is_react_function(callee, "useReducer")
}

fn is_react_function(expr: &Expr, function_name: &str) -> bool {
    match expr {
        Expr::Ident(ident) => ident.sym.as_str() == function_name,
        Expr::Member(member) => {
            matches!(&*member.obj, Expr::Ident(object) if object.sym.as_str() == "React")
                && matches!(&member.prop, MemberProp::Ident(prop) if prop.sym.as_str() == function_name)
        }
        _ => false,
    }
}

/// Check if the declarator itself carries the name a developer reads as
/// the hook's value.
///
/// Destructuring always does. A bare identifier does for every hook
/// except `useState`/`useReducer`, where the identifier only aliases the
/// state pair and the readable name is established by later readers.
pub fn node_contains_readable_binding(decl: &VarDeclarator) -> bool {
    match &decl.name {
        Pat::Array(_) => true,
        Pat::Ident(_) => !is_state_or_reducer_hook(decl),
        _ => false,
    }
}
