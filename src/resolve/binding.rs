//! Deriving the readable binding name of a confirmed hook declaration.

use swc_ecma_ast::{Expr, Lit, MemberProp, Pat, VarDeclarator};

use crate::resolve::classify::node_contains_readable_binding;
use crate::resolve::collect::HookCandidate;

/// Derive the variable name a developer reads as the hook's value.
///
/// `pool` is the file's remaining candidate pool with `confirmed` already
/// removed. When the confirmed declarator does not carry a readable name
/// itself, it binds an intermediate alias (`const countState =
/// useState(1);`) and the name is recovered from the declarators that
/// read the alias:
///
/// - exactly one reader takes the name directly,
/// - exactly two readers mirror the `[value, setter]` pair as indexed
///   accesses, and the one reading index `0` carries the name,
/// - anything else is ambiguous and falls back to the alias identifier.
///
/// Returns `None` when no unambiguous name exists.
pub fn derive_hook_name(
    confirmed: &HookCandidate,
    pool: &[HookCandidate],
    is_custom_hook: bool,
) -> Option<String> {
    if node_contains_readable_binding(&confirmed.decl) {
        return binding_name(&confirmed.decl, is_custom_hook);
    }

    let Pat::Ident(alias) = &confirmed.decl.name else {
        return None;
    };
    let alias = alias.id.sym.as_str();

    let readers: Vec<&HookCandidate> = pool
        .iter()
        .filter(|candidate| reads_alias(&candidate.decl, alias))
        .collect();

    match readers.len() {
        1 => binding_name(&readers[0].decl, false),
        2 => {
            let mut value_readers = readers
                .iter()
                .filter(|candidate| accesses_index_zero(&candidate.decl));
            let value_reader = value_readers.next()?;
            if value_readers.next().is_some() {
                return None;
            }
            binding_name(&value_reader.decl, false)
        }
        _ => binding_name(&confirmed.decl, false),
    }
}

/// Check if the declarator's initializer reads `alias`, either whole
/// (`const [a, b] = alias;`) or through member access (`const a =
/// alias[0];`).
fn reads_alias(decl: &VarDeclarator, alias: &str) -> bool {
    match decl.init.as_deref() {
        Some(Expr::Member(member)) => {
            matches!(&*member.obj, Expr::Ident(object) if object.sym.as_str() == alias)
        }
        Some(Expr::Ident(ident)) => ident.sym.as_str() == alias,
        _ => false,
    }
}

fn accesses_index_zero(decl: &VarDeclarator) -> bool {
    let Some(Expr::Member(member)) = decl.init.as_deref() else {
        return false;
    };
    match &member.prop {
        MemberProp::Computed(computed) => {
            matches!(&*computed.expr, Expr::Lit(Lit::Num(index)) if index.value == 0.0)
        }
        _ => false,
    }
}

/// The name bound by a declarator: the first element of a destructuring
/// pattern, or the identifier itself.
///
/// For custom hooks a destructuring pattern is ambiguous (no element is
/// "the" value) and yields `None`.
pub fn binding_name(decl: &VarDeclarator, is_custom_hook: bool) -> Option<String> {
    match &decl.name {
        Pat::Array(array) => {
            if is_custom_hook {
                return None;
            }
            match array.elems.first()? {
                Some(Pat::Ident(ident)) => Some(ident.id.sym.to_string()),
                _ => None,
            }
        }
        Pat::Ident(ident) => Some(ident.id.sym.to_string()),
        _ => None,
    }
}
