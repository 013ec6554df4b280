//! Collecting the candidate declarators of one original source.

use swc_common::SourceMap;
use swc_ecma_ast::{Expr, VarDeclarator};
use swc_ecma_visit::{Visit, VisitWith};

use crate::resolve::classify::{call_callee, is_hook};
use crate::resolve::parser::ParsedSource;

/// A declarator that could take part in a hook binding, paired with its
/// 1-based start line in the original source.
#[derive(Debug, Clone)]
pub struct HookCandidate {
    pub decl: VarDeclarator,
    pub line: usize,
}

struct DeclarationCollector<'a> {
    source_map: &'a SourceMap,
    candidates: Vec<HookCandidate>,
}

impl Visit for DeclarationCollector<'_> {
    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if let Some(init) = node.init.as_deref() {
            let related = match init {
                // `const [count, setCount] = useState(1);`
                Expr::Call(call) => call_callee(call).is_some_and(is_hook),
                // `const count = countState[0];`
                Expr::Member(_) => true,
                // `const [count, setCount] = countState;`
                Expr::Ident(_) => true,
                _ => false,
            };
            if related {
                let line = self.source_map.lookup_char_pos(node.span.lo).line;
                self.candidates.push(HookCandidate {
                    decl: node.clone(),
                    line,
                });
            }
        }
        node.visit_children_with(self);
    }
}

/// Walk the AST once and return every declarator potentially related to a
/// hook, in source order.
pub fn collect_potential_hook_declarations(parsed: &ParsedSource) -> Vec<HookCandidate> {
    let mut collector = DeclarationCollector {
        source_map: &parsed.source_map,
        candidates: Vec::new(),
    };
    parsed.program.visit_with(&mut collector);
    collector.candidates
}
