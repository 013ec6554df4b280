//! Per-call caches shared by every hook of one resolve invocation.

use std::collections::HashMap;

use tracing::warn;

use crate::resolve::collect::{HookCandidate, collect_potential_hook_declarations};
use crate::resolve::parser::{ParsedSource, parse_source};

/// Parsed ASTs and candidate pools, keyed by original-source path.
///
/// Each original source is parsed at most once per call — parse failures
/// are memoized, so a broken file taints its own hooks exactly once — and
/// its candidate pool is collected at most once. Pools are handed out
/// mutably: the orchestrator consumes each confirmed declarator it
/// matches, so repeated lookups at one position bind distinct declarators.
#[derive(Default)]
pub struct SourceCaches {
    parsed: HashMap<String, Option<ParsedSource>>,
    pools: HashMap<String, Vec<HookCandidate>>,
}

impl SourceCaches {
    /// The candidate pool of `source`, parsing and collecting on first
    /// touch. `None` when the source does not parse.
    pub fn candidate_pool(&mut self, source: &str, content: &str) -> Option<&mut Vec<HookCandidate>> {
        if !self.pools.contains_key(source) {
            let parsed = Self::ensure_parsed(&mut self.parsed, source, content)?;
            let pool = collect_potential_hook_declarations(parsed);
            self.pools.insert(source.to_string(), pool);
        }
        self.pools.get_mut(source)
    }

    fn ensure_parsed<'a>(
        parsed: &'a mut HashMap<String, Option<ParsedSource>>,
        source: &str,
        content: &str,
    ) -> Option<&'a ParsedSource> {
        parsed
            .entry(source.to_string())
            .or_insert_with(|| match parse_source(content.to_string(), source) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warn!("failed to parse {source}: {err:#}");
                    None
                }
            })
            .as_ref()
    }
}
