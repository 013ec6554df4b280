//! The hook-name resolution pipeline.
//!
//! One call walks the observation tree, fetches every bundle it
//! references, follows each bundle's source map, and names every hook it
//! can. The feature is best-effort cosmetic: any failure narrows to the
//! affected file or hook, and a catastrophic failure returns the caller's
//! tree unchanged.

use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::Config;
use crate::fetch::ScriptSource;
use crate::hooks::merge::merge_named;
use crate::hooks::{HookNode, collect_source_urls, is_non_declarative_primitive};
use crate::resolve::binding::derive_hook_name;
use crate::resolve::caches::SourceCaches;
use crate::resolve::classify::is_confirmed_hook_declaration;
use crate::resolve::source_map::{PositionTranslator, extract_source_map_url};

pub mod binding;
pub mod caches;
pub mod classify;
pub mod collect;
pub mod parser;
pub mod source_map;

/// Resolve the original-source variable names of every hook in `hooks`.
///
/// Returns a new tree; the input is never mutated. On success every
/// resolvable hook carries a non-empty `hook_variable_name`; hooks that
/// cannot be resolved pass through unnamed, and on a catastrophic failure
/// the result equals the input.
pub async fn resolve_hook_names<S: ScriptSource>(
    source: &S,
    config: &Config,
    hooks: &[HookNode],
) -> Vec<HookNode> {
    HookNameResolver::new(source, config).resolve(hooks).await
}

/// Drives one resolution pass over a hook tree.
pub struct HookNameResolver<'a, S> {
    source: &'a S,
    config: &'a Config,
}

impl<'a, S: ScriptSource> HookNameResolver<'a, S> {
    pub fn new(source: &'a S, config: &'a Config) -> Self {
        Self { source, config }
    }

    pub async fn resolve(&self, hooks: &[HookNode]) -> Vec<HookNode> {
        match self.try_resolve(hooks).await {
            Ok(resolved) => {
                let mut merged = hooks.to_vec();
                merge_named(&mut merged, &resolved);
                merged
            }
            Err(err) => {
                warn!("hook name resolution failed: {err:#}");
                hooks.to_vec()
            }
        }
    }

    async fn try_resolve(&self, hooks: &[HookNode]) -> Result<Vec<HookNode>> {
        let mut resolved = hooks.to_vec();

        let bundle_urls = collect_source_urls(hooks);
        if bundle_urls.is_empty() {
            return Ok(resolved);
        }

        // Fetch every referenced bundle; a failed fetch only loses the
        // names of that file's hooks.
        let mut bundles = Vec::new();
        for url in &bundle_urls {
            match self.source.fetch(url).await {
                Ok(file) => bundles.push(file),
                Err(err) => warn!("failed to fetch bundle {url}: {err:#}"),
            }
        }

        // Link each bundle to its source map.
        let mut map_links: Vec<(String, String)> = Vec::new();
        for bundle in &bundles {
            match extract_source_map_url(&bundle.url, &bundle.text) {
                Ok(Some(map_url)) => map_links.push((bundle.url.clone(), map_url)),
                Ok(None) => debug!("no sourceMappingURL in {}", bundle.url),
                Err(err) => warn!("skipping {}: {err:#}", bundle.url),
            }
        }

        // Fetch and decode each map in isolation; one bad map must not
        // poison the others. Translators stay alive for the whole call
        // because sub-hook recursion may cross bundle groups.
        let mut translators: HashMap<String, PositionTranslator> = HashMap::new();
        for (bundle_url, map_url) in &map_links {
            let map_file = match self.source.fetch(map_url).await {
                Ok(file) => file,
                Err(err) => {
                    warn!("failed to fetch source map {map_url}: {err:#}");
                    continue;
                }
            };
            match PositionTranslator::new(&map_file.text, self.config.max_source_lines) {
                Ok(translator) => {
                    translators.insert(bundle_url.clone(), translator);
                }
                Err(err) => warn!("failed to decode source map {map_url}: {err:#}"),
            }
        }

        // Resolve bundle by bundle, hooks in tree order within each.
        let mut caches = SourceCaches::default();
        for (bundle_url, _) in &map_links {
            if !translators.contains_key(bundle_url) {
                continue;
            }
            resolve_group(&mut resolved, bundle_url, &translators, &mut caches);
        }

        Ok(resolved)
    }
}

fn hook_file(hook: &HookNode) -> Option<&str> {
    hook.hook_source.as_ref()?.file_name.as_deref()
}

/// Visit every hook in the tree, at any depth, whose source file is this
/// group's bundle.
///
/// A hook that belongs to another translated bundle is left to that
/// group, which also decides whether its sub-hooks are visited. A hook
/// whose file produced no translator at all is scanned through, so an
/// unreachable ancestor cannot orphan a resolvable descendant.
fn resolve_group(
    hooks: &mut [HookNode],
    bundle_url: &str,
    translators: &HashMap<String, PositionTranslator>,
    caches: &mut SourceCaches,
) {
    for hook in hooks {
        let file_name = hook_file(hook);
        let in_group = file_name == Some(bundle_url);
        let belongs_elsewhere =
            !in_group && file_name.is_some_and(|file_name| translators.contains_key(file_name));

        if in_group {
            resolve_hook(hook, translators, caches);
        } else if !belongs_elsewhere {
            resolve_group(&mut hook.sub_hooks, bundle_url, translators, caches);
        }
    }
}

/// Name one hook, then descend into its sub-hooks when the tree continues
/// below it.
///
/// Custom hooks always descend: the primitives inside them are worth
/// naming whatever happened to the custom hook itself. Other hooks
/// descend once their confirmed declarator was found, even when the
/// binding itself stayed ambiguous and yielded no name.
fn resolve_hook(
    hook: &mut HookNode,
    translators: &HashMap<String, PositionTranslator>,
    caches: &mut SourceCaches,
) {
    let resolution = hook_binding(hook, translators, caches);
    hook.hook_variable_name = resolution.name.filter(|name| !name.is_empty());

    if hook.is_custom() || resolution.found {
        for sub_hook in &mut hook.sub_hooks {
            resolve_hook(sub_hook, translators, caches);
        }
    }
}

/// Outcome of one hook's lookup: whether a confirmed declarator was
/// matched at the translated position, and the derived name if any.
struct HookResolution {
    found: bool,
    name: Option<String>,
}

impl HookResolution {
    fn miss() -> Self {
        Self {
            found: false,
            name: None,
        }
    }
}

/// The per-hook pipeline: translate the bundled position, parse and
/// collect on first touch, match the confirmed declarator at the
/// translated line, and derive its binding name.
fn hook_binding(
    hook: &HookNode,
    translators: &HashMap<String, PositionTranslator>,
    caches: &mut SourceCaches,
) -> HookResolution {
    let Some(hook_source) = hook.hook_source.as_ref() else {
        return HookResolution::miss();
    };
    let Some(file_name) = hook_source.file_name.as_deref() else {
        return HookResolution::miss();
    };
    let Some(translator) = translators.get(file_name) else {
        return HookResolution::miss();
    };
    let (Some(line), Some(column)) = (hook_source.line_number, hook_source.column_number) else {
        return HookResolution::miss();
    };

    let position = match translator.translate(line, column) {
        Ok(position) => position,
        Err(err) => {
            warn!("could not translate {file_name}:{line}:{column}: {err:#}");
            return HookResolution::miss();
        }
    };

    let Some(pool) = caches.candidate_pool(&position.source, &position.file_content) else {
        return HookResolution::miss();
    };
    let index = pool.iter().position(|candidate| {
        candidate.line == position.line && is_confirmed_hook_declaration(&candidate.decl)
    });
    let Some(index) = index else {
        if is_non_declarative_primitive(&hook.name) {
            debug!(
                "{} at {}:{} declares no binding",
                hook.name, position.source, position.line
            );
        } else {
            debug!(
                "no hook declaration at {}:{} for {}",
                position.source, position.line, hook.name
            );
        }
        return HookResolution::miss();
    };

    // Consume the confirmed declarator so a later hook at the same
    // position binds the next declarator, not this one again.
    let confirmed = pool.remove(index);
    HookResolution {
        found: true,
        name: derive_hook_name(&confirmed, pool, hook.is_custom()),
    }
}
