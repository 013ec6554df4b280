//! The hook observation model.
//!
//! Mirrors the wire shape the devtools runtime reports for each component:
//! a tree of hook invocations, each carrying the bundled-source position it
//! was called from. The resolver enriches this tree with
//! `hookVariableName`; everything else passes through untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub mod merge;

/// One observed hook invocation.
///
/// `id` is the primitive-hook index assigned by the runtime; custom hooks
/// carry no index. `value` is opaque to the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookNode {
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub sub_hooks: Vec<HookNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_source: Option<HookSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_variable_name: Option<String>,
}

/// Where the runtime observed the hook call, in bundled coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSource {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub line_number: Option<u32>,
    #[serde(default)]
    pub column_number: Option<u32>,
    #[serde(default)]
    pub function_name: Option<String>,
}

impl HookNode {
    /// Custom hooks are the ones the runtime gives no primitive index.
    pub fn is_custom(&self) -> bool {
        self.id.is_none()
    }
}

/// Primitive hooks whose result is never bound to a variable.
pub const NON_DECLARATIVE_PRIMITIVES: &[&str] =
    &["Effect", "ImperativeHandle", "LayoutEffect", "DebugValue"];

/// Check if a primitive hook name never declares a binding (e.g. a bare
/// `useEffect(...)` call).
pub fn is_non_declarative_primitive(name: &str) -> bool {
    NON_DECLARATIVE_PRIMITIVES.contains(&name)
}

/// Collect the unique bundle URLs referenced anywhere in a hook tree.
///
/// Hooks without a file name are skipped; they can never be resolved.
/// The set is ordered so fetches happen in a deterministic order.
pub fn collect_source_urls(hooks: &[HookNode]) -> BTreeSet<String> {
    let mut urls = BTreeSet::new();
    collect_into(hooks, &mut urls);
    urls
}

fn collect_into(hooks: &[HookNode], urls: &mut BTreeSet<String>) {
    for hook in hooks {
        if let Some(source) = &hook.hook_source
            && let Some(file_name) = &source.file_name
        {
            urls.insert(file_name.clone());
        }
        collect_into(&hook.sub_hooks, urls);
    }
}

#[cfg(test)]
mod tests {
    use crate::hooks::*;

    fn hook_at(file_name: Option<&str>, sub_hooks: Vec<HookNode>) -> HookNode {
        HookNode {
            id: Some(0),
            name: "State".to_string(),
            value: serde_json::Value::Null,
            sub_hooks,
            hook_source: Some(HookSource {
                file_name: file_name.map(str::to_string),
                line_number: Some(1),
                column_number: Some(0),
                function_name: None,
            }),
            hook_variable_name: None,
        }
    }

    #[test]
    fn test_collect_source_urls_recurses_and_dedupes() {
        let hooks = vec![
            hook_at(
                Some("https://cdn.test/a.js"),
                vec![hook_at(Some("https://cdn.test/b.js"), Vec::new())],
            ),
            hook_at(Some("https://cdn.test/a.js"), Vec::new()),
            hook_at(None, Vec::new()),
        ];

        let urls = collect_source_urls(&hooks);
        assert_eq!(
            urls.into_iter().collect::<Vec<_>>(),
            vec!["https://cdn.test/a.js", "https://cdn.test/b.js"]
        );
    }

    #[test]
    fn test_non_declarative_primitives() {
        assert!(is_non_declarative_primitive("Effect"));
        assert!(is_non_declarative_primitive("LayoutEffect"));
        assert!(is_non_declarative_primitive("ImperativeHandle"));
        assert!(is_non_declarative_primitive("DebugValue"));
        assert!(!is_non_declarative_primitive("State"));
        assert!(!is_non_declarative_primitive("Reducer"));
        assert!(!is_non_declarative_primitive("Ref"));
    }

    #[test]
    fn test_custom_hooks_have_no_id() {
        let mut hook = hook_at(Some("https://cdn.test/a.js"), Vec::new());
        assert!(!hook.is_custom());
        hook.id = None;
        assert!(hook.is_custom());
    }

    #[test]
    fn test_wire_shape_round_trip() {
        let json = r#"{
            "id": 0,
            "name": "State",
            "value": 1,
            "subHooks": [],
            "hookSource": {
                "fileName": "https://cdn.test/bundle.js",
                "lineNumber": 3,
                "columnNumber": 12,
                "functionName": "Counter"
            }
        }"#;

        let hook: HookNode = serde_json::from_str(json).unwrap();
        assert_eq!(hook.id, Some(0));
        assert_eq!(hook.name, "State");
        assert_eq!(
            hook.hook_source.as_ref().unwrap().file_name.as_deref(),
            Some("https://cdn.test/bundle.js")
        );
        assert_eq!(hook.hook_variable_name, None);

        let serialized = serde_json::to_value(&hook).unwrap();
        assert_eq!(serialized["subHooks"], serde_json::json!([]));
        // Unresolved names stay absent on the wire.
        assert!(serialized.get("hookVariableName").is_none());
    }
}
