//! Folding resolved names back into the caller's tree.

use crate::hooks::HookNode;

/// Write the `hook_variable_name`s of `resolved` into `target` at parallel
/// positions.
///
/// A pair is merged only when the ids match; sub-hooks are visited only
/// when both sides report the same number of them. Every other field of
/// `target` is left untouched, so the caller's tree keeps its identity.
pub fn merge_named(target: &mut [HookNode], resolved: &[HookNode]) {
    for (hook, named) in target.iter_mut().zip(resolved) {
        if hook.id != named.id {
            continue;
        }
        hook.hook_variable_name = named.hook_variable_name.clone();
        if hook.sub_hooks.len() == named.sub_hooks.len() {
            merge_named(&mut hook.sub_hooks, &named.sub_hooks);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::hooks::merge::*;
    use crate::hooks::HookNode;

    fn hook(id: Option<i64>, name: &str, sub_hooks: Vec<HookNode>) -> HookNode {
        HookNode {
            id,
            name: name.to_string(),
            value: serde_json::Value::Null,
            sub_hooks,
            hook_source: None,
            hook_variable_name: None,
        }
    }

    fn named(mut node: HookNode, variable: &str) -> HookNode {
        node.hook_variable_name = Some(variable.to_string());
        node
    }

    #[test]
    fn test_merge_writes_names_at_matching_positions() {
        let mut target = vec![hook(Some(0), "State", Vec::new()), hook(Some(1), "Ref", Vec::new())];
        let resolved = vec![
            named(hook(Some(0), "State", Vec::new()), "count"),
            named(hook(Some(1), "Ref", Vec::new()), "inputRef"),
        ];

        merge_named(&mut target, &resolved);
        assert_eq!(target[0].hook_variable_name.as_deref(), Some("count"));
        assert_eq!(target[1].hook_variable_name.as_deref(), Some("inputRef"));
    }

    #[test]
    fn test_merge_skips_id_mismatch() {
        let mut target = vec![hook(Some(0), "State", Vec::new())];
        let resolved = vec![named(hook(Some(7), "State", Vec::new()), "count")];

        merge_named(&mut target, &resolved);
        assert_eq!(target[0].hook_variable_name, None);
    }

    #[test]
    fn test_merge_recurses_only_on_equal_sub_hook_counts() {
        let sub = hook(Some(0), "State", Vec::new());
        let mut target = vec![hook(None, "CustomHook", vec![sub.clone()])];

        // Same length: the sub-hook name lands.
        let resolved = vec![hook(
            None,
            "CustomHook",
            vec![named(sub.clone(), "flag")],
        )];
        merge_named(&mut target, &resolved);
        assert_eq!(target[0].sub_hooks[0].hook_variable_name.as_deref(), Some("flag"));

        // Different length: sub-hooks stay untouched.
        let mut target = vec![hook(None, "CustomHook", vec![sub.clone()])];
        let resolved = vec![hook(
            None,
            "CustomHook",
            vec![named(sub.clone(), "flag"), named(sub, "other")],
        )];
        merge_named(&mut target, &resolved);
        assert_eq!(target[0].sub_hooks[0].hook_variable_name, None);
    }

    #[test]
    fn test_merge_preserves_structure_and_fields() {
        let mut target = vec![hook(Some(0), "State", Vec::new())];
        target[0].value = serde_json::json!(42);
        let resolved = vec![named(hook(Some(0), "State", Vec::new()), "count")];

        merge_named(&mut target, &resolved);
        assert_eq!(target[0].value, serde_json::json!(42));
        assert_eq!(target[0].name, "State");
        assert_eq!(target.len(), 1);
    }
}
