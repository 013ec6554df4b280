//! Shared fixtures for the pipeline tests: hook-tree builders and a
//! minimal source-map encoder so translation exercises the production
//! decode path.

use hookscope::{HookNode, HookSource, StaticScriptSource};

pub const BUNDLE_URL: &str = "https://cdn.test/static/js/main.js";
pub const MAP_URL: &str = "https://cdn.test/static/js/main.js.map";

const BASE64_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn encode_vlq(out: &mut String, value: i64) {
    let mut vlq: u64 = if value < 0 {
        (((-value) as u64) << 1) | 1
    } else {
        (value as u64) << 1
    };
    loop {
        let mut digit = (vlq & 0b1_1111) as usize;
        vlq >>= 5;
        if vlq > 0 {
            digit |= 0b10_0000;
        }
        out.push(BASE64_CHARS[digit] as char);
        if vlq == 0 {
            break;
        }
    }
}

/// Build a standard source-map JSON document for one original source with
/// embedded content.
///
/// `mappings` entries are `(generated_line, generated_column,
/// original_line, original_column)`, all 0-based and sorted by generated
/// position.
pub fn source_map_json(source: &str, content: &str, mappings: &[(u32, u32, u32, u32)]) -> String {
    let mut encoded = String::new();
    let mut current_generated_line = 0u32;
    let mut previous_generated_column = 0i64;
    let mut previous_source_line = 0i64;
    let mut previous_source_column = 0i64;

    for &(generated_line, generated_column, original_line, original_column) in mappings {
        while current_generated_line < generated_line {
            encoded.push(';');
            current_generated_line += 1;
            previous_generated_column = 0;
        }
        if !encoded.is_empty() && !encoded.ends_with(';') {
            encoded.push(',');
        }
        encode_vlq(&mut encoded, generated_column as i64 - previous_generated_column);
        previous_generated_column = generated_column as i64;
        encode_vlq(&mut encoded, 0);
        encode_vlq(&mut encoded, original_line as i64 - previous_source_line);
        previous_source_line = original_line as i64;
        encode_vlq(&mut encoded, original_column as i64 - previous_source_column);
        previous_source_column = original_column as i64;
    }

    serde_json::json!({
        "version": 3,
        "sources": [source],
        "sourcesContent": [content],
        "names": [],
        "mappings": encoded,
    })
    .to_string()
}

/// A bundle (one generated line plus the map comment) and its map,
/// registered under the default URLs.
pub fn bundle_fixture(
    source_path: &str,
    content: &str,
    mappings: &[(u32, u32, u32, u32)],
) -> StaticScriptSource {
    StaticScriptSource::new()
        .with_file(
            BUNDLE_URL,
            "var app=run();\n//# sourceMappingURL=main.js.map\n",
        )
        .with_file(MAP_URL, source_map_json(source_path, content, mappings))
}

pub fn hook(id: Option<i64>, name: &str, file_name: &str, line: u32, column: u32) -> HookNode {
    HookNode {
        id,
        name: name.to_string(),
        value: serde_json::Value::Null,
        sub_hooks: Vec::new(),
        hook_source: Some(HookSource {
            file_name: Some(file_name.to_string()),
            line_number: Some(line),
            column_number: Some(column),
            function_name: None,
        }),
        hook_variable_name: None,
    }
}

pub fn with_sub_hooks(mut hook: HookNode, sub_hooks: Vec<HookNode>) -> HookNode {
    hook.sub_hooks = sub_hooks;
    hook
}

/// The recursive `(id, name, subHooks)` shape of a tree, for asserting
/// that resolution never disturbs structure.
pub fn structure(hooks: &[HookNode]) -> serde_json::Value {
    serde_json::Value::Array(
        hooks
            .iter()
            .map(|hook| {
                serde_json::json!({
                    "id": hook.id,
                    "name": hook.name,
                    "subHooks": structure(&hook.sub_hooks),
                })
            })
            .collect(),
    )
}
