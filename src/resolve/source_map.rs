//! Locating source maps and translating bundled positions.

use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;
use sourcemap::DecodedMap;
use url::Url;

/// The trailing magic comment a bundler appends to link its source map.
static SOURCE_MAPPING_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)//[#@] ?sourceMappingURL=([^\s'"]+)\s*$"#).unwrap());

/// Extract the absolute source-map URL of a bundled script.
///
/// Returns `Ok(None)` when the bundle carries no `sourceMappingURL`
/// comment. More than one comment is ambiguous and fails. A relative
/// token is resolved against the bundle URL's directory.
pub fn extract_source_map_url(bundle_url: &str, bundle_text: &str) -> Result<Option<String>> {
    let mut captures = SOURCE_MAPPING_URL_REGEX.captures_iter(bundle_text);
    let Some(first) = captures.next() else {
        return Ok(None);
    };
    if captures.next().is_some() {
        bail!("multiple sourceMappingURL comments in {}", bundle_url);
    }

    let token = &first[1];
    let base = Url::parse(bundle_url)
        .with_context(|| format!("bundle URL {} is not absolute", bundle_url))?;
    let resolved = base
        .join(token)
        .with_context(|| format!("cannot resolve sourceMappingURL {} against {}", token, bundle_url))?;
    Ok(Some(resolved.to_string()))
}

/// A bundled position translated back to its original source.
#[derive(Debug)]
pub struct TranslatedPosition {
    /// Virtual path of the original source within the map.
    pub source: String,
    /// 1-based line in the original source.
    pub line: usize,
    /// The original source text embedded in the map.
    pub file_content: String,
}

/// Wraps one decoded source map and answers position lookups against it.
pub struct PositionTranslator {
    map: sourcemap::SourceMap,
    max_source_lines: u32,
}

impl PositionTranslator {
    /// Decode a source-map document. Indexed maps are flattened.
    pub fn new(map_text: &str, max_source_lines: u32) -> Result<Self> {
        let map = match sourcemap::decode_slice(map_text.as_bytes())? {
            DecodedMap::Regular(map) => map,
            DecodedMap::Index(index) => index.flatten()?,
            _ => bail!("unsupported source map flavor"),
        };
        Ok(Self {
            map,
            max_source_lines,
        })
    }

    /// Translate a bundled position (1-based line) to its original source.
    ///
    /// Fails when nothing maps there, when the map embeds no content for
    /// the source, or when the translated line exceeds the configured
    /// bound (the original file is treated as too large to parse safely).
    pub fn translate(&self, line: u32, column: u32) -> Result<TranslatedPosition> {
        let token = self
            .map
            .lookup_token(line.saturating_sub(1), column)
            .ok_or_else(|| anyhow!("no mapping at line {}, column {}", line, column))?;

        let original_line = token.get_src_line() + 1;
        if original_line > self.max_source_lines {
            bail!(
                "translated line {} exceeds the {} line bound",
                original_line,
                self.max_source_lines
            );
        }

        let source = token
            .get_source()
            .ok_or_else(|| anyhow!("mapping at line {}, column {} has no source", line, column))?;
        let file_content = self
            .map
            .get_source_contents(token.get_src_id())
            .ok_or_else(|| anyhow!("source map embeds no content for {}", source))?;

        Ok(TranslatedPosition {
            source: source.to_string(),
            line: original_line as usize,
            file_content: file_content.to_string(),
        })
    }
}
