use anyhow::{Result, anyhow};
use swc_common::{FileName, SourceMap, sync::Lrc};
use swc_ecma_ast::Program;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// An original source parsed into an AST, with the source map needed to
/// turn byte positions back into line numbers.
pub struct ParsedSource {
    pub program: Program,
    pub source_map: Lrc<SourceMap>,
}

/// Parse an original source string into an AST.
///
/// Source-map `sources` entries are virtual paths, and the files behind
/// them can be either scripts or modules, so the program form is detected
/// rather than assumed. JSX and TypeScript syntax are always enabled.
pub fn parse_source(code: String, file_path: &str) -> Result<ParsedSource> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(FileName::Custom(file_path.into()).into(), code);

    let syntax = Syntax::Typescript(TsSyntax {
        tsx: true,
        ..Default::default()
    });
    let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);
    let program = parser
        .parse_program()
        .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

    Ok(ParsedSource {
        program,
        source_map,
    })
}
