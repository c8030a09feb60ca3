use a2c_ast::{EsVersion, Module};
use anyhow::Result;
use swc_common::{
    comments::SingleThreadedComments, errors::Handler, sync::Lrc, FileName, SourceMap,
};
use swc_ecma_parser::{EsSyntax, Syntax};

/// Result of parsing a JavaScript source file.
pub struct ParseResult {
    pub module: Module,
    /// Comment side-table keyed by byte position; the rewriter treats this
    /// as the statement-to-comments attachment relation.
    pub comments: SingleThreadedComments,
    pub source_map: Lrc<SourceMap>,
}

/// Parse a JavaScript source string, collecting comments.
pub fn parse_module(source: &str, filename: &str) -> Result<ParseResult> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        source.to_string(),
    );

    let comments = SingleThreadedComments::default();

    let handler =
        Handler::with_emitter_writer(Box::new(std::io::stderr()), Some(source_map.clone()));

    let syntax = Syntax::Es(EsSyntax {
        jsx: false,
        ..Default::default()
    });

    let module = swc_ecma_parser::parse_file_as_module(
        &source_file,
        syntax,
        EsVersion::latest(),
        Some(&comments),
        &mut vec![],
    )
    .map_err(|e| {
        e.into_diagnostic(&handler).emit();
        anyhow::anyhow!("failed to parse {filename}")
    })?;

    Ok(ParseResult {
        module,
        comments,
        source_map,
    })
}
