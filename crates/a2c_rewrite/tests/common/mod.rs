//! Shared pipeline helpers for the transform tests.
//!
//! Both sides of every comparison run through the same parse → codegen
//! path, so assertions are independent of printer formatting.

use a2c_parser::{parse_module, ParseResult};
use a2c_rewrite::rewrite_module;
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};

fn print_module(parsed: &ParseResult, module: &swc_ecma_ast::Module) -> String {
    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(parsed.source_map.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default()
                .with_target(swc_ecma_ast::EsVersion::latest()),
            cm: parsed.source_map.clone(),
            comments: Some(&parsed.comments),
            wr: writer,
        };
        module.emit_with(&mut emitter).unwrap();
    }
    String::from_utf8(buf).unwrap()
}

pub fn transform(source: &str) -> String {
    let parsed = parse_module(source, "input.js").unwrap();
    let module = rewrite_module(parsed.module.clone(), &parsed.comments);
    print_module(&parsed, &module)
}

pub fn normalize(source: &str) -> String {
    let parsed = parse_module(source, "expected.js").unwrap();
    print_module(&parsed, &parsed.module)
}

#[track_caller]
pub fn assert_transforms(input: &str, expected: &str) {
    assert_eq!(transform(input).trim(), normalize(expected).trim());
}
