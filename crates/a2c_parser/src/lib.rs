//! JavaScript parser front-end for the AMD-to-CommonJS rewriter.
//!
//! Wraps the standard SWC parser and returns the parsed module together
//! with its comment side-table and source map. The rewriter consumes the
//! comment table to honour per-statement exemption markers and to carry
//! comments through to the printed output.

pub mod parse;

pub use parse::{parse_module, ParseResult};
