// Field extraction from fetched profile pages

pub mod gfg_parser;

pub use gfg_parser::{parse_stats, FieldExtractor, TextPatternExtractor};
