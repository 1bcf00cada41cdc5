pub mod reader;
pub mod record;
pub mod tokenizer;

pub use reader::{ParseSummary, parse_all};
pub use record::{AlbLogRecord, EXPECTED_FIELDS, NUMERIC_SENTINEL, ParseError};
pub use tokenizer::tokenize;
