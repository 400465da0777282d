//! Input tables, file parsing and data dictionaries.

mod dictionary;
mod parser;
mod source;

pub use dictionary::DataDictionary;
pub use parser::{Parser, ParserConfig, is_missing_token};
pub use source::{Cell, CellKey, Column, ColumnData, SourceMetadata, StorageType, Table};
