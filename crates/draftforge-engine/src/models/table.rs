use serde::Serialize;

/// Header labels of a parsed table. `col3` is present only for a 3-column
/// decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableHeaders {
    pub col1: String,
    pub col2: String,
    pub col3: Option<String>,
}

/// One data row. Extra fields beyond the decided column count are discarded
/// by the parser, not merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub col1: String,
    pub col2: String,
    pub col3: Option<String>,
}

/// Result of the smart table parser, produced independently of sections from
/// raw delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRecord {
    pub title: String,
    /// Always 2 or 3.
    pub column_count: u8,
    pub headers: TableHeaders,
    pub rows: Vec<TableRow>,
}
