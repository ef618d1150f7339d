//! # Smart Table Parsing
//!
//! Heuristic parser that turns loosely delimited plain text into a
//! [`TableRecord`], independently of section classification. Tolerates a
//! title line, sniffs the delimiter from the first data line, and consumes a
//! header row when one plausibly exists. Non-tabular input yields `None`,
//! never an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::table::{TableHeaders, TableRecord, TableRow};

/// Vocabulary that marks a line as a header row regardless of field counts.
const HEADER_KEYWORDS: &[&str] = &[
    "service", "cost", "price", "item", "desc", "title", "timeline", "date", "qty", "quantity",
];

/// Headers used when no header row is detected.
const DEFAULT_HEADERS: [&str; 3] = ["Item", "Value", "Note"];

/// Fallback delimiter: a run of two or more spaces.
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").expect("space run"));

/// Delimiters in sniffing priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Tab,
    Comma,
    Equals,
    Colon,
    Spaces,
}

impl Delimiter {
    /// Sniff from a sample line, in priority order.
    fn detect(sample: &str) -> Self {
        if sample.contains('\t') {
            Delimiter::Tab
        } else if sample.contains(',') {
            Delimiter::Comma
        } else if sample.contains('=') {
            Delimiter::Equals
        } else if sample.contains(':') {
            Delimiter::Colon
        } else {
            Delimiter::Spaces
        }
    }

    /// Split a line into trimmed fields, keeping at most the first three.
    fn split(self, line: &str) -> Vec<String> {
        let fields: Vec<String> = match self {
            Delimiter::Tab => line.split('\t').map(str::to_string).collect(),
            Delimiter::Comma => line.split(',').map(str::to_string).collect(),
            Delimiter::Equals => line.split('=').map(str::to_string).collect(),
            Delimiter::Colon => line.split(':').map(str::to_string).collect(),
            Delimiter::Spaces => MULTI_SPACE.split(line).map(str::to_string).collect(),
        };
        fields
            .into_iter()
            .map(|f| f.trim().to_string())
            .take(3)
            .collect()
    }
}

/// Whether a line contains anything that could delimit fields.
fn has_delimiter_like(line: &str) -> bool {
    line.contains(['\t', ',', '=', ':']) || MULTI_SPACE.is_match(line)
}

/// Whether a line reads as a header row.
fn looks_like_header(line: &str, field_count: usize, second_field_count: usize) -> bool {
    let lower = line.to_lowercase();
    HEADER_KEYWORDS.iter().any(|kw| lower.contains(kw)) || field_count == second_field_count
}

/// Parse delimited text into a table, or `None` when the input holds no
/// tabular data at all.
pub fn parse_table(text: &str) -> Option<TableRecord> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return None;
    }

    // A first line with no delimiter, above one that has one, is the title.
    let (title, data) = if lines.len() >= 2 && !has_delimiter_like(lines[0]) && has_delimiter_like(lines[1])
    {
        (lines[0].to_string(), &lines[1..])
    } else {
        (String::new(), &lines[..])
    };

    let delimiter = Delimiter::detect(data[0]);

    // Decide whether the first data line is a header row.
    let (headers, rows_src) = if data.len() >= 2 {
        let first = delimiter.split(data[0]);
        let second = delimiter.split(data[1]);
        if looks_like_header(data[0], first.len(), second.len()) {
            (header_fields(&first), &data[1..])
        } else {
            (default_headers(), data)
        }
    } else {
        (default_headers(), data)
    };

    let rows: Vec<TableRow> = rows_src
        .iter()
        .map(|line| {
            let fields = delimiter.split(line);
            TableRow {
                col1: fields.first().cloned().unwrap_or_default(),
                col2: fields.get(1).cloned().unwrap_or_default(),
                col3: fields.get(2).cloned().filter(|f| !f.is_empty()),
            }
        })
        .collect();

    // Not a table: nothing ever split into a second field.
    if rows.iter().all(|r| r.col2.is_empty()) && headers.2.is_none() {
        log::debug!("rejecting non-tabular text ({} line(s))", lines.len());
        return None;
    }

    // Column decision: 3 only when a third column actually exists, either as
    // data or as an explicit header label. Row order cannot change this.
    let three_columns =
        rows.iter().any(|r| r.col3.is_some()) || headers.2.as_deref().is_some_and(|h| !h.is_empty());

    let record = if three_columns {
        TableRecord {
            title,
            column_count: 3,
            headers: TableHeaders {
                col1: headers.0,
                col2: headers.1,
                col3: Some(
                    headers
                        .2
                        .unwrap_or_else(|| DEFAULT_HEADERS[2].to_string()),
                ),
            },
            rows,
        }
    } else {
        TableRecord {
            title,
            column_count: 2,
            headers: TableHeaders {
                col1: headers.0,
                col2: headers.1,
                col3: None,
            },
            // Extra data beyond the second column is discarded, not merged.
            rows: rows
                .into_iter()
                .map(|r| TableRow { col3: None, ..r })
                .collect(),
        }
    };

    Some(record)
}

fn header_fields(fields: &[String]) -> (String, String, Option<String>) {
    (
        fields
            .first()
            .filter(|f| !f.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_HEADERS[0].to_string()),
        fields
            .get(1)
            .filter(|f| !f.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_HEADERS[1].to_string()),
        fields.get(2).filter(|f| !f.is_empty()).cloned(),
    )
}

fn default_headers() -> (String, String, Option<String>) {
    (
        DEFAULT_HEADERS[0].to_string(),
        DEFAULT_HEADERS[1].to_string(),
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tab_delimited_two_columns() {
        let record = parse_table("Name\tRole\nAli\tDeveloper\nSara\tDesigner").unwrap();
        assert_eq!(record.column_count, 2);
        assert_eq!(record.headers.col1, "Name");
        assert_eq!(record.headers.col2, "Role");
        assert_eq!(record.headers.col3, None);
        assert_eq!(record.rows.len(), 2);
        assert_eq!(record.rows[0].col1, "Ali");
        assert_eq!(record.rows[0].col2, "Developer");
        assert_eq!(record.rows[1].col1, "Sara");
        assert_eq!(record.rows[1].col2, "Designer");
    }

    #[test]
    fn empty_input_is_none() {
        assert_eq!(parse_table(""), None);
        assert_eq!(parse_table("   \n  \n"), None);
    }

    #[test]
    fn non_tabular_prose_is_none() {
        assert_eq!(parse_table("just a sentence\nand another one"), None);
    }

    #[test]
    fn title_line_is_detected() {
        let record = parse_table("Team\nName\tRole\nAli\tDeveloper").unwrap();
        assert_eq!(record.title, "Team");
        assert_eq!(record.headers.col1, "Name");
        assert_eq!(record.rows.len(), 1);
    }

    #[test]
    fn keyword_header_is_consumed() {
        let record = parse_table("Service, Cost\nDesign, 500\nBuild, 1500").unwrap();
        assert_eq!(record.headers.col1, "Service");
        assert_eq!(record.headers.col2, "Cost");
        assert_eq!(record.rows.len(), 2);
    }

    #[test]
    fn headerless_lines_get_default_headers() {
        // Differing field counts and no keyword: first line stays data.
        let record = parse_table("Design, 500\nBuild, 1500, rush").unwrap();
        assert_eq!(record.headers.col1, "Item");
        assert_eq!(record.headers.col2, "Value");
        assert_eq!(record.rows.len(), 2);
    }

    #[test]
    fn third_field_in_any_row_makes_three_columns() {
        let record = parse_table("Design, 500\nBuild, 1500, rush").unwrap();
        assert_eq!(record.column_count, 3);
        assert_eq!(record.headers.col3.as_deref(), Some("Note"));
        assert_eq!(record.rows[0].col3, None);
        assert_eq!(record.rows[1].col3.as_deref(), Some("rush"));
    }

    #[test]
    fn column_decision_is_stable_under_row_reorder() {
        let a = parse_table("Item, Cost\nDesign, 500\nBuild, 1500, rush").unwrap();
        let b = parse_table("Item, Cost\nBuild, 1500, rush\nDesign, 500").unwrap();
        assert_eq!(a.column_count, b.column_count);
        assert_eq!(a.column_count, 3);
    }

    #[test]
    fn two_column_decision_discards_extra_data() {
        let record = parse_table("Item, Cost\nDesign, 500\nBuild, 1500").unwrap();
        assert_eq!(record.column_count, 2);
        assert!(record.rows.iter().all(|r| r.col3.is_none()));
    }

    #[test]
    fn equals_delimiter_detected() {
        let record = parse_table("cost = 500\ntimeline = 3 weeks").unwrap();
        // "cost" keyword makes the first line a header.
        assert_eq!(record.headers.col1, "cost");
        assert_eq!(record.rows.len(), 1);
        assert_eq!(record.rows[0].col1, "timeline");
        assert_eq!(record.rows[0].col2, "3 weeks");
    }

    #[test]
    fn colon_delimiter_detected() {
        let record = parse_table("Client: Acme\nBudget: 500").unwrap();
        assert_eq!(record.rows[0].col2, "500");
    }

    #[test]
    fn multi_space_fallback_delimiter() {
        let record = parse_table("Qty   Price\nBolts   500\nNuts   210").unwrap();
        assert_eq!(record.headers.col1, "Qty");
        assert_eq!(record.headers.col2, "Price");
        assert_eq!(record.rows.len(), 2);
        assert_eq!(record.rows[0].col1, "Bolts");
        assert_eq!(record.rows[0].col2, "500");
    }

    #[test]
    fn tab_beats_comma_in_priority() {
        let record = parse_table("a, x\tb\nc\td, y").unwrap();
        assert_eq!(record.rows[0].col1, "c");
        assert_eq!(record.rows[0].col2, "d, y");
    }

    #[test]
    fn fields_are_trimmed() {
        let record = parse_table("Item , Cost \n Design ,  500 ").unwrap();
        assert_eq!(record.rows[0].col1, "Design");
        assert_eq!(record.rows[0].col2, "500");
    }
}
