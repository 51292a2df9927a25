//! Turns a response body into the tables it carries.

use std::io::Cursor;

use arrow_array::RecordBatch;

use crate::codec::{self, CodecError, Decoded};

/// Result of a span query.
#[derive(Debug, Clone, PartialEq)]
pub enum SpanQueryResult {
    /// The response carried exactly one non-empty table.
    Single(RecordBatch),
    /// The response carried several tables, one per submitted query, in order.
    Multiple(Vec<RecordBatch>),
}

impl SpanQueryResult {
    pub fn into_tables(self) -> Vec<RecordBatch> {
        match self {
            SpanQueryResult::Single(table) => vec![table],
            SpanQueryResult::Multiple(tables) => tables,
        }
    }
}

/// Decode every table in `body`, in arrival order.
pub fn decode_tables(body: &[u8]) -> Result<Vec<RecordBatch>, CodecError> {
    let mut cursor = Cursor::new(body);
    let mut tables = Vec::new();
    loop {
        match codec::try_decode_next(&mut cursor)? {
            Decoded::Table(table) => tables.push(table),
            Decoded::EndOfStream => break,
        }
    }
    log::debug!("decoded {} table(s) from {} bytes", tables.len(), body.len());
    Ok(tables)
}

/// Collapse decoded tables into a query result.
///
/// A lone table is returned directly, unless it has neither rows nor columns,
/// in which case there is no result. Several tables are returned as-is, empty
/// ones included.
pub fn collapse(mut tables: Vec<RecordBatch>) -> Option<SpanQueryResult> {
    match tables.len() {
        0 => None,
        1 => {
            let table = tables.remove(0);
            if table.num_rows() == 0 && table.num_columns() == 0 {
                None
            } else {
                Some(SpanQueryResult::Single(table))
            }
        }
        _ => Some(SpanQueryResult::Multiple(tables)),
    }
}
