//! Arrow IPC stream encoding and incremental decoding.
//!
//! A response body is a sequence of complete Arrow IPC streams laid end to
//! end with no count in front. Each stream (schema, record batches, end
//! marker) decodes to one table.

use std::io::Cursor;

use arrow_array::RecordBatch;
use arrow_ipc::reader::StreamReader;
use arrow_ipc::writer::StreamWriter;
use arrow_schema::ArrowError;
use arrow_select::concat::concat_batches;

/// End-of-stream marker: continuation token followed by a zero length.
const END_MARKER: [u8; 8] = [0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00];
/// Pre-0.15 end-of-stream marker.
const LEGACY_END_MARKER: [u8; 4] = [0x00, 0x00, 0x00, 0x00];

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("malformed Arrow stream at byte {offset}: {source}")]
    Malformed {
        offset: u64,
        #[source]
        source: ArrowError,
    },

    #[error("failed to encode table: {0}")]
    Encode(#[source] ArrowError),
}

/// Outcome of one decode step.
#[derive(Debug)]
pub enum Decoded {
    Table(RecordBatch),
    /// Nothing but (optionally) an end marker is left at the cursor.
    EndOfStream,
}

/// Write `table` as a single schema-prefixed Arrow IPC stream.
pub fn encode_table(table: &RecordBatch) -> Result<Vec<u8>, CodecError> {
    let mut writer =
        StreamWriter::try_new(Vec::new(), &table.schema()).map_err(CodecError::Encode)?;
    writer.write(table).map_err(CodecError::Encode)?;
    writer.finish().map_err(CodecError::Encode)?;
    writer.into_inner().map_err(CodecError::Encode)
}

/// Decode the next stream starting at the cursor's position.
///
/// On success the cursor is left just past the stream's end marker, ready for
/// the next call. Returns [`Decoded::EndOfStream`] when the remaining bytes are
/// empty or only an end marker. Any other unparsable remainder is an error.
pub fn try_decode_next(cursor: &mut Cursor<&[u8]>) -> Result<Decoded, CodecError> {
    let offset = cursor.position();
    let data: &[u8] = *cursor.get_ref();
    let rest = data.get(offset as usize..).unwrap_or_default();
    if is_exhausted(rest) {
        cursor.set_position(data.len() as u64);
        return Ok(Decoded::EndOfStream);
    }

    let malformed = |source| CodecError::Malformed { offset, source };

    let reader = StreamReader::try_new(&mut *cursor, None).map_err(malformed)?;
    let schema = reader.schema();
    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(malformed)?;
    let table = concat_batches(&schema, &batches).map_err(malformed)?;
    Ok(Decoded::Table(table))
}

fn is_exhausted(rest: &[u8]) -> bool {
    rest.is_empty() || rest == END_MARKER || rest == LEGACY_END_MARKER
}
