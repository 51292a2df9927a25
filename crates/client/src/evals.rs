//! Evaluation results and their canonical tabular form.
//!
//! On the wire an evaluation is an Arrow table whose schema metadata carries
//! a JSON document under the `arize` key naming the evaluation.

use std::sync::Arc;

use arrow_array::RecordBatch;
use arrow_schema::ArrowError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const EVAL_METADATA_KEY: &str = "arize";

#[derive(Debug, thiserror::Error)]
pub enum EvaluationsError {
    #[error("table has no `arize` schema metadata")]
    MissingMetadata,

    #[error("invalid evaluation metadata: {0}")]
    InvalidMetadata(#[from] serde_json::Error),

    #[error("{kind:?} require a `{column}` column")]
    MissingColumn {
        kind: EvaluationKind,
        column: &'static str,
    },

    #[error("failed to attach evaluation metadata: {0}")]
    Arrow(#[from] ArrowError),
}

/// What an evaluation scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationKind {
    SpanEvaluations,
    DocumentEvaluations,
    TraceEvaluations,
}

impl EvaluationKind {
    /// Columns identifying the scored entity.
    pub fn index_columns(&self) -> &'static [&'static str] {
        match self {
            EvaluationKind::SpanEvaluations => &["context.span_id"],
            EvaluationKind::DocumentEvaluations => &["context.span_id", "document_position"],
            EvaluationKind::TraceEvaluations => &["context.trace_id"],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct EvalMetadata {
    eval_id: Uuid,
    eval_name: String,
    eval_type: EvaluationKind,
}

/// A named table of evaluation results.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluations {
    pub eval_name: String,
    pub eval_id: Uuid,
    pub kind: EvaluationKind,
    /// The scores, without the evaluation metadata.
    pub table: RecordBatch,
}

impl Evaluations {
    pub fn try_new(
        kind: EvaluationKind,
        eval_name: impl Into<String>,
        table: RecordBatch,
    ) -> Result<Self, EvaluationsError> {
        check_index_columns(kind, &table)?;
        Ok(Evaluations {
            eval_name: eval_name.into(),
            eval_id: Uuid::new_v4(),
            kind,
            table,
        })
    }

    /// The table with the evaluation metadata attached to its schema.
    pub fn to_table(&self) -> Result<RecordBatch, EvaluationsError> {
        let metadata = serde_json::to_string(&EvalMetadata {
            eval_id: self.eval_id,
            eval_name: self.eval_name.clone(),
            eval_type: self.kind,
        })?;

        let schema = self.table.schema();
        let mut schema_metadata = schema.metadata().clone();
        schema_metadata.insert(EVAL_METADATA_KEY.to_string(), metadata);
        let schema = Arc::new(schema.as_ref().clone().with_metadata(schema_metadata));
        Ok(RecordBatch::try_new(schema, self.table.columns().to_vec())?)
    }

    /// Parse a table produced by [`Evaluations::to_table`].
    pub fn from_table(table: RecordBatch) -> Result<Self, EvaluationsError> {
        let schema = table.schema();
        let mut schema_metadata = schema.metadata().clone();
        let raw = schema_metadata
            .remove(EVAL_METADATA_KEY)
            .ok_or(EvaluationsError::MissingMetadata)?;
        let metadata: EvalMetadata = serde_json::from_str(&raw)?;
        check_index_columns(metadata.eval_type, &table)?;

        let schema = Arc::new(schema.as_ref().clone().with_metadata(schema_metadata));
        Ok(Evaluations {
            eval_name: metadata.eval_name,
            eval_id: metadata.eval_id,
            kind: metadata.eval_type,
            table: RecordBatch::try_new(schema, table.columns().to_vec())?,
        })
    }
}

fn check_index_columns(kind: EvaluationKind, table: &RecordBatch) -> Result<(), EvaluationsError> {
    for &column in kind.index_columns() {
        if table.column_by_name(column).is_none() {
            return Err(EvaluationsError::MissingColumn { kind, column });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::{Float64Array, StringArray};
    use arrow_schema::{DataType, Field, Schema};
    use assert_matches::assert_matches;

    fn scores() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("context.span_id", DataType::Utf8, false),
            Field::new("score", DataType::Float64, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["b7ad6b7169203331"])),
                Arc::new(Float64Array::from(vec![0.9])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_table_round_trip() {
        let evals =
            Evaluations::try_new(EvaluationKind::SpanEvaluations, "relevance", scores()).unwrap();
        let table = evals.to_table().unwrap();

        let raw = table.schema().metadata().get(EVAL_METADATA_KEY).cloned().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["eval_name"], "relevance");
        assert_eq!(json["eval_type"], "SpanEvaluations");
        assert_eq!(json["eval_id"], evals.eval_id.to_string());

        let parsed = Evaluations::from_table(table).unwrap();
        assert_eq!(parsed, evals);
    }

    #[test]
    fn test_missing_metadata() {
        assert_matches!(
            Evaluations::from_table(scores()),
            Err(EvaluationsError::MissingMetadata)
        );
    }

    #[test]
    fn test_invalid_metadata() {
        let schema = scores()
            .schema()
            .as_ref()
            .clone()
            .with_metadata([(EVAL_METADATA_KEY.to_string(), "{}".to_string())].into());
        let table = scores().with_schema(Arc::new(schema)).unwrap();
        assert_matches!(
            Evaluations::from_table(table),
            Err(EvaluationsError::InvalidMetadata(_))
        );
    }

    #[test]
    fn test_document_evaluations_need_position() {
        assert_matches!(
            Evaluations::try_new(EvaluationKind::DocumentEvaluations, "ndcg", scores()),
            Err(EvaluationsError::MissingColumn {
                column: "document_position",
                ..
            })
        );
    }
}
