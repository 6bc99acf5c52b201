//! BigQuery Models
//!
//! Conversions between domain types and BigQuery REST payloads

use google_cloud_bigquery::http::dataset::{Dataset, DatasetReference};
use google_cloud_bigquery::http::table::{
    Table, TableFieldMode, TableFieldSchema, TableFieldType, TableReference, TableSchema,
};
use google_cloud_bigquery::http::tabledata::insert_all::{
    Error as InsertError, InsertAllRequest, Row,
};

use crate::domain::entities::table_schema::{
    ColumnMode, ColumnSpec, ColumnType, TABLE_FRIENDLY_NAME,
};
use crate::domain::entities::upload_batch::UploadBatch;
use crate::domain::entities::user_row::UserRow;
use crate::domain::repositories::warehouse_repository::RowInsertError;

pub fn to_field_schema(column: &ColumnSpec) -> TableFieldSchema {
    let data_type = match column.column_type {
        ColumnType::String => TableFieldType::String,
        ColumnType::Integer => TableFieldType::Integer,
        ColumnType::Boolean => TableFieldType::Boolean,
    };
    let mode = match column.mode {
        ColumnMode::Required => TableFieldMode::Required,
        ColumnMode::Nullable => TableFieldMode::Nullable,
    };

    TableFieldSchema {
        name: column.name.to_string(),
        data_type,
        mode: Some(mode),
        ..Default::default()
    }
}

pub fn build_dataset(project_id: &str, dataset_id: &str) -> Dataset {
    Dataset {
        dataset_reference: DatasetReference {
            project_id: project_id.to_string(),
            dataset_id: dataset_id.to_string(),
        },
        ..Default::default()
    }
}

pub fn build_table(
    project_id: &str,
    dataset_id: &str,
    table_id: &str,
    schema: &[ColumnSpec],
) -> Table {
    Table {
        table_reference: TableReference {
            project_id: project_id.to_string(),
            dataset_id: dataset_id.to_string(),
            table_id: table_id.to_string(),
        },
        friendly_name: Some(TABLE_FRIENDLY_NAME.to_string()),
        schema: Some(TableSchema {
            fields: schema.iter().map(to_field_schema).collect(),
        }),
        ..Default::default()
    }
}

/// Prepare rows for BigQuery insertion
pub fn prepare_rows(rows: &[UserRow]) -> Vec<Row<UserRow>> {
    rows.iter()
        .map(|row| Row {
            insert_id: Some(row.user_id.clone()),
            json: row.clone(),
        })
        .collect()
}

pub fn build_insert_request(batch: &UploadBatch) -> InsertAllRequest<UserRow> {
    InsertAllRequest {
        rows: prepare_rows(batch.rows()),
        skip_invalid_rows: None,
        ignore_unknown_values: None,
        template_suffix: None,
        trace_id: None,
    }
}

/// One entry per failed row, in the order BigQuery reported them
///
/// The reason is the first non-empty `reason` of the row, the message joins
/// every non-empty `message` (with its `location`, if any). `debugInfo` is
/// internal to Google and dropped.
pub fn to_row_insert_errors(errors: &[InsertError]) -> Vec<RowInsertError> {
    errors.iter().map(to_row_insert_error).collect()
}

fn to_row_insert_error(error: &InsertError) -> RowInsertError {
    let reason = error
        .errors
        .iter()
        .map(|e| e.reason.as_str())
        .find(|reason| !reason.is_empty())
        .map(str::to_string);

    let message = error
        .errors
        .iter()
        .filter(|e| !e.message.is_empty())
        .map(|e| {
            if e.location.is_empty() {
                e.message.clone()
            } else {
                format!("{} ({})", e.message, e.location)
            }
        })
        .collect::<Vec<_>>()
        .join("; ");

    RowInsertError {
        index: usize::try_from(error.index).unwrap_or_default(),
        reason,
        message,
    }
}
