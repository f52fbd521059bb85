//! Distinct value listing for text columns

use serde::Serialize;
use utoipa::ToSchema;

use crate::data::filters::FilterError;
use crate::data::schema::{self, ColumnDef};
use crate::data::{DataError, KineticsRepository};

/// Body of `GET /api/v1/metadata`
#[derive(Debug, Serialize, ToSchema)]
pub struct ColumnValues {
    pub column: String,
    pub values: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Look up a column that can be listed; numeric and unknown names are rejected
pub fn listable_column(name: &str) -> Result<&'static ColumnDef, FilterError> {
    schema::column(name)
        .filter(|c| c.is_text())
        .ok_or_else(|| FilterError::ColumnNotSupported {
            column: name.to_string(),
        })
}

/// Sorted, unique, non-empty values of a text column
pub async fn resolve_column_values(
    repo: &dyn KineticsRepository,
    name: &str,
) -> Result<ColumnValues, MetadataError> {
    let column = listable_column(name)?;
    let values = repo.distinct_values(column).await?;
    tracing::debug!(column = column.name, count = values.len(), "Resolved column values");
    Ok(ColumnValues {
        column: column.name.to_string(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::testing::seeded_store;

    #[test]
    fn numeric_and_unknown_columns_are_not_listable() {
        assert!(listable_column("organism").is_ok());
        assert_eq!(
            listable_column("ph").unwrap_err().code(),
            "COLUMN_NOT_SUPPORTED"
        );
        assert!(matches!(
            listable_column("bogus"),
            Err(FilterError::ColumnNotSupported { column }) if column == "bogus"
        ));
    }

    #[tokio::test]
    async fn resolves_sorted_distinct_values() {
        let store = seeded_store().await;
        let result = resolve_column_values(&store, "ec").await.unwrap();
        assert_eq!(result.column, "ec");
        assert_eq!(
            result.values,
            vec!["1.1.1.1", "1.1.1.2", "1.1.3.4", "1.10.2.2", "2.7.1.1", "3.2.1.1"]
        );
    }

    #[tokio::test]
    async fn empty_table_yields_no_values() {
        let store = crate::data::sqlite::testing::empty_store().await;
        let result = resolve_column_values(&store, "substrate").await.unwrap();
        assert!(result.values.is_empty());
    }

    #[tokio::test]
    async fn rejects_numeric_column_before_store_access() {
        let store = seeded_store().await;
        let err = resolve_column_values(&store, "temperature")
            .await
            .unwrap_err();
        assert!(matches!(err, MetadataError::Filter(_)));
    }
}
