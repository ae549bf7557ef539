use autotrack_api::{ApiError, ApiResult};
use heapless::String as HeaplessString;
use sqlx::{postgres::PgRow, Row};
use std::str::FromStr;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> ApiResult<Self>;
}

/// Map any sqlx failure into the shared error taxonomy.
pub fn db_err(err: sqlx::Error) -> ApiError {
    ApiError::Database(err.to_string())
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> ApiResult<HeaplessString<N>> {
    let s: String = row.try_get(col_name).map_err(db_err)?;
    HeaplessString::from_str(&s).map_err(|_| {
        ApiError::Internal(format!(
            "Value for column '{col_name}' is too long (max {N} chars)"
        ))
    })
}

/// Retrieves an optional `HeaplessString` from a row.
pub fn get_optional_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> ApiResult<Option<HeaplessString<N>>> {
    let s: Option<String> = row.try_get(col_name).map_err(db_err)?;
    s.map(|val| HeaplessString::from_str(&val))
        .transpose()
        .map_err(|_| {
            ApiError::Internal(format!(
                "Value for column '{col_name}' is too long (max {N} chars)"
            ))
        })
}
