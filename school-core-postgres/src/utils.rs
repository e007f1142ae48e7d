use school_core_api::ActorRef;
use sqlx::types::Json;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

/// Retrieves a required actor stored as JSONB.
pub fn get_actor(row: &PgRow, col_name: &str) -> Result<ActorRef, Box<dyn Error + Send + Sync>> {
    let Json(actor): Json<ActorRef> = row.try_get(col_name)?;
    Ok(actor)
}

/// Retrieves an optional actor stored as JSONB.
pub fn get_optional_actor(
    row: &PgRow,
    col_name: &str,
) -> Result<Option<ActorRef>, Box<dyn Error + Send + Sync>> {
    let actor: Option<Json<ActorRef>> = row.try_get(col_name)?;
    Ok(actor.map(|Json(a)| a))
}

/// SQLSTATE 23505, raised by the active-only natural key index.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

/// `ILIKE` pattern matching `needle` anywhere, with wildcards in the needle escaped.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("ada"), "%ada%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
