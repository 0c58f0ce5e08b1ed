//! Database module
//!
//! Connectivity and schema checks. Tables are created by the raw SQL files
//! in `migrations/`.

use sqlx::PgPool;

use crate::config::ServiceKind;

/// Verify database connectivity
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

/// Check that every table of the mounted services exists
pub async fn check_schema(pool: &PgPool, services: &[ServiceKind]) -> Result<bool, sqlx::Error> {
    for service in services {
        for table in service.tables() {
            let exists: bool = sqlx::query_scalar(
                r#"
                SELECT EXISTS (
                    SELECT 1 FROM information_schema.tables
                    WHERE table_schema = $1 AND table_name = $2
                )
                "#,
            )
            .bind(service.schema())
            .bind(*table)
            .fetch_one(pool)
            .await?;

            if !exists {
                tracing::error!(
                    service = %service,
                    "Required table '{}.{}' does not exist",
                    service.schema(),
                    table
                );
                return Ok(false);
            }
        }
    }

    Ok(true)
}
