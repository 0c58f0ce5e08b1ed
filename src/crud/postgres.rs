//! Postgres-backed repository
//!
//! One generic repository drives every table; the per-entity [`Table`] impl
//! names the table, lists the writable columns and binds their values in
//! that order.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, PgPool, Postgres, Row};

use super::repository::{Repository, RepositoryError};
use super::Record;

pub type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

pub trait Table: Record + for<'r> FromRow<'r, PgRow> + Unpin {
    const TABLE: &'static str;

    /// Writable columns, excluding `id`, in `bind_columns` order.
    const COLUMNS: &'static [&'static str];

    /// Id column as it appears in `select_sql`.
    const ID_COLUMN: &'static str = "id";

    /// Base SELECT without a WHERE clause.
    fn select_sql(schema: &str) -> String {
        format!("SELECT * FROM {}.{}", schema, Self::TABLE)
    }

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q>;
}

pub struct PgRepository<E> {
    pool: PgPool,
    schema: &'static str,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Table> PgRepository<E> {
    pub fn new(pool: PgPool, schema: &'static str) -> Self {
        Self {
            pool,
            schema,
            _entity: PhantomData,
        }
    }

    fn insert_sql(&self) -> String {
        let placeholders = (1..=E::COLUMNS.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO {}.{} ({}) VALUES ({}) RETURNING id",
            self.schema,
            E::TABLE,
            E::COLUMNS.join(", "),
            placeholders
        )
    }

    fn upsert_sql(&self) -> String {
        let placeholders = (2..=E::COLUMNS.len() + 1)
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let assignments = E::COLUMNS
            .iter()
            .map(|column| format!("{column} = EXCLUDED.{column}"))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO {}.{} (id, {}) VALUES ($1, {}) \
             ON CONFLICT (id) DO UPDATE SET {} RETURNING id",
            self.schema,
            E::TABLE,
            E::COLUMNS.join(", "),
            placeholders,
            assignments
        )
    }
}

#[async_trait]
impl<E: Table> Repository<E> for PgRepository<E> {
    async fn find_by_id(&self, id: i64) -> Result<Option<E>, RepositoryError> {
        let sql = format!("{} WHERE {} = $1", E::select_sql(self.schema), E::ID_COLUMN);

        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn find_all_by_id(&self, ids: &[i64]) -> Result<Vec<E>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "{} WHERE {} = ANY($1)",
            E::select_sql(self.schema),
            E::ID_COLUMN
        );

        let rows = sqlx::query_as::<_, E>(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn save(&self, entity: E) -> Result<E, RepositoryError> {
        let written = match entity.id() {
            None => {
                let sql = self.insert_sql();
                entity
                    .bind_columns(sqlx::query(&sql))
                    .fetch_one(&self.pool)
                    .await
            }
            Some(id) => {
                let sql = self.upsert_sql();
                entity
                    .bind_columns(sqlx::query(&sql).bind(id))
                    .fetch_one(&self.pool)
                    .await
            }
        };
        let row = written.map_err(|err| RepositoryError::from_write(E::TABLE, err))?;
        let id: i64 = row.try_get("id")?;

        // Re-read so joined relations come back hydrated.
        self.find_by_id(id)
            .await?
            .ok_or(RepositoryError::Vanished { table: E::TABLE, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::resource! {
        entity Gadget;
        dto GadgetDto;
        mapper GadgetMapper;
        name "gadget";
        table "gadgets";
        fields {
            label: String,
            weight: i64,
        }
    }

    fn repository() -> PgRepository<Gadget> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        PgRepository::new(pool, "shop")
    }

    #[tokio::test]
    async fn test_insert_sql_lists_columns_without_id() {
        assert_eq!(
            repository().insert_sql(),
            "INSERT INTO shop.gadgets (label, weight) VALUES ($1, $2) RETURNING id"
        );
    }

    #[tokio::test]
    async fn test_upsert_sql_binds_id_first() {
        assert_eq!(
            repository().upsert_sql(),
            "INSERT INTO shop.gadgets (id, label, weight) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET label = EXCLUDED.label, weight = EXCLUDED.weight \
             RETURNING id"
        );
    }

    #[test]
    fn test_default_select_reads_whole_table() {
        assert_eq!(Gadget::select_sql("shop"), "SELECT * FROM shop.gadgets");
    }
}
