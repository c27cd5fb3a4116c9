use crate::models::interest::InterestItem;
use crate::storage::mysql::MySqlStorage;
use crate::storage::{Result, StorageError};

type InterestRow = (u32, String, bool);

fn item_from_row(row: InterestRow) -> InterestItem {
    let (id, name, selected) = row;
    InterestItem { id, name, selected }
}

/// MySQL interest catalog operations
pub trait MySqlInterestExt {
    /// Number of catalog entries
    async fn count_interests(&self) -> Result<u64>;

    /// One page of the catalog, ordered by id ascending
    async fn list_interests(&self, offset: u64, limit: u32) -> Result<Vec<InterestItem>>;

    /// Update one item's selected flag and return it
    async fn set_interest_selected(&self, id: u32, selected: bool)
        -> Result<Option<InterestItem>>;

    /// Insert a catalog item if absent
    async fn insert_interest(&self, item: &InterestItem) -> Result<bool>;
}

impl MySqlInterestExt for MySqlStorage {
    async fn count_interests(&self) -> Result<u64> {
        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM interests"#)
            .fetch_one(self.pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to count interests: {}", e)))?;

        Ok(total as u64)
    }

    async fn list_interests(&self, offset: u64, limit: u32) -> Result<Vec<InterestItem>> {
        let rows: Vec<InterestRow> = sqlx::query_as(
            r#"SELECT id, name, selected
               FROM interests
               ORDER BY id ASC
               LIMIT ? OFFSET ?"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Database(format!("Failed to list interests: {}", e)))?;

        Ok(rows.into_iter().map(item_from_row).collect())
    }

    async fn set_interest_selected(
        &self,
        id: u32,
        selected: bool,
    ) -> Result<Option<InterestItem>> {
        // UPDATE first, then read back; an update to the already-set value
        // reports zero changed rows, so the read decides existence
        sqlx::query(r#"UPDATE interests SET selected = ? WHERE id = ?"#)
            .bind(selected)
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to update interest: {}", e)))?;

        let row: Option<InterestRow> =
            sqlx::query_as(r#"SELECT id, name, selected FROM interests WHERE id = ?"#)
                .bind(id)
                .fetch_optional(self.pool())
                .await
                .map_err(|e| StorageError::Database(format!("Failed to query interest: {}", e)))?;

        Ok(row.map(item_from_row))
    }

    async fn insert_interest(&self, item: &InterestItem) -> Result<bool> {
        let result =
            sqlx::query(r#"INSERT IGNORE INTO interests (id, name, selected) VALUES (?, ?, ?)"#)
                .bind(item.id)
                .bind(&item.name)
                .bind(item.selected)
                .execute(self.pool())
                .await
                .map_err(|e| StorageError::Database(format!("Failed to insert interest: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }
}
