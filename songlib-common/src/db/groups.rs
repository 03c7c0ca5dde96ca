//! Group lookup and find-or-create

use crate::db::models::Group;
use crate::Result;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Find a group by exact name
pub async fn find_group_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Group>> {
    let group = sqlx::query_as::<_, Group>("SELECT id, name FROM groups WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(group)
}

/// Resolve a group by name, creating it when absent
///
/// The insert ignores unique-name conflicts and the row is selected again
/// afterwards, so two callers racing on a new name both get the same row.
pub async fn find_or_create_group(pool: &SqlitePool, name: &str) -> Result<Group> {
    if let Some(group) = find_group_by_name(pool, name).await? {
        debug!(group_id = group.id, name, "Group found");
        return Ok(group);
    }

    let inserted = sqlx::query("INSERT INTO groups (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
        .bind(name)
        .execute(pool)
        .await?
        .rows_affected();

    let group = sqlx::query_as::<_, Group>("SELECT id, name FROM groups WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await?;

    if inserted > 0 {
        info!(group_id = group.id, name, "Group created");
    }

    Ok(group)
}
