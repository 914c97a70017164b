use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::Result;
use crate::models::Player;

pub struct PlayerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a player unless a row with the same id already exists.
    /// Returns true if a row was written, false on an id conflict.
    pub async fn insert_or_skip(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        player: &Player,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO players
              (id, firstname, lastname, shortname, sex, rank, points,
               weight, height, age, last, countrycode, countrypicture, picture)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(player.id)
        .bind(&player.firstname)
        .bind(&player.lastname)
        .bind(&player.shortname)
        .bind(&player.sex)
        .bind(player.rank)
        .bind(player.points)
        .bind(player.weight)
        .bind(player.height)
        .bind(player.age)
        .bind(Json(&player.last))
        .bind(&player.countrycode)
        .bind(&player.countrypicture)
        .bind(&player.picture)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Total number of rows in the `players` table.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM players")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
