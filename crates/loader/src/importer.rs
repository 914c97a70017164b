use serde_json::Value;
use sqlx::PgPool;
use storage::repository::PlayerRepository;
use tracing::{debug, error, info};

use crate::error::{LoaderError, Result};
use crate::input::PlayerRecord;

#[derive(Debug, Default, Clone, Copy)]
pub struct ImportSummary {
    pub inserted: u64,
    pub skipped: u64,
}

pub struct PlayerImporter<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerImporter<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Write every record inside a single transaction, committed once at
    /// the end; any failure rolls the whole run back.
    ///
    /// An id already present in the table is skipped silently. Every other
    /// database rejection is fatal.
    pub async fn import(&self, records: &[Value]) -> Result<ImportSummary> {
        let repository = PlayerRepository::new(self.pool);
        let mut tx = self.pool.begin().await?;
        let mut summary = ImportSummary::default();

        for (index, value) in records.iter().enumerate() {
            let player = PlayerRecord::decode(index, value)?.into_row();

            match repository.insert_or_skip(&mut tx, &player).await {
                Ok(true) => summary.inserted += 1,
                Ok(false) => {
                    debug!("player {} already present, skipping", player.id);
                    summary.skipped += 1;
                }
                Err(e) => {
                    if e.is_unique_violation() {
                        error!("player {} collides with an existing shortname", player.id);
                    } else if e.is_check_violation() {
                        error!("player {} fails a column check", player.id);
                    }
                    return Err(LoaderError::Insert {
                        id: player.id,
                        source: e,
                    });
                }
            }
        }

        tx.commit().await?;
        info!(
            "Committed {} insert(s), {} duplicate(s) skipped",
            summary.inserted, summary.skipped
        );

        Ok(summary)
    }
}
