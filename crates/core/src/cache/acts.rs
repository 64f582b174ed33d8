//! Per-year act listings.
//!
//! A year is always written as a whole: the old rows are deleted and the new
//! ones inserted in one transaction, so readers see either set but never a mix.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

use super::connection::CacheDb;
use crate::Error;
use crate::models::Act;

impl CacheDb {
    /// Cached acts for `year`, ordered by position. Empty when nothing is cached.
    pub async fn get_acts(&self, year: i32) -> Result<Vec<Act>, Error> {
        self.conn
            .call(move |conn| -> Result<Vec<Act>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, title, status, published, position, year, type, address
                     FROM acts WHERE year = ?1 ORDER BY position ASC",
                )?;

                let acts = stmt
                    .query_map(params![year], |row| {
                        Ok(Act {
                            id: row.get(0)?,
                            title: row.get(1)?,
                            status: row.get(2)?,
                            published: row.get(3)?,
                            position: row.get(4)?,
                            year: row.get(5)?,
                            kind: row.get(6)?,
                            address: row.get(7)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(acts)
            })
            .await
            .map_err(Error::from)
    }

    /// Swap the cached listing for `year` with `acts`.
    ///
    /// Any failure rolls back, leaving the previous rows in place.
    pub async fn replace_acts(&self, year: i32, acts: &[Act]) -> Result<(), Error> {
        let acts = acts.to_vec();
        let count = acts.len();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction()?;
                tx.execute("DELETE FROM acts WHERE year = ?1", params![year])?;
                {
                    let mut insert = tx.prepare(
                        "INSERT INTO acts (id, title, status, published, position, year, type, address)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    )?;
                    for act in &acts {
                        insert.execute(params![
                            &act.id,
                            &act.title,
                            &act.status,
                            &act.published,
                            act.position,
                            act.year,
                            &act.kind,
                            &act.address,
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)?;

        tracing::debug!(year, count, "replaced cached acts");
        Ok(())
    }

    /// Time since the freshest row for `year` was written.
    ///
    /// `None` when the year has no rows. A timestamp in the future counts as
    /// zero age.
    pub async fn cache_age(&self, year: i32) -> Result<Option<Duration>, Error> {
        let latest: Option<String> = self
            .conn
            .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
                conn.query_row("SELECT MAX(updated_at) FROM acts WHERE year = ?1", params![year], |row| row.get(0))
            })
            .await?;

        let Some(latest) = latest else {
            return Ok(None);
        };

        let written = DateTime::parse_from_rfc3339(&latest)
            .map_err(|e| Error::Serialization { field: "updated_at", reason: format!("{latest:?}: {e}") })?
            .with_timezone(&Utc);

        Ok(Some((Utc::now() - written).to_std().unwrap_or(Duration::ZERO)))
    }
}
