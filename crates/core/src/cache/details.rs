//! Full act records, keyed by identifier.

use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

use super::connection::CacheDb;
use super::fields::RichColumns;
use crate::Error;
use crate::models::{ActDetails, ActId};

impl CacheDb {
    /// Cached details for `id`, or `None` if the act was never stored.
    pub async fn get_act_details(&self, id: &ActId) -> Result<Option<ActDetails>, Error> {
        let id = id.to_string();
        self.conn
            .call(move |conn| -> Result<Option<ActDetails>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT
                    id, title, status, published, type, address, display_address,
                    position, year, announcement_date, change_date, publisher,
                    text_html, text_pdf, volume, entry_into_force, in_force,
                    keywords, keywords_names, released_by, texts, act_references,
                    authorized_body, directives, obligated, previous_title, prints
                FROM act_details WHERE id = ?1",
                )?;

                let result = stmt.query_row(params![id], |row| {
                    let details = ActDetails {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        status: row.get(2)?,
                        published: row.get(3)?,
                        kind: row.get(4)?,
                        address: row.get(5)?,
                        display_address: row.get(6)?,
                        position: row.get(7)?,
                        year: row.get(8)?,
                        announcement_date: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
                        change_date: row.get::<_, Option<String>>(10)?.unwrap_or_default(),
                        publisher: row.get::<_, Option<String>>(11)?.unwrap_or_default(),
                        text_html: row.get(12)?,
                        text_pdf: row.get(13)?,
                        volume: row.get::<_, Option<u32>>(14)?.unwrap_or_default(),
                        entry_into_force: row.get::<_, Option<String>>(15)?.unwrap_or_default(),
                        in_force: row.get::<_, Option<String>>(16)?.unwrap_or_default(),
                        ..Default::default()
                    };
                    let columns = RichColumns {
                        keywords: row.get(17)?,
                        keywords_names: row.get(18)?,
                        released_by: row.get(19)?,
                        texts: row.get(20)?,
                        references: row.get(21)?,
                        authorized_body: row.get(22)?,
                        directives: row.get(23)?,
                        obligated: row.get(24)?,
                        previous_title: row.get(25)?,
                        prints: row.get(26)?,
                    };
                    Ok((details, columns))
                });

                match result {
                    Ok((mut details, columns)) => {
                        columns.apply(&mut details)?;
                        Ok(Some(details))
                    }
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Insert or overwrite every column of the record for `details.id`.
    pub async fn upsert_act_details(&self, details: &ActDetails) -> Result<(), Error> {
        let columns = RichColumns::encode(details)?;
        let id = details.id.clone();
        let details = details.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO act_details (
                    id, title, status, published, type, address, display_address,
                    position, year, announcement_date, change_date, publisher,
                    text_html, text_pdf, volume, entry_into_force, in_force,
                    keywords, keywords_names, released_by, texts, act_references,
                    authorized_body, directives, obligated, previous_title, prints
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                          ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20,
                          ?21, ?22, ?23, ?24, ?25, ?26, ?27)
                ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    status = excluded.status,
                    published = excluded.published,
                    type = excluded.type,
                    address = excluded.address,
                    display_address = excluded.display_address,
                    position = excluded.position,
                    year = excluded.year,
                    announcement_date = excluded.announcement_date,
                    change_date = excluded.change_date,
                    publisher = excluded.publisher,
                    text_html = excluded.text_html,
                    text_pdf = excluded.text_pdf,
                    volume = excluded.volume,
                    entry_into_force = excluded.entry_into_force,
                    in_force = excluded.in_force,
                    keywords = excluded.keywords,
                    keywords_names = excluded.keywords_names,
                    released_by = excluded.released_by,
                    texts = excluded.texts,
                    act_references = excluded.act_references,
                    authorized_body = excluded.authorized_body,
                    directives = excluded.directives,
                    obligated = excluded.obligated,
                    previous_title = excluded.previous_title,
                    prints = excluded.prints",
                    params![
                        &details.id,
                        &details.title,
                        &details.status,
                        &details.published,
                        &details.kind,
                        &details.address,
                        &details.display_address,
                        details.position,
                        details.year,
                        &details.announcement_date,
                        &details.change_date,
                        &details.publisher,
                        details.text_html,
                        details.text_pdf,
                        details.volume,
                        &details.entry_into_force,
                        &details.in_force,
                        &columns.keywords,
                        &columns.keywords_names,
                        &columns.released_by,
                        &columns.texts,
                        &columns.references,
                        &columns.authorized_body,
                        &columns.directives,
                        &columns.obligated,
                        &columns.previous_title,
                        &columns.prints,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)?;

        tracing::debug!(id = %id, "stored act details");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Reference, References, Text};
    use serde_json::json;

    fn sample() -> ActDetails {
        ActDetails {
            id: "DU/2024/17".into(),
            title: "Rozporządzenie Ministra Finansów".into(),
            status: "obowiązujący".into(),
            published: "2024-01-08".into(),
            kind: "Rozporządzenie".into(),
            address: "WDU20240000017".into(),
            display_address: "Dz.U. 2024 poz. 17".into(),
            position: 17,
            year: 2024,
            announcement_date: "2024-01-08".into(),
            change_date: "2024-01-09T07:12:00".into(),
            publisher: "DU".into(),
            text_html: true,
            text_pdf: true,
            volume: 0,
            entry_into_force: "2024-01-23".into(),
            in_force: "IN_FORCE".into(),
            keywords: Some(vec!["podatki".into(), "cła".into()]),
            keywords_names: Some(vec![]),
            released_by: Some(vec!["MIN. FINANSÓW".into()]),
            texts: Some(vec![
                Text { file_name: "D20240017.pdf".into(), kind: "O".into() },
                Text { file_name: "D20240017L.pdf".into(), kind: "I".into() },
            ]),
            references: References {
                legal_basis: Some(vec![
                    Reference { id: "DU/2023/1".into(), date: None, art: Some("art. 5 ust. 2".into()) },
                    Reference { id: "DU/2022/88".into(), date: Some("2022-03-01".into()), art: None },
                ]),
                amending_acts: Some(vec![]),
                ..Default::default()
            },
            authorized_body: None,
            directives: json!([{"title": "Dyrektywa 2011/16/UE", "address": "31201L0016"}]),
            obligated: None,
            previous_title: Some(vec!["Rozporządzenie w sprawie ceł".into()]),
            prints: serde_json::Value::Null,
        }
    }

    fn id() -> ActId {
        ActId::new(2024, 17)
    }

    #[tokio::test]
    async fn test_get_missing_details() {
        let db = CacheDb::open_in_memory().await.unwrap();
        assert!(db.get_act_details(&id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_details_round_trip() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let details = sample();
        db.upsert_act_details(&details).await.unwrap();

        let loaded = db.get_act_details(&id()).await.unwrap().unwrap();
        assert_eq!(loaded, details);

        let legal_basis = loaded.references.legal_basis.unwrap();
        assert_eq!(legal_basis.len(), 2);
        assert_eq!(legal_basis[0].id, "DU/2023/1");
        assert_eq!(legal_basis[1].id, "DU/2022/88");
        assert_eq!(loaded.references.amending_acts, Some(vec![]));
        assert_eq!(loaded.references.repealed_acts, None);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_all_columns() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.upsert_act_details(&sample()).await.unwrap();

        let updated = ActDetails {
            status: "uchylony".into(),
            keywords: None,
            texts: Some(vec![]),
            references: References::default(),
            directives: serde_json::Value::Null,
            prints: json!({"number": "12"}),
            ..sample()
        };
        db.upsert_act_details(&updated).await.unwrap();

        let loaded = db.get_act_details(&id()).await.unwrap().unwrap();
        assert_eq!(loaded, updated);

        let rows: i64 = db
            .conn
            .call(|conn| conn.query_row("SELECT COUNT(*) FROM act_details", [], |row| row.get(0)))
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    async fn updated_at(db: &CacheDb) -> String {
        db.conn
            .call(|conn| conn.query_row("SELECT updated_at FROM act_details", [], |row| row.get(0)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_upsert_refreshes_updated_at() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.conn
            .call(|conn| {
                conn.execute(
                    "INSERT INTO act_details (id, title, status, published, type, address, display_address, position, year, updated_at)
                     VALUES ('DU/2024/17', 't', '', '2024-01-08', 'Ustawa', 'WDU20240000017', 'Dz.U. 2024 poz. 17', 17, 2024,
                             '2000-01-01T00:00:00.000Z')",
                    [],
                )
            })
            .await
            .unwrap();
        assert_eq!(updated_at(&db).await, "2000-01-01T00:00:00.000Z");

        db.upsert_act_details(&sample()).await.unwrap();

        let after = updated_at(&db).await;
        assert!(after.as_str() > "2000-01-01T00:00:00.000Z", "updated_at not refreshed: {after}");
        assert_eq!(db.get_act_details(&id()).await.unwrap().unwrap(), sample());
    }

    #[tokio::test]
    async fn test_corrupted_column_names_field() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.upsert_act_details(&sample()).await.unwrap();
        db.conn
            .call(|conn| conn.execute("UPDATE act_details SET act_references = '{broken' WHERE id = 'DU/2024/17'", []))
            .await
            .unwrap();

        let result = db.get_act_details(&id()).await;
        assert!(matches!(result, Err(Error::Serialization { field: "references", .. })));
    }

    #[tokio::test]
    async fn test_null_columns_read_as_absent() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.conn
            .call(|conn| {
                conn.execute(
                    "INSERT INTO act_details (id, title, status, published, type, address, display_address, position, year)
                     VALUES ('DU/2024/17', 't', '', '2024-01-08', 'Ustawa', 'WDU20240000017', 'Dz.U. 2024 poz. 17', 17, 2024)",
                    [],
                )
            })
            .await
            .unwrap();

        let loaded = db.get_act_details(&id()).await.unwrap().unwrap();
        assert_eq!(loaded.keywords, None);
        assert_eq!(loaded.publisher, "");
        assert!(!loaded.text_html);
        assert!(loaded.directives.is_null());
    }
}
