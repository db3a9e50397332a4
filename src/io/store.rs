//! SQLite persistence for the `players` table.
//!
//! Each ingestion run replaces the table wholesale; the dashboard reads it back.
//! One connection, opened and closed per operation.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, params};

use crate::domain::{PlayerRecord, ZodiacSign};
use crate::error::AppError;

const CREATE_PLAYERS: &str = "
    DROP TABLE IF EXISTS players;
    CREATE TABLE players (
        player TEXT,
        team TEXT,
        dob TEXT,
        zodiac TEXT
    );
";

/// Replace the `players` table in the database at `path`.
pub fn save_players(path: &Path, players: &[PlayerRecord]) -> Result<(), AppError> {
    let mut conn = Connection::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open database '{}': {e}", path.display())))?;
    replace_players(&mut conn, players)
}

/// Read the `players` table from an existing database at `path`.
pub fn read_players(path: &Path) -> Result<Vec<PlayerRecord>, AppError> {
    if !path.exists() {
        return Err(AppError::new(
            2,
            format!("'{}' not found. Run `horo ingest` first.", path.display()),
        ));
    }
    let conn = Connection::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open database '{}': {e}", path.display())))?;
    load_players(&conn)
}

pub fn replace_players(conn: &mut Connection, players: &[PlayerRecord]) -> Result<(), AppError> {
    let tx = conn.transaction().map_err(db_err)?;
    tx.execute_batch(CREATE_PLAYERS).map_err(db_err)?;
    {
        let mut stmt = tx
            .prepare("INSERT INTO players (player, team, dob, zodiac) VALUES (?1, ?2, ?3, ?4)")
            .map_err(db_err)?;
        for p in players {
            stmt.execute(params![
                p.name,
                p.team,
                p.date_of_birth.format("%Y-%m-%d").to_string(),
                p.zodiac.label()
            ])
            .map_err(db_err)?;
        }
    }
    tx.commit().map_err(db_err)?;
    log::info!("Stored {} players", players.len());
    Ok(())
}

pub fn load_players(conn: &Connection) -> Result<Vec<PlayerRecord>, AppError> {
    let mut stmt = conn
        .prepare("SELECT player, team, dob, zodiac FROM players")
        .map_err(db_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })
        .map_err(db_err)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(db_err)?;

    let mut out = Vec::with_capacity(rows.len());
    for (name, team, dob, zodiac) in rows {
        let Some(date_of_birth) = dob
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        else {
            log::warn!("Skipping stored player {name:?} with unreadable dob {dob:?}");
            continue;
        };
        let zodiac = zodiac
            .as_deref()
            .and_then(|z| z.parse::<ZodiacSign>().ok())
            .unwrap_or(ZodiacSign::Unknown);
        out.push(PlayerRecord {
            name: name.unwrap_or_default(),
            team: team.unwrap_or_default(),
            date_of_birth,
            zodiac,
        });
    }
    Ok(out)
}

fn db_err(e: rusqlite::Error) -> AppError {
    AppError::new(2, format!("Database error: {e}"))
}
