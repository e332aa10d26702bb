use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use crate::models::Draw;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    year     INTEGER NOT NULL,
    week     INTEGER NOT NULL,
    day      INTEGER NOT NULL,
    d1       INTEGER NOT NULL,
    d2       INTEGER NOT NULL,
    d3       INTEGER NOT NULL,
    d4       INTEGER NOT NULL,
    d5       INTEGER NOT NULL,
    d6       INTEGER NOT NULL,
    d7       INTEGER NOT NULL,
    PRIMARY KEY (year, week, day)
);
";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("lejoker.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO draws (year, week, day, d1, d2, d3, d4, d5, d6, d7)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        rusqlite::params![
            draw.year,
            draw.week,
            draw.day,
            draw.digits[0],
            draw.digits[1],
            draw.digits[2],
            draw.digits[3],
            draw.digits[4],
            draw.digits[5],
            draw.digits[6],
        ],
    ).context("Échec de l'insertion")?;
    Ok(changed > 0)
}

pub fn fetch_all_draws(conn: &Connection) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(
        "SELECT year, week, day, d1, d2, d3, d4, d5, d6, d7
         FROM draws ORDER BY year, week, day",
    )?;
    let draws = stmt
        .query_map([], |row| {
            Ok(Draw {
                year: row.get(0)?,
                week: row.get(1)?,
                day: row.get(2)?,
                digits: [
                    row.get::<_, u8>(3)?,
                    row.get::<_, u8>(4)?,
                    row.get::<_, u8>(5)?,
                    row.get::<_, u8>(6)?,
                    row.get::<_, u8>(7)?,
                    row.get::<_, u8>(8)?,
                    row.get::<_, u8>(9)?,
                ],
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(
        "SELECT year, week, day, d1, d2, d3, d4, d5, d6, d7
         FROM draws ORDER BY year DESC, week DESC, day DESC LIMIT ?1",
    )?;
    let draws = stmt
        .query_map([limit], |row| {
            Ok(Draw {
                year: row.get(0)?,
                week: row.get(1)?,
                day: row.get(2)?,
                digits: [
                    row.get::<_, u8>(3)?,
                    row.get::<_, u8>(4)?,
                    row.get::<_, u8>(5)?,
                    row.get::<_, u8>(6)?,
                    row.get::<_, u8>(7)?,
                    row.get::<_, u8>(8)?,
                    row.get::<_, u8>(9)?,
                ],
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}
