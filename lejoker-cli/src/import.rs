use anyhow::{Context, Result};
use lejoker_db::rusqlite::Connection;
use std::path::Path;

use lejoker_db::db::insert_draw;
use lejoker_db::models::{validate_draw, Draw};

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

fn parse_record(record: &csv::StringRecord) -> Result<Draw> {
    let get = |idx: usize| -> Result<&str> {
        record
            .get(idx)
            .map(|s| s.trim())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let year: i32 = get(0)?
        .parse()
        .with_context(|| format!("Année illisible : '{}'", get(0).unwrap_or_default()))?;
    let week: u8 = get(1)?
        .parse()
        .with_context(|| format!("Semaine illisible : '{}'", get(1).unwrap_or_default()))?;
    let day: u8 = get(2)?
        .parse()
        .with_context(|| format!("Jour illisible : '{}'", get(2).unwrap_or_default()))?;

    let mut digits = [0u8; 7];
    for (i, slot) in digits.iter_mut().enumerate() {
        let s = get(3 + i)?;
        *slot = s
            .parse::<u8>()
            .with_context(|| format!("Chiffre illisible : '{}' (index {})", s, 3 + i))?;
    }

    let draw = Draw {
        year,
        week,
        day,
        digits,
    };
    validate_draw(&draw)?;
    Ok(draw)
}

/// Importe un CSV `year;week;day;d1;..;d7` dans la base, en une transaction.
pub fn import_csv(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let tx = conn
        .unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => match parse_record(&record) {
                Ok(draw) => match insert_draw(&tx, &draw) {
                    Ok(true) => result.inserted += 1,
                    Ok(false) => result.skipped += 1,
                    Err(e) => {
                        eprintln!("Erreur insertion tirage {}: {}", result.total_records, e);
                        result.errors += 1;
                    }
                },
                Err(e) => {
                    eprintln!("Erreur parsing ligne {}: {}", result.total_records, e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                eprintln!("Erreur lecture ligne {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_parse_record_ok() {
        let draw = parse_record(&record(&[
            "2025", "14", "2", "1", "2", "3", "4", "5", "6", "7",
        ]))
        .unwrap();
        assert_eq!(draw.year, 2025);
        assert_eq!(draw.week, 14);
        assert_eq!(draw.day, 2);
        assert_eq!(draw.digits, [1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_parse_record_trims_whitespace() {
        let draw = parse_record(&record(&[
            " 2024 ", " 1", "1 ", "0", "9", "0", "9", "0", "9", "0",
        ]))
        .unwrap();
        assert_eq!(draw.year, 2024);
        assert_eq!(draw.digits, [0, 9, 0, 9, 0, 9, 0]);
    }

    #[test]
    fn test_parse_record_missing_field() {
        assert!(parse_record(&record(&["2025", "1", "1", "1", "2", "3"])).is_err());
    }

    #[test]
    fn test_parse_record_digit_out_of_range() {
        assert!(parse_record(&record(&[
            "2025", "1", "1", "1", "2", "3", "4", "5", "6", "12",
        ]))
        .is_err());
    }

    #[test]
    fn test_parse_record_bad_day() {
        assert!(parse_record(&record(&[
            "2025", "1", "7", "1", "2", "3", "4", "5", "6", "7",
        ]))
        .is_err());
    }
}
