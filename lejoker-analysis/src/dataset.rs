use anyhow::{bail, Result};
use log::info;

use lejoker_db::models::{Draw, Position};

use crate::period::{Period, PeriodConfig};

/// Table des tirages chargée en mémoire. Immuable après construction ;
/// chaque sélection retourne une copie isolée de la tranche, de sorte que
/// plusieurs moteurs peuvent partager le même `Dataset` sans interférence.
#[derive(Debug, Clone)]
pub struct Dataset {
    draws: Vec<Draw>,
    headers: Vec<String>,
}

impl Dataset {
    pub fn new(draws: Vec<Draw>) -> Self {
        let mut headers = vec!["year".to_string(), "week".to_string(), "day".to_string()];
        headers.extend(Position::ALL.iter().map(|p| p.column().to_string()));
        Self { draws, headers }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    /// Sélectionne la tranche correspondant à la période demandée.
    /// Un groupe year/week/day sans aucun tirage est une erreur de recherche ;
    /// `All` retourne l'ensemble complet, vide ou non.
    pub fn select(&self, period: Period, config: &PeriodConfig) -> Result<Vec<Draw>> {
        let slice: Vec<Draw> = match period {
            Period::All => {
                info!("Sélection de l'ensemble des données ({} tirages).", self.len());
                self.draws.clone()
            }
            Period::Year => {
                let slice: Vec<Draw> = self
                    .draws
                    .iter()
                    .filter(|d| d.year == config.year)
                    .cloned()
                    .collect();
                if slice.is_empty() {
                    bail!("Aucun tirage pour l'année {}", config.year);
                }
                info!("Sélection {} = {} ({} tirages).", period, config.year, slice.len());
                slice
            }
            Period::Week => {
                let slice: Vec<Draw> = self
                    .draws
                    .iter()
                    .filter(|d| d.week == config.week)
                    .cloned()
                    .collect();
                if slice.is_empty() {
                    bail!("Aucun tirage pour la semaine {}", config.week);
                }
                info!("Sélection {} = {} ({} tirages).", period, config.week, slice.len());
                slice
            }
            Period::Day => {
                let slice: Vec<Draw> = self
                    .draws
                    .iter()
                    .filter(|d| d.day == config.day)
                    .cloned()
                    .collect();
                if slice.is_empty() {
                    bail!("Aucun tirage pour le jour {}", config.day);
                }
                info!("Sélection {} = {} ({} tirages).", period, config.day, slice.len());
                slice
            }
        };
        Ok(slice)
    }
}
