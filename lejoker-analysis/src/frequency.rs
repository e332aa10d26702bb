use anyhow::{bail, Result};

use lejoker_db::models::{Draw, Magnitude, Parity, Position, DIGIT_COUNT};

use crate::dataset::Dataset;
use crate::period::{Period, PeriodConfig};

/// Portée d'un comptage : une position fixe, ou les sept positions réunies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Position(Position),
    Pooled,
}

pub struct FrequencyAnalysis {
    dataset: Dataset,
    config: PeriodConfig,
}

impl FrequencyAnalysis {
    pub fn new(dataset: Dataset, config: PeriodConfig) -> Self {
        config.sanity_check();
        Self { dataset, config }
    }

    /// Valeurs observées à une position, classées par fréquence décroissante,
    /// avec leur probabilité `count / taille de la tranche`.
    /// À fréquence égale, l'ordre de première apparition est conservé.
    pub fn most_frequent_position(
        &self,
        period: Period,
        position: Position,
    ) -> Result<(Vec<u8>, Vec<f64>)> {
        let slice = self.non_empty_slice(period)?;
        let ranked = rank_by_count(slice.iter().map(|d| position.digit_from(d)));
        let total = slice.len() as f64;
        Ok(split_ranked(ranked, total))
    }

    /// Valeurs des sept positions réunies en un seul multiensemble,
    /// probabilités sur `7 × taille de la tranche`.
    pub fn most_frequent_pooled(&self, period: Period) -> Result<(Vec<u8>, Vec<f64>)> {
        let slice = self.non_empty_slice(period)?;
        let ranked = rank_by_count(slice.iter().flat_map(|d| d.digits.iter().copied()));
        let total = (slice.len() * DIGIT_COUNT) as f64;
        Ok(split_ranked(ranked, total))
    }

    /// Répartition impair/pair. Les deux probabilités somment à 1.0.
    pub fn odd_even(&self, period: Period, scope: Scope) -> Result<(Vec<Parity>, Vec<f64>)> {
        let slice = self.non_empty_slice(period)?;
        let (odd, total) = partition_count(&slice, scope, |d| Parity::of(d) == Parity::Odd);
        Ok((
            vec![Parity::Odd, Parity::Even],
            vec![odd as f64 / total as f64, (total - odd) as f64 / total as f64],
        ))
    }

    /// Répartition haut/bas (haut = chiffre > 4). Somme = 1.0.
    pub fn high_low(&self, period: Period, scope: Scope) -> Result<(Vec<Magnitude>, Vec<f64>)> {
        let slice = self.non_empty_slice(period)?;
        let (high, total) = partition_count(&slice, scope, |d| Magnitude::of(d) == Magnitude::High);
        Ok((
            vec![Magnitude::High, Magnitude::Low],
            vec![
                high as f64 / total as f64,
                (total - high) as f64 / total as f64,
            ],
        ))
    }

    fn non_empty_slice(&self, period: Period) -> Result<Vec<Draw>> {
        let slice = self.dataset.select(period, &self.config)?;
        if slice.is_empty() {
            bail!("Tranche vide : aucune fréquence calculable.");
        }
        Ok(slice)
    }
}

/// Compte les valeurs dans l'ordre de première apparition puis trie par
/// fréquence décroissante. Le tri est stable : les ex aequo gardent l'ordre
/// de première apparition.
fn rank_by_count(values: impl Iterator<Item = u8>) -> Vec<(u8, u32)> {
    let mut counts: Vec<(u8, u32)> = Vec::new();
    for v in values {
        match counts.iter_mut().find(|(d, _)| *d == v) {
            Some((_, c)) => *c += 1,
            None => counts.push((v, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn split_ranked(ranked: Vec<(u8, u32)>, total: f64) -> (Vec<u8>, Vec<f64>) {
    let values = ranked.iter().map(|(d, _)| *d).collect();
    let probs = ranked.iter().map(|(_, c)| *c as f64 / total).collect();
    (values, probs)
}

fn partition_count(slice: &[Draw], scope: Scope, pred: impl Fn(u8) -> bool) -> (u32, u32) {
    let mut hits = 0u32;
    let mut total = 0u32;
    for draw in slice {
        match scope {
            Scope::Position(position) => {
                total += 1;
                if pred(position.digit_from(draw)) {
                    hits += 1;
                }
            }
            Scope::Pooled => {
                for &d in &draw.digits {
                    total += 1;
                    if pred(d) {
                        hits += 1;
                    }
                }
            }
        }
    }
    (hits, total)
}
