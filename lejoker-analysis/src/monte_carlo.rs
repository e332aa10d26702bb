use anyhow::{Context, Result};
use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;

use lejoker_db::models::{Position, DIGIT_COUNT};

use crate::dataset::Dataset;
use crate::period::{Period, PeriodConfig};

pub const DEFAULT_SAMPLES: usize = 10_000;

/// Rééchantillonnage pondéré des chiffres historiques, position par position.
/// Chaque position est tirée indépendamment selon sa propre distribution
/// empirique.
pub struct MonteCarloAnalysis {
    dataset: Dataset,
    config: PeriodConfig,
    samples: usize,
    seed: Option<u64>,
}

impl MonteCarloAnalysis {
    pub fn new(dataset: Dataset, config: PeriodConfig) -> Self {
        config.sanity_check();
        Self {
            dataset,
            config,
            samples: DEFAULT_SAMPLES,
            seed: None,
        }
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Distribution empirique des chiffres 0-9 pour chaque position de la
    /// tranche. Une position sans aucune observation ne peut pas être
    /// normalisée : c'est une erreur de distribution dégénérée.
    pub fn position_distributions(&self, period: Period) -> Result<Vec<[f64; 10]>> {
        let slice = self.dataset.select(period, &self.config)?;
        let mut distributions = Vec::with_capacity(DIGIT_COUNT);
        for position in Position::ALL {
            let mut counts = [0u32; 10];
            for draw in &slice {
                counts[position.digit_from(draw) as usize] += 1;
            }
            let total: u32 = counts.iter().sum();
            if total == 0 {
                anyhow::bail!(
                    "Distribution dégénérée pour la position {} : aucune observation.",
                    position
                );
            }
            let mut probs = [0.0f64; 10];
            for (p, &c) in probs.iter_mut().zip(counts.iter()) {
                *p = c as f64 / total as f64;
            }
            distributions.push(probs);
        }
        Ok(distributions)
    }

    /// Tire `samples` échantillons i.i.d. par position et retourne le chiffre
    /// modal de chaque position avec sa fréquence empirique `count / samples`.
    /// À effectifs égaux, le chiffre rencontré en premier l'emporte.
    pub fn simulate(&self, period: Period) -> Result<(Vec<u8>, Vec<f64>)> {
        let distributions = self.position_distributions(period)?;
        let mut rng: StdRng = match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let mut modal_digits = Vec::with_capacity(DIGIT_COUNT);
        let mut modal_probs = Vec::with_capacity(DIGIT_COUNT);
        for (position, probs) in Position::ALL.iter().zip(distributions.iter()) {
            let dist = WeightedIndex::new(probs).with_context(|| {
                format!("Distribution invalide pour la position {}", position)
            })?;
            let samples: Vec<usize> = (0..self.samples).map(|_| dist.sample(&mut rng)).collect();
            let (mode, count) = first_seen_mode(&samples);
            modal_digits.push(mode as u8);
            modal_probs.push(count as f64 / self.samples as f64);
        }
        Ok((modal_digits, modal_probs))
    }
}

/// Valeur la plus fréquente d'une séquence d'échantillons ; les ex aequo
/// sont départagés par ordre de première apparition.
fn first_seen_mode(samples: &[usize]) -> (usize, u32) {
    let mut counts = [0u32; 10];
    let mut first_seen = [usize::MAX; 10];
    for (i, &s) in samples.iter().enumerate() {
        counts[s] += 1;
        if first_seen[s] == usize::MAX {
            first_seen[s] = i;
        }
    }
    let mut best = 0usize;
    for candidate in 1..10 {
        let better = counts[candidate] > counts[best]
            || (counts[candidate] == counts[best] && first_seen[candidate] < first_seen[best]);
        if better {
            best = candidate;
        }
    }
    (best, counts[best])
}
