use log::error;

/// Années couvertes par l'historique du jeu.
pub const SUPPORTED_YEARS: [i32; 4] = [2025, 2024, 2023, 2022];

/// Tranche de données à analyser. Choix fermé : pas de mot-clé libre,
/// donc pas de repli silencieux sur `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    All,
    Year,
    Week,
    Day,
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::All => write!(f, "all"),
            Period::Year => write!(f, "year"),
            Period::Week => write!(f, "week"),
            Period::Day => write!(f, "day"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodConfig {
    pub year: i32,
    pub week: u8,
    pub day: u8,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            year: 2025,
            week: 1,
            day: 1,
        }
    }
}

impl PeriodConfig {
    pub fn new(year: i32, week: u8, day: u8) -> Self {
        Self { year, week, day }
    }

    pub fn is_valid(&self) -> bool {
        SUPPORTED_YEARS.contains(&self.year)
            && self.week >= 1
            && self.week <= 52
            && self.day >= 1
            && self.day <= 4
    }

    /// Une configuration invalide est signalée mais n'interrompt pas le
    /// traitement : la sélection échouera plus loin si la tranche est vide.
    pub fn sanity_check(&self) {
        if !self.is_valid() {
            error!(
                "Période invalide (year={}, week={}, day={}). Vérifiez les valeurs.",
                self.year, self.week, self.day
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PeriodConfig::default().is_valid());
    }

    #[test]
    fn test_supported_years() {
        for year in SUPPORTED_YEARS {
            assert!(PeriodConfig::new(year, 1, 1).is_valid());
        }
        assert!(!PeriodConfig::new(2021, 1, 1).is_valid());
        assert!(!PeriodConfig::new(2026, 1, 1).is_valid());
    }

    #[test]
    fn test_week_bounds() {
        assert!(PeriodConfig::new(2025, 52, 1).is_valid());
        assert!(!PeriodConfig::new(2025, 0, 1).is_valid());
        assert!(!PeriodConfig::new(2025, 53, 1).is_valid());
    }

    #[test]
    fn test_day_bounds() {
        assert!(PeriodConfig::new(2025, 1, 4).is_valid());
        assert!(!PeriodConfig::new(2025, 1, 0).is_valid());
        assert!(!PeriodConfig::new(2025, 1, 5).is_valid());
    }

    #[test]
    fn test_sanity_check_does_not_panic() {
        // Signalée en erreur mais non fatale.
        PeriodConfig::new(1999, 60, 9).sanity_check();
    }
}
