use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use cai539_db::models::POOL_SIZE;

/// Zone inclusive `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub start: u8,
    pub end: u8,
}

impl Zone {
    pub const fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }

    pub fn numbers(&self) -> impl Iterator<Item = u8> {
        self.start..=self.end
    }
}

pub fn default_zones() -> Vec<Zone> {
    vec![
        Zone::new(1, 8),
        Zone::new(9, 16),
        Zone::new(17, 24),
        Zone::new(25, 32),
        Zone::new(33, 39),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Nombre de tirages retenus dans la fenêtre d'analyse.
    pub window_size: usize,
    /// Ne garder que les tirages du même jour de semaine que la date cible.
    pub weekday_filter: bool,
    pub top_n: usize,
    pub hot_multiplier: f64,
    pub cold_multiplier: f64,
    pub zones: Vec<Zone>,
    pub zones_picked: usize,
    pub numbers_per_zone: usize,
    pub tail_digits: usize,
    pub tail_limit: usize,
    pub columns: usize,
    pub gap_min: usize,
    pub gap_limit: usize,
    pub diagonal_window: usize,
    pub diagonal_max_offset: usize,
    pub diagonal_limit: usize,
    pub calendar_top: usize,
    pub consecutive_top: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_size: 800,
            weekday_filter: true,
            top_n: 6,
            hot_multiplier: 1.2,
            cold_multiplier: 0.6,
            zones: default_zones(),
            zones_picked: 2,
            numbers_per_zone: 2,
            tail_digits: 2,
            tail_limit: 3,
            columns: 2,
            gap_min: 2,
            gap_limit: 2,
            diagonal_window: 30,
            diagonal_max_offset: 3,
            diagonal_limit: 3,
            calendar_top: 3,
            consecutive_top: 3,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        validate_zones(&self.zones)?;
        if self.cold_multiplier <= 0.0 || self.hot_multiplier <= self.cold_multiplier {
            bail!(
                "Seuils chaud/froid incohérents : chaud={} froid={}",
                self.hot_multiplier,
                self.cold_multiplier
            );
        }
        if self.columns > 5 {
            bail!("Nombre de colonnes {} > 5", self.columns);
        }
        if self.window_size == 0 {
            bail!("La fenêtre d'analyse doit contenir au moins un tirage");
        }
        Ok(())
    }
}

/// Les zones doivent couvrir 1..=39 sans trou ni chevauchement, dans l'ordre.
pub fn validate_zones(zones: &[Zone]) -> Result<()> {
    let mut next = 1u8;
    for zone in zones {
        if zone.start != next || zone.end < zone.start {
            bail!("Zone {}-{} invalide (début attendu : {})", zone.start, zone.end, next);
        }
        next = zone.end.saturating_add(1);
    }
    if next != POOL_SIZE + 1 {
        bail!("Les zones ne couvrent pas 1-{}", POOL_SIZE);
    }
    Ok(())
}

pub fn save_config(config: &EngineConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)
        .with_context(|| format!("Impossible d'écrire {:?}", path))?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let config: EngineConfig = serde_json::from_str(&json)
        .with_context(|| format!("JSON invalide dans {:?}", path))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_n, 6);
        assert!((config.hot_multiplier - 1.2).abs() < 1e-12);
        assert!((config.cold_multiplier - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_default_zones_partition_pool() {
        let zones = default_zones();
        assert!(validate_zones(&zones).is_ok());
        for n in 1..=POOL_SIZE {
            let owners = zones.iter().filter(|z| z.numbers().any(|x| x == n)).count();
            assert_eq!(owners, 1, "Numéro {} dans {} zones", n, owners);
        }
        let sizes: Vec<usize> = zones.iter().map(|z| z.numbers().count()).collect();
        assert_eq!(sizes, vec![8, 8, 8, 8, 7]);
    }

    #[test]
    fn test_invalid_zones_rejected() {
        assert!(validate_zones(&[Zone::new(1, 20), Zone::new(22, 39)]).is_err());
        assert!(validate_zones(&[Zone::new(1, 20), Zone::new(20, 39)]).is_err());
        assert!(validate_zones(&[Zone::new(1, 38)]).is_err());
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let config = EngineConfig {
            hot_multiplier: 0.5,
            cold_multiplier: 0.6,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"window_size": 200, "top_n": 5}"#).unwrap();
        assert_eq!(config.window_size, 200);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.diagonal_window, 30);
        assert_eq!(config.zones, default_zones());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("cai539_config_{}.json", std::process::id()));
        let config = EngineConfig {
            window_size: 200,
            weekday_filter: false,
            ..EngineConfig::default()
        };
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
