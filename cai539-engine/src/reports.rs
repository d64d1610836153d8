use serde::Serialize;

use cai539_db::models::DrawRecord;

use crate::analyzers::{count_by, number_frequencies, top_k, top_numbers, Analyzer};

pub const DEFAULT_REPORT_WINDOW: usize = 200;

/// Les `top_n` numéros les plus sortis dans la fenêtre, en ordre croissant.
pub fn frequency_top(window: &[DrawRecord], top_n: usize) -> Vec<u8> {
    let mut numbers = top_numbers(&number_frequencies(window), top_n);
    numbers.sort_unstable();
    numbers
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LunarMonthReport {
    pub month: u8,
    pub draws: usize,
    pub numbers: Vec<u8>,
}

/// Mois lunaire le plus représenté et ses `top` numéros. Les tirages sans mois
/// lunaire sont ignorés ; `None` si aucun n'en a.
pub fn lunar_month_report(window: &[DrawRecord], top: usize) -> Option<LunarMonthReport> {
    let month = top_k(count_by(window.iter().filter_map(|r| r.lunar_month)), 1)
        .into_iter()
        .next()?;
    let in_month: Vec<&DrawRecord> = window.iter().filter(|r| r.lunar_month == Some(month)).collect();
    let mut numbers = top_numbers(&number_frequencies(in_month.iter().copied()), top);
    numbers.sort_unstable();
    Some(LunarMonthReport { month, draws: in_month.len(), numbers })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyInfo {
    pub name: String,
    pub description: String,
}

/// Analyseurs du moteur, suivis des deux rapports calculés sur `report_window` tirages.
pub fn strategies(analyzers: &[Box<dyn Analyzer>], report_window: usize) -> Vec<StrategyInfo> {
    let mut list: Vec<StrategyInfo> = analyzers
        .iter()
        .map(|a| StrategyInfo { name: a.name().to_string(), description: a.description().to_string() })
        .collect();
    list.push(StrategyInfo {
        name: "Frequency".to_string(),
        description: format!("Numéros les plus fréquents des {} derniers tirages", report_window),
    });
    list.push(StrategyInfo {
        name: "LunarMonth".to_string(),
        description: format!(
            "Numéros du mois lunaire le plus représenté dans les {} derniers tirages",
            report_window
        ),
    });
    list
}
