use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use cai539_db::models::DrawRecord;
use cai539_engine::pipeline::PipelineRun;
use cai539_engine::reports::{LunarMonthReport, StrategyInfo};

use crate::import::ImportResult;

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn display_draws(draws: &[DrawRecord]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = new_table();
    table.set_header(vec!["Période", "Date", "Jour", "Numéros", "Mois lunaire"]);

    for draw in draws {
        let lunar = draw
            .lunar_month
            .map(|m| m.to_string())
            .unwrap_or_else(|| "—".to_string());
        table.add_row(vec![
            draw.period.clone(),
            draw.date.to_string(),
            draw.weekday().to_string(),
            join_numbers(&draw.sorted_numbers()),
            lunar,
        ]);
    }

    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

pub fn display_run(run: &PipelineRun, verbose: bool) {
    println!(
        "\n📊 Fenêtre : {} tirages (fréquence attendue {:.2})\n",
        run.window_size, run.expected
    );

    if verbose {
        let mut table = new_table();
        table.set_header(vec!["Stratégie", "Candidats"]);
        for output in &run.analyzer_outputs {
            let candidates = if output.candidates.is_empty() {
                "—".to_string()
            } else {
                join_numbers(&output.candidates)
            };
            table.add_row(vec![output.name.clone(), candidates]);
        }
        println!("{table}");

        let mut table = new_table();
        table.set_header(vec!["Numéro", "Votes", "Statut"]);
        for (&n, &votes) in &run.pool {
            let (status, color) = if run.hot.contains(&n) {
                ("CHAUD", Color::Red)
            } else if run.cold.contains(&n) {
                ("FROID", Color::Blue)
            } else {
                ("retenu", Color::Green)
            };
            table.add_row(vec![
                Cell::new(format!("{:2}", n)),
                Cell::new(votes),
                Cell::new(status).fg(color),
            ]);
        }
        println!("{table}");
    }

    let main = &run.result.main_numbers;
    if main.is_empty() {
        println!("🎯 Aucun numéro recommandé (historique insuffisant).");
    } else {
        println!("🎯 Numéros recommandés : {}", join_numbers(main));
    }
    match run.result.strong_pair {
        Some(pair) => println!(
            "🔗 Paire forte : {:2} - {:2} ({} tirages en commun)",
            pair.pair.0, pair.pair.1, pair.count
        ),
        None => println!("🔗 Aucune paire trouvée."),
    }
}

pub fn display_frequency(numbers: &[u8], window: usize) {
    println!("\n📈 Numéros les plus fréquents sur les {} derniers tirages", window);
    println!("   {}", join_numbers(numbers));
}

pub fn display_lunar(report: Option<&LunarMonthReport>, window: usize) {
    match report {
        Some(r) => {
            println!("\n🌙 Mois lunaire dominant sur les {} derniers tirages : {} ({} tirages)", window, r.month, r.draws);
            println!("   Numéros : {}", join_numbers(&r.numbers));
        }
        None => println!("\n🌙 Aucun tirage avec mois lunaire dans les {} derniers tirages.", window),
    }
}

pub fn display_strategies(strategies: &[StrategyInfo]) {
    let mut table = new_table();
    table.set_header(vec!["Stratégie", "Description"]);
    for s in strategies {
        table.add_row(vec![s.name.as_str(), s.description.as_str()]);
    }
    println!("{table}");
}
