mod display;
mod import;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use cai539_db::db::{count_draws, db_path, fetch_last_draws, migrate, open_db};
use cai539_db::lunar::{ChineseLunisolar, LunarCalendar, LunarMonthTable};
use cai539_db::repository::DrawRepository;
use cai539_engine::config::{load_config, save_config, EngineConfig};
use cai539_engine::pipeline::Engine;
use cai539_engine::reports::{frequency_top, lunar_month_report, strategies, DEFAULT_REPORT_WINDOW};

use crate::display::{
    display_draws, display_frequency, display_import_summary, display_lunar, display_run,
    display_strategies,
};
use crate::import::ImportResult;

#[derive(Parser)]
#[command(name = "cai539", about = "Recommandations multi-stratégies pour le 今彩539 (5/39)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importer les tirages depuis un ou plusieurs fichiers CSV
    Import {
        /// Fichiers CSV (un par année par exemple)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Table des débuts de mois lunaires (CSV start_date,month), remplace le calendrier intégré
        #[arg(long)]
        lunar_table: Option<PathBuf>,
    },

    /// Afficher le chemin de la base de données
    DbPath,

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Recommander des numéros pour une date
    Predict {
        /// Date cible (AAAA-MM-JJ, défaut : aujourd'hui)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Fichier de configuration JSON
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Fenêtre d'analyse (nombre de tirages)
        #[arg(short, long)]
        window: Option<usize>,

        /// Nombre de numéros recommandés
        #[arg(short, long)]
        top: Option<usize>,

        /// Ne pas restreindre au jour de semaine de la date cible
        #[arg(long)]
        all_days: bool,

        /// Détail par stratégie
        #[arg(short, long)]
        verbose: bool,

        /// Sortie JSON
        #[arg(long)]
        json: bool,
    },

    /// Numéros les plus fréquents des derniers tirages
    Frequency {
        #[arg(short, long, default_value_t = DEFAULT_REPORT_WINDOW)]
        window: usize,

        #[arg(short, long, default_value = "5")]
        top: usize,
    },

    /// Numéros du mois lunaire dominant
    Lunar {
        #[arg(short, long, default_value_t = DEFAULT_REPORT_WINDOW)]
        window: usize,
    },

    /// Lister les stratégies disponibles
    Strategies,

    /// Écrire la configuration par défaut
    Config {
        #[arg(short, long, default_value = "cai539.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { files, lunar_table } => cmd_import(&conn, &files, lunar_table.as_deref()),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Predict { date, config, window, top, all_days, verbose, json } => {
            let mut engine_config = match config {
                Some(p) => load_config(&p)?,
                None => EngineConfig::default(),
            };
            if let Some(w) = window {
                engine_config.window_size = w;
            }
            if let Some(t) = top {
                engine_config.top_n = t;
            }
            if all_days {
                engine_config.weekday_filter = false;
            }
            engine_config.validate()?;
            let as_of = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            cmd_predict(&conn, engine_config, as_of, verbose, json)
        }
        Command::Frequency { window, top } => cmd_frequency(&conn, window, top),
        Command::Lunar { window } => cmd_lunar(&conn, window),
        Command::Strategies => {
            let engine = Engine::new(EngineConfig::default());
            display_strategies(&strategies(engine.analyzers(), DEFAULT_REPORT_WINDOW));
            Ok(())
        }
        Command::Config { output } => {
            save_config(&EngineConfig::default(), &output)?;
            println!("Configuration par défaut écrite dans {}", output.display());
            Ok(())
        }
    }
}

fn cmd_import(conn: &cai539_db::rusqlite::Connection, files: &[PathBuf], lunar_table: Option<&Path>) -> Result<()> {
    let lunar: Box<dyn LunarCalendar> = match lunar_table {
        Some(p) => Box::new(LunarMonthTable::from_csv(p)?),
        None => Box::new(ChineseLunisolar),
    };

    let mut total = ImportResult::default();
    for file in files {
        if !file.exists() {
            log::warn!("Fichier absent, ignoré : {}", file.display());
            continue;
        }
        match import::import_csv(conn, file, lunar.as_ref()) {
            Ok(result) => total.merge(&result),
            Err(e) => log::warn!("{:#}", e),
        }
    }
    display_import_summary(&total);
    Ok(())
}

/// Charge tout l'historique, ou `None` si la base est vide.
fn load_repository(conn: &cai539_db::rusqlite::Connection) -> Result<Option<DrawRepository>> {
    if count_draws(conn)? == 0 {
        println!("Base vide. Lancez d'abord : cai539 import <fichiers>");
        return Ok(None);
    }
    let repo = DrawRepository::load(conn).context("Chargement de l'historique impossible")?;
    Ok(Some(repo))
}

fn cmd_list(conn: &cai539_db::rusqlite::Connection, last: u32) -> Result<()> {
    if count_draws(conn)? == 0 {
        println!("Base vide. Lancez d'abord : cai539 import <fichiers>");
        return Ok(());
    }
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_predict(
    conn: &cai539_db::rusqlite::Connection,
    config: EngineConfig,
    as_of: NaiveDate,
    verbose: bool,
    json: bool,
) -> Result<()> {
    let Some(repo) = load_repository(conn)? else {
        return Ok(());
    };
    let engine = Engine::new(config);
    let run = engine.recommend(&repo, as_of);

    if json {
        println!("{}", serde_json::to_string_pretty(&run)?);
    } else {
        println!("Recommandation pour le {} ({})", as_of, as_of.format("%A"));
        display_run(&run, verbose);
    }
    Ok(())
}

fn cmd_frequency(conn: &cai539_db::rusqlite::Connection, window: usize, top: usize) -> Result<()> {
    let Some(repo) = load_repository(conn)? else {
        return Ok(());
    };
    let recent = repo.latest(window);
    display_frequency(&frequency_top(recent, top), recent.len());
    Ok(())
}

fn cmd_lunar(conn: &cai539_db::rusqlite::Connection, window: usize) -> Result<()> {
    let Some(repo) = load_repository(conn)? else {
        return Ok(());
    };
    let recent = repo.latest(window);
    let report = lunar_month_report(recent, 3);
    display_lunar(report.as_ref(), recent.len());
    Ok(())
}
