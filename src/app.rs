//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads settings and installs logging
//! - opens the profile store
//! - evaluates curves and prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::{debug, info, warn};

use crate::cli::{
    Cli, Command, EvalArgs, EvalVariant, EventArgs, PlotArgs, ProfileCommand, ProfileSelect, RankArgs,
    TableArgs, TuiArgs,
};
use crate::domain::RewardProfile;
use crate::engine::RewardCurveEngine;
use crate::error::AppError;
use crate::io::{JsonDirStore, ProfileStore, SaveOutcome};
use crate::rewards::{CHAPTERS, EventRange, deployed_reward, rollout};
use crate::settings::{Settings, init_tracing};

pub mod pipeline;

/// Entry point for the `rewards` binary.
pub fn run() -> Result<(), AppError> {
    // We want `rewards` and `rewards -p launch` to behave like `rewards tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    init_tracing(cli.verbose)?;

    let mut settings = Settings::from_env();
    if let Some(dir) = &cli.store {
        settings.store_dir = dir.clone();
    }
    debug!(debug_dir = %settings.debug_dir.display(), "settings loaded");

    let mut store = JsonDirStore::new(&settings.store_dir);
    debug!(root = %store.root().display(), "profile store opened");

    match cli.command {
        Command::Eval(args) => handle_eval(args),
        Command::Rank(args) => handle_rank(&store, args),
        Command::Chapters(select) => handle_chapters(&store, select),
        Command::Events(args) => handle_events(args),
        Command::Table(args) => handle_table(&store, args),
        Command::Plot(args) => handle_plot(&store, args),
        Command::Profile(cmd) => handle_profile(&mut store, cmd),
        Command::Tui(args) => handle_tui(store, settings, args),
    }
}

fn engine_for(clamp: bool) -> RewardCurveEngine {
    if clamp {
        RewardCurveEngine::clamped()
    } else {
        RewardCurveEngine::default()
    }
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let config = args.curve.to_config()?;
    if !config.curve_in_range() {
        warn!(curve = config.curve, "curve bias outside [-1, 1]");
    }

    let engine = engine_for(args.clamp);
    match args.variant() {
        EvalVariant::Rounded => println!("{}", crate::report::fmt_value(engine.evaluate(args.rank, &config))),
        EvalVariant::Raw => println!("{}", crate::report::fmt_value(engine.evaluate_raw(args.rank, &config))),
        EvalVariant::Whole => println!("{}", engine.evaluate_whole(args.rank, &config)),
    }
    Ok(())
}

fn handle_rank(store: &dyn ProfileStore, args: RankArgs) -> Result<(), AppError> {
    let loaded = pipeline::resolve_profile(store, &args.select)?;
    let reward = loaded.profile.evaluate_with(&engine_for(args.clamp), args.rank);
    let deployed = deployed_reward(args.rank, &loaded.profile);
    print!("{}", crate::report::format_rank_reward(&reward, deployed.as_ref()));
    Ok(())
}

fn handle_chapters(store: &dyn ProfileStore, select: ProfileSelect) -> Result<(), AppError> {
    let loaded = pipeline::resolve_profile(store, &select)?;
    let rows = crate::rewards::chapter_preview(&loaded.profile, &RewardCurveEngine::default());

    println!(
        "{}",
        crate::report::format_profile_summary(loaded.name.as_deref(), &loaded.profile)
    );
    print!("{}", crate::report::format_chapter_table(&rows));
    Ok(())
}

fn handle_events(args: EventArgs) -> Result<(), AppError> {
    let gold = EventRange {
        min: args.gold_min,
        max: args.gold_max,
        rounding: args.gold_rounding,
    };
    let xp = EventRange {
        min: args.xp_min,
        max: args.xp_max,
        rounding: args.xp_rounding,
    };
    let slots = rollout(gold, xp, args.slots)?;

    if args.all {
        for slot in &slots {
            println!("{:>4} {:>8} {:>8}", slot.number, slot.gold, slot.xp);
        }
    } else {
        print!("{}", crate::report::format_event_table(&slots));
    }

    if let Some(path) = &args.export {
        crate::io::export::write_events_csv(path, &slots)?;
        info!(path = %path.display(), rows = slots.len(), "exported event rollout");
    }
    Ok(())
}

fn handle_table(store: &dyn ProfileStore, args: TableArgs) -> Result<(), AppError> {
    let loaded = pipeline::resolve_profile(store, &args.select)?;
    let run = pipeline::run_profile(&loaded.profile, args.from..=args.to, &RewardCurveEngine::default())?;

    match &args.export {
        Some(path) => {
            crate::io::export::write_rank_table_csv(path, &run.table, &loaded.profile)?;
            info!(path = %path.display(), rows = run.table.len(), "exported rank table");
        }
        None => {
            for row in &run.table {
                println!(
                    "{:>5} {:>10} {:>8} {:>6}",
                    row.rank,
                    crate::report::fmt_value(row.gold),
                    crate::report::fmt_value(row.xp),
                    crate::report::fmt_value(row.essence),
                );
            }
        }
    }
    print!("{}", crate::report::format_totals(&run.totals));
    Ok(())
}

fn handle_plot(store: &dyn ProfileStore, args: PlotArgs) -> Result<(), AppError> {
    let loaded = pipeline::resolve_profile(store, &args.select)?;
    let config = loaded.profile.get(args.resource);

    // Chapter boundaries: the best normal rank of each chapter.
    let markers: Vec<i64> = if args.no_markers {
        Vec::new()
    } else {
        CHAPTERS.iter().map(|ch| ch.normal.0).collect()
    };

    let label = args.resource.display_name().to_lowercase();
    let plot = crate::plot::render_curve_plot(config, &label, args.width, args.height, &markers);
    println!("{plot}");
    Ok(())
}

fn handle_profile(store: &mut dyn ProfileStore, cmd: ProfileCommand) -> Result<(), AppError> {
    match cmd {
        ProfileCommand::List => {
            let names = store.list()?;
            if names.is_empty() {
                println!("No saved profiles.");
            }
            for name in names {
                println!("{name}");
            }
        }
        ProfileCommand::Show { name } => {
            let record = store.load(&name)?;
            print!(
                "{}",
                crate::report::format_profile_summary(Some(&record.name), &record.profile)
            );
            println!("saved_at: {}", record.saved_at.to_rfc3339());
        }
        ProfileCommand::Save { name, curve } => {
            let exists = store.list()?.contains(&name);
            let mut profile = if exists {
                store.load(&name)?.profile
            } else {
                RewardProfile::default()
            };
            if curve.is_empty() {
                debug!(name = %name, "no curve overrides given");
            }
            curve.apply(&mut profile)?;
            pipeline::warn_out_of_range(&profile);

            let outcome = store.save(&name, &profile)?;
            match outcome {
                SaveOutcome::Created => println!("Created profile '{name}'."),
                SaveOutcome::Updated => println!("Updated profile '{name}'."),
            }
        }
        ProfileCommand::Delete { name } => {
            store.delete(&name)?;
            println!("Deleted profile '{name}'.");
        }
    }
    Ok(())
}

fn handle_tui(store: JsonDirStore, settings: Settings, args: TuiArgs) -> Result<(), AppError> {
    let loaded = pipeline::load_profile(&store, args.profile.as_deref())?;
    crate::tui::run(Box::new(store), settings, loaded)
}

/// Rewrite argv so `rewards` defaults to `rewards tui`.
///
/// Rules:
/// - `rewards`                          -> `rewards tui`
/// - `rewards -p launch ...`            -> `rewards tui -p launch ...`
/// - `rewards --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "eval" | "rank" | "chapters" | "events" | "table" | "plot" | "profile" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_binary_opens_tui() {
        assert_eq!(rewrite_args(argv(&["rewards"])), argv(&["rewards", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["rewards", "-p", "launch"])),
            argv(&["rewards", "tui", "-p", "launch"])
        );
    }

    #[test]
    fn subcommands_and_help_untouched() {
        let eval = argv(&["rewards", "eval", "-r", "1"]);
        assert_eq!(rewrite_args(eval.clone()), eval);
        let help = argv(&["rewards", "--help"]);
        assert_eq!(rewrite_args(help.clone()), help);
    }

    #[test]
    fn profile_save_updates_existing() {
        use crate::cli::CurveOverride;
        use crate::domain::ResourceKind;
        use crate::io::MemoryStore;

        let mut store = MemoryStore::new();
        let save = |curve: f64| ProfileCommand::Save {
            name: "launch".to_string(),
            curve: CurveOverride {
                resource: ResourceKind::Gold,
                rank_min: None,
                rank_max: None,
                min: None,
                max: None,
                curve: Some(curve),
                rounding: None,
            },
        };

        handle_profile(&mut store, save(0.5)).unwrap();
        handle_profile(&mut store, save(-0.5)).unwrap();
        assert_eq!(store.list().unwrap(), vec!["launch".to_string()]);
        assert_eq!(store.load("launch").unwrap().profile.gold.curve, -0.5);

        handle_profile(&mut store, ProfileCommand::Delete { name: "launch".to_string() }).unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}
