//! Command-line parsing for the reward curve tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! evaluation code. Every flag here ends up as a `RewardCurveConfig` field or a
//! presentation option; nothing is evaluated during parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{
    DEFAULT_RANK_MAX, DEFAULT_RANK_MIN, ResourceKind, Rounding, RewardCurveConfig, RewardProfile,
};
use crate::error::ConfigError;
use crate::rewards::EVENT_SLOTS;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rewards", version, about = "Mek reward curve tuner")]
pub struct Cli {
    /// Profile directory (overrides MEK_REWARDS_STORE).
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a single curve at one rank.
    Eval(EvalArgs),
    /// Gold / XP / essence for one rank under a profile.
    Rank(RankArgs),
    /// Reward span of each story chapter's normal nodes.
    Chapters(ProfileSelect),
    /// Linear gold/XP rollout across the sequential event nodes.
    Events(EventArgs),
    /// Evaluate a profile for a whole rank range (optionally export CSV).
    Table(TableArgs),
    /// ASCII plot of one resource curve.
    Plot(PlotArgs),
    /// Manage saved profiles.
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Launch the interactive curve editor.
    Tui(TuiArgs),
}

/// Curve definition flags.
#[derive(Debug, Args, Clone)]
pub struct CurveArgs {
    /// Best rank of the domain.
    #[arg(long, default_value_t = DEFAULT_RANK_MIN, allow_negative_numbers = true)]
    pub rank_min: i64,

    /// Worst rank of the domain.
    #[arg(long, default_value_t = DEFAULT_RANK_MAX, allow_negative_numbers = true)]
    pub rank_max: i64,

    /// Reward at the worst rank.
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    pub min: f64,

    /// Reward at the best rank.
    #[arg(long, default_value_t = 10_000.0, allow_negative_numbers = true)]
    pub max: f64,

    /// Curve bias in [-1, 1] (0 = linear).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub curve: f64,

    /// Rounding granularity.
    #[arg(long, value_enum, default_value_t = Rounding::None)]
    pub rounding: Rounding,
}

impl CurveArgs {
    pub fn to_config(&self) -> Result<RewardCurveConfig, ConfigError> {
        RewardCurveConfig::new(
            self.rank_min,
            self.rank_max,
            self.min,
            self.max,
            self.curve,
            self.rounding,
        )
    }
}

/// Which value variant `eval` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalVariant {
    /// Apply the config's rounding policy.
    Rounded,
    /// Skip rounding.
    Raw,
    /// Apply rounding, then snap to a whole number.
    Whole,
}

#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    /// Rank to evaluate (1 = best).
    #[arg(short, long, allow_negative_numbers = true)]
    pub rank: i64,

    #[command(flatten)]
    pub curve: CurveArgs,

    /// Print the unrounded value.
    #[arg(long, conflicts_with = "whole")]
    pub raw: bool,

    /// Print a whole number (after the rounding policy).
    #[arg(long)]
    pub whole: bool,

    /// Clamp out-of-domain ranks instead of extrapolating.
    #[arg(long)]
    pub clamp: bool,
}

impl EvalArgs {
    pub fn variant(&self) -> EvalVariant {
        if self.raw {
            EvalVariant::Raw
        } else if self.whole {
            EvalVariant::Whole
        } else {
            EvalVariant::Rounded
        }
    }
}

/// Choose the profile a command runs against.
#[derive(Debug, Args, Clone, Default)]
pub struct ProfileSelect {
    /// Saved profile name (defaults to the built-in profile).
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Pick a saved profile interactively.
    #[arg(long, conflicts_with = "profile")]
    pub pick: bool,
}

#[derive(Debug, Args, Clone)]
pub struct RankArgs {
    /// Rank to evaluate (1 = best).
    #[arg(short, long, allow_negative_numbers = true)]
    pub rank: i64,

    #[command(flatten)]
    pub select: ProfileSelect,

    /// Clamp out-of-domain ranks instead of extrapolating.
    #[arg(long)]
    pub clamp: bool,
}

#[derive(Debug, Args, Clone)]
pub struct EventArgs {
    #[arg(long, default_value_t = 100.0)]
    pub gold_min: f64,
    #[arg(long, default_value_t = 10_000.0)]
    pub gold_max: f64,
    #[arg(long, value_enum, default_value_t = Rounding::None)]
    pub gold_rounding: Rounding,

    #[arg(long, default_value_t = 10.0)]
    pub xp_min: f64,
    #[arg(long, default_value_t = 1_000.0)]
    pub xp_max: f64,
    #[arg(long, value_enum, default_value_t = Rounding::None)]
    pub xp_rounding: Rounding,

    /// Number of sequential event nodes.
    #[arg(long, default_value_t = EVENT_SLOTS)]
    pub slots: usize,

    /// Print every event instead of the per-chapter summary.
    #[arg(long)]
    pub all: bool,

    /// Export the rollout to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    #[command(flatten)]
    pub select: ProfileSelect,

    /// First rank of the table.
    #[arg(long, default_value_t = DEFAULT_RANK_MIN)]
    pub from: i64,

    /// Last rank of the table.
    #[arg(long, default_value_t = DEFAULT_RANK_MAX)]
    pub to: i64,

    /// Export the table to CSV instead of printing rows.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub select: ProfileSelect,

    /// Which resource curve to plot.
    #[arg(long, value_enum, default_value_t = ResourceKind::Gold)]
    pub resource: ResourceKind,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Hide the chapter boundary markers.
    #[arg(long)]
    pub no_markers: bool,
}

/// Per-resource overrides applied when saving a profile.
#[derive(Debug, Args, Clone)]
pub struct CurveOverride {
    /// Resource to modify.
    #[arg(long, value_enum, default_value_t = ResourceKind::Gold)]
    pub resource: ResourceKind,
    #[arg(long, allow_negative_numbers = true)]
    pub rank_min: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    pub rank_max: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub curve: Option<f64>,
    #[arg(long, value_enum)]
    pub rounding: Option<Rounding>,
}

impl CurveOverride {
    /// Apply the overrides to `profile` and re-validate the touched curve.
    pub fn apply(&self, profile: &mut RewardProfile) -> Result<(), ConfigError> {
        let config = profile.get_mut(self.resource);
        if let Some(v) = self.rank_min {
            config.rank_min = v;
        }
        if let Some(v) = self.rank_max {
            config.rank_max = v;
        }
        if let Some(v) = self.min {
            config.output_min = v;
        }
        if let Some(v) = self.max {
            config.output_max = v;
        }
        if let Some(v) = self.curve {
            config.curve = v;
        }
        if let Some(v) = self.rounding {
            config.rounding = v;
        }
        config.validate()
    }

    pub fn is_empty(&self) -> bool {
        self.rank_min.is_none()
            && self.rank_max.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && self.curve.is_none()
            && self.rounding.is_none()
    }
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// List saved profiles.
    List,
    /// Print a saved profile.
    Show { name: String },
    /// Create or update a profile (starting from the saved one, else the default).
    Save {
        name: String,
        #[command(flatten)]
        curve: CurveOverride,
    },
    /// Delete a saved profile.
    Delete { name: String },
}

#[derive(Debug, Args, Clone, Default)]
pub struct TuiArgs {
    /// Saved profile to open.
    #[arg(short, long)]
    pub profile: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_flags_build_config() {
        let cli = Cli::parse_from([
            "rewards", "eval", "--rank", "2000", "--min", "100", "--max", "10000", "--rounding", "100",
        ]);
        let Command::Eval(args) = cli.command else {
            panic!("expected eval");
        };
        let config = args.curve.to_config().unwrap();
        assert_eq!(config.rounding, Rounding::Hundred);
        assert_eq!(config.rank_max, 4000);
        assert_eq!(args.variant(), EvalVariant::Rounded);
    }

    #[test]
    fn negative_curve_parses() {
        let cli = Cli::parse_from(["rewards", "eval", "-r", "5", "--curve", "-0.5", "--raw"]);
        let Command::Eval(args) = cli.command else {
            panic!("expected eval");
        };
        assert_eq!(args.curve.curve, -0.5);
        assert_eq!(args.variant(), EvalVariant::Raw);
    }

    #[test]
    fn raw_and_whole_conflict() {
        let res = Cli::try_parse_from(["rewards", "eval", "-r", "5", "--raw", "--whole"]);
        assert!(res.is_err());
    }

    #[test]
    fn profile_save_override() {
        let cli = Cli::parse_from([
            "rewards", "profile", "save", "launch", "--resource", "essence", "--curve", "0.4", "--rounding", "0.5",
        ]);
        let Command::Profile(ProfileCommand::Save { name, curve }) = cli.command else {
            panic!("expected profile save");
        };
        assert_eq!(name, "launch");
        let mut profile = RewardProfile::default();
        curve.apply(&mut profile).unwrap();
        assert_eq!(profile.essence.curve, 0.4);
        assert_eq!(profile.essence.rounding, Rounding::Half);
        assert_eq!(profile.gold, RewardProfile::default().gold);
    }

    #[test]
    fn override_rejects_degenerate_domain() {
        let ov = CurveOverride {
            resource: ResourceKind::Xp,
            rank_min: Some(50),
            rank_max: Some(50),
            min: None,
            max: None,
            curve: None,
            rounding: None,
        };
        let mut profile = RewardProfile::default();
        assert!(ov.apply(&mut profile).is_err());
    }

    #[test]
    fn global_store_flag() {
        let cli = Cli::parse_from(["rewards", "chapters", "--store", "/tmp/p", "-p", "launch"]);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/p")));
        let Command::Chapters(select) = cli.command else {
            panic!("expected chapters");
        };
        assert_eq!(select.profile.as_deref(), Some("launch"));
    }
}
