use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use team_formation::config::{EngineConfig, FriendOverflowPolicy, GroupingMode};
use team_formation::ingest::load_participants;
use team_formation::report::{find_member, run_summary, summarize};
use team_formation::{form_teams, KeywordClassifier};

#[derive(Parser, Debug)]
#[command(name = "team-formation")]
#[command(version)]
#[command(about = "Partition event participants into compatible teams", long_about = None)]
pub struct Cli {
    /// JSON array of participant records
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// TOML engine configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Overrides `max-team-size`
    #[arg(long)]
    pub max_team_size: Option<usize>,

    /// Overrides `grouping-mode`
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Overrides `friend-overflow-policy`
    #[arg(long, value_enum)]
    pub friend_overflow: Option<OverflowArg>,

    /// Abort when an objective cannot be classified
    #[arg(long)]
    pub fail_fast: bool,

    /// Only print the team of this participant (id or name)
    #[arg(long)]
    pub find: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    General,
    Language,
    SkillTier,
}

impl From<ModeArg> for GroupingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::General => GroupingMode::General,
            ModeArg::Language => GroupingMode::Language,
            ModeArg::SkillTier => GroupingMode::SkillTier,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum OverflowArg {
    Split,
    Dissolve,
}

impl From<OverflowArg> for FriendOverflowPolicy {
    fn from(policy: OverflowArg) -> Self {
        match policy {
            OverflowArg::Split => FriendOverflowPolicy::Split,
            OverflowArg::Dissolve => FriendOverflowPolicy::Dissolve,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(size) = cli.max_team_size {
        config.max_team_size = size;
    }
    if let Some(mode) = cli.mode {
        config.grouping_mode = mode.into();
    }
    if let Some(policy) = cli.friend_overflow {
        config.friend_overflow_policy = policy.into();
    }
    config.classifier_fail_fast |= cli.fail_fast;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = build_config(&cli)?;
    let records = load_participants(&cli.input)
        .with_context(|| format!("loading participants from {}", cli.input.display()))?;
    let formation = form_teams(records, &KeywordClassifier, &config).context("forming teams")?;
    let reports = summarize(&formation.pool, &formation.scorer, &formation.teams);

    if let Some(query) = &cli.find {
        let report = find_member(&reports, query)
            .ok_or_else(|| anyhow::anyhow!("no participant matches {query:?}"))?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            println!("{report}");
        }
        return Ok(());
    }

    let summary = run_summary(&formation.pool, &formation.teams);
    if cli.json {
        let output = serde_json::json!({ "teams": reports, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for report in &reports {
            println!("{report}");
        }
        print!("{summary}");
    }
    Ok(())
}
