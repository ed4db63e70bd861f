use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use teamcomm_log::ir::RecordKind;
use teamcomm_log::{LogStats, RecordFilter, RecordParser};
use teamcomm_viewer::{EmbedMode, GenerateReport, Generator, TeamOutcome, TeamStatus, ViewerConfig};

#[derive(Parser)]
#[command(name = "teamcomm")]
#[command(about = "Team-communication log tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a team_comm log file and emit its records as JSON
    Parse {
        /// Path to the log file
        #[arg(value_name = "FILE")]
        path: PathBuf,
        /// Keep only send or receive records
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        /// Keep only records from this robot
        #[arg(long)]
        robot: Option<u32>,
        /// Keep only records containing this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,
        /// Print summary counters instead of records
        #[arg(long)]
        stats: bool,
    },
    /// Write a standalone viewer page into every team directory
    Generate {
        #[command(flatten)]
        target: TargetArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate viewers, then regenerate them whenever a log changes
    Watch {
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(clap::Args)]
struct TargetArgs {
    /// Directory holding one sub-directory per match
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
    /// JSON viewer configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// How logs are embedded in the page
    #[arg(long, value_enum)]
    embed: Option<EmbedArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Send,
    Receive,
}

#[derive(Clone, Copy, ValueEnum)]
enum EmbedArg {
    Raw,
    Parsed,
}

impl From<KindArg> for RecordKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Send => RecordKind::Send,
            KindArg::Receive => RecordKind::Receive,
        }
    }
}

impl From<EmbedArg> for EmbedMode {
    fn from(embed: EmbedArg) -> Self {
        match embed {
            EmbedArg::Raw => EmbedMode::Raw,
            EmbedArg::Parsed => EmbedMode::Parsed,
        }
    }
}

impl TargetArgs {
    fn resolve(&self) -> anyhow::Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        if let Some(root) = &self.root {
            config.log_root = root.clone();
        }
        if let Some(embed) = self.embed {
            config.embed = embed.into();
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Parse {
            path,
            kind,
            robot,
            search,
            stats,
        } => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let records = RecordParser::new(file_label(path)).parse(&content);

            let filter = RecordFilter {
                kind: kind.map(Into::into),
                robot: *robot,
                search: search.clone(),
            };
            let selected = filter.apply(&records);

            if *stats {
                let stats = LogStats::from_records(selected);
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&selected)?);
            }
        }
        Commands::Generate { target, json } => {
            let generator = Generator::new(target.resolve()?)?;
            let report = generator.run()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Watch { target } => {
            let generator = Generator::new(target.resolve()?)?;
            teamcomm_viewer::watch::watch(&generator, print_outcome)?;
        }
    }
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_report(report: &GenerateReport) {
    for outcome in &report.teams {
        print_outcome(outcome);
    }
    println!(
        "{} generated, {} failed, {} without logs",
        report.generated(),
        report.failed(),
        report.empty()
    );
}

fn print_outcome(outcome: &TeamOutcome) {
    let team = format!("{}/{}", outcome.match_name, outcome.team_name);
    match &outcome.status {
        TeamStatus::Generated {
            output,
            files,
            stats,
            ..
        } => println!(
            "ok      {team}: {} ({files} file(s), {} record(s), {} robot(s))",
            output.display(),
            stats.total,
            stats.robot_count()
        ),
        TeamStatus::NoLogs => println!("skip    {team}: no log files"),
        TeamStatus::Failed { reason } => println!("failed  {team}: {reason}"),
    }
}
