use crate::bundle::load_bundle;
use crate::config::{EmbedMode, ViewerConfig};
use crate::error::ViewerError;
use crate::render::{Embedded, render_page};
use crate::scanner::{SimLogScanner, TeamDir};
use serde::Serialize;
use std::path::PathBuf;
use teamcomm_log::LogStats;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TeamStatus {
    Generated {
        output: PathBuf,
        files: usize,
        skipped: usize,
        stats: LogStats,
    },
    NoLogs,
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamOutcome {
    pub match_name: String,
    pub team_name: String,
    #[serde(flatten)]
    pub status: TeamStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateReport {
    pub teams: Vec<TeamOutcome>,
}

impl GenerateReport {
    pub fn generated(&self) -> usize {
        self.count(|s| matches!(s, TeamStatus::Generated { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, TeamStatus::Failed { .. }))
    }

    pub fn empty(&self) -> usize {
        self.count(|s| matches!(s, TeamStatus::NoLogs))
    }

    fn count(&self, pred: impl Fn(&TeamStatus) -> bool) -> usize {
        self.teams.iter().filter(|t| pred(&t.status)).count()
    }
}

/// Writes one standalone viewer page per team found under the log root.
pub struct Generator {
    config: ViewerConfig,
    scanner: SimLogScanner,
}

impl Generator {
    pub fn new(config: ViewerConfig) -> Result<Self, ViewerError> {
        let scanner = SimLogScanner::new(&config)?;
        Ok(Self { config, scanner })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn scanner(&self) -> &SimLogScanner {
        &self.scanner
    }

    /// Generates pages for every team.
    ///
    /// Only a missing log root aborts the run. Per-team problems end up in
    /// the report.
    pub fn run(&self) -> Result<GenerateReport, ViewerError> {
        let mut report = GenerateReport::default();
        for match_dir in self.scanner.scan()? {
            log::info!("Match: {}", match_dir.name);
            for team in &match_dir.teams {
                report.teams.push(self.generate_team(team));
            }
        }
        log::info!(
            "Generated {} viewer(s), {} failed, {} without logs",
            report.generated(),
            report.failed(),
            report.empty()
        );
        Ok(report)
    }

    pub fn generate_team(&self, team: &TeamDir) -> TeamOutcome {
        let status = self.team_status(team);
        match &status {
            TeamStatus::Generated { output, .. } => {
                log::info!("{}/{}: wrote {:?}", team.match_name, team.name, output)
            }
            TeamStatus::NoLogs => log::info!("{}/{}: no log files", team.match_name, team.name),
            TeamStatus::Failed { reason } => {
                log::error!("{}/{}: {}", team.match_name, team.name, reason)
            }
        }
        TeamOutcome {
            match_name: team.match_name.clone(),
            team_name: team.name.clone(),
            status,
        }
    }

    fn team_status(&self, team: &TeamDir) -> TeamStatus {
        if !team.has_logs() {
            return TeamStatus::NoLogs;
        }

        let bundle = load_bundle(team);
        if bundle.is_empty() {
            return TeamStatus::Failed {
                reason: format!("none of {} log file(s) could be read", team.log_files.len()),
            };
        }

        let records = bundle.parse_all();
        let stats = LogStats::from_records(&records);
        let embedded = match self.config.embed {
            EmbedMode::Raw => Embedded::raw(&bundle.files),
            EmbedMode::Parsed => Embedded::parsed(&records),
        };

        let output = team.path.join(&self.config.output_name);
        let written = render_page(&team.name, &embedded).and_then(|html| {
            std::fs::write(&output, html).map_err(|source| ViewerError::FileUnwritable {
                path: output.clone(),
                source,
            })
        });

        match written {
            Ok(()) => TeamStatus::Generated {
                output,
                files: bundle.files.len(),
                skipped: bundle.skipped.len(),
                stats,
            },
            Err(e) => TeamStatus::Failed {
                reason: e.to_string(),
            },
        }
    }
}
