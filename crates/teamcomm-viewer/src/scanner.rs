use crate::ViewerConfig;
use crate::error::ViewerError;
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// One simulated match: `<log_root>/<match>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDir {
    pub name: String,
    pub path: PathBuf,
    pub teams: Vec<TeamDir>,
}

/// One team inside a match, with its per-robot log files sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDir {
    pub match_name: String,
    pub name: String,
    pub path: PathBuf,
    pub log_files: Vec<PathBuf>,
}

impl TeamDir {
    pub fn has_logs(&self) -> bool {
        !self.log_files.is_empty()
    }
}

pub struct SimLogScanner {
    root: PathBuf,
    pattern: Pattern,
    output_name: String,
}

impl SimLogScanner {
    pub fn new(config: &ViewerConfig) -> Result<Self, ViewerError> {
        Ok(Self {
            root: config.log_root.clone(),
            pattern: Pattern::new(&config.file_pattern)?,
            output_name: config.output_name.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A generated page is never a log, whatever the pattern says.
    pub fn is_log_file(&self, file_name: &str) -> bool {
        file_name != self.output_name && self.pattern.matches(file_name)
    }

    /// Lists every match and team under the log root, sorted by name.
    pub fn scan(&self) -> Result<Vec<MatchDir>, ViewerError> {
        if !self.root.is_dir() {
            return Err(ViewerError::LogRootMissing(self.root.clone()));
        }

        log::info!("Scanning logs in: {:?}", self.root);
        let matches = subdirs(&self.root)
            .map(|entry| {
                let teams = subdirs(entry.path())
                    .map(|team| self.scan_team(team.path()))
                    .collect();
                MatchDir {
                    name: entry_name(&entry),
                    path: entry.into_path(),
                    teams,
                }
            })
            .collect();
        Ok(matches)
    }

    /// Collects the log files of a single team directory.
    ///
    /// The match name is taken from the parent directory.
    pub fn scan_team(&self, team_path: &Path) -> TeamDir {
        let log_files: Vec<PathBuf> = WalkDir::new(team_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && self.is_log_file(&entry_name(e)))
            .map(DirEntry::into_path)
            .collect();

        TeamDir {
            match_name: file_name_of(team_path.parent()),
            name: file_name_of(Some(team_path)),
            path: team_path.to_path_buf(),
            log_files,
        }
    }
}

fn subdirs(dir: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}

fn file_name_of(path: Option<&Path>) -> String {
    path.and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_scan_layout() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("20250102_101500/Team5/team_comm_p2.txt"));
        touch(&root.join("20250102_101500/Team5/team_comm_p1.txt"));
        touch(&root.join("20250102_101500/Team5/notes.txt"));
        touch(&root.join("20250102_101500/Team5/view_logs_standalone.html"));
        touch(&root.join("20250102_101500/Team12/other.log"));
        touch(&root.join("20250101_090000/Team1/team_comm_p1.txt"));
        touch(&root.join("stray_file.txt"));

        let config = ViewerConfig::new().with_log_root(root);
        let matches = SimLogScanner::new(&config).unwrap().scan().unwrap();

        let names: Vec<_> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["20250101_090000", "20250102_101500"]);

        let teams = &matches[1].teams;
        let team_names: Vec<_> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(team_names, vec!["Team12", "Team5"]);

        assert!(!teams[0].has_logs());
        let files: Vec<_> = teams[1]
            .log_files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, vec!["team_comm_p1.txt", "team_comm_p2.txt"]);
        assert_eq!(teams[1].match_name, "20250102_101500");
    }

    #[test]
    fn test_catch_all_pattern_skips_output_page() {
        let dir = tempfile::tempdir().unwrap();
        let team = dir.path().join("m1/Team5");
        touch(&team.join("team_comm_p1.txt"));
        touch(&team.join("view_logs_standalone.html"));

        let config = ViewerConfig {
            file_pattern: "*".to_string(),
            ..ViewerConfig::new().with_log_root(dir.path())
        };
        let scanner = SimLogScanner::new(&config).unwrap();
        assert!(scanner.is_log_file("notes.txt"));
        assert!(!scanner.is_log_file("view_logs_standalone.html"));
        assert_eq!(scanner.scan_team(&team).log_files, vec![team.join("team_comm_p1.txt")]);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViewerConfig::new().with_log_root(dir.path().join("nope"));
        let err = SimLogScanner::new(&config).unwrap().scan().unwrap_err();
        assert!(matches!(err, ViewerError::LogRootMissing(_)));
    }

    #[test]
    fn test_invalid_pattern() {
        let config = ViewerConfig {
            file_pattern: "team_comm_p[.txt".to_string(),
            ..ViewerConfig::default()
        };
        assert!(matches!(
            SimLogScanner::new(&config),
            Err(ViewerError::InvalidPattern(_))
        ));
    }
}
