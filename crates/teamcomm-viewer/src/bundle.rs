use crate::error::ViewerError;
use crate::scanner::TeamDir;
use serde::Serialize;
use std::fs;
use teamcomm_log::RecordParser;
use teamcomm_log::ir::LogRecord;

/// Raw content of one robot's log, as embedded in the viewer page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogFile {
    pub filename: String,
    pub content: String,
}

/// The readable logs of one team plus the files that had to be skipped.
#[derive(Debug, Default)]
pub struct TeamBundle {
    pub files: Vec<LogFile>,
    pub skipped: Vec<ViewerError>,
}

impl TeamBundle {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Parses every file in order, tagging records with their file name.
    pub fn parse_all(&self) -> Vec<LogRecord> {
        self.files
            .iter()
            .flat_map(|file| RecordParser::new(file.filename.as_str()).parse(&file.content))
            .collect()
    }
}

/// Reads a team's log files in file-name order.
///
/// A file that cannot be read as UTF-8 text is recorded in
/// [`TeamBundle::skipped`] and the remaining files are still loaded.
pub fn load_bundle(team: &TeamDir) -> TeamBundle {
    let mut bundle = TeamBundle::default();
    for path in &team.log_files {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match fs::read_to_string(path) {
            Ok(content) => bundle.files.push(LogFile { filename, content }),
            Err(source) => {
                log::warn!("Skipping unreadable log {:?}: {}", path, source);
                bundle.skipped.push(ViewerError::FileUnreadable {
                    path: path.clone(),
                    source,
                });
            }
        }
    }
    bundle
}
