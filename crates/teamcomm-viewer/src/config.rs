use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How a team's logs are embedded in the generated page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedMode {
    /// Raw `{filename, content}` pairs, parsed by the page's script on load.
    #[default]
    Raw,
    /// Records produced by [`teamcomm_log::RecordParser`] ahead of time.
    Parsed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Directory holding one sub-directory per match.
    pub log_root: PathBuf,
    /// Glob matched against file names inside a team directory.
    pub file_pattern: String,
    /// File name of the page written into each team directory.
    pub output_name: String,
    pub embed: EmbedMode,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            log_root: PathBuf::from("Config/Sim_Logs"),
            file_pattern: "team_comm_p*.txt".to_string(),
            output_name: "view_logs_standalone.html".to_string(),
            embed: EmbedMode::Raw,
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log_root(mut self, log_root: impl Into<PathBuf>) -> Self {
        self.log_root = log_root.into();
        self
    }

    pub fn with_embed(mut self, embed: EmbedMode) -> Self {
        self.embed = embed;
        self
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        log::debug!("Loaded viewer config from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config: ViewerConfig = serde_json::from_str(r#"{"embed": "parsed"}"#).unwrap();
        assert_eq!(config.embed, EmbedMode::Parsed);
        assert_eq!(config.log_root, PathBuf::from("Config/Sim_Logs"));
        assert_eq!(config.file_pattern, "team_comm_p*.txt");
        assert_eq!(config.output_name, "view_logs_standalone.html");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("viewer.json");

        let config = ViewerConfig::new()
            .with_log_root("/data/Sim_Logs")
            .with_embed(EmbedMode::Parsed);
        config.save(&path).unwrap();

        let loaded = ViewerConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::write(&path, "{ invalid }").unwrap();
        assert!(ViewerConfig::load(&path).is_err());
        assert!(ViewerConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
