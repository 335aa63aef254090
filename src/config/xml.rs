//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a commented template if missing (unless EDMV_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; CLI precedence is
//!   applied by the app orchestrator.
//! - Unknown XML fields are refused so typos surface instead of being
//!   silently ignored.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    editor_command: Option<String>,
    /// Whitespace-separated extra editor arguments
    editor_args: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    outcome_log: Option<String>,
    case_insensitive_fs: Option<bool>,
}

/// Settings found in the config file; `None` fields were absent.
#[derive(Debug, Default)]
pub struct FileSettings {
    pub editor_command: Option<String>,
    pub editor_args: Option<Vec<String>>,
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub outcome_log: Option<PathBuf>,
    pub case_insensitive_fs: Option<bool>,
}

impl FileSettings {
    /// Overlay the file's settings onto a Config. CLI overrides happen later.
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(cmd) = &self.editor_command {
            cfg.editor_command = cmd.clone();
        }
        if let Some(args) = &self.editor_args {
            cfg.editor_args = args.clone();
        }
        if let Some(lvl) = &self.log_level {
            cfg.log_level = lvl.clone();
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(ol) = &self.outcome_log {
            cfg.outcome_log = Some(ol.clone());
        }
        if let Some(ci) = self.case_insensitive_fs {
            cfg.case_insensitive_fs = ci;
        }
    }
}

/// Read config from XML. EDMV_CONFIG overrides the default location.
/// Returns None when the file does not exist or parses to nothing useful;
/// a template is written at the default path on first run.
pub fn load_config_from_xml() -> Option<FileSettings> {
    let env_set = env::var_os("EDMV_CONFIG").is_some();
    let cfg_path = default_config_path()?;

    if !cfg_path.exists() {
        if !env_set {
            let _ = create_template_config(&cfg_path);
        }
        return None;
    }

    let content = fs::read_to_string(&cfg_path).ok()?;
    let parsed: XmlConfig = match from_xml_str(&content) {
        Ok(x) => x,
        Err(e) => {
            warn!(
                path = %cfg_path.display(),
                error = %e,
                "ignoring unparsable config file"
            );
            return None;
        }
    };

    let non_empty = |s: &String| !s.trim().is_empty();
    Some(FileSettings {
        editor_command: parsed
            .editor_command
            .map(|s| s.trim().to_string())
            .filter(non_empty),
        editor_args: parsed.editor_args.map(|s| {
            s.split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        }),
        log_level: parsed.log_level.as_deref().and_then(LogLevel::parse),
        log_file: parsed
            .log_file
            .filter(non_empty)
            .map(|s| PathBuf::from(s.trim())),
        outcome_log: parsed
            .outcome_log
            .filter(non_empty)
            .map(|s| PathBuf::from(s.trim())),
        case_insensitive_fs: parsed.case_insensitive_fs,
    })
}

/// Create parent directory and write a template config with conservative
/// permissions (dir 0700, file 0600 on Unix).
pub fn create_template_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let content = "<config>\n  <editor_command>vi</editor_command>\n  <editor_args></editor_args>\n  <log_level>normal</log_level>\n</config>\n";
    fs::write(path, content)
        .with_context(|| format!("write template config '{}'", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}
