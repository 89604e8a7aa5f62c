use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use javi_jabba::CommandTimeouts;
use javi_platform::AppPaths;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub jabba_home: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub auto_recommend: bool,

    #[serde(default = "default_true")]
    pub auto_correct: bool,

    #[serde(default = "default_apply_cooldown")]
    pub apply_cooldown_ms: u64,

    #[serde(default = "default_watch_interval")]
    pub watch_interval_secs: u64,

    #[serde(default = "default_install_timeout")]
    pub install_timeout_secs: u64,

    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_secs: u64,

    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_true() -> bool {
    true
}

fn default_apply_cooldown() -> u64 {
    2000
}

fn default_watch_interval() -> u64 {
    5
}

fn default_install_timeout() -> u64 {
    600
}

fn default_operation_timeout() -> u64 {
    60
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            jabba_home: None,
            auto_recommend: true,
            auto_correct: true,
            apply_cooldown_ms: default_apply_cooldown(),
            watch_interval_secs: default_watch_interval(),
            install_timeout_secs: default_install_timeout(),
            operation_timeout_secs: default_operation_timeout(),
            fetch_timeout_secs: default_fetch_timeout(),
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

impl AppSettings {
    pub fn load(paths: &AppPaths) -> Self {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            match std::fs::read_to_string(&settings_path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => Self::default(),
            }
        } else {
            Self::default()
        }
    }

    pub fn save(&self, paths: &AppPaths) -> Result<(), std::io::Error> {
        paths.ensure_dirs()?;

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.settings_file(), content)?;
        Ok(())
    }

    pub fn command_timeouts(&self) -> CommandTimeouts {
        CommandTimeouts {
            install: Duration::from_secs(self.install_timeout_secs),
            operation: Duration::from_secs(self.operation_timeout_secs),
            fetch: Duration::from_secs(self.fetch_timeout_secs),
        }
    }

    pub fn apply_cooldown(&self) -> Duration {
        Duration::from_millis(self.apply_cooldown_ms)
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_secs(self.watch_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::AppSettings;
    use javi_platform::AppPaths;

    #[test]
    fn app_settings_defaults_match_expected_values() {
        let settings = AppSettings::default();

        assert!(settings.auto_recommend);
        assert!(settings.auto_correct);
        assert_eq!(settings.apply_cooldown_ms, 2000);
        assert_eq!(settings.watch_interval_secs, 5);
        assert_eq!(settings.install_timeout_secs, 600);
        assert_eq!(settings.operation_timeout_secs, 60);
        assert_eq!(settings.fetch_timeout_secs, 30);
        assert!(!settings.debug_logging);
        assert_eq!(settings.max_log_size_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn partial_json_fills_missing_fields_with_defaults() {
        let settings: AppSettings = serde_json::from_value(json!({
            "auto_correct": false,
            "jabba_home": "/opt/jabba"
        }))
        .expect("settings JSON should deserialize");

        assert!(!settings.auto_correct);
        assert!(settings.auto_recommend);
        assert_eq!(
            settings.jabba_home.as_deref(),
            Some(std::path::Path::new("/opt/jabba"))
        );
        assert_eq!(settings.apply_cooldown_ms, 2000);
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let paths = AppPaths::rooted_at(temp_dir.path());
        paths.ensure_dirs().expect("create dirs");
        std::fs::write(paths.settings_file(), "{ not json").expect("write settings");

        assert_eq!(AppSettings::load(&paths), AppSettings::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let paths = AppPaths::rooted_at(temp_dir.path());
        let settings = AppSettings {
            watch_interval_secs: 12,
            debug_logging: true,
            ..AppSettings::default()
        };

        settings.save(&paths).expect("save settings");

        assert_eq!(AppSettings::load(&paths), settings);
    }

    #[test]
    fn durations_derive_from_fields() {
        let settings = AppSettings {
            apply_cooldown_ms: 1500,
            watch_interval_secs: 0,
            install_timeout_secs: 90,
            ..AppSettings::default()
        };

        assert_eq!(settings.apply_cooldown().as_millis(), 1500);
        assert_eq!(settings.watch_interval().as_secs(), 1);
        assert_eq!(settings.command_timeouts().install.as_secs(), 90);
    }
}
