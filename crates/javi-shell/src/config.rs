use crate::detect::ShellType;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub struct ShellConfig {
    pub shell_type: ShellType,
    pub config_path: PathBuf,
    pub content: String,
}

impl ShellConfig {
    pub fn load(shell_type: ShellType, config_path: PathBuf) -> Result<Self, ConfigError> {
        let content = if config_path.exists() {
            fs::read_to_string(&config_path)?
        } else {
            String::new()
        };

        Ok(Self {
            shell_type,
            config_path,
            content,
        })
    }

    #[must_use]
    pub fn has_init(&self, marker: &str) -> bool {
        self.content
            .lines()
            .any(|line| line.contains(marker) && !line.trim_start().starts_with('#'))
    }

    pub fn add_init(&mut self, init_command: &str, label: &str) -> ShellConfigEdit {
        let separator = if self.content.is_empty() || self.content.ends_with('\n') {
            ""
        } else {
            "\n"
        };
        let addition = format!("{separator}\n# {label}\n{init_command}\n");
        let modified = format!("{}{}", self.content, addition);

        ShellConfigEdit {
            original: self.content.clone(),
            modified,
            changes: vec![format!("Add initialization: {init_command}")],
        }
    }

    /// Drop every active line mentioning `marker` together with the label
    /// comment directly above it.
    pub fn remove_init(&mut self, marker: &str, label: &str) -> ShellConfigEdit {
        let label_line = format!("# {label}");
        let lines: Vec<&str> = self.content.lines().collect();
        let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
        let mut changes = Vec::new();

        for line in lines {
            if line.contains(marker) && !line.trim_start().starts_with('#') {
                if kept.last().is_some_and(|prev| prev.trim() == label_line) {
                    kept.pop();
                }
                changes.push(format!("Remove initialization: {}", line.trim()));
                continue;
            }
            kept.push(line);
        }

        let mut modified = kept.join("\n");
        if self.content.ends_with('\n') && !modified.is_empty() {
            modified.push('\n');
        }

        ShellConfigEdit {
            original: self.content.clone(),
            modified,
            changes,
        }
    }

    pub fn apply_edit(&mut self, edit: &ShellConfigEdit) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.config_path, &edit.modified)?;
        self.content.clone_from(&edit.modified);

        Ok(())
    }
}

pub struct ShellConfigEdit {
    pub original: String,
    pub modified: String,
    pub changes: Vec<String>,
}

impl ShellConfigEdit {
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    #[must_use]
    pub fn diff_preview(&self) -> String {
        if !self.has_changes() {
            return "No changes needed.".to_string();
        }

        let mut preview = String::new();

        for change in &self.changes {
            let _ = writeln!(preview, "+ {change}");
        }

        preview
    }
}
