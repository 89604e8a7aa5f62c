use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl ShellType {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
            Self::PowerShell => "powershell",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bash" | "sh" => Some(Self::Bash),
            "zsh" => Some(Self::Zsh),
            "fish" => Some(Self::Fish),
            "powershell" | "pwsh" => Some(Self::PowerShell),
            _ => None,
        }
    }

    /// Shell named by a `$SHELL`-style path such as `/usr/bin/zsh`.
    #[must_use]
    pub fn from_shell_path(path: &str) -> Option<Self> {
        let name = path.rsplit(['/', '\\']).next()?;
        let name = name.strip_suffix(".exe").unwrap_or(name);
        Self::from_name(name)
    }

    /// Profile files in the order they are preferred.
    #[must_use]
    pub fn config_files(self) -> Vec<PathBuf> {
        let Some(home) = dirs::home_dir() else {
            return Vec::new();
        };

        match self {
            Self::Bash => vec![
                home.join(".bashrc"),
                home.join(".bash_profile"),
                home.join(".profile"),
            ],
            Self::Zsh => vec![home.join(".zshrc"), home.join(".zprofile")],
            Self::Fish => vec![home.join(".config").join("fish").join("config.fish")],
            Self::PowerShell => powershell_profiles(&home),
        }
    }

    /// Profile line that loads jabba into new shells.
    #[must_use]
    pub fn init_command(self) -> &'static str {
        match self {
            Self::Bash | Self::Zsh => {
                r#"[ -s "$HOME/.jabba/jabba.sh" ] && source "$HOME/.jabba/jabba.sh""#
            }
            Self::Fish => r#"[ -s "$HOME/.jabba/jabba.fish" ]; and source "$HOME/.jabba/jabba.fish""#,
            Self::PowerShell => {
                r#"if (Test-Path "$HOME\.jabba\jabba.ps1") { . "$HOME\.jabba\jabba.ps1" }"#
            }
        }
    }

    /// Text whose presence on an active line means jabba is already wired up.
    #[must_use]
    pub fn init_marker(self) -> &'static str {
        match self {
            Self::Bash | Self::Zsh => "jabba.sh",
            Self::Fish => "jabba.fish",
            Self::PowerShell => "jabba.ps1",
        }
    }
}

fn powershell_profiles(home: &std::path::Path) -> Vec<PathBuf> {
    let documents = dirs::document_dir().unwrap_or_else(|| home.join("Documents"));
    if cfg!(windows) {
        vec![
            documents
                .join("PowerShell")
                .join("Microsoft.PowerShell_profile.ps1"),
            documents
                .join("WindowsPowerShell")
                .join("Microsoft.PowerShell_profile.ps1"),
        ]
    } else {
        vec![
            home.join(".config")
                .join("powershell")
                .join("Microsoft.PowerShell_profile.ps1"),
        ]
    }
}

/// The user's login shell, falling back to the platform default.
#[must_use]
pub fn detect_shell() -> ShellType {
    std::env::var("SHELL")
        .ok()
        .and_then(|shell| ShellType::from_shell_path(&shell))
        .unwrap_or(if cfg!(windows) {
            ShellType::PowerShell
        } else {
            ShellType::Bash
        })
}

#[cfg(test)]
mod tests {
    use super::ShellType;

    #[test]
    fn from_shell_path_reads_basename() {
        assert_eq!(ShellType::from_shell_path("/usr/bin/zsh"), Some(ShellType::Zsh));
        assert_eq!(ShellType::from_shell_path("/bin/bash"), Some(ShellType::Bash));
        assert_eq!(
            ShellType::from_shell_path("C:\\Program Files\\PowerShell\\7\\pwsh.exe"),
            Some(ShellType::PowerShell)
        );
        assert_eq!(ShellType::from_shell_path("/usr/bin/nu"), None);
    }

    #[test]
    fn init_commands_contain_their_marker() {
        for shell in [
            ShellType::Bash,
            ShellType::Zsh,
            ShellType::Fish,
            ShellType::PowerShell,
        ] {
            assert!(shell.init_command().contains(shell.init_marker()));
        }
    }

    #[test]
    fn names_round_trip() {
        for shell in [
            ShellType::Bash,
            ShellType::Zsh,
            ShellType::Fish,
            ShellType::PowerShell,
        ] {
            assert_eq!(ShellType::from_name(shell.name()), Some(shell));
        }
    }
}
