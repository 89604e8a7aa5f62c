use std::path::{Path, PathBuf};

use log::debug;
use which::which;

use crate::client::{JabbaClient, JabbaEnvironment};

#[derive(Debug, Clone)]
pub struct JabbaDetection {
    pub found: bool,
    pub jabba_home: Option<PathBuf>,
    pub jabba_exe: Option<PathBuf>,
    pub version: Option<String>,
    pub in_path: bool,
}

impl JabbaDetection {
    fn not_found(jabba_home: Option<PathBuf>) -> Self {
        Self {
            found: false,
            jabba_home,
            jabba_exe: None,
            version: None,
            in_path: false,
        }
    }
}

/// Locate jabba, preferring an explicit home over `JABBA_HOME`, `PATH`, and
/// finally `~/.jabba`.
pub async fn detect_jabba(configured_home: Option<&Path>) -> JabbaDetection {
    let env_home = std::env::var_os("JABBA_HOME").map(PathBuf::from);
    let jabba_home = select_jabba_home(configured_home, env_home, javi_platform::default_jabba_home());
    let on_path = which(jabba_binary_name()).ok();

    debug!("jabba detection: home={jabba_home:?}, on_path={on_path:?}");

    let Some(environment) = environment_for(jabba_home.as_deref(), on_path.as_deref()) else {
        return JabbaDetection::not_found(jabba_home);
    };

    let jabba_exe = match &environment {
        JabbaEnvironment::Windows { jabba_exe } => Some(jabba_exe.clone()),
        JabbaEnvironment::Unix { .. } => None,
    };

    let version = JabbaClient {
        environment,
        timeouts: crate::client::CommandTimeouts::default(),
    }
    .version()
    .await
    .ok()
    .map(|v| v.trim_start_matches('v').to_string());

    JabbaDetection {
        found: version.is_some(),
        jabba_home,
        jabba_exe,
        version,
        in_path: on_path.is_some(),
    }
}

/// Build the command environment for a detected installation.
#[must_use]
pub fn environment_for(
    jabba_home: Option<&Path>,
    on_path: Option<&Path>,
) -> Option<JabbaEnvironment> {
    if cfg!(windows) {
        let exe = jabba_home
            .map(|home| home.join("bin").join(jabba_binary_name()))
            .filter(|exe| exe.exists())
            .or_else(|| on_path.map(Path::to_path_buf))?;
        return Some(JabbaEnvironment::Windows { jabba_exe: exe });
    }

    let home = jabba_home
        .filter(|home| home.join("jabba.sh").exists())
        .map(Path::to_path_buf)
        .or_else(|| {
            // `<home>/bin/jabba` on PATH: walk back up to the home.
            on_path
                .and_then(Path::parent)
                .and_then(Path::parent)
                .filter(|home| home.join("jabba.sh").exists())
                .map(Path::to_path_buf)
        })?;
    Some(JabbaEnvironment::Unix { jabba_home: home })
}

fn select_jabba_home(
    configured: Option<&Path>,
    env_home: Option<PathBuf>,
    default_home: Option<PathBuf>,
) -> Option<PathBuf> {
    configured
        .map(Path::to_path_buf)
        .or(env_home)
        .or(default_home)
}

fn jabba_binary_name() -> &'static str {
    if cfg!(windows) { "jabba.exe" } else { "jabba" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_home_takes_priority() {
        let home = select_jabba_home(
            Some(Path::new("/opt/jabba")),
            Some(PathBuf::from("/env/jabba")),
            Some(PathBuf::from("/home/user/.jabba")),
        );
        assert_eq!(home, Some(PathBuf::from("/opt/jabba")));
    }

    #[test]
    fn env_home_beats_default_home() {
        let home = select_jabba_home(
            None,
            Some(PathBuf::from("/env/jabba")),
            Some(PathBuf::from("/home/user/.jabba")),
        );
        assert_eq!(home, Some(PathBuf::from("/env/jabba")));
    }

    #[cfg(unix)]
    #[test]
    fn environment_for_requires_jabba_script() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        assert!(environment_for(Some(temp_dir.path()), None).is_none());

        std::fs::write(temp_dir.path().join("jabba.sh"), "# jabba").expect("write script");
        let environment =
            environment_for(Some(temp_dir.path()), None).expect("script makes home usable");

        assert!(matches!(
            environment,
            JabbaEnvironment::Unix { ref jabba_home } if jabba_home == temp_dir.path()
        ));
    }

    #[cfg(unix)]
    #[test]
    fn environment_for_derives_home_from_binary_on_path() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(temp_dir.path().join("jabba.sh"), "# jabba").expect("write script");
        let binary = temp_dir.path().join("bin").join("jabba");

        let environment = environment_for(None, Some(&binary)).expect("home derived from PATH");

        assert!(matches!(
            environment,
            JabbaEnvironment::Unix { ref jabba_home } if jabba_home == temp_dir.path()
        ));
    }
}
