#[cfg(windows)]
use std::os::windows::process::CommandExt;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x08000000;

/// Adjustments applied to every external command javi spawns.
pub trait HideWindow {
    /// Suppress the console window Windows would otherwise flash.
    fn hide_window(&mut self) -> &mut Self;

    /// Ask the child for uncoloured, non-interactive output.
    fn plain_output(&mut self) -> &mut Self;
}

impl HideWindow for tokio::process::Command {
    #[cfg(windows)]
    fn hide_window(&mut self) -> &mut Self {
        self.creation_flags(CREATE_NO_WINDOW)
    }

    #[cfg(not(windows))]
    fn hide_window(&mut self) -> &mut Self {
        self
    }

    fn plain_output(&mut self) -> &mut Self {
        self.env("TERM", "dumb").env("NO_COLOR", "1")
    }
}

#[cfg(test)]
mod tests {
    use super::HideWindow;

    #[test]
    fn hide_window_is_chainable() {
        let mut cmd = tokio::process::Command::new("echo");
        let before = &raw mut cmd;
        let after = cmd.hide_window() as *mut tokio::process::Command;
        assert_eq!(before, after);
    }

    #[test]
    fn plain_output_sets_no_color_environment() {
        let mut cmd = tokio::process::Command::new("echo");
        cmd.plain_output();

        let envs: Vec<_> = cmd
            .as_std()
            .get_envs()
            .filter_map(|(k, v)| Some((k.to_str()?.to_string(), v?.to_str()?.to_string())))
            .collect();

        assert!(envs.contains(&("NO_COLOR".to_string(), "1".to_string())));
        assert!(envs.contains(&("TERM".to_string(), "dumb".to_string())));
    }
}
