//! Terminal preferences resolved once from the global flags.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat, ProgressMode};

/// Narrowest width we will shrink tables to.
const MIN_TABLE_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub color: bool,
    pub progress: bool,
    pub width: Option<usize>,
}

/// What the process can observe about its terminal.
#[derive(Clone, Copy, Debug)]
struct Terminal {
    stdout_tty: bool,
    stderr_tty: bool,
    no_color: bool,
    columns: Option<usize>,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            stderr_tty: std::io::stderr().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: std::env::var("COLUMNS").ok().and_then(|v| v.parse().ok()),
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(resolve(flags, Terminal::detect()));
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

fn resolve(flags: &GlobalFlags, term: Terminal) -> UiPrefs {
    let table = flags.format == OutputFormat::Table;
    let color = match flags.color {
        ColorMode::Always => table,
        ColorMode::Never => false,
        ColorMode::Auto => table && term.stdout_tty && !term.no_color,
    };

    // Bars draw on stderr, so JSON on stdout stays clean either way.
    let progress = !flags.quiet
        && match flags.progress {
            ProgressMode::On => true,
            ProgressMode::Off => false,
            ProgressMode::Auto => term.stderr_tty && flags.format != OutputFormat::Json,
        };

    UiPrefs {
        color,
        progress,
        width: term.columns.filter(|w| *w >= MIN_TABLE_WIDTH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(format: OutputFormat) -> GlobalFlags {
        GlobalFlags {
            format,
            limit: None,
            quiet: false,
            verbose: false,
            color: ColorMode::Auto,
            progress: ProgressMode::Auto,
        }
    }

    const TTY: Terminal = Terminal {
        stdout_tty: true,
        stderr_tty: true,
        no_color: false,
        columns: Some(120),
    };

    #[test]
    fn auto_colors_tables_on_a_terminal() {
        let prefs = resolve(&flags(OutputFormat::Table), TTY);
        assert!(prefs.color);
        assert!(prefs.progress);
        assert_eq!(prefs.width, Some(120));
    }

    #[test]
    fn no_color_env_and_pipes_disable_color() {
        let no_color = Terminal {
            no_color: true,
            ..TTY
        };
        assert!(!resolve(&flags(OutputFormat::Table), no_color).color);

        let piped = Terminal {
            stdout_tty: false,
            ..TTY
        };
        assert!(!resolve(&flags(OutputFormat::Table), piped).color);
    }

    #[test]
    fn json_never_colors_and_hides_auto_progress() {
        let prefs = resolve(&flags(OutputFormat::Json), TTY);
        assert!(!prefs.color);
        assert!(!prefs.progress);
    }

    #[test]
    fn explicit_progress_and_quiet() {
        let mut on = flags(OutputFormat::Json);
        on.progress = ProgressMode::On;
        assert!(resolve(&on, TTY).progress);

        on.quiet = true;
        assert!(!resolve(&on, TTY).progress);
    }

    #[test]
    fn tiny_terminals_are_ignored() {
        let narrow = Terminal {
            columns: Some(20),
            ..TTY
        };
        assert_eq!(resolve(&flags(OutputFormat::Table), narrow).width, None);
    }
}
