//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{
    should_use_colors, OutputMode, ProbeTheme, ProgressSpinner, SpinnerHandle, UserInterface,
};

/// Terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: ProbeTheme,
    mode: OutputMode,
    spinners: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    ///
    /// `spinners` is turned off for CI and non-TTY output.
    pub fn new(mode: OutputMode, spinners: bool) -> Self {
        let theme = if should_use_colors() {
            ProbeTheme::new()
        } else {
            ProbeTheme::plain()
        };
        let term = Term::stdout();
        let spinners = spinners && term.is_term();

        Self {
            term,
            theme,
            mode,
            spinners,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        let stderr = Term::stderr();
        writeln!(&stderr, "{}", self.theme.format_error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.spinners && self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_header(title)).ok();
        }
    }
}

/// Create the terminal UI for the given mode.
pub fn create_ui(mode: OutputMode, spinners: bool) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode, spinners))
}
