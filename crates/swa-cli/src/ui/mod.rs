//! Terminal output: status lines and the adapt summary.
//!
//! Everything here writes to stderr so stdout stays free for command
//! output (generated config, emulated platform JSON, rewritten sources).
//!
//! ```no_run
//! use swa_cli::ui;
//!
//! ui::init_colors(false);
//! ui::info("Loading configuration...");
//! ui::success("Adapter finished");
//! ```

mod format;
mod messages;

pub use format::{format_duration, print_adapt_summary};
pub use messages::{error, info, success, warning};

use std::sync::atomic::{AtomicBool, Ordering};

static COLORS: AtomicBool = AtomicBool::new(false);

/// Whether color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise colors follow whether
/// stderr is a terminal.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Decide once whether status lines are colored. `--no-color` always wins.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

/// Apply `style` only when colors are enabled.
pub(crate) fn paint<T: std::fmt::Display + ?Sized>(text: &T, style: impl Fn(&T) -> String) -> String {
    if colors_enabled() {
        style(text)
    } else {
        text.to_string()
    }
}
