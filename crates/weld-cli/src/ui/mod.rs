//! Terminal output: status messages and merge summaries.
//!
//! Status lines go to stderr. Command results (`weld graph`, `weld schema`)
//! go to stdout so they can be piped.
//!
//! ```no_run
//! use weld_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Merged 12 modules");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, format_size, print_merge_summary, print_plan};
pub use messages::{info, success};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Whether colors should be used on stderr.
///
/// `NO_COLOR` disables, `FORCE_COLOR` forces, otherwise colors are used when
/// a user is attending the terminal.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Decide once whether status output is colored.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    COLORS.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
