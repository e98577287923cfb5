//! Terminal utilities for title setting

use std::io::{IsTerminal, Write};

/// Sets the terminal title to the specified text
///
/// Written to stderr, and only when stderr is a terminal, so piped reports stay clean.
pub fn set_terminal_title(title: &str) {
    let mut stderr = std::io::stderr();
    if stderr.is_terminal() {
        // ANSI escape sequence to set terminal title
        let _ = write!(stderr, "\x1b]0;{}\x07", title);
    }
}

/// Sets the terminal title and ensures it's flushed to the terminal
pub fn set_terminal_title_and_flush(title: &str) {
    set_terminal_title(title);
    let _ = std::io::stderr().flush();
}
