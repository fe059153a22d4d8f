/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

fn is_placeholder(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v == "--"
}

/// Grey out empty cells and placeholders, leave everything else untouched.
pub fn colorize_optional(value: &str) -> String {
    if is_placeholder(value) {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Status marker for an attendance row.
pub fn colorize_status(open: bool, early: bool) -> String {
    if open {
        format!("{YELLOW}open{RESET}")
    } else if early {
        format!("{CYAN}early{RESET}")
    } else {
        format!("{GREEN}closed{RESET}")
    }
}
