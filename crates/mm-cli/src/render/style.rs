//! ANSI styling and terminal width helpers.

pub const BOLD: &str = "1";
pub const DIM: &str = "2";
pub const RED: &str = "31";
pub const GREEN: &str = "32";
pub const YELLOW: &str = "33";
pub const BLUE: &str = "34";
pub const MAGENTA: &str = "35";
pub const CYAN: &str = "36";
pub const BOLD_GREEN: &str = "1;32";
pub const BOLD_CYAN: &str = "1;36";
pub const BOLD_WHITE: &str = "1;97";

/// Wrap `value` in an SGR sequence when `color` is on.
#[must_use]
pub fn paint(value: &str, code: &str, color: bool) -> String {
    if color && !value.is_empty() {
        format!("\u{1b}[{code}m{value}\u{1b}[0m")
    } else {
        value.to_string()
    }
}

#[must_use]
pub fn strip_ansi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' && chars.peek() == Some(&'[') {
            let _ = chars.next();
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(ch);
    }
    out
}

/// Terminal columns taken by `ch`: two for CJK and fullwidth forms.
#[must_use]
pub const fn char_width(ch: char) -> usize {
    match ch as u32 {
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6 => 2,
        _ => 1,
    }
}

/// Visible width of `value`, ignoring ANSI sequences.
#[must_use]
pub fn display_width(value: &str) -> usize {
    strip_ansi(value).chars().map(char_width).sum()
}
