//! Output markup for expanded clue text.

/// How expanded clue text is escaped and emphasized.
pub trait Markup {
    /// Appends `text` to `out`, escaped for this format.
    fn escape(&self, text: &str, out: &mut String);

    /// Appends already-rendered `inner` to `out` as emphasized text.
    fn emphasis(&self, inner: &str, out: &mut String);
}

/// HTML-flavored markup, as accepted in ipuz clue strings.
///
/// Only `&`, `<` and `>` are escaped; quotes are common in clues and are
/// left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html;

impl Markup for Html {
    fn escape(&self, text: &str, out: &mut String) {
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                _ => out.push(c),
            }
        }
    }

    fn emphasis(&self, inner: &str, out: &mut String) {
        out.push_str("<i>");
        out.push_str(inner);
        out.push_str("</i>");
    }
}

/// Plain text with underscores for emphasis.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Markup for Plain {
    fn escape(&self, text: &str, out: &mut String) {
        out.push_str(text);
    }

    fn emphasis(&self, inner: &str, out: &mut String) {
        out.push('_');
        out.push_str(inner);
        out.push('_');
    }
}
