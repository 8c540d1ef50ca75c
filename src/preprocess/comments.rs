//! Built-in comment stripper
//!
//! A character-level state machine that removes `//` and `/* */` comments
//! without touching comment-like text inside string or character literals.
//! Newlines are always preserved, including those inside block comments, so
//! later stages can still report the original line number.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    InString,
    InChar,
    LineComment,
    BlockComment,
}

/// Remove all comments from `source`.
///
/// A block comment becomes a single space so that `a/**/b` still separates
/// into two words. An unterminated block comment swallows the rest of the
/// input, which is what a C compiler would reject anyway.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut mode = Mode::Normal;
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        match mode {
            Mode::Normal => match ch {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    mode = Mode::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push(' ');
                    mode = Mode::BlockComment;
                }
                '"' => {
                    out.push(ch);
                    mode = Mode::InString;
                }
                '\'' => {
                    out.push(ch);
                    mode = Mode::InChar;
                }
                _ => out.push(ch),
            },
            Mode::InString | Mode::InChar => {
                out.push(ch);
                let closing = if mode == Mode::InString { '"' } else { '\'' };
                if ch == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if ch == closing || ch == '\n' {
                    mode = Mode::Normal;
                }
            }
            Mode::LineComment => {
                if ch == '\\' && chars.peek() == Some(&'\n') {
                    // continued comment line
                    chars.next();
                    out.push('\n');
                } else if ch == '\n' {
                    out.push('\n');
                    mode = Mode::Normal;
                }
            }
            Mode::BlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    mode = Mode::Normal;
                } else if ch == '\n' {
                    out.push('\n');
                }
            }
        }
    }

    out
}
