//! Token-ready formatting
//!
//! Rewrites each line so that a plain whitespace split yields the tokens the
//! parser expects:
//!
//! - every punctuation character except `_` is surrounded by spaces
//! - `->` and any adjacent pair of arithmetic/relational signs (`==`, `<=`,
//!   `+=`, `++`, `<<`, ...) stay together as one operator
//! - an empty literal pair (`""`, `''`, as left by the scrubber) stays together
//! - numeric literals keep their `.` and exponent sign (`3.14`, `1e-5`)
//!
//! Blank lines and preprocessor directives (including `\` continuations) are
//! dropped. Line structure itself is kept, one output line per input line, so
//! tokens can be traced back to where they came from.

/// The signs whose pairs form a single two-character operator.
pub fn is_math_sign(ch: char) -> bool {
    matches!(ch, '=' | '+' | '-' | '*' | '/' | '%' | '>' | '<')
}

/// Whether a line contributes nothing: empty, blank or a `#` directive.
pub fn skip_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Format a whole (scrubbed, comment-free) source text.
pub fn format_source(text: &str) -> String {
    let mut lines = Vec::new();
    let mut in_directive = false;

    for line in text.lines() {
        let continues = line.trim_end().ends_with('\\');

        if in_directive || line.trim_start().starts_with('#') {
            in_directive = continues;
            lines.push(String::new());
        } else if skip_line(line) {
            lines.push(String::new());
        } else {
            lines.push(format_line(line));
        }
    }

    lines.join("\n")
}

/// Format one line and collapse its whitespace runs to single spaces.
pub fn format_line(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut spaced = String::with_capacity(line.len() * 2);
    let mut word = String::new();
    let mut j = 0;

    while j < chars.len() {
        let ch = chars[j];
        let next = chars.get(j + 1).copied();

        if ch.is_alphanumeric() || ch == '_' {
            word.push(ch);
            spaced.push(ch);
            j += 1;
            continue;
        }

        if continues_number(&word, ch, next) {
            word.push(ch);
            spaced.push(ch);
            j += 1;
            continue;
        }

        word.clear();

        match next {
            Some(n) if (ch == '"' || ch == '\'') && n == ch => {
                push_spaced(&mut spaced, &[ch, n]);
                j += 2;
            }
            Some(n) if (ch == '-' && n == '>') || (is_math_sign(ch) && is_math_sign(n)) => {
                push_spaced(&mut spaced, &[ch, n]);
                j += 2;
            }
            _ if ch.is_ascii_punctuation() => {
                push_spaced(&mut spaced, &[ch]);
                j += 1;
            }
            _ => {
                spaced.push(ch);
                j += 1;
            }
        }
    }

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_spaced(out: &mut String, symbol: &[char]) {
    out.push(' ');
    out.extend(symbol);
    out.push(' ');
}

/// `.` or an exponent sign that belongs to the numeric literal being built.
fn continues_number(word: &str, ch: char, next: Option<char>) -> bool {
    let starts_numeric = word.chars().next().is_some_and(|c| c.is_ascii_digit());
    let next_digit = next.is_some_and(|c| c.is_ascii_digit());

    match ch {
        '.' => starts_numeric || (word.is_empty() && next_digit),
        '+' | '-' => {
            let is_hex = word.starts_with("0x") || word.starts_with("0X");
            starts_numeric && !is_hex && word.ends_with(['e', 'E']) && next_digit
        }
        _ => false,
    }
}
