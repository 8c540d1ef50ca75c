//! Literal scrubber
//!
//! Empties every string and character literal, keeping only the delimiters,
//! so punctuation inside a literal can never be mistaken for structure.
//! `printf("%d;{", x)` becomes `printf("", x)`.
//!
//! Backslash escapes are honoured, so `"a\"b"` is one literal. A literal that
//! is still open at the end of its line is closed there: the closing
//! delimiter is synthesized and scanning resumes on the next line. The same
//! happens at the end of the text. Output quotes therefore always pair up.

/// Erase the contents of all `"..."` and `'...'` literals in `text`.
pub fn scrub_literals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut open: Option<char> = None;
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        match open {
            None => {
                if ch == '"' || ch == '\'' {
                    open = Some(ch);
                }
                out.push(ch);
            }
            Some(delimiter) => {
                if ch == '\\' {
                    chars.next();
                } else if ch == delimiter {
                    out.push(delimiter);
                    open = None;
                } else if ch == '\n' {
                    out.push(delimiter);
                    out.push('\n');
                    open = None;
                }
            }
        }
    }

    if let Some(delimiter) = open {
        out.push(delimiter);
    }

    out
}
