//! Lexer for formatted C source
//!
//! Input is the output of [`crate::preprocess::prepare`]: one line per source
//! line, every token already separated by a single space. The lexer splits on
//! whitespace and tags each piece with a [`TokenKind`] so that the normalizer
//! can dispatch on kinds instead of comparing strings.
//!
//! Keyword classes that never change during a run (ignorable words,
//! conditions, loops) are resolved here. Data types and function names grow
//! while normalizing, so they stay plain [`TokenKind::Word`]s and are looked
//! up in the [`ClassificationTables`] at the point of use.

use crate::parser::tables::ClassificationTables;
use std::fmt;

/// Conditional keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    If,
    Else,
    Switch,
    Case,
    Default,
}

/// Loop keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Loop {
    For,
    While,
    Do,
}

/// Structural punctuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punct {
    Semicolon, // ;
    Comma,     // ,
    Colon,     // :
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
}

impl Punct {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            ';' => Some(Punct::Semicolon),
            ',' => Some(Punct::Comma),
            ':' => Some(Punct::Colon),
            '(' => Some(Punct::LParen),
            ')' => Some(Punct::RParen),
            '[' => Some(Punct::LBracket),
            ']' => Some(Punct::RBracket),
            '{' => Some(Punct::LBrace),
            '}' => Some(Punct::RBrace),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Punct::Semicolon => ";",
            Punct::Comma => ",",
            Punct::Colon => ":",
            Punct::LParen => "(",
            Punct::RParen => ")",
            Punct::LBracket => "[",
            Punct::RBracket => "]",
            Punct::LBrace => "{",
            Punct::RBrace => "}",
        }
    }
}

/// Token classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Qualifiers and jump keywords that carry no shape (`const`, `break`, ...)
    Ignorable(String),
    Condition(Condition),
    Loop(Loop),
    Typedef,
    Goto,
    Return,
    /// Identifier, type name or any other keyword
    Word(String),
    /// Numeric literal
    Number(String),
    /// Scrubbed string or character literal
    Literal,
    Punct(Punct),
    /// Operator or any other punctuation run (`+`, `->`, `==`, `&`, `?`, ...)
    Operator(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ignorable(word) | TokenKind::Word(word) | TokenKind::Number(word) => {
                write!(f, "{}", word)
            }
            TokenKind::Condition(c) => write!(
                f,
                "{}",
                match c {
                    Condition::If => "if",
                    Condition::Else => "else",
                    Condition::Switch => "switch",
                    Condition::Case => "case",
                    Condition::Default => "default",
                }
            ),
            TokenKind::Loop(l) => write!(
                f,
                "{}",
                match l {
                    Loop::For => "for",
                    Loop::While => "while",
                    Loop::Do => "do",
                }
            ),
            TokenKind::Typedef => write!(f, "typedef"),
            TokenKind::Goto => write!(f, "goto"),
            TokenKind::Return => write!(f, "return"),
            TokenKind::Literal => write!(f, "\"\""),
            TokenKind::Punct(p) => write!(f, "{}", p.as_str()),
            TokenKind::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// A classified token and the source line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Self { kind, line }
    }

    pub fn is_punct(&self, punct: Punct) -> bool {
        self.kind == TokenKind::Punct(punct)
    }

    /// Pointer or reference sigil (`*`, `**`, `&`, ...)
    pub fn is_sigil(&self) -> bool {
        matches!(&self.kind, TokenKind::Operator(op) if op.starts_with('*') || op.starts_with('&'))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Lexer over formatted source
pub struct Lexer<'a> {
    input: &'a str,
    tables: &'a ClassificationTables,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, tables: &'a ClassificationTables) -> Self {
        Self { input, tables }
    }

    /// Tokenize the entire input
    pub fn tokenize(&self) -> Vec<Token> {
        let mut tokens = Vec::new();

        for (index, line) in self.input.lines().enumerate() {
            for piece in line.split_whitespace() {
                tokens.push(Token::new(self.classify(piece), index + 1));
            }
        }

        tokens
    }

    fn classify(&self, piece: &str) -> TokenKind {
        if piece == "\"\"" || piece == "''" {
            return TokenKind::Literal;
        }

        let mut chars = piece.chars();
        let first = chars.next().unwrap_or(' ');

        if chars.as_str().is_empty() {
            if let Some(punct) = Punct::from_char(first) {
                return TokenKind::Punct(punct);
            }
        }

        if first.is_ascii_digit() || (first == '.' && piece.len() > 1) {
            return TokenKind::Number(piece.to_string());
        }

        if piece.chars().all(|c| c.is_ascii_punctuation() && c != '_') {
            return TokenKind::Operator(piece.to_string());
        }

        if self.tables.is_ignorable(piece) {
            return TokenKind::Ignorable(piece.to_string());
        }
        if let Some(condition) = self.tables.condition(piece) {
            return TokenKind::Condition(condition);
        }
        if let Some(keyword) = self.tables.loop_keyword(piece) {
            return TokenKind::Loop(keyword);
        }

        match piece {
            "typedef" => TokenKind::Typedef,
            "goto" => TokenKind::Goto,
            "return" => TokenKind::Return,
            _ => TokenKind::Word(piece.to_string()),
        }
    }
}

/// Tokenize formatted source against `tables`.
pub fn tokenize(input: &str, tables: &ClassificationTables) -> Vec<Token> {
    Lexer::new(input, tables).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::prepare;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let tables = ClassificationTables::new();
        tokenize(&prepare(source), &tables)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = kinds("int main() { return 0; }");

        assert!(matches!(tokens[0], TokenKind::Word(ref s) if s == "int"));
        assert!(matches!(tokens[1], TokenKind::Word(ref s) if s == "main"));
        assert_eq!(tokens[2], TokenKind::Punct(Punct::LParen));
        assert_eq!(tokens[3], TokenKind::Punct(Punct::RParen));
        assert_eq!(tokens[4], TokenKind::Punct(Punct::LBrace));
        assert_eq!(tokens[5], TokenKind::Return);
        assert!(matches!(tokens[6], TokenKind::Number(ref s) if s == "0"));
        assert_eq!(tokens[7], TokenKind::Punct(Punct::Semicolon));
        assert_eq!(tokens[8], TokenKind::Punct(Punct::RBrace));
        assert_eq!(tokens.len(), 9);
    }

    #[test]
    fn test_keyword_classes() {
        let tokens = kinds("static if else switch case default for while do typedef goto break");

        assert!(matches!(tokens[0], TokenKind::Ignorable(ref s) if s == "static"));
        assert_eq!(tokens[1], TokenKind::Condition(Condition::If));
        assert_eq!(tokens[2], TokenKind::Condition(Condition::Else));
        assert_eq!(tokens[3], TokenKind::Condition(Condition::Switch));
        assert_eq!(tokens[4], TokenKind::Condition(Condition::Case));
        assert_eq!(tokens[5], TokenKind::Condition(Condition::Default));
        assert_eq!(tokens[6], TokenKind::Loop(Loop::For));
        assert_eq!(tokens[7], TokenKind::Loop(Loop::While));
        assert_eq!(tokens[8], TokenKind::Loop(Loop::Do));
        assert_eq!(tokens[9], TokenKind::Typedef);
        assert_eq!(tokens[10], TokenKind::Goto);
        assert!(matches!(tokens[11], TokenKind::Ignorable(ref s) if s == "break"));
    }

    #[test]
    fn test_operators_and_literals() {
        let tokens = kinds("p->x += 'a' == \"s\" && ++i;");

        assert!(matches!(tokens[1], TokenKind::Operator(ref s) if s == "->"));
        assert!(matches!(tokens[3], TokenKind::Operator(ref s) if s == "+="));
        assert_eq!(tokens[4], TokenKind::Literal);
        assert!(matches!(tokens[5], TokenKind::Operator(ref s) if s == "=="));
        assert_eq!(tokens[6], TokenKind::Literal);
        assert!(matches!(tokens[7], TokenKind::Operator(ref s) if s == "&"));
        assert!(matches!(tokens[8], TokenKind::Operator(ref s) if s == "&"));
        assert!(matches!(tokens[9], TokenKind::Operator(ref s) if s == "++"));
    }

    #[test]
    fn test_line_numbers_survive_skipped_lines() {
        let tables = ClassificationTables::new();
        let tokens = tokenize(&prepare("#include <stdio.h>\n\nint x;\n  y = 1;"), &tables);

        assert_eq!(tokens[0].line, 3);
        assert_eq!(tokens[3].line, 4);
    }

    #[test]
    fn test_sigils() {
        let tables = ClassificationTables::new();
        let tokens = tokenize("* ** & x", &tables);

        assert!(tokens[0].is_sigil());
        assert!(tokens[1].is_sigil());
        assert!(tokens[2].is_sigil());
        assert!(!tokens[3].is_sigil());
    }
}
