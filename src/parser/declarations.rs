//! Declaration handling
//!
//! Everything that starts with a data type word, plus `typedef`:
//!
//! - aggregate bodies: `struct Name { ... };` (skipped as a unit, nesting aware)
//! - variable declarations: `int a = 1, *b, c[4] = {0};`
//! - function declarations and definitions: `int f(int x)` (name is learned)
//! - typedefs: the new type name is learned
//!
//! # Shapes
//!
//! ```text
//! declaration ::= type+ [tag] ( body [declarators] | qualifier* name follow )
//! follow      ::= "," | "=" | "[" -> declarator list
//!               | "("             -> function
//!               | ";"             -> plain declaration, no symbol
//! ```
//!
//! All methods are implemented as `pub(crate)` methods on the [`Normalizer`] struct.

use crate::errors::{Diagnostic, NormalizeError};
use crate::parser::lexer::{Punct, Token, TokenKind};
use crate::parser::parse::Normalizer;
use crate::parser::pattern::{Pattern, ASSIGN, BRACE_INIT, TERMINATOR};
use log::debug;

/// Sign glued to an initializer's `=` by the formatter (`=-1`, `=*p`).
/// `Some("")` for a bare `=`, `None` for any other token.
fn assignment_sign(token: &Token) -> Option<&str> {
    let TokenKind::Operator(op) = &token.kind else {
        return None;
    };
    match op.strip_prefix('=')? {
        sign @ ("" | "-" | "+" | "*") => Some(sign),
        _ => None,
    }
}

impl<'t> Normalizer<'t> {
    /// Handle a declaration whose leading data type word has been consumed.
    pub(crate) fn parse_declaration(&mut self, type_word: &str) -> Result<(), NormalizeError> {
        if self.tables.is_aggregate(type_word) {
            if self.cursor.match_punct(Punct::LBrace) {
                return self.parse_aggregate_body(type_word);
            }
            // tag name
            self.cursor.next_token("declaration")?;
        }

        let candidate = self.cursor.next_token("declaration")?;
        if candidate.is_punct(Punct::LBrace) {
            return self.parse_aggregate_body(type_word);
        }

        self.parse_declarator(type_word, candidate)
    }

    /// Skip an aggregate body whose `{` has been consumed, then handle any
    /// declarators that follow it.
    fn parse_aggregate_body(&mut self, type_word: &str) -> Result<(), NormalizeError> {
        self.cursor
            .skip_balanced(Punct::LBrace, Punct::RBrace, "struct body")?;

        if self.cursor.match_punct(Punct::Semicolon) {
            return Ok(());
        }

        let candidate = self.cursor.next_token("declaration")?;
        self.parse_declarator(type_word, candidate)
    }

    fn is_qualifier(&self, token: &Token) -> bool {
        match &token.kind {
            TokenKind::Ignorable(_) => true,
            TokenKind::Word(word) => self.tables.is_data_type(word),
            _ => token.is_sigil(),
        }
    }

    /// Skip qualifiers and sigils up to the declared name, then branch on
    /// the token that follows it.
    fn parse_declarator(&mut self, type_word: &str, first: Token) -> Result<(), NormalizeError> {
        let mut token = first;
        while self.is_qualifier(&token) {
            token = self.cursor.next_token("declaration")?;
        }

        let name = match token.kind {
            TokenKind::Word(name) => name,
            other => {
                // no name to report; the type stands in for it
                self.unrecognized(type_word.to_string(), other.to_string(), token.line);
                return Ok(());
            }
        };

        let follow = self
            .cursor
            .peek()
            .cloned()
            .ok_or(NormalizeError::UnexpectedEndOfInput {
                construct: "declaration",
            })?;

        match &follow.kind {
            TokenKind::Punct(Punct::Comma | Punct::LBracket) => {
                self.parse_variable_declaration(name)
            }
            _ if assignment_sign(&follow).is_some() => self.parse_variable_declaration(name),
            TokenKind::Punct(Punct::LParen) => self.parse_function_declaration(&name),
            TokenKind::Punct(Punct::Semicolon) => {
                self.cursor.advance();
                Ok(())
            }
            _ => {
                self.unrecognized(name, follow.to_string(), follow.line);
                Ok(())
            }
        }
    }

    /// Declarator list up to the closing `;`. Each declarator that emitted
    /// something becomes its own terminated statement.
    fn parse_variable_declaration(&mut self, mut name: String) -> Result<(), NormalizeError> {
        let mut declarator = Pattern::new();

        loop {
            let token = self.cursor.next_token("variable declaration")?;

            if let Some(sign) = assignment_sign(&token) {
                if sign.is_empty() && self.cursor.match_punct(Punct::LBrace) {
                    self.cursor
                        .skip_balanced(Punct::LBrace, Punct::RBrace, "initializer list")?;
                    declarator.push(BRACE_INIT);
                } else {
                    let initializer = self.emit_statement()?;
                    declarator.push(ASSIGN);
                    declarator.push(sign);
                    declarator.append(&initializer);
                }
                continue;
            }

            match &token.kind {
                TokenKind::Punct(Punct::Semicolon) => {
                    self.finish_declarator(&mut declarator);
                    return Ok(());
                }
                TokenKind::Punct(Punct::Comma) => {
                    self.finish_declarator(&mut declarator);

                    let mut next = self.cursor.next_token("variable declaration")?;
                    while next.is_sigil() {
                        next = self.cursor.next_token("variable declaration")?;
                    }
                    name = next.to_string();
                }
                TokenKind::Punct(Punct::LBracket) => {
                    self.cursor
                        .skip_balanced(Punct::LBracket, Punct::RBracket, "array bound")?;
                }
                _ => {
                    self.finish_declarator(&mut declarator);
                    self.report(Diagnostic::UnrecognizedDeclarationShape {
                        name,
                        found: token.to_string(),
                        line: token.line,
                    });
                    self.recover_to_terminator();
                    return Ok(());
                }
            }
        }
    }

    /// Flush one declarator. Terminated under the same rule as a statement.
    fn finish_declarator(&mut self, declarator: &mut Pattern) {
        if declarator.is_empty() {
            return;
        }
        if declarator.ends_with_operand() {
            declarator.push(TERMINATOR);
        }
        self.output.append(declarator);
        declarator.clear();
    }

    /// Parameter list (nesting aware) and an optional prototype `;`. The
    /// name becomes callable from here on.
    fn parse_function_declaration(&mut self, name: &str) -> Result<(), NormalizeError> {
        self.cursor.expect_punct(
            Punct::LParen,
            "'(' after function name",
            "function declaration",
        )?;
        self.cursor
            .skip_balanced(Punct::LParen, Punct::RParen, "parameter list")?;

        if self.tables.learn_function(name) {
            debug!("learned function `{}`", name);
        }

        self.cursor.match_punct(Punct::Semicolon);
        Ok(())
    }

    /// `typedef ... name;` with the `typedef` consumed. The last word before
    /// the `;` that is not already a type becomes a data type. Once a name
    /// has been seen, a `(` opens a parameter list whose words are skipped.
    pub(crate) fn parse_typedef(&mut self) -> Result<(), NormalizeError> {
        let mut new_type: Option<String> = None;

        loop {
            let token = self.cursor.next_token("typedef")?;
            match token.kind {
                TokenKind::Punct(Punct::Semicolon) => break,
                TokenKind::Punct(Punct::LBrace) => {
                    self.cursor
                        .skip_balanced(Punct::LBrace, Punct::RBrace, "typedef body")?;
                }
                TokenKind::Punct(Punct::LParen) if new_type.is_some() => {
                    self.cursor
                        .skip_balanced(Punct::LParen, Punct::RParen, "parameter list")?;
                }
                TokenKind::Punct(Punct::LBracket) => {
                    self.cursor
                        .skip_balanced(Punct::LBracket, Punct::RBracket, "array bound")?;
                }
                TokenKind::Word(word) if !self.tables.is_data_type(&word) => {
                    new_type = Some(word);
                }
                _ => {}
            }
        }

        if let Some(name) = new_type {
            if self.tables.learn_data_type(&name) {
                debug!("learned type `{}`", name);
            }
        }

        Ok(())
    }

    fn unrecognized(&mut self, name: String, found: String, line: usize) {
        self.report(Diagnostic::UnrecognizedDeclarationShape { name, found, line });
        self.recover_to_terminator();
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::Diagnostic;
    use crate::parser::parse::{normalize, Shape};
    use crate::parser::tables::ClassificationTables;
    use crate::preprocess::prepare;

    fn run(source: &str) -> (Shape, ClassificationTables) {
        let mut tables = ClassificationTables::new();
        let shape = normalize(&prepare(source), &mut tables).unwrap();
        (shape, tables)
    }

    fn shape(source: &str) -> String {
        run(source).0.pattern
    }

    #[test]
    fn test_simple_initializer() {
        assert_eq!(shape("int x = 5;"), "_v_=_v_;");
    }

    #[test]
    fn test_declaration_list_splits() {
        assert_eq!(shape("int a = 1, b = 2;"), "_v_=_v_;_v_=_v_;");
        assert_eq!(shape("int a, *b = &a, c;"), "_v_=&_v_;");
    }

    #[test]
    fn test_plain_declarations_emit_nothing() {
        assert_eq!(shape("int x; char *s; unsigned long int n; double m[10][20];"), "");
    }

    #[test]
    fn test_brace_initializer() {
        assert_eq!(shape("int m[2][2] = {{1, 2}, {3, 4}}, k = 0;"), "_v_=_v_;_v_=_v_;");
    }

    #[test]
    fn test_initializer_with_call() {
        let (shape, _) = run("double r = sqrt(x * x + y * y);");
        assert_eq!(shape.pattern, "_v_=_f_(_p_);");
    }

    #[test]
    fn test_function_declaration_is_learned() {
        let (shape, tables) = run("static int helper(int (*cb)(int), char **argv);");
        assert_eq!(shape.pattern, "");
        assert!(tables.is_function("helper"));
    }

    #[test]
    fn test_struct_definition_skipped() {
        let source = "struct node { int v; struct node *next; union { int i; float f; } u; };";
        assert_eq!(shape(source), "");
    }

    #[test]
    fn test_struct_body_followed_by_declarator() {
        assert_eq!(shape("struct { int x; int y; } origin = {0, 0};"), "_v_=_v_;");
    }

    #[test]
    fn test_struct_typed_variable() {
        assert_eq!(shape("struct point p = make();"), "_v_=_v_();");
    }

    #[test]
    fn test_typedef_alias_and_struct() {
        let (shape, tables) = run(
            "typedef unsigned long uli; typedef struct { int x; } Point; \
             typedef int (*callback)(int); uli n = 1; Point p = {1};",
        );
        assert_eq!(shape.pattern, "_v_=_v_;_v_=_v_;");
        assert!(tables.is_data_type("uli"));
        assert!(tables.is_data_type("Point"));
        assert!(tables.is_data_type("callback"));
    }

    #[test]
    fn test_typedef_parameter_names_are_not_types() {
        let (shape, tables) = run(
            "typedef int (*handler)(int value, char *label); typedef char name_t[LEN]; \
             value = 1;",
        );
        assert_eq!(shape.pattern, "_v_=_v_;");
        assert!(shape.diagnostics.is_empty());
        assert!(tables.is_data_type("handler"));
        assert!(tables.is_data_type("name_t"));
        assert!(!tables.is_data_type("value"));
        assert!(!tables.is_data_type("label"));
        assert!(!tables.is_data_type("LEN"));
    }

    #[test]
    fn test_glued_initializer_sign_matches_spaced() {
        let (tight, _) = run("int x=-1; int *p=*q; long y=+2, z=-w;");
        let (spaced, _) = run("int x = -1; int *p = *q; long y = +2, z = -w;");

        assert_eq!(tight.pattern, "_v_=-_v_;_v_=*_v_;_v_=+_v_;_v_=-_v_;");
        assert_eq!(tight, spaced);
        assert!(tight.diagnostics.is_empty());
    }

    #[test]
    fn test_declarator_terminated_like_statement() {
        assert_eq!(shape("int a = x++;"), "_v_=_v_++");
        assert_eq!(shape("int a = x++;"), shape("a = x++;"));
        assert_eq!(shape("int a = x++, b = 1;"), "_v_=_v_++_v_=_v_;");
    }

    #[test]
    fn test_unrecognized_shape_is_reported() {
        let (shape, _) = run("int x y; z = 1;");
        assert_eq!(shape.pattern, "_v_=_v_;");
        assert_eq!(
            shape.diagnostics,
            vec![Diagnostic::UnrecognizedDeclarationShape {
                name: "x".to_string(),
                found: "y".to_string(),
                line: 1,
            }]
        );
    }

    #[test]
    fn test_function_pointer_declaration_is_reported() {
        let (shape, _) = run("int (*fp)(int); x = 1;");
        assert_eq!(shape.pattern, "_v_=_v_;");
        assert_eq!(
            shape.diagnostics,
            vec![Diagnostic::UnrecognizedDeclarationShape {
                name: "int".to_string(),
                found: "(".to_string(),
                line: 1,
            }]
        );
    }
}
