// Canonical symbols and the append-only pattern buffer

/// Any variable or literal use
pub const VALUE: &str = "_v_";
/// Opens a recognised function call
pub const CALL_OPEN: &str = "_f_(";
/// One call argument
pub const PARAM: &str = "_p_";
/// Closes a call
pub const CALL_CLOSE: &str = ")";
/// Separates call arguments
pub const ARG_SEPARATOR: &str = ",";
/// Declared name followed by its initializer
pub const ASSIGN: &str = "_v_=";
/// Initializer given as a brace list
pub const BRACE_INIT: &str = "_v_=_v_";
/// `if` / `else if`, followed by the header pattern
pub const CONDITION_OPEN: &str = "_c_(";
/// Bare `else`
pub const ELSE: &str = "_c_()";
/// `case <label>:`
pub const CASE: &str = "_c_(_v_==_v_)";
/// `default:`
pub const DEFAULT: &str = "_c_()";
/// `for` / `while`, followed by the header pattern
pub const LOOP_OPEN: &str = "_l_(";
/// `do`
pub const DO_LOOP: &str = "_l_()";
/// `name:`
pub const LABEL: &str = "_g_()";
/// `return`
pub const RETURN: &str = "_r_";
/// End of statement
pub const TERMINATOR: &str = ";";

/// Growing sequence of canonical symbols
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    text: String,
}

impl Pattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, symbol: &str) {
        self.text.push_str(symbol);
    }

    pub fn append(&mut self, other: &Pattern) {
        self.text.push_str(&other.text);
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the last symbol is a value, a call or a closing parenthesis,
    /// i.e. something a statement terminator may follow.
    pub fn ends_with_operand(&self) -> bool {
        self.text.ends_with('_') || self.text.ends_with(')')
    }

    pub fn ends_with_terminator(&self) -> bool {
        self.text.ends_with(TERMINATOR)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl From<&str> for Pattern {
    fn from(symbol: &str) -> Self {
        Self {
            text: symbol.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_endings() {
        let mut pattern = Pattern::new();
        assert!(!pattern.ends_with_operand());

        pattern.push(VALUE);
        assert!(pattern.ends_with_operand());

        pattern.push("+");
        assert!(!pattern.ends_with_operand());

        pattern.push(CALL_OPEN);
        pattern.push(CALL_CLOSE);
        assert!(pattern.ends_with_operand());

        pattern.push(TERMINATOR);
        assert!(pattern.ends_with_terminator());
        assert_eq!(pattern.into_string(), "_v_+_f_();");
    }

    #[test]
    fn test_symbols_are_distinct() {
        let symbols = [
            VALUE, CALL_OPEN, PARAM, ASSIGN, BRACE_INIT, CONDITION_OPEN, CASE, LOOP_OPEN,
            DO_LOOP, LABEL, RETURN, TERMINATOR,
        ];
        for (i, a) in symbols.iter().enumerate() {
            for b in &symbols[i + 1..] {
                assert_ne!(a, b);
            }
        }
        // `else` and `default` share a spelling: both are an unconditioned branch
        assert_eq!(ELSE, DEFAULT);
    }
}
