//! Classification tables
//!
//! The five keyword/name collections the normalizer classifies words against.
//! `ignorable`, `conditions` and `loops` are fixed once configuration has been
//! applied; the lexer bakes them into token kinds. `data_types` and
//! `functions` keep growing while files are processed: every typedef adds a
//! type name and every function declaration adds a callable name, and those
//! additions stay visible to every later file processed with the same tables.
//! Callers that want per-file isolation take a [`TableSnapshot`] and restore it.

use crate::parser::lexer::{Condition, Loop};
use rustc_hash::{FxHashMap, FxHashSet};

const DATA_TYPES: &[&str] = &[
    "bool", "char", "signed", "unsigned", "short", "int", "long", "size_t", "float", "double",
    "void", "FILE", "struct", "union", "enum",
];

/// Aggregate keywords whose `{ ... }` body is skipped as a unit
const AGGREGATES: &[&str] = &["struct", "union", "enum"];

const IGNORABLE: &[&str] = &[
    "const", "static", "break", "continue", "volatile", "register", "extern", "inline", "auto",
];

const CONDITIONS: &[(&str, Condition)] = &[
    ("if", Condition::If),
    ("else", Condition::Else),
    ("switch", Condition::Switch),
    ("case", Condition::Case),
    ("default", Condition::Default),
];

const LOOPS: &[(&str, Loop)] = &[("for", Loop::For), ("while", Loop::While), ("do", Loop::Do)];

/// C standard library names (plus `main`) treated as callable from the start
const STANDARD_FUNCTIONS: &[&str] = &[
    "assert", "isalnum", "isalpha", "iscntrl", "isdigit", "isgraph", "islower", "isprint",
    "ispunct", "isspace", "isupper", "isxdigit", "tolower", "toupper", "errno", "localeconv",
    "setlocale", "acos", "asin", "atan", "atan2", "ceil", "cos", "cosh", "exp", "fabs", "floor",
    "fmod", "frexp", "ldexp", "log", "log10", "modf", "pow", "sin", "sinh", "sqrt", "tan", "tanh",
    "jmp_buf", "longjmp", "setjmp", "raise", "signal", "sig_atomic_t", "va_arg", "va_end",
    "va_start", "clearerr", "fclose", "feof", "ferror", "fflush", "fgetc", "fgetpos", "fgets",
    "fopen", "fprintf", "fputc", "fputs", "fread", "freopen", "fscanf", "fseek", "fsetpos",
    "ftell", "fwrite", "getchar", "getch", "getc", "main", "gets", "perror", "printf", "putc",
    "putchar", "puts", "remove", "rename", "rewind", "scanf", "setbuf", "setvbuf", "sprintf",
    "sscanf", "tmpfile", "tmpnam", "ungetc", "vfprintf", "vprintf", "vsprintf", "abort", "abs",
    "atexit", "atof", "atoi", "atol", "bsearch", "calloc", "div", "exit", "free", "getenv", "labs",
    "ldiv", "malloc", "mblen", "mbstowcs", "mbtowc", "qsort", "rand", "realloc", "srand",
    "strtod", "strtol", "strtoul", "system", "wcstombs", "wctomb", "memchr", "memcmp", "memcpy",
    "memmove", "memset", "strcat", "strchr", "strcmp", "strcoll", "strcpy", "strcspn",
    "strerror", "strlen", "strncat", "strncmp", "strncpy", "strpbrk", "strrchr", "strspn",
    "strstr", "strtok", "strxfrm", "asctime", "clock", "ctime", "difftime", "gmtime", "localtime",
    "mktime", "strftime", "time", "sizeof",
];

/// Keyword and name registry shared by every file of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTables {
    data_types: FxHashSet<String>,
    ignorable: FxHashSet<String>,
    conditions: FxHashMap<String, Condition>,
    loops: FxHashMap<String, Loop>,
    functions: FxHashSet<String>,
}

/// Frozen copy of a [`ClassificationTables`] state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot(ClassificationTables);

impl ClassificationTables {
    /// Tables seeded with the C keywords and standard library names.
    pub fn new() -> Self {
        Self {
            data_types: DATA_TYPES.iter().map(|s| s.to_string()).collect(),
            ignorable: IGNORABLE.iter().map(|s| s.to_string()).collect(),
            conditions: CONDITIONS.iter().map(|(k, c)| (k.to_string(), *c)).collect(),
            loops: LOOPS.iter().map(|(k, l)| (k.to_string(), *l)).collect(),
            functions: STANDARD_FUNCTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn is_data_type(&self, word: &str) -> bool {
        self.data_types.contains(word)
    }

    pub fn is_aggregate(&self, word: &str) -> bool {
        AGGREGATES.contains(&word)
    }

    pub fn is_ignorable(&self, word: &str) -> bool {
        self.ignorable.contains(word)
    }

    pub fn condition(&self, word: &str) -> Option<Condition> {
        self.conditions.get(word).copied()
    }

    pub fn loop_keyword(&self, word: &str) -> Option<Loop> {
        self.loops.get(word).copied()
    }

    pub fn is_function(&self, word: &str) -> bool {
        self.functions.contains(word)
    }

    /// Register a declared function name. Returns `true` if it was new.
    pub fn learn_function(&mut self, name: &str) -> bool {
        if self.functions.contains(name) {
            return false;
        }
        self.functions.insert(name.to_string())
    }

    /// Register a typedef'd type name. Returns `true` if it was new.
    pub fn learn_data_type(&mut self, name: &str) -> bool {
        if self.data_types.contains(name) {
            return false;
        }
        self.data_types.insert(name.to_string())
    }

    /// Extend the ignorable set. Only meaningful before tokenization.
    pub fn add_ignorable(&mut self, word: &str) {
        self.ignorable.insert(word.to_string());
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn data_type_count(&self) -> usize {
        self.data_types.len()
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot(self.clone())
    }

    pub fn restore(&mut self, snapshot: &TableSnapshot) {
        *self = snapshot.0.clone();
    }
}

impl Default for ClassificationTables {
    fn default() -> Self {
        Self::new()
    }
}
