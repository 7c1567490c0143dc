//! Reserved-word and bindable-identifier recognition.
//!
//! All lexemes pass through the string pool before comparison, so testing
//! a candidate against a known spelling is a handle comparison. The
//! recognizer narrows candidates by lexeme length first, then by one or
//! two discriminating character positions, and only then performs the
//! single handle comparison against the pre-interned table entry. A
//! candidate that survives no branch is an ordinary identifier.
//!
//! Bindable identifiers (`ALLOC`, `APPEND`, `FIRST`, ...) are not
//! reserved; the parser consults [`LexemeTable::is_bindable`] only at
//! procedure binding sites.

use mod2c_core::{Pool, Symbol};

use crate::token::{RESWORD_COUNT, TokenKind};

/// Reserved-word spellings, ordered like the leading `TokenKind` block.
const RESWORDS: [&str; RESWORD_COUNT] = [
    "ALIAS",
    "AND",
    "ARGLIST",
    "ARRAY",
    "BEGIN",
    "CASE",
    "CONST",
    "COPY",
    "DEFINITION",
    "DIV",
    "DO",
    "ELSE",
    "ELSIF",
    "END",
    "EXIT",
    "FOR",
    "IF",
    "IMPLEMENTATION",
    "IMPORT",
    "IN",
    "LOOP",
    "MOD",
    "MODULE",
    "NEW",
    "NOP",
    "NOT",
    "OCTETSEQ",
    "OF",
    "OPAQUE",
    "OR",
    "POINTER",
    "PROCEDURE",
    "READ",
    "RECORD",
    "RELEASE",
    "REPEAT",
    "RETAIN",
    "RETURN",
    "SET",
    "THEN",
    "TO",
    "TYPE",
    "UNQUALIFIED",
    "UNTIL",
    "VAR",
    "WHILE",
    "WRITE",
];

/// Bindable built-in identifiers, grouped by length for the dispatch.
const BINDABLES: [&str; 21] = [
    "ABS", "GET", "ODD", "PUT", // 3
    "LAST", "NEXT", "PRED", "PREV", "SUCC", // 4
    "ALLOC", "COUNT", "FETCH", "FIRST", "STORE", "VALUE", // 5
    "APPEND", "INSERT", "LENGTH", "REMOVE", "SUBSET", // 6
    "DEALLOC", // 7
];

/// Pre-interned spellings for one pool.
///
/// Built once per pool so that handle equality against the table entries
/// is exactly content equality within that pool.
pub struct LexemeTable {
    reswords: [Symbol; RESWORD_COUNT],
    bindables: [Symbol; 21],
}

impl LexemeTable {
    pub fn new(pool: &Pool) -> Self {
        Self {
            reswords: RESWORDS.map(|s| pool.intern(s)),
            bindables: BINDABLES.map(|s| pool.intern(s)),
        }
    }

    /// The pre-interned handle for a reserved word's spelling.
    pub fn resword_sym(&self, kind: TokenKind) -> Option<Symbol> {
        kind.is_resword().then(|| self.reswords[kind as usize])
    }

    /// Final step of recognition: the candidate matches `kind` only if it
    /// is the very handle interned for that spelling.
    #[inline]
    fn verify(&self, candidate: Symbol, kind: TokenKind) -> TokenKind {
        if self.reswords[kind as usize] == candidate {
            kind
        } else {
            TokenKind::Ident
        }
    }

    /// Classify an identifier-shaped lexeme: its reserved-word kind, or
    /// `Ident` when the spelling is not reserved.
    pub fn token_kind_for(&self, candidate: Symbol, text: &str) -> TokenKind {
        use TokenKind::*;
        let b = text.as_bytes();
        match b.len() {
            2 => match b[0] {
                b'D' => self.verify(candidate, Do),
                b'I' => match b[1] {
                    b'F' => self.verify(candidate, If),
                    b'N' => self.verify(candidate, In),
                    _ => Ident,
                },
                b'O' => match b[1] {
                    b'F' => self.verify(candidate, Of),
                    b'R' => self.verify(candidate, Or),
                    _ => Ident,
                },
                b'T' => self.verify(candidate, To),
                _ => Ident,
            },
            3 => match b[0] {
                b'A' => self.verify(candidate, And),
                b'D' => self.verify(candidate, Div),
                b'E' => self.verify(candidate, End),
                b'F' => self.verify(candidate, For),
                b'M' => self.verify(candidate, Mod),
                b'N' => match b[1] {
                    b'E' => self.verify(candidate, New),
                    b'O' => match b[2] {
                        b'P' => self.verify(candidate, Nop),
                        b'T' => self.verify(candidate, Not),
                        _ => Ident,
                    },
                    _ => Ident,
                },
                b'S' => self.verify(candidate, Set),
                b'V' => self.verify(candidate, Var),
                _ => Ident,
            },
            4 => match b[0] {
                b'C' => match b[1] {
                    b'A' => self.verify(candidate, Case),
                    b'O' => self.verify(candidate, Copy),
                    _ => Ident,
                },
                b'E' => match b[1] {
                    b'L' => self.verify(candidate, Else),
                    b'X' => self.verify(candidate, Exit),
                    _ => Ident,
                },
                b'L' => self.verify(candidate, Loop),
                b'R' => self.verify(candidate, Read),
                b'T' => match b[1] {
                    b'H' => self.verify(candidate, Then),
                    b'Y' => self.verify(candidate, Type),
                    _ => Ident,
                },
                _ => Ident,
            },
            5 => match b[0] {
                b'A' => match b[1] {
                    b'L' => self.verify(candidate, Alias),
                    b'R' => self.verify(candidate, Array),
                    _ => Ident,
                },
                b'B' => self.verify(candidate, Begin),
                b'C' => self.verify(candidate, Const),
                b'E' => self.verify(candidate, Elsif),
                b'U' => self.verify(candidate, Until),
                b'W' => match b[1] {
                    b'H' => self.verify(candidate, While),
                    b'R' => self.verify(candidate, Write),
                    _ => Ident,
                },
                _ => Ident,
            },
            6 => match b[0] {
                b'I' => self.verify(candidate, Import),
                b'M' => self.verify(candidate, Module),
                b'O' => self.verify(candidate, Opaque),
                b'R' => match b[2] {
                    b'C' => self.verify(candidate, Record),
                    b'P' => self.verify(candidate, Repeat),
                    b'T' => match b[3] {
                        b'A' => self.verify(candidate, Retain),
                        b'U' => self.verify(candidate, Return),
                        _ => Ident,
                    },
                    _ => Ident,
                },
                _ => Ident,
            },
            7 => match b[0] {
                b'A' => self.verify(candidate, Arglist),
                b'P' => self.verify(candidate, Pointer),
                b'R' => self.verify(candidate, Release),
                _ => Ident,
            },
            8 => self.verify(candidate, Octetseq),
            9 => self.verify(candidate, Procedure),
            10 => self.verify(candidate, Definition),
            11 => self.verify(candidate, Unqualified),
            14 => self.verify(candidate, Implementation),
            _ => Ident,
        }
    }

    #[inline]
    fn verify_bindable(&self, candidate: Symbol, index: usize) -> bool {
        self.bindables[index] == candidate
    }

    /// Whether the lexeme is one of the bindable built-in identifiers.
    pub fn is_bindable(&self, candidate: Symbol, text: &str) -> bool {
        let b = text.as_bytes();
        match b.len() {
            3 => match b[0] {
                b'A' => self.verify_bindable(candidate, 0),
                b'G' => self.verify_bindable(candidate, 1),
                b'O' => self.verify_bindable(candidate, 2),
                b'P' => self.verify_bindable(candidate, 3),
                _ => false,
            },
            4 => match b[0] {
                b'L' => self.verify_bindable(candidate, 4),
                b'N' => self.verify_bindable(candidate, 5),
                b'P' => match b[3] {
                    b'D' => self.verify_bindable(candidate, 6),
                    b'V' => self.verify_bindable(candidate, 7),
                    _ => false,
                },
                b'S' => self.verify_bindable(candidate, 8),
                _ => false,
            },
            5 => match b[0] {
                b'A' => self.verify_bindable(candidate, 9),
                b'C' => self.verify_bindable(candidate, 10),
                b'F' => match b[1] {
                    b'E' => self.verify_bindable(candidate, 11),
                    b'I' => self.verify_bindable(candidate, 12),
                    _ => false,
                },
                b'S' => self.verify_bindable(candidate, 13),
                b'V' => self.verify_bindable(candidate, 14),
                _ => false,
            },
            6 => match b[0] {
                b'A' => self.verify_bindable(candidate, 15),
                b'I' => self.verify_bindable(candidate, 16),
                b'L' => self.verify_bindable(candidate, 17),
                b'R' => self.verify_bindable(candidate, 18),
                b'S' => self.verify_bindable(candidate, 19),
                _ => false,
            },
            7 => self.verify_bindable(candidate, 20),
            _ => false,
        }
    }
}
