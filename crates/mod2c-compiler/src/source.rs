//! Buffered character cursor over one source file.
//!
//! The reader presents the input as a stream of 7-bit characters with two
//! observable queries (current character and second lookahead), 1-based
//! line/column tracking, a single lexeme mark, and a rolling CRC-32 digest
//! over everything consumed through [`SourceReader::consume`]. Characters
//! consumed through [`SourceReader::skip`] bypass the digest; the lexer
//! uses that inside comments and pragmas so the digest covers code only.
//!
//! The file handle stays open (memory-mapped) for the lifetime of the
//! reader; string-backed readers exist for tests and in-memory input.

use std::fs::File;
use std::io;
use std::path::Path;

use mod2c_core::{Pool, Symbol};

use crate::diagnostics::Position;

/// Sentinel returned once the input is exhausted (ASCII EOT).
pub const EOT: u8 = 0x04;

enum Backing {
    /// The open file and its mapping. The handle is held until drop.
    Mapped { _file: File, map: memmap2::Mmap },
    Owned(Vec<u8>),
}

impl Backing {
    fn bytes(&self) -> &[u8] {
        match self {
            Backing::Mapped { map, .. } => map,
            Backing::Owned(buf) => buf,
        }
    }
}

pub struct SourceReader {
    backing: Backing,
    pos: usize,
    mark: usize,
    line: u32,
    column: u32,
    hasher: crc32fast::Hasher,
    digest: Option<u32>,
    past_eof: bool,
}

impl SourceReader {
    /// Open and map a source file.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        let backing = if len == 0 {
            // Zero-length mappings are rejected on some hosts.
            Backing::Owned(Vec::new())
        } else {
            // Safety: the mapping is read-only and outlives no borrow of
            // itself; concurrent truncation of a source file mid-compile
            // is outside the supported use.
            let map = unsafe { memmap2::Mmap::map(&file)? };
            Backing::Mapped { _file: file, map }
        };
        Ok(Self::with_backing(backing))
    }

    /// Reader over an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::with_backing(Backing::Owned(bytes))
    }

    pub fn from_str(text: &str) -> Self {
        Self::from_bytes(text.as_bytes().to_vec())
    }

    fn with_backing(backing: Backing) -> Self {
        Self {
            backing,
            pos: 0,
            mark: 0,
            line: 1,
            column: 1,
            hasher: crc32fast::Hasher::new(),
            digest: None,
            past_eof: false,
        }
    }

    fn byte_at(&self, index: usize) -> u8 {
        *self.backing.bytes().get(index).unwrap_or(&EOT)
    }

    /// The current (not yet consumed) character, or EOT.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// The character after the current one, or EOT.
    #[inline]
    pub fn la2(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    /// Consume the current character and return the new current one.
    ///
    /// The consumed character enters the rolling digest.
    pub fn consume(&mut self) -> u8 {
        self.advance(true)
    }

    /// Like [`consume`](Self::consume) but bypassing the digest.
    pub fn skip(&mut self) -> u8 {
        self.advance(false)
    }

    fn advance(&mut self, digested: bool) -> u8 {
        let bytes = self.backing.bytes();
        if self.pos >= bytes.len() {
            self.note_eof();
            return EOT;
        }
        let ch = bytes[self.pos];
        if digested {
            self.hasher.update(&[ch]);
        }
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        if self.pos >= bytes.len() {
            self.note_eof();
        }
        self.current()
    }

    fn note_eof(&mut self) {
        if !self.past_eof {
            self.past_eof = true;
            self.digest = Some(self.hasher.clone().finalize());
        }
    }

    /// Whether the final character has been consumed.
    pub fn at_eof(&self) -> bool {
        self.past_eof
    }

    /// Whether the cursor is past the last character. Distinguishes true
    /// end of input from an embedded EOT byte (which is an illegal
    /// control character, not end of file).
    pub fn exhausted(&self) -> bool {
        self.pos >= self.backing.bytes().len()
    }

    /// Line of the current character (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Column of the current character (1-based). Tabs count one column.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Position of the current character.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Remember the current cursor as the start of a lexeme.
    pub fn mark(&mut self) {
        self.mark = self.pos;
    }

    /// The bytes between the mark and the cursor.
    pub fn marked_bytes(&self) -> &[u8] {
        &self.backing.bytes()[self.mark..self.pos]
    }

    /// The marked lexeme as text. Input is 7-bit, so this is total for
    /// well-formed sources; stray high bytes are replaced.
    pub fn marked_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(self.marked_bytes())
    }

    /// Intern the marked lexeme in `pool`.
    pub fn intern_marked(&self, pool: &Pool) -> Symbol {
        pool.intern(&self.marked_str())
    }

    /// The rolling digest; readable only once end-of-file is reached.
    pub fn digest(&self) -> Option<u32> {
        self.digest
    }
}
