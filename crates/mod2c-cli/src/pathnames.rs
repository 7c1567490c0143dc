//! Pathname validation per host-platform grammar.
//!
//! A pathname splits into directory path and filename; the filename into
//! basename and suffix. Only `.def`/`.DEF` and `.mod`/`.MOD` are source
//! suffixes. The character-class policy for components is fixed per host
//! at compile time: period, space, minus and tilde are independently
//! permitted or not.

#[cfg(windows)]
mod policy {
    pub const PERIOD: bool = true;
    pub const SPACE: bool = true;
    pub const MINUS: bool = true;
    pub const TILDE: bool = false;
}

#[cfg(not(windows))]
mod policy {
    pub const PERIOD: bool = true;
    pub const SPACE: bool = false;
    pub const MINUS: bool = true;
    pub const TILDE: bool = true;
}

/// Recognized source-file suffixes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Suffix {
    Def,
    Mod,
}

impl Suffix {
    pub fn from_ext(ext: &str) -> Option<Suffix> {
        match ext {
            "def" | "DEF" => Some(Suffix::Def),
            "mod" | "MOD" => Some(Suffix::Mod),
            _ => None,
        }
    }
}

/// A validated pathname, split into its parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pathname {
    /// Directory part including the trailing separator, or empty.
    pub directory: String,
    /// Filename without the suffix.
    pub basename: String,
    /// Recognized source suffix, if the filename carries one.
    pub suffix: Option<Suffix>,
}

impl Pathname {
    /// Sibling path with the same directory and basename but `ext`.
    pub fn sibling(&self, ext: &str) -> String {
        format!("{}{}.{ext}", self.directory, self.basename)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathnameError {
    Empty,
    MissingFilename,
    IllegalChar(char),
}

impl std::fmt::Display for PathnameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathnameError::Empty => f.write_str("empty pathname"),
            PathnameError::MissingFilename => f.write_str("pathname has no filename part"),
            PathnameError::IllegalChar(c) => {
                write!(f, "illegal character {c:?} in pathname")
            }
        }
    }
}

impl std::error::Error for PathnameError {}

fn legal_component_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || (c == '.' && policy::PERIOD)
        || (c == ' ' && policy::SPACE)
        || (c == '-' && policy::MINUS)
        || (c == '~' && policy::TILDE)
}

fn is_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}

/// Validate and split a pathname.
pub fn parse(path: &str) -> Result<Pathname, PathnameError> {
    if path.is_empty() {
        return Err(PathnameError::Empty);
    }
    for c in path.chars() {
        if !is_separator(c) && !legal_component_char(c) {
            return Err(PathnameError::IllegalChar(c));
        }
    }

    let split_at = path
        .char_indices()
        .filter(|(_, c)| is_separator(*c))
        .map(|(i, _)| i + 1)
        .next_back()
        .unwrap_or(0);
    let (directory, filename) = path.split_at(split_at);
    if filename.is_empty() {
        return Err(PathnameError::MissingFilename);
    }

    let (basename, suffix) = match filename.rfind('.') {
        // A leading period marks a hidden file, not a suffix.
        Some(0) | None => (filename.to_owned(), None),
        Some(dot) => {
            let ext = &filename[dot + 1..];
            match Suffix::from_ext(ext) {
                Some(suffix) => (filename[..dot].to_owned(), Some(suffix)),
                None => (filename.to_owned(), None),
            }
        }
    };

    Ok(Pathname {
        directory: directory.to_owned(),
        basename,
        suffix,
    })
}
