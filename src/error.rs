use std::str::Utf8Error;

use camino::Utf8PathBuf;

#[derive(Debug)]
pub struct IoError(pub std::io::Error);

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct FileNotFound(pub Utf8PathBuf);

impl std::fmt::Display for FileNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "properties file not found: {}", self.0)
    }
}

#[derive(Debug)]
pub struct ResourceNotFound {
    pub name: String,
    pub searched: Vec<Utf8PathBuf>,
}

impl std::fmt::Display for ResourceNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "resource `{}` not found", self.name)?;
        if !self.searched.is_empty() {
            let roots: Vec<&str> = self.searched.iter().map(|p| p.as_str()).collect();
            write!(f, " (searched: {})", roots.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum DecodeError {
    InvalidUtf8(Utf8Error),
    MalformedEscape { line: usize },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::InvalidUtf8(e) => write!(f, "invalid UTF-8: {e}"),
            DecodeError::MalformedEscape { line } => {
                write!(f, "malformed \\uXXXX escape on line {line}")
            }
        }
    }
}

#[derive(Debug)]
pub struct Usage(pub String);

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct MissingKey(pub String);

impl std::fmt::Display for MissingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no value configured for `{}`", self.0)
    }
}
