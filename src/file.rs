use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read};

use camino::Utf8Path;
use terrors::OneOf;
use tracing::{debug, error};

use crate::error::{DecodeError, FileNotFound, IoError};
use crate::properties::Properties;

pub type ReadError = OneOf<(FileNotFound, IoError, DecodeError)>;
pub type StreamError = OneOf<(IoError, DecodeError)>;

/// Header comment written by [`write_value`].
const STORE_COMMENTS: &str = "";

/// Read a properties file into a map, leaving out `#` keys.
pub fn read_map(path: impl AsRef<Utf8Path>) -> Result<HashMap<String, String>, ReadError> {
    Ok(load_file(path.as_ref())?.to_map())
}

/// Read properties from a stream into a map, leaving out `#` keys.
pub fn read_map_from<R: Read>(reader: R) -> Result<HashMap<String, String>, StreamError> {
    Ok(load_stream(reader)?.to_map())
}

/// Read one value from a properties file. A missing key reads as `""`.
pub fn read_value(path: impl AsRef<Utf8Path>, key: &str) -> Result<String, ReadError> {
    let props = load_file(path.as_ref())?;
    Ok(props.get_or(key.trim(), "").to_string())
}

/// Read one value from a properties stream. A missing key reads as `""`.
pub fn read_value_from<R: Read>(reader: R, key: &str) -> Result<String, StreamError> {
    let props = load_stream(reader)?;
    Ok(props.get_or(key.trim(), "").to_string())
}

/// Add or replace `key` in an existing properties file and rewrite it.
///
/// The whole file is regenerated, so comments are not preserved. Writers are
/// not coordinated: concurrent updates to the same file may lose one another.
pub fn write_value(path: impl AsRef<Utf8Path>, key: &str, value: &str) -> Result<(), ReadError> {
    let path = path.as_ref();
    let mut props = load_file(path)?;
    props.set(key.trim(), value);

    let file = File::create(path).map_err(|e| {
        error!(path = %path, "failed to open properties file for writing: {e}");
        OneOf::new(IoError(e))
    })?;
    let mut writer = BufWriter::new(file);
    props.store(&mut writer, Some(STORE_COMMENTS)).map_err(|e| {
        error!(path = %path, "failed to write properties file: {e}");
        OneOf::new(IoError(e))
    })?;

    debug!(path = %path, key = key.trim(), "updated properties file");
    Ok(())
}

fn load_file(path: &Utf8Path) -> Result<Properties, ReadError> {
    let file = File::open(path).map_err(|e| -> ReadError {
        if e.kind() == ErrorKind::NotFound {
            error!(path = %path, "properties file not found");
            OneOf::new(FileNotFound(path.to_owned()))
        } else {
            error!(path = %path, "failed to open properties file: {e}");
            OneOf::new(IoError(e))
        }
    })?;

    let mut props = Properties::new();
    props.load_from(file).map_err(|e| -> ReadError {
        error!(path = %path, "failed to read properties file: {e}");
        OneOf::broaden(e)
    })?;
    Ok(props)
}

fn load_stream<R: Read>(reader: R) -> Result<Properties, StreamError> {
    let mut props = Properties::new();
    props.load_from(reader).map_err(|e| {
        error!("failed to read properties stream: {e}");
        e
    })?;
    Ok(props)
}
