//! Configuration persistence using `MessagePack`.
//!
//! Only the configuration is persisted. Evaluation state is rebuilt by
//! replaying events.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use condgraph_foundation::{Error, ErrorContext, ErrorKind, Result};

use crate::config::PipelineConfig;

/// Serializes a configuration to `MessagePack` bytes, keeping field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(config: &PipelineConfig) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(config)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a configuration from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<PipelineConfig> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!(
        "failed to {action} file '{}': {e}",
        path.display()
    )))
}

/// Saves a configuration to a file, overwriting any existing one.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(config: &PipelineConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;

    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(config)?;

    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;

    log::debug!("saved configuration to {}", path.display());
    Ok(())
}

/// Loads a configuration from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;

    from_bytes(&bytes).map_err(|e| {
        e.with_context(ErrorContext::new().with_source(path.display().to_string()))
    })
}
