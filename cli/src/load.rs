use hexmines_core::*;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No file found with name \"{}\"", .path.display())]
    MissingFile { path: PathBuf },
    #[error("Could not read \"{}\": {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Malformed(#[from] GameError),
}

/// Reads and parses a board-definition file.
pub fn load_definition(path: &Path) -> core::result::Result<BoardDefinition, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::MissingFile {
            path: path.to_owned(),
        },
        _ => LoadError::Unreadable {
            path: path.to_owned(),
            source,
        },
    })?;

    let definition = text.parse()?;
    log::debug!("Loaded board definition from {}", path.display());
    Ok(definition)
}
