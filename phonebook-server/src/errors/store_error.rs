use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("Could not remove {}: {source}", path.display())]
    Remove { path: PathBuf, source: io::Error },
    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Could not serialize records: {0}")]
    Serialize(serde_json::Error),
}
