//! Store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Session index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Nothing to restore")]
    NothingToRestore,

    #[error("Storage error: {0}")]
    Storage(#[from] chatdeck_storage::StorageError),
}
