// src/error.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure is terminal: the run aborts before anything is written.
#[derive(Debug, Error)]
pub enum Error {
    /// A required literal (panel heading, comment anchor or structural tag) is absent.
    #[error("marker not found: {marker}")]
    MarkerNotFound { marker: String },

    /// The container opened at `start` never returns to depth zero.
    #[error("unbalanced structure for {marker}: container at byte {start} still has {depth} open tag(s) at end of document")]
    UnbalancedStructure {
        marker: String,
        start: usize,
        depth: usize,
    },

    /// The first panel heading lies outside the input panel's content.
    #[error("panel '{title}' is not inside the input panel content")]
    PanelOutsideInputs { title: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn missing(marker: impl Into<String>) -> Self {
        Error::MarkerNotFound {
            marker: marker.into(),
        }
    }
}
