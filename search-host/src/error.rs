use std::io;

use search_widget::SearchError;
use shadowdom::DomError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("document error: {0}")]
    Dom(#[from] DomError),
    #[error("widget error: {0}")]
    Search(#[from] SearchError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
