use shadowdom::DomError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("unknown property {0:?}")]
    UnknownProperty(String),
    #[error("node is not a <search-widget>")]
    NotASearchWidget,
    #[error(transparent)]
    Dom(#[from] DomError),
}
