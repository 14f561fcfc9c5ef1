use thiserror::Error;

/// Errors returned by the containers and graph algorithms of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Duplicate registration, malformed input or a lookup of an unregistered item.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Heap operation on an element that is present when it must be absent, or vice versa.
    #[error("invalid element: {0}")]
    InvalidElement(&'static str),

    /// Access to the minimum of an empty heap.
    #[error("container is empty")]
    EmptyContainer,

    /// Dictionary lookup or removal of an absent key.
    #[error("no such key")]
    NoSuchKey,

    /// The destination of a shortest path query is unreachable from the source.
    #[error("no path exists between the given vertices")]
    NoPathExists,
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
