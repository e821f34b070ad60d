pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported number of sets: {count} (expected 2 or 3)")]
    UnsupportedSetCount { count: usize },

    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    #[error("Too many input sets: {count} (at most 3 are supported)")]
    TooManySets { count: usize },

    #[error("Unknown region key: {key}")]
    UnknownRegion { key: String },
}
