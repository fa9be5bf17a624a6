use thiserror::Error;

pub type RegionResult<T> = std::result::Result<T, RegionError>;

/// Rejection reasons for region creation, the one fallible command in the
/// session surface. Everything else degrades to a logged no-op.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("invalid {kind} geometry")]
    InvalidGeometry { kind: &'static str },
    #[error("freehand path needs at least three points, got {count}")]
    PathTooShort { count: usize },
}
