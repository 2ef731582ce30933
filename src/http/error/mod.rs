use crate::registry;

mod impls;

pub type Result<T> = std::result::Result<T, Error>;

/// Error surface of the HTTP layer.
///
/// The HTTP layer does no validation of its own; registry errors pass
/// through verbatim and are rendered with the status codes in `impls`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] registry::Error),
}
