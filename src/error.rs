//! Errors reported by the sorted maps.

use thiserror::Error;

use crate::level_generator::geometric::GeometricError;

/// Errors that can occur when operating on a [`SortedMap`][crate::SortedMap].
///
/// A failing operation never modifies the map: every check is performed
/// before the structure is touched.
#[derive(Error, Debug, Clone, PartialEq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum MapError {
    /// An entry with an equal key is already present in the map.
    #[error("an entry with the same key already exists.")]
    DuplicateKey,
    /// No entry with the requested key is present in the map.
    #[error("the given key was not present in the map.")]
    KeyNotFound,
    /// The operation requires at least one entry.
    #[error("the map is empty.")]
    Empty,
    /// The destination slice cannot hold every entry from the given offset.
    #[error("destination has room for {available} entries but {needed} are required.")]
    DestinationTooSmall {
        /// Number of entries that had to be copied.
        needed: usize,
        /// Number of slots available from the starting offset.
        available: usize,
    },
    /// A construction parameter was outside of its valid range.
    #[error(transparent)]
    OutOfRange(#[from] GeometricError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::MapError;
    use crate::level_generator::geometric::GeometricError;

    #[test]
    fn messages() {
        assert_eq!(
            MapError::DuplicateKey.to_string(),
            "an entry with the same key already exists."
        );
        assert_eq!(
            MapError::DestinationTooSmall {
                needed: 4,
                available: 2
            }
            .to_string(),
            "destination has room for 2 entries but 4 are required."
        );
    }

    #[test]
    fn from_geometric() {
        let err: MapError = GeometricError::InvalidProbability.into();
        assert_eq!(err, MapError::OutOfRange(GeometricError::InvalidProbability));
        assert_eq!(err.to_string(), "p must be in (0, 1).");
    }
}
