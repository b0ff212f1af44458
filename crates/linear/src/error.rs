use thiserror::Error;

/// Failures reported by sequence operations.
///
/// Every operation that returns one of these validates before mutating, so the
/// container is structurally unchanged when an error comes back.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum SequenceError {
    /// `pop_first` / `pop_last` on a sequence with no elements.
    #[error("operation on empty container")]
    EmptyContainer,
    /// Dereferencing or stepping past `begin()`/`end()`, or a position that
    /// does not name a live slot of this container.
    #[error("position out of range")]
    OutOfRange,
}

pub type Result<T> = std::result::Result<T, SequenceError>;

#[cfg(test)]
mod tests {
    use super::SequenceError;

    #[test]
    fn messages() {
        assert_eq!(
            SequenceError::EmptyContainer.to_string(),
            "operation on empty container"
        );
        assert_eq!(SequenceError::OutOfRange.to_string(), "position out of range");
    }
}
