use dualhunt_hal::ObjectId;

/// Errors raised while building a session.
///
/// Runtime operations never return these; a failed precondition during play
/// is reported through the operation's outcome value and the log.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HuntError {
    /// The item sequence is empty.
    #[error("no items configured")]
    NoItems,

    /// The registry cannot hold another item.
    #[error("item registry full (capacity {capacity})")]
    TooManyItems { capacity: usize },

    /// Two items (or an item and the finalize object) share a handle.
    #[error("duplicate object id {0:?}")]
    DuplicateItem(ObjectId),

    /// An item name does not fit the fixed-size name buffer.
    #[error("item name longer than {max} bytes")]
    NameTooLong { max: usize },

    /// A tuning value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
