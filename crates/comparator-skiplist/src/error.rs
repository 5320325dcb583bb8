use thiserror::Error;


/// Errors from configuring a [`Skiplist`] with [`SkiplistOptions`].
///
/// Looking up, inserting, or deleting entries never fails; absence is reported with `None`.
///
/// [`Skiplist`]: crate::Skiplist
/// [`SkiplistOptions`]: crate::SkiplistOptions
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkiplistError {
    #[error("a skiplist's maximum height must be in 1..={supported}, but {requested} was requested")]
    InvalidMaxHeight {
        requested: usize,
        supported: usize,
    },
}
