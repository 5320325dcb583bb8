//! A skiplist ordered by a caller-supplied [`Comparator`], with optional runs of duplicate
//! entries and stable [`NodeId`] identities for precise deletion.
//!
//! Lookups, insertions and deletions take `O(log n)` expected time, and `O(n)` in the worst
//! case, which is exponentially unlikely.
//!
//! ```
//! use comparator_skiplist::{Ascending, Skiplist};
//!
//! let mut list = Skiplist::new_allowing_duplicates(|lhs: &(u8, char), rhs: &(u8, char)| {
//!     lhs.0 < rhs.0
//! });
//! list.put((2, 'a'));
//! list.put((1, 'b'));
//! let (id, _) = list.put((2, 'c'));
//! list.put_front((2, 'd'));
//!
//! let values: Vec<_> = list.iter().copied().collect();
//! assert_eq!(values, [(1, 'b'), (2, 'd'), (2, 'a'), (2, 'c')]);
//!
//! let removed = list.delete_by_identity(id).unwrap();
//! assert_eq!(removed.into_value(), (2, 'c'));
//! assert_eq!(list.get_last(&(2, ' ')).map(|entry| *entry.value()), Some((2, 'a')));
//!
//! let mut sorted = Skiplist::new(Ascending);
//! sorted.extend(["pear", "apple", "fig"]);
//! assert_eq!(sorted.first().map(|entry| *entry.value()), Some("apple"));
//! ```

mod interface;
mod default_comparator;
mod error;
mod options;

mod node;
mod node_heights;
mod node_pool;

mod list;


pub use self::{
    default_comparator::{Ascending, Descending},
    error::SkiplistError,
    interface::Comparator,
    list::{Entry, Iter, Removed, Skiplist},
    node::NodeId,
    node_heights::{DEFAULT_MAX_HEIGHT, MAX_SUPPORTED_HEIGHT},
    options::SkiplistOptions,
};
