//! A height-balanced (AVL) binary search tree over `i64` keys.
//!
//! Every node records its balance factor (right height minus left height) and
//! a back-link to its parent. After each insertion or removal the tree walks
//! from the point of change toward the root, correcting balance factors and
//! rotating wherever a factor reaches two.
//!
//! # Examples
//!
//! ```
//! let mut tree = avl::Tree::new();
//! for key in 0..100 { tree.insert(key); }
//!
//! assert!(tree.remove(42));
//! assert!(tree.search(42).is_none());
//! assert_eq!(tree.search(7).map(|node| node.key()), Some(7));
//! assert!(tree.validate().is_ok());
//! ```

mod balance;
mod node;
#[cfg(feature = "ordered_iter")]
mod ordered_iter;
#[cfg(feature = "quickcheck")]
mod quickcheck;
mod retrace;
mod tree;
mod validate;

pub use node::Iter;
pub use tree::{NodeRef, Tree};
pub use validate::Violation;

/// The key type stored in a [`Tree`].
pub type Key = i64;
