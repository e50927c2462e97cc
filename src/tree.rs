//! The tree handle.

use log::debug;
use std::fmt::{self, Debug};
use crate::node::{Arena, Id, Iter, Link, Side};
use crate::retrace::{retrace_insert, retrace_remove};
use crate::validate::{self, Violation};
use crate::Key;

/// A set of `i64` keys kept in a height-balanced (AVL) binary search tree.
///
/// Insertion, removal and lookup take `O(log n)` time. The tree is not
/// internally synchronized; share it across threads behind a lock.
#[derive(Clone, Default)]
pub struct Tree {
    arena: Arena,
    root: Link,
}

impl Tree {
    /// Creates an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree = avl::Tree::new();
    /// assert!(tree.is_empty());
    /// assert!(tree.root().is_none());
    /// ```
    pub fn new() -> Self { Tree { arena: Arena::default(), root: None } }

    /// Checks if the tree is empty.
    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Returns the number of keys in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = avl::Tree::new();
    /// tree.insert(4);
    /// tree.insert(4);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.arena.len() }

    /// Returns the number of levels in the tree; zero when it is empty.
    pub fn height(&self) -> usize { self.arena.height(self.root) }

    /// Removes every key from the tree.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Returns a handle to the root node, if any.
    pub fn root(&self) -> Option<NodeRef<'_>> { self.node(self.root) }

    /// Inserts a key into the tree, returning `true` if it was not already
    /// present. Inserting a key that is present leaves the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = avl::Tree::new();
    /// assert!(tree.insert(0));
    /// assert!(tree.insert(1));
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(2));
    ///
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.key(), 1);
    /// assert_eq!(root.balance(), 0);
    /// ```
    pub fn insert(&mut self, key: Key) -> bool {
        let (parent, side) = {
            let mut parent = match self.root {
                None => {
                    self.root = Some(self.arena.alloc(key));
                    return true;
                }
                Some(root) => root,
            };

            loop {
                let node = &self.arena[parent];
                let side = if key < node.key {
                    Side::Left
                } else if key > node.key {
                    Side::Right
                } else {
                    return false;
                };

                match node.child(side) {
                    Some(child) => parent = child,
                    None => break (parent, side),
                }
            }
        };

        debug!("inserting {} below {}", key, self.arena[parent].key);
        let leaf = self.arena.alloc(key);
        self.arena.set_child(parent, side, Some(leaf));

        let top = retrace_insert(&mut self.arena, leaf);
        self.adopt(top);
        true
    }

    /// Removes a key from the tree, returning `true` if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree: avl::Tree = (0..3).collect();
    /// assert!(tree.remove(1));
    /// assert!(!tree.remove(1));
    /// assert_eq!(tree.len(), 2);
    /// assert!(tree.validate().is_ok());
    /// ```
    pub fn remove(&mut self, key: Key) -> bool {
        let id = match self.arena.find(self.root, key) {
            Some(id) => id,
            None => return false,
        };
        debug!("removing {}", key);

        let Tree { ref mut arena, ref mut root } = *self;
        let (parent, left, right) = (arena[id].parent, arena[id].left, arena[id].right);

        let top = match (left, right) {
            (None, None) => parent.map(|parent| {
                match arena.side_of(parent, id) {
                    Side::Left => {
                        arena.set_child(parent, Side::Left, None);
                        arena[parent].balance += 1;
                    }
                    Side::Right => {
                        arena.set_child(parent, Side::Right, None);
                        arena[parent].balance -= 1;
                    }
                }
                retrace_remove(arena, parent)
            }),
            (Some(left), None) => {
                replace(arena, root, id, left);
                Some(retrace_remove(arena, left))
            }
            (_, Some(right)) if arena[right].left.is_none() => {
                arena.set_child(right, Side::Left, left);
                arena[right].balance = arena[id].balance - 1;
                replace(arena, root, id, right);
                Some(retrace_remove(arena, right))
            }
            (_, Some(right)) => {
                let successor = arena.leftmost(right);
                let detached_from = match arena[successor].parent {
                    Some(parent) => parent,
                    None => unreachable!("successor {} below {} has no parent", arena[successor].key, key),
                };

                // the successor has no left child; its right subtree moves up
                let orphan = arena[successor].right;
                arena.set_child(detached_from, Side::Left, orphan);
                arena[detached_from].balance += 1;

                arena[successor].balance = arena[id].balance;
                arena.set_child(successor, Side::Left, left);
                arena.set_child(successor, Side::Right, Some(right));
                replace(arena, root, id, successor);

                // the height loss starts where the successor was taken from
                Some(retrace_remove(arena, detached_from))
            }
        };

        arena.release(id);
        match top {
            Some(top) => self.adopt(top),
            None => self.root = None,
        }
        true
    }

    /// Returns a handle to the node holding `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree: avl::Tree = vec![i64::MIN, 0, i64::MAX].into_iter().collect();
    /// assert_eq!(tree.search(i64::MIN).map(|node| node.key()), Some(i64::MIN));
    /// assert!(tree.search(1).is_none());
    /// ```
    pub fn search(&self, key: Key) -> Option<NodeRef<'_>> {
        self.node(self.arena.find(self.root, key))
    }

    /// Checks if the tree contains `key`.
    pub fn contains(&self, key: Key) -> bool { self.arena.find(self.root, key).is_some() }

    /// Returns an iterator over the tree's keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree: avl::Tree = vec![3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_> { Iter::new(&self.arena, self.root) }

    /// Audits every structural invariant of the tree, returning the first
    /// violation found.
    pub fn validate(&self) -> Result<(), Violation> { validate::validate(&self.arena, self.root) }

    fn node(&self, link: Link) -> Option<NodeRef<'_>> {
        link.map(|id| NodeRef { arena: &self.arena, id: id })
    }

    // A retrace that ends at a parentless node has reached the root.
    fn adopt(&mut self, top: Id) {
        if self.arena[top].parent.is_none() { self.root = Some(top); }
    }

    #[cfg(test)]
    fn render(&self) -> String { crate::node::test::render(&self.arena, self.root) }
}

// Puts `new` where `old` hangs, in its parent or at the root.
fn replace(arena: &mut Arena, root: &mut Link, old: Id, new: Id) {
    match arena[old].parent {
        Some(parent) => {
            let side = arena.side_of(parent, old);
            arena.set_child(parent, side, Some(new));
        }
        None => {
            arena[new].parent = None;
            *root = Some(new);
        }
    }
}

impl Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Tree) -> bool { self.len() == other.len() && self.iter().eq(other.iter()) }
}

impl Eq for Tree {}

impl FromIterator<Key> for Tree {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Tree {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<Key> for Tree {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        for key in iter { self.insert(key); }
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = Key;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Iter<'a> { self.iter() }
}

/// A read-only handle to a node in a [`Tree`].
///
/// The handle borrows the tree, so the tree cannot change while it is alive.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    arena: &'a Arena,
    id: Id,
}

impl<'a> NodeRef<'a> {
    /// Returns the node's key.
    pub fn key(&self) -> Key { self.arena[self.id].key }

    /// Returns the height of the right subtree minus that of the left.
    pub fn balance(&self) -> i8 { self.arena[self.id].balance }

    /// Returns a handle to the node's left child, if any.
    pub fn left(&self) -> Option<NodeRef<'a>> { self.link(self.arena[self.id].left) }

    /// Returns a handle to the node's right child, if any.
    pub fn right(&self) -> Option<NodeRef<'a>> { self.link(self.arena[self.id].right) }

    /// Returns a handle to the node's parent, or `None` at the root.
    pub fn parent(&self) -> Option<NodeRef<'a>> { self.link(self.arena[self.id].parent) }

    fn link(&self, link: Link) -> Option<NodeRef<'a>> {
        link.map(|id| NodeRef { arena: self.arena, id: id })
    }
}

impl<'a> PartialEq for NodeRef<'a> {
    fn eq(&self, other: &NodeRef<'a>) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

impl<'a> Eq for NodeRef<'a> {}

impl<'a> Debug for NodeRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef").field("key", &self.key()).field("balance", &self.balance()).finish()
    }
}
