mod iter;


use std::ops::{Index, IndexMut};
use slab::Slab;
use super::Key;

pub use self::iter::Iter;

/// An index into the node arena.
pub type Id = usize;

/// An optional edge between two nodes.
pub type Link = Option<Id>;

/// Which child slot of a node an edge occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub key: Key,
    pub left: Link,
    pub right: Link,
    // Back-link for upward retracing. Never used to release anything.
    pub parent: Link,
    // height(right) - height(left)
    pub balance: i8,
}

impl Node {
    fn new(key: Key) -> Self {
        Node { key: key, left: None, right: None, parent: None, balance: 0 }
    }

    pub fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Link {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Slab-backed node storage. The slab is the sole owner of every node; a
/// vacated key is handed out again by the next `alloc`.
#[derive(Clone, Debug, Default)]
pub struct Arena {
    nodes: Slab<Node>,
}

impl Arena {
    /// Number of live nodes.
    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn clear(&mut self) { self.nodes.clear(); }

    /// Creates a detached leaf holding `key`.
    pub fn alloc(&mut self, key: Key) -> Id { self.nodes.insert(Node::new(key)) }

    /// Releases the node at `id`. Panics if the slot is already vacant.
    pub fn release(&mut self, id: Id) -> Node {
        match self.nodes.try_remove(id) {
            Some(node) => node,
            None => panic!("released vacant node slot {}", id),
        }
    }

    /// Returns the side of `parent` that links to `child`.
    ///
    /// Panics if `child` is not a child of `parent`, or if its back-link does
    /// not point at `parent`.
    pub fn side_of(&self, parent: Id, child: Id) -> Side {
        assert!(self[child].parent == Some(parent),
                "node {} does not point back at parent {}", self[child].key, self[parent].key);
        if self[parent].left == Some(child) {
            Side::Left
        } else if self[parent].right == Some(child) {
            Side::Right
        } else {
            panic!("node {} is not a child of {}", self[child].key, self[parent].key)
        }
    }

    /// Installs `child` in the `side` slot of `parent` and points its back-link
    /// at `parent`. Whatever occupied the slot before is left untouched.
    pub fn set_child(&mut self, parent: Id, side: Side, child: Link) {
        *self[parent].child_mut(side) = child;
        if let Some(child) = child { self[child].parent = Some(parent); }
    }

    /// Follows left links from `id` down to the smallest key in its subtree.
    pub fn leftmost(&self, mut id: Id) -> Id {
        while let Some(left) = self[id].left { id = left; }
        id
    }

    /// Looks up the node holding `key` below `link`.
    pub fn find(&self, mut link: Link, key: Key) -> Link {
        while let Some(id) = link {
            let node = &self[id];
            link = if key < node.key {
                node.left
            } else if key > node.key {
                node.right
            } else {
                return Some(id);
            };
        }
        None
    }

    pub fn height(&self, link: Link) -> usize {
        match link {
            None => 0,
            Some(id) => 1 + self.height(self[id].left).max(self.height(self[id].right)),
        }
    }
}

impl Index<Id> for Arena {
    type Output = Node;

    fn index(&self, id: Id) -> &Node {
        match self.nodes.get(id) {
            Some(node) => node,
            _ => panic!("dangling node handle {}", id),
        }
    }
}

impl IndexMut<Id> for Arena {
    fn index_mut(&mut self, id: Id) -> &mut Node {
        match self.nodes.get_mut(id) {
            Some(node) => node,
            _ => panic!("dangling node handle {}", id),
        }
    }
}
