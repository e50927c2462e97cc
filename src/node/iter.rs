use std::iter::FusedIterator;
use super::{Arena, Link};
use crate::Key;

/// An iterator over a tree's keys in ascending order.
///
/// Successors are found through the nodes' parent links, so iteration needs no
/// auxiliary stack.
#[derive(Clone)]
pub struct Iter<'a> {
    arena: &'a Arena,
    next: Link,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub fn new(arena: &'a Arena, root: Link) -> Self {
        Iter {
            arena: arena,
            next: root.map(|root| arena.leftmost(root)),
            remaining: arena.len(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        let id = self.next?;
        let arena = self.arena;

        self.next = match arena[id].right {
            Some(right) => Some(arena.leftmost(right)),
            None => {
                // climb until we leave a left subtree
                let mut child = id;
                loop {
                    match arena[child].parent {
                        Some(parent) if arena[parent].right == Some(child) => child = parent,
                        parent => break parent,
                    }
                }
            }
        };

        self.remaining -= 1;
        Some(arena[id].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> FusedIterator for Iter<'a> {}
