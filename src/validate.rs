use thiserror::Error;
use crate::node::{Arena, Id, Link};
use crate::Key;

/// A broken structural invariant, as reported by [`Tree::validate`](crate::Tree::validate).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A key sits on the wrong side of one of its ancestors.
    #[error("key {key} is out of order under {ancestor}")]
    Order { key: Key, ancestor: Key },
    /// A stored balance factor disagrees with the subtree heights.
    #[error("node {key} records balance {recorded} but its subtrees differ by {actual}")]
    BalanceMismatch { key: Key, recorded: i8, actual: isize },
    /// Subtree heights differ by more than one.
    #[error("node {key} is unbalanced: {balance}")]
    Unbalanced { key: Key, balance: i8 },
    /// A child's back-link does not name the node that links to it.
    #[error("node {key} does not point back at its parent {parent}")]
    ParentLink { key: Key, parent: Key },
    /// The root's back-link is set.
    #[error("root {key} has a parent")]
    RootHasParent { key: Key },
    /// Some live nodes are unreachable from the root.
    #[error("{reachable} nodes reachable from the root, {len} allocated")]
    Count { reachable: usize, len: usize },
}

/// Audits the whole tree below `root`.
pub fn validate(arena: &Arena, root: Link) -> Result<(), Violation> {
    let mut reachable = 0;

    if let Some(root) = root {
        if arena[root].parent.is_some() {
            return Err(Violation::RootHasParent { key: arena[root].key });
        }
        check(arena, root, None, None, &mut reachable)?;
    }

    if reachable != arena.len() {
        return Err(Violation::Count { reachable: reachable, len: arena.len() });
    }
    Ok(())
}

// Returns the height of the subtree at `id`. `lower` and `upper` are the
// nearest ancestors the subtree must stay above and below.
fn check(arena: &Arena, id: Id, lower: Option<Key>, upper: Option<Key>, count: &mut usize)
    -> Result<usize, Violation> {

    let node = &arena[id];
    *count += 1;

    if let Some(lower) = lower {
        if node.key <= lower { return Err(Violation::Order { key: node.key, ancestor: lower }); }
    }
    if let Some(upper) = upper {
        if node.key >= upper { return Err(Violation::Order { key: node.key, ancestor: upper }); }
    }

    let mut heights = [0; 2];
    for (height, child) in heights.iter_mut().zip([node.left, node.right]) {
        if let Some(child) = child {
            if arena[child].parent != Some(id) {
                return Err(Violation::ParentLink { key: arena[child].key, parent: node.key });
            }
            *height = if Some(child) == node.left {
                check(arena, child, lower, Some(node.key), count)?
            } else {
                check(arena, child, Some(node.key), upper, count)?
            };
        }
    }

    let actual = heights[1] as isize - heights[0] as isize;
    if actual != node.balance as isize {
        return Err(Violation::BalanceMismatch { key: node.key, recorded: node.balance, actual: actual });
    }
    if node.balance.abs() > 1 {
        return Err(Violation::Unbalanced { key: node.key, balance: node.balance });
    }

    Ok(1 + heights[0].max(heights[1]))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::node::test::build;

    #[test]
    fn accepts_valid_tree() {
        let mut arena = Arena::default();
        let root = build(&mut arena, "3:-1(1:1(. 2:0) 4:0)");
        assert_eq!(validate(&arena, Some(root)), Ok(()));
        assert_eq!(validate(&Arena::default(), None), Ok(()));
    }

    #[test]
    fn reports_out_of_order_key() {
        let mut arena = Arena::default();
        let root = build(&mut arena, "3:-1(1:1(. 4:0) 5:0)");
        assert_eq!(validate(&arena, Some(root)), Err(Violation::Order { key: 4, ancestor: 3 }));
    }

    #[test]
    fn reports_wrong_balance() {
        let mut arena = Arena::default();
        let root = build(&mut arena, "1:1(0:0 2:0)");
        assert_eq!(validate(&arena, Some(root)),
                   Err(Violation::BalanceMismatch { key: 1, recorded: 1, actual: 0 }));
    }

    #[test]
    fn reports_unbalanced_node() {
        let mut arena = Arena::default();
        let root = build(&mut arena, "0:2(. 1:1(. 2:0))");
        assert_eq!(validate(&arena, Some(root)), Err(Violation::Unbalanced { key: 0, balance: 2 }));
    }

    #[test]
    fn reports_broken_back_link() {
        let mut arena = Arena::default();
        let root = build(&mut arena, "1:0(0:0 2:0)");
        let right = arena[root].right.unwrap();
        arena[right].parent = None;
        assert_eq!(validate(&arena, Some(root)), Err(Violation::ParentLink { key: 2, parent: 1 }));
    }

    #[test]
    fn reports_unreachable_nodes() {
        let mut arena = Arena::default();
        let root = build(&mut arena, "1:0(0:0 2:0)");
        arena.alloc(7);
        assert_eq!(validate(&arena, Some(root)), Err(Violation::Count { reachable: 3, len: 4 }));
    }
}
