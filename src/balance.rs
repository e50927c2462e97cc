//! Rotation primitives.
//!
//! Each primitive takes a node `x` whose balance factor is +2 or -2 and
//! returns the node that now tops the subtree. The returned node inherits
//! `x`'s parent back-link, but the parent's child slot still names `x`;
//! re-linking it is the caller's job (see `rebalance`).

use log::trace;
use crate::node::{Arena, Id, Side};

/// Restores balance at `x` with whichever rotation its shape calls for, and
/// installs the new subtree top in `x`'s former parent slot. Returns the new
/// top.
pub fn rebalance(arena: &mut Arena, x: Id) -> Id {
    let parent = arena[x].parent;
    let side = parent.map(|parent| arena.side_of(parent, x));

    let top = match arena[x].balance {
        2 => {
            let z = right_child(arena, x);
            if arena[z].balance == -1 { right_left(arena, x) } else { right_right(arena, x) }
        }
        -2 => {
            let z = left_child(arena, x);
            if arena[z].balance == 1 { left_right(arena, x) } else { left_left(arena, x) }
        }
        balance => panic!("asked to rebalance {} with balance factor {}", arena[x].key, balance),
    };

    if let (Some(parent), Some(side)) = (parent, side) {
        arena.set_child(parent, side, Some(top));
    }
    trace!("rebalanced {} to {}", arena[x].key, arena[top].key);
    top
}

fn left_child(arena: &Arena, x: Id) -> Id {
    match arena[x].left {
        Some(z) => z,
        None => panic!("left-heavy node {} has no left child", arena[x].key),
    }
}

fn right_child(arena: &Arena, x: Id) -> Id {
    match arena[x].right {
        Some(z) => z,
        None => panic!("right-heavy node {} has no right child", arena[x].key),
    }
}

// Right subtree is right heavy, rotate left:
//
//     X b=2                  Z b=[-1,0]
//    / \                    / \
//   t0  Z b=[0,1]   ==>    X   t2  b=[1,0]
//      / \                / \
//     t1  t2             t0  t1
pub fn right_right(arena: &mut Arena, x: Id) -> Id {
    trace!("RR rotation at {}", arena[x].key);
    assert!(arena[x].balance == 2, "RR rotation at {} with balance {}", arena[x].key, arena[x].balance);
    let z = right_child(arena, x);
    assert!(arena[z].balance != -1, "right-left shape at {} in RR rotation", arena[x].key);

    arena[z].parent = arena[x].parent;
    let t1 = arena[z].left;
    arena.set_child(x, Side::Right, t1);
    arena.set_child(z, Side::Left, Some(x));

    if arena[z].balance == 0 {
        // only reachable from a removal
        arena[x].balance = 1;
        arena[z].balance = -1;
    } else {
        arena[x].balance = 0;
        arena[z].balance = 0;
    }
    z
}

// Mirror of `right_right`:
//
//          X b=-2            Z b=[1,0]
//         / \               / \
// b=[-1,0] Z  t2    ==>    t0  X b=[-1,0]
//       / \                   / \
//      t0  t1                t1  t2
pub fn left_left(arena: &mut Arena, x: Id) -> Id {
    trace!("LL rotation at {}", arena[x].key);
    assert!(arena[x].balance == -2, "LL rotation at {} with balance {}", arena[x].key, arena[x].balance);
    let z = left_child(arena, x);
    assert!(arena[z].balance != 1, "left-right shape at {} in LL rotation", arena[x].key);

    arena[z].parent = arena[x].parent;
    let t1 = arena[z].right;
    arena.set_child(x, Side::Left, t1);
    arena.set_child(z, Side::Right, Some(x));

    if arena[z].balance == 0 {
        arena[x].balance = -1;
        arena[z].balance = 1;
    } else {
        arena[x].balance = 0;
        arena[z].balance = 0;
    }
    z
}

//       X b=2                     Y b=0
//      / \                       /   \
//     t0  Z b=-1               X       Z
//        / \         ==>      / \     / \
//       Y   t3               t0  t1  t2  t3
//      / \
//     t1  t2
pub fn right_left(arena: &mut Arena, x: Id) -> Id {
    trace!("RL rotation at {}", arena[x].key);
    assert!(arena[x].balance == 2, "RL rotation at {} with balance {}", arena[x].key, arena[x].balance);
    let z = right_child(arena, x);
    assert!(arena[z].balance == -1, "right-right shape at {} in RL rotation", arena[x].key);
    let y = left_child(arena, z);

    arena[y].parent = arena[x].parent;
    let (t1, t2) = (arena[y].left, arena[y].right);
    arena.set_child(x, Side::Right, t1);
    arena.set_child(z, Side::Left, t2);
    arena.set_child(y, Side::Left, Some(x));
    arena.set_child(y, Side::Right, Some(z));

    let (bx, bz) = match arena[y].balance {
        0 => (0, 0),
        -1 => (0, 1),
        1 => (-1, 0),
        balance => panic!("balance factor {} at {} in RL rotation", balance, arena[y].key),
    };
    arena[x].balance = bx;
    arena[z].balance = bz;
    arena[y].balance = 0;
    y
}

//         X b=-2                  Y b=0
//        / \                     /   \
//  b=1  Z   t3                 Z       X
//      / \           ==>      / \     / \
//     t0  Y                  t0  t1  t2  t3
//        / \
//       t1  t2
pub fn left_right(arena: &mut Arena, x: Id) -> Id {
    trace!("LR rotation at {}", arena[x].key);
    assert!(arena[x].balance == -2, "LR rotation at {} with balance {}", arena[x].key, arena[x].balance);
    let z = left_child(arena, x);
    assert!(arena[z].balance == 1, "left-left shape at {} in LR rotation", arena[x].key);
    let y = right_child(arena, z);

    arena[y].parent = arena[x].parent;
    let (t1, t2) = (arena[y].left, arena[y].right);
    arena.set_child(z, Side::Right, t1);
    arena.set_child(x, Side::Left, t2);
    arena.set_child(y, Side::Left, Some(z));
    arena.set_child(y, Side::Right, Some(x));

    let (bz, bx) = match arena[y].balance {
        0 => (0, 0),
        -1 => (0, 1),
        1 => (-1, 0),
        balance => panic!("balance factor {} at {} in LR rotation", balance, arena[y].key),
    };
    arena[z].balance = bz;
    arena[x].balance = bx;
    arena[y].balance = 0;
    y
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::node::test::{build, render};

    #[test]
    fn right_right_single() {
        let mut arena = Arena::default();
        let x = build(&mut arena, "0:2(. 1:1(. 2:0))");
        let top = right_right(&mut arena, x);
        assert_eq!(render(&arena, Some(top)), "1:0(0:0 2:0)");
        assert_eq!(arena[top].parent, None);
    }

    #[test]
    fn left_left_single() {
        let mut arena = Arena::default();
        let x = build(&mut arena, "2:-2(1:-1(0:0 .) .)");
        let top = left_left(&mut arena, x);
        assert_eq!(render(&arena, Some(top)), "1:0(0:0 2:0)");
    }

    #[test]
    fn single_rotations_after_removal() {
        let mut arena = Arena::default();
        let x = build(&mut arena, "1:2(. 3:0(2:0 4:0))");
        let top = right_right(&mut arena, x);
        assert_eq!(render(&arena, Some(top)), "3:-1(1:1(. 2:0) 4:0)");

        let mut arena = Arena::default();
        let x = build(&mut arena, "3:-2(1:0(0:0 2:0) .)");
        let top = left_left(&mut arena, x);
        assert_eq!(render(&arena, Some(top)), "1:1(0:0 3:-1(2:0 .))");
    }

    #[test]
    fn right_left_double() {
        let mut arena = Arena::default();
        let x = build(&mut arena, "1:2(0:0 5:-1(3:0(2:0 4:0) 6:0))");
        let top = right_left(&mut arena, x);
        assert_eq!(render(&arena, Some(top)), "3:0(1:0(0:0 2:0) 5:0(4:0 6:0))");
    }

    #[test]
    fn right_left_heavy_grandchild() {
        let mut arena = Arena::default();
        let x = build(&mut arena, "1:2(0:0 4:-1(3:-1(2:0 .) 5:0))");
        let top = right_left(&mut arena, x);
        assert_eq!(render(&arena, Some(top)), "3:0(1:0(0:0 2:0) 4:1(. 5:0))");

        let mut arena = Arena::default();
        let x = build(&mut arena, "1:2(0:0 4:-1(2:1(. 3:0) 5:0))");
        let top = right_left(&mut arena, x);
        assert_eq!(render(&arena, Some(top)), "2:0(1:-1(0:0 .) 4:0(3:0 5:0))");
    }

    #[test]
    fn left_right_double() {
        let mut arena = Arena::default();
        let x = build(&mut arena, "5:-2(1:1(0:0 3:0(2:0 4:0)) 6:0)");
        let top = left_right(&mut arena, x);
        assert_eq!(render(&arena, Some(top)), "3:0(1:0(0:0 2:0) 5:0(4:0 6:0))");
    }

    #[test]
    fn left_right_heavy_grandchild() {
        let mut arena = Arena::default();
        let x = build(&mut arena, "4:-2(1:1(0:0 2:1(. 3:0)) 5:0)");
        let top = left_right(&mut arena, x);
        assert_eq!(render(&arena, Some(top)), "2:0(1:-1(0:0 .) 4:0(3:0 5:0))");

        let mut arena = Arena::default();
        let x = build(&mut arena, "4:-2(1:1(0:0 3:-1(2:0 .)) 5:0)");
        let top = left_right(&mut arena, x);
        assert_eq!(render(&arena, Some(top)), "3:0(1:0(0:0 2:0) 4:1(. 5:0))");
    }

    #[test]
    fn rebalance_relinks_parent() {
        let mut arena = Arena::default();
        let root = build(&mut arena, "10:1(5:0 20:2(. 21:1(. 22:0)))");
        let x = arena.find(Some(root), 20).unwrap();
        let top = rebalance(&mut arena, x);
        assert_eq!(arena[top].key, 21);
        assert_eq!(arena[top].parent, Some(root));
        assert_eq!(arena[root].right, Some(top));
        assert_eq!(render(&arena, Some(root)), "10:1(5:0 21:0(20:0 22:0))");
    }

    #[test]
    fn rebalance_picks_double_rotation() {
        let mut arena = Arena::default();
        let x = build(&mut arena, "0:2(. 2:-1(1:0 .))");
        let top = rebalance(&mut arena, x);
        assert_eq!(render(&arena, Some(top)), "1:0(0:0 2:0)");

        let mut arena = Arena::default();
        let x = build(&mut arena, "2:-2(0:1(. 1:0) .)");
        let top = rebalance(&mut arena, x);
        assert_eq!(render(&arena, Some(top)), "1:0(0:0 2:0)");
    }

    #[test]
    #[should_panic(expected = "right-left shape")]
    fn right_right_rejects_zigzag() {
        let mut arena = Arena::default();
        let x = build(&mut arena, "0:2(. 2:-1(1:0 .))");
        right_right(&mut arena, x);
    }

    #[test]
    #[should_panic(expected = "left-left shape")]
    fn left_right_rejects_straight_line() {
        let mut arena = Arena::default();
        let x = build(&mut arena, "2:-2(1:-1(0:0 .) .)");
        left_right(&mut arena, x);
    }

    #[test]
    #[should_panic(expected = "left-right shape")]
    fn left_left_rejects_zigzag() {
        let mut arena = Arena::default();
        let x = build(&mut arena, "2:-2(0:1(. 1:0) .)");
        left_left(&mut arena, x);
    }

    #[test]
    #[should_panic(expected = "right-right shape")]
    fn right_left_rejects_straight_line() {
        let mut arena = Arena::default();
        let x = build(&mut arena, "0:2(. 1:1(. 2:0))");
        right_left(&mut arena, x);
    }

    #[test]
    #[should_panic(expected = "asked to rebalance")]
    fn rebalance_rejects_balanced_node() {
        let mut arena = Arena::default();
        let x = build(&mut arena, "1:0(0:0 2:0)");
        rebalance(&mut arena, x);
    }
}
