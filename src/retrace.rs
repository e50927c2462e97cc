//! Upward walks that restore balance factors after a structural change.
//!
//! Insertion and removal move balance factors in opposite directions and stop
//! under different conditions, so each has its own walk.

use log::trace;
use crate::balance::rebalance;
use crate::node::{Arena, Id, Side};

fn adjust(arena: &mut Arena, id: Id, delta: i8) {
    let node = &mut arena[id];
    node.balance += delta;
    assert!(node.balance.abs() <= 2,
            "balance factor of {} out of range: {}", node.key, node.balance);
}

/// Retraces from a freshly attached leaf `child` towards the root.
///
/// Returns the highest node the walk reached. When that node has no parent
/// it is the tree's new root.
pub fn retrace_insert(arena: &mut Arena, mut child: Id) -> Id {
    trace!("retracing insert at {}", arena[child].key);

    while let Some(parent) = arena[child].parent {
        match arena.side_of(parent, child) {
            Side::Left => adjust(arena, parent, -1),
            Side::Right => adjust(arena, parent, 1),
        }

        let mut top = parent;
        if arena[top].balance.abs() == 2 { top = rebalance(arena, top); }

        // a zero balance means this subtree kept its height
        if arena[top].parent.is_none() || arena[top].balance == 0 {
            trace!("insert retrace stopped at {}", arena[top].key);
            return top;
        }
        child = top;
    }

    child
}

/// Retraces from `node`, below which a subtree just lost one level of
/// height. `node`'s own balance factor must already account for the loss.
///
/// Returns the highest node the walk reached. When that node has no parent
/// it is the tree's new root.
pub fn retrace_remove(arena: &mut Arena, mut node: Id) -> Id {
    trace!("retracing removal from {}", arena[node].key);

    loop {
        if arena[node].balance.abs() == 2 { node = rebalance(arena, node); }
        assert!(arena[node].balance.abs() <= 1,
                "balance factor of {} out of range after rebalance: {}",
                arena[node].key, arena[node].balance);

        // one side still reaches the old height
        if arena[node].balance != 0 { break; }

        let parent = match arena[node].parent {
            Some(parent) => parent,
            None => break,
        };
        match arena.side_of(parent, node) {
            Side::Left => adjust(arena, parent, 1),
            Side::Right => adjust(arena, parent, -1),
        }
        node = parent;
    }

    trace!("remove retrace stopped at {}", arena[node].key);
    node
}
