// SPDX-License-Identifier: LGPL-2.1-or-later
//
// This file is based on the CXSparse implementation by Timothy A. Davis.
//
// CXSparse, Copyright (c) 2006-2024, Timothy A. Davis. All Rights Reserved.

use crate::error::{KernelError, KernelResult};
use crate::utils::EMPTY;

// depth-first search and postorder of the subtree rooted at j
fn tdfs(
    j: usize,
    mut k: usize,
    // head[p] is the next unvisited child of p
    head: &mut [isize],
    next: &[isize],
    post: &mut [usize],
    stack: &mut [isize],
) -> usize {
    let mut top: isize = 0;
    stack[0] = j as isize;

    while top >= 0 {
        let p = stack[top as usize] as usize;
        let i = head[p];
        if i == EMPTY {
            // all children of p are ordered: p is the kth node
            top -= 1;
            post[k] = p;
            k += 1;
        } else {
            // remove i from the children of p and start a dfs on it
            head[p] = next[i as usize];
            top += 1;
            stack[top as usize] = i;
        }
    }

    k
}

/// Postorder a forest given by its parent array (`EMPTY` for roots).
///
/// `post` needs `n` entries, `work` needs `3n`. On success `post[k]` is
/// the kth node of the ordering and every node appears after all of its
/// descendants. Children are visited in increasing index order.
pub fn postorder_with(parent: &[isize], post: &mut [usize], work: &mut [isize]) -> KernelResult<()> {
    let n = parent.len();
    if post.len() < n {
        return Err(KernelError::workspace("post", n, post.len()));
    }
    if work.len() < 3 * n {
        return Err(KernelError::workspace("work", 3 * n, work.len()));
    }
    if let Some(j) = parent.iter().position(|&p| p < EMPTY || p >= n as isize) {
        return Err(KernelError::InvalidIndex {
            row: j as isize,
            col: parent[j],
        });
    }

    let (head, rest) = work.split_at_mut(n);
    let (next, stack) = rest.split_at_mut(n);
    head.fill(EMPTY);

    // traverse nodes in reverse order so the child lists come out ascending
    for j in (0..n).rev() {
        let p = parent[j];
        if p == EMPTY {
            continue;
        }
        next[j] = head[p as usize];
        head[p as usize] = j as isize;
    }

    let mut k = 0;
    for j in 0..n {
        if parent[j] != EMPTY {
            continue;
        }
        k = tdfs(j, k, head, next, post, stack);
    }

    // nodes on a cycle are never reached from a root
    if k != n {
        return Err(KernelError::InvalidForest { ordered: k, n });
    }
    Ok(())
}

/// Allocating wrapper around [`postorder_with`].
pub fn postorder(parent: &[isize]) -> KernelResult<Vec<usize>> {
    let n = parent.len();
    let mut post = vec![0usize; n];
    let mut work = vec![0isize; 3 * n];
    postorder_with(parent, &mut post, &mut work)?;
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // every node must come after all of its children
    fn assert_is_postorder(parent: &[isize], post: &[usize]) {
        let n = parent.len();
        let mut position = vec![usize::MAX; n];
        for (k, &j) in post.iter().enumerate() {
            assert_eq!(position[j], usize::MAX, "node {j} emitted twice");
            position[j] = k;
        }
        for j in 0..n {
            if parent[j] != EMPTY {
                assert!(position[j] < position[parent[j] as usize]);
            }
        }
    }

    #[rstest]
    #[case(vec![2, 2, 4, 4, -1], vec![0, 1, 2, 3, 4])]
    #[case(vec![-1, 0, -1, 2, 1], vec![4, 1, 0, 3, 2])]
    #[case(vec![-1, -1, -1], vec![0, 1, 2])]
    #[case(vec![5, 2, 7, 5, 7, 6, 8, 9, 9, -1], vec![1, 2, 4, 7, 0, 3, 5, 6, 8, 9])]
    fn orders_children_before_parents(#[case] parent: Vec<isize>, #[case] expected: Vec<usize>) {
        let post = postorder(&parent).unwrap();
        assert_is_postorder(&parent, &post);
        assert_eq!(post, expected);
    }

    #[test]
    fn empty_forest() {
        assert_eq!(postorder(&[]).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn deep_path_does_not_recurse() {
        // 0 <- 1 <- 2 <- ... a single chain rooted at 0
        let n = 1_000_000;
        let parent: Vec<isize> = (0..n).map(|j| j as isize - 1).collect();
        let post = postorder(&parent).unwrap();
        assert_eq!(post[0], n - 1);
        assert_eq!(post[n - 1], 0);
    }

    #[test]
    fn cycle_is_reported() {
        assert!(matches!(
            postorder(&[1, 0, -1]),
            Err(KernelError::InvalidForest { ordered: 1, n: 3 })
        ));
        assert!(matches!(postorder(&[0]), Err(KernelError::InvalidForest { .. })));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            postorder(&[3, -1, 0]),
            Err(KernelError::InvalidIndex { row: 0, col: 3 })
        ));
        assert!(postorder(&[-2]).is_err());
        let mut post = vec![0usize; 2];
        let mut work = vec![0isize; 5];
        assert!(matches!(
            postorder_with(&[-1, 0], &mut post, &mut work),
            Err(KernelError::WorkspaceTooSmall { name: "work", .. })
        ));
    }
}
