// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Permutation utilities for exhaustive testing.

/// Heap's algorithm over the first `k` entries of `indices`.
fn heap_permute<F>(indices: &mut [usize], k: usize, visit: &mut F)
where
    F: FnMut(&[usize]),
{
    if k <= 1 {
        visit(indices);
        return;
    }

    for i in 0..k - 1 {
        heap_permute(indices, k - 1, visit);

        let j = if k % 2 == 0 { i } else { 0 };
        indices.swap(j, k - 1);
    }

    heap_permute(indices, k - 1, visit);
}

/// Calls `visit` once for every permutation of `[0, 1, ..., len - 1]`.
///
/// `len == 0` visits nothing.
///
/// # Example
/// ```
/// use rampart_test_utils::index_permutations;
///
/// let mut count = 0;
/// index_permutations(4, |_perm| count += 1);
/// assert_eq!(count, 24);
/// ```
pub fn index_permutations<F>(len: usize, mut visit: F)
where
    F: FnMut(&[usize]),
{
    if len == 0 {
        return;
    }

    let mut indices: Vec<usize> = (0..len).collect();
    heap_permute(&mut indices, len, &mut visit);
}

/// Reorders `items` in place so that position `i` ends up holding the element that was at
/// `perm[i]`.
///
/// # Example
/// ```
/// use rampart_test_utils::apply_permutation;
///
/// let mut items = ['a', 'b', 'c', 'd'];
/// apply_permutation(&mut items, &[2, 0, 3, 1]);
/// assert_eq!(items, ['c', 'a', 'd', 'b']);
/// ```
pub fn apply_permutation<T>(items: &mut [T], perm: &[usize]) {
    assert_eq!(
        items.len(),
        perm.len(),
        "apply_permutation: permutation length mismatch"
    );

    let mut placed = vec![false; items.len()];

    for start in 0..items.len() {
        if placed[start] {
            continue;
        }

        // Walk the cycle starting at `start`, pulling each source into place.
        let mut dst = start;
        loop {
            placed[dst] = true;
            let src = perm[dst];

            if src == start {
                break;
            }

            items.swap(dst, src);
            dst = src;
        }
    }
}
