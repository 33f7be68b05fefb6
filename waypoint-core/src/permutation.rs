//! Lazy, restartable permutation stream.
//!
//! Permutations are produced one at a time in lexicographic order of the input
//! positions, so only the current arrangement is ever held in memory.

use std::iter::FusedIterator;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Cursor {
    Fresh,
    Running,
    Done,
}

/// Iterator over every ordering of a list of items.
///
/// Items are permuted by position, so equal items are still treated as
/// distinct. An empty input yields exactly one empty permutation.
///
/// # Examples
/// ```
/// use waypoint_core::Permutations;
///
/// let orders: Vec<Vec<char>> = Permutations::new(vec!['a', 'b', 'c']).collect();
/// assert_eq!(orders.len(), 6);
/// assert_eq!(orders[0], ['a', 'b', 'c']);
/// assert_eq!(orders[1], ['a', 'c', 'b']);
/// assert_eq!(orders[5], ['c', 'b', 'a']);
/// ```
#[derive(Clone, Debug)]
pub struct Permutations<T> {
    items: Vec<T>,
    indices: Vec<usize>,
    cursor: Cursor,
}

impl<T: Clone> Permutations<T> {
    /// Creates a stream over the orderings of `items`.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        let indices = (0..items.len()).collect();
        Self {
            items,
            indices,
            cursor: Cursor::Fresh,
        }
    }

    /// Rewinds the stream to the first permutation.
    pub fn restart(&mut self) {
        self.indices.sort_unstable();
        self.cursor = Cursor::Fresh;
    }

    /// Returns the total number of permutations, or `None` if `n!` overflows
    /// `usize`.
    #[must_use]
    pub fn total(&self) -> Option<usize> {
        factorial(self.items.len())
    }

    fn current(&self) -> Vec<T> {
        self.indices
            .iter()
            .filter_map(|&idx| self.items.get(idx))
            .cloned()
            .collect()
    }
}

/// Returns `n!`, or `None` when it overflows `usize`.
pub(crate) fn factorial(n: usize) -> Option<usize> {
    (1..=n).try_fold(1_usize, usize::checked_mul)
}

/// Rearranges `indices` into the next lexicographic permutation, returning
/// `false` once the last permutation has been reached.
fn advance(indices: &mut [usize]) -> bool {
    let Some(pivot) = indices.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        return false;
    };
    let pivot_value = indices[pivot];
    let Some(successor) = indices.iter().rposition(|&value| value > pivot_value) else {
        return false;
    };
    indices.swap(pivot, successor);
    indices[pivot + 1..].reverse();
    true
}

impl<T: Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.cursor {
            Cursor::Fresh => self.cursor = Cursor::Running,
            Cursor::Running => {
                if !advance(&mut self.indices) {
                    self.cursor = Cursor::Done;
                    return None;
                }
            }
            Cursor::Done => return None,
        }
        Some(self.current())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor {
            Cursor::Done => (0, Some(0)),
            Cursor::Fresh => (1, self.total()),
            Cursor::Running => (0, self.total()),
        }
    }
}

impl<T: Clone> FusedIterator for Permutations<T> {}
