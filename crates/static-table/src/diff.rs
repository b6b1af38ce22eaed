//! Ordered diffing by identity.
//!
//! The visibility projector never patches its derived collections; it
//! recomputes them from the source of truth and asks this module what
//! changed. A [`Diff`] is the minimal edit script between two orderings of
//! identity keys, classified purely as removals and insertions - an item
//! that moved is a removal at its old position plus an insertion at its
//! new one, never an in-place "update".
//!
//! Keys are compared by identity (arena keys), not by value, so two rows
//! with identical content are still distinct entries.

/// A removal of `key` at `index` in the *old* ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal<K> {
    /// Position in the old ordering.
    pub index: usize,
    /// The identity that was removed.
    pub key: K,
}

/// An insertion of `key` at `index` in the *new* ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion<K> {
    /// Position in the new ordering.
    pub index: usize,
    /// The identity that was inserted.
    pub key: K,
}

/// A minimal ordered edit script between two key sequences.
///
/// Removals are listed in ascending old-index order and insertions in
/// ascending new-index order. Consumers interpret removal indices against
/// the pre-change state and insertion indices against the post-change
/// state, which is exactly the contract batch updates on list controls
/// use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff<K> {
    /// Entries present in the old ordering but absent (at that position)
    /// from the new one.
    pub removals: Vec<Removal<K>>,
    /// Entries present in the new ordering but absent (at that position)
    /// from the old one.
    pub insertions: Vec<Insertion<K>>,
}

impl<K> Diff<K> {
    /// A diff with no edits.
    pub fn empty() -> Self {
        Self {
            removals: Vec::new(),
            insertions: Vec::new(),
        }
    }

    /// Whether the diff contains no edits.
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.insertions.is_empty()
    }

    /// Total number of edits.
    pub fn len(&self) -> usize {
        self.removals.len() + self.insertions.len()
    }

    /// Map the identity keys, keeping positions.
    pub fn map<L>(self, f: impl Fn(K) -> L) -> Diff<L> {
        Diff {
            removals: self
                .removals
                .into_iter()
                .map(|r| Removal {
                    index: r.index,
                    key: f(r.key),
                })
                .collect(),
            insertions: self
                .insertions
                .into_iter()
                .map(|i| Insertion {
                    index: i.index,
                    key: f(i.key),
                })
                .collect(),
        }
    }
}

/// Compute the minimal ordered diff between `old` and `new` by identity.
///
/// Classic longest-common-subsequence walk: everything outside the LCS is
/// a removal (from `old`) or an insertion (into `new`). O(n*m) time and
/// space, which is the deliberate simplicity/throughput trade-off of the
/// recompute-and-diff design - collections here are tens of entries, not
/// thousands.
pub fn diff_keys<K: Copy + PartialEq>(old: &[K], new: &[K]) -> Diff<K> {
    if old == new {
        return Diff::empty();
    }

    let n = old.len();
    let m = new.len();

    // lcs[i][j] = length of the LCS of old[i..] and new[j..].
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut diff = Diff::empty();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            diff.removals.push(Removal {
                index: i,
                key: old[i],
            });
            i += 1;
        } else {
            diff.insertions.push(Insertion {
                index: j,
                key: new[j],
            });
            j += 1;
        }
    }
    while i < n {
        diff.removals.push(Removal {
            index: i,
            key: old[i],
        });
        i += 1;
    }
    while j < m {
        diff.insertions.push(Insertion {
            index: j,
            key: new[j],
        });
        j += 1;
    }

    diff
}
