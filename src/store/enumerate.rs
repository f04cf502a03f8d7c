//! Single-pass enumeration with in-place deletion.
//!
//! A pass walks the sequence once from index 0 and asks a callback what to do
//! with each element. Elements the callback marks with [`Action::Delete`] are
//! removed by one left-compaction after the walk, so a pass that deletes `k`
//! elements costs O(n) rather than O(n·k).

use super::sequence::Store;
use std::collections::VecDeque;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// What an enumerate callback wants done with the element it was shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Keep the element and move on
    Continue,
    /// Remove the element once the pass is over, then move on
    Delete,
    /// Keep the element and stop the pass
    Finish,
}

impl<T> Store<T> {
    /// Visit elements in index order, optionally deleting some of them
    ///
    /// The callback receives `(index, &element)` and returns an [`Action`].
    /// The return value is the number of elements visited, counting the one
    /// that returned [`Action::Finish`] or failed.
    ///
    /// With `for_update = true` the write lock is held for the whole pass,
    /// including compaction, and `Delete` actions are applied. With
    /// `for_update = false` only the read lock is held and the pass runs
    /// alongside other readers; a `Delete` returned there cannot be applied
    /// and the element is kept.
    ///
    /// If the callback fails, the pass stops and its error is returned
    /// unchanged. Deletions marked before the failing element are still
    /// applied.
    ///
    /// The callback must not touch this store (or a clone of it): the lock is
    /// held while it runs and is not reentrant.
    pub fn enumerate<F, E>(&self, mut f: F, for_update: bool) -> Result<usize, E>
    where
        F: FnMut(usize, &T) -> Result<Action, E>,
    {
        if for_update {
            let mut list = self.data.write();
            enumerate_pass(&mut *list, |idx, elem| f(idx, elem))
        } else {
            let list = self.data.read();
            shared_pass(&*list, f)
        }
    }

    /// Like [`enumerate`](Self::enumerate) with `for_update = true`, but the
    /// callback may modify each element in place
    pub fn enumerate_mut<F, E>(&self, f: F) -> Result<usize, E>
    where
        F: FnMut(usize, &mut T) -> Result<Action, E>,
    {
        let mut list = self.data.write();
        enumerate_pass(&mut *list, f)
    }
}

fn shared_pass<T, F, E>(list: &VecDeque<T>, mut f: F) -> Result<usize, E>
where
    F: FnMut(usize, &T) -> Result<Action, E>,
{
    let mut visited = 0;

    for (idx, elem) in list.iter().enumerate() {
        visited = idx + 1;
        match f(idx, elem)? {
            Action::Continue => {}
            Action::Delete => {
                #[cfg(feature = "tracing")]
                warn!(index = idx, "delete requested in a shared enumerate pass, element kept");
            }
            Action::Finish => break,
        }
    }

    Ok(visited)
}

fn enumerate_pass<T, F, E>(list: &mut VecDeque<T>, mut f: F) -> Result<usize, E>
where
    F: FnMut(usize, &mut T) -> Result<Action, E>,
{
    // Ascending by construction
    let mut marked: Vec<usize> = Vec::new();
    let mut visited = 0;
    let mut outcome = Ok(());

    for (idx, elem) in list.iter_mut().enumerate() {
        visited = idx + 1;
        match f(idx, elem) {
            Ok(Action::Continue) => {}
            Ok(Action::Delete) => marked.push(idx),
            Ok(Action::Finish) => break,
            Err(err) => {
                outcome = Err(err);
                break;
            }
        }
    }

    #[cfg(feature = "tracing")]
    debug!(visited, deleted = marked.len(), "enumerate pass complete");

    compact(list, &marked);
    outcome.map(|()| visited)
}

/// Remove the elements at `marked` (sorted, unique) in one left shift
///
/// Starting at the first marked slot, each surviving element is swapped down
/// into the next free position, then the tail of dead elements is truncated.
/// Survivors keep their relative order and nothing before the first marked
/// index moves.
pub(crate) fn compact<T>(list: &mut VecDeque<T>, marked: &[usize]) {
    let Some(&first) = marked.first() else {
        return;
    };

    let mut pending = marked[1..].iter().peekable();
    let mut dst = first;

    for src in first + 1..list.len() {
        if pending.next_if_eq(&&src).is_some() {
            continue;
        }
        list.swap(dst, src);
        dst += 1;
    }

    list.truncate(dst);
}
