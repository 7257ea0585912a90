//! Ordered batches and the per-item dispatch contract.
//!
//! A [`Batch`] is an ordered, finite collection of items (images,
//! masks) of arbitrary per-item size. [`Batch::try_map`] applies a
//! single-item transform to every item and reassembles the outputs
//! into one batch, preserving order and length. Which argument is the
//! batch is stated in the types; there is no runtime sniffing of
//! argument lists.
//!
//! Per-item calls are independent: no shared state, no memoization.
//! With the `parallel` feature (default) the map runs on rayon, which
//! changes nothing observable.
//!
//! Transforms that consume several batches at once (destination,
//! source, mask) go through [`zip3_try_map`], which zips elementwise.
//! A batch of length 1 broadcasts its item; any other length mismatch
//! fails before any per-item work starts.
//!
//! # Example
//!
//! ```rust
//! use retex_core::{Batch, Image};
//!
//! let batch = Batch::from_vec(vec![Image::new(4, 4), Image::new(8, 8)]);
//! let out: Result<Batch<u32>, retex_core::Error> = batch.try_map(|img| Ok(img.width()));
//! assert_eq!(out.unwrap().into_inner(), vec![4, 8]);
//! ```

use crate::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Ordered, finite collection of same-role items.
///
/// Constructed by the caller, consumed once by dispatch, and discarded
/// after the output batch is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T> {
    items: Vec<T>,
}

impl<T> Batch<T> {
    /// Creates a batch from a vector of items.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Creates a batch holding a single item.
    pub fn single(item: T) -> Self {
        Self { items: vec![item] }
    }

    /// Returns the number of items in the batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the batch holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterates over the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consumes the batch and returns its items.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    /// Applies a fallible per-item transform, reassembling the outputs
    /// in order.
    ///
    /// Guarantees: the output length equals the input length, and item
    /// `i` of the output is `f(&self[i])`. Fault policy is fail-fast:
    /// the first error aborts the dispatch and no partial batch is
    /// produced. Shared parameters must be validated by the caller
    /// before dispatch so a batch never fails halfway through on an
    /// invalid parameter.
    pub fn try_map<U, E, F>(&self, f: F) -> Result<Batch<U>, E>
    where
        T: Sync,
        U: Send,
        E: Send,
        F: Fn(&T) -> Result<U, E> + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        let items = self
            .items
            .par_iter()
            .map(|item| f(item))
            .collect::<Result<Vec<U>, E>>()?;
        #[cfg(not(feature = "parallel"))]
        let items = self
            .items
            .iter()
            .map(|item| f(item))
            .collect::<Result<Vec<U>, E>>()?;
        Ok(Batch { items })
    }
}

impl<T> From<Vec<T>> for Batch<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for Batch<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Batch<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T> std::ops::Index<usize> for Batch<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

/// Zips three batches elementwise through a fallible per-item
/// transform.
///
/// All three batches must share a length, except that a batch of
/// length 1 broadcasts its single item across the zip. Lengths are
/// validated before any per-item work; a mismatch yields
/// [`Error::BatchLengthMismatch`]. Output order follows the input
/// order and the fault policy is fail-fast, as in [`Batch::try_map`].
pub fn zip3_try_map<A, B, C, U, E, F>(
    a: &Batch<A>,
    b: &Batch<B>,
    c: &Batch<C>,
    f: F,
) -> Result<Batch<U>, E>
where
    A: Sync,
    B: Sync,
    C: Sync,
    U: Send,
    E: Send + From<Error>,
    F: Fn(&A, &B, &C) -> Result<U, E> + Sync + Send,
{
    let len = broadcast_len(&[a.len(), b.len(), c.len()]).map_err(E::from)?;
    let pick = |n: usize, i: usize| if n == 1 { 0 } else { i };

    #[cfg(feature = "parallel")]
    let items = (0..len)
        .into_par_iter()
        .map(|i| f(&a[pick(a.len(), i)], &b[pick(b.len(), i)], &c[pick(c.len(), i)]))
        .collect::<Result<Vec<U>, E>>()?;
    #[cfg(not(feature = "parallel"))]
    let items = (0..len)
        .map(|i| f(&a[pick(a.len(), i)], &b[pick(b.len(), i)], &c[pick(c.len(), i)]))
        .collect::<Result<Vec<U>, E>>()?;
    Ok(Batch::from_vec(items))
}

/// Resolves the common length of zipped batches.
///
/// The target is the longest batch; every other batch must match it or
/// have length 1.
fn broadcast_len(lens: &[usize]) -> Result<usize, Error> {
    let target = lens.iter().copied().max().unwrap_or(0);
    for &len in lens {
        if len != target && len != 1 {
            return Err(Error::BatchLengthMismatch {
                expected: target,
                got: len,
            });
        }
    }
    Ok(target)
}
