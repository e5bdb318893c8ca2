//! The user-facing mapper and reducer contracts.
//!
//! Both traits carry a default no-op [`close`](Mapper::close), so an
//! implementation that only needs the primary operation writes exactly one
//! method. For throwaway logic, [`map_fn`] and [`reduce_fn`] lift a closure
//! into the corresponding trait.
//!
//! Any error returned from `map`, `reduce`, or `close` propagates unmodified
//! and aborts the run; the harness performs no retries and no recovery.

use crate::group::KeyGroup;
use crate::sink::Output;
use anyhow::Result;

/// Per-record transformation, invoked once per input record in input order.
pub trait Mapper {
    /// Transform one record, emitting zero or more records through `output`.
    fn map(&mut self, record: &[String], output: &mut dyn Output) -> Result<()>;

    /// Called exactly once after the final record has been mapped, for
    /// flushing accumulated state. Never called before all `map` calls
    /// complete, and never called at all if the input held zero records.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Per-key-group transformation, invoked once per group in input order.
pub trait Reducer {
    /// Reduce one key group.
    ///
    /// `key` is the group's shared first field; `records` yields every
    /// record of the group, key field included. The iterator is strictly
    /// forward and single-pass: reading past the end fails with
    /// [`GroupExhausted`](crate::GroupExhausted), while stopping early is
    /// legal; the driver skips whatever is left.
    fn reduce(
        &mut self,
        key: &str,
        records: &mut KeyGroup<'_, '_>,
        output: &mut dyn Output,
    ) -> Result<()>;

    /// Called exactly once after the final group, under the same
    /// non-empty-input rule as [`Mapper::close`].
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A [`Mapper`] built from a closure, with the default no-op `close`.
pub struct MapFn<F>(F);

impl<F> Mapper for MapFn<F>
where
    F: FnMut(&[String], &mut dyn Output) -> Result<()>,
{
    fn map(&mut self, record: &[String], output: &mut dyn Output) -> Result<()> {
        (self.0)(record, output)
    }
}

/// Lift a closure into a [`Mapper`].
///
/// ```
/// use localmr::{map_fn, run_map};
///
/// # fn main() -> anyhow::Result<()> {
/// let mut out = Vec::new();
/// run_map("a\tb".as_bytes(), &mut out, map_fn(|record, output| {
///     output.collect(record)
/// }))?;
/// assert_eq!(String::from_utf8(out)?, "a\tb\n");
/// # Ok(())
/// # }
/// ```
pub fn map_fn<F>(f: F) -> MapFn<F>
where
    F: FnMut(&[String], &mut dyn Output) -> Result<()>,
{
    MapFn(f)
}

/// A [`Reducer`] built from a closure, with the default no-op `close`.
pub struct ReduceFn<F>(F);

impl<F> Reducer for ReduceFn<F>
where
    F: FnMut(&str, &mut KeyGroup<'_, '_>, &mut dyn Output) -> Result<()>,
{
    fn reduce(
        &mut self,
        key: &str,
        records: &mut KeyGroup<'_, '_>,
        output: &mut dyn Output,
    ) -> Result<()> {
        (self.0)(key, records, output)
    }
}

/// Lift a closure into a [`Reducer`].
pub fn reduce_fn<F>(f: F) -> ReduceFn<F>
where
    F: FnMut(&str, &mut KeyGroup<'_, '_>, &mut dyn Output) -> Result<()>,
{
    ReduceFn(f)
}
