//! Acceptance tests applied to the tasks of a race as they settle.
//!
//! A predicate is called with the [`Outcome`] of the task which settled and
//! with the tasks of the current round. `tasks[outcome.index()]` is the settled
//! task itself; it leaves the race once the predicate has decided.
//!
//! Closures `FnMut(&Outcome<T, E>, &[Pin<Box<Fut>>]) -> bool` are accepted
//! directly by [`race_predicated`] and [`race_predicated_full`], which wrap
//! them with [`from_fn`]. Predicates which can fail or which need to await
//! something are built with [`try_from_fn`] and [`from_async_fn`].
//!
//! [`race_predicated`]: crate::future::RacePredicated::race_predicated
//! [`race_predicated_full`]: crate::future::RacePredicated::race_predicated_full

use core::convert::Infallible;
use core::fmt;
use core::future::{self, Future, IntoFuture, Ready};
use core::marker::PhantomData;
use core::pin::Pin;

use futures_core::TryFuture;

use super::Outcome;

/// Decides whether the outcome of a settled task ends the race.
pub trait Predicate<Fut>
where
    Fut: TryFuture,
{
    /// The error the predicate itself can fail with.
    type Error;

    /// The future which resolves to the verdict.
    type Future: Future<Output = Result<bool, Self::Error>>;

    /// Start testing `outcome`.
    ///
    /// `tasks` holds every task of the current round, in order, so
    /// `tasks[outcome.index()]` is the task which settled. No task is polled
    /// until the returned future resolves.
    fn test(
        &mut self,
        outcome: &Outcome<Fut::Ok, Fut::Error>,
        tasks: &[Pin<Box<Fut>>],
    ) -> Self::Future;
}

/// A synchronous predicate which cannot fail.
///
/// This `struct` is created by [`from_fn`].
pub struct FromFn<F, Fut> {
    f: F,
    _task: PhantomData<fn(&Fut)>,
}

impl<F, Fut> fmt::Debug for FromFn<F, Fut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

/// Build a predicate from a closure returning `bool`.
///
/// # Examples
///
/// ```
/// use race_predicated::prelude::*;
/// use race_predicated::{predicate, Outcome, Plain};
/// use std::future;
///
/// # futures_lite::future::block_on(async {
/// let tasks = vec![future::ready(Ok::<u8, ()>(1)), future::ready(Ok(2))];
/// let is_two = predicate::from_fn(|outcome: &Outcome<u8, ()>, _: &[_]| {
///     outcome.value() == Some(&2)
/// });
/// let res = tasks.race_predicated_with(is_two, Plain).await;
/// assert_eq!(res, Ok(2));
/// # });
/// ```
pub fn from_fn<F, Fut>(f: F) -> FromFn<F, Fut>
where
    Fut: TryFuture,
    F: FnMut(&Outcome<Fut::Ok, Fut::Error>, &[Pin<Box<Fut>>]) -> bool,
{
    FromFn {
        f,
        _task: PhantomData,
    }
}

impl<F, Fut> Predicate<Fut> for FromFn<F, Fut>
where
    Fut: TryFuture,
    F: FnMut(&Outcome<Fut::Ok, Fut::Error>, &[Pin<Box<Fut>>]) -> bool,
{
    type Error = Infallible;
    type Future = Ready<Result<bool, Infallible>>;

    fn test(
        &mut self,
        outcome: &Outcome<Fut::Ok, Fut::Error>,
        tasks: &[Pin<Box<Fut>>],
    ) -> Self::Future {
        future::ready(Ok((self.f)(outcome, tasks)))
    }
}

/// A synchronous predicate which can fail.
///
/// This `struct` is created by [`try_from_fn`].
pub struct TryFromFn<F, Fut> {
    f: F,
    _task: PhantomData<fn(&Fut)>,
}

impl<F, Fut> fmt::Debug for TryFromFn<F, Fut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFromFn").finish_non_exhaustive()
    }
}

/// Build a predicate from a closure returning `Result<bool, PE>`.
///
/// An `Err` ends the race immediately with that error.
///
/// # Examples
///
/// ```
/// use race_predicated::prelude::*;
/// use race_predicated::{predicate, Error, Outcome, Plain};
/// use std::future;
///
/// # futures_lite::future::block_on(async {
/// let tasks = vec![future::ready(Ok::<u8, ()>(1))];
/// let reject_all = predicate::try_from_fn(|_: &Outcome<u8, ()>, _: &[_]| Err("bad input"));
/// let res = tasks.race_predicated_with(reject_all, Plain).await;
/// assert_eq!(res, Err(Error::Predicate("bad input")));
/// # });
/// ```
pub fn try_from_fn<F, Fut, PE>(f: F) -> TryFromFn<F, Fut>
where
    Fut: TryFuture,
    F: FnMut(&Outcome<Fut::Ok, Fut::Error>, &[Pin<Box<Fut>>]) -> Result<bool, PE>,
{
    TryFromFn {
        f,
        _task: PhantomData,
    }
}

impl<F, Fut, PE> Predicate<Fut> for TryFromFn<F, Fut>
where
    Fut: TryFuture,
    F: FnMut(&Outcome<Fut::Ok, Fut::Error>, &[Pin<Box<Fut>>]) -> Result<bool, PE>,
{
    type Error = PE;
    type Future = Ready<Result<bool, PE>>;

    fn test(
        &mut self,
        outcome: &Outcome<Fut::Ok, Fut::Error>,
        tasks: &[Pin<Box<Fut>>],
    ) -> Self::Future {
        future::ready((self.f)(outcome, tasks))
    }
}

/// An asynchronous predicate.
///
/// This `struct` is created by [`from_async_fn`].
pub struct FromAsyncFn<F, Fut> {
    f: F,
    _task: PhantomData<fn(&Fut)>,
}

impl<F, Fut> fmt::Debug for FromAsyncFn<F, Fut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromAsyncFn").finish_non_exhaustive()
    }
}

/// Build a predicate from a closure returning a future of `Result<bool, PE>`.
///
/// The returned future cannot borrow the outcome; copy out whatever it needs.
/// No task is polled while it is pending.
///
/// # Examples
///
/// ```
/// use race_predicated::prelude::*;
/// use race_predicated::{predicate, Outcome, Plain};
/// use std::convert::Infallible;
/// use std::future;
///
/// # futures_lite::future::block_on(async {
/// let tasks = vec![future::ready(Ok::<u8, ()>(1)), future::ready(Ok(2))];
/// let accept_even = predicate::from_async_fn(|outcome: &Outcome<u8, ()>, _: &[_]| {
///     let value = outcome.value().copied();
///     async move { Ok::<_, Infallible>(value.is_some_and(|n| n % 2 == 0)) }
/// });
/// let res = tasks.race_predicated_with(accept_even, Plain).await;
/// assert_eq!(res, Ok(2));
/// # });
/// ```
pub fn from_async_fn<F, Fut, R, PE>(f: F) -> FromAsyncFn<F, Fut>
where
    Fut: TryFuture,
    F: FnMut(&Outcome<Fut::Ok, Fut::Error>, &[Pin<Box<Fut>>]) -> R,
    R: IntoFuture<Output = Result<bool, PE>>,
{
    FromAsyncFn {
        f,
        _task: PhantomData,
    }
}

impl<F, Fut, R, PE> Predicate<Fut> for FromAsyncFn<F, Fut>
where
    Fut: TryFuture,
    F: FnMut(&Outcome<Fut::Ok, Fut::Error>, &[Pin<Box<Fut>>]) -> R,
    R: IntoFuture<Output = Result<bool, PE>>,
{
    type Error = PE;
    type Future = R::IntoFuture;

    fn test(
        &mut self,
        outcome: &Outcome<Fut::Ok, Fut::Error>,
        tasks: &[Pin<Box<Fut>>],
    ) -> Self::Future {
        (self.f)(outcome, tasks).into_future()
    }
}
