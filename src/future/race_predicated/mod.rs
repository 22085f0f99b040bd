use core::pin::Pin;

use futures_core::TryFuture;

pub(crate) mod array;
pub(crate) mod deferred;
mod delivery;
mod error;
mod outcome;
pub mod predicate;
pub(crate) mod vec;

pub use delivery::{Delivery, Full, Plain};
pub use error::{Error, Match, NoMatch, Resolution};
pub use outcome::{normalize, Normalize, Outcome};
pub use predicate::{FromFn, Predicate};

/// Race fallible futures until one outcome satisfies a predicate.
///
/// Awaits multiple futures simultaneously. Every time one of them settles,
/// its [`Outcome`] is handed to the predicate. An accepted outcome ends the
/// race; a rejected one is discarded and the race continues with the futures
/// which have not settled yet. If every future settles without a match the
/// race ends with [`NoMatch`].
pub trait RacePredicated {
    /// The future each element is converted into.
    type Task: TryFuture;

    /// Race until `predicate` accepts an outcome, then resolve to that
    /// outcome's `Result`.
    ///
    /// Resolves to `Ok(value)` if the accepted future succeeded,
    /// [`Error::Task`] if it failed, and [`Error::NoMatch`] if no outcome was
    /// accepted.
    ///
    /// The predicate is called once per settled future, in the order in which
    /// they settle, with the settled outcome and the futures of that round.
    /// `tasks[outcome.index()]` is the future which settled; it leaves the
    /// race once the predicate has decided. Futures which are ready during the
    /// same poll are observed in index order.
    ///
    /// Futures which have not settled when an outcome is accepted are dropped,
    /// which cancels them. Use
    /// [`race_predicated_full`][RacePredicated::race_predicated_full] and
    /// [`Match::into_parts`] to keep driving them instead.
    ///
    /// # Examples
    ///
    /// Skip failures and values we are not interested in:
    ///
    /// ```rust
    /// # futures::executor::block_on(async {
    /// use race_predicated::prelude::*;
    ///
    /// async fn mirror(id: u8, version: u32) -> Result<u32, String> {
    ///     for _ in 0..id {
    ///         futures_lite::future::yield_now().await;
    ///     }
    ///     match id {
    ///         0 => Err(format!("mirror {id} is down")),
    ///         _ => Ok(version),
    ///     }
    /// }
    ///
    /// let mirrors = vec![mirror(0, 0), mirror(1, 41), mirror(2, 42)];
    /// let version = mirrors
    ///     .race_predicated(|outcome, _| outcome.value().is_some_and(|v| *v >= 42))
    ///     .await;
    ///
    /// assert_eq!(version, Ok(42));
    /// # });
    /// ```
    fn race_predicated<F>(
        self,
        predicate: F,
    ) -> vec::RacePredicated<Self::Task, FromFn<F, Self::Task>, Plain>
    where
        Self: Sized,
        F: FnMut(
            &Outcome<<Self::Task as TryFuture>::Ok, <Self::Task as TryFuture>::Error>,
            &[Pin<Box<Self::Task>>],
        ) -> bool,
    {
        self.race_predicated_with(predicate::from_fn(predicate), Plain)
    }

    /// Race until `predicate` accepts an outcome, then resolve to a
    /// [`Resolution`] describing it.
    ///
    /// Unlike [`race_predicated`][RacePredicated::race_predicated] this never
    /// reports task failures or exhaustion as an error. An accepted outcome is
    /// returned as a [`Match`], which also hands back the futures that had not
    /// settled yet.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # futures::executor::block_on(async {
    /// use race_predicated::prelude::*;
    /// use race_predicated::Resolution;
    /// use std::future;
    ///
    /// let tasks = vec![future::ready(Err::<u8, _>("X"))];
    /// let res = tasks.race_predicated_full(|_, _| false).await;
    ///
    /// assert!(matches!(res, Ok(Resolution::Exhausted(_))));
    /// # });
    /// ```
    fn race_predicated_full<F>(
        self,
        predicate: F,
    ) -> vec::RacePredicated<Self::Task, FromFn<F, Self::Task>, Full>
    where
        Self: Sized,
        F: FnMut(
            &Outcome<<Self::Task as TryFuture>::Ok, <Self::Task as TryFuture>::Error>,
            &[Pin<Box<Self::Task>>],
        ) -> bool,
    {
        self.race_predicated_with(predicate::from_fn(predicate), Full)
    }

    /// Race until `predicate` accepts an outcome, delivering the result the way
    /// `mode` describes.
    ///
    /// Use this with predicates built by the [`predicate`] module, which may
    /// fail or await. A failing predicate ends the race with its error, `PE`.
    fn race_predicated_with<P, M, PE>(
        self,
        predicate: P,
        mode: M,
    ) -> vec::RacePredicated<Self::Task, P, M>
    where
        P: Predicate<Self::Task, Error = PE>,
        M: Delivery<Self::Task, PE>;
}
