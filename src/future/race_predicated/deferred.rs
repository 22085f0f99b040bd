use super::vec::RacePredicated;
use super::predicate::{self, FromFn};
use super::{Delivery, Full, Outcome, Plain, Predicate};

use core::fmt;
use core::future::{Future, IntoFuture};
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::future::FusedFuture;
use futures_core::TryFuture;
use futures_lite::ready;
use pin_project::pin_project;

/// A future which first resolves the set of tasks, then races them.
///
/// This `struct` is created by [`race_predicated`], [`race_predicated_full`]
/// and [`race_predicated_with`]. See their documentation for more.
#[must_use = "futures do nothing unless you `.await` or poll them"]
#[pin_project]
pub struct Deferred<Tasks, Fut, P, M>
where
    Fut: TryFuture,
    P: Predicate<Fut>,
{
    #[pin]
    state: State<Tasks, Fut, P, M>,
}

#[pin_project(project = StateProj)]
enum State<Tasks, Fut, P, M>
where
    Fut: TryFuture,
    P: Predicate<Fut>,
{
    Resolving {
        #[pin]
        tasks: Tasks,
        seed: Option<(P, M)>,
    },
    Racing {
        #[pin]
        race: RacePredicated<Fut, P, M>,
    },
}

impl<Tasks, Fut, P, M> fmt::Debug for Deferred<Tasks, Fut, P, M>
where
    Fut: TryFuture,
    P: Predicate<Fut>,
    Fut::Ok: fmt::Debug,
    Fut::Error: fmt::Debug,
    M: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Resolving { .. } => f.debug_tuple("Deferred").field(&"resolving").finish(),
            State::Racing { race } => f.debug_tuple("Deferred").field(race).finish(),
        }
    }
}

impl<Tasks, Fut, P, M> Future for Deferred<Tasks, Fut, P, M>
where
    Tasks: Future,
    Tasks::Output: IntoIterator,
    <Tasks::Output as IntoIterator>::Item: IntoFuture<IntoFuture = Fut>,
    Fut: TryFuture,
    P: Predicate<Fut>,
    M: Delivery<Fut, P::Error>,
{
    type Output = M::Output;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        loop {
            match self.as_mut().project().state.project() {
                StateProj::Resolving { tasks, seed } => {
                    let tasks = ready!(tasks.poll(cx));
                    let Some((predicate, mode)) = seed.take() else {
                        unreachable!("the tasks resolve only once");
                    };
                    let tasks: Vec<_> = tasks.into_iter().map(IntoFuture::into_future).collect();
                    tracing::trace!(tasks = tasks.len(), "tasks resolved");
                    let race = RacePredicated::new(tasks, predicate, mode);
                    self.as_mut()
                        .project()
                        .state
                        .set(State::Racing { race });
                }
                StateProj::Racing { race } => return race.poll(cx),
            }
        }
    }
}

impl<Tasks, Fut, P, M> FusedFuture for Deferred<Tasks, Fut, P, M>
where
    Tasks: Future,
    Tasks::Output: IntoIterator,
    <Tasks::Output as IntoIterator>::Item: IntoFuture<IntoFuture = Fut>,
    Fut: TryFuture,
    P: Predicate<Fut>,
    M: Delivery<Fut, P::Error>,
{
    fn is_terminated(&self) -> bool {
        match &self.state {
            State::Resolving { .. } => false,
            State::Racing { race } => race.is_terminated(),
        }
    }
}

/// Wait for `tasks` to resolve to a collection of futures, then race them
/// with [`RacePredicated::race_predicated_with`][crate::future::RacePredicated::race_predicated_with].
///
/// # Examples
///
/// ```rust
/// # futures::executor::block_on(async {
/// use race_predicated::future::race_predicated_with;
/// use race_predicated::predicate;
/// use race_predicated::{Error, Outcome, Plain};
/// use std::future;
///
/// let tasks = async { vec![future::ready(Err::<u8, _>("A")), future::ready(Err("B"))] };
/// let always = predicate::try_from_fn(|_: &Outcome<u8, &str>, _: &[_]| Ok::<_, ()>(true));
/// let res = race_predicated_with(tasks, always, Plain).await;
///
/// assert_eq!(res, Err(Error::Task("A")));
/// # });
/// ```
pub fn race_predicated_with<Tasks, Fut, P, M, PE>(
    tasks: Tasks,
    predicate: P,
    mode: M,
) -> Deferred<Tasks::IntoFuture, Fut, P, M>
where
    Tasks: IntoFuture,
    Tasks::Output: IntoIterator,
    <Tasks::Output as IntoIterator>::Item: IntoFuture<IntoFuture = Fut>,
    Fut: TryFuture,
    P: Predicate<Fut, Error = PE>,
    M: Delivery<Fut, PE>,
{
    Deferred {
        state: State::Resolving {
            tasks: tasks.into_future(),
            seed: Some((predicate, mode)),
        },
    }
}

/// Wait for `tasks` to resolve to a collection of futures, then race them
/// with [`RacePredicated::race_predicated`][crate::future::RacePredicated::race_predicated].
///
/// # Examples
///
/// ```rust
/// # futures::executor::block_on(async {
/// use race_predicated::future::race_predicated;
/// use std::future;
///
/// let tasks = async { vec![future::ready(Err("A")), future::ready(Ok(1))] };
/// let res = race_predicated(tasks, |outcome, _| outcome.is_ok()).await;
///
/// assert_eq!(res, Ok(1));
/// # });
/// ```
pub fn race_predicated<Tasks, Fut, F>(
    tasks: Tasks,
    predicate: F,
) -> Deferred<Tasks::IntoFuture, Fut, FromFn<F, Fut>, Plain>
where
    Tasks: IntoFuture,
    Tasks::Output: IntoIterator,
    <Tasks::Output as IntoIterator>::Item: IntoFuture<IntoFuture = Fut>,
    Fut: TryFuture,
    F: FnMut(&Outcome<Fut::Ok, Fut::Error>, &[Pin<Box<Fut>>]) -> bool,
{
    race_predicated_with(tasks, predicate::from_fn(predicate), Plain)
}

/// Wait for `tasks` to resolve to a collection of futures, then race them
/// with [`RacePredicated::race_predicated_full`][crate::future::RacePredicated::race_predicated_full].
pub fn race_predicated_full<Tasks, Fut, F>(
    tasks: Tasks,
    predicate: F,
) -> Deferred<Tasks::IntoFuture, Fut, FromFn<F, Fut>, Full>
where
    Tasks: IntoFuture,
    Tasks::Output: IntoIterator,
    <Tasks::Output as IntoIterator>::Item: IntoFuture<IntoFuture = Fut>,
    Fut: TryFuture,
    F: FnMut(&Outcome<Fut::Ok, Fut::Error>, &[Pin<Box<Fut>>]) -> bool,
{
    race_predicated_with(tasks, predicate::from_fn(predicate), Full)
}
