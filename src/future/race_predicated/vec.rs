use super::outcome::poll_outcome;
use super::{Delivery, NoMatch, Outcome, Predicate, RacePredicated as RacePredicatedTrait};
use crate::utils::WakerVec;

use core::fmt;
use core::future::{Future, IntoFuture};
use core::mem;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::boxed::Box;
use std::vec::Vec;

use futures_core::future::FusedFuture;
use futures_core::TryFuture;
use futures_lite::ready;
use pin_project::pin_project;

/// A future which races its tasks until the predicate accepts an outcome.
///
/// This `struct` is created by the [`race_predicated`] family of methods on
/// the [`RacePredicated`] trait. See its documentation for more.
///
/// [`race_predicated`]: crate::future::RacePredicated::race_predicated
/// [`RacePredicated`]: crate::future::RacePredicated
#[must_use = "futures do nothing unless you `.await` or poll them"]
#[pin_project]
pub struct RacePredicated<Fut, P, M>
where
    Fut: TryFuture,
    P: Predicate<Fut>,
{
    tasks: Vec<Pin<Box<Fut>>>,
    wakers: WakerVec,
    predicate: P,
    candidate: Option<Outcome<Fut::Ok, Fut::Error>>,
    #[pin]
    verdict: Option<P::Future>,
    rejected: usize,
    done: bool,
    mode: M,
}

impl<Fut, P, M> RacePredicated<Fut, P, M>
where
    Fut: TryFuture,
    P: Predicate<Fut>,
{
    pub(crate) fn new(tasks: Vec<Fut>, predicate: P, mode: M) -> Self {
        let tasks: Vec<_> = tasks.into_iter().map(Box::pin).collect();
        RacePredicated {
            wakers: WakerVec::new(tasks.len()),
            tasks,
            predicate,
            candidate: None,
            verdict: None,
            rejected: 0,
            done: false,
            mode,
        }
    }

    /// The number of tasks which have not settled yet.
    pub fn remaining(&self) -> usize {
        // A candidate awaiting its verdict is still in `tasks`.
        self.tasks.len() - usize::from(self.candidate.is_some())
    }
}

impl<Fut, P, M> fmt::Debug for RacePredicated<Fut, P, M>
where
    Fut: TryFuture,
    P: Predicate<Fut>,
    Fut::Ok: fmt::Debug,
    Fut::Error: fmt::Debug,
    M: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RacePredicated")
            .field("remaining", &self.remaining())
            .field("candidate", &self.candidate)
            .field("rejected", &self.rejected)
            .field("mode", &self.mode)
            .finish()
    }
}

/// Poll the woken tasks in index order until one settles.
///
/// The winner stays in `tasks` so the predicate can find it at the index in
/// its outcome. It must be removed before the next call.
fn poll_winner<Fut>(
    tasks: &mut [Pin<Box<Fut>>],
    wakers: &WakerVec,
    cx: &mut Context<'_>,
) -> Poll<Outcome<Fut::Ok, Fut::Error>>
where
    Fut: TryFuture,
{
    debug_assert_eq!(tasks.len(), wakers.len());
    {
        let mut readiness = wakers.readiness().lock().unwrap();
        readiness.set_waker(cx.waker());
        if !readiness.any_ready() {
            return Poll::Pending;
        }
    }

    for (index, task) in tasks.iter_mut().enumerate() {
        if !wakers.readiness().lock().unwrap().clear_ready(index) {
            continue;
        }

        // The readiness lock is released here: a task may wake itself while
        // being polled.
        let Some(waker) = wakers.get(index) else {
            unreachable!("every task has a waker");
        };
        let mut cx = Context::from_waker(waker);
        if let Poll::Ready(outcome) = poll_outcome(task.as_mut(), index, &mut cx) {
            return Poll::Ready(outcome);
        }
    }
    Poll::Pending
}

impl<Fut, P, M> Future for RacePredicated<Fut, P, M>
where
    Fut: TryFuture,
    P: Predicate<Fut>,
    M: Delivery<Fut, P::Error>,
{
    type Output = M::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        assert!(!*this.done, "Futures must not be polled after completing");

        loop {
            // A round is in progress: wait for its verdict before polling any
            // further tasks.
            if let Some(verdict) = this.verdict.as_mut().as_pin_mut() {
                let verdict = ready!(verdict.poll(cx));
                this.verdict.set(None);
                let Some(outcome) = this.candidate.take() else {
                    unreachable!("a verdict is only pending for a candidate");
                };
                // The settled task leaves the set whatever the verdict.
                drop(this.tasks.remove(outcome.index()));
                this.wakers.remove(outcome.index());

                match verdict {
                    Ok(true) => {
                        tracing::trace!(
                            index = outcome.index(),
                            ok = outcome.is_ok(),
                            remaining = this.tasks.len(),
                            "outcome accepted"
                        );
                        *this.done = true;
                        this.wakers.readiness().lock().unwrap().clear_waker();
                        let remaining = mem::take(this.tasks);
                        return Poll::Ready(M::matched(outcome, remaining));
                    }
                    Ok(false) => {
                        *this.rejected += 1;
                        tracing::trace!(
                            index = outcome.index(),
                            ok = outcome.is_ok(),
                            remaining = this.tasks.len(),
                            "outcome rejected"
                        );
                    }
                    Err(err) => {
                        tracing::trace!(index = outcome.index(), "predicate failed");
                        *this.done = true;
                        this.wakers.readiness().lock().unwrap().clear_waker();
                        return Poll::Ready(M::predicate_failed(err));
                    }
                }
            }

            if this.tasks.is_empty() {
                tracing::trace!(rejected = *this.rejected, "tasks exhausted");
                *this.done = true;
                return Poll::Ready(M::exhausted(NoMatch::new(*this.rejected)));
            }

            let outcome = ready!(poll_winner(this.tasks, this.wakers, cx));
            tracing::trace!(
                index = outcome.index(),
                ok = outcome.is_ok(),
                tasks = this.tasks.len(),
                "task settled"
            );
            let verdict = this.predicate.test(&outcome, this.tasks);
            *this.candidate = Some(outcome);
            this.verdict.set(Some(verdict));
        }
    }
}

impl<Fut, P, M> FusedFuture for RacePredicated<Fut, P, M>
where
    Fut: TryFuture,
    P: Predicate<Fut>,
    M: Delivery<Fut, P::Error>,
{
    fn is_terminated(&self) -> bool {
        self.done
    }
}

impl<Fut, T, E> RacePredicatedTrait for Vec<Fut>
where
    Fut: IntoFuture<Output = Result<T, E>>,
{
    type Task = Fut::IntoFuture;

    fn race_predicated_with<P, M, PE>(
        self,
        predicate: P,
        mode: M,
    ) -> RacePredicated<Self::Task, P, M>
    where
        P: Predicate<Self::Task, Error = PE>,
        M: Delivery<Self::Task, PE>,
    {
        let tasks = self.into_iter().map(IntoFuture::into_future).collect();
        RacePredicated::new(tasks, predicate, mode)
    }
}
