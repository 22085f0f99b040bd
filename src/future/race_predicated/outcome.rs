use core::future::{Future, IntoFuture};
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::TryFuture;
use pin_project::pin_project;

/// The settlement of a single task, tagged with the position the task held in
/// the race when it settled.
///
/// An `Outcome` is what the predicate inspects: exactly one of
/// [`value`][Outcome::value] and [`error`][Outcome::error] is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Outcome<T, E> {
    index: usize,
    result: Result<T, E>,
}

impl<T, E> Outcome<T, E> {
    /// Create a new outcome for the task at `index`.
    pub fn new(result: Result<T, E>, index: usize) -> Self {
        Self { index, result }
    }

    /// The position of the task in the set of remaining tasks at the start of
    /// the round in which it settled.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` if the task succeeded.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns `true` if the task failed.
    pub fn is_err(&self) -> bool {
        self.result.is_err()
    }

    /// The value the task succeeded with, if any.
    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    /// The error the task failed with, if any.
    pub fn error(&self) -> Option<&E> {
        self.result.as_ref().err()
    }

    /// Borrow the settlement as a `Result`.
    pub fn as_result(&self) -> Result<&T, &E> {
        self.result.as_ref()
    }

    /// Take the settlement out of the outcome.
    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.result
    }
}

/// Poll a task once, turning its settlement into an [`Outcome`].
pub(crate) fn poll_outcome<Fut>(
    fut: Pin<&mut Fut>,
    index: usize,
    cx: &mut Context<'_>,
) -> Poll<Outcome<Fut::Ok, Fut::Error>>
where
    Fut: TryFuture,
{
    fut.try_poll(cx).map(|result| Outcome::new(result, index))
}

/// A future which never fails: it resolves to the [`Outcome`] of the task it
/// wraps, whether that task succeeded or not.
///
/// This `struct` is created by the [`normalize`] function. See its
/// documentation for more.
#[derive(Debug)]
#[pin_project]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Normalize<Fut> {
    #[pin]
    fut: Fut,
    index: usize,
}

impl<Fut> Future for Normalize<Fut>
where
    Fut: TryFuture,
{
    type Output = Outcome<Fut::Ok, Fut::Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        poll_outcome(this.fut, *this.index, cx)
    }
}

/// Wrap a fallible task so it always resolves to an [`Outcome`] tagged with
/// `index`.
///
/// # Examples
///
/// ```
/// use race_predicated::future::normalize;
/// use std::future;
///
/// # futures_lite::future::block_on(async {
/// let outcome = normalize(future::ready(Err::<u8, _>("oh no")), 3).await;
/// assert!(outcome.is_err());
/// assert_eq!(outcome.error(), Some(&"oh no"));
/// assert_eq!(outcome.index(), 3);
/// # });
/// ```
pub fn normalize<Fut, T, E>(fut: Fut, index: usize) -> Normalize<Fut::IntoFuture>
where
    Fut: IntoFuture<Output = Result<T, E>>,
{
    Normalize {
        fut: fut.into_future(),
        index,
    }
}
