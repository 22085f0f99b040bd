use core::convert::Infallible;
use core::fmt;
use core::pin::Pin;
use std::error;

use super::Outcome;

/// Every task settled, but the predicate accepted none of the outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoMatch {
    rejected: usize,
}

impl NoMatch {
    pub(crate) fn new(rejected: usize) -> Self {
        Self { rejected }
    }

    /// How many outcomes the predicate saw and rejected before the tasks ran
    /// out.
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

impl fmt::Display for NoMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rejected {
            1 => write!(f, "the only task outcome was rejected by the predicate"),
            n => write!(f, "none of {n} task outcomes matched the predicate"),
        }
    }
}

impl error::Error for NoMatch {}

/// The error returned by a race in [`Plain`][super::Plain] mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<E, PE = Infallible> {
    /// The predicate accepted a task which failed; this is that task's error.
    Task(E),
    /// No outcome was accepted.
    NoMatch(NoMatch),
    /// The predicate itself failed.
    Predicate(PE),
}

impl<E, PE> Error<E, PE> {
    /// Returns `true` if the race ran out of tasks.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Error::NoMatch(_))
    }

    /// The error of the accepted task, if that is what this is.
    pub fn into_task_error(self) -> Option<E> {
        match self {
            Error::Task(err) => Some(err),
            _ => None,
        }
    }
}

impl<E: fmt::Display, PE: fmt::Display> fmt::Display for Error<E, PE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Task(err) => write!(f, "accepted task failed: {err}"),
            Error::NoMatch(err) => fmt::Display::fmt(err, f),
            Error::Predicate(err) => write!(f, "predicate failed: {err}"),
        }
    }
}

impl<E, PE> error::Error for Error<E, PE>
where
    E: error::Error + 'static,
    PE: error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Task(err) => Some(err),
            Error::NoMatch(err) => Some(err),
            Error::Predicate(err) => Some(err),
        }
    }
}

impl<E, PE> From<NoMatch> for Error<E, PE> {
    fn from(err: NoMatch) -> Self {
        Error::NoMatch(err)
    }
}

/// An accepted outcome together with the tasks that were still pending when
/// it was accepted.
pub struct Match<T, E, Fut> {
    outcome: Outcome<T, E>,
    remaining: Vec<Pin<Box<Fut>>>,
}

impl<T, E, Fut> Match<T, E, Fut> {
    pub(crate) fn new(outcome: Outcome<T, E>, remaining: Vec<Pin<Box<Fut>>>) -> Self {
        Self { outcome, remaining }
    }

    /// The accepted outcome.
    pub fn outcome(&self) -> &Outcome<T, E> {
        &self.outcome
    }

    /// The tasks which had not settled yet, in their original relative order.
    ///
    /// They are left untouched: awaiting them resumes where the race left
    /// off, dropping them cancels them.
    pub fn remaining(&self) -> &[Pin<Box<Fut>>] {
        &self.remaining
    }

    /// Split the match into the accepted outcome and the pending tasks.
    pub fn into_parts(self) -> (Outcome<T, E>, Vec<Pin<Box<Fut>>>) {
        (self.outcome, self.remaining)
    }

    /// Discard the pending tasks and keep the accepted outcome.
    pub fn into_outcome(self) -> Outcome<T, E> {
        self.outcome
    }
}

impl<T: fmt::Debug, E: fmt::Debug, Fut> fmt::Debug for Match<T, E, Fut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("outcome", &self.outcome)
            .field("remaining", &self.remaining.len())
            .finish()
    }
}

/// How a race in [`Full`][super::Full] mode ended.
pub enum Resolution<T, E, Fut> {
    /// The predicate accepted an outcome.
    Matched(Match<T, E, Fut>),
    /// Every task settled and no outcome was accepted.
    Exhausted(NoMatch),
}

impl<T, E, Fut> Resolution<T, E, Fut> {
    /// Returns `true` if an outcome was accepted.
    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }

    /// The accepted match, or the reason there is none.
    pub fn into_match(self) -> Result<Match<T, E, Fut>, NoMatch> {
        match self {
            Resolution::Matched(matched) => Ok(matched),
            Resolution::Exhausted(err) => Err(err),
        }
    }

    /// Project the resolution onto the [`Plain`][super::Plain] convention.
    pub fn into_result<PE>(self) -> Result<T, Error<E, PE>> {
        match self {
            Resolution::Matched(matched) => {
                matched.into_outcome().into_result().map_err(Error::Task)
            }
            Resolution::Exhausted(err) => Err(Error::NoMatch(err)),
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug, Fut> fmt::Debug for Resolution<T, E, Fut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Matched(matched) => f.debug_tuple("Matched").field(matched).finish(),
            Resolution::Exhausted(err) => f.debug_tuple("Exhausted").field(err).finish(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::future::Ready;
    use std::io;

    #[test]
    fn no_match_display() {
        assert_eq!(
            NoMatch::new(1).to_string(),
            "the only task outcome was rejected by the predicate"
        );
        assert_eq!(
            NoMatch::new(3).to_string(),
            "none of 3 task outcomes matched the predicate"
        );
    }

    #[test]
    fn error_source() {
        use std::error::Error as _;

        let err: Error<io::Error, io::Error> = Error::Task(io::Error::other("oh no"));
        assert_eq!(err.to_string(), "accepted task failed: oh no");
        assert_eq!(err.source().unwrap().to_string(), "oh no");

        let err: Error<io::Error, io::Error> = NoMatch::new(0).into();
        assert!(err.is_no_match());
        assert!(err.into_task_error().is_none());
    }

    #[test]
    fn resolution_into_result() {
        let matched: Resolution<u8, &str, Ready<Result<u8, &str>>> =
            Resolution::Matched(Match::new(Outcome::new(Err("x"), 0), vec![]));
        assert!(matched.is_match());
        assert_eq!(matched.into_result::<Infallible>(), Err(Error::Task("x")));

        let exhausted: Resolution<u8, &str, Ready<Result<u8, &str>>> =
            Resolution::Exhausted(NoMatch::new(2));
        assert_eq!(exhausted.into_match().unwrap_err().rejected(), 2);
    }
}
