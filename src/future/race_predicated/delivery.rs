use core::pin::Pin;

use futures_core::TryFuture;

use super::{Error, Match, NoMatch, Outcome, Resolution};
use crate::{private_decl, private_impl};

/// Selects how a race reports the way it ended.
///
/// Implemented by [`Plain`] and [`Full`]; it is not meant to be implemented
/// outside this crate.
pub trait Delivery<Fut, PE>
where
    Fut: TryFuture,
{
    private_decl! {}

    /// What the race resolves to.
    type Output;

    /// The predicate accepted `outcome`; `remaining` are the tasks which had
    /// not settled yet.
    fn matched(
        outcome: Outcome<Fut::Ok, Fut::Error>,
        remaining: Vec<Pin<Box<Fut>>>,
    ) -> Self::Output;

    /// Every task settled without a match.
    fn exhausted(err: NoMatch) -> Self::Output;

    /// The predicate failed with `err`.
    fn predicate_failed(err: PE) -> Self::Output;
}

/// Resolve to the accepted task's own `Result`.
///
/// An accepted success resolves to `Ok(value)`; everything else is an
/// [`Error`]: the accepted task's error, [`NoMatch`], or the predicate's error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plain;

impl<Fut, PE> Delivery<Fut, PE> for Plain
where
    Fut: TryFuture,
{
    private_impl! {}

    type Output = Result<Fut::Ok, Error<Fut::Error, PE>>;

    fn matched(
        outcome: Outcome<Fut::Ok, Fut::Error>,
        _remaining: Vec<Pin<Box<Fut>>>,
    ) -> Self::Output {
        outcome.into_result().map_err(Error::Task)
    }

    fn exhausted(err: NoMatch) -> Self::Output {
        Err(Error::NoMatch(err))
    }

    fn predicate_failed(err: PE) -> Self::Output {
        Err(Error::Predicate(err))
    }
}

/// Resolve to a [`Resolution`] describing the race.
///
/// Task errors and exhaustion are reported as data; only a failing predicate
/// resolves to `Err`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Full;

impl<Fut, PE> Delivery<Fut, PE> for Full
where
    Fut: TryFuture,
{
    private_impl! {}

    type Output = Result<Resolution<Fut::Ok, Fut::Error, Fut>, PE>;

    fn matched(
        outcome: Outcome<Fut::Ok, Fut::Error>,
        remaining: Vec<Pin<Box<Fut>>>,
    ) -> Self::Output {
        Ok(Resolution::Matched(Match::new(outcome, remaining)))
    }

    fn exhausted(err: NoMatch) -> Self::Output {
        Ok(Resolution::Exhausted(err))
    }

    fn predicate_failed(err: PE) -> Self::Output {
        Err(err)
    }
}
