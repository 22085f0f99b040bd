//! Racing fallible futures against a predicate.
//!
//! # Examples
//!
//! ```
//! use race_predicated::prelude::*;
//! use futures_lite::future::block_on;
//! use std::future;
//!
//! fn main() {
//!     block_on(async {
//!         // Skip the failure, take the first success.
//!         let a = future::ready(Err("a is down"));
//!         let b = future::ready(Ok(2));
//!         let res = vec![a, b].race_predicated(|outcome, _| outcome.is_ok()).await;
//!         assert_eq!(res, Ok(2));
//!
//!         // Arrays work too.
//!         let a = future::ready(Ok::<_, ()>(1));
//!         let b = future::ready(Ok(2));
//!         let res = [a, b].race_predicated(|outcome, _| outcome.value() == Some(&2)).await;
//!         assert_eq!(res, Ok(2));
//!     })
//! }
//! ```
//!
//! # Delivery modes
//!
//! The same race can report how it ended in two ways. [`Plain`] mirrors the
//! accepted future: it resolves to that future's value, or to an [`Error`].
//! [`Full`] resolves to a [`Resolution`] instead, so task failures and
//! exhaustion are data rather than errors:
//!
//! | Condition                    | [`Plain`]                | [`Full`]                                |
//! | ---                          | ---                      | ---                                     |
//! | Accepted future succeeded    | `Ok(value)`              | `Ok(Resolution::Matched(_))`            |
//! | Accepted future failed       | `Err(Error::Task(_))`    | `Ok(Resolution::Matched(_))`            |
//! | Nothing accepted             | `Err(Error::NoMatch(_))` | `Ok(Resolution::Exhausted(_))`          |
//! | Predicate failed             | `Err(Error::Predicate(_))` | `Err(_)`                              |
//!
//! ## Ordering
//!
//! The predicate sees outcomes in the order in which the futures settle, one
//! round at a time: no future is polled while the predicate is being awaited.
//! When several futures are ready during the same poll, the one with the
//! lowest index is observed first. Indices refer to the position among the
//! futures that were still pending when the round started.
pub use self::race_predicated::deferred::{
    race_predicated, race_predicated_full, race_predicated_with, Deferred,
};
pub use self::race_predicated::{
    normalize, Delivery, Error, Full, Match, NoMatch, Normalize, Outcome, Plain, RacePredicated,
    Resolution,
};

pub(crate) mod race_predicated;
