//! Race a set of fallible futures until one outcome satisfies a predicate.
//!
//! [`RacePredicated`][future::RacePredicated] awaits many futures at once.
//! Each time one of them settles, successfully or not, its
//! [`Outcome`] is passed to a predicate. The first outcome the predicate
//! accepts ends the race. Rejected outcomes are discarded and the race goes on
//! with the futures that are still pending, until none are left.
//!
//! # Examples
//!
//! ```rust
//! use race_predicated::prelude::*;
//! use futures_lite::future::block_on;
//! use std::future;
//!
//! block_on(async {
//!     let a = future::ready(Ok::<_, &str>(1));
//!     let b = future::ready(Err("oh no"));
//!     let c = future::ready(Ok(3));
//!     let res = vec![a, b, c]
//!         .race_predicated(|outcome, _| outcome.value().is_some_and(|n| *n > 1))
//!         .await;
//!     assert_eq!(res, Ok(3));
//! })
//! ```
//!
//! # Operations
//!
//! This library provides the following operations on arrays and vecs:
//!
//! - [`future::RacePredicated::race_predicated`]: Resolve to the accepted future's `Result`.
//! - [`future::RacePredicated::race_predicated_full`]: Resolve to a [`Resolution`] describing the race.
//! - [`future::RacePredicated::race_predicated_with`]: Race with a fallible or asynchronous [`predicate`].
//!
//! The free functions in [`future`] do the same for a collection which is
//! itself still being computed.

#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod utils;

#[doc(hidden)]
pub use utils::private;

/// The race-predicated prelude.
pub mod prelude {
    pub use super::future::RacePredicated as _;
}

pub mod future;

/// Acceptance tests for races.
pub mod predicate {
    pub use crate::future::race_predicated::predicate::*;
}

pub use future::{Error, Full, Match, NoMatch, Outcome, Plain, Resolution};

/// Helper functions and types for contiguous growable array type with heap-allocated contents,
/// written `Vec<T>`.
pub mod vec {
    pub use crate::future::race_predicated::vec::RacePredicated;
}
