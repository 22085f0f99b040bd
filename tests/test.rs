use race_predicated::future::race_predicated;
use race_predicated::prelude::*;
use race_predicated::{predicate, Error, Full, Outcome, Plain, Resolution};

use futures::channel::oneshot;
use futures::future::{BoxFuture, FutureExt};
use std::convert::Infallible;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Task = BoxFuture<'static, Result<u32, io::Error>>;

fn resolve_after(ms: u64, value: u32) -> Task {
    async move {
        tokio::time::sleep(tokio::time::Duration::from_millis(ms)).await;
        Ok(value)
    }
    .boxed()
}

fn reject_after(ms: u64, msg: &'static str) -> Task {
    async move {
        tokio::time::sleep(tokio::time::Duration::from_millis(ms)).await;
        Err(io::Error::other(msg))
    }
    .boxed()
}

#[tokio::test]
async fn skips_failures() {
    let tasks = vec![reject_after(0, "A"), resolve_after(20, 1)];
    let res = tasks.race_predicated(|outcome, _| outcome.is_ok()).await;
    assert_eq!(res.unwrap(), 1);
}

#[tokio::test]
async fn skips_rejected_values() {
    let tasks = vec![resolve_after(0, 1), resolve_after(30, 2)];
    let res = tasks
        .race_predicated(|outcome, _| outcome.value() == Some(&2))
        .await;
    assert_eq!(res.unwrap(), 2);
}

#[tokio::test]
async fn reraises_accepted_error() {
    let tasks = vec![resolve_after(50, 1), reject_after(0, "fast failure")];
    let res = tasks.race_predicated(|_, _| true).await;
    match res {
        Err(Error::Task(err)) => assert_eq!(err.to_string(), "fast failure"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn exhausted_in_both_modes() {
    let res = vec![reject_after(0, "X")]
        .race_predicated(|_, _| false)
        .await;
    assert!(matches!(res, Err(Error::NoMatch(_))));

    let res = vec![reject_after(0, "X")]
        .race_predicated_full(|_, _| false)
        .await;
    assert!(matches!(res, Ok(Resolution::Exhausted(_))));

    let res = vec![resolve_after(0, 1)]
        .race_predicated_full(|_, _| false)
        .await;
    let Ok(Resolution::Exhausted(err)) = res else {
        panic!("expected exhaustion");
    };
    assert_eq!(err.rejected(), 1);
}

#[tokio::test]
async fn full_mode_reports_accepted_error() {
    let tasks = vec![resolve_after(50, 1), reject_after(0, "X"), resolve_after(100, 3)];
    let res = tasks.race_predicated_full(|_, _| true).await;
    let Ok(Resolution::Matched(matched)) = res else {
        panic!("expected a match");
    };
    assert_eq!(matched.outcome().index(), 1);
    assert_eq!(matched.outcome().error().unwrap().to_string(), "X");
    assert_eq!(matched.remaining().len(), 2);
}

#[tokio::test]
async fn every_task_observed_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let tasks: Vec<_> = (0..8)
        .map(|i| match i % 2 {
            0 => resolve_after(i * 5, i as u32),
            _ => reject_after(i * 5, "odd"),
        })
        .collect();

    let counter = calls.clone();
    let mut lengths = vec![];
    let res = tasks
        .race_predicated(|_, tasks| {
            counter.fetch_add(1, Ordering::SeqCst);
            lengths.push(tasks.len());
            false
        })
        .await;

    assert!(res.unwrap_err().is_no_match());
    assert_eq!(calls.load(Ordering::SeqCst), 8);
    assert_eq!(lengths, vec![8, 7, 6, 5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn predicate_error_short_circuits() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let tasks = vec![resolve_after(0, 1), resolve_after(10, 2), resolve_after(20, 3)];
    let failing = predicate::try_from_fn(move |_: &Outcome<u32, io::Error>, _: &[_]| {
        counter.fetch_add(1, Ordering::SeqCst);
        Err("predicate exploded")
    });
    let res = tasks.race_predicated_with(failing, Plain).await;
    assert!(matches!(res, Err(Error::Predicate("predicate exploded"))));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn async_predicate() {
    let tasks = vec![resolve_after(0, 1), resolve_after(10, 2), resolve_after(20, 3)];
    let is_odd_and_slow = predicate::from_async_fn(|outcome: &Outcome<u32, io::Error>, _: &[_]| {
        let value = outcome.value().copied();
        async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
            Ok::<_, Infallible>(value.is_some_and(|n| n > 1 && n % 2 == 1))
        }
    });
    let res = tasks.race_predicated_with(is_odd_and_slow, Full).await;
    let Ok(Resolution::Matched(matched)) = res else {
        panic!("expected a match");
    };
    assert_eq!(matched.into_outcome().into_result().unwrap(), 3);
}

#[async_std::test]
async fn settlement_order_follows_senders() {
    let (tx_a, rx_a) = oneshot::channel::<Result<&str, ()>>();
    let (tx_b, rx_b) = oneshot::channel::<Result<&str, ()>>();
    let (tx_c, rx_c) = oneshot::channel::<Result<&str, ()>>();
    let tasks = vec![rx_a, rx_b, rx_c];

    let driver = async_std::task::spawn(async move {
        use futures_time::task::sleep;
        use futures_time::time::Duration;

        sleep(Duration::from_millis(10)).await;
        tx_c.send(Ok("c")).unwrap();
        sleep(Duration::from_millis(10)).await;
        drop(tx_a);
        sleep(Duration::from_millis(10)).await;
        tx_b.send(Ok("b")).unwrap();
    });

    let mut order = vec![];
    let res = tasks
        .race_predicated(|outcome, _| {
            order.push((outcome.index(), outcome.is_ok()));
            matches!(outcome.value(), Some(Ok("b")))
        })
        .await;
    driver.await;

    assert_eq!(res, Ok(Ok("b")));
    assert_eq!(order, vec![(2, true), (0, false), (0, true)]);
}

#[async_std::test]
async fn deferred_collection() {
    let tasks = async {
        futures_lite::future::yield_now().await;
        vec![
            futures::future::ready(Err::<u8, _>("A")),
            futures::future::ready(Ok(1)),
        ]
    };
    let res = race_predicated(tasks, |outcome, _| outcome.value().is_some()).await;
    assert_eq!(res, Ok(1));
}
