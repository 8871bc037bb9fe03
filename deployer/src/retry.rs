//! Bounded fixed-delay polling

use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Retry options for a bounded poll
#[derive(Debug, Clone)]
pub struct RetryOptions {
    /// Maximum number of attempts
    pub max_attempts: u32,

    /// Delay between attempts
    pub delay: Duration,
}

/// Poll `attempt` until it yields a value or `max_attempts` runs out.
///
/// Each attempt returns `Ok(Some(value))` to finish, `Ok(None)` to retry
/// after `delay`, or `Err` to abort immediately. Exhausting the attempts
/// returns `Ok(None)`; the delay is only awaited between attempts, never
/// after the last one. The sleep is injected so tests can run with a
/// recording no-op.
pub async fn poll_until<T, E, Op, Fut, S, SFut>(
    options: &RetryOptions,
    sleep_fn: S,
    mut attempt: Op,
) -> Result<Option<T>, E>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
    S: Fn(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    for round in 0..options.max_attempts {
        if let Some(value) = attempt().await? {
            return Ok(Some(value));
        }
        if round + 1 < options.max_attempts {
            debug!("Retrying in {:?}...", options.delay);
            sleep_fn(options.delay).await;
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tokio_test::block_on;

    fn options(max_attempts: u32) -> RetryOptions {
        RetryOptions {
            max_attempts,
            delay: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_first_attempt_success_skips_sleep() {
        let sleeps = RefCell::new(Vec::new());

        let result: Result<Option<u32>, ()> = block_on(poll_until(
            &options(5),
            |d| {
                sleeps.borrow_mut().push(d);
                async {}
            },
            || async { Ok(Some(7)) },
        ));

        assert_eq!(result, Ok(Some(7)));
        assert!(sleeps.borrow().is_empty());
    }

    #[test]
    fn test_succeeds_on_later_attempt() {
        let sleeps = RefCell::new(Vec::new());
        let calls = RefCell::new(0u32);

        let result: Result<Option<u32>, ()> = block_on(poll_until(
            &options(5),
            |d| {
                sleeps.borrow_mut().push(d);
                async {}
            },
            || {
                *calls.borrow_mut() += 1;
                let n = *calls.borrow();
                async move { Ok(if n >= 3 { Some(n) } else { None }) }
            },
        ));

        assert_eq!(result, Ok(Some(3)));
        assert_eq!(*calls.borrow(), 3);
        assert_eq!(
            *sleeps.borrow(),
            vec![Duration::from_millis(1500), Duration::from_millis(1500)]
        );
    }

    #[test]
    fn test_exhaustion_returns_none() {
        let sleeps = RefCell::new(Vec::new());
        let calls = RefCell::new(0u32);

        let result: Result<Option<u32>, ()> = block_on(poll_until(
            &options(5),
            |d| {
                sleeps.borrow_mut().push(d);
                async {}
            },
            || {
                *calls.borrow_mut() += 1;
                async { Ok(None) }
            },
        ));

        assert_eq!(result, Ok(None));
        // 5 attempts, sleeps only between them
        assert_eq!(*calls.borrow(), 5);
        assert_eq!(sleeps.borrow().len(), 4);
    }

    #[test]
    fn test_error_aborts_immediately() {
        let calls = RefCell::new(0u32);

        let result: Result<Option<u32>, &str> = block_on(poll_until(
            &options(5),
            |_| async {},
            || {
                *calls.borrow_mut() += 1;
                async { Err("boom") }
            },
        ));

        assert_eq!(result, Err("boom"));
        assert_eq!(*calls.borrow(), 1);
    }
}
