//! Production Environment implementation using system time.
//!
//! `SystemEnv` is the production implementation of the Environment trait:
//! `std::time::Instant` advances on its own and sleeping is a real tokio
//! timer. Timing is therefore subject to scheduler jitter, which the session
//! timers absorb by re-arming from the instant they fire.

use std::time::Duration;

use hawkins_core::Environment;

/// Production environment using the monotonic system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_env_time_advances() {
        let env = SystemEnv::new();

        let t1 = env.now();
        std::thread::sleep(Duration::from_millis(10));
        let t2 = env.now();

        assert!(t2 > t1, "Time should advance");
    }

    #[tokio::test]
    async fn sleep_until_waits_for_deadline() {
        let env = SystemEnv::new();

        let start = env.now();
        env.sleep_until(start + Duration::from_millis(50)).await;

        assert!(env.now() - start >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn past_deadline_returns_immediately() {
        let env = SystemEnv::new();
        let start = env.now();
        std::thread::sleep(Duration::from_millis(5));

        env.sleep_until(start).await;
    }
}
