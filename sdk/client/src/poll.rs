use {
  std::{fmt::Display, future::Future, time::Duration},
  thiserror::Error,
  tracing::debug,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
  #[error("{label} did not succeed after {attempts} attempts")]
  Exhausted { label: String, attempts: u32 },
}

/// Bounded retry loop with a fixed pause between attempts.
///
/// Used wherever the client has to wait for something outside of its
/// control to catch up: a transaction being mined, the indexer picking
/// up an event or a pinned document propagating to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poller {
  pub interval: Duration,
  pub max_attempts: u32,
}

impl Poller {
  pub fn new(interval: Duration, max_attempts: u32) -> Self {
    Self {
      interval,
      max_attempts,
    }
  }

  /// Upper bound on how long a poll may take, ignoring the time spent
  /// inside the probes themselves.
  pub fn timeout(&self) -> Duration {
    self.interval * self.max_attempts.saturating_sub(1)
  }

  /// Repeats `probe` until it yields a value.
  ///
  /// A probe that fails counts as an unsuccessful attempt. Transient
  /// errors from eventually consistent services are expected here and
  /// are only logged at debug level.
  pub async fn until_some<T, E, F, Fut>(
    &self,
    label: &str,
    mut probe: F,
  ) -> Result<T, PollError>
  where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
  {
    self
      .attempt(label, &mut probe)
      .await
      .map(|(value, _)| value)
  }

  /// Repeats `predicate` until it returns true and reports how many
  /// attempts it took.
  pub async fn until<E, F, Fut>(
    &self,
    label: &str,
    mut predicate: F,
  ) -> Result<u32, PollError>
  where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
  {
    let mut probe = || {
      let check = predicate();
      async move { check.await.map(|ready| ready.then_some(())) }
    };
    self
      .attempt(label, &mut probe)
      .await
      .map(|(_, attempts)| attempts)
  }

  async fn attempt<T, E, F, Fut>(
    &self,
    label: &str,
    probe: &mut F,
  ) -> Result<(T, u32), PollError>
  where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
  {
    for attempt in 1..=self.max_attempts {
      match probe().await {
        Ok(Some(value)) => {
          debug!("{label}: ready after {attempt} attempt(s)");
          return Ok((value, attempt));
        }
        Ok(None) => {
          debug!("{label}: not ready ({attempt}/{})", self.max_attempts)
        }
        Err(e) => {
          debug!("{label}: attempt {attempt}/{} failed: {e}", self.max_attempts)
        }
      }

      if attempt < self.max_attempts {
        tokio::time::sleep(self.interval).await;
      }
    }

    Err(PollError::Exhausted {
      label: label.to_owned(),
      attempts: self.max_attempts,
    })
  }
}
