use std::future::Future;
use std::io;
use std::time::Duration;

use crate::logger::ProbeLogger;

pub mod tcp_connect;

pub use tcp_connect::TcpConnector;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(200);

/// One connect-and-close; the connection is closed by the time the future resolves.
pub trait Connector {
    fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> impl Future<Output = io::Result<()>> + Send;
}

impl<C: Connector + ?Sized> Connector for &C {
    fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> impl Future<Output = io::Result<()>> + Send {
        (**self).connect(host, port, timeout)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

pub fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::ConnectionRefused | io::ErrorKind::HostUnreachable
    )
}

/// Waits for a TCP endpoint to accept connections.
///
/// No cancellation hook: dropping the future is the only way to stop early.
pub struct ConnectionProbe<L, C = TcpConnector> {
    host: String,
    port: u16,
    logger: L,
    connector: C,
    policy: RetryPolicy,
}

impl<L: ProbeLogger> ConnectionProbe<L> {
    pub fn new(host: impl Into<String>, port: u16, logger: L) -> Self {
        Self {
            host: host.into(),
            port,
            logger,
            connector: TcpConnector,
            policy: RetryPolicy::default(),
        }
    }
}

impl<L, C> ConnectionProbe<L, C> {
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_connector<C2: Connector>(self, connector: C2) -> ConnectionProbe<L, C2> {
        ConnectionProbe {
            host: self.host,
            port: self.port,
            logger: self.logger,
            connector,
            policy: self.policy,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl<L: ProbeLogger, C: Connector> ConnectionProbe<L, C> {
    pub async fn try_connect(&self) -> io::Result<()> {
        self.try_connect_with(self.policy.max_attempts).await
    }

    /// Timeouts, refusals and unreachable hosts are retried until the budget
    /// runs out; anything else is returned on first occurrence.
    pub async fn try_connect_with(&self, max_attempts: u32) -> io::Result<()> {
        if max_attempts == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "max_attempts must be at least 1",
            ));
        }

        let mut remaining = max_attempts;
        loop {
            remaining -= 1;
            let attempt = max_attempts - remaining;

            let err = match self
                .connector
                .connect(&self.host, self.port, self.policy.attempt_timeout)
                .await
            {
                Ok(()) => return Ok(()),
                Err(err) => err,
            };

            if !is_transient(&err) {
                self.logger.log(&format!(
                    "connecting to {}:{} failed on attempt {}/{}: {}",
                    self.host, self.port, attempt, max_attempts, err
                ));
                return Err(err);
            }

            if remaining == 0 {
                self.logger.log(&format!(
                    "giving up on {}:{} after {} attempts: {}",
                    self.host, self.port, max_attempts, err
                ));
                return Err(err);
            }

            self.logger.log(&format!(
                "{}:{} not reachable yet (attempt {}/{}): {}",
                self.host, self.port, attempt, max_attempts, err
            ));
            tokio::time::sleep(self.policy.retry_delay).await;
        }
    }

    /// Runs [`try_connect_with`](Self::try_connect_with) on a private
    /// current-thread runtime. Errors out inside an existing runtime.
    pub fn try_connect_blocking(&self, max_attempts: u32) -> io::Result<()> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(io::Error::other(
                "try_connect_blocking called from within a tokio runtime",
            ));
        }
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?
            .block_on(self.try_connect_with(max_attempts))
    }
}
