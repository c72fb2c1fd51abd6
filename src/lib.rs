//! Bounded-retry TCP reachability probe.
//!
//! [`ConnectionProbe`] repeatedly opens and closes a TCP connection to one
//! endpoint until it succeeds or the attempt budget runs out, which is handy
//! for waiting on a freshly started service.

pub mod config;
pub mod logger;
pub mod prober;
pub mod util;

pub use logger::{ProbeLogger, TracingLogger};
pub use prober::{is_transient, ConnectionProbe, Connector, RetryPolicy, TcpConnector};
