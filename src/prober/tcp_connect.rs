use std::future::Future;
use std::io;
use tokio::net::TcpStream;
use tokio::time::{timeout, Duration, Instant};
use tracing::trace;

use super::Connector;

#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    async fn connect(&self, host: &str, port: u16, limit: Duration) -> io::Result<()> {
        let start = Instant::now();
        // name resolution runs inside the timed section as well
        let conn = timed(limit, TcpStream::connect((host, port))).await?;
        drop(conn);
        trace!("tcp connect {}:{} took {:?}", host, port, start.elapsed());
        Ok(())
    }
}

/// Runs `fut` under `limit`, an expired limit surfaces as `ErrorKind::TimedOut`.
pub(crate) async fn timed<T, F>(limit: Duration, fut: F) -> io::Result<T>
where
    F: Future<Output = io::Result<T>>,
{
    match timeout(limit, fut).await {
        Ok(res) => res,
        Err(_) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("timed out after {:?}", limit),
        )),
    }
}
