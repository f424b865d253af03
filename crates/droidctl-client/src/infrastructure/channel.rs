//! The synchronized control channel.
//!
//! One connection carries every command.  Two locks guard it:
//!
//! - the *exchange* lock owns the read half and is held for a whole locked
//!   send or a whole request/response exchange, which totally orders those
//!   operations and keeps responses from being read by the wrong caller;
//! - the *writer* lock owns the write half and is held only for the duration
//!   of a single message write, so even an unlocked send never lands in the
//!   middle of another message.
//!
//! The exchange lock is always taken before the writer lock.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::infrastructure::config::ChannelConfig;

/// Largest read performed by one drain attempt.
const DRAIN_BUFFER_LEN: usize = 0x10000;

/// Future returned by a response reader passed to
/// [`ControlChannel::request_locked`].
pub type ResponseFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Exclusive owner of the connection to the device.
pub struct ControlChannel<R, W> {
    exchange: Mutex<R>,
    writer: Mutex<W>,
    drain_attempts: u32,
    drain_interval: Duration,
}

impl<S> ControlChannel<ReadHalf<S>, WriteHalf<S>>
where
    S: AsyncRead + AsyncWrite + Send,
{
    /// Splits a bidirectional stream (e.g. a `TcpStream`) into a channel.
    pub fn from_stream(stream: S, config: &ChannelConfig) -> Self {
        let (reader, writer) = tokio::io::split(stream);
        Self::new(reader, writer, config)
    }
}

impl<R, W> ControlChannel<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Creates a channel over already separated read and write halves.
    pub fn new(reader: R, writer: W, config: &ChannelConfig) -> Self {
        Self {
            exchange: Mutex::new(reader),
            writer: Mutex::new(writer),
            drain_attempts: config.drain_attempts,
            drain_interval: config.drain_interval(),
        }
    }

    /// Writes `bytes` while holding the channel lock.
    ///
    /// Suspends until every earlier locked operation has finished.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the write fails.
    pub async fn send_locked(&self, bytes: &[u8]) -> std::io::Result<()> {
        let _exchange = self.exchange.lock().await;
        self.write_message(bytes).await
    }

    /// Writes `bytes` without taking the channel lock.
    ///
    /// The message may overtake, or be overtaken by, locked operations that
    /// are waiting for the lock, but it is never interleaved with another
    /// message's bytes.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the write fails.
    pub async fn send_unlocked(&self, bytes: &[u8]) -> std::io::Result<()> {
        self.write_message(bytes).await
    }

    /// Runs a request/response exchange under the channel lock.
    ///
    /// Stale bytes are drained first, then `bytes` is written and
    /// `response_reader` is given the read half.  No other locked operation
    /// can write or read until the reader's future completes.  The reader
    /// is responsible for bounding its own reads in time.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if writing the request fails.  Read
    /// failures are the reader's to interpret.
    pub async fn request_locked<T, F>(&self, bytes: &[u8], response_reader: F) -> std::io::Result<T>
    where
        F: for<'a> FnOnce(&'a mut R) -> ResponseFuture<'a, T>,
    {
        let mut reader = self.exchange.lock().await;
        drain(&mut *reader, self.drain_attempts, self.drain_interval).await;
        self.write_message(bytes).await?;
        Ok(response_reader(&mut *reader).await)
    }

    async fn write_message(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut writer = self.writer.lock().await;
        writer.write_all(bytes).await?;
        writer.flush().await?;
        trace!("wrote {} bytes", bytes.len());
        Ok(())
    }
}

/// Discards whatever is already waiting on `reader`.
///
/// Performs at most `max_attempts` reads, each bounded by
/// `per_attempt_timeout`, and stops at the first one that times out, hits
/// end-of-stream, or fails.  Returns the number of bytes discarded.
pub async fn drain<R>(reader: &mut R, max_attempts: u32, per_attempt_timeout: Duration) -> usize
where
    R: AsyncRead + Unpin,
{
    let mut scratch = vec![0u8; DRAIN_BUFFER_LEN];
    let mut discarded = 0usize;
    for attempt in 0..max_attempts {
        match tokio::time::timeout(per_attempt_timeout, reader.read(&mut scratch)).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => discarded += n,
            Ok(Err(e)) => {
                debug!("drain read failed on attempt {attempt}: {e}");
                break;
            }
            Err(_) => break,
        }
    }
    if discarded > 0 {
        debug!("drained {discarded} stale bytes before request");
    }
    discarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::io::duplex;

    fn config() -> ChannelConfig {
        ChannelConfig::default()
    }

    #[tokio::test]
    async fn test_send_locked_writes_exact_bytes() {
        // Arrange
        let writer = tokio_test::io::Builder::new().write(&[10, 0]).build();
        let channel = ControlChannel::new(tokio::io::empty(), writer, &config());

        // Act / Assert – the mock panics on any unexpected write
        channel.send_locked(&[10, 0]).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_unlocked_writes_exact_bytes() {
        let writer = tokio_test::io::Builder::new().write(&[4, 1]).build();
        let channel = ControlChannel::new(tokio::io::empty(), writer, &config());

        channel.send_unlocked(&[4, 1]).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_returns_zero_when_nothing_is_pending() {
        // Arrange – peer kept alive so the read never sees end-of-stream
        let (mut local, _peer) = duplex(64);

        // Act
        let discarded = drain(&mut local, 10, Duration::from_millis(20)).await;

        // Assert
        assert_eq!(discarded, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_discards_pending_bytes() {
        // Arrange
        let (mut local, mut peer) = duplex(64);
        peer.write_all(&[1, 0, 0, 0, 0, 0, 0, 0, 9]).await.unwrap();

        // Act
        let discarded = drain(&mut local, 10, Duration::from_millis(20)).await;

        // Assert
        assert_eq!(discarded, 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_discards_stale_reply_larger_than_ten_kib() {
        // Arrange – a late 20 005-byte clipboard reply is still pending
        let (mut local, mut peer) = duplex(64 * 1024);
        let mut stale = vec![0, 0, 0, 0x4E, 0x20];
        stale.extend(std::iter::repeat(b'x').take(20_000));
        peer.write_all(&stale).await.unwrap();

        // Act
        let discarded = drain(&mut local, 10, Duration::from_millis(20)).await;

        // Assert
        assert_eq!(discarded, stale.len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_is_bounded_by_attempt_budget() {
        // Arrange
        let (mut local, _peer) = duplex(64);
        let started = tokio::time::Instant::now();

        // Act
        drain(&mut local, 10, Duration::from_millis(20)).await;

        // Assert – the first attempt times out, so only one interval elapses
        assert!(started.elapsed() <= Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_stops_at_end_of_stream() {
        let (mut local, peer) = duplex(64);
        drop(peer);

        assert_eq!(drain(&mut local, 10, Duration::from_millis(20)).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_locked_drains_then_reads_fresh_response() {
        // Arrange – a stale ack is already waiting on the connection
        let (local, mut peer) = duplex(256);
        let channel = ControlChannel::from_stream(local, &config());
        peer.write_all(&[1, 0, 0, 0, 0, 0, 0, 0, 1]).await.unwrap();

        let device = tokio::spawn(async move {
            let mut request = [0u8; 2];
            peer.read_exact(&mut request).await.unwrap();
            peer.write_all(&[1, 0, 0, 0, 0, 0, 0, 0, 2]).await.unwrap();
            (request, peer)
        });

        // Act
        let response = channel
            .request_locked(&[8, 1], |reader| {
                Box::pin(async move {
                    let mut buf = [0u8; 9];
                    reader.read_exact(&mut buf).await.map(|_| buf)
                })
            })
            .await
            .unwrap()
            .unwrap();

        // Assert
        let (request, _peer) = device.await.unwrap();
        assert_eq!(request, [8, 1]);
        assert_eq!(response[8], 2, "the stale ack must have been drained");
    }

    #[tokio::test]
    async fn test_concurrent_locked_sends_never_interleave() {
        // Arrange
        let (local, mut peer) = duplex(4096);
        let channel = Arc::new(ControlChannel::from_stream(local, &config()));
        let messages: Vec<Vec<u8>> = (0u8..16).map(|i| vec![i; 32]).collect();

        // Act
        let mut tasks = Vec::new();
        for msg in messages.clone() {
            let channel = Arc::clone(&channel);
            tasks.push(tokio::spawn(async move { channel.send_locked(&msg).await }));
        }
        let unlocked = {
            let channel = Arc::clone(&channel);
            tokio::spawn(async move { channel.send_unlocked(&[0xEE; 32]).await })
        };
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        unlocked.await.unwrap().unwrap();

        // Assert – every 32-byte frame is made of a single repeated byte
        let mut received = vec![0u8; 17 * 32];
        peer.read_exact(&mut received).await.unwrap();
        for frame in received.chunks(32) {
            assert!(frame.iter().all(|b| *b == frame[0]), "interleaved frame: {frame:?}");
        }
    }
}
