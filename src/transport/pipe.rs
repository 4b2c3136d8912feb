use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::time::{timeout, Duration};

use crate::protocol::Message;
use crate::transport::Transport;

/// Default timeout for a single send or receive.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest frame accepted. A deployment message is a few dozen bytes.
pub const MAX_FRAME_SIZE: u32 = 64 * 1024;

/// In-process buffer between the two ends of a pipe.
const PIPE_BUFFER: usize = 4096;

/// Length-prefixed bincode frames over an in-memory byte pipe.
///
/// Each frame is a big-endian `u32` length followed by the encoded
/// [`Message`].
pub struct PipeTransport {
    stream: DuplexStream,
    timeout_duration: Duration,
    max_frame_size: u32,
}

impl PipeTransport {
    /// Two connected ends of a fresh pipe.
    pub fn pair() -> (Self, Self) {
        let (a, b) = duplex(PIPE_BUFFER);
        (Self::from_stream(a), Self::from_stream(b))
    }

    /// Wrap one end of an existing duplex stream.
    pub fn from_stream(stream: DuplexStream) -> Self {
        Self {
            stream,
            timeout_duration: DEFAULT_TIMEOUT,
            max_frame_size: MAX_FRAME_SIZE,
        }
    }

    pub fn with_timeout(mut self, timeout_duration: Duration) -> Self {
        self.timeout_duration = timeout_duration;
        self
    }
}

fn io_error(context: &str, e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::BrokenPipe => {
            anyhow::anyhow!("Pipe closed by peer")
        }
        _ => anyhow::anyhow!("{} error: {}", context, e),
    }
}

#[async_trait::async_trait]
impl Transport for PipeTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let limit = self.timeout_duration;
        let send_op = async {
            let data = bincode::serialize(&msg)
                .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
            if data.len() as u64 > self.max_frame_size as u64 {
                return Err(anyhow::anyhow!(
                    "Message too large: {} bytes (max: {})",
                    data.len(),
                    self.max_frame_size
                ));
            }
            let len = (data.len() as u32).to_be_bytes();
            self.stream
                .write_all(&len)
                .await
                .map_err(|e| io_error("Write", e))?;
            self.stream
                .write_all(&data)
                .await
                .map_err(|e| io_error("Write", e))?;
            self.stream.flush().await.map_err(|e| io_error("Write", e))?;
            anyhow::Ok(())
        };

        timeout(limit, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", limit))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let limit = self.timeout_duration;
        let recv_op = async {
            let mut len_buf = [0u8; 4];
            self.stream
                .read_exact(&mut len_buf)
                .await
                .map_err(|e| io_error("Read", e))?;

            let len = u32::from_be_bytes(len_buf);
            if len > self.max_frame_size {
                return Err(anyhow::anyhow!(
                    "Message too large: {} bytes (max: {})",
                    len,
                    self.max_frame_size
                ));
            }
            if len == 0 {
                return Err(anyhow::anyhow!("Invalid message length: 0"));
            }

            let mut buf = vec![0u8; len as usize];
            self.stream
                .read_exact(&mut buf)
                .await
                .map_err(|e| io_error("Read", e))?;

            let msg = bincode::deserialize(&buf)
                .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))?;
            anyhow::Ok(msg)
        };

        timeout(limit, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", limit))?
    }
}
