//! Console session: a local chat simulator. Each stdin line is a direct message from [`CONSOLE_SENDER`];
//! replies are printed as `Bot: <text>`.

use async_trait::async_trait;
use relay_core::{EventSender, InboundMessage, LifecycleEvent, RelayError, Result, Session, SessionEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Sender id of every console message; the derived session id is `console`.
pub const CONSOLE_SENDER: &str = "console@local";

/// Lines that end the session.
const QUIT_COMMANDS: &[&str] = &["sair", "exit"];

/// Line-oriented session over any async reader/writer pair.
///
/// Output goes through a mutex so replies to different messages never interleave mid-line.
pub struct ConsoleSession<R, W> {
    input: Mutex<Option<R>>,
    output: Mutex<W>,
}

impl ConsoleSession<BufReader<Stdin>, Stdout> {
    /// Reads from stdin, replies on stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> ConsoleSession<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(Some(input)),
            output: Mutex::new(output),
        }
    }

    async fn write_line(&self, line: &str) -> Result<()> {
        let mut out = self.output.lock().await;
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<R, W> Session for ConsoleSession<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    #[instrument(skip(self, events))]
    async fn start(&self, events: EventSender) -> Result<()> {
        let input = self
            .input
            .lock()
            .await
            .take()
            .ok_or_else(|| RelayError::Session("console session already started".to_string()))?;

        self.write_line("💬 Chat simulator started. Type 'sair' or 'exit' to quit.")
            .await?;
        let closed = |e: tokio::sync::mpsc::error::SendError<SessionEvent>| {
            RelayError::Session(format!("event receiver closed: {}", e))
        };
        events
            .send(SessionEvent::Lifecycle(LifecycleEvent::Ready))
            .map_err(closed)?;

        let mut lines = input.lines();
        let mut counter: u64 = 0;
        let reason = loop {
            let Some(line) = lines.next_line().await? else {
                break "input closed";
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if QUIT_COMMANDS.iter().any(|q| line.eq_ignore_ascii_case(q)) {
                break "user quit";
            }
            counter += 1;
            debug!(message_id = counter, "Console line read");
            events
                .send(SessionEvent::Message(InboundMessage::direct(
                    counter.to_string(),
                    CONSOLE_SENDER,
                    line,
                )))
                .map_err(closed)?;
        };

        events
            .send(SessionEvent::Lifecycle(LifecycleEvent::Disconnected(
                reason.to_string(),
            )))
            .map_err(closed)?;
        Ok(())
    }

    async fn send_message(&self, _target_id: &str, text: &str) -> Result<()> {
        self.write_line(&format!("Bot: {}", text)).await
    }
}
