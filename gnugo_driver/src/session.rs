use std::ffi::OsString;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::sequencer::Sequencer;

const CHUNK_SIZE: usize = 4096;
const REAP_INTERVAL: Duration = Duration::from_millis(10);

/// How an engine session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// The engine closed its output.
    Completed,
    /// The engine was killed after printing something.
    TimedOutPartial,
    /// The engine was killed before printing anything.
    TimedOutEmpty,
}

impl Completion {
    pub fn is_complete(self) -> bool {
        self == Completion::Completed
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Everything the engine printed on stdout.
    pub output: String,
    pub completion: Completion,
    /// Every line written to the engine, in order.
    pub commands: Vec<String>,
}

/// Runs one engine process to the end, answering its prompts with `sequencer`.
///
/// The sequencer sees the complete output after every chunk that arrives. The
/// process is killed once `timeout` has elapsed.
pub fn run_session(
    program: &Path,
    args: &[OsString],
    timeout: Duration,
    sequencer: &mut dyn Sequencer,
) -> anyhow::Result<SessionOutcome> {
    debug!(program = %program.display(), ?args, "Starting engine");
    let deadline = Instant::now() + timeout;
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Could not start the engine at '{}'", program.display()))?;
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| anyhow!("Could not access the engine's stdin"))?;
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("Could not access the engine's stdout"))?;

    let (tx, rx) = mpsc::channel::<Vec<u8>>();
    std::thread::spawn(move || forward_chunks(&mut stdout, &tx));

    let mut buffer: Vec<u8> = Vec::new();
    let mut commands = Vec::new();
    let completion = loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(chunk) => {
                trace!(chunk = %String::from_utf8_lossy(&chunk), "Received output");
                buffer.extend_from_slice(&chunk);
                let output = String::from_utf8_lossy(&buffer);
                for command in sequencer.react(&output) {
                    let line = command.to_string();
                    debug!(command = %line, "Sending command");
                    // The engine may stop reading as soon as it sees `quit`
                    if let Err(err) = writeln!(stdin, "{}", line).and_then(|()| stdin.flush()) {
                        debug!(command = %line, %err, "Engine no longer reads its input");
                    }
                    commands.push(line);
                }
            }
            Err(RecvTimeoutError::Disconnected) => break Completion::Completed,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    timeout_millis = timeout.as_millis() as u64,
                    received_bytes = buffer.len(),
                    "Engine timed out"
                );
                break if buffer.is_empty() {
                    Completion::TimedOutEmpty
                } else {
                    Completion::TimedOutPartial
                };
            }
        }
    };
    drop(stdin);
    reap(&mut child, deadline)?;

    Ok(SessionOutcome {
        output: String::from_utf8_lossy(&buffer).into_owned(),
        completion,
        commands,
    })
}

/// Sends everything `reader` yields until it closes or fails.
fn forward_chunks(reader: &mut impl Read, tx: &Sender<Vec<u8>>) {
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut chunk) {
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Ok(0) | Err(_) => break,
            Ok(len) => {
                if tx.send(chunk[..len].to_vec()).is_err() {
                    break;
                }
            }
        }
    }
}

/// Waits for the process to exit until `deadline`, then kills it.
fn reap(child: &mut Child, deadline: Instant) -> anyhow::Result<()> {
    while Instant::now() < deadline {
        if child.try_wait()?.is_some() {
            return Ok(());
        }
        std::thread::sleep(REAP_INTERVAL);
    }
    if child.try_wait()?.is_none() {
        debug!(pid = child.id(), "Killing engine");
        if let Err(err) = child.kill() {
            debug!(%err, "Could not kill engine");
        }
    }
    child.wait()?;
    Ok(())
}
