//! Websocket transport over tokio-tungstenite.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use futures_util::{SinkExt, StreamExt};
use mobpad_errors::ConnectionError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, trace};

use crate::socket::{EventSender, Generation, Socket, SocketEvent, SocketFactory, emit};
use crate::state::ReadyState;

#[derive(Debug)]
enum SocketCommand {
    Send(String),
    Close,
}

#[derive(Debug, Clone)]
struct SharedState(Arc<AtomicU8>);

impl SharedState {
    fn new(state: ReadyState) -> Self {
        Self(Arc::new(AtomicU8::new(state as u8)))
    }

    fn get(&self) -> ReadyState {
        ReadyState::from_u8(self.0.load(Ordering::Acquire)).unwrap_or(ReadyState::Closed)
    }

    fn set(&self, state: ReadyState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

/// Opens [`WsSocket`]s. Must be used from within a tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct WsSocketFactory;

impl SocketFactory for WsSocketFactory {
    type Socket = WsSocket;

    fn connect(&mut self, url: &str, generation: Generation, events: EventSender) -> WsSocket {
        let state = SharedState::new(ReadyState::Connecting);
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_socket(
            url.to_owned(),
            generation,
            state.clone(),
            events,
            commands_rx,
        ));
        WsSocket {
            state,
            commands: commands_tx,
            task,
        }
    }
}

/// A websocket driven by a background task.
///
/// Dropping the socket aborts its task, so a replaced socket stops
/// producing events.
#[derive(Debug)]
pub struct WsSocket {
    state: SharedState,
    commands: mpsc::UnboundedSender<SocketCommand>,
    task: JoinHandle<()>,
}

impl Socket for WsSocket {
    fn ready_state(&self) -> ReadyState {
        self.state.get()
    }

    fn send(&mut self, payload: &str) -> Result<(), ConnectionError> {
        if self.task.is_finished() {
            return Err(ConnectionError::SocketClosed);
        }
        self.commands
            .send(SocketCommand::Send(payload.to_owned()))
            .map_err(|e| ConnectionError::SendFailed(e.to_string()))
    }

    fn close(&mut self) {
        match self.state.get() {
            ReadyState::Open => {
                self.state.set(ReadyState::Closing);
                if self.commands.send(SocketCommand::Close).is_err() {
                    self.state.set(ReadyState::Closed);
                }
            }
            ReadyState::Connecting => {
                self.task.abort();
                self.state.set(ReadyState::Closed);
            }
            ReadyState::Closing | ReadyState::Closed => {}
        }
    }
}

impl Drop for WsSocket {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_socket(
    url: String,
    generation: Generation,
    state: SharedState,
    events: EventSender,
    mut commands: mpsc::UnboundedReceiver<SocketCommand>,
) {
    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            debug!(%url, %generation, error = %e, "Connect failed");
            state.set(ReadyState::Closed);
            let reason = ConnectionError::connect_failed(&url, e.to_string()).to_string();
            emit(&events, generation, SocketEvent::Error(reason));
            emit(&events, generation, SocketEvent::Close);
            return;
        }
    };

    state.set(ReadyState::Open);
    if !emit(&events, generation, SocketEvent::Open) {
        return;
    }

    let (mut sink, mut stream) = stream.split();
    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(SocketCommand::Send(text)) => {
                    if let Err(e) = sink.send(Message::Text(text)).await {
                        emit(&events, generation, SocketEvent::Error(e.to_string()));
                        break;
                    }
                }
                Some(SocketCommand::Close) | None => {
                    state.set(ReadyState::Closing);
                    if let Err(e) = sink.close().await {
                        debug!(%generation, error = %e, "Close handshake failed");
                    }
                    break;
                }
            },
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if !emit(&events, generation, SocketEvent::Message(text)) {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(other)) => trace!(%generation, ?other, "Ignoring non-text frame"),
                Some(Err(e)) => {
                    emit(&events, generation, SocketEvent::Error(e.to_string()));
                    break;
                }
            },
        }
    }

    state.set(ReadyState::Closed);
    emit(&events, generation, SocketEvent::Close);
}
