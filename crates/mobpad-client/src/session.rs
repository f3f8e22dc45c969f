//! The client session loop.
//!
//! [`PadClient`] owns the input engine and the connection monitor and drives
//! both from one task. Pointer commands, health-check ticks and socket events
//! are multiplexed with `tokio::select!`, and each is handled to completion
//! before the next is looked at.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use mobpad_config::ClientConfig;
use mobpad_connection::{ConnectionConfig, ConnectionMonitor, ReadyState, SendOutcome, SocketFactory};
use mobpad_errors::ConnectionError;
use mobpad_input::{ColourRegistry, PadState, PixelSurface, Point, PointerId};
use mobpad_protocol::{PayloadCodec, PayloadGate};
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::vibration::{Actuator, VibrationSubscriber};

/// Commands queued by a [`ClientHandle`].
pub const COMMAND_CHANNEL_CAPACITY: usize = 256;

/// Work for the session loop.
#[derive(Debug)]
pub enum ClientCommand<S> {
    /// A finger or button went down
    PointerDown {
        /// Pointer identifier
        pointer: PointerId,
        /// Position on the surface
        position: Point,
    },
    /// A pointer moved
    PointerMove {
        /// Pointer identifier
        pointer: PointerId,
        /// Position on the surface
        position: Point,
    },
    /// A pointer lifted or was cancelled
    PointerUp {
        /// Pointer identifier
        pointer: PointerId,
    },
    /// The layout was re-rendered, e.g. after a resize
    ReplaceSurface(S),
    /// New player settings
    ApplySettings(Box<ClientConfig>),
    /// Stop the loop and close the socket
    Shutdown,
}

/// Connection settings derived from the player settings.
pub fn connection_config(config: &ClientConfig) -> ConnectionConfig {
    ConnectionConfig::with_url(config.server_url.clone())
}

/// Input engine and socket session driven from a single task.
#[derive(Debug)]
pub struct PadClient<S, F: SocketFactory> {
    pad: PadState<S>,
    monitor: ConnectionMonitor<F>,
    codec: PayloadCodec,
    gate: PayloadGate,
    vibration: Arc<AtomicBool>,
    commands: mpsc::Receiver<ClientCommand<S>>,
}

impl<S, F> PadClient<S, F>
where
    S: PixelSurface,
    F: SocketFactory,
{
    /// Start a session with `config` over a rendered `surface`.
    ///
    /// The first socket is opened immediately. Returns the client and a
    /// handle for feeding it commands.
    pub fn new(
        config: &ClientConfig,
        connection: ConnectionConfig,
        registry: Arc<ColourRegistry>,
        surface: S,
        factory: F,
    ) -> (Self, ClientHandle<S>) {
        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let codec = PayloadCodec::with_max_size(connection.max_message_size);
        let pad = PadState::new(registry, surface).with_extent_radius(config.extent_radius());
        let client = Self {
            pad,
            monitor: ConnectionMonitor::new(connection, factory),
            codec,
            gate: PayloadGate::new(),
            vibration: Arc::new(AtomicBool::new(config.vibration)),
            commands: rx,
        };
        (client, ClientHandle { commands: tx })
    }

    /// Play inbound rumble commands on `actuator`.
    pub fn attach_actuator<A: Actuator + 'static>(&mut self, actuator: A) {
        let subscriber = VibrationSubscriber::new(actuator, Arc::clone(&self.vibration));
        self.monitor.subscribe(subscriber);
    }

    /// Handle a pointer-down and transmit the resulting state change.
    pub fn pointer_down(&mut self, pointer: PointerId, position: Point) -> Option<SendOutcome> {
        if !self.pad.on_pointer_down(pointer, position) {
            trace!(pointer = pointer.0, x = position.x, y = position.y, "Pointer down outside any input");
        }
        self.transmit()
    }

    /// Handle a pointer move and transmit the resulting state change.
    pub fn pointer_move(&mut self, pointer: PointerId, position: Point) -> Option<SendOutcome> {
        self.pad.on_pointer_move(pointer, position);
        self.transmit()
    }

    /// Handle a pointer release and transmit the resulting state change.
    pub fn pointer_up(&mut self, pointer: PointerId) -> Option<SendOutcome> {
        self.pad.on_pointer_up(pointer);
        self.transmit()
    }

    /// Flush pending changes to the socket.
    ///
    /// Returns `None` when nothing changed or the payload repeats the last one.
    pub fn transmit(&mut self) -> Option<SendOutcome> {
        let delta = self.pad.flush_state();
        if delta.is_empty() {
            return None;
        }
        let payload = match self.codec.encode(&delta) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, fields = delta.len(), "Dropping state update");
                return None;
            }
        };
        let Some(payload) = self.gate.admit(payload) else {
            trace!("Payload unchanged, not sending");
            return None;
        };
        Some(self.monitor.send(payload))
    }

    /// Swap in a re-rendered surface.
    pub fn replace_surface(&mut self, surface: S) {
        self.pad.replace_surface(surface);
    }

    /// Apply new player settings and announce name and colours to the host.
    pub fn apply_settings(&mut self, config: &ClientConfig) {
        self.pad.set_extent_radius(config.extent_radius());
        self.vibration.store(config.vibration, Ordering::Relaxed);
        for message in config.settings_messages() {
            match self.codec.encode(&message) {
                Ok(payload) => {
                    self.monitor.send(payload);
                }
                Err(e) => warn!(error = %e, kind = %message.type_tag(), "Dropping settings message"),
            }
        }
        info!(
            name = %config.player_name,
            extent_radius = self.pad.extent_radius(),
            vibration = config.vibration,
            "Settings applied"
        );
    }

    /// Apply one command. Returns `false` once the session should stop.
    pub fn handle_command(&mut self, command: ClientCommand<S>) -> bool {
        match command {
            ClientCommand::PointerDown { pointer, position } => {
                self.pointer_down(pointer, position);
            }
            ClientCommand::PointerMove { pointer, position } => {
                self.pointer_move(pointer, position);
            }
            ClientCommand::PointerUp { pointer } => {
                self.pointer_up(pointer);
            }
            ClientCommand::ReplaceSurface(surface) => self.replace_surface(surface),
            ClientCommand::ApplySettings(config) => self.apply_settings(&config),
            ClientCommand::Shutdown => return false,
        }
        true
    }

    /// Run until shut down or every handle is dropped, then close the socket.
    pub async fn run(mut self) {
        let config = self.monitor.config();
        let first_check = time::Instant::now() + config.first_check_delay();
        let mut health = time::interval_at(first_check, config.check_interval());
        health.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(url = %config.url, "Client session started");

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        debug!("All client handles dropped");
                        break;
                    };
                    if !self.handle_command(command) {
                        break;
                    }
                }
                _ = health.tick() => {
                    self.monitor.check_connection();
                }
                Some(event) = self.monitor.next_event() => {
                    self.monitor.handle_event(event);
                }
            }
        }

        self.monitor.close();
        info!(reconnects = self.monitor.reconnect_count(), "Client session stopped");
    }

    /// The input engine.
    pub fn pad(&self) -> &PadState<S> {
        &self.pad
    }

    /// The socket session.
    pub fn monitor(&self) -> &ConnectionMonitor<F> {
        &self.monitor
    }

    /// Mutable access to the socket session, for health checks and event
    /// handling outside [`PadClient::run`].
    pub fn monitor_mut(&mut self) -> &mut ConnectionMonitor<F> {
        &mut self.monitor
    }

    /// Current socket state.
    pub fn connection_state(&self) -> ReadyState {
        self.monitor.state()
    }

    /// Whether rumble commands currently vibrate.
    pub fn vibration_enabled(&self) -> bool {
        self.vibration.load(Ordering::Relaxed)
    }
}

/// Cloneable sender of [`ClientCommand`]s.
#[derive(Debug)]
pub struct ClientHandle<S> {
    commands: mpsc::Sender<ClientCommand<S>>,
}

impl<S> Clone for ClientHandle<S> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
        }
    }
}

impl<S> ClientHandle<S> {
    /// Queue a command.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::SessionEnded`] if the loop has stopped.
    pub async fn send(&self, command: ClientCommand<S>) -> Result<(), ConnectionError> {
        self.commands
            .send(command)
            .await
            .map_err(|e| {
                debug!(error = %e, "Client session gone");
                ConnectionError::SessionEnded
            })
    }

    /// Queue a pointer-down.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::SessionEnded`] if the loop has stopped.
    pub async fn pointer_down(&self, pointer: PointerId, position: Point) -> Result<(), ConnectionError> {
        self.send(ClientCommand::PointerDown { pointer, position }).await
    }

    /// Queue a pointer move.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::SessionEnded`] if the loop has stopped.
    pub async fn pointer_move(&self, pointer: PointerId, position: Point) -> Result<(), ConnectionError> {
        self.send(ClientCommand::PointerMove { pointer, position }).await
    }

    /// Queue a pointer release.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::SessionEnded`] if the loop has stopped.
    pub async fn pointer_up(&self, pointer: PointerId) -> Result<(), ConnectionError> {
        self.send(ClientCommand::PointerUp { pointer }).await
    }

    /// Queue new player settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::SessionEnded`] if the loop has stopped.
    pub async fn apply_settings(&self, config: ClientConfig) -> Result<(), ConnectionError> {
        self.send(ClientCommand::ApplySettings(Box::new(config))).await
    }

    /// Ask the loop to stop.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::SessionEnded`] if the loop has already stopped.
    pub async fn shutdown(&self) -> Result<(), ConnectionError> {
        self.send(ClientCommand::Shutdown).await
    }
}
