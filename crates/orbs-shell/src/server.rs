//! WebSocket server and connection handling.

use crate::protocol::{ClientMessage, ServerMessage, SessionInfo};
use crate::session::Session;
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use orbs_core::BoardConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Server state shared across all connections.
pub struct ServerState {
    /// Board settings for new games
    pub board_config: BoardConfig,
    /// Last reported state of every running session
    pub sessions: DashMap<Uuid, SessionInfo>,
    /// Mapping from session ID to its message sender
    pub senders: DashMap<Uuid, mpsc::UnboundedSender<ServerMessage>>,
}

impl ServerState {
    pub fn new(board_config: BoardConfig) -> Self {
        Self {
            board_config,
            sessions: DashMap::new(),
            senders: DashMap::new(),
        }
    }

    /// Send a message to a specific session.
    pub fn send_to(&self, session_id: Uuid, msg: ServerMessage) {
        if let Some(sender) = self.senders.get(&session_id) {
            let _ = sender.send(msg);
        }
    }

    /// Get list of running sessions.
    pub fn list_sessions(&self) -> Vec<SessionInfo> {
        let mut sessions: Vec<SessionInfo> = self.sessions.iter().map(|s| s.value().clone()).collect();
        sessions.sort_by_key(|s| s.id);
        sessions
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

/// Run the WebSocket server.
pub async fn run_server(addr: SocketAddr, state: Arc<ServerState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Orbs shell listening on {}", addr);

    while let Ok((stream, peer_addr)) = listener.accept().await {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }

    Ok(())
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream).await?;
    info!("New WebSocket connection from {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Every connection runs its own application
    let mut session = Session::new(Uuid::new_v4(), state.board_config.clone());
    let session_id = session.id;

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.senders.insert(session_id, tx);
    state.sessions.insert(session_id, session.to_info());

    // Send welcome message
    let welcome = ServerMessage::Welcome { session_id };
    let msg_text = serde_json::to_string(&welcome)?;
    ws_sender.send(Message::Text(msg_text)).await?;

    // Spawn task to forward messages from channel to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(text) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
        }
    });

    // Handle incoming messages
    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    if handle_message(&mut session, client_msg, &state) == Flow::Close {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Invalid message from {}: {}", session_id, e);
                    state.send_to(
                        session_id,
                        ServerMessage::Error {
                            message: format!("Invalid message: {}", e),
                        },
                    );
                }
            },
            Ok(Message::Close(_)) => {
                info!("Client {} closing connection", session_id);
                break;
            }
            Ok(Message::Ping(_)) => {
                state.send_to(session_id, ServerMessage::Pong);
            }
            Err(e) => {
                error!("WebSocket error from {}: {}", session_id, e);
                break;
            }
            _ => {}
        }
    }

    // Clean up on disconnect; dropping the sender lets the send task flush
    // what is queued and finish
    state.sessions.remove(&session_id);
    state.senders.remove(&session_id);
    if send_task.await.is_err() {
        warn!("Send task for {} did not finish cleanly", session_id);
    }

    info!("Connection closed for {}", session_id);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Close,
}

/// Handle a client message.
fn handle_message(session: &mut Session, msg: ClientMessage, state: &ServerState) -> Flow {
    match msg {
        ClientMessage::Frame { delta, input } => match session.frame(delta, input) {
            Ok(commands) => {
                state.sessions.insert(session.id, session.to_info());
                state.send_to(session.id, ServerMessage::Frame { commands });

                if session.is_finished() {
                    info!("Session {} exited from the menu", session.id);
                    state.send_to(session.id, ServerMessage::Exited);
                    return Flow::Close;
                }
            }
            Err(e) => {
                debug!("Frame rejected for {}: {}", session.id, e);
                state.send_to(
                    session.id,
                    ServerMessage::Error {
                        message: e.to_string(),
                    },
                );
            }
        },

        ClientMessage::ListSessions => {
            let sessions = state.list_sessions();
            state.send_to(session.id, ServerMessage::SessionList { sessions });
        }

        ClientMessage::Ping => {
            state.send_to(session.id, ServerMessage::Pong);
        }
    }

    Flow::Continue
}
