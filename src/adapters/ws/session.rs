//! Connection session lifecycle.
//!
//! A session owns one WebSocket for its whole life: register an outbound
//! queue, join the groups the endpoint implies, pump frames until the peer
//! goes away, then leave every joined group. Cleanup is unconditional;
//! it runs the same way for a clean close frame and a torn connection.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::ingress::frames::{to_payload, ChatServerFrame};
use crate::application::{ChatIngress, CommentIngress};
use crate::config::RealtimeConfig;
use crate::domain::foundation::{AuthenticatedIdentity, ConnectionId};
use crate::domain::messaging::GroupName;

use super::registry::{ConnectionHandle, GroupRegistry};

/// A registered connection: groups joined, writer task running.
struct OpenSession {
    id: ConnectionId,
    registry: Arc<GroupRegistry>,
    groups: Vec<GroupName>,
    tx: mpsc::Sender<Arc<String>>,
    writer: JoinHandle<()>,
    receiver: SplitStream<WebSocket>,
}

impl OpenSession {
    /// Registers the socket: queue, writer task, group memberships.
    async fn open(
        socket: WebSocket,
        registry: Arc<GroupRegistry>,
        groups: Vec<GroupName>,
        config: &RealtimeConfig,
    ) -> Self {
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::channel::<Arc<String>>(config.send_buffer);
        let (sink, receiver) = socket.split();

        let handle = ConnectionHandle::new(id, tx.clone());
        for group in &groups {
            registry.join(group, handle.clone()).await;
        }

        let writer = tokio::spawn(pump_outbound(rx, sink, id));

        debug!(connection = %id, groups = groups.len(), "session opened");
        Self {
            id,
            registry,
            groups,
            tx,
            writer,
            receiver,
        }
    }

    /// Next inbound text frame, or `None` once the peer is gone. Control
    /// frames are skipped; a close frame or transport error ends the
    /// stream.
    async fn next_text(&mut self) -> Option<String> {
        while let Some(result) = self.receiver.next().await {
            match result {
                Ok(Message::Text(text)) => return Some(text),
                Ok(Message::Close(_)) => {
                    debug!(connection = %self.id, "peer sent close frame");
                    return None;
                }
                Ok(Message::Binary(_)) => {
                    warn!(connection = %self.id, "ignoring binary frame");
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
                Err(e) => {
                    debug!(connection = %self.id, "receive error: {}", e);
                    return None;
                }
            }
        }
        None
    }

    /// Queues a frame to this connection only.
    fn send_to_self(&self, payload: &serde_json::Value) {
        let _ = self.tx.try_send(Arc::new(payload.to_string()));
    }

    /// Leaves every joined group and stops the writer. Runs on every exit
    /// path, including abnormal ones.
    async fn close(self) {
        for group in &self.groups {
            self.registry.leave(group, self.id).await;
        }
        self.writer.abort();
        debug!(connection = %self.id, "session closed");
    }
}

/// Forwards queued payloads to the socket until either side goes away.
async fn pump_outbound(
    mut rx: mpsc::Receiver<Arc<String>>,
    mut sink: SplitSink<WebSocket, Message>,
    id: ConnectionId,
) {
    while let Some(payload) = rx.recv().await {
        if let Err(e) = sink.send(Message::Text((*payload).clone())).await {
            debug!(connection = %id, "send error, stopping writer: {}", e);
            break;
        }
    }
}

/// Runs a receive-only notification session: join the well-known
/// notification group and forward broadcasts until disconnect. Inbound
/// text frames have no meaning here and are dropped.
pub async fn run_notification_session(
    socket: WebSocket,
    registry: Arc<GroupRegistry>,
    config: RealtimeConfig,
) {
    let mut session = OpenSession::open(
        socket,
        registry,
        vec![GroupName::notifications()],
        &config,
    )
    .await;

    while let Some(text) = session.next_text().await {
        debug!(connection = %session.id, bytes = text.len(), "ignoring inbound notification frame");
    }

    session.close().await;
}

/// Runs an authenticated chat session on one chat's group.
pub async fn run_chat_session(
    socket: WebSocket,
    registry: Arc<GroupRegistry>,
    ingress: Arc<ChatIngress>,
    identity: AuthenticatedIdentity,
    group: GroupName,
    config: RealtimeConfig,
) {
    let mut session = OpenSession::open(socket, registry, vec![group], &config).await;

    while let Some(text) = session.next_text().await {
        if let Err(err) = ingress.handle_frame(&identity, &text).await {
            warn!(
                connection = %session.id,
                user = %identity.user_id,
                error_class = err.class(),
                "dropping chat frame: {}",
                err
            );
            if config.nack_on_error {
                session.send_to_self(&to_payload(&ChatServerFrame::Error {
                    reason: err.to_string(),
                }));
            }
        }
    }

    session.close().await;
}

/// Runs an authenticated comment session on one comments group.
pub async fn run_comment_session(
    socket: WebSocket,
    registry: Arc<GroupRegistry>,
    ingress: Arc<CommentIngress>,
    identity: AuthenticatedIdentity,
    group: GroupName,
    config: RealtimeConfig,
) {
    let mut session = OpenSession::open(socket, registry, vec![group.clone()], &config).await;

    while let Some(text) = session.next_text().await {
        if let Err(err) = ingress.handle_frame(&identity, &group, &text).await {
            warn!(
                connection = %session.id,
                user = %identity.user_id,
                error_class = err.class(),
                "dropping comment frame: {}",
                err
            );
            if config.nack_on_error {
                session.send_to_self(&to_payload(&ChatServerFrame::Error {
                    reason: err.to_string(),
                }));
            }
        }
    }

    session.close().await;
}
