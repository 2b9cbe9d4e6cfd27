//! Binary entry point: wire the adapters together and serve.

use std::sync::Arc;

use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use agora_realtime::adapters::http::{api_router, ApiState};
use agora_realtime::adapters::memory::{
    InMemoryChatRepository, InMemoryCommentRepository, InMemoryCommunityDirectory,
    InMemoryFollowRequestRepository, InMemoryNotificationRepository, InMemoryUserDirectory,
    StaticTokenAuthenticator,
};
use agora_realtime::adapters::ws::{realtime_router, GroupRegistry, RealtimeState};
use agora_realtime::application::{
    ChatIngress, CommentIngress, FollowRequestService, NotificationService,
};
use agora_realtime::config::AppConfig;
use agora_realtime::ports::{
    Broadcaster, ChatRepository, CommentRepository, CommunityDirectory, FollowRequestRepository,
    NotificationRepository, SessionAuthenticator, UserDirectory,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .init();

    info!(environment = ?config.server.environment, "starting realtime server");

    // In-memory stores; database-backed adapters slot in here.
    let users: Arc<dyn UserDirectory> = Arc::new(InMemoryUserDirectory::new());
    let chats: Arc<dyn ChatRepository> = Arc::new(InMemoryChatRepository::new());
    let comments: Arc<dyn CommentRepository> = Arc::new(InMemoryCommentRepository::new());
    let notifications: Arc<dyn NotificationRepository> =
        Arc::new(InMemoryNotificationRepository::new());
    let communities: Arc<dyn CommunityDirectory> = Arc::new(InMemoryCommunityDirectory::new());
    let follow_requests: Arc<dyn FollowRequestRepository> =
        Arc::new(InMemoryFollowRequestRepository::new());
    let authenticator: Arc<dyn SessionAuthenticator> = Arc::new(StaticTokenAuthenticator::new());

    let registry = Arc::new(GroupRegistry::new());
    let broadcaster: Arc<dyn Broadcaster> = registry.clone();

    let chat_ingress = Arc::new(ChatIngress::new(
        users.clone(),
        chats.clone(),
        notifications.clone(),
        broadcaster.clone(),
    ));
    let comment_ingress = Arc::new(CommentIngress::new(
        users.clone(),
        comments.clone(),
        broadcaster.clone(),
    ));
    let follow_service = Arc::new(FollowRequestService::new(
        communities.clone(),
        follow_requests.clone(),
        notifications.clone(),
        broadcaster.clone(),
    ));
    let notification_service = Arc::new(NotificationService::new(notifications.clone()));

    let realtime_state = RealtimeState {
        registry,
        chat_ingress,
        comment_ingress,
        authenticator: authenticator.clone(),
        realtime: config.realtime.clone(),
    };
    let api_state = ApiState {
        follow_requests: follow_service,
        notifications: notification_service,
        authenticator,
    };

    let cors = cors_layer(&config);
    let app = axum::Router::new()
        .merge(realtime_router().with_state(realtime_state))
        .merge(api_router().with_state(api_state))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<axum::http::HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    }
}
