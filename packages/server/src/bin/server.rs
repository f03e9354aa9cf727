//! Real-time debate room server.
//!
//! Hosts live debate and poll rooms: REST for room CRUD and membership,
//! WebSocket for the chat relay and room notifications.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin rondan-server
//! cargo run --bin rondan-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use rondan_server::{
    infrastructure::{
        channel::WebSocketRoomChannel, repository::InMemoryRoomRepository,
        session::SessionRegistry,
    },
    ui::{JwtManager, Server},
    usecase::{
        CreateRoomUseCase, DeleteRoomUseCase, GetRoomUseCase, JoinRoomUseCase,
        KickParticipantUseCase, LeaveRoomUseCase, SendMessageUseCase, TerminateRoomUseCase,
    },
};
use rondan_shared::logger::setup_logger;

/// Token lifetime accepted from the external auth service (7 days)
const TOKEN_EXPIRATION_SECS: i64 = 7 * 24 * 3600;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Real-time debate room server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET is not set, using an insecure development secret");
        "dev-secret-change-me".to_string()
    });

    // Initialize dependencies in order:
    // 1. Repository
    // 2. RoomChannel
    // 3. Session Registry + JwtManager
    // 4. UseCases
    // 5. Server

    // 1. Create Repository (in-memory database)
    let repository = Arc::new(InMemoryRoomRepository::new());

    // 2. Create RoomChannel (WebSocket implementation)
    let channel = Arc::new(WebSocketRoomChannel::new());

    // 3. Create Session Registry and token verification
    let session_registry = Arc::new(SessionRegistry::new());
    let jwt_manager = Arc::new(JwtManager::new(&jwt_secret, TOKEN_EXPIRATION_SECS));

    // 4. Create UseCases
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(repository.clone()));
    let get_room_usecase = Arc::new(GetRoomUseCase::new(repository.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(repository.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        repository.clone(),
        channel.clone(),
    ));
    let kick_participant_usecase = Arc::new(KickParticipantUseCase::new(
        repository.clone(),
        channel.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        channel.clone(),
    ));
    let terminate_room_usecase = Arc::new(TerminateRoomUseCase::new(
        repository.clone(),
        channel.clone(),
    ));
    let delete_room_usecase = Arc::new(DeleteRoomUseCase::new(repository.clone()));

    // 5. Create and run the server
    let server = Server::new(rondan_server::ui::state::AppState {
        create_room_usecase,
        get_room_usecase,
        join_room_usecase,
        leave_room_usecase,
        kick_participant_usecase,
        send_message_usecase,
        terminate_room_usecase,
        delete_room_usecase,
        session_registry,
        channel,
        jwt_manager,
    });
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
