use crate::admin;
use crate::cli::Args;
use crate::knowledge::{KnowledgeBase, AVAILABLE_DOCUMENTS};
use crate::models::api::{
    ChatRequest, ChatResponse, ErrorResponse, KnowledgeBaseResponse, KnowledgeBaseUpdate,
    KnowledgeBaseUpdated, SessionMessagesResponse,
};
use crate::session::{AdminGate, AnswerSource, ChatSession};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use log::info;
use std::collections::HashMap;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

type SessionMap = HashMap<Uuid, Arc<Mutex<ChatSession>>>;

#[derive(Clone)]
struct AppState {
    answers: Arc<dyn AnswerSource>,
    knowledge: Arc<KnowledgeBase>,
    sessions: Arc<Mutex<SessionMap>>,
    gate: AdminGate,
}

pub fn router(
    answers: Arc<dyn AnswerSource>,
    knowledge: Arc<KnowledgeBase>,
    gate: AdminGate,
) -> Router {
    let app_state = AppState {
        answers,
        knowledge,
        sessions: Arc::new(Mutex::new(HashMap::new())),
        gate,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/sessions/{id}/messages", get(session_messages_handler))
        .route(
            "/api/knowledge-base",
            get(get_knowledge_base_handler).put(put_knowledge_base_handler),
        )
        .route("/api/documents", get(documents_handler))
        .route("/api/analytics", get(analytics_handler))
        .layer(cors)
        .with_state(app_state)
}

pub async fn start_http_server(
    addr: &str,
    answers: Arc<dyn AnswerSource>,
    knowledge: Arc<KnowledgeBase>,
    args: Args,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = addr.parse::<SocketAddr>()?;
    let app = router(answers, knowledge, args.admin_gate());

    if args.enable_tls && args.tls_cert_path.is_some() && args.tls_key_path.is_some() {
        let cert_path = args.tls_cert_path.as_ref().unwrap();
        let key_path = args.tls_key_path.as_ref().unwrap();

        let tls_config =
            axum_server::tls_rustls::RustlsConfig::from_pem_file(cert_path, key_path).await?;

        info!("Starting HTTPS API server on: https://{}", addr);
        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await?;
    } else {
        info!("Starting HTTP API server on: http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app.into_make_service()).await?;
    }

    Ok(())
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    let session_id = req.session_id.unwrap_or_else(Uuid::new_v4);
    let session = {
        let mut sessions = state.sessions.lock().await;
        sessions
            .entry(session_id)
            .or_insert_with(|| Arc::new(Mutex::new(ChatSession::with_greeting(state.gate.clone()))))
            .clone()
    };

    // Latest knowledge base text, snapshotted before the submission starts.
    let context = state.knowledge.read().await;

    let mut session = match session.try_lock() {
        Ok(guard) => guard,
        Err(_) => {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    message: "A submission is already in flight for this session".into(),
                }),
            )
                .into_response();
        }
    };

    let before = session.messages().len();
    session
        .submit(&req.message, state.answers.as_ref(), &context)
        .await;
    let appended = session.messages()[before..].to_vec();

    (
        StatusCode::OK,
        Json(ChatResponse {
            session_id,
            appended,
            flow: session.flow(),
            busy: session.is_busy(),
        }),
    )
        .into_response()
}

async fn session_messages_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let session = state.sessions.lock().await.get(&id).cloned();
    match session {
        Some(session) => {
            let guard = session.lock().await;
            (
                StatusCode::OK,
                Json(SessionMessagesResponse {
                    session_id: id,
                    messages: guard.messages().to_vec(),
                }),
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                message: format!("Unknown session: {}", id),
            }),
        )
            .into_response(),
    }
}

async fn get_knowledge_base_handler(State(state): State<AppState>) -> impl IntoResponse {
    let content = state.knowledge.read().await;
    Json(KnowledgeBaseResponse { content })
}

async fn put_knowledge_base_handler(
    State(state): State<AppState>,
    Json(update): Json<KnowledgeBaseUpdate>,
) -> impl IntoResponse {
    let length = state.knowledge.replace(update.content).await;
    Json(KnowledgeBaseUpdated {
        success: true,
        length,
    })
}

async fn documents_handler() -> impl IntoResponse {
    Json(AVAILABLE_DOCUMENTS)
}

async fn analytics_handler() -> impl IntoResponse {
    Json(admin::snapshot())
}
