use sqlx::PgPool;
use std::sync::Arc;

use voxrelay::{ChatProvider, RealtimeGateway};
use voxrelay_server::{
    adapters::{
        GeminiChatProvider, OpenAiRealtimeGateway, PgAgentRepository, PgConversationRepository,
        PgLlmConfigRepository,
    },
    app,
    application::{AgentService, ChatService, LlmConfigService, SessionRelay},
    config::ServerConfig,
    AppState,
};

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🎙️  voxrelay API initializing...");

    let config = ServerConfig::from_lookup(|key| secrets.get(key));

    if config.api_key.is_some() {
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No VOXRELAY_API_KEY set - authentication disabled");
    }

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| shuttle_runtime::Error::Database(e.to_string()))?;

    tracing::info!("✅ Database migrations completed");

    // Realtime gateway (Session Relay)
    let gateway: Option<Arc<dyn RealtimeGateway>> = match config.openai_api_key.clone() {
        Some(key) => {
            let gateway = OpenAiRealtimeGateway::new(key, config.realtime.clone());
            tracing::info!("📡 Realtime gateway initialized ({})", gateway.model());
            Some(Arc::new(gateway))
        }
        None => {
            tracing::warn!("⚠️  No OPENAI_API_KEY set - realtime calls disabled");
            None
        }
    };

    // Chat provider
    let chat_provider: Option<Arc<dyn ChatProvider>> = match config.gemini_api_key.clone() {
        Some(key) => {
            let mut provider = GeminiChatProvider::new(key);
            if let Some(model) = config.chat_model.clone() {
                provider = provider.with_model(model);
            }
            tracing::info!("💬 Chat provider initialized (Gemini {})", provider.model_id());
            Some(Arc::new(provider))
        }
        None => {
            tracing::warn!("⚠️  No GEMINI_API_KEY set - chat disabled");
            None
        }
    };

    // Initialize application services
    let agent_repo = Arc::new(PgAgentRepository::new(pool.clone()));
    let conversation_repo = Arc::new(PgConversationRepository::new(pool.clone()));
    let llm_config_repo = Arc::new(PgLlmConfigRepository::new(pool));

    let agent_service = Arc::new(AgentService::new(agent_repo.clone()));
    if let Err(e) = agent_service.ensure_default_agent().await {
        tracing::warn!("⚠️  Failed to seed default agent: {}", e);
    }

    let state = AppState {
        agent_service,
        llm_config_service: Arc::new(LlmConfigService::new(llm_config_repo)),
        chat_service: Arc::new(ChatService::new(
            agent_repo,
            conversation_repo,
            chat_provider,
        )),
        session_relay: Arc::new(SessionRelay::new(gateway)),
        api_key: config.api_key.as_deref().map(Arc::from),
    };

    let router = app(state, config.cors_layer());

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ voxrelay API ready");

    Ok(router.into())
}
