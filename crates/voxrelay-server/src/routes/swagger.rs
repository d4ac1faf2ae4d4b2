//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    // Agent models
    AgentResponse,
    // Chat models
    ChatRequest,
    ChatResponse,
    ConversationMessageResponse,
    CreateAgentRequest,
    // LLM config models
    CreateLlmConfigRequest,
    LlmConfigResponse,
    MessageResponse,
    UpdateAgentRequest,
};
use crate::HealthCheck;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        // Agent endpoints
        super::agent::list_agents,
        super::agent::create_agent,
        super::agent::get_agent,
        super::agent::update_agent,
        super::agent::delete_agent,
        // Chat endpoints
        super::chat::chat,
        super::chat::get_conversation,
        // LLM config endpoints
        super::llm_config::list_llm_configs,
        super::llm_config::create_llm_config,
        super::llm_config::delete_llm_config,
        // Realtime endpoints
        super::realtime::create_session,
        super::realtime::negotiate,
    ),
    info(
        title = "voxrelay API",
        version = "0.1.0",
        description = "Voice agent relay - agent management, text chat, and WebRTC session negotiation with a realtime speech vendor.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Agent", description = "Agent - Voice agent configuration management"),
        (name = "Chat", description = "Chat - Text chat through an agent's system prompt"),
        (name = "LlmConfig", description = "LlmConfig - Stored LLM provider configurations"),
        (name = "Realtime", description = "Realtime - Credential issuance and SDP negotiation relay"),
    ),
    components(
        schemas(
            HealthCheck,
            // Agent
            CreateAgentRequest,
            UpdateAgentRequest,
            AgentResponse,
            MessageResponse,
            // Chat
            ChatRequest,
            ChatResponse,
            ConversationMessageResponse,
            // LLM config
            CreateLlmConfigRequest,
            LlmConfigResponse,
        )
    ),
)]
pub struct ApiDoc;
