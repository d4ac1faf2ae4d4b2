//! Agent - Voice Bot Configuration
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Language tag assigned when a request does not name one
pub const DEFAULT_LANGUAGE: &str = "hindi";

/// Name of the agent seeded on first startup
pub const DEFAULT_AGENT_NAME: &str = "Order Taking Agent";

const DEFAULT_AGENT_DESCRIPTION: &str = "Hindi voice bot for taking customer orders";

const DEFAULT_AGENT_PROMPT: &str = "You are an order-taking voice bot that speaks in clear Hindi. Your job is to take orders from customers.

Instructions:
1. Always speak in clear and simple Hindi
2. Let the customer speak - do not interrupt
3. When customer says something, let them finish completely
4. Listen patiently and understand
5. Collect all information before confirming the order

Order taking process:
1. Say Namaste and ask what they want to order
2. Note the item name
3. Ask for quantity
4. Ask for delivery address
5. Confirm contact number
6. Repeat all order information
7. Ask for confirmation

Remember:
- Speak in short sentences
- Wait for customer response
- Be polite and helpful
- If you don't understand, ask again

Start with: Namaste! Main aapke order mein madad karunga. Aap kya order karna chahte hain?";

/// Agent - a named prompt/language configuration selectable for calls and chat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub system_prompt: String,
    pub language: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for an Agent. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub system_prompt: Option<String>,
    pub language: Option<String>,
    pub is_active: Option<bool>,
}

impl Agent {
    /// Create a new Agent with generated ID and timestamps
    pub fn new(
        name: String,
        description: String,
        system_prompt: String,
        language: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            system_prompt,
            language: language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// The Hindi order-taking agent seeded when the store has none
    pub fn order_taking_default() -> Self {
        Self::new(
            DEFAULT_AGENT_NAME.to_string(),
            DEFAULT_AGENT_DESCRIPTION.to_string(),
            DEFAULT_AGENT_PROMPT.to_string(),
            None,
        )
    }

    /// Apply a partial update, bumping `updated_at` only when something changed
    pub fn apply(&mut self, patch: AgentPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(system_prompt) = patch.system_prompt {
            self.system_prompt = system_prompt;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
        true
    }
}

impl AgentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.system_prompt.is_none()
            && self.language.is_none()
            && self.is_active.is_none()
    }
}
