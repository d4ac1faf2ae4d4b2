//! PostgreSQL implementation of ConversationRepository

use async_trait::async_trait;
use sqlx::PgPool;

use voxrelay::{ConversationMessage, ConversationRepository, DomainError, MessageRole};

pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ConversationMessageRow {
    id: String,
    session_id: String,
    agent_id: String,
    role: String,
    content: String,
    timestamp: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<ConversationMessageRow> for ConversationMessage {
    type Error = DomainError;

    fn try_from(row: ConversationMessageRow) -> Result<Self, Self::Error> {
        let role: MessageRole = row.role.parse().map_err(DomainError::Repository)?;
        Ok(Self {
            id: row.id,
            session_id: row.session_id,
            agent_id: row.agent_id,
            role,
            content: row.content,
            timestamp: row.timestamp,
        })
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    async fn append(&self, messages: &[ConversationMessage]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        for message in messages {
            sqlx::query(
                r#"
                INSERT INTO conversation_messages (id, session_id, agent_id, role, content, timestamp)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(&message.id)
            .bind(&message.session_id)
            .bind(&message.agent_id)
            .bind(message.role.as_str())
            .bind(&message.content)
            .bind(message.timestamp)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))
    }

    async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<ConversationMessage>, DomainError> {
        let rows = sqlx::query_as::<_, ConversationMessageRow>(
            "SELECT * FROM conversation_messages WHERE session_id = $1 ORDER BY timestamp ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
