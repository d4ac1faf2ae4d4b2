//! PostgreSQL implementation of AgentRepository

use async_trait::async_trait;
use sqlx::PgPool;

use voxrelay::{Agent, AgentRepository, DomainError};

pub struct PgAgentRepository {
    pool: PgPool,
}

impl PgAgentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct AgentRow {
    id: String,
    name: String,
    description: String,
    system_prompt: String,
    language: String,
    is_active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<AgentRow> for Agent {
    fn from(row: AgentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            system_prompt: row.system_prompt,
            language: row.language,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn repository_error(e: sqlx::Error) -> DomainError {
    DomainError::Repository(e.to_string())
}

#[async_trait]
impl AgentRepository for PgAgentRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Agent>, DomainError> {
        let row = sqlx::query_as::<_, AgentRow>("SELECT * FROM agents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(repository_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Agent>, DomainError> {
        let row = sqlx::query_as::<_, AgentRow>(
            "SELECT * FROM agents WHERE name = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Agent>, DomainError> {
        let rows = sqlx::query_as::<_, AgentRow>("SELECT * FROM agents ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(repository_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, agent: &Agent) -> Result<Agent, DomainError> {
        let row = sqlx::query_as::<_, AgentRow>(
            r#"
            INSERT INTO agents (id, name, description, system_prompt, language, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&agent.id)
        .bind(&agent.name)
        .bind(&agent.description)
        .bind(&agent.system_prompt)
        .bind(&agent.language)
        .bind(agent.is_active)
        .bind(agent.created_at)
        .bind(agent.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::Conflict(format!("Agent {} already exists", agent.id))
            }
            _ => repository_error(e),
        })?;

        Ok(row.into())
    }

    async fn update(&self, agent: &Agent) -> Result<Option<Agent>, DomainError> {
        let row = sqlx::query_as::<_, AgentRow>(
            r#"
            UPDATE agents
            SET name = $2, description = $3, system_prompt = $4, language = $5,
                is_active = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(&agent.id)
        .bind(&agent.name)
        .bind(&agent.description)
        .bind(&agent.system_prompt)
        .bind(&agent.language)
        .bind(agent.is_active)
        .bind(agent.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM agents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(repository_error)?;

        Ok(result.rows_affected() > 0)
    }
}
