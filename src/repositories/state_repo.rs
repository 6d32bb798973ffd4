//! Repository for the `state` lookup table.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::State;

#[derive(Clone)]
pub struct StateRepository {
    pool: AsyncDbPool,
}

impl StateRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Finds a reserved state by name. Lookups are case-folded to lower by
    /// the caller (see `crate::models::state` constants).
    pub async fn find_by_name(&self, state_name: &str) -> Result<Option<State>, AppError> {
        use crate::schema::state::dsl::*;
        let mut conn = self.pool.get().await?;

        state
            .filter(name.eq(state_name))
            .select(State::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
