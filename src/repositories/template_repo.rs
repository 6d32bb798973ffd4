//! Repository for the `template` table.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewTemplate, Template};

#[derive(Clone)]
pub struct TemplateRepository {
    pool: AsyncDbPool,
}

impl TemplateRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Looks up a template by its unique, lowercase name.
    pub async fn find_by_name(&self, template_name: &str) -> Result<Option<Template>, AppError> {
        use crate::schema::template::dsl::*;
        let mut conn = self.pool.get().await?;

        template
            .filter(name.eq(template_name))
            .select(Template::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, template_id: Uuid) -> Result<Option<Template>, AppError> {
        use crate::schema::template::dsl::*;
        let mut conn = self.pool.get().await?;

        template
            .filter(id.eq(template_id))
            .select(Template::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn create(&self, new_template: NewTemplate) -> Result<Template, AppError> {
        use crate::schema::template::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(template)
            .values(&new_template)
            .returning(Template::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
