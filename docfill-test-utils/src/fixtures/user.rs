use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_USER_LANG, error::TestError, TestContext};

impl TestContext {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { test: self }
    }
}

pub struct UserFixtures<'a> {
    test: &'a mut TestContext,
}

impl<'a> UserFixtures<'a> {
    pub async fn insert_user(&self, is_admin: bool) -> Result<entity::app_user::Model, TestError> {
        self.insert_user_with_lang(is_admin, TEST_USER_LANG).await
    }

    pub async fn insert_user_with_lang(
        &self,
        is_admin: bool,
        lang: &str,
    ) -> Result<entity::app_user::Model, TestError> {
        Ok(
            entity::prelude::AppUser::insert(entity::app_user::ActiveModel {
                name: ActiveValue::Set("Test User".to_string()),
                lang: ActiveValue::Set(lang.to_string()),
                is_admin: ActiveValue::Set(is_admin),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    pub async fn insert_access(
        &self,
        model: &str,
        user_id: Option<i32>,
        perm_read: bool,
        perm_write: bool,
    ) -> Result<entity::model_access::Model, TestError> {
        Ok(
            entity::prelude::ModelAccess::insert(entity::model_access::ActiveModel {
                model: ActiveValue::Set(model.to_string()),
                user_id: ActiveValue::Set(user_id),
                perm_read: ActiveValue::Set(perm_read),
                perm_write: ActiveValue::Set(perm_write),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }
}
