// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::repositories::account_repository::RepositoryError;
use crate::domain::repositories::relationship_repository::RelationshipRepository;
use crate::infrastructure::database::entities::follow;
use async_trait::async_trait;
use sea_orm::*;
use std::collections::HashSet;
use std::sync::Arc;

/// 关注关系仓库实现
pub struct RelationshipRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl RelationshipRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RelationshipRepository for RelationshipRepositoryImpl {
    async fn following_ids(&self, account_id: i64) -> Result<HashSet<i64>, RepositoryError> {
        let ids: Vec<i64> = follow::Entity::find()
            .select_only()
            .column(follow::Column::TargetAccountId)
            .filter(follow::Column::AccountId.eq(account_id))
            .into_tuple()
            .all(self.db.as_ref())
            .await?;

        Ok(ids.into_iter().collect())
    }
}
