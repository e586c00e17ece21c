// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::account_repository::RepositoryError;
use async_trait::async_trait;
use std::collections::HashSet;

/// 关注关系仓库特质
#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    /// 获取账户关注的所有账户ID
    ///
    /// # 参数
    ///
    /// * `account_id` - 查看者账户ID
    ///
    /// # 返回值
    ///
    /// * `Ok(HashSet<i64>)` - 被关注账户ID集合，可能为空
    /// * `Err(RepositoryError)` - 查询失败
    async fn following_ids(&self, account_id: i64) -> Result<HashSet<i64>, RepositoryError>;
}
