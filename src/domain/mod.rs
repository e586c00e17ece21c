// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含账户搜索的核心业务逻辑，包括：
/// - 领域模型（models）：账户、规范化查询和搜索选项
/// - 仓库接口（repositories）：账户与关注关系的只读访问抽象
/// - 检索后端（search）：排序检索的策略接口
/// - 服务（services）：规范化、精确匹配、评分与编排
///
/// 领域层不依赖于任何外部实现。
pub mod models;
pub mod repositories;
pub mod search;
pub mod services;

#[cfg(test)]
pub(crate) mod mocks;
