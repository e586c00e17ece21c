// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了账户搜索的核心实体，包括：
/// - 账户（account）：搜索结果中的账户视图
/// - 搜索查询（search_query）：规范化后的查询和搜索选项
pub mod account;
pub mod search_query;
