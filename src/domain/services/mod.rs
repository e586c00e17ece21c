// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 账户搜索的核心流程，按调用顺序：
/// - 查询规范化（query_normalizer、domain_locality）
/// - 精确匹配（exact_match_resolver、remote_account_resolver）
/// - 相关性评分（relevance_scorer）
/// - 结果合并（result_assembler）
/// - 编排入口（account_search_service）
pub mod account_search_service;
pub mod domain_locality;
pub mod exact_match_resolver;
pub mod query_normalizer;
pub mod relevance_scorer;
pub mod remote_account_resolver;
pub mod result_assembler;
