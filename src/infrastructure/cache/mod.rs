// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 缓存模块
///
/// 提供远程账户查找的缓存实现
/// 包括内存/Redis缓存策略、Redis客户端和带缓存的账户仓库
pub mod cache_strategy;
pub mod cached_account_repository;
pub mod redis_client;
