// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 检索后端模块
///
/// 提供排序检索的两种实现
/// 包括Elasticsearch兼容的索引后端和基于SeaORM的关系型后端
/// 以及启动时选择后端的工厂
pub mod factory;
pub mod index_backend;
pub mod relational_backend;

pub use factory::{create_backend, BackendKind};
