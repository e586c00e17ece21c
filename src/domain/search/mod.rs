// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索领域模块
///
/// 定义排序检索后端的接口和错误类型
/// 索引引擎和关系型数据库两种后端都实现同一个 `SearchBackend` 特质
pub mod backend;
