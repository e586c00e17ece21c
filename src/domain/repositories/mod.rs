// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据访问的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 账户仓库（account_repository）：本地/远程账户查找、批量加载和关系型检索
/// - 关注关系仓库（relationship_repository）：查看者的关注ID集合
///
/// 账户搜索是纯读取路径，这些接口都不提供写操作。
pub mod account_repository;
pub mod relationship_repository;
