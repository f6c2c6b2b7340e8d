// ============================================================================
// 业务层：纯 Rust 核心逻辑
// ✅ 特点：只依赖 Database 与 rusqlite，方便写 #[test]
// ⛔ 禁止：直接返回前端专用的错误格式
// ============================================================================

// 通用能力
pub mod entity;
pub mod projector;
pub mod query_filter;
pub mod referential;
pub mod schema;
pub mod status;
pub mod validation;

// 实体管理器
pub mod categories;
pub mod equipment;
pub mod ingredient_types;
