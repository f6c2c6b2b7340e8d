// ============================================================================
// [总线] 程序的组装车间
// ✅ 只能做：pub mod 暴露子模块、重导出对外入口
// ⛔ 禁止：直接实现 command 函数
// ============================================================================

pub mod commands;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

pub use commands::AppState;
pub use database::Database;
pub use services::entity::EntityManager;
pub use services::status::Deactivatable;
pub use utils::error::{AppError, AppResult};
