// ============================================================================
// 统一错误类型定义
// 使用 thiserror 派生宏，所有实体管理操作都返回 AppResult
// ============================================================================

use thiserror::Error;

/// 应用统一错误枚举
///
/// 校验类错误（ValidationError / ReferentialIntegrityError）总是在任何写语句
/// 执行之前返回，因此被拒绝的输入不会留下部分写入。
/// 通过 `impl From<AppError> for String` 保持与前端桥接层的兼容性。
#[derive(Debug, Error)]
pub enum AppError {
    /// 参数验证失败（如名称为空、标志位不是 0/1），消息中包含字段名
    #[error("验证失败：{0}")]
    ValidationError(String),

    /// 外键指向的记录不存在
    #[error("引用完整性错误：{entity} {id} 不存在")]
    ReferentialIntegrityError { entity: &'static str, id: i64 },

    /// 目标记录不存在（仅用于 update / setStatus，get 返回 None）
    #[error("未找到：{entity} {id} 不存在")]
    NotFound { entity: &'static str, id: i64 },

    /// 底层 SQLite 拒绝执行语句
    #[error("数据库操作失败：{0}")]
    PersistenceError(#[from] rusqlite::Error),

    /// 已存储的数据不符合解码约定（如 beverageTypes 不是字符串数组）
    #[error("数据格式错误：{0}")]
    CorruptRecord(String),

    /// 文件系统 IO 错误（保存 / 打开数据库文件）
    #[error("IO 错误：{0}")]
    IoError(#[from] std::io::Error),
}

/// 便捷类型别名，统一项目内的 Result 签名
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// 构造验证错误的简写
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }
}

/// 将 AppError 转换为 String，前端桥接层只接收字符串错误
impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.to_string()
    }
}
