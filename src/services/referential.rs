// ============================================================================
// 引用完整性检查
// 外键存在性在代码中校验，写入前调用
// ============================================================================

use rusqlite::{params, Connection, OptionalExtension};

use crate::services::schema::Table;
use crate::utils::error::{AppError, AppResult};

/// 判断指定表中是否存在该主键
pub fn exists(conn: &Connection, table: Table, id: i64) -> AppResult<bool> {
    let sql = format!(
        "SELECT 1 FROM {} WHERE {} = ?1",
        table.name(),
        table.id_column()
    );
    let found = conn
        .query_row(&sql, params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

/// 外键值必须在所属表中存在，否则返回引用完整性错误
pub fn ensure_exists(conn: &Connection, owner: Table, id: i64) -> AppResult<()> {
    if exists(conn, owner, id)? {
        return Ok(());
    }
    Err(AppError::ReferentialIntegrityError {
        entity: owner.entity(),
        id,
    })
}
