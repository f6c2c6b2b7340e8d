// ============================================================================
// 启用状态管理（软删除）
// ============================================================================
//
// 任何带 isActive 列的实体共用同一套切换逻辑：
// 目标状态与当前状态相同时不执行写操作，但仍返回成功（幂等）。
// 记录永远不会被物理删除。

use rusqlite::{params, Connection, OptionalExtension};

use crate::models::dtos::StatusResult;
use crate::services::schema::Table;
use crate::services::validation::require_positive_id;
use crate::utils::error::{AppError, AppResult};
use crate::utils::logger::Logger;

/// 状态标签
fn state_label(active: bool) -> &'static str {
    if active {
        "启用"
    } else {
        "停用"
    }
}

/// 设置实体的启用状态
///
/// # 参数
/// - `table`: 目标表（封闭枚举，表名 / 主键列名来自表结构描述）
/// - `id`: 实体主键
/// - `is_active`: 目标状态，必须是 0 或 1
pub fn set_status(
    conn: &Connection,
    logger: &Logger,
    table: Table,
    id: i64,
    is_active: i64,
) -> AppResult<StatusResult> {
    if is_active != 0 && is_active != 1 {
        return Err(AppError::validation("isActive 必须是 0 或 1"));
    }
    require_positive_id(table.id_column(), id)?;
    let target = is_active == 1;

    let current: Option<Option<i64>> = conn
        .query_row(
            &format!(
                "SELECT isActive FROM {} WHERE {} = ?1",
                table.name(),
                table.id_column()
            ),
            params![id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(current) = current else {
        return Err(AppError::NotFound {
            entity: table.entity(),
            id,
        });
    };
    // 列默认值为 1，NULL 视为启用
    let current = current.unwrap_or(1) == 1;

    if current == target {
        logger.info(format_args!(
            "{} {} 已处于{}状态，跳过写入",
            table.entity(),
            id,
            state_label(target)
        ));
        return Ok(StatusResult {
            success: true,
            message: format!("{}已处于{}状态", table.entity(), state_label(target)),
        });
    }

    conn.execute(
        &format!(
            "UPDATE {} SET isActive = ?1 WHERE {} = ?2",
            table.name(),
            table.id_column()
        ),
        params![is_active, id],
    )?;

    logger.info(format_args!(
        "{} {} 已{}",
        table.entity(),
        id,
        state_label(target)
    ));
    Ok(StatusResult {
        success: true,
        message: format!("{}已{}", table.entity(), state_label(target)),
    })
}

/// 可停用的实体管理器
///
/// 实现者只需提供表和连接，切换逻辑由默认方法复用。
pub trait Deactivatable {
    const TABLE: Table;

    fn connection(&self) -> &Connection;

    fn logger(&self) -> &Logger;

    /// 设置启用状态（0 停用 / 1 启用）
    fn set_status(&self, id: i64, is_active: i64) -> AppResult<StatusResult> {
        set_status(self.connection(), self.logger(), Self::TABLE, id, is_active)
    }
}
