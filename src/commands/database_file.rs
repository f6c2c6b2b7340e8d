// ============================================================================
// 数据库文件 Commands
// 负责：另存为 / 保存 / 打开 / 导出，以及当前文件路径查询
// 路径由调用方选择后传入，本层不弹出任何对话框
// ============================================================================

use std::path::{Path, PathBuf};

use log::{info, warn};

use super::AppState;
use crate::database::Database;
use crate::models::dtos::{DbPathResponse, SaveResponse};

fn saved(path: &Path) -> SaveResponse {
    SaveResponse {
        success: true,
        path: Some(path.to_string_lossy().to_string()),
        error: None,
    }
}

fn failed(error: String) -> SaveResponse {
    SaveResponse {
        success: false,
        path: None,
        error: Some(error),
    }
}

/// 把工作库写入文件；写入失败以 `success: false` 返回而非错误
fn write_to(state: &AppState, path: &Path) -> Result<SaveResponse, String> {
    let db = state.lock_db()?;
    match db.save_to(path) {
        Ok(()) => {
            info!("数据库已保存到 {}", path.display());
            Ok(saved(path))
        }
        Err(e) => {
            warn!("保存数据库失败: {} ({})", path.display(), e);
            Ok(failed(format!("写入文件失败：{}", e)))
        }
    }
}

/// 另存为：写入新文件并记住该路径
pub fn save_database_as(state: &AppState, path: PathBuf) -> Result<SaveResponse, String> {
    let response = write_to(state, &path)?;
    if response.success {
        *state.lock_path()? = Some(path);
    }
    Ok(response)
}

/// 保存到当前路径
pub fn save_database(state: &AppState) -> Result<SaveResponse, String> {
    let current = state.lock_path()?.clone();
    match current {
        Some(path) => write_to(state, &path),
        None => Ok(failed("未设置数据库路径，请先使用“另存为”".to_string())),
    }
}

/// 打开数据库文件：替换工作库并记住该路径
///
/// 读取失败时保持原工作库不变。
pub fn open_database(state: &AppState, path: PathBuf) -> Result<(), String> {
    let loaded = Database::load_from(&path).map_err(|e| format!("读取文件失败：{}", e))?;

    *state.lock_db()? = loaded;
    info!("已打开数据库 {}", path.display());
    *state.lock_path()? = Some(path);
    Ok(())
}

/// 导出副本：写入指定文件，不改变当前路径
pub fn export_database(state: &AppState, path: PathBuf) -> Result<SaveResponse, String> {
    write_to(state, &path)
}

/// 当前数据库文件路径
pub fn get_current_db_path(state: &AppState) -> Result<DbPathResponse, String> {
    let current = state.lock_path()?;
    Ok(DbPathResponse {
        path: current.as_ref().map(|p| p.to_string_lossy().to_string()),
    })
}

/// 当前路径上的文件是否存在；未设置路径时为 false
pub fn check_db_exists(state: &AppState) -> Result<bool, String> {
    let current = state.lock_path()?;
    Ok(current.as_ref().is_some_and(|p| p.exists()))
}
