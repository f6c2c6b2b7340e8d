// ============================================================================
// 前端桥接层
// 作为界面与 services 层之间的薄接口层，仅负责：
// 1. 接收前端参数（JSON）
// 2. 从 AppState 获取 Database 实例
// 3. 调用实体管理器
// 4. 把 AppError 转为字符串返回
// ⛔ 禁止：包含业务逻辑
// 宿主桌面壳负责 #[tauri::command] 注册和 State<'_, AppState> 注入
// ============================================================================

pub mod database_file;
pub mod db_crud;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::database::Database;
use crate::utils::error::AppResult;

/// 应用共享状态
pub struct AppState {
    /// 工作数据库
    pub db: Mutex<Database>,
    /// 最近一次保存 / 打开的数据库文件路径
    pub current_db_path: Mutex<Option<PathBuf>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState {
            db: Mutex::new(db),
            current_db_path: Mutex::new(None),
        }
    }

    /// 以空的内存工作库启动
    pub fn in_memory() -> AppResult<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    /// 以应用数据目录下的持久工作库启动
    pub fn open(app_data_dir: &Path) -> AppResult<Self> {
        Ok(Self::new(Database::init(app_data_dir)?))
    }

    fn lock_db(&self) -> Result<MutexGuard<'_, Database>, String> {
        self.db
            .lock()
            .map_err(|_| "数据库访问失败：无法获取锁".to_string())
    }

    fn lock_path(&self) -> Result<MutexGuard<'_, Option<PathBuf>>, String> {
        self.current_db_path
            .lock()
            .map_err(|_| "数据库路径访问失败：无法获取锁".to_string())
    }

    /// 在持有数据库锁期间执行操作，错误转换为字符串
    fn with_db<T>(&self, f: impl FnOnce(&Database) -> AppResult<T>) -> Result<T, String> {
        let db = self.lock_db()?;
        f(&db).map_err(String::from)
    }
}
