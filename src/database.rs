// ============================================================================
// 数据库模块：SQLite 持久化层
// 使用 rusqlite 直接操作 SQLite，不引入 ORM
// 表结构只声明主键 / 外键，字段约束全部由 services 层在代码中校验
// ============================================================================

use crate::utils::error::{AppError, AppResult};
use rusqlite::backup::Backup;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Params};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 数据目录下的数据库文件名
pub const DB_FILE_NAME: &str = "brewcode.db";

/// 备份时每步复制的页数（-1 表示一次复制全部）
const BACKUP_PAGES_PER_STEP: i32 = -1;

// ============================================================================
// 查询结果
// ============================================================================

/// 表格形式的查询结果：列名 + 按列顺序排列的行值
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Value>>,
}

// ============================================================================
// 数据库管理器
// ============================================================================

/// 数据库管理器，封装 rusqlite 连接
pub struct Database {
    /// SQLite 数据库连接
    conn: Connection,
}

impl Database {
    /// 初始化数据库：在指定目录创建数据库文件并建表
    ///
    /// # 参数
    /// - `app_data_dir`: 应用数据目录路径
    pub fn init(app_data_dir: &Path) -> AppResult<Self> {
        // 确保数据目录存在
        std::fs::create_dir_all(app_data_dir)?;

        let db_path = app_data_dir.join(DB_FILE_NAME);
        let conn = Connection::open(&db_path)?;
        Self::prepare(conn)
    }

    /// 创建内存中的工作数据库（用户通过"保存"写入文件）
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::prepare(conn)
    }

    /// 从数据库文件加载到新的内存工作库
    ///
    /// 整库复制（包括本程序不认识的表），之后补建缺失的已知表。
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.is_file() {
            return Err(AppError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("数据库文件不存在：{}", path.display()),
            )));
        }

        let source = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let mut conn = Connection::open_in_memory()?;
        copy_database(&source, &mut conn)?;
        Self::prepare(conn)
    }

    /// 把整个数据库写入指定文件，已存在的文件会被覆盖
    ///
    /// 先写入同目录下的临时文件，成功后再替换目标文件；
    /// 写入失败时原文件保持不变。
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp = temp_path(path);
        if tmp.exists() {
            std::fs::remove_file(&tmp)?;
        }

        let written = Connection::open(&tmp)
            .map_err(AppError::from)
            .and_then(|mut target| {
                copy_database(&self.conn, &mut target)?;
                // 关闭连接后再替换，确保内容已落盘
                target.close().map_err(|(_, e)| AppError::from(e))
            })
            .and_then(|()| std::fs::rename(&tmp, path).map_err(AppError::from));

        if written.is_err() && tmp.exists() {
            // 清理临时文件失败不影响返回原始错误
            let _ = std::fs::remove_file(&tmp);
        }
        written
    }

    /// 启用外键并建表
    fn prepare(conn: Connection) -> AppResult<Self> {
        // SQLite 默认关闭外键支持
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Self::create_tables(&conn)?;
        Ok(Database { conn })
    }

    /// 创建所有数据库表（如果不存在）
    fn create_tables(conn: &Connection) -> AppResult<()> {
        conn.execute_batch(
            "
            -- 原料分类表
            CREATE TABLE IF NOT EXISTS itemCategories (
                categoryID INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                description TEXT,
                isActive INTEGER DEFAULT 1
            );

            -- 原料类型表（beverageTypes 为 JSON 数组文本）
            CREATE TABLE IF NOT EXISTS ingredientTypes (
                ingredientTypeID INTEGER PRIMARY KEY AUTOINCREMENT,
                categoryID INTEGER,
                name TEXT,
                description TEXT,
                beverageTypes TEXT,
                isPrimaryRequired INTEGER DEFAULT 0,
                isActive INTEGER DEFAULT 1,
                FOREIGN KEY (categoryID) REFERENCES itemCategories(categoryID)
            );

            -- 设备表
            CREATE TABLE IF NOT EXISTS equipment (
                equipmentID INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                type TEXT,
                capacity REAL,
                capacityUnit TEXT,
                notes TEXT,
                isActive INTEGER DEFAULT 1
            );
            ",
        )?;

        Ok(())
    }

    /// 获取数据库连接的引用（供 services 层使用）
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// 执行查询并返回表格形式的结果
    ///
    /// # 返回
    /// - `Ok(Some(QueryResult))`: 至少有一行匹配
    /// - `Ok(None)`: 没有匹配的行
    pub fn query<P: Params>(&self, sql: &str, params: P) -> AppResult<Option<QueryResult>> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = stmt.query(params)?;
        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(columns.len());
            for idx in 0..columns.len() {
                cells.push(json_cell(row.get_ref(idx)?));
            }
            values.push(cells);
        }

        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(QueryResult { columns, values }))
    }
}

/// 使用 SQLite 在线备份接口整库复制
fn copy_database(source: &Connection, target: &mut Connection) -> AppResult<()> {
    let backup = Backup::new(source, target)?;
    backup.run_to_completion(BACKUP_PAGES_PER_STEP, Duration::ZERO, None)?;
    Ok(())
}

/// 保存时使用的临时文件：目标文件名追加 `.tmp`，与目标位于同一目录
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// SQLite 单元格转换为 JSON 值
fn json_cell(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}

// ============================================================================
// 单元测试
// ============================================================================
