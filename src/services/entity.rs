// ============================================================================
// 实体管理通用引擎
// ============================================================================
//
// 各实体管理器共用：按主键读取、带过滤条件的列表、插入、部分更新。
// 实体只需声明表、SELECT 语句和原始行结构，校验规则由各自的管理器提供。

use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::database::Database;
use crate::models::dtos::{UpdateResult, UpdatedField};
use crate::services::projector::{decode_record, project};
use crate::services::query_filter::QueryFilter;
use crate::services::referential;
use crate::services::schema::{Table, UpdatableField};
use crate::services::status::Deactivatable;
use crate::services::validation::{as_object, require_positive_id};
use crate::utils::error::{AppError, AppResult};
use crate::utils::logger::Logger;

// ============================================================================
// 实体描述与管理器接口
// ============================================================================

/// 可由通用引擎读取的目录型实体
pub trait CatalogEntity: Sized {
    const TABLE: Table;

    /// 读取语句，主表别名固定为 `t`，列别名与 `Row` 的字段一致
    const SELECT: &'static str;

    /// 数据库原始行
    type Row: DeserializeOwned;

    /// 原始行转换为领域类型（解码多值字段和标志位）
    fn from_row(row: Self::Row) -> AppResult<Self>;
}

/// 单个实体类型的管理器
pub trait EntityManager: Deactivatable {
    type Entity;

    /// 校验并创建，返回完整记录
    fn create(&self, data: &Value) -> AppResult<Self::Entity>;

    /// 按主键读取，不存在时返回 None
    fn get(&self, id: i64) -> AppResult<Option<Self::Entity>>;

    /// 按过滤条件列出，结果按 name 升序
    fn get_all(&self, filters: Option<&Value>) -> AppResult<Vec<Self::Entity>>;

    /// 部分更新白名单中的字段
    fn update(&self, id: i64, updates: &Value) -> AppResult<UpdateResult>;
}

// ============================================================================
// 读取
// ============================================================================

/// 按主键读取实体
pub fn fetch_by_id<E: CatalogEntity>(db: &Database, id: i64) -> AppResult<Option<E>> {
    require_positive_id(E::TABLE.id_column(), id)?;
    let sql = format!("{} WHERE t.{} = ?1", E::SELECT, E::TABLE.id_column());
    let result = db.query(&sql, params![id])?;

    project(result.as_ref())
        .into_iter()
        .next()
        .map(|record| decode_record::<E::Row>(record).and_then(E::from_row))
        .transpose()
}

/// 按过滤条件读取实体列表，按 name 升序（数据库默认排序规则）
pub fn fetch_all<E: CatalogEntity>(db: &Database, filter: &QueryFilter) -> AppResult<Vec<E>> {
    let sql = format!(
        "{}{} ORDER BY t.name, t.{}",
        E::SELECT,
        filter.where_clause(),
        E::TABLE.id_column()
    );
    let result = db.query(&sql, params_from_iter(filter.params()))?;

    project(result.as_ref())
        .into_iter()
        .map(|record| decode_record::<E::Row>(record).and_then(E::from_row))
        .collect()
}

/// 读取刚写入的记录，不存在说明数据库状态异常
pub fn fetch_existing<E: CatalogEntity>(db: &Database, id: i64) -> AppResult<E> {
    fetch_by_id(db, id)?.ok_or_else(|| {
        AppError::CorruptRecord(format!(
            "无法读取新记录：{} {}",
            E::TABLE.entity(),
            id
        ))
    })
}

// ============================================================================
// 写入
// ============================================================================

/// 单列赋值：写入的 SQL 值 + 返回给调用方的规范化新值
#[derive(Debug, Clone)]
pub struct Assignment {
    pub column: &'static str,
    pub value: SqlValue,
    pub new_value: Value,
}

impl Assignment {
    pub fn new(column: &'static str, value: SqlValue, new_value: Value) -> Self {
        Assignment {
            column,
            value,
            new_value,
        }
    }

    /// 整数列
    pub fn integer(column: &'static str, value: i64) -> Self {
        Self::new(column, SqlValue::Integer(value), Value::from(value))
    }

    /// 可空文本列
    pub fn text(column: &'static str, value: Option<String>) -> Self {
        match value {
            Some(s) => Self::new(column, SqlValue::Text(s.clone()), Value::String(s)),
            None => Self::new(column, SqlValue::Null, Value::Null),
        }
    }

    /// 可空实数列
    pub fn real(column: &'static str, value: Option<f64>) -> Self {
        match value {
            Some(f) => Self::new(column, SqlValue::Real(f), Value::from(f)),
            None => Self::new(column, SqlValue::Null, Value::Null),
        }
    }
}

/// 插入一行，返回生成的主键
pub fn insert(conn: &Connection, table: Table, assignments: &[Assignment]) -> AppResult<i64> {
    let columns: Vec<&str> = assignments.iter().map(|a| a.column).collect();
    let placeholders: Vec<String> = (1..=assignments.len()).map(|i| format!("?{}", i)).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.name(),
        columns.join(", "),
        placeholders.join(", ")
    );

    conn.execute(&sql, params_from_iter(assignments.iter().map(|a| &a.value)))?;
    Ok(conn.last_insert_rowid())
}

/// 单条 UPDATE 语句只写入给定的列
pub fn apply_update(
    conn: &Connection,
    table: Table,
    id: i64,
    assignments: &[Assignment],
) -> AppResult<()> {
    let sets: Vec<String> = assignments
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{} = ?{}", a.column, i + 1))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?{}",
        table.name(),
        sets.join(", "),
        table.id_column(),
        assignments.len() + 1
    );

    let id_value = SqlValue::Integer(id);
    let mut values: Vec<&SqlValue> = assignments.iter().map(|a| &a.value).collect();
    values.push(&id_value);
    conn.execute(&sql, params_from_iter(values))?;
    Ok(())
}

// ============================================================================
// 部分更新
// ============================================================================

/// 按白名单划分后的更新输入
#[derive(Debug)]
pub struct Partition<'a, F> {
    /// 白名单内的字段，按 `F::ALL` 的顺序
    pub allowed: Vec<(F, &'a Value)>,
    /// 白名单外的键名
    pub rejected: Vec<String>,
}

/// 把输入键划分为允许 / 拒绝两组
pub fn partition<F: UpdatableField>(updates: &Map<String, Value>) -> Partition<'_, F> {
    let allowed = F::ALL
        .iter()
        .filter_map(|field| updates.get(field.column()).map(|v| (*field, v)))
        .collect();
    let rejected = updates
        .keys()
        .filter(|key| F::from_key(key).is_none())
        .cloned()
        .collect();
    Partition { allowed, rejected }
}

/// 部分更新流程
///
/// 1. 目标记录必须存在
/// 2. 白名单内的字段逐个交给 `assign` 校验并转换（含外键检查）
/// 3. 白名单外的字段丢弃并记录警告
/// 4. 没有剩余字段时报错，否则用一条 UPDATE 写入
///
/// 任何校验失败都发生在写入之前。
pub fn partial_update<F, A>(
    db: &Database,
    logger: &Logger,
    table: Table,
    id: i64,
    updates: &Value,
    mut assign: A,
) -> AppResult<UpdateResult>
where
    F: UpdatableField,
    A: FnMut(F, &Value) -> AppResult<Assignment>,
{
    require_positive_id(table.id_column(), id)?;
    let updates = as_object(updates, "updates")?;

    if !referential::exists(db.conn(), table, id)? {
        return Err(AppError::NotFound {
            entity: table.entity(),
            id,
        });
    }

    let Partition { allowed, rejected } = partition::<F>(updates);
    let assignments = allowed
        .into_iter()
        .map(|(field, value)| assign(field, value))
        .collect::<AppResult<Vec<_>>>()?;

    if !rejected.is_empty() {
        logger.warn(format_args!(
            "{} {} 更新时忽略不允许修改的字段: {}",
            table.entity(),
            id,
            rejected.join(", ")
        ));
    }

    if assignments.is_empty() {
        return Err(AppError::validation("没有可更新的有效字段"));
    }

    apply_update(db.conn(), table, id, &assignments)?;

    let updated_fields: Vec<UpdatedField> = assignments
        .into_iter()
        .map(|a| UpdatedField {
            field: a.column.to_string(),
            new_value: a.new_value,
        })
        .collect();
    let names: Vec<&str> = updated_fields.iter().map(|f| f.field.as_str()).collect();
    logger.info(format_args!(
        "{} {} 已更新: {}",
        table.entity(),
        id,
        names.join(", ")
    ));

    let mut message = format!("{}已更新：{}", table.entity(), names.join(", "));
    if !rejected.is_empty() {
        message.push_str(&format!("（已忽略：{}）", rejected.join(", ")));
    }

    Ok(UpdateResult {
        success: true,
        message,
        updated_fields,
        ignored_fields: rejected,
    })
}
