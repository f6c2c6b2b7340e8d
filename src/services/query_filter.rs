// ============================================================================
// 列表过滤条件 → 参数化 SQL
// ============================================================================
//
// 列名只来自各实体声明的 FilterSpec，值一律通过占位符绑定。
// 所有过滤值先全部校验，任何一个不合法都会让整个查询失败，不做部分过滤。

use rusqlite::types::Value as SqlValue;
use serde_json::Value;

use crate::services::validation::{as_object, flag, non_empty_text, positive_id};
use crate::utils::error::AppResult;
use crate::utils::logger::Logger;

/// 过滤值的类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// 正整数精确匹配
    Id,
    /// 0 / 1 标志位精确匹配
    Flag,
    /// 非空字符串精确匹配
    Text,
    /// JSON 数组列包含该元素（整元素匹配，不是子串匹配）
    ArrayElement,
}

/// 实体支持的单个过滤键
#[derive(Clone, Copy, Debug)]
pub struct FilterSpec {
    /// 输入中的键名
    pub key: &'static str,
    /// 带表别名的列名
    pub column: &'static str,
    pub kind: FilterKind,
}

/// 以 AND 组合的 WHERE 条件及其绑定参数
#[derive(Debug, Default)]
pub struct QueryFilter {
    clauses: Vec<String>,
    params: Vec<SqlValue>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 下一个占位符编号（从 1 开始）
    fn placeholder(&self) -> usize {
        self.params.len() + 1
    }

    /// 列值相等
    pub fn equals(&mut self, column: &'static str, value: impl Into<SqlValue>) -> &mut Self {
        self.clauses
            .push(format!("{} = ?{}", column, self.placeholder()));
        self.params.push(value.into());
        self
    }

    /// JSON 数组列中存在与 element 完全相等的元素
    pub fn json_array_contains(&mut self, column: &'static str, element: String) -> &mut Self {
        self.clauses.push(format!(
            "EXISTS (SELECT 1 FROM json_each({}) WHERE json_each.value = ?{})",
            column,
            self.placeholder()
        ));
        self.params.push(SqlValue::Text(element));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// WHERE 子句（无条件时为空字符串）
    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            return String::new();
        }
        format!(" WHERE {}", self.clauses.join(" AND "))
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }
}

/// 按实体声明的过滤键把输入对象翻译为 QueryFilter
///
/// - 输入为空或 null：无过滤条件（全表）
/// - 未声明的键：忽略并记录 debug 日志
/// - 值为 null：视为未提供
pub fn build_filter(
    filters: Option<&Value>,
    specs: &[FilterSpec],
    logger: &Logger,
) -> AppResult<QueryFilter> {
    let mut query = QueryFilter::new();
    let Some(filters) = filters.filter(|f| !f.is_null()) else {
        return Ok(query);
    };

    for (key, value) in as_object(filters, "filters")? {
        let Some(spec) = specs.iter().find(|s| s.key == key.as_str()) else {
            logger.debug(format_args!("忽略不支持的过滤条件: {}", key));
            continue;
        };
        if value.is_null() {
            continue;
        }

        match spec.kind {
            FilterKind::Id => {
                query.equals(spec.column, positive_id(spec.key, value)?);
            }
            FilterKind::Flag => {
                query.equals(spec.column, i64::from(flag(spec.key, value)?));
            }
            FilterKind::Text => {
                query.equals(spec.column, non_empty_text(spec.key, value)?);
            }
            FilterKind::ArrayElement => {
                query.json_array_contains(spec.column, non_empty_text(spec.key, value)?);
            }
        }
    }

    Ok(query)
}
