// ============================================================================
// 字段校验规则
// ============================================================================
//
// 每个实体用一组 FieldRule 描述输入形状：是否必填、值的类型 / 取值范围、
// 以及可选的自定义谓词。校验遇到第一个违规字段立即返回，不执行任何写操作。
// 同一组解析函数也用于把已校验的值转换为类型化数据。

use serde_json::{Map, Value};

use crate::utils::error::{AppError, AppResult};

/// 字段是否必须出现
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    /// 必须出现且不能为 null
    Required,
    /// 可以缺省，出现时不能为 null
    Optional,
    /// 可以缺省，也可以显式为 null（用于清空）
    Nullable,
}

/// 字段值的形状检查
#[derive(Clone, Copy, Debug)]
pub enum Check {
    /// 正整数（外键 / 主键）
    PositiveInteger,
    /// 去除首尾空白后非空的字符串
    NonEmptyString,
    /// 任意字符串
    Text,
    /// 字符串数组，元素去除空白后不能为空
    StringArray,
    /// 整数标志位 0 / 1
    Flag,
    /// 大于 0 的数字
    PositiveNumber,
    /// 自定义谓词，`expectation` 描述期望的值
    Custom {
        predicate: fn(&Value) -> bool,
        expectation: &'static str,
    },
}

impl Check {
    fn verify(self, field: &str, value: &Value) -> AppResult<()> {
        match self {
            Check::PositiveInteger => positive_id(field, value).map(|_| ()),
            Check::NonEmptyString => non_empty_text(field, value).map(|_| ()),
            Check::Text => text(field, value).map(|_| ()),
            Check::StringArray => string_list(field, value).map(|_| ()),
            Check::Flag => flag(field, value).map(|_| ()),
            Check::PositiveNumber => positive_number(field, value).map(|_| ()),
            Check::Custom {
                predicate,
                expectation,
            } => {
                if predicate(value) {
                    Ok(())
                } else {
                    Err(AppError::validation(format!(
                        "{} 必须是{}",
                        field, expectation
                    )))
                }
            }
        }
    }
}

/// 单个字段的校验规则
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub presence: Presence,
    pub check: Check,
}

impl FieldRule {
    pub const fn required(field: &'static str, check: Check) -> Self {
        FieldRule {
            field,
            presence: Presence::Required,
            check,
        }
    }

    pub const fn optional(field: &'static str, check: Check) -> Self {
        FieldRule {
            field,
            presence: Presence::Optional,
            check,
        }
    }

    pub const fn nullable(field: &'static str, check: Check) -> Self {
        FieldRule {
            field,
            presence: Presence::Nullable,
            check,
        }
    }

    /// 校验单个值（字段已出现时）
    pub fn check_value(&self, value: &Value) -> AppResult<()> {
        if value.is_null() {
            return match self.presence {
                Presence::Nullable => Ok(()),
                Presence::Required => Err(AppError::validation(format!(
                    "{} 为必填字段",
                    self.field
                ))),
                Presence::Optional => Err(AppError::validation(format!(
                    "{} 不能为 null",
                    self.field
                ))),
            };
        }
        self.check.verify(self.field, value)
    }
}

/// 按规则顺序校验输入对象，遇到第一个违规字段立即返回
pub fn validate(data: &Map<String, Value>, rules: &[FieldRule]) -> AppResult<()> {
    for rule in rules {
        match data.get(rule.field) {
            Some(value) => rule.check_value(value)?,
            None if rule.presence == Presence::Required => {
                return Err(AppError::validation(format!(
                    "{} 为必填字段",
                    rule.field
                )));
            }
            None => {}
        }
    }
    Ok(())
}

/// 输入必须是 JSON 对象
pub fn as_object<'a>(data: &'a Value, what: &str) -> AppResult<&'a Map<String, Value>> {
    data.as_object()
        .ok_or_else(|| AppError::validation(format!("{} 必须是对象", what)))
}

/// 取出必填字段的值
pub fn required_value<'a>(data: &'a Map<String, Value>, field: &str) -> AppResult<&'a Value> {
    data.get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| AppError::validation(format!("{} 为必填字段", field)))
}

/// 主键参数必须为正数
pub fn require_positive_id(field: &str, id: i64) -> AppResult<()> {
    if id <= 0 {
        return Err(AppError::validation(format!("{} 必须是正整数", field)));
    }
    Ok(())
}

// ============================================================================
// 值解析
// ============================================================================

/// 正整数；允许 1.0 这样的整数值浮点数
pub fn positive_id(field: &str, value: &Value) -> AppResult<i64> {
    let id = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    };
    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(AppError::validation(format!("{} 必须是正整数", field))),
    }
}

/// 字符串，去除首尾空白
pub fn text(field: &str, value: &Value) -> AppResult<String> {
    value
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| AppError::validation(format!("{} 必须是字符串", field)))
}

/// 去除首尾空白后非空的字符串
pub fn non_empty_text(field: &str, value: &Value) -> AppResult<String> {
    let s = text(field, value)?;
    if s.is_empty() {
        return Err(AppError::validation(format!("{} 不能为空", field)));
    }
    Ok(s)
}

/// 可空字符串：null 与空白字符串都归一为 None
pub fn optional_text(field: &str, value: Option<&Value>) -> AppResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => {
            let s = text(field, v)?;
            Ok(if s.is_empty() { None } else { Some(s) })
        }
    }
}

/// 字符串集合，元素去除首尾空白，重复元素只保留第一次出现的位置
pub fn string_list(field: &str, value: &Value) -> AppResult<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| AppError::validation(format!("{} 必须是字符串数组", field)))?;

    let mut list: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let s = item
            .as_str()
            .ok_or_else(|| AppError::validation(format!("{} 必须是字符串数组", field)))?
            .trim();
        if s.is_empty() {
            return Err(AppError::validation(format!(
                "{} 不能包含空字符串",
                field
            )));
        }
        if !list.iter().any(|existing| existing == s) {
            list.push(s.to_string());
        }
    }
    Ok(list)
}

/// 可空字符串数组：null 为 None
pub fn optional_string_list(field: &str, value: Option<&Value>) -> AppResult<Option<Vec<String>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => string_list(field, v).map(Some),
    }
}

/// 标志位：只接受数字 0 或 1
pub fn flag(field: &str, value: &Value) -> AppResult<bool> {
    match value.as_f64() {
        Some(f) if f == 0.0 => Ok(false),
        Some(f) if f == 1.0 => Ok(true),
        _ => Err(AppError::validation(format!("{} 必须是 0 或 1", field))),
    }
}

/// 大于 0 的有限数字
pub fn positive_number(field: &str, value: &Value) -> AppResult<f64> {
    match value.as_f64() {
        Some(f) if f.is_finite() && f > 0.0 => Ok(f),
        _ => Err(AppError::validation(format!(
            "{} 必须是大于 0 的数字",
            field
        ))),
    }
}
