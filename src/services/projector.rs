// ============================================================================
// 结果投影：表格查询结果 → 键值记录 → 类型化实体
// ============================================================================
//
// 这里是原始行数据进入领域类型的唯一边界。
// 多值字段（如 beverageTypes）在库中以 JSON 数组文本存储，编解码也集中在此。

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::database::QueryResult;
use crate::utils::error::{AppError, AppResult};

/// 以列名为键的单行记录
pub type Record = Map<String, Value>;

/// 把表格结果按列名逐行压缩成记录序列
///
/// 结果为空或不存在时返回空序列，从不报错。
/// 行值少于列数时缺失的列记为 null，多出的值被忽略。
pub fn project(result: Option<&QueryResult>) -> Vec<Record> {
    let Some(result) = result else {
        return Vec::new();
    };

    result
        .values
        .iter()
        .map(|row| {
            result
                .columns
                .iter()
                .enumerate()
                .map(|(idx, column)| (column.clone(), row.get(idx).cloned().unwrap_or(Value::Null)))
                .collect()
        })
        .collect()
}

/// 把记录反序列化为原始行结构
pub fn decode_record<R: DeserializeOwned>(record: Record) -> AppResult<R> {
    serde_json::from_value(Value::Object(record))
        .map_err(|e| AppError::CorruptRecord(format!("无法解析记录: {}", e)))
}

// ============================================================================
// 字符串列表编解码
// ============================================================================

/// 列表编码为 JSON 数组文本
pub fn encode_list(items: &[String]) -> AppResult<String> {
    serde_json::to_string(items)
        .map_err(|e| AppError::CorruptRecord(format!("无法序列化列表: {}", e)))
}

/// 解码存储的 JSON 数组文本
///
/// NULL 解码为 None；存储值必须是字符串数组，裸标量视为数据损坏。
pub fn decode_list(column: &str, stored: Option<&str>) -> AppResult<Option<Vec<String>>> {
    let Some(text) = stored else {
        return Ok(None);
    };

    serde_json::from_str::<Vec<String>>(text)
        .map(Some)
        .map_err(|_| {
            AppError::CorruptRecord(format!("{} 不是字符串数组：{}", column, text))
        })
}

/// 解码存储的 0/1 标志位，NULL 取列默认值
pub fn decode_flag(column: &str, stored: Option<i64>, default: bool) -> AppResult<bool> {
    match stored {
        None => Ok(default),
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        Some(other) => Err(AppError::CorruptRecord(format!(
            "{} 必须是 0 或 1，实际为 {}",
            column, other
        ))),
    }
}
