// ============================================================================
// 数据传输对象（DTO）定义
// 前后端通信的数据结构，仅包含字段定义和序列化派生
// 字段名沿用数据库列名（camelCase），标志位序列化为整数 0/1
// ⛔ 禁止：包含复杂的业务逻辑方法
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// 实体记录
// ============================================================================

/// 原料类型：配方引用的可复用模板（如 "Apple Juice"），区别于具体采购的原料
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngredientType {
    #[serde(rename = "ingredientTypeID")]
    pub id: i64,
    #[serde(rename = "categoryID")]
    pub category_id: i64,
    /// 所属分类名称（只读，来自关联查询）
    pub category_name: Option<String>,
    pub name: String,
    pub description: Option<String>,
    /// 适用的饮品类型标签（如 "Cider"、"Mead"），未设置时为 None
    pub beverage_types: Option<Vec<String>>,
    #[serde(with = "flag")]
    pub is_primary_required: bool,
    #[serde(with = "flag")]
    pub is_active: bool,
}

/// 原料分类
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "categoryID")]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "flag")]
    pub is_active: bool,
}

/// 酿造设备
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(rename = "equipmentID")]
    pub id: i64,
    pub name: String,
    /// 设备类型（如 "Fermenter"）
    #[serde(rename = "type")]
    pub kind: String,
    pub capacity: Option<f64>,
    /// 容量单位，原样保存，不做换算
    pub capacity_unit: Option<String>,
    pub notes: Option<String>,
    #[serde(with = "flag")]
    pub is_active: bool,
}

// ============================================================================
// 写操作结果
// ============================================================================

/// 部分更新中实际写入的单个字段
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedField {
    pub field: String,
    /// 规范化后的新值（字符串已去除首尾空白，列表为数组）
    pub new_value: Value,
}

/// update 的返回结果，是唯一的写确认契约
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub success: bool,
    pub message: String,
    pub updated_fields: Vec<UpdatedField>,
    /// 不在白名单中、被丢弃的字段
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored_fields: Vec<String>,
}

/// setStatus 的返回结果
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StatusResult {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// 数据库文件操作
// ============================================================================

/// 保存 / 导出数据库文件的结果
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SaveResponse {
    pub success: bool,
    pub path: Option<String>,
    pub error: Option<String>,
}

/// 当前数据库文件路径
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DbPathResponse {
    pub path: Option<String>,
}

// ============================================================================
// 0/1 标志位的序列化
// ============================================================================

/// 布尔字段与整数 0/1 之间的转换，对外保持与存储一致的整数形式
pub mod flag {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match i64::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(de::Error::custom(format!("标志位必须是 0 或 1，实际为 {}", other))),
        }
    }
}
