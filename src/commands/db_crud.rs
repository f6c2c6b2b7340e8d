// ============================================================================
// 实体 CRUD Commands
// 每个实体五个操作：create / get / get_all / update / set_status
// 宿主桌面壳用 #[tauri::command] 包装这些函数，并从 State<'_, AppState>
// 取出状态后传入；参数与返回值保持 IPC 可序列化
// ============================================================================

use serde_json::Value;

use super::AppState;
use crate::models::dtos::{Category, Equipment, IngredientType, StatusResult, UpdateResult};
use crate::services::categories::CategoryManager;
use crate::services::entity::EntityManager;
use crate::services::equipment::EquipmentManager;
use crate::services::ingredient_types::IngredientTypeManager;
use crate::services::status::Deactivatable;

// ============================================================================
// 原料类型 Commands
// ============================================================================

/// 创建原料类型
pub fn db_create_ingredient_type(state: &AppState, data: Value) -> Result<IngredientType, String> {
    state.with_db(|db| IngredientTypeManager::new(db).create(&data))
}

/// 按 ID 查询原料类型
pub fn db_get_ingredient_type(state: &AppState, id: i64) -> Result<Option<IngredientType>, String> {
    state.with_db(|db| IngredientTypeManager::new(db).get(id))
}

/// 查询原料类型列表
pub fn db_list_ingredient_types(
    state: &AppState,
    filters: Option<Value>,
) -> Result<Vec<IngredientType>, String> {
    state.with_db(|db| IngredientTypeManager::new(db).get_all(filters.as_ref()))
}

/// 部分更新原料类型
pub fn db_update_ingredient_type(
    state: &AppState,
    id: i64,
    updates: Value,
) -> Result<UpdateResult, String> {
    state.with_db(|db| IngredientTypeManager::new(db).update(id, &updates))
}

/// 启用 / 停用原料类型
pub fn db_set_ingredient_type_status(
    state: &AppState,
    id: i64,
    is_active: i64,
) -> Result<StatusResult, String> {
    state.with_db(|db| IngredientTypeManager::new(db).set_status(id, is_active))
}

// ============================================================================
// 分类 Commands
// ============================================================================

/// 创建分类
pub fn db_create_category(state: &AppState, data: Value) -> Result<Category, String> {
    state.with_db(|db| CategoryManager::new(db).create(&data))
}

/// 按 ID 查询分类
pub fn db_get_category(state: &AppState, id: i64) -> Result<Option<Category>, String> {
    state.with_db(|db| CategoryManager::new(db).get(id))
}

/// 查询分类列表
pub fn db_list_categories(state: &AppState, filters: Option<Value>) -> Result<Vec<Category>, String> {
    state.with_db(|db| CategoryManager::new(db).get_all(filters.as_ref()))
}

/// 部分更新分类
pub fn db_update_category(state: &AppState, id: i64, updates: Value) -> Result<UpdateResult, String> {
    state.with_db(|db| CategoryManager::new(db).update(id, &updates))
}

/// 启用 / 停用分类
pub fn db_set_category_status(
    state: &AppState,
    id: i64,
    is_active: i64,
) -> Result<StatusResult, String> {
    state.with_db(|db| CategoryManager::new(db).set_status(id, is_active))
}

// ============================================================================
// 设备 Commands
// ============================================================================

/// 创建设备
pub fn db_create_equipment(state: &AppState, data: Value) -> Result<Equipment, String> {
    state.with_db(|db| EquipmentManager::new(db).create(&data))
}

/// 按 ID 查询设备
pub fn db_get_equipment(state: &AppState, id: i64) -> Result<Option<Equipment>, String> {
    state.with_db(|db| EquipmentManager::new(db).get(id))
}

/// 查询设备列表
pub fn db_list_equipment(state: &AppState, filters: Option<Value>) -> Result<Vec<Equipment>, String> {
    state.with_db(|db| EquipmentManager::new(db).get_all(filters.as_ref()))
}

/// 部分更新设备
pub fn db_update_equipment(
    state: &AppState,
    id: i64,
    updates: Value,
) -> Result<UpdateResult, String> {
    state.with_db(|db| EquipmentManager::new(db).update(id, &updates))
}

/// 启用 / 停用设备
pub fn db_set_equipment_status(
    state: &AppState,
    id: i64,
    is_active: i64,
) -> Result<StatusResult, String> {
    state.with_db(|db| EquipmentManager::new(db).set_status(id, is_active))
}
