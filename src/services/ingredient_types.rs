// ============================================================================
// 原料类型管理
// ============================================================================
//
// 原料类型属于某个分类（categoryID 在每次写入时校验存在性），
// beverageTypes 以 JSON 数组文本存储，读取时还原为数组。

use rusqlite::types::Value as SqlValue;
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::Value;

use crate::database::Database;
use crate::models::dtos::{IngredientType, UpdateResult};
use crate::services::entity::{
    fetch_all, fetch_by_id, fetch_existing, insert, partial_update, Assignment, CatalogEntity,
    EntityManager,
};
use crate::services::projector::{decode_flag, decode_list, encode_list};
use crate::services::query_filter::{build_filter, FilterKind, FilterSpec};
use crate::services::referential::ensure_exists;
use crate::services::schema::{IngredientTypeField, Table, UpdatableField};
use crate::services::status::Deactivatable;
use crate::services::validation::{
    as_object, flag, non_empty_text, optional_string_list, optional_text, positive_id,
    required_value, validate, Check, FieldRule,
};
use crate::utils::error::AppResult;
use crate::utils::logger::Logger;

/// 创建时的字段规则
const CREATE_RULES: &[FieldRule] = &[
    FieldRule::required("categoryID", Check::PositiveInteger),
    FieldRule::required("name", Check::NonEmptyString),
    FieldRule::nullable("description", Check::Text),
    FieldRule::nullable("beverageTypes", Check::StringArray),
    FieldRule::optional("isPrimaryRequired", Check::Flag),
    FieldRule::optional("isActive", Check::Flag),
];

/// 列表支持的过滤条件
const FILTERS: &[FilterSpec] = &[
    FilterSpec {
        key: "categoryID",
        column: "t.categoryID",
        kind: FilterKind::Id,
    },
    FilterSpec {
        key: "isActive",
        column: "t.isActive",
        kind: FilterKind::Flag,
    },
    FilterSpec {
        key: "beverageType",
        column: "t.beverageTypes",
        kind: FilterKind::ArrayElement,
    },
];

/// ingredientTypes 表的原始行
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientTypeRow {
    #[serde(rename = "ingredientTypeID")]
    id: i64,
    #[serde(rename = "categoryID")]
    category_id: i64,
    category_name: Option<String>,
    name: String,
    description: Option<String>,
    beverage_types: Option<String>,
    is_primary_required: Option<i64>,
    is_active: Option<i64>,
}

impl CatalogEntity for IngredientType {
    const TABLE: Table = Table::IngredientTypes;

    const SELECT: &'static str = "SELECT t.ingredientTypeID AS ingredientTypeID, \
        t.categoryID AS categoryID, c.name AS categoryName, t.name AS name, \
        t.description AS description, t.beverageTypes AS beverageTypes, \
        t.isPrimaryRequired AS isPrimaryRequired, t.isActive AS isActive \
        FROM ingredientTypes t \
        LEFT JOIN itemCategories c ON c.categoryID = t.categoryID";

    type Row = IngredientTypeRow;

    fn from_row(row: IngredientTypeRow) -> AppResult<Self> {
        Ok(IngredientType {
            id: row.id,
            category_id: row.category_id,
            category_name: row.category_name,
            name: row.name,
            description: row.description,
            beverage_types: decode_list("beverageTypes", row.beverage_types.as_deref())?,
            is_primary_required: decode_flag("isPrimaryRequired", row.is_primary_required, false)?,
            is_active: decode_flag("isActive", row.is_active, true)?,
        })
    }
}

/// beverageTypes 列的赋值：数组编码为 JSON 文本，null 清空
fn beverage_types_assignment(list: Option<Vec<String>>) -> AppResult<Assignment> {
    let column = IngredientTypeField::BeverageTypes.column();
    Ok(match list {
        Some(items) => {
            let encoded = encode_list(&items)?;
            Assignment::new(column, SqlValue::Text(encoded), Value::from(items))
        }
        None => Assignment::new(column, SqlValue::Null, Value::Null),
    })
}

/// 原料类型管理器
pub struct IngredientTypeManager<'a> {
    db: &'a Database,
    logger: Logger,
}

impl<'a> IngredientTypeManager<'a> {
    /// 使用全局 logger
    pub fn new(db: &'a Database) -> Self {
        Self::with_logger(db, Logger::global())
    }

    pub fn with_logger(db: &'a Database, logger: Logger) -> Self {
        IngredientTypeManager { db, logger }
    }

    /// 校验单个更新字段并转换为列赋值
    fn assign(&self, field: IngredientTypeField, value: &Value) -> AppResult<Assignment> {
        let column = field.column();
        match field {
            IngredientTypeField::Name => {
                Ok(Assignment::text(column, Some(non_empty_text(column, value)?)))
            }
            IngredientTypeField::CategoryId => {
                let category_id = positive_id(column, value)?;
                ensure_exists(self.db.conn(), Table::ItemCategories, category_id)?;
                Ok(Assignment::integer(column, category_id))
            }
            IngredientTypeField::BeverageTypes => {
                beverage_types_assignment(optional_string_list(column, Some(value))?)
            }
            IngredientTypeField::IsPrimaryRequired => {
                Ok(Assignment::integer(column, i64::from(flag(column, value)?)))
            }
            IngredientTypeField::Description => {
                Ok(Assignment::text(column, optional_text(column, Some(value))?))
            }
        }
    }
}

impl Deactivatable for IngredientTypeManager<'_> {
    const TABLE: Table = Table::IngredientTypes;

    fn connection(&self) -> &Connection {
        self.db.conn()
    }

    fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl EntityManager for IngredientTypeManager<'_> {
    type Entity = IngredientType;

    /// 创建原料类型
    ///
    /// 校验字段 → 校验分类存在 → 规范化 → 插入 → 读回完整记录。
    /// isActive 总是写入 1。
    fn create(&self, data: &Value) -> AppResult<IngredientType> {
        let data = as_object(data, "ingredientType")?;
        validate(data, CREATE_RULES)?;

        let category_id = positive_id("categoryID", required_value(data, "categoryID")?)?;
        ensure_exists(self.db.conn(), Table::ItemCategories, category_id)?;

        let is_primary_required = match data.get("isPrimaryRequired") {
            Some(v) => flag("isPrimaryRequired", v)?,
            None => false,
        };

        let assignments = [
            Assignment::integer("categoryID", category_id),
            Assignment::text("name", Some(non_empty_text("name", required_value(data, "name")?)?)),
            Assignment::text(
                "description",
                optional_text("description", data.get("description"))?,
            ),
            beverage_types_assignment(optional_string_list(
                "beverageTypes",
                data.get("beverageTypes"),
            )?)?,
            Assignment::integer("isPrimaryRequired", i64::from(is_primary_required)),
            Assignment::integer("isActive", 1),
        ];

        let id = insert(self.db.conn(), Table::IngredientTypes, &assignments)?;
        let created: IngredientType = fetch_existing(self.db, id)?;
        self.logger.info(format_args!(
            "原料类型已创建: {} (ID {})",
            created.name, created.id
        ));
        Ok(created)
    }

    fn get(&self, id: i64) -> AppResult<Option<IngredientType>> {
        fetch_by_id(self.db, id)
    }

    /// 支持的过滤条件：categoryID、isActive、beverageType（数组元素匹配）
    fn get_all(&self, filters: Option<&Value>) -> AppResult<Vec<IngredientType>> {
        let filter = build_filter(filters, FILTERS, &self.logger)?;
        fetch_all(self.db, &filter)
    }

    fn update(&self, id: i64, updates: &Value) -> AppResult<UpdateResult> {
        partial_update(
            self.db,
            &self.logger,
            Table::IngredientTypes,
            id,
            updates,
            |field, value| self.assign(field, value),
        )
    }
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AppError;
    use crate::utils::logger::CaptureLog;
    use log::Level;
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::Arc;

    /// 内存数据库 + 两个分类（ID 1: Fruit, ID 2: Sugar）
    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute_batch(
                "INSERT INTO itemCategories (name) VALUES ('Fruit');
                 INSERT INTO itemCategories (name) VALUES ('Sugar');",
            )
            .unwrap();
        db
    }

    fn total_changes(db: &Database) -> i64 {
        db.conn()
            .query_row("SELECT total_changes()", [], |row| row.get(0))
            .unwrap()
    }

    fn raw_row(db: &Database, id: i64) -> (i64, String, Option<String>, Option<String>) {
        db.conn()
            .query_row(
                "SELECT categoryID, name, description, beverageTypes FROM ingredientTypes WHERE ingredientTypeID = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .unwrap()
    }

    // ========================================================================
    // create
    // ========================================================================

    /// 测试 create：最少字段创建，默认值正确
    #[test]
    fn test_create_defaults() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);

        let it = m.create(&json!({"categoryID": 1, "name": "  Apple Juice "})).unwrap();
        assert!(it.id > 0);
        assert_eq!(it.name, "Apple Juice");
        assert_eq!(it.category_id, 1);
        assert_eq!(it.category_name.as_deref(), Some("Fruit"));
        assert_eq!(it.description, None);
        assert_eq!(it.beverage_types, None);
        assert!(!it.is_primary_required);
        assert!(it.is_active);
    }

    /// 测试 create：isActive 总是为 1
    #[test]
    fn test_create_forces_active() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        let it = m
            .create(&json!({"categoryID": 1, "name": "Pear", "isActive": 0, "isPrimaryRequired": 1}))
            .unwrap();
        assert!(it.is_active);
        assert!(it.is_primary_required);
    }

    /// 测试 create：分类不存在返回引用完整性错误，且不插入
    #[test]
    fn test_create_missing_category() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);

        let err = m.create(&json!({"categoryID": 99, "name": "X"})).unwrap_err();
        assert!(matches!(
            err,
            AppError::ReferentialIntegrityError { entity: "分类", id: 99 }
        ));
        assert!(err.to_string().contains("99"));
        assert!(m.get_all(None).unwrap().is_empty());
    }

    /// 测试 create：空白名称返回验证错误
    #[test]
    fn test_create_blank_name() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);

        let err = m.create(&json!({"categoryID": 1, "name": "  "})).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(err.to_string().contains("name"));
    }

    /// 测试 create：各类非法输入
    #[test]
    fn test_create_rejects_malformed_input() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        let before = total_changes(&db);

        for bad in [
            json!("Apple"),
            json!({"name": "Apple"}),
            json!({"categoryID": "1", "name": "Apple"}),
            json!({"categoryID": 1, "name": "Apple", "beverageTypes": "Cider"}),
            json!({"categoryID": 1, "name": "Apple", "isPrimaryRequired": 2}),
            json!({"categoryID": 1, "name": "Apple", "description": 7}),
        ] {
            let err = m.create(&bad).unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)), "{bad}");
        }
        assert_eq!(total_changes(&db), before);
    }

    /// 测试 create + get：beverageTypes 以数组形式还原
    #[test]
    fn test_create_get_round_trip() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);

        let created = m
            .create(&json!({
                "categoryID": 2,
                "name": "Wildflower Honey",
                "description": " raw ",
                "beverageTypes": ["Mead", "Cider"]
            }))
            .unwrap();

        let fetched = m.get(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(
            fetched.beverage_types,
            Some(vec!["Mead".to_string(), "Cider".to_string()])
        );
        assert_eq!(fetched.description.as_deref(), Some("raw"));

        let (_, _, _, stored) = raw_row(&db, created.id);
        assert_eq!(stored.as_deref(), Some(r#"["Mead","Cider"]"#));
    }

    /// 测试 create / update：beverageTypes 作为集合存储，重复标签只保留一次
    #[test]
    fn test_beverage_types_are_deduplicated() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);

        let created = m
            .create(&json!({"categoryID": 1, "name": "Apple", "beverageTypes": ["Cider", "Cider"]}))
            .unwrap();
        assert_eq!(created.beverage_types, Some(vec!["Cider".to_string()]));

        let result = m
            .update(created.id, &json!({"beverageTypes": ["Wine", "Cider", "Wine"]}))
            .unwrap();
        assert_eq!(result.updated_fields[0].new_value, json!(["Wine", "Cider"]));
        let (_, _, _, stored) = raw_row(&db, created.id);
        assert_eq!(stored.as_deref(), Some(r#"["Wine","Cider"]"#));
    }

    // ========================================================================
    // get / getAll
    // ========================================================================

    /// 测试 get：不存在返回 None，非法 ID 返回验证错误
    #[test]
    fn test_get_missing_and_invalid_id() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);

        assert_eq!(m.get(12).unwrap(), None);
        assert!(matches!(m.get(0), Err(AppError::ValidationError(_))));
        assert!(matches!(m.get(-4), Err(AppError::ValidationError(_))));
    }

    /// 测试 get：已停用的记录仍可按 ID 读取
    #[test]
    fn test_get_inactive_record() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        let it = m.create(&json!({"categoryID": 1, "name": "Plum"})).unwrap();
        m.set_status(it.id, 0).unwrap();

        let fetched = m.get(it.id).unwrap().unwrap();
        assert!(!fetched.is_active);
    }

    /// 测试 get_all：按分类过滤，按名称升序
    #[test]
    fn test_get_all_by_category_ordered_by_name() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        m.create(&json!({"categoryID": 2, "name": "Honey"})).unwrap();
        m.create(&json!({"categoryID": 1, "name": "Apple"})).unwrap();
        m.create(&json!({"categoryID": 2, "name": "Dextrose"})).unwrap();
        m.create(&json!({"categoryID": 2, "name": "Brown Sugar"})).unwrap();

        let sugars = m.get_all(Some(&json!({"categoryID": 2}))).unwrap();
        let names: Vec<&str> = sugars.iter().map(|it| it.name.as_str()).collect();
        assert_eq!(names, vec!["Brown Sugar", "Dextrose", "Honey"]);
        assert!(sugars.iter().all(|it| it.category_id == 2));

        let all = m.get_all(None).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].name, "Apple");
    }

    /// 测试 get_all：beverageType 为整元素匹配，不是子串匹配
    #[test]
    fn test_get_all_beverage_type_exact_element() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        m.create(&json!({"categoryID": 1, "name": "Apple", "beverageTypes": ["Cider", "Wine"]}))
            .unwrap();
        m.create(&json!({"categoryID": 1, "name": "Perry Pear", "beverageTypes": ["Cider Perry"]}))
            .unwrap();
        m.create(&json!({"categoryID": 2, "name": "Honey", "beverageTypes": ["Mead"]}))
            .unwrap();
        m.create(&json!({"categoryID": 2, "name": "Sugar"})).unwrap();

        let ciders = m.get_all(Some(&json!({"beverageType": "Cider"}))).unwrap();
        let names: Vec<&str> = ciders.iter().map(|it| it.name.as_str()).collect();
        assert_eq!(names, vec!["Apple"]);

        let none = m.get_all(Some(&json!({"beverageType": "Cid"}))).unwrap();
        assert!(none.is_empty());
    }

    /// 测试 get_all：组合过滤条件
    #[test]
    fn test_get_all_combined_filters() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        let a = m
            .create(&json!({"categoryID": 1, "name": "Apple", "beverageTypes": ["Cider"]}))
            .unwrap();
        m.create(&json!({"categoryID": 1, "name": "Crabapple", "beverageTypes": ["Cider"]}))
            .unwrap();
        m.set_status(a.id, 0).unwrap();

        let active = m
            .get_all(Some(&json!({"categoryID": 1, "isActive": 1, "beverageType": "Cider"})))
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Crabapple");

        let inactive = m.get_all(Some(&json!({"isActive": 0}))).unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].id, a.id);
    }

    /// 测试 get_all：非法过滤值使整个调用失败
    #[test]
    fn test_get_all_invalid_filter() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        m.create(&json!({"categoryID": 1, "name": "Apple"})).unwrap();

        let err = m
            .get_all(Some(&json!({"categoryID": 1, "isActive": "yes"})))
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    // ========================================================================
    // update
    // ========================================================================

    /// 测试 update：只有白名单外字段时报错
    #[test]
    fn test_update_no_valid_fields() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        let it = m.create(&json!({"categoryID": 1, "name": "Apple"})).unwrap();

        let err = m.update(it.id, &json!({"foo": "bar"})).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(err.to_string().contains("没有可更新的有效字段"));

        let err = m.update(it.id, &json!({})).unwrap_err();
        assert!(err.to_string().contains("没有可更新的有效字段"));
    }

    /// 测试 update：白名单外字段被丢弃并记录警告，其余字段照常写入
    #[test]
    fn test_update_drops_rejected_fields() {
        let db = setup();
        let capture = Arc::new(CaptureLog::default());
        let m = IngredientTypeManager::with_logger(&db, Logger::new(capture.clone()));
        let it = m.create(&json!({"categoryID": 1, "name": "Apple"})).unwrap();

        let result = m
            .update(it.id, &json!({"foo": "bar", "description": " d "}))
            .unwrap();
        assert!(result.success);
        assert_eq!(result.updated_fields.len(), 1);
        assert_eq!(result.updated_fields[0].field, "description");
        assert_eq!(result.updated_fields[0].new_value, json!("d"));
        assert_eq!(result.ignored_fields, vec!["foo".to_string()]);

        let warnings = capture.messages(Level::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("foo"));

        let (_, name, description, _) = raw_row(&db, it.id);
        assert_eq!(name, "Apple");
        assert_eq!(description.as_deref(), Some("d"));
    }

    /// 测试 update：isActive 不能通过 update 修改
    #[test]
    fn test_update_cannot_touch_is_active() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        let it = m.create(&json!({"categoryID": 1, "name": "Apple"})).unwrap();

        let err = m.update(it.id, &json!({"isActive": 0})).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(m.get(it.id).unwrap().unwrap().is_active);
    }

    /// 测试 update：分类不存在时不修改任何列
    #[test]
    fn test_update_missing_category() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        let it = m.create(&json!({"categoryID": 1, "name": "Apple"})).unwrap();
        let before = total_changes(&db);

        let err = m
            .update(it.id, &json!({"name": "Renamed", "categoryID": 77}))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::ReferentialIntegrityError { id: 77, .. }
        ));
        assert_eq!(total_changes(&db), before);
        assert_eq!(raw_row(&db, it.id).1, "Apple");
    }

    /// 测试 update：多个字段一次写入，返回规范化新值
    #[test]
    fn test_update_multiple_fields() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        let it = m
            .create(&json!({"categoryID": 1, "name": "Apple", "beverageTypes": ["Cider"]}))
            .unwrap();

        let result = m
            .update(
                it.id,
                &json!({
                    "name": " Honeycrisp ",
                    "categoryID": 2,
                    "beverageTypes": ["Cider", "Cyser"],
                    "isPrimaryRequired": 1
                }),
            )
            .unwrap();
        let fields: Vec<&str> = result.updated_fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "categoryID", "beverageTypes", "isPrimaryRequired"]);
        assert_eq!(result.updated_fields[2].new_value, json!(["Cider", "Cyser"]));

        let fetched = m.get(it.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Honeycrisp");
        assert_eq!(fetched.category_id, 2);
        assert_eq!(fetched.category_name.as_deref(), Some("Sugar"));
        assert!(fetched.is_primary_required);
        assert_eq!(
            fetched.beverage_types,
            Some(vec!["Cider".to_string(), "Cyser".to_string()])
        );
    }

    /// 测试 update：beverageTypes 可以用 null 清空，非数组被拒绝
    #[test]
    fn test_update_beverage_types_shape() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        let it = m
            .create(&json!({"categoryID": 1, "name": "Apple", "beverageTypes": ["Cider"]}))
            .unwrap();

        let err = m.update(it.id, &json!({"beverageTypes": "Cider"})).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let result = m.update(it.id, &json!({"beverageTypes": null})).unwrap();
        assert_eq!(result.updated_fields[0].new_value, Value::Null);
        assert_eq!(m.get(it.id).unwrap().unwrap().beverage_types, None);
    }

    /// 测试 update：非法名称 / 标志位 / 不存在的 ID
    #[test]
    fn test_update_validation_and_not_found() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        let it = m.create(&json!({"categoryID": 1, "name": "Apple"})).unwrap();

        assert!(matches!(
            m.update(it.id, &json!({"name": " "})),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            m.update(it.id, &json!({"isPrimaryRequired": 5})),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            m.update(404, &json!({"name": "Ghost"})),
            Err(AppError::NotFound { id: 404, .. })
        ));
    }

    // ========================================================================
    // setStatus
    // ========================================================================

    /// 测试 set_status：已启用时再次启用不写入，仍返回成功
    #[test]
    fn test_set_status_idempotent() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        let it = m.create(&json!({"categoryID": 1, "name": "Apple"})).unwrap();
        let before = total_changes(&db);

        let r = m.set_status(it.id, 1).unwrap();
        assert!(r.success);
        assert!(r.message.contains("已处于启用状态"));
        assert_eq!(total_changes(&db), before);

        let r = m.set_status(it.id, 0).unwrap();
        assert!(r.message.contains("已停用"));
        assert_eq!(total_changes(&db), before + 1);
    }

    /// 测试 set_status：记录不存在
    #[test]
    fn test_set_status_not_found() {
        let db = setup();
        let m = IngredientTypeManager::new(&db);
        assert!(matches!(
            m.set_status(5, 0),
            Err(AppError::NotFound { id: 5, .. })
        ));
    }

    // ========================================================================
    // 属性测试
    // ========================================================================

    fn tags_strategy() -> impl Strategy<Value = Option<Vec<String>>> {
        prop_oneof![
            Just(None),
            prop::collection::btree_set("[A-Z][a-z]{1,10}", 0..4)
                .prop_map(|tags| Some(tags.into_iter().collect())),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// 任意合法输入创建后按 ID 读取，得到与创建结果相同的记录
        #[test]
        fn prop_create_get_round_trip(
            name in "[a-zA-Z][a-zA-Z0-9 ]{0,20}[a-zA-Z0-9]",
            category_id in 1i64..=2,
            tags in tags_strategy(),
            primary in 0i64..=1
        ) {
            let db = setup();
            let m = IngredientTypeManager::new(&db);

            let created = m.create(&json!({
                "categoryID": category_id,
                "name": name,
                "beverageTypes": tags,
                "isPrimaryRequired": primary
            })).unwrap();
            prop_assert!(created.is_active);
            prop_assert_eq!(&created.beverage_types, &tags);

            let fetched = m.get(created.id).unwrap();
            prop_assert_eq!(fetched, Some(created));
        }

        /// 更新白名单外的任意字段都不会修改记录
        #[test]
        fn prop_unknown_fields_never_written(key in "[a-z]{3,10}") {
            prop_assume!(IngredientTypeField::from_key(&key).is_none());
            let db = setup();
            let m = IngredientTypeManager::new(&db);
            let it = m.create(&json!({"categoryID": 1, "name": "Apple"})).unwrap();

            let result = m.update(it.id, &json!({ key: "x" }));
            prop_assert!(result.is_err());
            prop_assert_eq!(m.get(it.id).unwrap(), Some(it));
        }
    }
}
