// ============================================================================
// 原料分类管理
// 分类是原料类型 categoryID 的所属实体
// ============================================================================

use rusqlite::Connection;
use serde::Deserialize;
use serde_json::Value;

use crate::database::Database;
use crate::models::dtos::{Category, UpdateResult};
use crate::services::entity::{
    fetch_all, fetch_by_id, fetch_existing, insert, partial_update, Assignment, CatalogEntity,
    EntityManager,
};
use crate::services::projector::decode_flag;
use crate::services::query_filter::{build_filter, FilterKind, FilterSpec};
use crate::services::schema::{CategoryField, Table, UpdatableField};
use crate::services::status::Deactivatable;
use crate::services::validation::{
    as_object, non_empty_text, optional_text, required_value, validate, Check, FieldRule,
};
use crate::utils::error::AppResult;
use crate::utils::logger::Logger;

const CREATE_RULES: &[FieldRule] = &[
    FieldRule::required("name", Check::NonEmptyString),
    FieldRule::nullable("description", Check::Text),
    FieldRule::optional("isActive", Check::Flag),
];

const FILTERS: &[FilterSpec] = &[FilterSpec {
    key: "isActive",
    column: "t.isActive",
    kind: FilterKind::Flag,
}];

/// itemCategories 表的原始行
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    #[serde(rename = "categoryID")]
    id: i64,
    name: String,
    description: Option<String>,
    is_active: Option<i64>,
}

impl CatalogEntity for Category {
    const TABLE: Table = Table::ItemCategories;

    const SELECT: &'static str = "SELECT t.categoryID AS categoryID, t.name AS name, \
        t.description AS description, t.isActive AS isActive \
        FROM itemCategories t";

    type Row = CategoryRow;

    fn from_row(row: CategoryRow) -> AppResult<Self> {
        Ok(Category {
            id: row.id,
            name: row.name,
            description: row.description,
            is_active: decode_flag("isActive", row.is_active, true)?,
        })
    }
}

/// 分类管理器
pub struct CategoryManager<'a> {
    db: &'a Database,
    logger: Logger,
}

impl<'a> CategoryManager<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self::with_logger(db, Logger::global())
    }

    pub fn with_logger(db: &'a Database, logger: Logger) -> Self {
        CategoryManager { db, logger }
    }
}

impl Deactivatable for CategoryManager<'_> {
    const TABLE: Table = Table::ItemCategories;

    fn connection(&self) -> &Connection {
        self.db.conn()
    }

    fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl EntityManager for CategoryManager<'_> {
    type Entity = Category;

    fn create(&self, data: &Value) -> AppResult<Category> {
        let data = as_object(data, "category")?;
        validate(data, CREATE_RULES)?;

        let assignments = [
            Assignment::text("name", Some(non_empty_text("name", required_value(data, "name")?)?)),
            Assignment::text(
                "description",
                optional_text("description", data.get("description"))?,
            ),
            Assignment::integer("isActive", 1),
        ];

        let id = insert(self.db.conn(), Table::ItemCategories, &assignments)?;
        let created: Category = fetch_existing(self.db, id)?;
        self.logger.info(format_args!(
            "分类已创建: {} (ID {})",
            created.name, created.id
        ));
        Ok(created)
    }

    fn get(&self, id: i64) -> AppResult<Option<Category>> {
        fetch_by_id(self.db, id)
    }

    fn get_all(&self, filters: Option<&Value>) -> AppResult<Vec<Category>> {
        let filter = build_filter(filters, FILTERS, &self.logger)?;
        fetch_all(self.db, &filter)
    }

    fn update(&self, id: i64, updates: &Value) -> AppResult<UpdateResult> {
        partial_update(
            self.db,
            &self.logger,
            Table::ItemCategories,
            id,
            updates,
            |field: CategoryField, value| {
                let column = field.column();
                Ok(match field {
                    CategoryField::Name => {
                        Assignment::text(column, Some(non_empty_text(column, value)?))
                    }
                    CategoryField::Description => {
                        Assignment::text(column, optional_text(column, Some(value))?)
                    }
                })
            },
        )
    }
}
