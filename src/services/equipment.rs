// ============================================================================
// 设备管理
// 容量单位原样保存，不做单位换算
// ============================================================================

use rusqlite::Connection;
use serde::Deserialize;
use serde_json::Value;

use crate::database::Database;
use crate::models::dtos::{Equipment, UpdateResult};
use crate::services::entity::{
    fetch_all, fetch_by_id, fetch_existing, insert, partial_update, Assignment, CatalogEntity,
    EntityManager,
};
use crate::services::projector::decode_flag;
use crate::services::query_filter::{build_filter, FilterKind, FilterSpec};
use crate::services::schema::{EquipmentField, Table, UpdatableField};
use crate::services::status::Deactivatable;
use crate::services::validation::{
    as_object, non_empty_text, optional_text, positive_number, required_value, validate, Check,
    FieldRule,
};
use crate::utils::error::AppResult;
use crate::utils::logger::Logger;

/// 容量单位：出现时必须是非空字符串
fn is_unit(value: &Value) -> bool {
    value.as_str().is_some_and(|s| !s.trim().is_empty())
}

const UNIT_CHECK: Check = Check::Custom {
    predicate: is_unit,
    expectation: "非空字符串",
};

const CREATE_RULES: &[FieldRule] = &[
    FieldRule::required("name", Check::NonEmptyString),
    FieldRule::required("type", Check::NonEmptyString),
    FieldRule::nullable("capacity", Check::PositiveNumber),
    FieldRule::nullable("capacityUnit", UNIT_CHECK),
    FieldRule::nullable("notes", Check::Text),
    FieldRule::optional("isActive", Check::Flag),
];

const FILTERS: &[FilterSpec] = &[
    FilterSpec {
        key: "type",
        column: "t.type",
        kind: FilterKind::Text,
    },
    FilterSpec {
        key: "isActive",
        column: "t.isActive",
        kind: FilterKind::Flag,
    },
];

/// equipment 表的原始行
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRow {
    #[serde(rename = "equipmentID")]
    id: i64,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    capacity: Option<f64>,
    capacity_unit: Option<String>,
    notes: Option<String>,
    is_active: Option<i64>,
}

impl CatalogEntity for Equipment {
    const TABLE: Table = Table::Equipment;

    const SELECT: &'static str = "SELECT t.equipmentID AS equipmentID, t.name AS name, \
        t.type AS type, t.capacity AS capacity, t.capacityUnit AS capacityUnit, \
        t.notes AS notes, t.isActive AS isActive \
        FROM equipment t";

    type Row = EquipmentRow;

    fn from_row(row: EquipmentRow) -> AppResult<Self> {
        Ok(Equipment {
            id: row.id,
            name: row.name,
            kind: row.kind,
            capacity: row.capacity,
            capacity_unit: row.capacity_unit,
            notes: row.notes,
            is_active: decode_flag("isActive", row.is_active, true)?,
        })
    }
}

/// 可空的容量
fn optional_capacity(value: Option<&Value>) -> AppResult<Option<f64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => positive_number("capacity", v).map(Some),
    }
}

/// 设备管理器
pub struct EquipmentManager<'a> {
    db: &'a Database,
    logger: Logger,
}

impl<'a> EquipmentManager<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self::with_logger(db, Logger::global())
    }

    pub fn with_logger(db: &'a Database, logger: Logger) -> Self {
        EquipmentManager { db, logger }
    }

    fn assign(&self, field: EquipmentField, value: &Value) -> AppResult<Assignment> {
        let column = field.column();
        match field {
            EquipmentField::Name | EquipmentField::Kind => {
                Ok(Assignment::text(column, Some(non_empty_text(column, value)?)))
            }
            EquipmentField::Capacity => Ok(Assignment::real(column, optional_capacity(Some(value))?)),
            EquipmentField::CapacityUnit => {
                if !value.is_null() {
                    FieldRule::nullable(column, UNIT_CHECK).check_value(value)?;
                }
                Ok(Assignment::text(column, optional_text(column, Some(value))?))
            }
            EquipmentField::Notes => {
                Ok(Assignment::text(column, optional_text(column, Some(value))?))
            }
        }
    }
}

impl Deactivatable for EquipmentManager<'_> {
    const TABLE: Table = Table::Equipment;

    fn connection(&self) -> &Connection {
        self.db.conn()
    }

    fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl EntityManager for EquipmentManager<'_> {
    type Entity = Equipment;

    fn create(&self, data: &Value) -> AppResult<Equipment> {
        let data = as_object(data, "equipment")?;
        validate(data, CREATE_RULES)?;

        let assignments = [
            Assignment::text("name", Some(non_empty_text("name", required_value(data, "name")?)?)),
            Assignment::text("type", Some(non_empty_text("type", required_value(data, "type")?)?)),
            Assignment::real("capacity", optional_capacity(data.get("capacity"))?),
            Assignment::text(
                "capacityUnit",
                optional_text("capacityUnit", data.get("capacityUnit"))?,
            ),
            Assignment::text("notes", optional_text("notes", data.get("notes"))?),
            Assignment::integer("isActive", 1),
        ];

        let id = insert(self.db.conn(), Table::Equipment, &assignments)?;
        let created: Equipment = fetch_existing(self.db, id)?;
        self.logger.info(format_args!(
            "设备已创建: {} (ID {})",
            created.name, created.id
        ));
        Ok(created)
    }

    fn get(&self, id: i64) -> AppResult<Option<Equipment>> {
        fetch_by_id(self.db, id)
    }

    fn get_all(&self, filters: Option<&Value>) -> AppResult<Vec<Equipment>> {
        let filter = build_filter(filters, FILTERS, &self.logger)?;
        fetch_all(self.db, &filter)
    }

    fn update(&self, id: i64, updates: &Value) -> AppResult<UpdateResult> {
        partial_update(
            self.db,
            &self.logger,
            Table::Equipment,
            id,
            updates,
            |field, value| self.assign(field, value),
        )
    }
}
