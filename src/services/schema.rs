// ============================================================================
// 表结构描述
// ============================================================================
//
// 所有拼进 SQL 的表名 / 列名都来自这里的封闭枚举，调用方无法传入任意字符串。
// 每个实体的可更新字段是一个枚举，`column()` 为穷尽匹配：
// 新增字段而忘记登记列名会在编译期报错。

/// 已知的可管理表
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Table {
    ItemCategories,
    IngredientTypes,
    Equipment,
}

impl Table {
    /// 表名
    pub fn name(self) -> &'static str {
        match self {
            Table::ItemCategories => "itemCategories",
            Table::IngredientTypes => "ingredientTypes",
            Table::Equipment => "equipment",
        }
    }

    /// 主键列名
    pub fn id_column(self) -> &'static str {
        match self {
            Table::ItemCategories => "categoryID",
            Table::IngredientTypes => "ingredientTypeID",
            Table::Equipment => "equipmentID",
        }
    }

    /// 面向用户的实体名称，用于错误和日志消息
    pub fn entity(self) -> &'static str {
        match self {
            Table::ItemCategories => "分类",
            Table::IngredientTypes => "原料类型",
            Table::Equipment => "设备",
        }
    }
}

// ============================================================================
// 可更新字段描述
// ============================================================================

/// 部分更新白名单中的字段
///
/// 输入键名与列名一致。
pub trait UpdatableField: Copy + Eq + std::fmt::Debug + 'static {
    /// 白名单中的全部字段，部分更新按此顺序校验
    const ALL: &'static [Self];

    /// 对应的列名（同时也是输入中的键名）
    fn column(self) -> &'static str;

    /// 输入键名解析为字段，不在白名单中返回 None
    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.column() == key)
    }
}

/// 原料类型的可更新字段（isActive 只能通过 setStatus 修改）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngredientTypeField {
    Name,
    Description,
    CategoryId,
    BeverageTypes,
    IsPrimaryRequired,
}

impl UpdatableField for IngredientTypeField {
    // 顺序即更新时的校验顺序
    const ALL: &'static [Self] = &[
        IngredientTypeField::Name,
        IngredientTypeField::CategoryId,
        IngredientTypeField::BeverageTypes,
        IngredientTypeField::IsPrimaryRequired,
        IngredientTypeField::Description,
    ];

    fn column(self) -> &'static str {
        match self {
            IngredientTypeField::Name => "name",
            IngredientTypeField::Description => "description",
            IngredientTypeField::CategoryId => "categoryID",
            IngredientTypeField::BeverageTypes => "beverageTypes",
            IngredientTypeField::IsPrimaryRequired => "isPrimaryRequired",
        }
    }
}

/// 分类的可更新字段
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryField {
    Name,
    Description,
}

impl UpdatableField for CategoryField {
    const ALL: &'static [Self] = &[CategoryField::Name, CategoryField::Description];

    fn column(self) -> &'static str {
        match self {
            CategoryField::Name => "name",
            CategoryField::Description => "description",
        }
    }
}

/// 设备的可更新字段
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EquipmentField {
    Name,
    Kind,
    Capacity,
    CapacityUnit,
    Notes,
}

impl UpdatableField for EquipmentField {
    const ALL: &'static [Self] = &[
        EquipmentField::Name,
        EquipmentField::Kind,
        EquipmentField::Capacity,
        EquipmentField::CapacityUnit,
        EquipmentField::Notes,
    ];

    fn column(self) -> &'static str {
        match self {
            EquipmentField::Name => "name",
            EquipmentField::Kind => "type",
            EquipmentField::Capacity => "capacity",
            EquipmentField::CapacityUnit => "capacityUnit",
            EquipmentField::Notes => "notes",
        }
    }
}
