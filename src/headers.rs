//! Source-language header maps.
//!
//! Each manifest variant comes with a fixed table of Russian column labels and the English
//! field names they are renamed to. Tables are validated into a [`HeaderMap`] before use.

use std::collections::{HashMap, HashSet};

use crate::error::{ConvertError, ConvertResult};

/// Workbook manifests (`excel` variant).
pub const EXCEL_HEADERS: &[(&str, &str)] = &[
    ("Год", "year"),
    ("Месяц", "month"),
    ("Линия", "line"),
    ("Судно", "ship_name"),
    ("Рейс", "voyage"),
    ("Порт", "tracking_seaport"),
    ("Отправитель", "shipper_name"),
    ("Получатель", "consignee_name"),
    ("Экспедитор", "expeditor"),
    ("Груз", "goods_name"),
    ("Тип контейнера", "container_type"),
    ("Размер контейнера", "container_size"),
    ("Кол-во контейнеров, шт.", "container_count"),
    ("Терминал", "terminal"),
    ("TEU", "teu"),
    ("Номер контейнера", "container_number"),
    ("Номер декларации гтд", "gtd_number"),
    ("КОД ТНВЭД", "tnved"),
    ("Группа груза по ТНВЭД", "tnved_group_id"),
    ("Наименование Группы", "tnved_group_name"),
    ("ИНН", "shipper_inn"),
    ("УНИ-компания", "shipper_name_unified"),
    ("Страна КОМПАНИИ", "shipper_country"),
    ("Направление", "direction"),
    ("Коносамент", "booking"),
    ("Порожний", "is_empty"),
    ("Вес нетто (кг)", "goods_weight_with_package"),
];

/// Workbook manifests with destination columns (`excel-pruned` variant).
pub const EXCEL_PRUNED_HEADERS: &[(&str, &str)] = &[
    ("Год", "year"),
    ("Месяц", "month"),
    ("Период", "period"),
    ("Линия", "line"),
    ("Порт", "destination_port"),
    ("Страна", "destination_country"),
    ("Отправитель", "shipper_name"),
    ("Получатель", "consignee_name"),
    ("Экспедитор", "expeditor"),
    ("Груз", "goods_name"),
    ("Тип контейнера", "container_type"),
    ("Размер контейнера", "container_size"),
    ("Кол-во контейнеров, шт.", "container_count"),
    ("Терминал", "terminal"),
    ("TEU", "teu"),
    ("Номер контейнера", "container_number"),
    ("Номер декларации гтд", "declaration_number_gtd"),
    ("КОД ТНВЭД", "tnved"),
    ("Группа груза по ТНВЭД", "tnved_group_id"),
    ("Наименование Группы", "tnved_group_name"),
    ("ИНН", "shipper_inn"),
    ("УНИ-компания", "shipper_name_unified"),
    ("Страна КОМПАНИИ", "shipper_country"),
    ("Направление", "direction"),
    ("Коносамент", "consignment"),
    ("Тип парка", "park_type"),
    ("Вес нетто (кг)", "goods_weight_net"),
];

/// CSV manifests (`csv` variant).
pub const CSV_HEADERS: &[(&str, &str)] = &[
    ("Год", "year"),
    ("Месяц", "month"),
    ("Период", "period"),
    ("Линия", "line"),
    ("Порт", "destination_port"),
    ("Страна", "destination_country"),
    ("Отправитель", "shipper_name"),
    ("Получатель", "consignee_name"),
    ("Экспедитор", "expeditor"),
    ("Груз", "goods_name"),
    ("Тип контейнера", "container_type"),
    ("Размер контейнера", "container_size"),
    ("Кол-во контейнеров, шт.", "container_count"),
    ("Терминал", "terminal"),
    ("TEU", "teu"),
    ("Номер контейнера", "container_number"),
    ("Номер декларации гтд", "declaration_number_gtd"),
    ("КОД ТНВЭД", "tnved"),
    ("Группа груза по ТНВЭД", "tnved_group_id"),
    ("Наименование Группы", "tnved_group_name"),
    ("ИНН", "shipper_inn"),
    ("УНИ-компания", "shipper_name_unified"),
    ("Страна КОМПАНИИ", "shipper_country"),
    ("Направление", "direction"),
    ("Коносамент", "consignment"),
    ("Тип парка", "park_type"),
    ("Вес нетто (кг)", "goods_weight_netto"),
];

/// Immutable source label → target field name mapping.
///
/// Construction fails if two source labels map to the same target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    entries: HashMap<String, String>,
}

impl HeaderMap {
    /// Build a validated map from `(source, target)` pairs.
    pub fn new<'a, I>(pairs: I) -> ConvertResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries: HashMap<String, String> = HashMap::new();
        let mut targets: HashSet<&'a str> = HashSet::new();
        for (source, target) in pairs {
            if !targets.insert(target) {
                return Err(ConvertError::MappingConfig {
                    message: format!("more than one source column maps to '{target}'"),
                });
            }
            if entries.insert(source.to_owned(), target.to_owned()).is_some() {
                return Err(ConvertError::MappingConfig {
                    message: format!("source column '{source}' is mapped twice"),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Target name for a source label, if mapped.
    pub fn target(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    /// Target name for a source label, falling back to the label itself.
    pub fn rename<'a>(&'a self, source: &'a str) -> &'a str {
        self.target(source).unwrap_or(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
