// ==========================================
// 贸易物流管理后台 - 内置导入模式
// ==========================================
// 覆盖: 合同 / 供应商 / 采购商
// 约束: 每个模式的样例行必须能通过自身校验（无错误、无警告）
// ==========================================

use crate::domain::types::EntityType;
use crate::importer::field_rule::{FieldRule, ImportSchema};

/// 按实体类型获取内置导入模式
pub fn schema_for(entity: EntityType) -> ImportSchema {
    match entity {
        EntityType::Contracts => contracts_schema(),
        EntityType::Suppliers => suppliers_schema(),
        EntityType::Buyers => buyers_schema(),
    }
}

const STATUS_VALUES: [&str; 2] = ["active", "inactive"];

pub fn contracts_schema() -> ImportSchema {
    ImportSchema::builder(EntityType::Contracts.as_str())
        .required(FieldRule::string("contract_number"))
        .required(FieldRule::string("supplier"))
        .required(FieldRule::string("buyer"))
        .required(FieldRule::string("commodity"))
        .required(FieldRule::number("quantity", Some(0.0), None))
        .required(FieldRule::one_of("unit", &["MT", "KG", "BBL", "CBM"]))
        .required(FieldRule::number("unit_price", Some(0.0), None))
        .required(FieldRule::one_of("currency", &["USD", "EUR", "GBP", "CNY"]))
        .required(FieldRule::date("contract_date"))
        .optional(FieldRule::date("delivery_date"))
        .optional(FieldRule::one_of(
            "incoterm",
            &["EXW", "FCA", "FOB", "CFR", "CIF", "DAP", "DDP"],
        ))
        .optional(FieldRule::one_of(
            "status",
            &["draft", "active", "completed", "cancelled"],
        ))
        .optional(FieldRule::string("notes"))
        .sample("contract_number", "CT-2024-001")
        .sample("supplier", "Acme Trading Ltd")
        .sample("buyer", "Global Foods Inc")
        .sample("commodity", "Soybean Oil")
        .sample("quantity", "500")
        .sample("unit", "MT")
        .sample("unit_price", "1250.5")
        .sample("currency", "USD")
        .sample("contract_date", "2024-03-15")
        .sample("delivery_date", "2024-05-01")
        .sample("incoterm", "CIF")
        .sample("status", "active")
        .sample("notes", "First lot via Rotterdam")
        .build()
}

pub fn suppliers_schema() -> ImportSchema {
    ImportSchema::builder(EntityType::Suppliers.as_str())
        .required(FieldRule::string("name"))
        .required(FieldRule::email("email"))
        .required(FieldRule::phone("phone"))
        .required(FieldRule::string("country"))
        .optional(FieldRule::string("contact_person"))
        .optional(FieldRule::string("address"))
        .optional(FieldRule::string("tax_id"))
        .optional(FieldRule::one_of("status", &STATUS_VALUES))
        .sample("name", "Acme Trading Ltd")
        .sample("email", "sales@acme-trading.com")
        .sample("phone", "+31 10 555-0100")
        .sample("country", "Netherlands")
        .sample("contact_person", "Jan de Vries")
        .sample("address", "Waalhaven 12 Rotterdam")
        .sample("tax_id", "NL123456789B01")
        .sample("status", "active")
        .build()
}

pub fn buyers_schema() -> ImportSchema {
    ImportSchema::builder(EntityType::Buyers.as_str())
        .required(FieldRule::string("name"))
        .required(FieldRule::email("email"))
        .required(FieldRule::phone("phone"))
        .required(FieldRule::string("country"))
        .optional(FieldRule::string("contact_person"))
        .optional(FieldRule::string("address"))
        .optional(FieldRule::number("credit_limit", Some(0.0), None))
        .optional(FieldRule::one_of(
            "payment_terms",
            &["prepaid", "net_30", "net_60", "net_90"],
        ))
        .optional(FieldRule::one_of("status", &STATUS_VALUES))
        .sample("name", "Global Foods Inc")
        .sample("email", "procurement@globalfoods.com")
        .sample("phone", "+1 212-555-0199")
        .sample("country", "United States")
        .sample("contact_person", "Maria Lopez")
        .sample("address", "200 Park Avenue New York")
        .sample("credit_limit", "250000")
        .sample("payment_terms", "net_30")
        .sample("status", "active")
        .build()
}
