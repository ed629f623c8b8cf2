//! Serde helpers shared by the db models
//!
//! 记录 ID 在两种表示之间通用：
//! - API JSON 里是 "table:key" 字符串
//! - 嵌入式 SurrealDB 返回原生 RecordId 结构
//!
//! 序列化时统一输出字符串形式，让 db 行可以直接作为响应体。

use serde::{Deserialize, Deserializer};

/// Missing or null booleans default to true (used for account activation)
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<bool>::deserialize(deserializer)?;
    Ok(value.unwrap_or(true))
}

/// `Option<RecordId>` that reads both wire formats and writes "table:key"
pub mod option_record_id {
    use serde::de::{self, MapAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::fmt;
    use surrealdb::RecordId;

    pub fn serialize<S>(id: &Option<RecordId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id {
            Some(id) => serializer.serialize_some(&id.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionIdVisitor)
    }

    struct OptionIdVisitor;

    impl<'de> Visitor<'de> for OptionIdVisitor {
        type Value = Option<RecordId>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a record id as 'table:key' text, a native record, or null")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(IdVisitor).map(Some)
        }
    }

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = RecordId;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a record id as 'table:key' text or a native record")
        }

        fn visit_str<E: de::Error>(self, text: &str) -> Result<Self::Value, E> {
            text.parse::<RecordId>()
                .map_err(|_| E::custom(format!("malformed record id '{}'", text)))
        }

        // 原生 RecordId 走 SurrealDB 自己的反序列化
        fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
            RecordId::deserialize(de::value::MapAccessDeserializer::new(access))
        }
    }
}
