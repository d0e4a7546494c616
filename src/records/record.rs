use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single row in the external store: an opaque id plus a mapping of field
/// name to value. The store owns the schema; the gateway treats fields as
/// free-form JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

/// Tables exposed by this deployment's base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Posts,
    Comments,
    Users,
    Tags,
    Subscribers,
}

impl Table {
    pub fn as_str(self) -> &'static str {
        match self {
            Table::Posts => "Posts",
            Table::Comments => "Comments",
            Table::Users => "Users",
            Table::Tags => "Tags",
            Table::Subscribers => "Subscribers",
        }
    }
}
