//! Wire shapes for the two workspace operations the service consumes:
//! `get_objects` and `save_objects`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::refs::versioned_object_ref;

const OBJECT_INFO_FIELDS: usize = 11;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectIdentity {
    #[serde(rename = "ref")]
    pub reference: String,
}

impl ObjectIdentity {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

/// One entry of a `get_objects` response. Only `data` is interpreted; `info`
/// is kept raw so an unusual info tuple never fails a read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectData {
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectSaveData {
    #[serde(rename = "type")]
    pub type_name: String,
    pub data: Value,
    pub name: String,
    pub provenance: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveObjectsParams {
    pub workspace: String,
    pub objects: Vec<ObjectSaveData>,
}

/// Typed view over the workspace's positional object-info tuple:
///
/// `[id, name, type, save_date, version, saved_by, wsid, workspace, chsum, size, meta]`
///
/// Only the three ids that make up a versioned reference are mandatory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub struct ObjectInfo {
    pub object_id: u64,
    pub name: Option<String>,
    pub type_name: Option<String>,
    pub save_date: Option<String>,
    pub version: u64,
    pub saved_by: Option<String>,
    pub workspace_id: u64,
    pub workspace_name: Option<String>,
    pub checksum: Option<String>,
    pub size: Option<u64>,
    pub metadata: Option<Map<String, Value>>,
}

impl ObjectInfo {
    pub fn versioned_ref(&self) -> String {
        versioned_object_ref(self.workspace_id, self.object_id, self.version)
    }

    pub fn from_tuple(values: &[Value]) -> Result<Self, String> {
        Ok(Self {
            object_id: required_id(values, 0, "object id")?,
            name: optional_text(values, 1),
            type_name: optional_text(values, 2),
            save_date: optional_text(values, 3),
            version: required_id(values, 4, "version")?,
            saved_by: optional_text(values, 5),
            workspace_id: required_id(values, 6, "workspace id")?,
            workspace_name: optional_text(values, 7),
            checksum: optional_text(values, 8),
            size: values.get(9).and_then(Value::as_u64),
            metadata: values.get(10).and_then(Value::as_object).cloned(),
        })
    }
}

fn required_id(values: &[Value], position: usize, label: &str) -> Result<u64, String> {
    let Some(value) = values.get(position) else {
        return Err(format!("object info is missing {label} at position {position}"));
    };
    value
        .as_u64()
        .ok_or_else(|| format!("object info {label} at position {position} is not an id: {value}"))
}

fn optional_text(values: &[Value], position: usize) -> Option<String> {
    values
        .get(position)
        .and_then(Value::as_str)
        .map(str::to_string)
}

impl TryFrom<Vec<Value>> for ObjectInfo {
    type Error = String;

    fn try_from(values: Vec<Value>) -> Result<Self, Self::Error> {
        Self::from_tuple(&values)
    }
}

impl From<ObjectInfo> for Vec<Value> {
    fn from(info: ObjectInfo) -> Self {
        let text = |value: Option<String>| value.map(Value::String).unwrap_or(Value::Null);
        let mut values = Vec::with_capacity(OBJECT_INFO_FIELDS);
        values.push(Value::from(info.object_id));
        values.push(text(info.name));
        values.push(text(info.type_name));
        values.push(text(info.save_date));
        values.push(Value::from(info.version));
        values.push(text(info.saved_by));
        values.push(Value::from(info.workspace_id));
        values.push(text(info.workspace_name));
        values.push(text(info.checksum));
        values.push(info.size.map(Value::from).unwrap_or(Value::Null));
        values.push(info.metadata.map(Value::Object).unwrap_or(Value::Null));
        values
    }
}
