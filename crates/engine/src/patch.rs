//! In-memory application of JSON-patch documents.
//!
//! Only top-level scalar fields are addressable; collections such as a
//! group's expenses are not. `add` and `replace` set the field,
//! `remove` clears it to `null`, so removing a required field is rejected
//! when the patched value is read back.

use api_types::patch::{PatchOp, PatchOperation};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{EngineError, ResultEngine};

/// Applies `operations` in order to a copy of `entity`.
///
/// The first bad operation aborts the whole patch; `entity` is never touched.
pub fn apply_patch<T>(entity: &T, operations: &[PatchOperation]) -> ResultEngine<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut object = match serde_json::to_value(entity) {
        Ok(Value::Object(object)) => object,
        Ok(_) => {
            return Err(EngineError::InvalidPatch(
                "target is not an object".to_string(),
            ));
        }
        Err(err) => return Err(EngineError::InvalidPatch(err.to_string())),
    };

    for operation in operations {
        let key = resolve_path(&object, &operation.path)?;
        let value = match operation.op {
            PatchOp::Add | PatchOp::Replace => operation.value.clone(),
            PatchOp::Remove => Value::Null,
        };
        object.insert(key, value);
    }

    serde_json::from_value(Value::Object(object))
        .map_err(|err| EngineError::InvalidPatch(err.to_string()))
}

/// Maps a pointer such as `/Title` to the existing key it names.
///
/// Array-valued fields are rejected: they are written through their own
/// resource, never through the owner's update.
fn resolve_path(object: &Map<String, Value>, path: &str) -> ResultEngine<String> {
    let invalid = || EngineError::InvalidPatch(format!("invalid path '{path}'"));

    let segment = path.strip_prefix('/').ok_or_else(invalid)?;
    if segment.is_empty() || segment.contains('/') {
        return Err(invalid());
    }
    let name = segment.replace("~1", "/").replace("~0", "~");

    let (key, value) = object
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        .ok_or_else(invalid)?;
    if value.is_array() {
        return Err(EngineError::InvalidPatch(format!(
            "path '{path}' names a collection"
        )));
    }
    Ok(key.clone())
}
