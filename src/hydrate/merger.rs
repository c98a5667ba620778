use crate::hydrate::types::DehydratedRecord;
use serde_json::{Map, Value};

/// Merge a record's annotations into a fetched post, in place.
///
/// Annotation values are appended to the post's `entities` arrays; nothing
/// already present is removed, reordered or deduplicated. The merge then
/// recurses into `retweeted_status` and `quoted_status` wherever both the
/// post and the record have the nested level. Merging the same record
/// twice appends its values twice.
pub fn merge_entities(post: &mut Value, record: &DehydratedRecord) {
    let Value::Object(fields) = post else {
        return;
    };

    if let Some(entities) = &record.entities {
        let target = entities_object(fields);

        for (entity_type, values) in entities {
            let slot = target
                .entry(entity_type.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(existing) = slot {
                existing.extend(values.iter().cloned());
            }
        }
    }

    merge_nested(fields, "retweeted_status", record.retweeted_status.as_deref());
    merge_nested(fields, "quoted_status", record.quoted_status.as_deref());
}

/// The post's `entities` object, created (or replaced if not an object)
fn entities_object(fields: &mut Map<String, Value>) -> &mut Map<String, Value> {
    let entities = fields
        .entry("entities")
        .or_insert_with(|| Value::Object(Map::new()));
    if !entities.is_object() {
        *entities = Value::Object(Map::new());
    }
    match entities {
        Value::Object(map) => map,
        _ => unreachable!("entities was just made an object"),
    }
}

fn merge_nested(fields: &mut Map<String, Value>, key: &str, record: Option<&DehydratedRecord>) {
    // a non-object nested value (e.g. null) has nothing to merge into
    if let (Some(nested), Some(record)) = (fields.get_mut(key), record) {
        merge_entities(nested, record);
    }
}
