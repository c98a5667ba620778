use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Identifier of a post, as assigned by the platform
pub type PostId = u64;

/// Maximum number of identifiers the lookup endpoint accepts per call
pub const BATCH_SIZE: usize = 100;

/// One "dehydrated" post: an identifier plus standoff annotations.
///
/// Quoted and retweeted posts carry their own annotations in the same
/// shape, so the structure nests. Unknown input fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DehydratedRecord {
    pub id: PostId,

    /// Annotations keyed by entity type (hashtags, user_mentions, ...),
    /// in input order
    #[serde(default)]
    pub entities: Option<IndexMap<String, Vec<Value>>>,

    /// Annotations belonging to the retweeted post, if this is a retweet
    #[serde(default)]
    pub retweeted_status: Option<Box<DehydratedRecord>>,

    /// Annotations belonging to the quoted post, if this is a quote
    #[serde(default)]
    pub quoted_status: Option<Box<DehydratedRecord>>,
}

impl DehydratedRecord {
    pub fn new(id: PostId) -> Self {
        DehydratedRecord {
            id,
            entities: None,
            retweeted_status: None,
            quoted_status: None,
        }
    }

    /// Append annotations of one entity type
    pub fn with_entities(mut self, entity_type: impl Into<String>, values: Vec<Value>) -> Self {
        self.entities
            .get_or_insert_with(IndexMap::new)
            .entry(entity_type.into())
            .or_default()
            .extend(values);
        self
    }

    pub fn with_retweeted(mut self, record: DehydratedRecord) -> Self {
        self.retweeted_status = Some(Box::new(record));
        self
    }

    pub fn with_quoted(mut self, record: DehydratedRecord) -> Self {
        self.quoted_status = Some(Box::new(record));
        self
    }
}

/// Read the integer `id` of a fetched post
pub fn post_id(post: &Value) -> Option<PostId> {
    post.get("id").and_then(Value::as_u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_ignored() {
        let record: DehydratedRecord = serde_json::from_value(json!({
            "id": 7,
            "text": "ignored",
            "entities": {"hashtags": [{"text": "a"}]},
            "quoted_status": {"id": 8, "lang": "en"}
        }))
        .unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.entities.as_ref().unwrap()["hashtags"].len(), 1);
        assert_eq!(record.quoted_status.as_ref().unwrap().id, 8);
        assert!(record.retweeted_status.is_none());
    }

    #[test]
    fn test_entity_types_keep_input_order() {
        let record: DehydratedRecord =
            serde_json::from_str(r#"{"id": 1, "entities": {"zz": [1], "aa": [2], "mm": []}}"#).unwrap();

        let types: Vec<&str> = record.entities.as_ref().unwrap().keys().map(String::as_str).collect();
        assert_eq!(types, vec!["zz", "aa", "mm"]);
    }

    #[test]
    fn test_null_entities() {
        let record: DehydratedRecord =
            serde_json::from_value(json!({"id": 1, "entities": null})).unwrap();
        assert!(record.entities.is_none());
    }

    #[test]
    fn test_missing_id_rejected() {
        let result = serde_json::from_value::<DehydratedRecord>(json!({"entities": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_post_id() {
        assert_eq!(post_id(&json!({"id": 1234567890123456789u64})), Some(1234567890123456789));
        assert_eq!(post_id(&json!({"id_str": "1"})), None);
        assert_eq!(post_id(&json!({"id": "1"})), None);
    }
}
