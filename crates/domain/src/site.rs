//! Site configuration value types advertised to Micropub clients.

use serde::{Deserialize, Serialize};

/// A destination posts can be syndicated to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syndication {
    pub uid: String,
    pub name: String,
}

/// A channel (feed, section) posts can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub uid: String,
    pub name: String,
}

/// A post type the site supports, with the properties clients should offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostType {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    #[serde(
        default,
        rename = "required-properties",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub required_properties: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn should_serialize_post_type_with_wire_names() {
        let post_type = PostType {
            kind: "note".to_string(),
            name: "Note".to_string(),
            properties: vec!["content".to_string(), "category".to_string()],
            required_properties: vec!["content".to_string()],
        };

        assert_eq!(
            serde_json::to_value(&post_type).unwrap(),
            json!({
                "type": "note",
                "name": "Note",
                "properties": ["content", "category"],
                "required-properties": ["content"],
            })
        );
    }

    #[test]
    fn should_omit_empty_property_lists() {
        let post_type = PostType {
            kind: "photo".to_string(),
            name: "Photo".to_string(),
            properties: vec![],
            required_properties: vec![],
        };

        assert_eq!(
            serde_json::to_value(&post_type).unwrap(),
            json!({"type": "photo", "name": "Photo"})
        );
    }
}
