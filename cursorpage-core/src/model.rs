//! Document model field metadata
//!
//! Each document type declares, once, which serialization tag each of its
//! fields carries. The pagination layer uses the table to map a serialized
//! field name (such as `_id`) back to the type's own field name.

use crate::query::ID_FIELD;

/// Tag format used for document field names
pub const DOCUMENT_TAG_FORMAT: &str = "bson";

/// A declared field and its serialization tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name in the type
    pub name: String,
    /// `(format, tag)` pairs, e.g. `("bson", "userId,omitempty")`
    pub tags: Vec<(String, String)>,
}

impl FieldDescriptor {
    /// Create a field with no tags
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
        }
    }

    /// Add a tag for a format
    pub fn tag(mut self, format: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((format.into(), value.into()));
        self
    }

    /// Add a document field-name tag
    pub fn bson(self, value: impl Into<String>) -> Self {
        self.tag(DOCUMENT_TAG_FORMAT, value)
    }

    /// Raw tag value for a format, options included
    pub fn tag_value(&self, format: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, v)| v.as_str())
    }

    /// Tag value for a format with trailing options (`,omitempty`) removed
    pub fn tag_name(&self, format: &str) -> Option<&str> {
        self.tag_value(format)
            .map(|value| value.split_once(',').map_or(value, |(name, _)| name))
    }
}

/// Field table of a document type, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Type name
    pub name: String,
    /// Declared fields
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// First field whose tag for `format` names `tag`
    pub fn field_by_tag(&self, format: &str, tag: &str) -> Option<&FieldDescriptor> {
        if tag.is_empty() {
            return None;
        }
        self.fields
            .iter()
            .find(|field| field.tag_name(format) == Some(tag))
    }
}

/// Resolve the field name whose document tag is `tag`.
///
/// Returns an empty string when the type is absent, the tag is empty or no
/// field carries the tag. An empty result means "unresolved" and must not be
/// used as a field name.
pub fn resolve_field_name_by_tag(ty: Option<&TypeDescriptor>, tag: &str) -> String {
    ty.and_then(|ty| ty.field_by_tag(DOCUMENT_TAG_FORMAT, tag))
        .map(|field| field.name.clone())
        .unwrap_or_default()
}

/// A document type with a static field table.
///
/// Implementations build the descriptor once, usually in a
/// `std::sync::OnceLock`.
pub trait DocumentModel {
    fn descriptor() -> &'static TypeDescriptor;

    /// Field name for a document tag; empty when unresolved
    fn field_for_tag(tag: &str) -> String {
        resolve_field_name_by_tag(Some(Self::descriptor()), tag)
    }

    /// Field holding the identity value, if the type declares one
    fn identity_field() -> Option<&'static str> {
        Self::descriptor()
            .field_by_tag(DOCUMENT_TAG_FORMAT, ID_FIELD)
            .map(|field| field.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    struct Item;

    impl DocumentModel for Item {
        fn descriptor() -> &'static TypeDescriptor {
            static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                TypeDescriptor::new("Item")
                    .field(FieldDescriptor::new("ID").tag("json", "id").bson("_id"))
                    .field(FieldDescriptor::new("Name").tag("json", "name").bson("name"))
                    .field(
                        FieldDescriptor::new("UserID")
                            .tag("json", "userId")
                            .bson("userId,omitempty"),
                    )
                    .field(
                        FieldDescriptor::new("CreatedAt")
                            .tag("json", "createdAt")
                            .bson("createdAt"),
                    )
            })
        }
    }

    #[test]
    fn test_resolve_exact_tag() {
        assert_eq!(resolve_field_name_by_tag(Some(Item::descriptor()), "name"), "Name");
    }

    #[test]
    fn test_resolve_ignores_tag_options() {
        assert_eq!(
            resolve_field_name_by_tag(Some(Item::descriptor()), "userId"),
            "UserID"
        );
        assert_eq!(
            resolve_field_name_by_tag(Some(Item::descriptor()), "userId,omitempty"),
            ""
        );
    }

    #[test]
    fn test_resolve_unmatched_inputs() {
        assert_eq!(
            resolve_field_name_by_tag(Some(Item::descriptor()), "notastructfield"),
            ""
        );
        assert_eq!(resolve_field_name_by_tag(Some(Item::descriptor()), ""), "");
        assert_eq!(resolve_field_name_by_tag(None, "name"), "");
    }

    #[test]
    fn test_resolve_reads_document_format_only() {
        // "id" is only a json tag
        assert_eq!(resolve_field_name_by_tag(Some(Item::descriptor()), "id"), "");
    }

    #[test]
    fn test_first_declared_field_wins() {
        let ty = TypeDescriptor::new("Dup")
            .field(FieldDescriptor::new("First").bson("code"))
            .field(FieldDescriptor::new("Second").bson("code,omitempty"));
        assert_eq!(resolve_field_name_by_tag(Some(&ty), "code"), "First");
    }

    #[test]
    fn test_untagged_and_empty_tags() {
        let ty = TypeDescriptor::new("Loose")
            .field(FieldDescriptor::new("Hidden"))
            .field(FieldDescriptor::new("Blank").bson(",omitempty"));
        assert_eq!(resolve_field_name_by_tag(Some(&ty), "Hidden"), "");
        assert_eq!(resolve_field_name_by_tag(Some(&ty), ""), "");
        assert_eq!(ty.fields[1].tag_name(DOCUMENT_TAG_FORMAT), Some(""));
    }

    #[test]
    fn test_model_helpers() {
        assert_eq!(Item::identity_field(), Some("ID"));
        assert_eq!(Item::field_for_tag("createdAt"), "CreatedAt");
        assert_eq!(Item::field_for_tag("missing"), "");
    }
}
