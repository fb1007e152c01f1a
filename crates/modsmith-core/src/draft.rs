//! Module draft lifecycle operations.
//!
//! The `ModuleDraft` struct lives in `modsmith-types`; this module provides
//! a free constructor plus an extension trait (`ModuleDraftExt`) with the
//! add/query operations the session controller drives. The extension trait
//! pattern is used because Rust does not allow inherent impls for types
//! defined in another crate.
//!
//! Every add operation delegates positioning to the ordering engine and
//! leaves the draft untouched on failure.

use modsmith_types::draft::{Block, Field, Link, ModuleDraft, RelatedList, Tab, Translations};
use modsmith_types::error::DesignError;

use crate::ordering::{Placement, insert_ordered};

/// Everything gathered during module creation, collected fully before the
/// draft exists. Collections always start empty.
#[derive(Debug, Clone)]
pub struct ModuleSeed {
    pub name: String,
    pub model_class: String,
    pub package: Option<String>,
    pub table_name: String,
    pub table_prefix: String,
    pub icon: Option<String>,
    pub is_for_admin: bool,
    pub default_route: String,
}

/// Create an empty `ModuleDraft` from validated creation metadata.
///
/// Fails with `InvalidName` unless the name matches `^[a-z0-9-]+$`.
pub fn new_module_draft(seed: ModuleSeed) -> Result<ModuleDraft, DesignError> {
    validate_module_name(&seed.name)?;

    Ok(ModuleDraft {
        name: seed.name,
        translations: Translations::new(),
        model_class: seed.model_class,
        package: seed.package,
        table_name: seed.table_name,
        table_prefix: seed.table_prefix,
        icon: seed.icon,
        is_for_admin: seed.is_for_admin,
        default_route: seed.default_route,
        tabs: Vec::new(),
        related_lists: Vec::new(),
        links: Vec::new(),
    })
}

/// Check the kebab-case module name pattern: lowercase letters, digits,
/// dashes, at least one character.
pub fn validate_module_name(name: &str) -> Result<(), DesignError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(DesignError::InvalidName(name.to_string()))
    }
}

/// Normalize operator input into a kebab-case module name candidate.
pub fn normalize_module_name(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace([' ', '_'], "-")
}

/// Normalize operator input into a snake_case field name candidate.
pub fn normalize_field_name(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
}

/// Convert a kebab-case name into a PascalCase model class default
/// ("book-type" -> "BookType").
pub fn studly_case(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Default table name for a module: snake_case plural of the name.
pub fn default_table_name(name: &str) -> String {
    format!("{}s", name.replace('-', "_"))
}

/// Lifecycle and query operations over a `ModuleDraft`.
pub trait ModuleDraftExt {
    /// Register a translation; the full key is unique within its locale, a
    /// later call with the same key overwrites.
    fn translate(&mut self, locale: &str, key: String, value: String);

    /// Look up a translation for the given locale and key.
    fn translation(&self, locale: &str, key: &str) -> Option<&str>;

    /// Insert a tab at the requested placement. Tab labels are unique.
    fn add_tab(&mut self, tab: Tab, placement: Placement) -> Result<(), DesignError>;

    /// Insert a block into the named tab. Block labels are unique within
    /// their tab; an unknown tab label is an anchoring defect.
    fn add_block(
        &mut self,
        tab_label: &str,
        block: Block,
        placement: Placement,
    ) -> Result<(), DesignError>;

    /// Insert a field into the named block. Field names are unique across
    /// the entire module; a collision fails with `DuplicateFieldName` and
    /// leaves the draft unchanged.
    fn add_field(
        &mut self,
        tab_label: &str,
        block_label: &str,
        field: Field,
        placement: Placement,
    ) -> Result<(), DesignError>;

    /// Insert a related list at module scope. Labels are unique.
    fn add_related_list(
        &mut self,
        list: RelatedList,
        placement: Placement,
    ) -> Result<(), DesignError>;

    /// Insert a link at module scope. Labels are unique.
    fn add_link(&mut self, link: Link, placement: Placement) -> Result<(), DesignError>;

    /// Every field of the module, flattened in tab/block/sequence order.
    fn all_fields(&self) -> Vec<&Field>;

    /// Find a field anywhere in the module by its name.
    fn find_field_by_name(&self, name: &str) -> Option<&Field>;

    /// Find a tab by label.
    fn find_tab(&self, label: &str) -> Option<&Tab>;

    /// Every (tab label, block label) pair, in document order.
    fn block_locators(&self) -> Vec<(String, String)>;
}

impl ModuleDraftExt for ModuleDraft {
    fn translate(&mut self, locale: &str, key: String, value: String) {
        self.translations
            .entry(locale.to_string())
            .or_default()
            .insert(key, value);
    }

    fn translation(&self, locale: &str, key: &str) -> Option<&str> {
        self.translations
            .get(locale)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
    }

    fn add_tab(&mut self, tab: Tab, placement: Placement) -> Result<(), DesignError> {
        if self.find_tab(&tab.label).is_some() {
            return Err(DesignError::DuplicateLabel {
                kind: "tab",
                label: tab.label,
            });
        }

        insert_ordered(&mut self.tabs, tab, placement)
    }

    fn add_block(
        &mut self,
        tab_label: &str,
        block: Block,
        placement: Placement,
    ) -> Result<(), DesignError> {
        let tab = self
            .tabs
            .iter_mut()
            .find(|t| t.label == tab_label)
            .ok_or_else(|| DesignError::AnchorNotFound(tab_label.to_string()))?;

        if tab.blocks.iter().any(|b| b.label == block.label) {
            return Err(DesignError::DuplicateLabel {
                kind: "block",
                label: block.label,
            });
        }

        insert_ordered(&mut tab.blocks, block, placement)
    }

    fn add_field(
        &mut self,
        tab_label: &str,
        block_label: &str,
        field: Field,
        placement: Placement,
    ) -> Result<(), DesignError> {
        if self.find_field_by_name(&field.name).is_some() {
            return Err(DesignError::DuplicateFieldName(field.name));
        }

        let block = self
            .tabs
            .iter_mut()
            .find(|t| t.label == tab_label)
            .and_then(|t| t.blocks.iter_mut().find(|b| b.label == block_label))
            .ok_or_else(|| DesignError::AnchorNotFound(block_label.to_string()))?;

        insert_ordered(&mut block.fields, field, placement)
    }

    fn add_related_list(
        &mut self,
        list: RelatedList,
        placement: Placement,
    ) -> Result<(), DesignError> {
        if self.related_lists.iter().any(|r| r.label == list.label) {
            return Err(DesignError::DuplicateLabel {
                kind: "related list",
                label: list.label,
            });
        }

        insert_ordered(&mut self.related_lists, list, placement)
    }

    fn add_link(&mut self, link: Link, placement: Placement) -> Result<(), DesignError> {
        if self.links.iter().any(|l| l.label == link.label) {
            return Err(DesignError::DuplicateLabel {
                kind: "link",
                label: link.label,
            });
        }

        insert_ordered(&mut self.links, link, placement)
    }

    fn all_fields(&self) -> Vec<&Field> {
        self.tabs
            .iter()
            .flat_map(|tab| tab.blocks.iter())
            .flat_map(|block| block.fields.iter())
            .collect()
    }

    fn find_field_by_name(&self, name: &str) -> Option<&Field> {
        self.all_fields().into_iter().find(|f| f.name == name)
    }

    fn find_tab(&self, label: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.label == label)
    }

    fn block_locators(&self) -> Vec<(String, String)> {
        self.tabs
            .iter()
            .flat_map(|tab| {
                tab.blocks
                    .iter()
                    .map(|block| (tab.label.clone(), block.label.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn seed(name: &str) -> ModuleSeed {
        ModuleSeed {
            name: name.to_string(),
            model_class: studly_case(name),
            package: None,
            table_name: default_table_name(name),
            table_prefix: String::new(),
            icon: None,
            is_for_admin: false,
            default_route: "list".to_string(),
        }
    }

    fn tab(label: &str) -> Tab {
        Tab {
            label: label.to_string(),
            icon: None,
            sequence: 0,
            blocks: vec![],
        }
    }

    fn block(label: &str) -> Block {
        Block {
            label: label.to_string(),
            icon: None,
            description: None,
            sequence: 0,
            fields: vec![],
        }
    }

    fn field(name: &str) -> Field {
        Field {
            name: name.to_string(),
            uitype: "text".to_string(),
            displaytype: "everywhere".to_string(),
            required: false,
            display_in_filter: true,
            wide: false,
            default_value: None,
            validation_rule: None,
            extension: BTreeMap::new(),
            sequence: 0,
        }
    }

    #[test]
    fn test_name_validation() {
        assert!(validate_module_name("book-type").is_ok());
        assert!(validate_module_name("a2").is_ok());
        assert!(validate_module_name("").is_err());
        assert!(validate_module_name("BookType").is_err());
        assert!(validate_module_name("book type").is_err());
        assert!(validate_module_name("book_type").is_err());
    }

    #[test]
    fn test_name_normalization() {
        assert_eq!(normalize_module_name("  Book Type "), "book-type");
        assert_eq!(normalize_module_name("book_type"), "book-type");
        assert_eq!(normalize_field_name("Created At"), "created_at");
        assert_eq!(normalize_field_name("created-at"), "created_at");
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(studly_case("book-type"), "BookType");
        assert_eq!(studly_case("invoice"), "Invoice");
        assert_eq!(default_table_name("book-type"), "book_types");
    }

    #[test]
    fn test_new_draft_starts_empty() {
        let draft = new_module_draft(seed("book-type")).unwrap();
        assert_eq!(draft.name, "book-type");
        assert_eq!(draft.model_class, "BookType");
        assert!(draft.tabs.is_empty());
        assert!(draft.related_lists.is_empty());
        assert!(draft.links.is_empty());
        assert!(draft.translations.is_empty());
    }

    #[test]
    fn test_new_draft_rejects_invalid_name() {
        let result = new_module_draft(seed("Book Type"));
        assert!(matches!(result, Err(DesignError::InvalidName(_))));
    }

    #[test]
    fn test_translate_is_unique_per_locale_key() {
        let mut draft = new_module_draft(seed("book-type")).unwrap();
        draft.translate("en", "tab.main".to_string(), "Main".to_string());
        draft.translate("fr", "tab.main".to_string(), "Principal".to_string());
        draft.translate("en", "tab.main".to_string(), "Overview".to_string());

        assert_eq!(draft.translation("en", "tab.main"), Some("Overview"));
        assert_eq!(draft.translation("fr", "tab.main"), Some("Principal"));
        assert_eq!(draft.translation("en", "tab.other"), None);
    }

    #[test]
    fn test_add_tab_rejects_duplicate_label() {
        let mut draft = new_module_draft(seed("book-type")).unwrap();
        draft.add_tab(tab("tab.main"), Placement::End).unwrap();

        let err = draft.add_tab(tab("tab.main"), Placement::End).unwrap_err();
        assert!(matches!(err, DesignError::DuplicateLabel { kind: "tab", .. }));
        assert_eq!(draft.tabs.len(), 1);
    }

    #[test]
    fn test_add_block_to_unknown_tab_is_anchor_defect() {
        let mut draft = new_module_draft(seed("book-type")).unwrap();
        let err = draft
            .add_block("tab.ghost", block("block.general"), Placement::End)
            .unwrap_err();
        assert!(matches!(err, DesignError::AnchorNotFound(_)));
    }

    #[test]
    fn test_field_names_unique_across_whole_module() {
        let mut draft = new_module_draft(seed("book-type")).unwrap();
        draft.add_tab(tab("tab.main"), Placement::End).unwrap();
        draft.add_tab(tab("tab.details"), Placement::End).unwrap();
        draft
            .add_block("tab.main", block("block.general"), Placement::End)
            .unwrap();
        draft
            .add_block("tab.details", block("block.meta"), Placement::End)
            .unwrap();

        draft
            .add_field("tab.main", "block.general", field("title"), Placement::End)
            .unwrap();

        // Same name in a different tab/block still collides.
        let snapshot = draft.clone();
        let err = draft
            .add_field("tab.details", "block.meta", field("title"), Placement::End)
            .unwrap_err();

        assert!(matches!(err, DesignError::DuplicateFieldName(_)));
        assert_eq!(draft, snapshot, "failed add must leave the draft unchanged");
    }

    #[test]
    fn test_all_fields_preserves_tab_block_order() {
        let mut draft = new_module_draft(seed("book-type")).unwrap();
        draft.add_tab(tab("tab.main"), Placement::End).unwrap();
        draft
            .add_block("tab.main", block("block.general"), Placement::End)
            .unwrap();

        draft
            .add_field("tab.main", "block.general", field("title"), Placement::End)
            .unwrap();
        draft
            .add_field(
                "tab.main",
                "block.general",
                field("isbn"),
                Placement::Before("title".to_string()),
            )
            .unwrap();

        let names: Vec<&str> = draft.all_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["isbn", "title"]);

        let sequences: Vec<u32> = draft.all_fields().iter().map(|f| f.sequence).collect();
        assert_eq!(sequences, [0, 1]);
    }

    #[test]
    fn test_block_locators_in_document_order() {
        let mut draft = new_module_draft(seed("book-type")).unwrap();
        draft.add_tab(tab("tab.main"), Placement::End).unwrap();
        draft.add_tab(tab("tab.details"), Placement::End).unwrap();
        draft
            .add_block("tab.main", block("block.general"), Placement::End)
            .unwrap();
        draft
            .add_block("tab.details", block("block.meta"), Placement::End)
            .unwrap();
        draft
            .add_block(
                "tab.main",
                block("block.pricing"),
                Placement::Before("block.general".to_string()),
            )
            .unwrap();

        assert_eq!(
            draft.block_locators(),
            vec![
                ("tab.main".to_string(), "block.pricing".to_string()),
                ("tab.main".to_string(), "block.general".to_string()),
                ("tab.details".to_string(), "block.meta".to_string()),
            ]
        );
    }
}
