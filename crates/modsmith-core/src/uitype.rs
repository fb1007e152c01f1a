//! Uitype extension point.
//!
//! After a field's common attributes are collected, the uitype it renders
//! with may need extra, type-specific attributes (a picklist needs its
//! option list, a reference field needs a target module). This is the
//! single polymorphic seam in the designer: a registry hands out an
//! optional contributor per uitype id, and the contributor mutates the
//! field's extension payload (and, where needed, the draft's translations)
//! through the abstract prompter. No registered contributor means no-op.

use modsmith_types::draft::{Field, ModuleDraft};
use modsmith_types::error::PromptError;

use crate::prompt::Prompter;

/// Collaborator data a contributor may need, resolved by the session before
/// the contributor runs so contributors stay synchronous.
#[derive(Debug, Clone, Default)]
pub struct FieldOptionContext {
    /// Active locale for any translations the contributor registers.
    pub locale: String,
    /// Names of installed modules, for reference-type targets.
    pub known_modules: Vec<String>,
}

/// Contributes uitype-specific attributes to a field under construction.
pub trait FieldOptionContributor: Send + Sync {
    fn contribute(
        &self,
        ctx: &FieldOptionContext,
        draft: &mut ModuleDraft,
        field: &mut Field,
        prompter: &dyn Prompter,
    ) -> Result<(), PromptError>;
}

/// Catalog of field-rendering types and display-visibility modes.
pub trait UitypeRegistry: Send + Sync {
    /// The contributor registered for a uitype id, if any.
    fn contributor_for(&self, uitype: &str) -> Option<&dyn FieldOptionContributor>;

    /// Ordered set of available uitype ids.
    fn uitype_ids(&self) -> Vec<String>;

    /// Ordered set of available displaytype ids.
    fn displaytype_ids(&self) -> Vec<String>;
}

/// Run the contributor registered for the field's uitype, if any.
///
/// Invoked after the common attributes are set but before the field is
/// positioned and saved.
pub fn contribute_field_options<R: UitypeRegistry>(
    registry: &R,
    ctx: &FieldOptionContext,
    draft: &mut ModuleDraft,
    field: &mut Field,
    prompter: &dyn Prompter,
) -> Result<(), PromptError> {
    match registry.contributor_for(&field.uitype) {
        Some(contributor) => contributor.contribute(ctx, draft, field, prompter),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use modsmith_types::draft::ExtensionValue;

    use super::*;
    use crate::draft::{ModuleDraftExt, ModuleSeed, new_module_draft};

    struct NullPrompter;

    impl Prompter for NullPrompter {
        fn input(&self, _prompt: &str) -> Result<String, PromptError> {
            Ok(String::new())
        }

        fn input_with_default(&self, _prompt: &str, default: &str) -> Result<String, PromptError> {
            Ok(default.to_string())
        }

        fn input_optional(&self, _prompt: &str) -> Result<Option<String>, PromptError> {
            Ok(None)
        }

        fn select(
            &self,
            _prompt: &str,
            _items: &[String],
            default: usize,
        ) -> Result<usize, PromptError> {
            Ok(default)
        }

        fn confirm(&self, _prompt: &str, default: bool) -> Result<bool, PromptError> {
            Ok(default)
        }

        fn info(&self, _message: &str) {}
        fn success(&self, _message: &str) {}
        fn error(&self, _message: &str) {}
        fn table(&self, _headers: &[&str], _rows: &[Vec<String>]) {}
    }

    struct MarkerContributor;

    impl FieldOptionContributor for MarkerContributor {
        fn contribute(
            &self,
            ctx: &FieldOptionContext,
            draft: &mut ModuleDraft,
            field: &mut Field,
            _prompter: &dyn Prompter,
        ) -> Result<(), PromptError> {
            field
                .extension
                .insert("marker".to_string(), ExtensionValue::Bool(true));
            draft.translate(
                &ctx.locale,
                format!("field.{}.marker", field.name),
                "Marker".to_string(),
            );
            Ok(())
        }
    }

    struct OneTypeRegistry;

    impl UitypeRegistry for OneTypeRegistry {
        fn contributor_for(&self, uitype: &str) -> Option<&dyn FieldOptionContributor> {
            (uitype == "marker").then_some(&MarkerContributor as &dyn FieldOptionContributor)
        }

        fn uitype_ids(&self) -> Vec<String> {
            vec!["marker".to_string(), "text".to_string()]
        }

        fn displaytype_ids(&self) -> Vec<String> {
            vec!["everywhere".to_string()]
        }
    }

    fn field(name: &str, uitype: &str) -> Field {
        Field {
            name: name.to_string(),
            uitype: uitype.to_string(),
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

    fn draft() -> ModuleDraft {
        new_module_draft(ModuleSeed {
            name: "book-type".to_string(),
            model_class: "BookType".to_string(),
            package: None,
            table_name: "book_types".to_string(),
            table_prefix: String::new(),
            icon: None,
            is_for_admin: false,
            default_route: "list".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_registered_contributor_mutates_extension_and_translations() {
        let mut draft = draft();
        let mut field = field("status", "marker");
        let ctx = FieldOptionContext {
            locale: "en".to_string(),
            known_modules: vec![],
        };

        contribute_field_options(&OneTypeRegistry, &ctx, &mut draft, &mut field, &NullPrompter)
            .unwrap();

        assert_eq!(
            field.extension.get("marker"),
            Some(&ExtensionValue::Bool(true))
        );
        assert_eq!(
            draft.translation("en", "field.status.marker"),
            Some("Marker")
        );
    }

    #[test]
    fn test_unregistered_uitype_is_noop() {
        let mut draft = draft();
        let mut field = field("title", "text");
        let ctx = FieldOptionContext::default();

        contribute_field_options(&OneTypeRegistry, &ctx, &mut draft, &mut field, &NullPrompter)
            .unwrap();

        assert!(field.extension.is_empty());
        assert!(draft.translations.is_empty());
    }
}
