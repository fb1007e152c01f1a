//! Builtin uitype registry.
//!
//! Registers the interactive option contributors for the uitypes that need
//! attributes beyond the common ones: `select` collects an option list,
//! `entity` needs a target module, `number` takes optional bounds. All
//! other uitypes have no contributor and the extension point is a no-op.

use std::collections::BTreeMap;

use modsmith_core::draft::{ModuleDraftExt, normalize_field_name};
use modsmith_core::prompt::Prompter;
use modsmith_core::uitype::{FieldOptionContext, FieldOptionContributor, UitypeRegistry};
use modsmith_types::draft::{ExtensionValue, Field, ModuleDraft};
use modsmith_types::error::PromptError;

/// Available uitype ids, sorted.
pub const UITYPE_IDS: [&str; 10] = [
    "boolean", "date", "email", "entity", "number", "phone", "select", "text", "textarea", "url",
];

/// Available displaytype ids, most permissive first.
pub const DISPLAYTYPE_IDS: [&str; 4] = ["everywhere", "detail", "list", "hidden"];

/// Registry over the builtin uitypes and their contributors.
pub struct BuiltinUitypeRegistry {
    contributors: BTreeMap<&'static str, Box<dyn FieldOptionContributor>>,
}

impl BuiltinUitypeRegistry {
    pub fn new() -> Self {
        let mut contributors: BTreeMap<&'static str, Box<dyn FieldOptionContributor>> =
            BTreeMap::new();
        contributors.insert("select", Box::new(SelectOptionsContributor));
        contributors.insert("entity", Box::new(EntityTargetContributor));
        contributors.insert("number", Box::new(NumberRangeContributor));
        Self { contributors }
    }
}

impl Default for BuiltinUitypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UitypeRegistry for BuiltinUitypeRegistry {
    fn contributor_for(&self, uitype: &str) -> Option<&dyn FieldOptionContributor> {
        self.contributors.get(uitype).map(|b| b.as_ref())
    }

    fn uitype_ids(&self) -> Vec<String> {
        UITYPE_IDS.iter().map(|s| s.to_string()).collect()
    }

    fn displaytype_ids(&self) -> Vec<String> {
        DISPLAYTYPE_IDS.iter().map(|s| s.to_string()).collect()
    }
}

// ---------------------------------------------------------------------------
// Contributors
// ---------------------------------------------------------------------------

/// Collects the option list of a `select` field into
/// `extension["choices"]`, registering a translation per option.
struct SelectOptionsContributor;

impl FieldOptionContributor for SelectOptionsContributor {
    fn contribute(
        &self,
        ctx: &FieldOptionContext,
        draft: &mut ModuleDraft,
        field: &mut Field,
        prompter: &dyn Prompter,
    ) -> Result<(), PromptError> {
        let mut choices: Vec<String> = Vec::new();

        loop {
            let value = normalize_field_name(&prompter.input("Option value (e.g. draft)")?);
            if value.is_empty() {
                prompter.error("Option value must not be empty");
            } else if choices.contains(&value) {
                prompter.error(&format!("Option '{value}' was already added"));
            } else {
                let translation = prompter.input(&format!("Translation [{}]", ctx.locale))?;
                draft.translate(
                    &ctx.locale,
                    format!("field.{}.{value}", field.name),
                    translation,
                );
                choices.push(value);
            }

            if !prompter.confirm("Add another option?", true)? {
                break;
            }
        }

        if !choices.is_empty() {
            field
                .extension
                .insert("choices".to_string(), ExtensionValue::StringList(choices));
        }
        Ok(())
    }
}

/// Resolves the target module of an `entity` (reference) field into
/// `extension["module"]`.
struct EntityTargetContributor;

impl FieldOptionContributor for EntityTargetContributor {
    fn contribute(
        &self,
        ctx: &FieldOptionContext,
        _draft: &mut ModuleDraft,
        field: &mut Field,
        prompter: &dyn Prompter,
    ) -> Result<(), PromptError> {
        let target = if ctx.known_modules.is_empty() {
            prompter.input("Related module name")?
        } else {
            let pick = prompter.select("Select the related module", &ctx.known_modules, 0)?;
            ctx.known_modules[pick].clone()
        };

        field
            .extension
            .insert("module".to_string(), ExtensionValue::String(target));
        Ok(())
    }
}

/// Optional numeric bounds for a `number` field.
struct NumberRangeContributor;

impl FieldOptionContributor for NumberRangeContributor {
    fn contribute(
        &self,
        _ctx: &FieldOptionContext,
        _draft: &mut ModuleDraft,
        field: &mut Field,
        prompter: &dyn Prompter,
    ) -> Result<(), PromptError> {
        for (key, prompt) in [("min", "Minimum value"), ("max", "Maximum value")] {
            if let Some(raw) = prompter.input_optional(prompt)? {
                match raw.parse::<f64>() {
                    Ok(value) => {
                        field
                            .extension
                            .insert(key.to_string(), ExtensionValue::Number(value));
                    }
                    Err(_) => prompter.error(&format!("'{raw}' is not a number, ignored")),
                }
            }
        }
        Ok(())
    }
}
