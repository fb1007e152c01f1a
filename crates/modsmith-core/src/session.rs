//! Interactive design session state machine.
//!
//! Drives the top-level loop: detect existing drafts, offer
//! resume/create/delete, then dispatch the builder actions (tab, block,
//! field, related list, link, install, exit). Each successful add mutates
//! the draft through the ordering engine, saves the full document, and
//! nudges the menu default toward the logically-following action.
//!
//! The controller is generic over its collaborators (draft store, uitype
//! registry, catalogs, installer, prompter) and owns the single draft being
//! worked on; there is no ambient session global.

use thiserror::Error;

use modsmith_types::draft::{
    Block, ButtonColor, ConfirmDialog, Field, HttpMethod, Link, LinkAction, LinkKind,
    ModuleDraft, RelatedList, RelatedListAction, RelatedListKind, Tab,
};
use modsmith_types::error::{DesignError, PromptError, StoreError};

use crate::catalog::{ModuleCatalog, PackageCatalog};
use crate::draft::{
    ModuleDraftExt, ModuleSeed, default_table_name, new_module_draft, normalize_field_name,
    normalize_module_name, studly_case, validate_module_name,
};
use crate::draft_store::{DesignedModule, DraftStore};
use crate::install::Installer;
use crate::ordering::Placement;
use crate::prompt::Prompter;
use crate::uitype::{FieldOptionContext, UitypeRegistry, contribute_field_options};

const CREATE_CHOICE: &str = "Create a new module";
const REMOVE_CHOICE: &str = "Remove a designed module from the list";

/// Session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Existing drafts were found; the operator is choosing one.
    SelectingDraft,
    /// No module loaded; only creation is offered.
    Idle,
    /// A draft is loaded and all builder actions are available.
    ModuleLoaded,
    /// The session ended (install or explicit exit).
    Terminated,
}

/// The builder actions of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderAction {
    CreateModule,
    AddTab,
    AddBlock,
    AddField,
    AddRelatedList,
    AddLink,
    Install,
    Exit,
}

impl BuilderAction {
    fn label(self) -> &'static str {
        match self {
            BuilderAction::CreateModule => CREATE_CHOICE,
            BuilderAction::AddTab => "Add a tab",
            BuilderAction::AddBlock => "Add a block",
            BuilderAction::AddField => "Add a field",
            BuilderAction::AddRelatedList => "Add a related list",
            BuilderAction::AddLink => "Add a link",
            BuilderAction::Install => "Install module",
            BuilderAction::Exit => "Exit",
        }
    }
}

/// Fatal session failures.
///
/// Operator-recoverable design errors never surface here; they re-enter the
/// menu loop. `Internal` wraps consistency errors such as a missing anchor,
/// which indicate a defect rather than bad input.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal designer error: {0}")]
    Internal(DesignError),
}

/// Interactive session controller.
pub struct SessionController<S, R, M, P, I, Pr> {
    store: S,
    registry: R,
    modules: M,
    packages: P,
    installer: I,
    prompter: Pr,
    locale: String,
    state: SessionState,
    module: Option<ModuleDraft>,
}

impl<S, R, M, P, I, Pr> SessionController<S, R, M, P, I, Pr>
where
    S: DraftStore,
    R: UitypeRegistry,
    M: ModuleCatalog,
    P: PackageCatalog,
    I: Installer,
    Pr: Prompter,
{
    pub fn new(
        store: S,
        registry: R,
        modules: M,
        packages: P,
        installer: I,
        prompter: Pr,
        locale: String,
    ) -> Self {
        Self {
            store,
            registry,
            modules,
            packages,
            installer,
            prompter,
            locale,
            state: SessionState::Idle,
            module: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn module(&self) -> Option<&ModuleDraft> {
        self.module.as_ref()
    }

    /// Run the session until the operator installs or exits.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        let drafts = self.store.list_all().await?;

        let mut next = if drafts.is_empty() {
            self.state = SessionState::Idle;
            BuilderAction::CreateModule
        } else {
            self.state = SessionState::SelectingDraft;
            self.select_draft(drafts).await?
        };

        while self.state != SessionState::Terminated {
            let action = self.choose_action(next)?;
            next = self.dispatch(action).await?;
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Draft selection
    // -----------------------------------------------------------------------

    /// Offer resume / create / delete over the saved drafts.
    async fn select_draft(
        &mut self,
        mut drafts: Vec<DesignedModule>,
    ) -> Result<BuilderAction, SessionError> {
        loop {
            if drafts.is_empty() {
                self.state = SessionState::Idle;
                return Ok(BuilderAction::CreateModule);
            }

            let mut items: Vec<String> = drafts.iter().map(|d| d.name.clone()).collect();
            items.push(CREATE_CHOICE.to_string());
            items.push(REMOVE_CHOICE.to_string());

            let pick = self.prompter.select(
                "Some modules are being designed. Choose a module to continue or select an action to perform",
                &items,
                0,
            )?;

            if pick == drafts.len() {
                self.state = SessionState::Idle;
                return Ok(BuilderAction::CreateModule);
            }

            if pick == drafts.len() + 1 {
                let names: Vec<String> = drafts.iter().map(|d| d.name.clone()).collect();
                let index = self.prompter.select(
                    "What designed module do you want to remove from the list?",
                    &names,
                    0,
                )?;
                let name = drafts.remove(index).name;
                self.store.delete_by_name(&name).await?;
                self.prompter
                    .info(&format!("'{name}' was removed from the list"));
                continue;
            }

            let chosen = drafts.remove(pick);
            self.prompter
                .info(&format!("Selected module: {}", chosen.name));
            self.module = Some(chosen.document);
            self.state = SessionState::ModuleLoaded;
            return Ok(BuilderAction::AddTab);
        }
    }

    // -----------------------------------------------------------------------
    // Action menu
    // -----------------------------------------------------------------------

    fn choose_action(&self, default: BuilderAction) -> Result<BuilderAction, SessionError> {
        let actions: &[BuilderAction] = if self.module.is_some() {
            &[
                BuilderAction::AddTab,
                BuilderAction::AddBlock,
                BuilderAction::AddField,
                BuilderAction::AddRelatedList,
                BuilderAction::AddLink,
                BuilderAction::Install,
                BuilderAction::Exit,
            ]
        } else {
            &[BuilderAction::CreateModule, BuilderAction::Exit]
        };

        let items: Vec<String> = actions.iter().map(|a| a.label().to_string()).collect();
        let default_index = actions.iter().position(|a| *a == default).unwrap_or(0);

        let pick =
            self.prompter
                .select("What action do you want to perform?", &items, default_index)?;

        Ok(actions[pick])
    }

    async fn dispatch(&mut self, action: BuilderAction) -> Result<BuilderAction, SessionError> {
        match action {
            BuilderAction::CreateModule => self.create_module().await,
            BuilderAction::AddTab => self.add_tab_flow().await,
            BuilderAction::AddBlock => self.add_block_flow().await,
            BuilderAction::AddField => self.add_field_flow().await,
            BuilderAction::AddRelatedList => self.add_related_list_flow().await,
            BuilderAction::AddLink => self.add_link_flow().await,
            BuilderAction::Install => self.install_flow().await,
            BuilderAction::Exit => {
                self.state = SessionState::Terminated;
                Ok(BuilderAction::Exit)
            }
        }
    }

    /// Guard for every action except creation. Unreachable through the
    /// menus, which never offer add actions without a loaded module.
    fn module_missing(&self) -> bool {
        if self.module.is_none() {
            self.prompter.error("You must create a module first");
            true
        } else {
            false
        }
    }

    // -----------------------------------------------------------------------
    // Create module
    // -----------------------------------------------------------------------

    async fn create_module(&mut self) -> Result<BuilderAction, SessionError> {
        let locale = self.locale.clone();

        loop {
            // Explicit retry loop on invalid names, abortable by the
            // operator; never recurses.
            let name = loop {
                let raw = self
                    .prompter
                    .input("What is the module name? (e.g. book-type)")?;
                let candidate = normalize_module_name(&raw);
                match validate_module_name(&candidate) {
                    Ok(()) => break candidate,
                    Err(err) => {
                        self.prompter.error(&err.to_string());
                        if !self.prompter.confirm("Try again?", true)? {
                            return Ok(BuilderAction::CreateModule);
                        }
                    }
                }
            };

            let plural = self
                .prompter
                .input(&format!("Translation plural [{locale}]"))?;
            let singular = self
                .prompter
                .input(&format!("Translation singular [{locale}]"))?;

            let model_class = self
                .prompter
                .input_with_default("Model class", &studly_case(&name))?;

            let mut package = None;
            if self.prompter.confirm(
                "Do you want to create this module in an external package?",
                false,
            )? {
                package = self.select_package().await?;
            }

            let table_name = self
                .prompter
                .input_with_default("Table name", &default_table_name(&name))?;

            let default_prefix = package
                .as_deref()
                .and_then(|p| p.rsplit('/').next())
                .map(|p| format!("{p}_"))
                .unwrap_or_default();
            let table_prefix = self
                .prompter
                .input_with_default("Table prefix", &default_prefix)?;

            let icon = self.prompter.input_optional("Icon name (e.g. book)")?;
            let is_for_admin = self
                .prompter
                .confirm("Is this module for the administration panel?", false)?;
            let default_route = self.prompter.input_with_default("Default route", "list")?;

            self.prompter.table(
                &[
                    "Name", "Package", "Model", "Table", "Prefix", "Icon", "For admin", "Route",
                ],
                &[vec![
                    name.clone(),
                    package.clone().unwrap_or_default(),
                    model_class.clone(),
                    table_name.clone(),
                    table_prefix.clone(),
                    icon.clone().unwrap_or_default(),
                    if is_for_admin { "Yes" } else { "No" }.to_string(),
                    default_route.clone(),
                ]],
            );

            if !self.prompter.confirm("Is this information correct?", true)? {
                continue;
            }

            let seed = ModuleSeed {
                name: name.clone(),
                model_class,
                package,
                table_name,
                table_prefix,
                icon,
                is_for_admin,
                default_route,
            };

            let mut draft = match new_module_draft(seed) {
                Ok(draft) => draft,
                Err(err) => {
                    self.prompter.error(&err.to_string());
                    continue;
                }
            };

            draft.translate(&locale, name.clone(), plural);
            draft.translate(&locale, format!("single.{name}"), singular);

            self.module = Some(draft);
            self.state = SessionState::ModuleLoaded;
            self.persist().await?;

            self.prompter.success(&format!("Module '{name}' created"));
            return Ok(BuilderAction::AddTab);
        }
    }

    async fn select_package(&self) -> Result<Option<String>, SessionError> {
        let packages = match self.packages.list_packages().await {
            Ok(packages) => packages,
            Err(err) => {
                self.prompter.error(&err.to_string());
                return Ok(None);
            }
        };

        if packages.is_empty() {
            self.prompter.info("No packages found");
            return Ok(None);
        }

        let pick = self.prompter.select(
            "In which package do you want to create the module?",
            &packages,
            0,
        )?;
        Ok(Some(packages[pick].clone()))
    }

    // -----------------------------------------------------------------------
    // Add tab
    // -----------------------------------------------------------------------

    async fn add_tab_flow(&mut self) -> Result<BuilderAction, SessionError> {
        if self.module_missing() {
            return Ok(BuilderAction::CreateModule);
        }
        let locale = self.locale.clone();

        let (tab_labels, default_label) = {
            let Some(module) = self.module.as_ref() else {
                return Ok(BuilderAction::CreateModule);
            };
            let labels: Vec<String> = module.tabs.iter().map(|t| t.label.clone()).collect();
            let default = if labels.is_empty() {
                "tab.main".to_string()
            } else {
                format!("tab.tab{}", labels.len())
            };
            (labels, default)
        };

        let label = self
            .prompter
            .input_with_default("Tab label (will be translated)", &default_label)?;
        let translation = self.prompter.input(&format!("Translation [{locale}]"))?;
        let icon = self.prompter.input_optional("Icon name")?;
        let placement = self.choose_placement("tab", &tab_labels)?;

        let tab = Tab {
            label: label.clone(),
            icon,
            sequence: 0,
            blocks: Vec::new(),
        };

        let result = match self.module.as_mut() {
            Some(module) => module.add_tab(tab, placement),
            None => return Ok(BuilderAction::CreateModule),
        };

        match result {
            Ok(()) => {
                if let Some(module) = self.module.as_mut() {
                    module.translate(&locale, label.clone(), translation);
                }
                self.persist().await?;
                self.prompter.success(&format!("Tab '{label}' added"));
                Ok(BuilderAction::AddBlock)
            }
            Err(err) => self.recover(err, BuilderAction::AddTab),
        }
    }

    // -----------------------------------------------------------------------
    // Add block
    // -----------------------------------------------------------------------

    async fn add_block_flow(&mut self) -> Result<BuilderAction, SessionError> {
        if self.module_missing() {
            return Ok(BuilderAction::CreateModule);
        }
        let locale = self.locale.clone();

        let Some(tab_label) = self.select_tab()? else {
            self.prompter
                .error(&DesignError::EmptyCollection("tab").to_string());
            return Ok(BuilderAction::AddTab);
        };

        let (block_labels, default_short) = {
            let Some(module) = self.module.as_ref() else {
                return Ok(BuilderAction::CreateModule);
            };
            let labels: Vec<String> = module
                .find_tab(&tab_label)
                .map(|t| t.blocks.iter().map(|b| b.label.clone()).collect())
                .unwrap_or_default();
            let default = if labels.is_empty() {
                "general".to_string()
            } else {
                format!("block{}", labels.len())
            };
            (labels, default)
        };

        let short = self
            .prompter
            .input_with_default("Block label (will be translated)", &default_short)?;
        let label = format!("block.{short}");
        let translation = self.prompter.input(&format!("Translation [{locale}]"))?;

        let description = if self
            .prompter
            .confirm("Do you want to add a description?", false)?
        {
            let key = format!("{label}.description");
            let text = self.prompter.input(&format!("Translation [{locale}]"))?;
            Some((key, text))
        } else {
            None
        };

        let icon = self.prompter.input_optional("Icon name")?;
        let placement = self.choose_placement("block", &block_labels)?;

        let block = Block {
            label: label.clone(),
            icon,
            description: description.as_ref().map(|(key, _)| key.clone()),
            sequence: 0,
            fields: Vec::new(),
        };

        let result = match self.module.as_mut() {
            Some(module) => module.add_block(&tab_label, block, placement),
            None => return Ok(BuilderAction::CreateModule),
        };

        match result {
            Ok(()) => {
                if let Some(module) = self.module.as_mut() {
                    module.translate(&locale, label.clone(), translation);
                    if let Some((key, text)) = description {
                        module.translate(&locale, key, text);
                    }
                }
                self.persist().await?;
                self.prompter.success(&format!("Block '{label}' added"));
                Ok(BuilderAction::AddField)
            }
            Err(err) => self.recover(err, BuilderAction::AddBlock),
        }
    }

    // -----------------------------------------------------------------------
    // Add field
    // -----------------------------------------------------------------------

    async fn add_field_flow(&mut self) -> Result<BuilderAction, SessionError> {
        if self.module_missing() {
            return Ok(BuilderAction::CreateModule);
        }
        let locale = self.locale.clone();

        let Some((tab_label, block_label)) = self.select_block()? else {
            self.prompter
                .error(&DesignError::EmptyCollection("block").to_string());
            return Ok(BuilderAction::AddBlock);
        };

        let raw = self.prompter.input("Field name")?;
        let name = normalize_field_name(&raw);
        if name.is_empty() {
            self.prompter.error("You must specify a field name");
            return Ok(BuilderAction::AddField);
        }

        let (duplicate, sibling_names) = {
            let Some(module) = self.module.as_ref() else {
                return Ok(BuilderAction::CreateModule);
            };
            let siblings: Vec<String> = module
                .find_tab(&tab_label)
                .and_then(|t| t.blocks.iter().find(|b| b.label == block_label))
                .map(|b| b.fields.iter().map(|f| f.name.clone()).collect())
                .unwrap_or_default();
            (module.find_field_by_name(&name).is_some(), siblings)
        };

        if duplicate {
            // The partially-entered field is discarded, nothing is saved.
            self.prompter
                .error(&DesignError::DuplicateFieldName(name).to_string());
            return Ok(BuilderAction::AddField);
        }

        let translation = self.prompter.input(&format!("Translation [{locale}]"))?;

        let uitypes = self.registry.uitype_ids();
        let uitype_default = uitypes.iter().position(|u| u == "text").unwrap_or(0);
        let uitype = uitypes[self
            .prompter
            .select("Choose an uitype", &uitypes, uitype_default)?]
        .clone();

        let displaytypes = self.registry.displaytype_ids();
        let displaytype_default = displaytypes
            .iter()
            .position(|d| d == "everywhere")
            .unwrap_or(0);
        let displaytype = displaytypes[self.prompter.select(
            "Choose a display type",
            &displaytypes,
            displaytype_default,
        )?]
        .clone();

        let required = self.prompter.confirm("Is the field required?", false)?;
        let display_in_filter = self
            .prompter
            .confirm("Display this field by default in the list view?", true)?;
        let wide = self
            .prompter
            .confirm("Display the field in two columns?", false)?;
        let default_value = self.prompter.input_optional("Default value")?;

        let mut validation_rule = required.then(|| "required".to_string());
        if let Some(rules) = self.prompter.input_optional("Other validation rules")? {
            validation_rule = Some(match validation_rule {
                Some(previous) => format!("{previous}|{rules}"),
                None => rules,
            });
        }

        let mut field = Field {
            name: name.clone(),
            uitype,
            displaytype,
            required,
            display_in_filter,
            wide,
            default_value,
            validation_rule,
            extension: Default::default(),
            sequence: 0,
        };

        // Let the uitype contribute its specific attributes before the
        // field is positioned and saved.
        let known_modules = if self.registry.contributor_for(&field.uitype).is_some() {
            match self.modules.list_modules().await {
                Ok(modules) => modules,
                Err(err) => {
                    self.prompter.error(&err.to_string());
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        let ctx = FieldOptionContext {
            locale: locale.clone(),
            known_modules,
        };
        match self.module.as_mut() {
            Some(module) => {
                contribute_field_options(&self.registry, &ctx, module, &mut field, &self.prompter)?
            }
            None => return Ok(BuilderAction::CreateModule),
        }

        let placement = self.choose_placement("field", &sibling_names)?;

        let result = match self.module.as_mut() {
            Some(module) => module.add_field(&tab_label, &block_label, field, placement),
            None => return Ok(BuilderAction::CreateModule),
        };

        match result {
            Ok(()) => {
                if let Some(module) = self.module.as_mut() {
                    module.translate(&locale, format!("field.{name}"), translation);
                }
                self.persist().await?;
                self.prompter.success(&format!("Field '{name}' added"));
                Ok(BuilderAction::AddField)
            }
            Err(err) => self.recover(err, BuilderAction::AddField),
        }
    }

    // -----------------------------------------------------------------------
    // Add related list
    // -----------------------------------------------------------------------

    async fn add_related_list_flow(&mut self) -> Result<BuilderAction, SessionError> {
        if self.module_missing() {
            return Ok(BuilderAction::CreateModule);
        }
        let locale = self.locale.clone();

        let (module_name, existing_labels, has_tabs, own_field_names) = {
            let Some(module) = self.module.as_ref() else {
                return Ok(BuilderAction::CreateModule);
            };
            (
                module.name.clone(),
                module
                    .related_lists
                    .iter()
                    .map(|r| r.label.clone())
                    .collect::<Vec<_>>(),
                !module.tabs.is_empty(),
                module
                    .all_fields()
                    .iter()
                    .map(|f| f.name.clone())
                    .collect::<Vec<_>>(),
            )
        };

        let short = self.prompter.input_with_default(
            "Choose a label (will be translated)",
            &format!("relatedlist{}", existing_labels.len() + 1),
        )?;
        let label = format!("relatedlist.{short}");
        let translation = self.prompter.input(&format!("Translation [{locale}]"))?;

        let kind_items = vec![
            "Relation n-1 (to-one)".to_string(),
            "Relation n-n (many-to-many)".to_string(),
        ];
        let kind = if self.prompter.select("Choose a type", &kind_items, 0)? == 0 {
            RelatedListKind::ToOne
        } else {
            RelatedListKind::ManyToMany
        };

        // The target module is resolved against the catalog; the module
        // under design is offered too so it can relate to itself.
        let mut choices = match self.modules.list_modules().await {
            Ok(list) => list,
            Err(err) => {
                self.prompter.error(&err.to_string());
                return Ok(BuilderAction::AddRelatedList);
            }
        };
        if !choices.contains(&module_name) {
            choices.push(module_name.clone());
            choices.sort();
        }
        let related_module =
            choices[self.prompter.select("Select the related module", &choices, 0)?].clone();

        let related_field = if kind == RelatedListKind::ToOne {
            let field_names = if related_module == module_name {
                own_field_names
            } else {
                match self.modules.list_fields(&related_module).await {
                    Ok(fields) => fields,
                    Err(err) => {
                        self.prompter.error(&err.to_string());
                        return Ok(BuilderAction::AddRelatedList);
                    }
                }
            };

            if field_names.is_empty() {
                self.prompter
                    .error(&DesignError::EmptyCollection("field").to_string());
                let fallback = if related_module == module_name {
                    BuilderAction::AddField
                } else {
                    BuilderAction::AddRelatedList
                };
                return Ok(fallback);
            }

            Some(field_names[self.prompter.select("Choose the field", &field_names, 0)?].clone())
        } else {
            None
        };

        let host_tab = if self.prompter.confirm(
            "Display it in an existing tab? By default the installer creates a dedicated tab.",
            false,
        )? {
            if has_tabs {
                self.select_tab()?
            } else {
                self.prompter
                    .error(&DesignError::EmptyCollection("tab").to_string());
                None
            }
        } else {
            None
        };

        let accessor_default = match kind {
            RelatedListKind::ManyToMany => "getRelatedList",
            RelatedListKind::ToOne => "getDependentList",
        };
        let accessor = self
            .prompter
            .input_with_default("Accessor method", accessor_default)?;

        let action_items: Vec<String> = match kind {
            RelatedListKind::ToOne => vec!["add".to_string(), "none".to_string()],
            RelatedListKind::ManyToMany => vec![
                "add".to_string(),
                "select".to_string(),
                "add,select".to_string(),
                "none".to_string(),
            ],
        };
        let pick = self.prompter.select(
            "Choose available actions",
            &action_items,
            action_items.len() - 1,
        )?;
        let actions = match action_items[pick].as_str() {
            "add" => vec![RelatedListAction::Add],
            "select" => vec![RelatedListAction::Select],
            "add,select" => vec![RelatedListAction::Add, RelatedListAction::Select],
            _ => Vec::new(),
        };

        let icon = self.prompter.input_optional("Icon name")?;

        let list = match RelatedList::new(
            label.clone(),
            kind,
            related_module,
            related_field,
            host_tab,
            accessor,
            actions,
            icon,
        ) {
            Ok(list) => list,
            Err(err) => return self.recover(err, BuilderAction::AddRelatedList),
        };

        let placement = self.choose_placement("related list", &existing_labels)?;

        let result = match self.module.as_mut() {
            Some(module) => module.add_related_list(list, placement),
            None => return Ok(BuilderAction::CreateModule),
        };

        match result {
            Ok(()) => {
                if let Some(module) = self.module.as_mut() {
                    module.translate(&locale, label.clone(), translation);
                }
                self.persist().await?;
                self.prompter
                    .success(&format!("Related list '{label}' added"));
                Ok(BuilderAction::AddRelatedList)
            }
            Err(err) => self.recover(err, BuilderAction::AddRelatedList),
        }
    }

    // -----------------------------------------------------------------------
    // Add link
    // -----------------------------------------------------------------------

    async fn add_link_flow(&mut self) -> Result<BuilderAction, SessionError> {
        if self.module_missing() {
            return Ok(BuilderAction::CreateModule);
        }
        let locale = self.locale.clone();

        let existing_labels = {
            let Some(module) = self.module.as_ref() else {
                return Ok(BuilderAction::CreateModule);
            };
            module
                .links
                .iter()
                .map(|l| l.label.clone())
                .collect::<Vec<_>>()
        };

        let short = self.prompter.input_with_default(
            "Link label (will be translated)",
            &format!("link{}", existing_labels.len()),
        )?;
        let label = format!("link.{short}");
        let translation = self.prompter.input(&format!("Translation [{locale}]"))?;
        let icon = self.prompter.input_optional("Icon name")?;

        let kind_items = vec!["detail".to_string(), "detail-action".to_string()];
        let kind = if self.prompter.select("Type of link", &kind_items, 0)? == 0 {
            LinkKind::Detail
        } else {
            LinkKind::DetailAction
        };

        let url = self.prompter.input("URL")?;

        let action_items = vec![
            "navigate".to_string(),
            "ajax".to_string(),
            "modal".to_string(),
        ];
        let action_pick = self.prompter.select("Action type", &action_items, 0)?;

        let color_items: Vec<String> = ButtonColor::ALL
            .iter()
            .map(|c| c.as_str().to_string())
            .collect();
        let color_default = ButtonColor::ALL
            .iter()
            .position(|c| *c == ButtonColor::Primary)
            .unwrap_or(0);
        let button_color =
            ButtonColor::ALL[self
                .prompter
                .select("Button color", &color_items, color_default)?];

        let confirm = self
            .prompter
            .confirm("Show a confirmation alert before running?", false)?;
        let dialog = if confirm
            && self
                .prompter
                .confirm("Customize the confirmation dialog?", false)?
        {
            Some(ConfirmDialog {
                title: self.prompter.input_with_default("Title", "Are you sure?")?,
                confirm_text: self
                    .prompter
                    .input_with_default("Confirm button text", "Yes")?,
                confirm_color: self
                    .prompter
                    .input_with_default("Confirm button color", "#DD6B55")?,
                close_on_confirm: self.prompter.confirm("Close dialog on confirm?", true)?,
            })
        } else {
            None
        };

        let action = match action_pick {
            0 => LinkAction::Navigate {
                target: self.prompter.input_optional("Link target (e.g. _blank)")?,
            },
            1 => {
                let method_items: Vec<String> = HttpMethod::ALL
                    .iter()
                    .map(|m| m.as_str().to_string())
                    .collect();
                let method =
                    HttpMethod::ALL[self.prompter.select("HTTP method", &method_items, 0)?];
                let query_params = self.prompter.input_optional("Query params")?;
                let dom_update_selector = if self
                    .prompter
                    .confirm("Update the DOM with the response?", false)?
                {
                    Some(self.prompter.input(
                        "DOM selector of the element to update (e.g. .card .body)",
                    )?)
                } else {
                    None
                };
                LinkAction::Ajax {
                    method,
                    query_params,
                    dom_update_selector,
                }
            }
            _ => LinkAction::Modal {
                modal_id: self
                    .prompter
                    .input("Id of the modal to show (e.g. productModal)")?,
            },
        };

        let link = Link {
            label: label.clone(),
            icon,
            kind,
            url,
            action,
            confirm,
            dialog,
            button_color,
            sequence: 0,
        };

        let placement = self.choose_placement("link", &existing_labels)?;

        let result = match self.module.as_mut() {
            Some(module) => module.add_link(link, placement),
            None => return Ok(BuilderAction::CreateModule),
        };

        match result {
            Ok(()) => {
                if let Some(module) = self.module.as_mut() {
                    module.translate(&locale, label.clone(), translation);
                }
                self.persist().await?;
                self.prompter.success(&format!("Link '{label}' added"));
                Ok(BuilderAction::AddLink)
            }
            Err(err) => self.recover(err, BuilderAction::AddLink),
        }
    }

    // -----------------------------------------------------------------------
    // Install
    // -----------------------------------------------------------------------

    async fn install_flow(&mut self) -> Result<BuilderAction, SessionError> {
        if self.module_missing() {
            return Ok(BuilderAction::CreateModule);
        }

        let document = match self.module.as_ref() {
            Some(module) => module.clone(),
            None => return Ok(BuilderAction::CreateModule),
        };

        match self.installer.install(&document).await {
            Ok(installed) => {
                tracing::info!(module = %installed.name, id = %installed.id, "module installed");
                self.prompter.success(&format!(
                    "Module '{}' installed at {}",
                    installed.name, installed.location
                ));

                if self
                    .prompter
                    .confirm("Remove the draft from the designer list?", true)?
                {
                    self.store.delete_by_name(&document.name).await?;
                }

                self.state = SessionState::Terminated;
                Ok(BuilderAction::Install)
            }
            Err(err) => {
                // Surfaced verbatim; the draft stays in the store for retry.
                self.prompter.error(&err.to_string());
                self.prompter
                    .info("The draft is preserved; you can retry the install later.");
                Ok(BuilderAction::Install)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Shared helpers
    // -----------------------------------------------------------------------

    /// Ask where to place a new sibling among `labels`. No prompt on an
    /// empty collection; the default is "after the last sibling".
    fn choose_placement(&self, noun: &str, labels: &[String]) -> Result<Placement, PromptError> {
        if labels.is_empty() {
            return Ok(Placement::End);
        }

        let mut items = Vec::with_capacity(labels.len() * 2);
        for label in labels {
            items.push(format!("Before - {label}"));
            items.push(format!("After - {label}"));
        }

        let pick = self.prompter.select(
            &format!("Where do you want to add this {noun}?"),
            &items,
            items.len() - 1,
        )?;

        let anchor = labels[pick / 2].clone();
        Ok(if pick % 2 == 0 {
            Placement::Before(anchor)
        } else {
            Placement::After(anchor)
        })
    }

    fn select_tab(&self) -> Result<Option<String>, PromptError> {
        let Some(module) = self.module.as_ref() else {
            return Ok(None);
        };
        let labels: Vec<String> = module.tabs.iter().map(|t| t.label.clone()).collect();
        if labels.is_empty() {
            return Ok(None);
        }

        let pick = self
            .prompter
            .select("Choose the tab", &labels, labels.len() - 1)?;
        Ok(Some(labels[pick].clone()))
    }

    fn select_block(&self) -> Result<Option<(String, String)>, PromptError> {
        let Some(module) = self.module.as_ref() else {
            return Ok(None);
        };
        let locators = module.block_locators();
        if locators.is_empty() {
            return Ok(None);
        }

        let items: Vec<String> = locators.iter().map(|(_, block)| block.clone()).collect();
        let pick = self.prompter.select(
            "Choose the block in which to add the field",
            &items,
            items.len() - 1,
        )?;
        Ok(Some(locators[pick].clone()))
    }

    /// Save the full document for the loaded module.
    async fn persist(&mut self) -> Result<(), SessionError> {
        if let Some(module) = &self.module {
            self.store.upsert(&module.name, module).await?;
            tracing::debug!(module = %module.name, "draft saved");
        }
        Ok(())
    }

    /// Report a recoverable design error and fall back to the menu;
    /// anchoring defects propagate instead.
    fn recover(
        &self,
        err: DesignError,
        fallback: BuilderAction,
    ) -> Result<BuilderAction, SessionError> {
        match err {
            DesignError::AnchorNotFound(_) => Err(SessionError::Internal(err)),
            other => {
                self.prompter.error(&other.to_string());
                Ok(fallback)
            }
        }
    }
}
