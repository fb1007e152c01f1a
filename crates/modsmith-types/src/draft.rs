//! The draft module document: the structure an operator assembles
//! incrementally before handing it to the installer.
//!
//! Everything here round-trips losslessly through JSON. Collections carry
//! `#[serde(default)]` so drafts saved before a collection existed still
//! load.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DesignError;

/// Translation table: locale -> translation key -> display string.
///
/// Keys are namespaced by convention (`tab.<x>`, `block.<x>`, `field.<x>`,
/// `relatedlist.<x>`, `link.<x>`); only uniqueness of the full key within a
/// locale is enforced, and the map does that by construction.
pub type Translations = BTreeMap<String, BTreeMap<String, String>>;

/// Root entity of a module being designed.
///
/// `name` is the draft store key and immutable once set. Scalar metadata is
/// gathered during creation; the four sibling collections grow one element
/// at a time through the ordered-insertion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDraft {
    /// Kebab-case identifier, unique key in the draft store.
    pub name: String,
    #[serde(default)]
    pub translations: Translations,
    /// Model type name the installer will generate (e.g. "BookType").
    pub model_class: String,
    /// Optional "vendor/package" pair when the module lives in an external package.
    pub package: Option<String>,
    pub table_name: String,
    pub table_prefix: String,
    pub icon: Option<String>,
    pub is_for_admin: bool,
    pub default_route: String,
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub related_lists: Vec<RelatedList>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A tab groups blocks; `sequence` is dense and zero-based among siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    /// Translation key, unique among tabs (e.g. "tab.main").
    pub label: String,
    pub icon: Option<String>,
    pub sequence: u32,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// A block groups fields within a tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Translation key, unique within the owning tab (e.g. "block.general").
    pub label: String,
    pub icon: Option<String>,
    /// Optional description translation key (`<label>.description`).
    pub description: Option<String>,
    pub sequence: u32,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A single data field.
///
/// `name` is unique across the entire module, not just its block. The
/// `extension` bag holds uitype-specific attributes contributed through the
/// extension point; the core never interprets its contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub uitype: String,
    pub displaytype: String,
    pub required: bool,
    /// Show this field by default in the list view filter.
    pub display_in_filter: bool,
    /// Render across two columns.
    pub wide: bool,
    pub default_value: Option<String>,
    /// Opaque validation rules; multiple rules concatenate with `|`.
    pub validation_rule: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extension: BTreeMap<String, ExtensionValue>,
    pub sequence: u32,
}

/// Value kinds allowed in a field's extension payload.
///
/// A small closed set instead of open-ended dynamic attributes: string,
/// number, boolean, string list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtensionValue {
    Bool(bool),
    Number(f64),
    String(String),
    StringList(Vec<String>),
}

// ---------------------------------------------------------------------------
// Related lists
// ---------------------------------------------------------------------------

/// Relation kinds for a related list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelatedListKind {
    /// Records of the related module point back at one record of this module.
    ToOne,
    /// Symmetric many-to-many relation through a pivot.
    ManyToMany,
}

impl fmt::Display for RelatedListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelatedListKind::ToOne => write!(f, "to-one"),
            RelatedListKind::ManyToMany => write!(f, "many-to-many"),
        }
    }
}

impl FromStr for RelatedListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to-one" => Ok(RelatedListKind::ToOne),
            "many-to-many" => Ok(RelatedListKind::ManyToMany),
            other => Err(format!("invalid related list kind: '{other}'")),
        }
    }
}

/// Actions offered on a related list panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelatedListAction {
    /// Create a new related record.
    Add,
    /// Attach an existing record (many-to-many only).
    Select,
}

/// A panel of records from another module shown on this module's detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedList {
    /// Translation key, unique among related lists (e.g. "relatedlist.books").
    pub label: String,
    pub kind: RelatedListKind,
    /// Name of the related module, resolved against the module catalog.
    pub related_module: String,
    /// Field of the related module that points back here. Required for
    /// `ToOne`, absent for `ManyToMany`.
    pub related_field: Option<String>,
    /// Tab to display the panel in. `None` means the installer creates a
    /// dedicated tab; the designer never invents its label or position.
    pub host_tab: Option<String>,
    /// Accessor method the installer generates on the model class.
    pub accessor: String,
    #[serde(default)]
    pub actions: Vec<RelatedListAction>,
    pub icon: Option<String>,
    pub sequence: u32,
}

impl RelatedList {
    /// Construct a related list, enforcing kind/field consistency.
    ///
    /// A `ToOne` list without a related field is rejected, as is a
    /// `ManyToMany` list carrying one.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        label: String,
        kind: RelatedListKind,
        related_module: String,
        related_field: Option<String>,
        host_tab: Option<String>,
        accessor: String,
        actions: Vec<RelatedListAction>,
        icon: Option<String>,
    ) -> Result<Self, DesignError> {
        match (kind, &related_field) {
            (RelatedListKind::ToOne, None) => {
                return Err(DesignError::InvalidRelatedList(
                    "a to-one related list requires a related field".to_string(),
                ));
            }
            (RelatedListKind::ManyToMany, Some(_)) => {
                return Err(DesignError::InvalidRelatedList(
                    "a many-to-many related list must not name a related field".to_string(),
                ));
            }
            _ => {}
        }

        if kind == RelatedListKind::ToOne && actions.contains(&RelatedListAction::Select) {
            return Err(DesignError::InvalidRelatedList(
                "'select' is only available on many-to-many related lists".to_string(),
            ));
        }

        Ok(Self {
            label,
            kind,
            related_module,
            related_field,
            host_tab,
            accessor,
            actions,
            icon,
            sequence: 0,
        })
    }
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// Where a link appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    /// Button on the detail view.
    Detail,
    /// Entry in the detail view's action menu.
    DetailAction,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkKind::Detail => write!(f, "detail"),
            LinkKind::DetailAction => write!(f, "detail-action"),
        }
    }
}

/// HTTP methods selectable for ajax links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
    Connect,
    Options,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Connect,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Connect => "connect",
            HttpMethod::Options => "options",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Behavior triggered when the link is activated.
///
/// The variant payload is selected by `action_type` in the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "lowercase")]
pub enum LinkAction {
    /// Plain navigation to the URL.
    Navigate {
        /// Optional window target (e.g. "_blank").
        target: Option<String>,
    },
    /// Fire an HTTP request without leaving the page.
    Ajax {
        method: HttpMethod,
        query_params: Option<String>,
        /// DOM selector of an element to replace with the response.
        dom_update_selector: Option<String>,
    },
    /// Open a modal dialog already present in the page.
    Modal { modal_id: String },
}

/// Customized confirmation dialog shown before the link action runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmDialog {
    pub title: String,
    pub confirm_text: String,
    pub confirm_color: String,
    pub close_on_confirm: bool,
}

/// Fixed button color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonColor {
    Default,
    Primary,
    Success,
    Info,
    Warning,
    Danger,
    Red,
    Pink,
    Purple,
    DeepPurple,
    Indigo,
    Blue,
    LightBlue,
    Cyan,
    Teal,
    Green,
    LightGreen,
    Lime,
    Yellow,
    Amber,
    Orange,
    DeepOrange,
    Brown,
    Grey,
    BlueGrey,
    Black,
}

impl ButtonColor {
    pub const ALL: [ButtonColor; 26] = [
        ButtonColor::Default,
        ButtonColor::Primary,
        ButtonColor::Success,
        ButtonColor::Info,
        ButtonColor::Warning,
        ButtonColor::Danger,
        ButtonColor::Red,
        ButtonColor::Pink,
        ButtonColor::Purple,
        ButtonColor::DeepPurple,
        ButtonColor::Indigo,
        ButtonColor::Blue,
        ButtonColor::LightBlue,
        ButtonColor::Cyan,
        ButtonColor::Teal,
        ButtonColor::Green,
        ButtonColor::LightGreen,
        ButtonColor::Lime,
        ButtonColor::Yellow,
        ButtonColor::Amber,
        ButtonColor::Orange,
        ButtonColor::DeepOrange,
        ButtonColor::Brown,
        ButtonColor::Grey,
        ButtonColor::BlueGrey,
        ButtonColor::Black,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonColor::Default => "default",
            ButtonColor::Primary => "primary",
            ButtonColor::Success => "success",
            ButtonColor::Info => "info",
            ButtonColor::Warning => "warning",
            ButtonColor::Danger => "danger",
            ButtonColor::Red => "red",
            ButtonColor::Pink => "pink",
            ButtonColor::Purple => "purple",
            ButtonColor::DeepPurple => "deep-purple",
            ButtonColor::Indigo => "indigo",
            ButtonColor::Blue => "blue",
            ButtonColor::LightBlue => "light-blue",
            ButtonColor::Cyan => "cyan",
            ButtonColor::Teal => "teal",
            ButtonColor::Green => "green",
            ButtonColor::LightGreen => "light-green",
            ButtonColor::Lime => "lime",
            ButtonColor::Yellow => "yellow",
            ButtonColor::Amber => "amber",
            ButtonColor::Orange => "orange",
            ButtonColor::DeepOrange => "deep-orange",
            ButtonColor::Brown => "brown",
            ButtonColor::Grey => "grey",
            ButtonColor::BlueGrey => "blue-grey",
            ButtonColor::Black => "black",
        }
    }
}

impl fmt::Display for ButtonColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A custom action button or menu entry on the module's views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Translation key, unique among links (e.g. "link.export").
    pub label: String,
    pub icon: Option<String>,
    pub kind: LinkKind,
    pub url: String,
    pub action: LinkAction,
    /// Ask for confirmation before running the action.
    pub confirm: bool,
    /// Customized confirmation dialog; `None` uses the default dialog.
    pub dialog: Option<ConfirmDialog>,
    pub button_color: ButtonColor,
    pub sequence: u32,
}
