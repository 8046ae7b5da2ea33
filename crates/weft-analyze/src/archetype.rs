//! The closed archetype taxonomy and its static lookup tables.

use serde::{Deserialize, Serialize};

/// UI component archetypes the classifier can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Archetype {
    Button,
    IconButton,
    Input,
    Textarea,
    Checkbox,
    Radio,
    Switch,
    Slider,
    Select,
    Combobox,
    Menu,
    Dialog,
    Tooltip,
    Popover,
    Tabs,
    Accordion,
    Card,
    Badge,
    Avatar,
    Progress,
    Alert,
    Breadcrumb,
    Pagination,
    #[default]
    Unknown,
}

impl Archetype {
    /// Stable camelCase identifier, as used in generated artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::IconButton => "iconButton",
            Self::Input => "input",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Switch => "switch",
            Self::Slider => "slider",
            Self::Select => "select",
            Self::Combobox => "combobox",
            Self::Menu => "menu",
            Self::Dialog => "dialog",
            Self::Tooltip => "tooltip",
            Self::Popover => "popover",
            Self::Tabs => "tabs",
            Self::Accordion => "accordion",
            Self::Card => "card",
            Self::Badge => "badge",
            Self::Avatar => "avatar",
            Self::Progress => "progress",
            Self::Alert => "alert",
            Self::Breadcrumb => "breadcrumb",
            Self::Pagination => "pagination",
            Self::Unknown => "unknown",
        }
    }

    /// Third-party accessible primitives the archetype builds on.
    pub fn required_primitives(&self) -> &'static [&'static str] {
        match self {
            Self::Checkbox => &["@radix-ui/react-checkbox"],
            Self::Radio => &["@radix-ui/react-radio-group"],
            Self::Switch => &["@radix-ui/react-switch"],
            Self::Slider => &["@radix-ui/react-slider"],
            Self::Select => &["@radix-ui/react-select"],
            Self::Combobox => &["@radix-ui/react-popover", "cmdk"],
            Self::Menu => &["@radix-ui/react-dropdown-menu"],
            Self::Dialog => &["@radix-ui/react-dialog"],
            Self::Tooltip => &["@radix-ui/react-tooltip"],
            Self::Popover => &["@radix-ui/react-popover"],
            Self::Tabs => &["@radix-ui/react-tabs"],
            Self::Accordion => &["@radix-ui/react-accordion"],
            Self::Progress => &["@radix-ui/react-progress"],
            Self::Avatar => &["@radix-ui/react-avatar"],
            _ => &[],
        }
    }

    /// Default accessibility role suggestion.
    pub fn suggested_role(&self) -> Option<&'static str> {
        match self {
            Self::Button | Self::IconButton => Some("button"),
            Self::Input | Self::Textarea => Some("textbox"),
            Self::Checkbox => Some("checkbox"),
            Self::Radio => Some("radio"),
            Self::Switch => Some("switch"),
            Self::Slider => Some("slider"),
            Self::Select | Self::Combobox => Some("combobox"),
            Self::Menu => Some("menu"),
            Self::Dialog | Self::Popover => Some("dialog"),
            Self::Tooltip => Some("tooltip"),
            Self::Tabs => Some("tablist"),
            Self::Badge => Some("status"),
            Self::Avatar => Some("img"),
            Self::Progress => Some("progressbar"),
            Self::Alert => Some("alert"),
            Self::Breadcrumb | Self::Pagination => Some("navigation"),
            Self::Accordion | Self::Card | Self::Unknown => None,
        }
    }

    /// Whether the archetype opens floating or modal content.
    pub fn has_overlay_surface(&self) -> bool {
        matches!(
            self,
            Self::Select | Self::Combobox | Self::Menu | Self::Dialog | Self::Tooltip | Self::Popover
        )
    }
}

/// How the winning classification was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    Name,
    Structure,
}

/// The classifier's verdict for one component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentIntelligence {
    pub archetype: Archetype,
    /// In [0, 1].
    pub confidence: f64,
    pub source: DetectionSource,
    pub required_primitives: Vec<String>,
    pub suggested_role: Option<String>,
    /// Slot names observed in the structural IR, in detection order.
    pub slot_patterns: Vec<String>,
}
