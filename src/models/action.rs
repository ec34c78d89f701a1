//! Action names and the outcomes returned to the view layer.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use utoipa::ToSchema;

use super::report::PipelineReport;

/// Record type a navigation points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TargetEntity {
    Pipeline,
    Support,
    Inspection,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    Create,
    Edit,
    View,
}

/// Where the form opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    #[default]
    Current,
    Dialog,
}

/// Alternate form layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewVariant {
    /// Short form used when adding a support from a pipeline.
    SupportCreate,
    /// Read-oriented inspection layout.
    InspectionReport,
}

/// Instruction telling the UI which record or form to open next.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Navigation {
    pub target_entity: TargetEntity,
    pub mode: NavigationMode,
    pub target_id: Option<i32>,
    /// Field values pre-filled on a create form.
    #[schema(value_type = Object)]
    pub defaults: Map<String, JsonValue>,
    pub view_variant: Option<ViewVariant>,
    pub presentation: Presentation,
    pub title: Option<String>,
}

impl Navigation {
    fn new(target_entity: TargetEntity, mode: NavigationMode, target_id: Option<i32>) -> Self {
        Navigation {
            target_entity,
            mode,
            target_id,
            defaults: Map::new(),
            view_variant: None,
            presentation: Presentation::Current,
            title: None,
        }
    }

    pub fn create(target_entity: TargetEntity) -> Self {
        Self::new(target_entity, NavigationMode::Create, None)
    }

    pub fn edit(target_entity: TargetEntity, id: i32) -> Self {
        Self::new(target_entity, NavigationMode::Edit, Some(id))
    }

    pub fn view(target_entity: TargetEntity, id: i32) -> Self {
        Self::new(target_entity, NavigationMode::View, Some(id))
    }

    pub fn with_default(mut self, field: &str, value: impl Into<JsonValue>) -> Self {
        self.defaults.insert(field.to_string(), value.into());
        self
    }

    pub fn with_variant(mut self, variant: ViewVariant) -> Self {
        self.view_variant = Some(variant);
        self
    }

    pub fn in_dialog(mut self) -> Self {
        self.presentation = Presentation::Dialog;
        self
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

/// Result of dispatching an action.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// Open a record or form.
    Navigate { navigation: Navigation },
    /// Close the current view.
    CloseView,
    /// Refresh the current view.
    Reload,
    /// Hand report data to the renderer.
    Report { report: Box<PipelineReport> },
    /// Nothing to do.
    #[serde(rename = "none")]
    Noop,
}

impl From<Navigation> for ActionOutcome {
    fn from(navigation: Navigation) -> Self {
        ActionOutcome::Navigate { navigation }
    }
}

/// Actions available on a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineAction {
    SetInProgress,
    SetDone,
    ResetDraft,
    AddSupport,
    Delete,
    PrintReport,
    OpenForm,
    EditSupport,
}

impl PipelineAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "set_in_progress" => Some(Self::SetInProgress),
            "set_done" => Some(Self::SetDone),
            "reset_draft" => Some(Self::ResetDraft),
            "add_support" => Some(Self::AddSupport),
            "delete" => Some(Self::Delete),
            "print_report" => Some(Self::PrintReport),
            "open_form" => Some(Self::OpenForm),
            "edit_support" => Some(Self::EditSupport),
            _ => None,
        }
    }
}

/// Actions available on a support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportAction {
    EditLastInspection,
    ViewInspection,
    SaveAndOpen,
    AddInspection,
}

impl SupportAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "edit_last_inspection" => Some(Self::EditLastInspection),
            "view_inspection" => Some(Self::ViewInspection),
            "save_and_open" => Some(Self::SaveAndOpen),
            "add_inspection" => Some(Self::AddInspection),
            _ => None,
        }
    }
}

/// Actions available on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    SetFilterAll,
    SetFilterMonth,
    SetFilterToday,
    CreateNewPipeline,
}

impl DashboardAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "set_filter_all" => Some(Self::SetFilterAll),
            "set_filter_month" => Some(Self::SetFilterMonth),
            "set_filter_today" => Some(Self::SetFilterToday),
            "create_new_pipeline" => Some(Self::CreateNewPipeline),
            _ => None,
        }
    }
}
