use serde::{Deserialize, Serialize};

use super::{LogicalOperator, SortDirection, ViewType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    pub id: String,
    pub name: String,
    pub object_metadata_id: String,
    #[serde(rename = "type")]
    pub view_type: ViewType,
    /// `INDEX` for the default view of an object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub position: f64,
    pub is_compact: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kanban_field_metadata_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kanban_aggregate_operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kanban_aggregate_operation_field_metadata_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewField {
    pub id: String,
    pub view_id: String,
    pub field_metadata_id: String,
    pub position: f64,
    pub is_visible: bool,
    pub size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_operation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewFilter {
    pub id: String,
    pub view_id: String,
    pub field_metadata_id: String,
    pub operand: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_filter_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_in_view_filter_group: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewFilterGroup {
    pub id: String,
    pub view_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_view_filter_group_id: Option<String>,
    pub logical_operator: LogicalOperator,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_in_view_filter_group: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewGroup {
    pub id: String,
    pub view_id: String,
    pub field_metadata_id: String,
    pub field_value: String,
    pub is_visible: bool,
    pub position: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSort {
    pub id: String,
    pub view_id: String,
    pub field_metadata_id: String,
    pub direction: SortDirection,
}

/// A view together with every row that hangs off it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewWithChildren {
    #[serde(flatten)]
    pub view: View,
    pub fields: Vec<ViewField>,
    pub filters: Vec<ViewFilter>,
    pub filter_groups: Vec<ViewFilterGroup>,
    pub groups: Vec<ViewGroup>,
    pub sorts: Vec<ViewSort>,
}

impl ViewWithChildren {
    #[must_use]
    pub fn new(view: View) -> Self {
        Self {
            view,
            fields: Vec::new(),
            filters: Vec::new(),
            filter_groups: Vec::new(),
            groups: Vec::new(),
            sorts: Vec::new(),
        }
    }
}
