use uuid::Uuid;

use super::standard::{DEFAULT_FEATURE_FLAGS, PROPERTY, PUBLICATION, STANDARD_OBJECTS};
use crate::types::*;

/// Number of leading fields shown in an object's default view.
const VISIBLE_FIELDS: usize = 6;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds the standard objects and fields for a workspace, each with a fresh
/// per-workspace id.
#[must_use]
pub fn standard_metadata(workspace_id: &str) -> Vec<ObjectMetadata> {
    STANDARD_OBJECTS
        .iter()
        .map(|object| {
            let object_id = new_id();
            ObjectMetadata {
                id: object_id.clone(),
                workspace_id: workspace_id.to_string(),
                standard_id: Some(object.standard_id.to_string()),
                name_singular: object.name_singular.to_string(),
                is_custom: false,
                fields: object
                    .fields
                    .iter()
                    .map(|field| FieldMetadata {
                        id: new_id(),
                        object_metadata_id: object_id.clone(),
                        standard_id: Some(field.standard_id.to_string()),
                        name: field.name.to_string(),
                        is_custom: false,
                    })
                    .collect(),
            }
        })
        .collect()
}

fn find_object<'a>(objects: &'a [ObjectMetadata], standard_id: &str) -> Option<&'a ObjectMetadata> {
    objects
        .iter()
        .find(|o| o.standard_id.as_deref() == Some(standard_id))
}

fn find_field<'a>(object: &'a ObjectMetadata, name: &str) -> Option<&'a FieldMetadata> {
    object.fields.iter().find(|f| f.name == name)
}

fn index_view(object: &ObjectMetadata, label_plural: &str, position: f64) -> ViewWithChildren {
    let view_id = new_id();
    let mut view = ViewWithChildren::new(View {
        id: view_id.clone(),
        name: format!("All {label_plural}"),
        object_metadata_id: object.id.clone(),
        view_type: ViewType::Table,
        key: Some("INDEX".to_string()),
        icon: Some("IconList".to_string()),
        position,
        is_compact: false,
        kanban_field_metadata_id: None,
        kanban_aggregate_operation: None,
        kanban_aggregate_operation_field_metadata_id: None,
    });

    view.fields = object
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| ViewField {
            id: new_id(),
            view_id: view_id.clone(),
            field_metadata_id: field.id.clone(),
            position: i as f64,
            is_visible: i < VISIBLE_FIELDS,
            size: if i == 0 { 210 } else { 150 },
            aggregate_operation: None,
        })
        .collect();

    view
}

/// Kanban of properties by status, largest price first.
fn property_pipeline_view(property: &ObjectMetadata) -> Option<ViewWithChildren> {
    let status = find_field(property, "status")?;
    let price = find_field(property, "price")?;
    let view_id = new_id();

    let mut view = ViewWithChildren::new(View {
        id: view_id.clone(),
        name: "By Status".to_string(),
        object_metadata_id: property.id.clone(),
        view_type: ViewType::Kanban,
        key: None,
        icon: Some("IconLayoutKanban".to_string()),
        position: 1.0,
        is_compact: false,
        kanban_field_metadata_id: Some(status.id.clone()),
        kanban_aggregate_operation: Some("SUM".to_string()),
        kanban_aggregate_operation_field_metadata_id: Some(price.id.clone()),
    });

    view.fields = ["name", "price", "surface", "agency"]
        .iter()
        .filter_map(|name| find_field(property, name))
        .enumerate()
        .map(|(i, field)| ViewField {
            id: new_id(),
            view_id: view_id.clone(),
            field_metadata_id: field.id.clone(),
            position: i as f64,
            is_visible: true,
            size: 150,
            aggregate_operation: None,
        })
        .collect();

    view.groups = ["AVAILABLE", "UNDER_OFFER", "SOLD", "WITHDRAWN"]
        .iter()
        .enumerate()
        .map(|(i, value)| ViewGroup {
            id: new_id(),
            view_id: view_id.clone(),
            field_metadata_id: status.id.clone(),
            field_value: value.to_string(),
            is_visible: true,
            position: i as f64,
        })
        .collect();

    view.sorts.push(ViewSort {
        id: new_id(),
        view_id,
        field_metadata_id: price.id.clone(),
        direction: SortDirection::Desc,
    });

    Some(view)
}

/// Publications currently live on at least one platform.
fn live_publications_view(publication: &ObjectMetadata) -> Option<ViewWithChildren> {
    let stage = find_field(publication, "stage")?;
    let published_at = find_field(publication, "publishedAt")?;
    let view_id = new_id();
    let group_id = new_id();

    let mut view = index_view(publication, "Publications", 1.0);
    view.view.id = view_id.clone();
    view.view.name = "Live Publications".to_string();
    view.view.key = None;
    for field in &mut view.fields {
        field.view_id = view_id.clone();
    }

    view.filter_groups.push(ViewFilterGroup {
        id: group_id.clone(),
        view_id: view_id.clone(),
        parent_view_filter_group_id: None,
        logical_operator: LogicalOperator::Or,
        position_in_view_filter_group: None,
    });

    view.filters = ["PUBLISHED", "SCHEDULED"]
        .iter()
        .enumerate()
        .map(|(i, value)| ViewFilter {
            id: new_id(),
            view_id: view_id.clone(),
            field_metadata_id: stage.id.clone(),
            operand: "is".to_string(),
            value: format!("[\"{value}\"]"),
            display_value: Some(value.to_string()),
            view_filter_group_id: Some(group_id.clone()),
            position_in_view_filter_group: Some(i as i64),
        })
        .collect();

    view.sorts.push(ViewSort {
        id: new_id(),
        view_id,
        field_metadata_id: published_at.id.clone(),
        direction: SortDirection::Desc,
    });

    Some(view)
}

/// Views the template workspace is created with: one index view per
/// standard object plus the property pipeline and live publications.
#[must_use]
pub fn default_views(objects: &[ObjectMetadata]) -> Vec<ViewWithChildren> {
    let mut views: Vec<ViewWithChildren> = STANDARD_OBJECTS
        .iter()
        .filter_map(|standard| {
            find_object(objects, standard.standard_id)
                .map(|object| index_view(object, standard.label_plural, 0.0))
        })
        .collect();

    if let Some(view) = find_object(objects, PROPERTY.standard_id).and_then(property_pipeline_view) {
        views.push(view);
    }
    if let Some(view) =
        find_object(objects, PUBLICATION.standard_id).and_then(live_publications_view)
    {
        views.push(view);
    }

    views
}

/// A "Pipeline" folder holding favorites for the property and publication
/// index views.
#[must_use]
pub fn default_favorites(views: &[ViewWithChildren], objects: &[ObjectMetadata]) -> (FavoriteFolder, Vec<Favorite>) {
    let folder = FavoriteFolder {
        id: new_id(),
        name: "Pipeline".to_string(),
        position: 0.0,
    };

    let favorites = [PROPERTY.standard_id, PUBLICATION.standard_id]
        .iter()
        .filter_map(|standard_id| find_object(objects, standard_id))
        .filter_map(|object| {
            views.iter().find(|v| {
                v.view.object_metadata_id == object.id && v.view.key.as_deref() == Some("INDEX")
            })
        })
        .enumerate()
        .map(|(i, view)| Favorite {
            id: new_id(),
            position: i as f64,
            view_id: Some(view.view.id.clone()),
            favorite_folder_id: Some(folder.id.clone()),
        })
        .collect();

    (folder, favorites)
}

#[must_use]
pub fn default_feature_flags(workspace_id: &str) -> Vec<FeatureFlag> {
    DEFAULT_FEATURE_FLAGS
        .iter()
        .map(|(key, value)| FeatureFlag {
            id: new_id(),
            key: key.to_string(),
            value: *value,
            workspace_id: workspace_id.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_metadata_uses_fresh_ids() {
        let a = standard_metadata("ws-a");
        let b = standard_metadata("ws-b");

        assert_eq!(a.len(), STANDARD_OBJECTS.len());
        assert_ne!(a[0].id, b[0].id);
        assert_eq!(a[0].standard_id, b[0].standard_id);
        assert!(a.iter().all(|o| o.fields.iter().all(|f| f.object_metadata_id == o.id)));
    }

    #[test]
    fn test_default_views_reference_workspace_metadata() {
        let objects = standard_metadata("ws-a");
        let views = default_views(&objects);

        assert_eq!(views.len(), STANDARD_OBJECTS.len() + 2);

        let field_ids: Vec<&str> = objects
            .iter()
            .flat_map(|o| o.fields.iter().map(|f| f.id.as_str()))
            .collect();
        for view in &views {
            assert!(objects.iter().any(|o| o.id == view.view.object_metadata_id));
            for field in &view.fields {
                assert_eq!(field.view_id, view.view.id);
                assert!(field_ids.contains(&field.field_metadata_id.as_str()));
            }
        }
    }

    #[test]
    fn test_live_publications_filters_share_group() {
        let objects = standard_metadata("ws-a");
        let views = default_views(&objects);
        let live = views
            .iter()
            .find(|v| v.view.name == "Live Publications")
            .unwrap();

        assert_eq!(live.filters.len(), 2);
        let group_id = &live.filter_groups[0].id;
        assert!(live
            .filters
            .iter()
            .all(|f| f.view_filter_group_id.as_ref() == Some(group_id)));
    }

    #[test]
    fn test_default_favorites_point_at_index_views() {
        let objects = standard_metadata("ws-a");
        let views = default_views(&objects);
        let (folder, favorites) = default_favorites(&views, &objects);

        assert_eq!(favorites.len(), 2);
        for favorite in &favorites {
            assert_eq!(favorite.favorite_folder_id.as_ref(), Some(&folder.id));
            assert!(views.iter().any(|v| Some(&v.view.id) == favorite.view_id.as_ref()));
        }
    }
}
