use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::ObjectMetadata;

/// Translates metadata ids of the template workspace into the ids of the
/// same standard objects and fields in another workspace.
///
/// Both directions go through the standard id, which is shared by every
/// workspace: `template id -> standard id -> target id`.
#[derive(Debug, Default)]
pub struct MetadataIdMap {
    template_to_standard: HashMap<String, String>,
    standard_to_target: HashMap<String, String>,
}

impl MetadataIdMap {
    /// Builds the map from the template's and the target's objects.
    ///
    /// Fails with [`Error::MissingStandardId`] if any non-custom object or
    /// field on either side lacks a standard id: that is a broken metadata
    /// seed and provisioning must not continue.
    pub fn build(template: &[ObjectMetadata], target: &[ObjectMetadata]) -> Result<Self> {
        Ok(Self {
            template_to_standard: standard_pairs(template)?
                .into_iter()
                .map(|(id, standard_id)| (id.to_string(), standard_id.to_string()))
                .collect(),
            standard_to_target: standard_pairs(target)?
                .into_iter()
                .map(|(id, standard_id)| (standard_id.to_string(), id.to_string()))
                .collect(),
        })
    }

    /// Returns the target id for a template object or field id, or `None`
    /// when the template id is unknown, has no standard id, or its standard
    /// counterpart does not exist in the target workspace.
    #[must_use]
    pub fn translate(&self, template_id: &str) -> Option<&str> {
        let standard_id = self.template_to_standard.get(template_id)?;
        self.standard_to_target.get(standard_id).map(String::as_str)
    }

    /// Translates an optional reference; `None` stays `None`.
    #[must_use]
    pub fn translate_opt(&self, template_id: Option<&str>) -> Option<String> {
        template_id
            .and_then(|id| self.translate(id))
            .map(str::to_string)
    }

}

fn check_standard_id<'a>(
    kind: &'static str,
    name: &str,
    standard_id: Option<&'a str>,
    is_custom: bool,
) -> Result<Option<&'a str>> {
    match standard_id {
        Some(id) => Ok(Some(id)),
        None if is_custom => Ok(None),
        None => Err(Error::MissingStandardId {
            kind,
            name: name.to_string(),
        }),
    }
}

/// Collects `(id, standard_id)` for every object and field that has a
/// standard id. Custom rows without one are left out.
fn standard_pairs(objects: &[ObjectMetadata]) -> Result<Vec<(&str, &str)>> {
    let mut pairs = Vec::new();

    for object in objects {
        if let Some(standard_id) = check_standard_id(
            "object",
            &object.name_singular,
            object.standard_id.as_deref(),
            object.is_custom,
        )? {
            pairs.push((object.id.as_str(), standard_id));
        }

        for field in &object.fields {
            let name = format!("{}.{}", object.name_singular, field.name);
            if let Some(standard_id) =
                check_standard_id("field", &name, field.standard_id.as_deref(), field.is_custom)?
            {
                pairs.push((field.id.as_str(), standard_id));
            }
        }
    }

    Ok(pairs)
}
