//! Wire types for the Resource Manager v1 API
//!
//! These are read-only transfer objects mirroring the REST
//! representations. Fields the server may omit are `Option` or default to
//! empty; free-form sub-documents stay as raw [`serde_json::Value`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An IAM policy snapshot: role-to-member bindings controlling access to
/// a project. Returned verbatim from the server; this crate never merges
/// or validates bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[serde(default)]
    pub version: Option<i32>,
    #[serde(default)]
    pub bindings: Vec<Binding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_configs: Vec<Value>,
    #[serde(default)]
    pub etag: Option<String>,
}

/// One role-to-members binding within a [`Policy`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub role: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,
}

/// Options for `getIamPolicy`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetIamPolicyOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_policy_version: Option<i32>,
}

/// One entry in a project's ancestry chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ancestor {
    pub resource_id: ResourceId,
}

/// Identifier of a resource in the hierarchy (project, folder, or
/// organization)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceId {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// An org policy snapshot, either as configured (`getOrgPolicy`) or as
/// evaluated through the hierarchy (`getEffectiveOrgPolicy`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgPolicy {
    #[serde(default)]
    pub constraint: Option<String>,
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(default)]
    pub version: Option<i32>,
    #[serde(default)]
    pub update_time: Option<String>,
    /// Set for list-type constraints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_policy: Option<Value>,
    /// Set for boolean-type constraints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_policy: Option<BooleanPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore_default: Option<Value>,
}

/// Value of a boolean-type org policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanPolicy {
    #[serde(default)]
    pub enforced: bool,
}

/// A governance constraint that can carry an org policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<i32>,
    #[serde(default)]
    pub constraint_default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_constraint: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_constraint: Option<Value>,
}

/// Query options for `list_projects`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListProjectsOptions {
    /// Server-side filter expression, e.g. `labels.env:prod`
    pub filter: Option<String>,
    pub page_size: Option<i32>,
    pub page_token: Option<String>,
}

impl ListProjectsOptions {
    pub(crate) fn as_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(filter) = &self.filter {
            query.push(("filter", filter.clone()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("pageSize", page_size.to_string()));
        }
        if let Some(page_token) = &self.page_token {
            query.push(("pageToken", page_token.clone()));
        }
        query
    }

    /// The continuation for the next page: these options with the token
    /// swapped in
    pub(crate) fn with_page_token(&self, token: &str) -> Self {
        Self {
            page_token: Some(token.to_string()),
            ..self.clone()
        }
    }
}

/// Query options for `list_available_org_policy_constraints`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListConstraintsOptions {
    pub page_size: Option<i32>,
    pub page_token: Option<String>,
}

impl ListConstraintsOptions {
    pub(crate) fn as_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page_size) = self.page_size {
            query.push(("pageSize", page_size.to_string()));
        }
        if let Some(page_token) = &self.page_token {
            query.push(("pageToken", page_token.clone()));
        }
        query
    }

    pub(crate) fn with_page_token(&self, token: &str) -> Self {
        Self {
            page_token: Some(token.to_string()),
            ..self.clone()
        }
    }
}

/// Caps for automatic pagination
#[derive(Debug, Clone, Copy, Default)]
pub struct PageLimits {
    /// Stop after this many list calls
    pub max_api_calls: Option<usize>,
    /// Stop once this many results have been collected
    pub max_results: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn policy_parses_wire_shape() {
        let policy: Policy = serde_json::from_value(json!({
            "version": 1,
            "bindings": [{
                "members": ["user:a@example.com"],
                "role": "roles/appengine.appAdmin"
            }],
            "etag": "BwWf8AIJOb4="
        }))
        .unwrap();

        assert_eq!(policy.version, Some(1));
        assert_eq!(policy.etag.as_deref(), Some("BwWf8AIJOb4="));
        assert_eq!(policy.bindings.len(), 1);
        assert_eq!(policy.bindings[0].role, "roles/appengine.appAdmin");
        assert_eq!(policy.bindings[0].members, vec!["user:a@example.com"]);
    }

    #[test]
    fn resource_id_uses_type_key_on_the_wire() {
        let ancestor: Ancestor = serde_json::from_value(json!({
            "resourceId": { "id": "396521612403", "type": "folder" }
        }))
        .unwrap();
        assert_eq!(ancestor.resource_id.resource_type, "folder");

        let back = serde_json::to_value(&ancestor).unwrap();
        assert_eq!(back["resourceId"]["type"], "folder");
    }

    #[test]
    fn list_options_render_camel_case_query() {
        let options = ListProjectsOptions {
            filter: Some("labels.env:prod".into()),
            page_size: Some(50),
            page_token: Some("abc".into()),
        };
        assert_eq!(
            options.as_query(),
            vec![
                ("filter", "labels.env:prod".to_string()),
                ("pageSize", "50".to_string()),
                ("pageToken", "abc".to_string()),
            ]
        );
    }

    #[test]
    fn continuation_keeps_original_options() {
        let options = ListProjectsOptions {
            filter: Some("labels.env:prod".into()),
            page_size: Some(2),
            page_token: None,
        };
        let next = options.with_page_token("page-2");
        assert_eq!(next.filter, options.filter);
        assert_eq!(next.page_size, options.page_size);
        assert_eq!(next.page_token.as_deref(), Some("page-2"));
    }

    #[test]
    fn boolean_org_policy_parses() {
        let policy: OrgPolicy = serde_json::from_value(json!({
            "constraint": "constraints/compute.disableSerialPortAccess",
            "booleanPolicy": { "enforced": true },
            "etag": "BwVJi0OOESU="
        }))
        .unwrap();
        assert!(policy.boolean_policy.unwrap().enforced);
        assert!(policy.list_policy.is_none());
    }
}
