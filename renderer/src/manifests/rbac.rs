use k8s_openapi::api::{
    core::v1::ServiceAccount,
    rbac::v1::{ClusterRole, ClusterRoleBinding, PolicyRule, RoleRef, Subject},
};

use crate::manifests::ReleaseBundle;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Account the janitor pod runs as.
pub fn service_account(bundle: &ReleaseBundle) -> ServiceAccount {
    ServiceAccount {
        metadata: bundle.namespaced_meta(&bundle.service_account_name),
        ..Default::default()
    }
}

/// Role allowing the janitor to find and delete any resource and to report events.
pub fn cluster_role(bundle: &ReleaseBundle) -> ClusterRole {
    ClusterRole {
        metadata: bundle.cluster_meta(&bundle.full_name),
        rules: Some(vec![
            PolicyRule {
                api_groups: Some(strings(&["*"])),
                resources: Some(strings(&["*"])),
                verbs: strings(&["get", "watch", "list", "delete"]),
                ..Default::default()
            },
            PolicyRule {
                api_groups: Some(strings(&[""])),
                resources: Some(strings(&["events"])),
                verbs: strings(&["create"]),
                ..Default::default()
            },
        ]),
        ..Default::default()
    }
}

/// Binds the cluster role to the janitor service account.
pub fn cluster_role_binding(bundle: &ReleaseBundle) -> ClusterRoleBinding {
    ClusterRoleBinding {
        metadata: bundle.cluster_meta(&bundle.full_name),
        role_ref: RoleRef {
            api_group: "rbac.authorization.k8s.io".to_owned(),
            kind: "ClusterRole".to_owned(),
            name: bundle.full_name.to_owned(),
        },
        subjects: Some(vec![Subject {
            kind: "ServiceAccount".to_owned(),
            name: bundle.service_account_name.to_owned(),
            namespace: Some(bundle.release.namespace.to_owned()),
            ..Default::default()
        }]),
    }
}
