//! Builds the Kubernetes objects that deploy kube-janitor.
use std::collections::BTreeMap;

use k8s_openapi::api::{
    apps::v1::Deployment,
    core::v1::{ConfigMap, ServiceAccount},
    rbac::v1::{ClusterRole, ClusterRoleBinding},
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::labels::{chart_labels, selector_labels};
use crate::names::full_name;
use crate::values::{ChartMetadata, RbacConfig, ReleaseContext, ServiceAccountConfig, UserValues};

pub(crate) mod config_map;
pub(crate) mod deployment;
pub(crate) mod rbac;

/// Bundles the inputs and derived names shared by every rendered object.
pub(crate) struct ReleaseBundle<'a> {
    pub chart: &'a ChartMetadata,
    pub release: &'a ReleaseContext,
    pub values: &'a UserValues,
    pub full_name: String,
    pub service_account_name: String,
}

impl<'a> ReleaseBundle<'a> {
    /// Derive names for a release.
    pub fn new(
        chart: &'a ChartMetadata,
        release: &'a ReleaseContext,
        values: &'a UserValues,
    ) -> Self {
        let full_name = full_name(chart, release, values);
        let service_account_name =
            ServiceAccountConfig::from(&values.service_account).name_or(&full_name);
        Self {
            chart,
            release,
            values,
            full_name,
            service_account_name,
        }
    }

    /// Labels attached to every object of the release.
    pub fn labels(&self) -> BTreeMap<String, String> {
        chart_labels(self.chart, self.release, self.values)
    }

    /// Labels selecting the janitor pod.
    pub fn selector_labels(&self) -> BTreeMap<String, String> {
        selector_labels(self.chart, self.release, self.values)
    }

    /// Metadata of a namespaced object of the release.
    fn namespaced_meta(&self, name: &str) -> ObjectMeta {
        ObjectMeta {
            namespace: Some(self.release.namespace.to_owned()),
            ..self.cluster_meta(name)
        }
    }

    /// Metadata of a cluster scoped object of the release.
    fn cluster_meta(&self, name: &str) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.to_owned()),
            labels: Some(self.labels()),
            ..ObjectMeta::default()
        }
    }
}

/// Every object of a rendered release.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifests {
    /// Present when the chart creates its own service account.
    pub service_account: Option<ServiceAccount>,
    /// Present when RBAC objects are created.
    pub cluster_role: Option<ClusterRole>,
    /// Present when RBAC objects are created.
    pub cluster_role_binding: Option<ClusterRoleBinding>,
    /// Holds the janitor rules file.
    pub config_map: ConfigMap,
    /// Runs the janitor.
    pub deployment: Deployment,
}

impl Manifests {
    /// Serialize all objects into a single YAML stream.
    ///
    /// Objects are always written in the same order so the output can be diffed.
    pub fn to_yaml(&self) -> Result<String> {
        let mut docs = Vec::new();
        push_doc(&mut docs, &self.service_account)?;
        push_doc(&mut docs, &self.cluster_role)?;
        push_doc(&mut docs, &self.cluster_role_binding)?;
        push_doc(&mut docs, &Some(&self.config_map))?;
        push_doc(&mut docs, &Some(&self.deployment))?;
        Ok(docs.join("---\n"))
    }
}

fn push_doc(docs: &mut Vec<String>, object: &Option<impl Serialize>) -> Result<()> {
    if let Some(object) = object {
        docs.push(serde_yaml::to_string(object)?);
    }
    Ok(())
}

/// Render all objects of a release.
pub fn render(
    chart: &ChartMetadata,
    release: &ReleaseContext,
    values: &UserValues,
) -> Result<Manifests> {
    let bundle = ReleaseBundle::new(chart, release, values);
    debug!(
        full_name = %bundle.full_name,
        release = %release.release_name,
        namespace = %release.namespace,
        "rendering manifests"
    );

    let service_account = ServiceAccountConfig::from(&values.service_account)
        .create
        .then(|| rbac::service_account(&bundle));
    let (cluster_role, cluster_role_binding) = if RbacConfig::from(&values.rbac).create {
        (
            Some(rbac::cluster_role(&bundle)),
            Some(rbac::cluster_role_binding(&bundle)),
        )
    } else {
        (None, None)
    };

    let rules = config_map::rules_document(&values.rules)?;
    let deployment = deployment::deployment(&bundle, &config_map::checksum(&rules));
    let config_map = config_map::config_map(&bundle, rules);

    Ok(Manifests {
        service_account,
        cluster_role,
        cluster_role_binding,
        config_map,
        deployment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use expect_test::expect;
    use serde_yaml::Value;

    use crate::args::build_args;
    use crate::values::{KubeJanitorValues, RbacValues, RuleSpec, ServiceAccountValues};

    fn chart() -> ChartMetadata {
        ChartMetadata {
            name: "kube-janitor".to_owned(),
            version: "0.3.0".to_owned(),
            app_version: Some("23.7.0".to_owned()),
        }
    }

    fn values() -> UserValues {
        UserValues {
            kubejanitor: KubeJanitorValues {
                dry_run: Some(true),
                interval: Some("30m".to_owned()),
                ..Default::default()
            },
            rules: vec![RuleSpec {
                id: "temporary-pr-namespaces".to_owned(),
                resources: vec!["namespaces".to_owned()],
                jmespath: "contains(metadata.name, '-pr-')".to_owned(),
                ttl: "4h".to_owned(),
            }],
            ..Default::default()
        }
    }

    fn kinds(yaml: &str) -> Vec<String> {
        yaml.split("---\n")
            .map(|doc| {
                let doc: Value = serde_yaml::from_str(doc).expect("doc should be yaml");
                doc["kind"].as_str().expect("doc should have a kind").to_owned()
            })
            .collect()
    }

    #[test]
    fn renders_objects_in_order() {
        let release = ReleaseContext::new("ops").with_namespace("janitor");
        let manifests = render(&chart(), &release, &values()).unwrap();
        let yaml = manifests.to_yaml().unwrap();
        expect![[r#"
            [
                "ServiceAccount",
                "ClusterRole",
                "ClusterRoleBinding",
                "ConfigMap",
                "Deployment",
            ]
        "#]]
        .assert_debug_eq(&kinds(&yaml));
    }

    #[test]
    fn rendering_is_idempotent() {
        let release = ReleaseContext::new("ops");
        let first = render(&chart(), &release, &values()).unwrap();
        let second = render(&chart(), &release, &values()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_yaml().unwrap(), second.to_yaml().unwrap());
    }

    #[test]
    fn disabled_objects_are_skipped() {
        let values = UserValues {
            service_account: Some(ServiceAccountValues {
                create: Some(false),
                name: Some("cleaner".to_owned()),
            }),
            rbac: Some(RbacValues {
                create: Some(false),
            }),
            ..values()
        };
        let manifests = render(&chart(), &ReleaseContext::new("ops"), &values).unwrap();
        assert_eq!(manifests.service_account, None);
        assert_eq!(manifests.cluster_role, None);
        assert_eq!(manifests.cluster_role_binding, None);
        expect![[r#"
            [
                "ConfigMap",
                "Deployment",
            ]
        "#]]
        .assert_debug_eq(&kinds(&manifests.to_yaml().unwrap()));

        let pod_spec = manifests
            .deployment
            .spec
            .and_then(|spec| spec.template.spec)
            .expect("deployment should have a pod spec");
        assert_eq!(pod_spec.service_account_name.as_deref(), Some("cleaner"));
    }

    #[test]
    fn objects_share_full_name() {
        let release = ReleaseContext::new("ops").with_namespace("janitor");
        let manifests = render(&chart(), &release, &values()).unwrap();
        let names = [
            manifests
                .service_account
                .as_ref()
                .and_then(|sa| sa.metadata.name.clone()),
            manifests
                .cluster_role
                .as_ref()
                .and_then(|role| role.metadata.name.clone()),
            manifests
                .cluster_role_binding
                .as_ref()
                .and_then(|binding| binding.metadata.name.clone()),
            manifests.config_map.metadata.name.clone(),
            manifests.deployment.metadata.name.clone(),
        ];
        for name in names {
            assert_eq!(name.as_deref(), Some("ops-kube-janitor"));
        }
        assert_eq!(
            manifests.deployment.metadata.namespace.as_deref(),
            Some("janitor")
        );
        assert_eq!(
            manifests
                .cluster_role
                .as_ref()
                .and_then(|role| role.metadata.namespace.clone()),
            None
        );
    }

    #[test]
    fn container_args_match_build_args() {
        let values = values();
        let manifests = render(&chart(), &ReleaseContext::new("ops"), &values).unwrap();
        let container = manifests
            .deployment
            .spec
            .and_then(|spec| spec.template.spec)
            .map(|spec| spec.containers[0].clone())
            .expect("deployment should have a container");
        assert_eq!(container.args, Some(build_args(&values.kubejanitor)));
        assert_eq!(
            container.image.as_deref(),
            Some("hjacobs/kube-janitor:23.7.0")
        );
    }
}
