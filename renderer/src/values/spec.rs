//! Place all values types into a single module so they can be used as a lightweight dependency
use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{ResourceRequirements, Toleration};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata declared by the chart in its Chart.yaml.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    /// Name of the chart
    pub name: String,
    /// Version of the chart
    pub version: String,
    /// Version of the packaged application
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
}

/// Describes the release a chart is being rendered for.
#[derive(Debug, PartialEq, Clone)]
pub struct ReleaseContext {
    /// Name of the release
    pub release_name: String,
    /// Namespace the release is installed into
    pub namespace: String,
}

impl ReleaseContext {
    /// Create a release context in the default namespace.
    pub fn new(release_name: impl Into<String>) -> Self {
        Self {
            release_name: release_name.into(),
            namespace: super::DEFAULT_NAMESPACE.to_owned(),
        }
    }

    /// Place the release in the given namespace.
    pub fn with_namespace(self, namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..self
        }
    }
}

/// User supplied values overriding chart defaults.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserValues {
    /// Replaces the chart name in derived resource names.
    pub name_override: Option<String>,
    /// Replaces the full resource name entirely.
    pub fullname_override: Option<String>,
    /// Flags passed to the kube-janitor process.
    #[serde(default)]
    pub kubejanitor: KubeJanitorValues,
    /// Image of the janitor container.
    pub image: Option<ImageValues>,
    /// Service account the janitor runs as.
    pub service_account: Option<ServiceAccountValues>,
    /// Whether cluster RBAC objects are created.
    pub rbac: Option<RbacValues>,
    /// Resource requests and limits of the janitor container.
    pub resources: Option<ResourceRequirements>,
    /// Node selector applied to the janitor pod.
    pub node_selector: Option<BTreeMap<String, String>>,
    /// Tolerations applied to the janitor pod.
    pub tolerations: Option<Vec<Toleration>>,
    /// Extra annotations added to the janitor pod.
    pub pod_annotations: Option<BTreeMap<String, String>>,
    /// Cleanup rules written to the rules file.
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

/// Settings of the kube-janitor process.
/// Every set field becomes a command line flag.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KubeJanitorValues {
    /// Only log what would be deleted.
    pub dry_run: Option<bool>,
    /// Enable debug logging.
    pub debug: Option<bool>,
    /// Run a single cleanup loop and exit.
    pub once: Option<bool>,
    /// Time between cleanup loops, e.g. `30s`.
    pub interval: Option<String>,
    /// Comma separated resource types to consider.
    pub include_resources: Option<String>,
    /// Comma separated resource types to ignore.
    pub exclude_resources: Option<String>,
    /// Comma separated namespaces to consider.
    pub include_namespaces: Option<String>,
    /// Comma separated namespaces to ignore.
    pub exclude_namespaces: Option<String>,
    /// Pre-formed arguments appended verbatim.
    pub additional_args: Option<Vec<String>>,
}

/// Image of the janitor container.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageValues {
    /// Image repository
    pub repository: Option<String>,
    /// Image tag, defaults to the chart app version.
    pub tag: Option<String>,
    /// Pull policy for the image.
    pub pull_policy: Option<String>,
}

/// Service account the janitor runs as.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountValues {
    /// When true the service account is created, defaults to true.
    pub create: Option<bool>,
    /// Name of the service account, defaults to the full name.
    pub name: Option<String>,
}

/// Cluster RBAC objects.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RbacValues {
    /// When true ClusterRole and ClusterRoleBinding are created, defaults to true.
    pub create: Option<bool>,
}

/// A single janitor rule assigning a TTL to matching resources.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RuleSpec {
    /// Unique rule identifier
    pub id: String,
    /// Resource types the rule applies to, `all` matches every type.
    pub resources: Vec<String>,
    /// JMESPath expression evaluated against each resource.
    pub jmespath: String,
    /// Time to live of matching resources, e.g. `7d`.
    pub ttl: String,
}
