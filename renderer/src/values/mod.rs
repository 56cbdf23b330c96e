//! Values are the layered configuration a chart is rendered from.

// Export all spec types
mod spec;
pub use spec::*;

/// Default repository of the kube-janitor image.
pub const DEFAULT_IMAGE_REPOSITORY: &str = "hjacobs/kube-janitor";
/// Default pull policy of the kube-janitor image.
pub const DEFAULT_IMAGE_PULL_POLICY: &str = "IfNotPresent";
/// Namespace used when a release does not name one.
pub const DEFAULT_NAMESPACE: &str = "default";

// Empty strings in values mean "use the default".
fn non_empty(value: &Option<String>) -> Option<String> {
    value.to_owned().filter(|value| !value.is_empty())
}

/// Resolved image settings for the janitor container.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageConfig {
    /// Image repository
    pub repository: String,
    /// Image tag
    pub tag: String,
    /// Pull policy for the image
    pub pull_policy: String,
}

impl ImageConfig {
    /// Resolve image values, falling back to the chart app version and then the chart version
    /// for the tag.
    pub fn from_values(values: &Option<ImageValues>, chart: &ChartMetadata) -> Self {
        let default = Self {
            repository: DEFAULT_IMAGE_REPOSITORY.to_owned(),
            tag: non_empty(&chart.app_version).unwrap_or_else(|| chart.version.to_owned()),
            pull_policy: DEFAULT_IMAGE_PULL_POLICY.to_owned(),
        };
        if let Some(values) = values {
            Self {
                repository: non_empty(&values.repository).unwrap_or(default.repository),
                tag: non_empty(&values.tag).unwrap_or(default.tag),
                pull_policy: non_empty(&values.pull_policy).unwrap_or(default.pull_policy),
            }
        } else {
            default
        }
    }

    /// Full image reference, i.e. `repository:tag`.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.repository, self.tag)
    }
}

/// Resolved service account settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceAccountConfig {
    /// When true a ServiceAccount object is rendered.
    pub create: bool,
    /// Explicit name of the service account, if any.
    pub name: Option<String>,
}

impl Default for ServiceAccountConfig {
    fn default() -> Self {
        Self {
            create: true,
            name: None,
        }
    }
}

impl From<&Option<ServiceAccountValues>> for ServiceAccountConfig {
    fn from(value: &Option<ServiceAccountValues>) -> Self {
        let default = ServiceAccountConfig::default();
        if let Some(value) = value {
            Self {
                create: value.create.unwrap_or(default.create),
                name: non_empty(&value.name),
            }
        } else {
            default
        }
    }
}

impl ServiceAccountConfig {
    /// Name of the service account the janitor pod runs as.
    ///
    /// A created account defaults to the release full name, otherwise the namespace default
    /// account is used.
    pub fn name_or(&self, full_name: &str) -> String {
        match (&self.name, self.create) {
            (Some(name), _) => name.to_owned(),
            (None, true) => full_name.to_owned(),
            (None, false) => "default".to_owned(),
        }
    }
}

/// Resolved RBAC settings.
#[derive(Clone, Debug, PartialEq)]
pub struct RbacConfig {
    /// When true ClusterRole and ClusterRoleBinding objects are rendered.
    pub create: bool,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self { create: true }
    }
}

impl From<&Option<RbacValues>> for RbacConfig {
    fn from(value: &Option<RbacValues>) -> Self {
        let default = RbacConfig::default();
        Self {
            create: value
                .as_ref()
                .and_then(|rbac| rbac.create)
                .unwrap_or(default.create),
        }
    }
}
