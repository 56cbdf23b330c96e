//! Derives Kubernetes resource names from chart, release and user values.
use crate::values::{ChartMetadata, ReleaseContext, UserValues};

/// Maximum length of a DNS label, and so of most Kubernetes object names.
pub const MAX_NAME_LEN: usize = 63;

/// Truncate a name to at most [`MAX_NAME_LEN`] bytes and strip trailing dashes.
///
/// The cut happens on the nearest char boundary at or below the limit so multi-byte names
/// never split a character.
pub fn trunc_name(name: &str) -> String {
    let mut end = name.len().min(MAX_NAME_LEN);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].trim_end_matches('-').to_owned()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn base_name<'a>(chart: &'a ChartMetadata, values: &'a UserValues) -> &'a str {
    non_empty(&values.name_override).unwrap_or(&chart.name)
}

/// Name of the chart, honoring `nameOverride`.
pub fn chart_name(chart: &ChartMetadata, values: &UserValues) -> String {
    trunc_name(base_name(chart, values))
}

/// Fully qualified app name used for all rendered objects.
///
/// The release name is used as is when it already contains the chart name,
/// so `demo-janitor` does not become `demo-janitor-janitor`.
pub fn full_name(chart: &ChartMetadata, release: &ReleaseContext, values: &UserValues) -> String {
    if let Some(fullname) = non_empty(&values.fullname_override) {
        return trunc_name(fullname);
    }
    let base = base_name(chart, values);
    if release.release_name.contains(base) {
        trunc_name(&release.release_name)
    } else {
        trunc_name(&format!("{}-{}", release.release_name, base))
    }
}

/// Value of the `helm.sh/chart` label.
pub fn chart_label(chart: &ChartMetadata) -> String {
    trunc_name(&format!("{}-{}", chart.name, chart.version).replace('+', "_"))
}
