use std::collections::BTreeMap;

use crate::names::{chart_label, chart_name};
use crate::values::{ChartMetadata, ReleaseContext, UserValues};

/// Tool reported in the managed-by label.
pub const MANAGED_BY: &str = "Helm";

/// Create labels that can be used as a unique selector for a given release.
pub fn selector_labels(
    chart: &ChartMetadata,
    release: &ReleaseContext,
    values: &UserValues,
) -> BTreeMap<String, String> {
    BTreeMap::from_iter(vec![
        (
            "app.kubernetes.io/name".to_owned(),
            chart_name(chart, values),
        ),
        (
            "app.kubernetes.io/instance".to_owned(),
            release.release_name.to_owned(),
        ),
    ])
}

/// Labels attached to every rendered object.
pub fn chart_labels(
    chart: &ChartMetadata,
    release: &ReleaseContext,
    values: &UserValues,
) -> BTreeMap<String, String> {
    let mut labels = selector_labels(chart, release, values);
    labels.insert("helm.sh/chart".to_owned(), chart_label(chart));
    if let Some(app_version) = &chart.app_version {
        labels.insert(
            "app.kubernetes.io/version".to_owned(),
            app_version.to_owned(),
        );
    }
    labels.insert(
        "app.kubernetes.io/managed-by".to_owned(),
        MANAGED_BY.to_owned(),
    );
    labels
}
