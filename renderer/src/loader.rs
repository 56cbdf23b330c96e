//! Loads chart metadata and layered values files from disk.
use std::{fs, path::Path};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::values::{ChartMetadata, UserValues};

fn read_yaml(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Load chart metadata from a Chart.yaml file.
pub fn load_chart(path: impl AsRef<Path>) -> Result<ChartMetadata> {
    let path = path.as_ref();
    let chart: ChartMetadata = serde_yaml::from_value(read_yaml(path)?)?;
    debug!(path = %path.display(), name = %chart.name, version = %chart.version, "loaded chart");
    Ok(chart)
}

/// Load and merge values files, later files take precedence.
///
/// No files yields the default values.
pub fn load_values<P: AsRef<Path>>(paths: &[P]) -> Result<UserValues> {
    let mut merged = Value::Mapping(Mapping::new());
    for path in paths {
        let path = path.as_ref();
        debug!(path = %path.display(), "merging values file");
        merge_values(&mut merged, read_yaml(path)?);
    }
    Ok(serde_yaml::from_value(merged)?)
}

/// Deep merge `overlay` into `base`.
///
/// Mappings merge key by key, any other overlay value replaces the base value.
/// A null overlay value removes the key from the base.
pub fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        // An empty document leaves the base untouched
        (_, Value::Null) => {}
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                if value.is_null() {
                    base.remove(&key);
                    continue;
                }
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
