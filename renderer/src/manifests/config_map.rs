use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ConfigMap;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::args::RULES_FILE_KEY;
use crate::error::Result;
use crate::manifests::ReleaseBundle;
use crate::values::RuleSpec;

#[derive(Serialize)]
struct RulesFile<'a> {
    rules: &'a [RuleSpec],
}

/// Serialize rules into the document kube-janitor reads from its rules file.
pub fn rules_document(rules: &[RuleSpec]) -> Result<String> {
    Ok(serde_yaml::to_string(&RulesFile { rules })?)
}

/// Hex encoded sha256 of the rules document.
/// Annotating the pod with it restarts the janitor whenever the rules change.
pub fn checksum(rules_document: &str) -> String {
    hex::encode(Sha256::digest(rules_document.as_bytes()))
}

/// ConfigMap holding the rules file.
pub fn config_map(bundle: &ReleaseBundle, rules_document: String) -> ConfigMap {
    ConfigMap {
        metadata: bundle.namespaced_meta(&bundle.full_name),
        data: Some(BTreeMap::from_iter(vec![(
            RULES_FILE_KEY.to_owned(),
            rules_document,
        )])),
        ..Default::default()
    }
}
