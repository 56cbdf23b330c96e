use std::collections::BTreeMap;

use k8s_openapi::api::{
    apps::v1::{Deployment, DeploymentSpec, DeploymentStrategy},
    core::v1::{
        ConfigMapVolumeSource, Container, PodSpec, PodTemplateSpec, SecurityContext, Volume,
        VolumeMount,
    },
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};

use crate::args::{build_args, CONFIG_MOUNT_PATH};
use crate::manifests::ReleaseBundle;
use crate::values::ImageConfig;

const CONTAINER_NAME: &str = "janitor";
const CONFIG_VOLUME_NAME: &str = "config-volume";
const CONFIG_CHECKSUM_ANNOTATION: &str = "checksum/config";
const RUN_AS_USER: i64 = 1000;

fn security_context() -> SecurityContext {
    SecurityContext {
        read_only_root_filesystem: Some(true),
        run_as_non_root: Some(true),
        run_as_user: Some(RUN_AS_USER),
        ..Default::default()
    }
}

fn pod_annotations(bundle: &ReleaseBundle, config_checksum: &str) -> BTreeMap<String, String> {
    let mut annotations = bundle.values.pod_annotations.clone().unwrap_or_default();
    annotations.insert(
        CONFIG_CHECKSUM_ANNOTATION.to_owned(),
        config_checksum.to_owned(),
    );
    annotations
}

/// Deployment running a single janitor replica.
///
/// Recreate ensures two janitors never run against the cluster at the same time.
pub fn deployment(bundle: &ReleaseBundle, config_checksum: &str) -> Deployment {
    let image = ImageConfig::from_values(&bundle.values.image, bundle.chart);
    Deployment {
        metadata: bundle.namespaced_meta(&bundle.full_name),
        spec: Some(DeploymentSpec {
            replicas: Some(1),
            strategy: Some(DeploymentStrategy {
                type_: Some("Recreate".to_owned()),
                ..Default::default()
            }),
            selector: LabelSelector {
                match_labels: Some(bundle.selector_labels()),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(bundle.labels()),
                    annotations: Some(pod_annotations(bundle, config_checksum)),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    service_account_name: Some(bundle.service_account_name.to_owned()),
                    containers: vec![Container {
                        name: CONTAINER_NAME.to_owned(),
                        image: Some(image.reference()),
                        image_pull_policy: Some(image.pull_policy),
                        args: Some(build_args(&bundle.values.kubejanitor)),
                        resources: bundle.values.resources.clone(),
                        security_context: Some(security_context()),
                        volume_mounts: Some(vec![VolumeMount {
                            mount_path: CONFIG_MOUNT_PATH.to_owned(),
                            name: CONFIG_VOLUME_NAME.to_owned(),
                            read_only: Some(true),
                            ..Default::default()
                        }]),
                        ..Default::default()
                    }],
                    volumes: Some(vec![Volume {
                        config_map: Some(ConfigMapVolumeSource {
                            name: Some(bundle.full_name.to_owned()),
                            ..Default::default()
                        }),
                        name: CONFIG_VOLUME_NAME.to_owned(),
                        ..Default::default()
                    }]),
                    node_selector: bundle.values.node_selector.clone(),
                    tolerations: bundle.values.tolerations.clone(),
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}
