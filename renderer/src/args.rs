//! Builds the command line of the kube-janitor process.
use crate::values::KubeJanitorValues;

/// Path the rules ConfigMap is mounted at inside the janitor container.
pub const CONFIG_MOUNT_PATH: &str = "/config";
/// Key of the rules document inside the rules ConfigMap.
pub const RULES_FILE_KEY: &str = "rules.yaml";

/// Build the ordered argument list for the kube-janitor container.
///
/// Flags are appended in a fixed order so rendered manifests are reproducible.
/// Values are passed through verbatim, kube-janitor validates them itself.
/// The rules file flag is always last.
pub fn build_args(values: &KubeJanitorValues) -> Vec<String> {
    let mut args = Vec::new();

    let switches = [
        (values.dry_run, "--dry-run"),
        (values.debug, "--debug"),
        (values.once, "--once"),
    ];
    for (enabled, flag) in switches {
        if enabled.unwrap_or_default() {
            args.push(flag.to_owned());
        }
    }

    let options = [
        (&values.interval, "--interval"),
        (&values.include_resources, "--include-resources"),
        (&values.exclude_resources, "--exclude-resources"),
        (&values.include_namespaces, "--include-namespaces"),
        (&values.exclude_namespaces, "--exclude-namespaces"),
    ];
    for (value, flag) in options {
        if let Some(value) = value {
            args.push(flag.to_owned());
            args.push(value.to_owned());
        }
    }

    if let Some(additional) = &values.additional_args {
        args.extend(additional.iter().cloned());
    }

    args.push(format!("--rules-file={CONFIG_MOUNT_PATH}/{RULES_FILE_KEY}"));
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    use expect_test::expect;

    #[test]
    fn empty_values_only_pass_rules_file() {
        expect![[r#"
            [
                "--rules-file=/config/rules.yaml",
            ]
        "#]]
        .assert_debug_eq(&build_args(&KubeJanitorValues::default()));
    }

    #[test]
    fn flags_follow_fixed_order() {
        let values = KubeJanitorValues {
            dry_run: Some(true),
            interval: Some("30m".to_owned()),
            additional_args: Some(vec!["--extra".to_owned()]),
            ..Default::default()
        };
        assert_eq!(
            build_args(&values),
            vec!["--dry-run", "--interval", "30m", "--extra", "--rules-file=/config/rules.yaml"]
        );
    }

    #[test]
    fn all_flags() {
        let values = KubeJanitorValues {
            dry_run: Some(true),
            debug: Some(true),
            once: Some(true),
            interval: Some("60".to_owned()),
            include_resources: Some("deployments,pods".to_owned()),
            exclude_resources: Some("events".to_owned()),
            include_namespaces: Some("all".to_owned()),
            exclude_namespaces: Some("kube-system".to_owned()),
            additional_args: Some(vec![
                "--delete-notification=3600".to_owned(),
                "--wait-after-delete".to_owned(),
                "5".to_owned(),
            ]),
        };
        expect![[r#"
            [
                "--dry-run",
                "--debug",
                "--once",
                "--interval",
                "60",
                "--include-resources",
                "deployments,pods",
                "--exclude-resources",
                "events",
                "--include-namespaces",
                "all",
                "--exclude-namespaces",
                "kube-system",
                "--delete-notification=3600",
                "--wait-after-delete",
                "5",
                "--rules-file=/config/rules.yaml",
            ]
        "#]]
        .assert_debug_eq(&build_args(&values));
    }

    #[test]
    fn false_switches_and_empty_additional_args_are_omitted() {
        let values = KubeJanitorValues {
            dry_run: Some(false),
            debug: Some(false),
            once: None,
            additional_args: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(build_args(&values), vec!["--rules-file=/config/rules.yaml"]);
    }

    #[test]
    fn values_pass_through_verbatim() {
        let values = KubeJanitorValues {
            interval: Some("not a duration".to_owned()),
            include_namespaces: Some("".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            build_args(&values),
            vec![
                "--interval",
                "not a duration",
                "--include-namespaces",
                "",
                "--rules-file=/config/rules.yaml"
            ]
        );
    }
}
