//! Deep merge for layered YAML configuration.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Sequences are replaced entirely (not merged)
//! - Null values in overlay delete the corresponding key from base
//! - Scalars in overlay replace scalars in base

use serde_yaml::Value;

/// Deep merge two YAML values; `overlay` wins at the point of conflict.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

/// Merge multiple configs in order (later overrides earlier).
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, config| {
            deep_merge(&acc, config)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn package_options_merge_per_key() {
        let base = yaml(
            r#"
packages:
  fiat:
    download: true
    package_dir: /src/fiat
"#,
        );
        let overlay = yaml(
            r#"
packages:
  fiat:
    package_dir: /home/me/fiat
"#,
        );

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["packages"]["fiat"]["package_dir"], "/home/me/fiat");
        assert_eq!(result["packages"]["fiat"]["download"], true);
    }

    #[test]
    fn sequences_are_replaced_not_merged() {
        let base = yaml("search_roots: [/usr/local, /usr]");
        let overlay = yaml("search_roots: [/opt]");

        let result = deep_merge(&base, &overlay);
        let roots = result["search_roots"].as_sequence().unwrap();

        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0], "/opt");
    }

    #[test]
    fn null_removes_inherited_value() {
        let base = yaml("install_sudo: 'sudo '\nshell_timeout: 10");
        let overlay = yaml("install_sudo: null");

        let result = deep_merge(&base, &overlay);

        assert!(result.get("install_sudo").is_none());
        assert_eq!(result["shell_timeout"], 10);
    }

    #[test]
    fn merge_configs_merges_multiple_in_order() {
        let configs = vec![yaml("a: 1\nb: 2"), yaml("b: 3\nc: 4"), yaml("c: 5")];

        let result = merge_configs(&configs);

        assert_eq!(result["a"], 1);
        assert_eq!(result["b"], 3);
        assert_eq!(result["c"], 5);
    }
}
