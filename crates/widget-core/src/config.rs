//! Layered configuration: built-in defaults ← remote per-bot config ← host inline overrides.
//!
//! [`merge`] is the pure tree merge. [`ConfigResolver`] folds layers over the
//! defaults and reads the result back as a typed [`WidgetConfig`]. A value the
//! typed schema cannot read is dropped on its own; the rest of its layer applies.

use serde_json::{Map, Value};
use widget_types::{Result, config::WidgetConfig};

/// Merge `overlay` onto `base`.
///
/// Objects merge key by key, recursively. Any other overlay value (arrays,
/// scalars, null) replaces the base value wholesale. Keys only in `base` are
/// kept, keys only in `overlay` are added. A non-object overlay at the top
/// level leaves `base` unchanged.
pub fn merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut out = base_map.clone();
            for (key, value) in overlay_map {
                let merged = match (out.get(key), value) {
                    (Some(existing @ Value::Object(_)), Value::Object(_)) => merge(existing, value),
                    _ => value.clone(),
                };
                out.insert(key.clone(), merged);
            }
            Value::Object(out)
        }
        (_, Value::Object(_)) => overlay.clone(),
        _ => base.clone(),
    }
}

/// Fold `layers` left to right; later layers win.
pub fn merge_all<'a>(layers: impl IntoIterator<Item = &'a Value>) -> Value {
    layers
        .into_iter()
        .fold(Value::Object(Default::default()), |acc, layer| merge(&acc, layer))
}

/// Holds the effective configuration while layers are applied.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    tree: Value,
    config: WidgetConfig,
}

impl ConfigResolver {
    /// Start from the built-in defaults.
    pub fn new() -> Result<Self> {
        Self::from_config(WidgetConfig::default())
    }

    pub fn from_config(config: WidgetConfig) -> Result<Self> {
        Ok(Self {
            tree: config.to_tree()?,
            config,
        })
    }

    /// Merge `layer` over the current tree.
    ///
    /// When the merged tree no longer reads as a [`WidgetConfig`], the layer
    /// is applied field by field instead: every value that still reads is
    /// kept, every value that does not leaves the previous one in place.
    /// Returns the dotted paths of the values that were dropped.
    pub fn apply(&mut self, layer: &Value) -> Vec<String> {
        let mut rejected = Vec::new();
        if self.try_commit(merge(&self.tree, layer)) {
            return rejected;
        }
        if let Value::Object(fields) = layer {
            self.apply_fields(&mut Vec::new(), fields, &mut rejected);
        }
        rejected
    }

    fn apply_fields(
        &mut self,
        path: &mut Vec<String>,
        fields: &Map<String, Value>,
        rejected: &mut Vec<String>,
    ) {
        for (key, value) in fields {
            path.push(key.clone());
            if !self.try_commit(merge(&self.tree, &nest(path, value))) {
                match value {
                    Value::Object(inner) if lookup(&self.tree, path).is_some_and(Value::is_object) => {
                        self.apply_fields(path, inner, rejected)
                    }
                    _ => rejected.push(path.join(".")),
                }
            }
            path.pop();
        }
    }

    fn try_commit(&mut self, tree: Value) -> bool {
        match WidgetConfig::from_tree(&tree) {
            Ok(config) => {
                self.tree = tree;
                self.config = config;
                true
            }
            Err(_) => false,
        }
    }

    /// [`apply`](Self::apply), logging what was dropped. Returns `true` when
    /// the whole layer applied.
    pub fn apply_or_keep(&mut self, source: &str, layer: &Value) -> bool {
        let rejected = self.apply(layer);
        if rejected.is_empty() {
            log::debug!("Applied {} config layer", source);
            true
        } else {
            log::warn!(
                "Ignoring unreadable {} config values: {}",
                source,
                rejected.join(", ")
            );
            false
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// The merged tree, including keys the typed schema does not model.
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    pub fn into_config(self) -> WidgetConfig {
        self.config
    }
}

/// Resolve defaults ← `remote` ← `inline`. Unreadable values are skipped.
pub fn resolve(remote: Option<&Value>, inline: &Value) -> Result<ConfigResolver> {
    let mut resolver = ConfigResolver::new()?;
    if let Some(remote) = remote {
        resolver.apply_or_keep("remote", remote);
    }
    resolver.apply_or_keep("inline", inline);
    Ok(resolver)
}

/// Wrap `value` in one object per path segment: `["a", "b"]` → `{"a": {"b": value}}`.
fn nest(path: &[String], value: &Value) -> Value {
    path.iter().rev().fold(value.clone(), |inner, key| {
        let mut map = Map::new();
        map.insert(key.clone(), inner);
        Value::Object(map)
    })
}

fn lookup<'a>(tree: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter().try_fold(tree, |node, key| node.get(key))
}
