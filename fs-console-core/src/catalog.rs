//! Message catalog seam between the wizard core and the console's
//! localized resources.

use std::collections::HashMap;

/// Console message lookup.
///
/// Resolution of real resource bundles belongs to the hosting layer; the
/// wizard core only needs keys turned into display text so alerts and
/// labels can render. Positional arguments replace `{0}`, `{1}`, ...
/// markers in the resolved text.
pub trait MessageCatalog: Send + Sync {
    /// Resolve `key` to display text, substituting positional arguments.
    fn resolve(&self, key: &str, args: &[&str]) -> String;
}

/// `HashMap`-backed catalog.
///
/// Unknown keys echo back unchanged, so a sparsely seeded catalog still
/// produces usable (if unlocalized) alert text.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageCatalog {
    entries: HashMap<String, String>,
}

impl InMemoryMessageCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `(key, text)` pairs.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }
}

impl MessageCatalog for InMemoryMessageCatalog {
    fn resolve(&self, key: &str, args: &[&str]) -> String {
        let template = self.entries.get(key).map_or(key, String::as_str);
        substitute(template, args)
    }
}

fn substitute(template: &str, args: &[&str]) -> String {
    let mut text = template.to_string();
    for (index, arg) in args.iter().enumerate() {
        text = text.replace(&format!("{{{index}}}"), arg);
    }
    text
}
