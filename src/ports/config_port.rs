//! Configuration access port trait.

pub trait ConfigPort {
    /// Raw value, or None when the section or key is absent. Typed parsing
    /// and its errors belong to the caller.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Comma-separated list; empty items are dropped.
    fn get_list(&self, section: &str, key: &str) -> Option<Vec<String>> {
        self.get_string(section, key).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}
