use crate::utils::errors::{CsvGumError, Result};
use indexmap::IndexMap;

/// Which keys of a mapping survive a projection.
#[derive(Debug, Clone, Copy)]
pub enum Projection<'a> {
    /// Only these keys, in this order. Every key must be present.
    Keep(&'a [&'a str]),
    /// `(old, new)` pairs; the value of `old` is stored under `new`.
    Rename(&'a [(&'a str, &'a str)]),
    /// Every key except these, in source order.
    Exclude(&'a [&'a str]),
}

pub fn project_keys<V: Clone>(
    source: &IndexMap<String, V>,
    projection: Projection<'_>,
) -> Result<IndexMap<String, V>> {
    match projection {
        Projection::Keep(keys) => keys
            .iter()
            .map(|key| -> Result<(String, V)> {
                Ok((key.to_string(), lookup(source, key)?.clone()))
            })
            .collect(),
        Projection::Rename(pairs) => pairs
            .iter()
            .map(|(old, new)| -> Result<(String, V)> {
                Ok((new.to_string(), lookup(source, old)?.clone()))
            })
            .collect(),
        Projection::Exclude(keys) => Ok(source
            .iter()
            .filter(|(key, _)| !keys.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()),
    }
}

fn lookup<'m, V>(source: &'m IndexMap<String, V>, key: &str) -> Result<&'m V> {
    source.get(key).ok_or_else(|| {
        tracing::debug!(key, available = ?source.keys().collect::<Vec<_>>(), "Projection key missing");
        CsvGumError::KeyNotFound(key.to_string())
    })
}
