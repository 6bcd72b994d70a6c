//! Cache-side model of the library collection.

use medley_api::LibraryPath;
use std::collections::BTreeMap;

/// The configured scan roots, keyed by server-assigned id.
///
/// Rebuilt wholesale from the backend's list on every fetch; the map is
/// never patched in place, so id uniqueness and ordering always reflect
/// the last response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Libraries {
    by_id: BTreeMap<u64, LibraryPath>,
}

impl Libraries {
    /// Looks up one library by id.
    pub fn get(&self, id: u64) -> Option<&LibraryPath> {
        self.by_id.get(&id)
    }

    /// All libraries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &LibraryPath> {
        self.by_id.values()
    }

    /// Number of configured roots.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True when no roots are configured.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl From<Vec<LibraryPath>> for Libraries {
    fn from(list: Vec<LibraryPath>) -> Self {
        Self {
            by_id: list.into_iter().map(|lib| (lib.id, lib)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib(id: u64, path: &str) -> LibraryPath {
        serde_json::from_value(serde_json::json!({"id": id, "path": path})).unwrap()
    }

    #[test]
    fn rebuilt_from_list_in_id_order() {
        let libraries = Libraries::from(vec![lib(3, "/c"), lib(1, "/a"), lib(2, "/b")]);
        assert_eq!(libraries.len(), 3);
        let ids: Vec<u64> = libraries.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(libraries.get(2).unwrap().path, "/b");
        assert!(libraries.get(9).is_none());
    }

    #[test]
    fn duplicate_ids_keep_the_last_entry() {
        let libraries = Libraries::from(vec![lib(1, "/old"), lib(1, "/new")]);
        assert_eq!(libraries.len(), 1);
        assert_eq!(libraries.get(1).unwrap().path, "/new");
    }
}
