use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::{Error, Map, MapId, Missing, Result};

pub type SharedMap = Arc<Mutex<Map>>;

/// Maps shared between threads, each behind its own lock.
///
/// Every mutation of a map, saving included, happens inside [`MapRegistry::with_map`] and is
/// therefore serialized per map. Different maps can be worked on in parallel.
#[derive(Default)]
pub struct MapRegistry {
    maps: RwLock<BTreeMap<MapId, SharedMap>>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `map` under its id, returning the handle of the map it replaces.
    pub fn insert(&self, map: Map) -> Option<SharedMap> {
        debug!(map = map.id(), "register map");
        self.maps
            .write()
            .insert(map.id(), Arc::new(Mutex::new(map)))
    }
    pub fn remove(&self, id: MapId) -> Result<SharedMap> {
        self.maps
            .write()
            .remove(&id)
            .ok_or(Error::NotFound(Missing::Map(id)))
    }
    pub fn ids(&self) -> Vec<MapId> {
        self.maps.read().keys().copied().collect()
    }
    pub fn get(&self, id: MapId) -> Result<SharedMap> {
        self.maps
            .read()
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound(Missing::Map(id)))
    }

    /// Runs `f` with exclusive access to map `id`.
    ///
    /// Only the map's own lock is held while `f` runs, so `f` may use the registry, but calling
    /// `with_map` for the same id again from `f` deadlocks.
    pub fn with_map<R>(&self, id: MapId, f: impl FnOnce(&mut Map) -> R) -> Result<R> {
        let map = self.get(id)?;
        let mut map = map.lock();
        Ok(f(&mut map))
    }

    /// Saves every map with a destination to it, stopping at the first failure.
    ///
    /// Returns how many maps were written.
    pub fn save_all(&self) -> Result<usize> {
        let maps: Vec<SharedMap> = self.maps.read().values().cloned().collect();
        let mut saved = 0;
        for map in maps {
            let map = map.lock();
            if map.path().is_some() {
                map.save(None)?;
                saved += 1;
            }
        }
        Ok(saved)
    }
}

#[cfg(test)]
mod test {
    use std::thread;

    use crate::{Delta, Error, Map, MapRegistry, Missing};

    #[test]
    fn lookup() {
        let registry = MapRegistry::new();
        assert!(registry.insert(Map::new(2, "b")).is_none());
        assert!(registry.insert(Map::new(1, "a")).is_none());
        assert_eq!(registry.ids(), [1, 2]);
        let replaced = registry.insert(Map::new(1, "c")).unwrap();
        assert_eq!(replaced.lock().description(), "a");
        assert_eq!(registry.with_map(1, |map| map.description().to_owned()).unwrap(), "c");
        assert!(matches!(
            registry.with_map(3, |_| ()),
            Err(Error::NotFound(Missing::Map(3)))
        ));
        assert_eq!(registry.remove(2).unwrap().lock().id(), 2);
        assert_eq!(registry.ids(), [1]);
    }

    #[test]
    fn registry_usable_inside_with_map() {
        let registry = MapRegistry::new();
        registry.insert(Map::new(0, "outer"));
        let inner = registry
            .with_map(0, |outer| {
                registry.insert(Map::new(1, "inner"));
                let inner = registry.with_map(1, |inner| inner.description().to_owned());
                registry.remove(1).unwrap();
                (outer.description().to_owned(), inner.unwrap())
            })
            .unwrap();
        assert_eq!(inner, ("outer".to_owned(), "inner".to_owned()));
        assert_eq!(registry.ids(), [0]);
    }

    #[test]
    fn concurrent_edits_are_serialized() {
        let registry = MapRegistry::new();
        let mut map = Map::new(0, "");
        map.add_area_layer("claims");
        registry.insert(map);

        thread::scope(|s| {
            for t in 0..4_u64 {
                let registry = &registry;
                s.spawn(move || {
                    for i in 0..8_u64 {
                        registry
                            .with_map(0, |map| {
                                let layer = map.area_layer_mut(0).unwrap();
                                let mut delta = Delta::noop();
                                delta.set(t, i, 3, Some(t + 1));
                                layer.add_delta((t * 8 + i) as f64, delta).unwrap();
                            })
                            .unwrap();
                    }
                });
            }
        });

        registry
            .with_map(0, |map| {
                let layer = map.area_layer(0).unwrap();
                assert_eq!(layer.deltas().len(), 32);
                for t in 0..4 {
                    for i in 0..8 {
                        assert_eq!(layer.tree().value_at(t, i), &(t + 1));
                    }
                }
                assert!(layer.tree().is_canonical());
            })
            .unwrap();
    }

    #[test]
    fn save_all_skips_unsaved_maps() {
        let dir = tempfile::tempdir().unwrap();
        let registry = MapRegistry::new();
        let mut saved = Map::new(0, "saved");
        saved.set_path(dir.path().join("0.json"));
        registry.insert(saved);
        registry.insert(Map::new(1, "in memory"));
        assert_eq!(registry.save_all().unwrap(), 1);
        assert_eq!(Map::load(dir.path().join("0.json")).unwrap().description(), "saved");
    }
}
