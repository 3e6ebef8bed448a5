use crate::models::types::ZoneId;
use crate::models::zone::Zone;
use crate::util::eq_caseless;
use std::sync::Arc;

/// Every loaded zone, in load order. Zones are shared immutably; replacing a
/// zone swaps the whole `Arc`, never mutates it in place.
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    zones: Vec<Arc<Zone>>,
}

impl Atlas {
    pub fn new(zones: Vec<Zone>) -> Self {
        let mut atlas = Atlas::default();
        for zone in zones {
            atlas.replace_zone(zone);
        }
        atlas
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn zones(&self) -> impl Iterator<Item = &Arc<Zone>> {
        self.zones.iter()
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Arc<Zone>> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn zone_by_name(&self, name: &str) -> Option<&Arc<Zone>> {
        let name = name.trim();
        self.zones.iter().find(|z| eq_caseless(&z.name, name))
    }

    /// Looks a zone up by numeric id first, then by name.
    pub fn find(&self, key: &str) -> Option<&Arc<Zone>> {
        key.parse::<ZoneId>()
            .ok()
            .and_then(|id| self.zone(id))
            .or_else(|| self.zone_by_name(key))
    }

    /// Inserts a zone, replacing any zone with the same id. Returns the replaced zone.
    pub fn replace_zone(&mut self, zone: Zone) -> Option<Arc<Zone>> {
        let zone = Arc::new(zone);
        match self.zones.iter_mut().find(|z| z.id == zone.id) {
            Some(slot) => Some(std::mem::replace(slot, zone)),
            None => {
                self.zones.push(zone);
                None
            }
        }
    }

    /// First zone other than `except` that has a room with this title.
    pub fn zone_with_room_named(&self, name: &str, except: Option<ZoneId>) -> Option<&Arc<Zone>> {
        self.zones
            .iter()
            .filter(|z| Some(z.id) != except)
            .find(|z| z.has_room_named(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::zone::Node;

    fn zone(id: u32, name: &str, rooms: &[&str]) -> Zone {
        let nodes = rooms
            .iter()
            .enumerate()
            .map(|(i, r)| Node::new(i as u32 + 1, *r))
            .collect();
        Zone::new(id, name, nodes, vec![]).unwrap()
    }

    #[test]
    fn replace_keeps_position() {
        let mut atlas = Atlas::new(vec![zone(1, "Town", &["Square"]), zone(2, "Forest", &["Path"])]);
        let old = atlas.replace_zone(zone(1, "Town", &["Square", "Bank"]));
        assert_eq!(old.unwrap().nodes().len(), 1);
        assert_eq!(atlas.len(), 2);
        assert_eq!(atlas.zones().next().unwrap().nodes().len(), 2);
    }

    #[test]
    fn find_by_id_or_name() {
        let atlas = Atlas::new(vec![zone(7, "Forest", &["Path"])]);
        assert_eq!(atlas.find("7").unwrap().name, "Forest");
        assert_eq!(atlas.find("forest").unwrap().id, ZoneId(7));
        assert!(atlas.find("8").is_none());
    }

    #[test]
    fn room_name_search_skips_excluded_zone() {
        let atlas = Atlas::new(vec![zone(1, "Town", &["Path"]), zone(2, "Forest", &["Path"])]);
        let found = atlas.zone_with_room_named("path", Some(ZoneId(1))).unwrap();
        assert_eq!(found.id, ZoneId(2));
    }
}
