use std::collections::BTreeMap;

use super::{RigidBody, ID};

/**
 * BodyStore owns every body of a scene in insertion order.
 * The order is the pair order of a step, so it never gets shuffled.
 */
#[derive(Default, Clone, Debug)]
pub(crate) struct BodyStore {
    bodies: Vec<RigidBody>,
    map: BTreeMap<ID, usize>, // body id to index in `bodies`
}

impl BodyStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(capacity),
            map: BTreeMap::new(),
        }
    }

    pub(crate) fn push(&mut self, body: RigidBody) {
        self.map.insert(body.id(), self.bodies.len());
        self.bodies.push(body);
    }

    pub(crate) fn has_element(&self, id: ID) -> bool {
        self.map.contains_key(&id)
    }

    pub(crate) fn remove_element(&mut self, id: ID) -> Option<RigidBody> {
        let index = self.map.remove(&id)?;
        let body = self.bodies.remove(index);
        // indexes after the removed body shift by one
        self.map.values_mut().for_each(|i| {
            if *i > index {
                *i -= 1;
            }
        });
        Some(body)
    }

    pub(crate) fn get_element_by_id(&self, id: ID) -> Option<&RigidBody> {
        self.map.get(&id).and_then(|&index| self.bodies.get(index))
    }

    pub(crate) fn get_mut_element_by_id(&mut self, id: ID) -> Option<&mut RigidBody> {
        self.map
            .get(&id)
            .and_then(|&index| self.bodies.get_mut(index))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &RigidBody> {
        self.bodies.iter()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [RigidBody] {
        &mut self.bodies
    }

    pub(crate) fn size(&self) -> usize {
        self.bodies.len()
    }

    pub(crate) fn clear(&mut self) {
        self.bodies.clear();
        self.map.clear();
    }
}
