//! Slot storage for scene objects
//!
//! Objects keep their `ObjectId` for their whole life. Removing one leaves
//! a hole instead of compacting, so ids held elsewhere never shift.

/// Stable identity of an object inside one container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Position of the slot in its container
    pub fn index(&self) -> u32 {
        self.0
    }
}

pub struct ObjectSlots<T: ?Sized> {
    /// Sparse array; `None` marks a removed object
    data: Vec<Option<Box<T>>>,
}

impl<T: ?Sized> ObjectSlots<T> {
    /// Empty container; the first insert gets index 0.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Append an object; ids are never reused.
    pub fn insert(&mut self, object: Box<T>) -> ObjectId {
        let id = ObjectId(self.data.len() as u32);
        self.data.push(Some(object));
        id
    }

    /// Take the object out, leaving its slot empty.
    pub fn remove(&mut self, id: ObjectId) -> Option<Box<T>> {
        self.data.get_mut(id.0 as usize).and_then(|slot| slot.take())
    }

    /// Live object behind `id`; `None` once it has been removed.
    pub fn get(&self, id: ObjectId) -> Option<&T> {
        self.data.get(id.0 as usize).and_then(|slot| slot.as_deref())
    }

    /// Mutable access to a live object. Removed ids give `None`.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        match self.data.get_mut(id.0 as usize) {
            Some(Some(object)) => Some(object.as_mut()),
            _ => None,
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate live objects in insertion order, skipping holes.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &T)> {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_deref().map(|o| (ObjectId(idx as u32), o)))
    }

    /// Same order as `iter`, with mutable access.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut T)> {
        self.data.iter_mut().enumerate().filter_map(|(idx, slot)| match slot {
            Some(object) => Some((ObjectId(idx as u32), object.as_mut())),
            None => None,
        })
    }

    /// Number of live objects.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of slots, holes included.
    pub fn capacity_used(&self) -> usize {
        self.data.len()
    }
}

impl<T: ?Sized> Default for ObjectSlots<T> {
    fn default() -> Self {
        Self::new()
    }
}
