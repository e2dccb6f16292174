//! Fixed-capacity enemy storage.

use tile_defence_core::{EnemyId, SimulationError};

use crate::entities::Enemy;

/// Ordered enemy slots sized once at level initialisation.
///
/// Slots are filled in insertion order and never reused: `count` only grows.
/// A future removal path would need a free list on top of this.
#[derive(Debug)]
pub(crate) struct EnemyPool {
    slots: Vec<Option<Enemy>>,
    count: usize,
}

impl EnemyPool {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            count: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.count
    }

    /// Stores the enemy built for the next free slot.
    pub(crate) fn insert_with(
        &mut self,
        build: impl FnOnce(EnemyId) -> Enemy,
    ) -> Result<EnemyId, SimulationError> {
        let capacity = self.capacity();
        let index = self.count;
        let id = u32::try_from(index)
            .map(EnemyId::new)
            .map_err(|_| SimulationError::CapacityExceeded { capacity })?;
        let Some(slot) = self.slots.get_mut(index) else {
            return Err(SimulationError::CapacityExceeded { capacity });
        };
        *slot = Some(build(id));
        self.count += 1;
        Ok(id)
    }

    pub(crate) fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        let index = usize::try_from(id.get()).ok()?;
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Occupied slots in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.slots.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_defence_core::{PixelPosition, Tile, TileCoord, TileVisual};

    fn enemy(id: EnemyId) -> Enemy {
        Enemy::new(
            id,
            Tile::new(TileCoord::new(0, 0), false, TileVisual::new(1)),
            PixelPosition::default(),
        )
    }

    #[test]
    fn assigns_slots_in_insertion_order() {
        let mut pool = EnemyPool::with_capacity(3);
        assert_eq!(pool.insert_with(enemy), Ok(EnemyId::new(0)));
        assert_eq!(pool.insert_with(enemy), Ok(EnemyId::new(1)));
        let ids: Vec<u32> = pool.iter().map(|enemy| enemy.id().get()).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn rejects_inserts_beyond_capacity() {
        let mut pool = EnemyPool::with_capacity(2);
        let _ = pool.insert_with(enemy).expect("first slot");
        let _ = pool.insert_with(enemy).expect("second slot");
        assert_eq!(
            pool.insert_with(enemy),
            Err(SimulationError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.iter().count(), 2);
    }

    #[test]
    fn unknown_identifiers_resolve_to_none() {
        let mut pool = EnemyPool::with_capacity(2);
        assert!(pool.get_mut(EnemyId::new(0)).is_none());
        assert!(pool.get_mut(EnemyId::new(9)).is_none());
    }
}
