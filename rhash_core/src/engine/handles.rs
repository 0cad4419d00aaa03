//! Generational handle tables
//!
//! A handle packs `slot index + 1` into its low 32 bits and the slot
//! generation into its high 32 bits, so zero is never a valid handle. Every
//! release bumps the slot generation, which turns any copy of the old handle
//! into a stale one.

use crate::error::StateError;
use crate::{Error, Result};

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot arena handing out generational `u64` handles
pub(crate) struct HandleTable<T> {
    kind: &'static str,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
    limit: usize,
}

fn encode(index: u32, generation: u32) -> u64 {
    (u64::from(generation) << 32) | u64::from(index + 1)
}

fn decode(handle: u64) -> Option<(usize, u32)> {
    let low = handle as u32;
    if low == 0 {
        return None;
    }
    Some(((low - 1) as usize, (handle >> 32) as u32))
}

impl<T> HandleTable<T> {
    /// Empty table; `kind` names the handle type in limit errors
    pub(crate) fn new(kind: &'static str) -> Self {
        Self {
            kind,
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            limit: 0,
        }
    }

    /// Maximum number of live handles, `0` for unbounded
    pub(crate) fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Store `value` and return its handle
    pub(crate) fn insert(&mut self, value: T) -> Result<u64> {
        if self.limit != 0 && self.live >= self.limit {
            return Err(StateError::handle_limit_exceeded(self.kind, self.limit).into());
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let index = u32::try_from(self.slots.len())
                    .ok()
                    .filter(|index| *index < u32::MAX)
                    .ok_or_else(|| StateError::handle_limit_exceeded(self.kind, u32::MAX as usize))?;
                self.slots.push(Slot {
                    generation: 0,
                    value: None,
                });
                index
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.value = Some(value);
        self.live += 1;
        Ok(encode(index, slot.generation))
    }

    fn slot(&self, handle: u64) -> Option<&Slot<T>> {
        let (index, generation) = decode(handle)?;
        self.slots
            .get(index)
            .filter(|slot| slot.generation == generation && slot.value.is_some())
    }

    /// Borrow the value behind `handle`
    pub(crate) fn get(&self, handle: u64) -> Result<&T> {
        self.slot(handle)
            .and_then(|slot| slot.value.as_ref())
            .ok_or_else(|| Error::invalid_handle(handle))
    }

    /// Release `handle` and return its value
    pub(crate) fn remove(&mut self, handle: u64) -> Result<T> {
        let (index, generation) = decode(handle).ok_or_else(|| Error::invalid_handle(handle))?;
        let slot = self
            .slots
            .get_mut(index)
            .filter(|slot| slot.generation == generation)
            .ok_or_else(|| Error::invalid_handle(handle))?;
        let value = slot.value.take().ok_or_else(|| Error::invalid_handle(handle))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index as u32);
        self.live -= 1;
        Ok(value)
    }

    /// Release every handle
    ///
    /// Generations of all slots are bumped, so no handle issued before the
    /// call resolves afterwards.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.value = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index as u32);
        }
        self.live = 0;
    }
}
