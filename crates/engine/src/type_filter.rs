use hashbrown::{HashMap, HashSet};

use crate::EntryType;

/// Mouse button used on a type button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickButton {
    /// Toggle the clicked type.
    Left,
    /// Show only the clicked type, or everything if it already was the
    /// only one shown.
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TypeSlot {
    entry_type: EntryType,
    active: bool,
}

/// Active flag per entry type, in the order the types first appeared in
/// the listing.
#[derive(Debug, Clone, Default)]
pub struct TypeFilterState {
    slots: Vec<TypeSlot>,
    index: HashMap<EntryType, usize>,
    /// Position used by keyboard cycling.
    cursor: usize,
}

impl TypeFilterState {
    /// Distinct types of `types`, in first-appearance order, all active.
    pub fn from_types<I>(types: I) -> Self
    where
        I: IntoIterator<Item = EntryType>,
    {
        let mut state = Self::default();
        for entry_type in types {
            if state.index.contains_key(&entry_type) {
                continue;
            }
            state.index.insert(entry_type, state.slots.len());
            state.slots.push(TypeSlot {
                entry_type,
                active: true,
            });
        }
        state
    }

    /// Adopt the types of a fresh listing.
    ///
    /// When the distinct set of types changed, every type starts active
    /// again; otherwise the current flags are kept. Returns whether the
    /// state was replaced.
    pub fn rebuild<I>(&mut self, types: I) -> bool
    where
        I: IntoIterator<Item = EntryType>,
    {
        let fresh = Self::from_types(types);

        let unchanged = fresh.slots.len() == self.slots.len()
            && fresh.slots.iter().all(|s| self.index.contains_key(&s.entry_type));
        if unchanged {
            return false;
        }

        *self = fresh;
        true
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, entry_type: EntryType) -> bool {
        self.index.contains_key(&entry_type)
    }

    /// Whether entries of `entry_type` may be shown. Types the state does
    /// not know about are visible.
    #[inline]
    pub fn is_active(&self, entry_type: EntryType) -> bool {
        self.index
            .get(&entry_type)
            .is_none_or(|&i| self.slots[i].active)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// Every known type with its active flag, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryType, bool)> + '_ {
        self.slots.iter().map(|s| (s.entry_type, s.active))
    }

    /// Flip one type. Returns the new flag, or `None` for an unknown type.
    pub fn toggle(&mut self, entry_type: EntryType) -> Option<bool> {
        let &i = self.index.get(&entry_type)?;
        let slot = &mut self.slots[i];
        slot.active = !slot.active;
        Some(slot.active)
    }

    /// Show only `entry_type`, or every type if it already is the only
    /// active one. Unknown types are ignored.
    pub fn solo(&mut self, entry_type: EntryType) {
        let Some(&i) = self.index.get(&entry_type) else {
            return;
        };

        if self.active_count() == 1 && self.slots[i].active {
            self.reset();
        } else {
            self.set_active(Some(&[entry_type]));
        }
    }

    pub fn click(&mut self, entry_type: EntryType, button: ClickButton) {
        match button {
            ClickButton::Left => {
                self.toggle(entry_type);
            }
            ClickButton::Right => self.solo(entry_type),
        }
    }

    /// Activate exactly the types in `allowed`. A missing or empty list
    /// deactivates everything.
    pub fn set_active(&mut self, allowed: Option<&[EntryType]>) {
        let allowed: HashSet<EntryType> = allowed.unwrap_or_default().iter().copied().collect();
        for slot in &mut self.slots {
            slot.active = allowed.contains(&slot.entry_type);
        }
    }

    /// Deactivate exactly the types in `denied`. A missing or empty list
    /// activates everything.
    pub fn set_inactive(&mut self, denied: Option<&[EntryType]>) {
        let denied: HashSet<EntryType> = denied.unwrap_or_default().iter().copied().collect();
        for slot in &mut self.slots {
            slot.active = !denied.contains(&slot.entry_type);
        }
    }

    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.active = true;
        }
    }

    /// Keyboard cycling: move to the neighbour of the only active type
    /// (wrapping) and show only that one. When several types are active
    /// the previous cursor position is reused.
    pub fn cycle(&mut self, direction: CycleDirection) -> Option<EntryType> {
        let len = self.slots.len();
        if len == 0 {
            return None;
        }

        if self.active_count() == 1
            && let Some(current) = self.slots.iter().position(|s| s.active)
        {
            self.cursor = match direction {
                CycleDirection::Next => (current + 1) % len,
                CycleDirection::Previous => (current + len - 1) % len,
            };
        }
        self.cursor = self.cursor.min(len - 1);

        let target = self.slots[self.cursor].entry_type;
        self.set_active(Some(&[target]));
        Some(target)
    }
}

#[cfg(test)]
#[path = "type_filter_tests.rs"]
mod tests;
