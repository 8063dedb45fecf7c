use strum::IntoEnumIterator;

use crate::config::BattleConfig;

use super::{Rune, RuneBonus, RuneError, RuneSet};

/// The six rune slots of a creature, with set-effect bookkeeping.
///
/// Set flags are refreshed on every place/remove: when a set reaches its
/// required count, every rune of that set is flagged active; when it drops
/// below, every remaining rune of that set is flagged inactive.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuneSlots {
    slots: [Option<Rune>; BattleConfig::RUNE_SLOTS],
}

impl RuneSlots {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(slot: u8) -> Result<usize, RuneError> {
        if (1..=BattleConfig::RUNE_SLOTS as u8).contains(&slot) {
            Ok(usize::from(slot - 1))
        } else {
            Err(RuneError::InvalidSlot(slot))
        }
    }

    /// Equip `rune` into its own slot.
    ///
    /// A rune already in that slot is unequipped and returned.
    pub fn place(&mut self, mut rune: Rune) -> Result<Option<Rune>, RuneError> {
        if rune.is_equipped() {
            return Err(RuneError::AlreadyEquipped);
        }
        let index = Self::index(rune.slot())?;
        rune.mark_equipped(true);
        let displaced = self.slots[index].replace(rune).map(|mut old| {
            old.mark_equipped(false);
            old.mark_set_active(false);
            old
        });
        self.refresh_set_flags();
        Ok(displaced)
    }

    /// Unequip and return the rune in `slot`.
    pub fn remove(&mut self, slot: u8) -> Result<Rune, RuneError> {
        let index = Self::index(slot)?;
        let mut rune = self.slots[index].take().ok_or(RuneError::SlotEmpty(slot))?;
        rune.mark_equipped(false);
        self.refresh_set_flags();
        Ok(rune)
    }

    pub fn get(&self, slot: u8) -> Option<&Rune> {
        Self::index(slot).ok().and_then(|i| self.slots[i].as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rune> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of equipped runes belonging to `set`.
    pub fn set_count(&self, set: RuneSet) -> usize {
        self.iter().filter(|r| r.set() == set).count()
    }

    /// Whether the set effect of `set` is currently unlocked.
    pub fn is_set_active(&self, set: RuneSet) -> bool {
        self.set_count(set) >= set.size()
    }

    fn refresh_set_flags(&mut self) {
        let active: Vec<RuneSet> = RuneSet::iter().filter(|s| self.is_set_active(*s)).collect();
        for rune in self.slots.iter_mut().flatten() {
            let on = active.contains(&rune.set());
            rune.mark_set_active(on);
        }
    }

    /// Total stat increase of every equipped rune plus unlocked set effects.
    ///
    /// A set effect is granted once per complete group (six ENERGY runes
    /// grant the ENERGY effect three times).
    pub fn bonus(&self) -> RuneBonus {
        let mut total: RuneBonus = self.iter().map(|r| *r.bonus()).sum();
        for set in RuneSet::iter() {
            let groups = self.set_count(set) / set.size();
            if groups > 0 {
                total.modifiers += set.payload().scaled(groups as f64);
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rune::RuneStat;

    fn fatal(slot: u8) -> Rune {
        Rune::new(format!("fatal-{slot}"), 1, slot, RuneSet::Fatal, RuneStat::Atk).unwrap()
    }

    #[test]
    fn fourth_fatal_rune_activates_all_four() {
        let mut slots = RuneSlots::new();
        for slot in 1..=3 {
            slots.place(fatal(slot)).unwrap();
        }
        assert!(!slots.is_set_active(RuneSet::Fatal));
        assert!(slots.iter().all(|r| !r.is_set_active()));
        assert_eq!(slots.bonus().modifiers.attack_pct, 0.0);

        slots.place(fatal(4)).unwrap();
        assert!(slots.is_set_active(RuneSet::Fatal));
        assert!(slots.iter().all(|r| r.is_set_active()));
        assert_eq!(slots.bonus().modifiers.attack_pct, 35.0);

        let removed = slots.remove(2).unwrap();
        assert!(!removed.is_set_active());
        assert!(!removed.is_equipped());
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(|r| !r.is_set_active()));
        assert_eq!(slots.bonus().modifiers.attack_pct, 0.0);
    }

    #[test]
    fn bad_slots_are_rejected() {
        let mut slots = RuneSlots::new();
        slots.place(fatal(1)).unwrap();
        assert_eq!(slots.remove(2).unwrap_err(), RuneError::SlotEmpty(2));
        assert_eq!(slots.remove(9).unwrap_err(), RuneError::InvalidSlot(9));
    }

    #[test]
    fn placing_into_a_taken_slot_swaps_the_rune() {
        let mut slots = RuneSlots::new();
        for slot in 1..=4 {
            slots.place(fatal(slot)).unwrap();
        }
        assert!(slots.is_set_active(RuneSet::Fatal));

        let swift = Rune::new("swift-1", 1, 1, RuneSet::Swift, RuneStat::Spd).unwrap();
        let displaced = slots.place(swift).unwrap().unwrap();
        assert_eq!(displaced.name, "fatal-1");
        assert!(!displaced.is_equipped());
        assert!(!displaced.is_set_active());

        assert_eq!(slots.len(), 4);
        assert_eq!(slots.get(1).unwrap().name, "swift-1");
        assert!(!slots.is_set_active(RuneSet::Fatal));
        assert!(slots.iter().all(|r| !r.is_set_active()));
        assert_eq!(slots.bonus().modifiers.attack_pct, 0.0);

        // The displaced rune can go straight back in
        let swift = slots.place(displaced).unwrap().unwrap();
        assert_eq!(swift.name, "swift-1");
        assert!(slots.iter().all(|r| r.is_set_active()));
    }

    #[test]
    fn equipped_rune_cannot_be_placed_twice() {
        let mut a = RuneSlots::new();
        a.place(fatal(1)).unwrap();
        let copy = a.get(1).cloned().unwrap();
        let mut b = RuneSlots::new();
        assert_eq!(b.place(copy), Err(RuneError::AlreadyEquipped));
    }

    #[test]
    fn two_piece_sets_stack_per_group() {
        let mut slots = RuneSlots::new();
        for slot in 1..=4 {
            let rune = Rune::new("energy", 1, slot, RuneSet::Energy, RuneStat::Spd).unwrap();
            slots.place(rune).unwrap();
        }
        assert_eq!(slots.bonus().modifiers.hp_pct, 30.0);
        assert_eq!(slots.bonus().speed, 8.0);
    }
}
