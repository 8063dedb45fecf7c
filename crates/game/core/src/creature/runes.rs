use crate::config::BattleConfig;
use crate::rng::BattleRng;
use crate::rune::{Rune, RuneError};

use super::Creature;

impl Creature {
    /// Equip `rune` into its slot, handing back the rune it replaced.
    ///
    /// Stats pick the rune up on the next read. With
    /// `restore_on_rune_change` the creature is then fully restored.
    pub fn place_rune(
        &mut self,
        rune: Rune,
        config: &BattleConfig,
    ) -> Result<Option<Rune>, RuneError> {
        let slot = rune.slot();
        let displaced = self.runes.place(rune)?;
        if let Some(old) = &displaced {
            tracing::debug!(creature = %self.name, slot, rune = %old.name, "rune unequipped");
        }
        tracing::debug!(creature = %self.name, slot, "rune placed");
        self.after_rune_change(config);
        Ok(displaced)
    }

    /// Unequip and return the rune in `slot`.
    pub fn remove_rune(&mut self, slot: u8, config: &BattleConfig) -> Result<Rune, RuneError> {
        let rune = self.runes.remove(slot)?;
        tracing::debug!(creature = %self.name, slot, "rune removed");
        self.after_rune_change(config);
        Ok(rune)
    }

    /// Try to upgrade the rune in `slot`. Returns whether the upgrade succeeded.
    pub fn level_up_rune(
        &mut self,
        slot: u8,
        rng: &mut dyn BattleRng,
        config: &BattleConfig,
    ) -> Result<bool, RuneError> {
        let mut rune = self.runes.remove(slot)?;
        let upgraded = rune.level_up(rng);
        self.runes.place(rune)?;
        self.after_rune_change(config);
        Ok(upgraded)
    }

    fn after_rune_change(&mut self, config: &BattleConfig) {
        if config.restore_on_rune_change {
            self.restore();
        } else {
            self.clamp_resources();
        }
    }
}
