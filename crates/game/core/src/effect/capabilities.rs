use bitflags::bitflags;

bitflags! {
    /// What a creature is currently allowed to do or have done to it.
    ///
    /// Every flag is set by default. Active effects revoke flags; the set is
    /// recomputed from the effect lists, so expiring an effect re-grants
    /// whatever it revoked.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u16 {
        const CAN_MOVE                = 1 << 0;
        const CAN_DIE                 = 1 << 1;
        const CAN_BE_HEALED           = 1 << 2;
        const CAN_RECEIVE_BENEFICIAL  = 1 << 3;
        const CAN_RECEIVE_HARMFUL     = 1 << 4;
        const CAN_RECEIVE_DAMAGE      = 1 << 5;
        const CAN_USE_PASSIVES        = 1 << 6;
        const CAN_USE_COOLTIME_SKILLS = 1 << 7;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

impl Capabilities {
    pub fn can_move(self) -> bool {
        self.contains(Self::CAN_MOVE)
    }

    pub fn can_die(self) -> bool {
        self.contains(Self::CAN_DIE)
    }

    pub fn can_be_healed(self) -> bool {
        self.contains(Self::CAN_BE_HEALED)
    }

    pub fn can_receive_beneficial(self) -> bool {
        self.contains(Self::CAN_RECEIVE_BENEFICIAL)
    }

    pub fn can_receive_harmful(self) -> bool {
        self.contains(Self::CAN_RECEIVE_HARMFUL)
    }

    pub fn can_receive_damage(self) -> bool {
        self.contains(Self::CAN_RECEIVE_DAMAGE)
    }

    pub fn can_use_passives(self) -> bool {
        self.contains(Self::CAN_USE_PASSIVES)
    }

    pub fn can_use_cooltime_skills(self) -> bool {
        self.contains(Self::CAN_USE_COOLTIME_SKILLS)
    }
}
