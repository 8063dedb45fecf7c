use crate::stats::Modifiers;

/// Named rune sets. Wearing `size()` runes of one set unlocks its payload.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum RuneSet {
    Energy,
    Magic,
    Fatal,
    Blade,
    Swift,
    Focus,
    Guard,
    Endure,
    Revenge,
    Vampire,
    Rage,
    Violent,
    Reflect,
    Resist,
    Despair,
}

impl RuneSet {
    /// Number of matching runes needed to activate the set effect.
    pub const fn size(self) -> usize {
        match self {
            Self::Fatal
            | Self::Swift
            | Self::Vampire
            | Self::Rage
            | Self::Violent
            | Self::Reflect
            | Self::Despair => 4,
            _ => 2,
        }
    }

    /// Set effect granted once per complete group.
    pub fn payload(self) -> Modifiers {
        let z = Modifiers::ZERO;
        match self {
            Self::Energy => Modifiers { hp_pct: 15.0, ..z },
            Self::Magic => Modifiers { mp_pct: 15.0, ..z },
            Self::Fatal => Modifiers {
                attack_pct: 35.0,
                ..z
            },
            Self::Blade => Modifiers {
                crit_rate: 0.12,
                ..z
            },
            Self::Swift => Modifiers {
                speed_pct: 25.0,
                ..z
            },
            Self::Focus => Modifiers {
                accuracy: 0.2,
                ..z
            },
            Self::Guard => Modifiers {
                defense_pct: 20.0,
                ..z
            },
            Self::Endure => Modifiers {
                resistance: 0.2,
                ..z
            },
            Self::Revenge => Modifiers {
                counter: 0.15,
                ..z
            },
            Self::Vampire => Modifiers {
                life_drain_pct: 35.0,
                ..z
            },
            Self::Rage => Modifiers {
                crit_damage: 0.4,
                ..z
            },
            Self::Violent => Modifiers {
                extra_turn: 0.22,
                ..z
            },
            Self::Reflect => Modifiers {
                reflect_pct: 35.0,
                ..z
            },
            Self::Resist => Modifiers {
                crit_resist: 0.15,
                ..z
            },
            Self::Despair => Modifiers {
                stun_rate: 0.25,
                ..z
            },
        }
    }
}
