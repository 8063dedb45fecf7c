//! Elemental match-up tables.
//!
//! Fire, water and wind form a triangle. Attacking the element that beats you
//! grants a glancing chance; attacking the element you beat opens the door to
//! crushing hits. Light, dark and neutral have no match-ups.

/// Elemental affinity of a creature.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum Element {
    Fire,
    Water,
    Wind,
    Light,
    Dark,
    #[default]
    Neutral,
}

/// Glancing chance granted purely by the element pair.
pub const ELEMENTAL_GLANCING_CHANCE: f64 = 0.3;

impl Element {
    /// Element this one is weak against (its attacks may glance).
    pub const fn weak_against(self) -> Option<Element> {
        match self {
            Element::Fire => Some(Element::Water),
            Element::Water => Some(Element::Wind),
            Element::Wind => Some(Element::Fire),
            _ => None,
        }
    }

    /// Element this one is strong against (its attacks may crush).
    pub const fn strong_against(self) -> Option<Element> {
        match self {
            Element::Water => Some(Element::Fire),
            Element::Wind => Some(Element::Water),
            Element::Fire => Some(Element::Wind),
            _ => None,
        }
    }
}

/// Glancing chance contributed by the element pair.
pub fn glancing_chance_by_elements(user: Element, target: Element) -> f64 {
    if user.weak_against() == Some(target) {
        ELEMENTAL_GLANCING_CHANCE
    } else {
        0.0
    }
}

/// Whether the element pair allows crushing hits at all.
pub fn crushing_applies(user: Element, target: Element) -> bool {
    user.strong_against() == Some(target)
}
