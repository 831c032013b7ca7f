//! Core stats and signed stat deltas.

use strum::{AsRefStr, Display, EnumString};

/// The five core stats, in catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stat {
    Vitality,
    Strength,
    Resolve,
    Fortitude,
    Fortune,
}

impl Stat {
    pub const ALL: [Stat; 5] = [
        Stat::Vitality,
        Stat::Strength,
        Stat::Resolve,
        Stat::Fortitude,
        Stat::Fortune,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Stat::Vitality => 0,
            Stat::Strength => 1,
            Stat::Resolve => 2,
            Stat::Fortitude => 3,
            Stat::Fortune => 4,
        }
    }
}

/// Base stats of a combatant. Every field is non-negative by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoreStats {
    pub vitality: u32,
    pub strength: u32,
    pub resolve: u32,
    pub fortitude: u32,
    pub fortune: u32,
}

impl CoreStats {
    pub fn new(vitality: u32, strength: u32, resolve: u32, fortitude: u32, fortune: u32) -> Self {
        Self {
            vitality,
            strength,
            resolve,
            fortitude,
            fortune,
        }
    }

    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Vitality => self.vitality,
            Stat::Strength => self.strength,
            Stat::Resolve => self.resolve,
            Stat::Fortitude => self.fortitude,
            Stat::Fortune => self.fortune,
        }
    }

    fn slot_mut(&mut self, stat: Stat) -> &mut u32 {
        match stat {
            Stat::Vitality => &mut self.vitality,
            Stat::Strength => &mut self.strength,
            Stat::Resolve => &mut self.resolve,
            Stat::Fortitude => &mut self.fortitude,
            Stat::Fortune => &mut self.fortune,
        }
    }

    /// Effective stats: these base stats plus every layer, floored at zero.
    ///
    /// Layers are summed before the single floor, so the result depends only
    /// on which layers are present and never on the order they came and went.
    pub fn layered<'a>(&self, layers: impl IntoIterator<Item = &'a StatDelta>) -> CoreStats {
        let mut totals = [0i64; 5];
        for layer in layers {
            for (total, value) in totals.iter_mut().zip(layer.0) {
                *total += i64::from(value);
            }
        }

        let mut effective = CoreStats::default();
        for stat in Stat::ALL {
            let value = i64::from(self.get(stat)) + totals[stat.index()];
            *effective.slot_mut(stat) = value.clamp(0, i64::from(u32::MAX)) as u32;
        }
        effective
    }

    /// Signed change from `before` to these stats.
    pub fn delta_from(&self, before: &CoreStats) -> StatDelta {
        let mut delta = StatDelta::ZERO;
        for stat in Stat::ALL {
            let change = i64::from(self.get(stat)) - i64::from(before.get(stat));
            delta.set(stat, change.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32);
        }
        delta
    }
}

/// Signed change to the five core stats, indexed by [`Stat`].
///
/// Serialized as a struct with named, optional fields, e.g. `(strength: 4)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "StatDeltaRepr", into = "StatDeltaRepr"))]
pub struct StatDelta(pub [i32; 5]);

#[cfg(feature = "serde")]
#[derive(Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct StatDeltaRepr {
    vitality: i32,
    strength: i32,
    resolve: i32,
    fortitude: i32,
    fortune: i32,
}

#[cfg(feature = "serde")]
impl From<StatDeltaRepr> for StatDelta {
    fn from(r: StatDeltaRepr) -> Self {
        StatDelta::new(r.vitality, r.strength, r.resolve, r.fortitude, r.fortune)
    }
}

#[cfg(feature = "serde")]
impl From<StatDelta> for StatDeltaRepr {
    fn from(d: StatDelta) -> Self {
        let [vitality, strength, resolve, fortitude, fortune] = d.0;
        Self {
            vitality,
            strength,
            resolve,
            fortitude,
            fortune,
        }
    }
}

impl StatDelta {
    pub const ZERO: StatDelta = StatDelta([0; 5]);

    pub fn new(vitality: i32, strength: i32, resolve: i32, fortitude: i32, fortune: i32) -> Self {
        Self([vitality, strength, resolve, fortitude, fortune])
    }

    #[inline]
    pub fn get(&self, stat: Stat) -> i32 {
        self.0[stat.index()]
    }

    #[inline]
    pub fn set(&mut self, stat: Stat, value: i32) {
        self.0[stat.index()] = value;
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0)
    }

    pub fn negated(&self) -> Self {
        Self(self.0.map(|v| -v))
    }

    /// Adds `bonus` to every strictly positive entry. Zero and negative entries are untouched.
    pub fn amplified(&self, bonus: i32) -> Self {
        Self(self.0.map(|v| if v > 0 { v + bonus } else { v }))
    }

    /// Iterates over the non-zero entries.
    pub fn entries(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        Stat::ALL
            .into_iter()
            .map(|stat| (stat, self.get(stat)))
            .filter(|(_, v)| *v != 0)
    }
}

impl core::fmt::Display for StatDelta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (stat, value) in self.entries() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{stat} {value:+}")?;
            first = false;
        }
        if first {
            write!(f, "no change")?;
        }
        Ok(())
    }
}

impl core::ops::Add for StatDelta {
    type Output = StatDelta;

    fn add(self, rhs: StatDelta) -> StatDelta {
        let mut sum = self;
        sum += rhs;
        sum
    }
}

impl core::ops::AddAssign for StatDelta {
    fn add_assign(&mut self, rhs: StatDelta) {
        for (value, other) in self.0.iter_mut().zip(rhs.0) {
            *value = value.saturating_add(other);
        }
    }
}

impl core::ops::Sub for StatDelta {
    type Output = StatDelta;

    fn sub(self, rhs: StatDelta) -> StatDelta {
        self + rhs.negated()
    }
}

impl core::iter::Sum for StatDelta {
    fn sum<I: Iterator<Item = StatDelta>>(iter: I) -> StatDelta {
        iter.fold(StatDelta::ZERO, |acc, delta| acc + delta)
    }
}
