//! Strongly-typed identifiers for buffers, colour layers, and ticks.

use std::fmt;
use std::str::FromStr;

use crate::error::SelectorError;

/// Identifies a buffer exposed by a simulation session for presentation
/// or manual override.
///
/// Raw ids (`0..=3`) and names (`"color1"`, `"color2"`, `"velocity"`,
/// `"pressure"`) are accepted by [`TryFrom<u32>`] and [`FromStr`]; anything
/// else is a [`SelectorError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BufferId {
    /// Front buffer of the first colour layer (RGBA).
    ColorBuffer1,
    /// Front buffer of the second colour layer (RGBA).
    ColorBuffer2,
    /// Primary (divergence-free) velocity field.
    Velocity,
    /// Pressure solved during the most recent projection.
    Pressure,
}

impl BufferId {
    /// Every buffer id, in raw-id order.
    pub const ALL: [BufferId; 4] = [
        BufferId::ColorBuffer1,
        BufferId::ColorBuffer2,
        BufferId::Velocity,
        BufferId::Pressure,
    ];

    /// The raw numeric id used by selector-based interfaces.
    pub fn raw(self) -> u32 {
        match self {
            Self::ColorBuffer1 => 0,
            Self::ColorBuffer2 => 1,
            Self::Velocity => 2,
            Self::Pressure => 3,
        }
    }

    /// Short lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::ColorBuffer1 => "color1",
            Self::ColorBuffer2 => "color2",
            Self::Velocity => "velocity",
            Self::Pressure => "pressure",
        }
    }

    /// The colour layer behind this buffer, if it is a colour buffer.
    pub fn color_layer(self) -> Option<ColorLayer> {
        match self {
            Self::ColorBuffer1 => Some(ColorLayer::First),
            Self::ColorBuffer2 => Some(ColorLayer::Second),
            Self::Velocity | Self::Pressure => None,
        }
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for BufferId {
    type Error = SelectorError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|id| id.raw() == raw)
            .ok_or(SelectorError::UnknownBuffer { raw })
    }
}

impl FromStr for BufferId {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "color1" | "colorbuffer1" => Ok(Self::ColorBuffer1),
            "color2" | "colorbuffer2" => Ok(Self::ColorBuffer2),
            "velocity" => Ok(Self::Velocity),
            "pressure" => Ok(Self::Pressure),
            _ => Err(SelectorError::UnknownBufferName {
                name: s.to_string(),
            }),
        }
    }
}

/// One of the two persistent colour layers advected by the velocity field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorLayer {
    /// The first colour layer.
    First,
    /// The second colour layer.
    Second,
}

impl ColorLayer {
    /// Both layers, in index order.
    pub const ALL: [ColorLayer; 2] = [ColorLayer::First, ColorLayer::Second];

    /// Zero-based slot index of this layer.
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// The [`BufferId`] under which this layer is exposed.
    pub fn buffer_id(self) -> BufferId {
        match self {
            Self::First => BufferId::ColorBuffer1,
            Self::Second => BufferId::ColorBuffer2,
        }
    }
}

impl fmt::Display for ColorLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "color layer {}", self.index() + 1)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented each time a session completes one simulation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn raw_ids_round_trip() {
        for id in BufferId::ALL {
            assert_eq!(BufferId::try_from(id.raw()), Ok(id));
        }
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("Velocity".parse::<BufferId>(), Ok(BufferId::Velocity));
        assert_eq!(" PRESSURE ".parse::<BufferId>(), Ok(BufferId::Pressure));
        assert_eq!(
            "ColorBuffer2".parse::<BufferId>(),
            Ok(BufferId::ColorBuffer2)
        );
    }

    #[test]
    fn unknown_name_is_reported() {
        let err = "velocity3".parse::<BufferId>().unwrap_err();
        assert_eq!(
            err,
            SelectorError::UnknownBufferName {
                name: "velocity3".into()
            }
        );
    }

    #[test]
    fn color_layers_map_to_color_buffers() {
        for layer in ColorLayer::ALL {
            assert_eq!(layer.buffer_id().color_layer(), Some(layer));
        }
        assert_eq!(BufferId::Velocity.color_layer(), None);
    }

    proptest! {
        #[test]
        fn raw_ids_beyond_table_are_rejected(raw in 4u32..) {
            prop_assert_eq!(
                BufferId::try_from(raw),
                Err(SelectorError::UnknownBuffer { raw })
            );
        }
    }
}
