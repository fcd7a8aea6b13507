//! Wall (boundary) policy for the simulation grid.

use std::fmt;
use std::str::FromStr;

use crate::error::SelectorError;

/// How the grid treats samples that fall outside its edges.
///
/// The mode drives edge sampling in every stage (advection, both Jacobi
/// solves, divergence and gradient) and the border fix-up applied after
/// projection:
///
/// | Mode | Out-of-grid reads | Border cells after projection |
/// |------|-------------------|-------------------------------|
/// | `SolidWalls` | clamp to edge | negated interior neighbour (no-slip) |
/// | `OpenWalls` | clamp to edge | copied interior neighbour (outflow) |
/// | `LoopedWalls` | wrap around | projected like any other cell |
///
/// # Examples
///
/// ```
/// use swirl_core::BoundaryMode;
///
/// let mode: BoundaryMode = "looped".parse().unwrap();
/// assert_eq!(mode, BoundaryMode::LoopedWalls);
/// assert!(mode.wraps());
/// assert!(!BoundaryMode::SolidWalls.wraps());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryMode {
    /// Closed box: reads clamp, border velocity mirrors the interior.
    #[default]
    SolidWalls,
    /// Open edges: reads clamp, border velocity extrapolates the interior.
    OpenWalls,
    /// Periodic domain (torus): reads wrap.
    LoopedWalls,
}

impl BoundaryMode {
    /// Every mode, in declaration order.
    pub const ALL: [BoundaryMode; 3] = [
        BoundaryMode::SolidWalls,
        BoundaryMode::OpenWalls,
        BoundaryMode::LoopedWalls,
    ];

    /// Whether out-of-grid reads wrap to the opposite edge.
    pub fn wraps(self) -> bool {
        matches!(self, Self::LoopedWalls)
    }

    /// Sign applied to the interior velocity copied onto border cells,
    /// or `None` when border cells are projected normally.
    pub fn border_sign(self) -> Option<f32> {
        match self {
            Self::SolidWalls => Some(-1.0),
            Self::OpenWalls => Some(1.0),
            Self::LoopedWalls => None,
        }
    }

    /// Short lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::SolidWalls => "solid",
            Self::OpenWalls => "open",
            Self::LoopedWalls => "looped",
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryMode {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "solid" | "solidwalls" | "solid_walls" => Ok(Self::SolidWalls),
            "open" | "openwalls" | "open_walls" => Ok(Self::OpenWalls),
            "looped" | "loopedwalls" | "looped_walls" | "wrap" => Ok(Self::LoopedWalls),
            _ => Err(SelectorError::UnknownBoundary {
                name: s.to_string(),
            }),
        }
    }
}
