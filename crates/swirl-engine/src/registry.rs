//! Lookup table from buffer identifiers to buffer metadata.
//!
//! Built once per session. Selector-based access (raw ids and names from
//! scripting or debug UIs) resolves through [`BufferTable`] so an unknown
//! identifier is reported at the call site instead of reaching a field.

use indexmap::IndexMap;
use swirl_core::{BufferId, SelectorError};
use swirl_grid::GridSize;

/// What a buffer holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// RGBA colour.
    Color,
    /// Two-component velocity.
    Vector,
    /// Single-component scalar.
    Scalar,
}

impl BufferKind {
    /// Components per texel.
    pub fn components(self) -> usize {
        match self {
            Self::Color => 4,
            Self::Vector => 2,
            Self::Scalar => 1,
        }
    }
}

/// Metadata for one addressable buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferInfo {
    /// The buffer's identifier.
    pub id: BufferId,
    /// What the buffer holds.
    pub kind: BufferKind,
    /// Grid size of the buffer.
    pub size: GridSize,
}

/// Insertion-ordered table of every addressable buffer in a session.
#[derive(Clone, Debug)]
pub struct BufferTable {
    entries: IndexMap<BufferId, BufferInfo>,
}

impl BufferTable {
    /// The table for a session with the given simulation and colour grids.
    pub fn new(grid: GridSize, color: GridSize) -> Self {
        let entries = BufferId::ALL
            .into_iter()
            .map(|id| {
                let (kind, size) = match id {
                    BufferId::ColorBuffer1 | BufferId::ColorBuffer2 => (BufferKind::Color, color),
                    BufferId::Velocity => (BufferKind::Vector, grid),
                    BufferId::Pressure => (BufferKind::Scalar, grid),
                };
                (id, BufferInfo { id, kind, size })
            })
            .collect();
        Self { entries }
    }

    /// Metadata for a buffer.
    pub fn get(&self, id: BufferId) -> Option<&BufferInfo> {
        self.entries.get(&id)
    }

    /// Resolve a raw numeric id.
    pub fn resolve_raw(&self, raw: u32) -> Result<&BufferInfo, SelectorError> {
        let id = BufferId::try_from(raw)?;
        self.entries
            .get(&id)
            .ok_or(SelectorError::UnknownBuffer { raw })
    }

    /// Resolve a buffer name (`"color1"`, `"velocity"`, ...).
    pub fn resolve_name(&self, name: &str) -> Result<&BufferInfo, SelectorError> {
        let id: BufferId = name.parse()?;
        self.entries
            .get(&id)
            .ok_or_else(|| SelectorError::UnknownBufferName {
                name: name.to_string(),
            })
    }

    /// All entries in raw-id order.
    pub fn iter(&self) -> impl Iterator<Item = &BufferInfo> {
        self.entries.values()
    }

    /// Number of addressable buffers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
