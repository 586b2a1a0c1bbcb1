//! Directional tile data and rotation expansion
//!
//! A tile touches its four neighbours through the edges Up, Right, Down and
//! Left. Each edge either carries a connection or it does not, so a tile is
//! described by a four-bit connection vector. Rotating a tile a quarter turn
//! clockwise moves every edge one place round: the old Left edge becomes Up.
//! The palette is every rotationally distinct variant of every generated kind.

use crate::algorithm::bitset::VariantSet;
use crate::io::error::{GenerationError, Result};
use crate::spatial::catalog::{Catalog, KindId};
use std::fmt;

/// One of the four edges of a grid cell
///
/// Discriminants are the slot indices used by connection vectors and
/// signatures, so the declaration order is significant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row - 1
    Up = 0,
    /// Towards col + 1
    Right = 1,
    /// Towards row + 1
    Down = 2,
    /// Towards col - 1
    Left = 3,
}

impl Direction {
    /// All directions in slot order
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Slot index of this direction within a connection vector
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The edge a neighbour shares with us, seen from the neighbour's side
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Neighbour coordinates one step in this direction, if still on the grid
    pub const fn step(
        self,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> Option<[usize; 2]> {
        match self {
            Self::Up if row > 0 => Some([row - 1, col]),
            Self::Right if col + 1 < cols => Some([row, col + 1]),
            Self::Down if row + 1 < rows => Some([row + 1, col]),
            Self::Left if col > 0 => Some([row, col - 1]),
            _ => None,
        }
    }
}

/// Quarter-turn rotation applied to a base tile kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rotation {
    /// Unrotated
    R0,
    /// One quarter turn clockwise
    R90,
    /// Half turn
    R180,
    /// Three quarter turns clockwise
    R270,
}

impl Rotation {
    /// All rotations in ascending angle order
    pub const ALL: [Self; 4] = [Self::R0, Self::R90, Self::R180, Self::R270];

    /// Rotation angle in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }

    /// Number of clockwise quarter turns
    pub const fn quarter_turns(self) -> usize {
        match self {
            Self::R0 => 0,
            Self::R90 => 1,
            Self::R180 => 2,
            Self::R270 => 3,
        }
    }

    /// Parse an angle in degrees; only exact multiples of 90 below 360 are accepted
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Self::R0),
            90 => Some(Self::R90),
            180 => Some(Self::R180),
            270 => Some(Self::R270),
            _ => None,
        }
    }
}

/// Which edges of a tile carry a connection, indexed by [`Direction`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ConnectionVector([bool; 4]);

impl ConnectionVector {
    /// A tile with no connections on any edge
    pub const EMPTY: Self = Self([false; 4]);

    /// Build from edge flags in Up, Right, Down, Left order
    pub const fn new(edges: [bool; 4]) -> Self {
        Self(edges)
    }

    /// Build from 0/1 digits in Up, Right, Down, Left order
    ///
    /// Returns `None` if any digit is neither 0 nor 1.
    pub fn from_digits(digits: [u8; 4]) -> Option<Self> {
        let mut edges = [false; 4];
        for (edge, digit) in edges.iter_mut().zip(digits) {
            *edge = match digit {
                0 => false,
                1 => true,
                _ => return None,
            };
        }
        Some(Self(edges))
    }

    /// Whether this tile connects through the given edge
    pub fn connects(&self, direction: Direction) -> bool {
        self.0.get(direction.index()).copied().unwrap_or(false)
    }

    /// Edge bits in Up, Right, Down, Left order
    pub fn digits(&self) -> [u8; 4] {
        self.0.map(u8::from)
    }

    /// Whether no edge carries a connection
    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|&edge| edge)
    }

    /// Rotate a quarter turn clockwise: the last slot moves to the front
    #[must_use]
    pub const fn rotated_clockwise(self) -> Self {
        let [up, right, down, left] = self.0;
        Self([left, up, right, down])
    }

    /// Apply a rotation to this vector
    #[must_use]
    pub const fn rotated(self, rotation: Rotation) -> Self {
        let mut rotated = self;
        let mut turns = rotation.quarter_turns();
        while turns > 0 {
            rotated = rotated.rotated_clockwise();
            turns -= 1;
        }
        rotated
    }
}

impl fmt::Display for ConnectionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits() {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

/// What a cell's surroundings demand of one of its edges
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Requirement {
    /// The edge must not connect (grid boundary or a closed neighbour edge)
    Closed,
    /// The edge must connect
    Open,
    /// Unconstrained, the neighbour is still undecided
    Any,
}

impl Requirement {
    /// Requirement matching a neighbour's connection bit on the shared edge
    pub const fn matching(connects: bool) -> Self {
        if connects { Self::Open } else { Self::Closed }
    }

    /// Whether an edge with the given connection flag satisfies this requirement
    pub const fn admits(self, connects: bool) -> bool {
        match self {
            Self::Closed => !connects,
            Self::Open => connects,
            Self::Any => true,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "0"),
            Self::Open => write!(f, "1"),
            Self::Any => write!(f, "*"),
        }
    }
}

/// Required connections for each edge of an uncollapsed cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signature([Requirement; 4]);

impl Default for Signature {
    fn default() -> Self {
        Self::ANY
    }
}

impl Signature {
    /// Signature admitting every variant
    pub const ANY: Self = Self([Requirement::Any; 4]);

    /// Build from requirements in Up, Right, Down, Left order
    pub const fn new(requirements: [Requirement; 4]) -> Self {
        Self(requirements)
    }

    /// Requirement on the given edge
    pub fn requirement(&self, direction: Direction) -> Requirement {
        self.0
            .get(direction.index())
            .copied()
            .unwrap_or(Requirement::Any)
    }

    /// Replace the requirement on the given edge
    pub fn set(&mut self, direction: Direction, requirement: Requirement) {
        if let Some(slot) = self.0.get_mut(direction.index()) {
            *slot = requirement;
        }
    }

    /// Whether a connection vector satisfies every constrained edge
    pub fn admits(&self, connections: &ConnectionVector) -> bool {
        Direction::ALL.iter().all(|&direction| {
            let connects = connections.connects(direction);
            self.requirement(direction).admits(connects)
        })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for requirement in &self.0 {
            write!(f, "{requirement}")?;
        }
        Ok(())
    }
}

/// A tile kind in one concrete orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileVariant {
    kind: KindId,
    connections: ConnectionVector,
    rotation: Rotation,
}

impl TileVariant {
    /// Orient a kind's base connection vector by the given rotation
    pub const fn new(kind: KindId, base: ConnectionVector, rotation: Rotation) -> Self {
        Self {
            kind,
            connections: base.rotated(rotation),
            rotation,
        }
    }

    /// Base kind this variant was derived from
    pub const fn kind(&self) -> KindId {
        self.kind
    }

    /// Connections after rotation
    pub const fn connections(&self) -> ConnectionVector {
        self.connections
    }

    /// Rotation applied to the base kind
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }
}

/// Every rotationally distinct variant of the generated catalog kinds
///
/// Candidate sets throughout the solver are indexes into this list, so the
/// insertion order (kind order, then ascending rotation) is fixed once built.
#[derive(Clone, Debug, Default)]
pub struct Palette {
    variants: Vec<TileVariant>,
}

impl Palette {
    /// Expand every non-excluded catalog kind into its distinct rotations
    ///
    /// Rotations whose connection vector repeats one already produced for the
    /// same kind are skipped, so each kind yields between one and four
    /// variants.
    pub fn expand(catalog: &Catalog) -> Self {
        let mut variants = Vec::new();

        for (id, kind) in catalog.generated_kinds() {
            let mut seen: Vec<ConnectionVector> = Vec::with_capacity(Rotation::ALL.len());
            for rotation in Rotation::ALL {
                let variant = TileVariant::new(id, kind.connections(), rotation);
                if seen.contains(&variant.connections()) {
                    continue;
                }
                seen.push(variant.connections());
                variants.push(variant);
            }
        }

        Self { variants }
    }

    /// Expand a catalog, failing if no kind is left for random selection
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty or every kind is excluded
    pub fn from_catalog(catalog: &Catalog) -> Result<Self> {
        let palette = Self::expand(catalog);
        if palette.is_empty() {
            return Err(GenerationError::EmptyPalette {
                kinds: catalog.len(),
                excluded: catalog.len() - catalog.generated_kinds().count(),
            });
        }
        Ok(palette)
    }

    /// Number of variants
    pub const fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the palette has no variants at all
    pub const fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Variant at a palette index
    pub fn get(&self, index: usize) -> Option<&TileVariant> {
        self.variants.get(index)
    }

    /// All variants in palette order
    pub fn variants(&self) -> &[TileVariant] {
        &self.variants
    }

    /// Variants derived from one kind, in palette order
    pub fn variants_of(&self, kind: KindId) -> impl Iterator<Item = &TileVariant> {
        self.variants
            .iter()
            .filter(move |variant| variant.kind() == kind)
    }

    /// Indexes of all variants satisfying a signature
    pub fn compatible(&self, signature: &Signature) -> VariantSet {
        let mut set = VariantSet::new(self.variants.len());
        for (index, variant) in self.variants.iter().enumerate() {
            if signature.admits(&variant.connections()) {
                set.insert(index);
            }
        }
        set
    }
}
