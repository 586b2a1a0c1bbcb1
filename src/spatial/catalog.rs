//! Tile kind catalog with an exclusion set for manually placed kinds

use crate::io::configuration::STANDARD_TILESET;
use crate::io::error::{GenerationError, Result};
use crate::spatial::tiles::ConnectionVector;
use std::collections::BTreeSet;
use std::fmt;

/// Index of a kind within its catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindId(pub usize);

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A base tile archetype in its unrotated orientation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileKind {
    name: String,
    connections: ConnectionVector,
}

impl TileKind {
    /// Identifier consumers use to map the kind to an asset
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Connection vector at rotation 0
    pub const fn connections(&self) -> ConnectionVector {
        self.connections
    }
}

/// Ordered set of tile kinds plus the kinds withheld from random selection
///
/// Kind order decides palette order. Excluded kinds stay in the catalog so
/// they can still be placed as presets.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    kinds: Vec<TileKind>,
    excluded: BTreeSet<KindId>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in road tileset, with Room reserved for manual placement
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for &(name, digits, manual) in &STANDARD_TILESET {
            let id = KindId(catalog.kinds.len());
            catalog.kinds.push(TileKind {
                name: name.to_string(),
                connections: ConnectionVector::from_digits(digits).unwrap_or_default(),
            });
            if manual {
                catalog.excluded.insert(id);
            }
        }
        catalog
    }

    /// Register a new kind
    ///
    /// # Errors
    ///
    /// Returns an error if a kind with the same name is already registered
    pub fn add_kind(&mut self, name: &str, connections: ConnectionVector) -> Result<KindId> {
        if self.find(name).is_some() {
            return Err(GenerationError::DuplicateKind {
                name: name.to_string(),
            });
        }

        let id = KindId(self.kinds.len());
        self.kinds.push(TileKind {
            name: name.to_string(),
            connections,
        });
        Ok(id)
    }

    /// Withhold a kind from random selection
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not belong to this catalog
    pub fn exclude(&mut self, id: KindId) -> Result<()> {
        if id.0 >= self.kinds.len() {
            return Err(GenerationError::UnknownKind {
                name: id.to_string(),
            });
        }
        self.excluded.insert(id);
        Ok(())
    }

    /// Withhold a kind from random selection by name
    ///
    /// # Errors
    ///
    /// Returns an error if no kind has this name
    pub fn exclude_by_name(&mut self, name: &str) -> Result<KindId> {
        let id = self.require(name)?;
        self.excluded.insert(id);
        Ok(id)
    }

    /// Look up a kind id by name
    pub fn find(&self, name: &str) -> Option<KindId> {
        self.kinds
            .iter()
            .position(|kind| kind.name == name)
            .map(KindId)
    }

    /// Look up a kind id by name, failing if it is absent
    ///
    /// # Errors
    ///
    /// Returns an error if no kind has this name
    pub fn require(&self, name: &str) -> Result<KindId> {
        self.find(name).ok_or_else(|| GenerationError::UnknownKind {
            name: name.to_string(),
        })
    }

    /// Kind by id
    pub fn kind(&self, id: KindId) -> Option<&TileKind> {
        self.kinds.get(id.0)
    }

    /// Name of a kind, or `"?"` for a foreign id
    pub fn name(&self, id: KindId) -> &str {
        self.kind(id).map_or("?", TileKind::name)
    }

    /// Whether a kind is withheld from random selection
    pub fn is_excluded(&self, id: KindId) -> bool {
        self.excluded.contains(&id)
    }

    /// Number of registered kinds
    pub const fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether no kinds are registered
    pub const fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// All kinds in catalog order
    pub fn kinds(&self) -> impl Iterator<Item = (KindId, &TileKind)> {
        self.kinds
            .iter()
            .enumerate()
            .map(|(index, kind)| (KindId(index), kind))
    }

    /// Kinds eligible for random selection, in catalog order
    pub fn generated_kinds(&self) -> impl Iterator<Item = (KindId, &TileKind)> {
        self.kinds().filter(|(id, _)| !self.excluded.contains(id))
    }
}
