//! Tests for kind registration, lookup and exclusion

#[cfg(test)]
mod tests {
    use tilewave::GenerationError;
    use tilewave::spatial::catalog::{Catalog, KindId};
    use tilewave::spatial::tiles::ConnectionVector;

    // Tests the built-in tileset registers six kinds with Room withheld
    // Verified by dropping the manual flag when building the standard catalog
    #[test]
    fn test_standard_catalog() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 6);

        let room = catalog.find("Room").unwrap();
        assert!(catalog.is_excluded(room));
        assert_eq!(catalog.generated_kinds().count(), 5);

        let bend = catalog.find("Bend").unwrap();
        assert_eq!(
            catalog.kind(bend).map(|kind| kind.connections().digits()),
            Some([0, 1, 1, 0])
        );
    }

    // Tests names are unique within a catalog
    // Verified by removing the duplicate check in add_kind
    #[test]
    fn test_add_kind_rejects_duplicates() {
        let mut catalog = Catalog::new();
        let first = catalog.add_kind("Empty", ConnectionVector::EMPTY).unwrap();
        assert_eq!(first, KindId(0));

        let result = catalog.add_kind("Empty", ConnectionVector::EMPTY);
        assert!(matches!(
            result,
            Err(GenerationError::DuplicateKind { ref name }) if name == "Empty"
        ));
        assert_eq!(catalog.len(), 1);
    }

    // Tests lookup by name and the fallback name for foreign ids
    // Verified by returning the first kind for unknown names
    #[test]
    fn test_lookup() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.find("Straight"), Some(KindId(3)));
        assert_eq!(catalog.find("Tower"), None);
        assert_eq!(catalog.name(KindId(3)), "Straight");
        assert_eq!(catalog.name(KindId(99)), "?");

        assert!(matches!(
            catalog.require("Tower"),
            Err(GenerationError::UnknownKind { ref name }) if name == "Tower"
        ));
    }

    // Tests exclusion by id and by name
    // Verified by making exclude a no-op
    #[test]
    fn test_exclusion() {
        let mut catalog = Catalog::standard();
        let four_way = catalog.exclude_by_name("FourWay").unwrap();
        assert!(catalog.is_excluded(four_way));
        assert_eq!(catalog.generated_kinds().count(), 4);

        assert!(catalog.exclude_by_name("Tower").is_err());
        assert!(catalog.exclude(KindId(42)).is_err());

        // Excluded kinds stay resolvable for presets
        assert_eq!(catalog.require("FourWay").unwrap(), four_way);
    }

    // Tests kinds iterate in registration order
    // Verified by iterating the exclusion set instead
    #[test]
    fn test_kinds_in_order() {
        let catalog = Catalog::standard();
        let names: Vec<&str> = catalog.kinds().map(|(_, kind)| kind.name()).collect();
        assert_eq!(
            names,
            vec!["Empty", "Room", "Bend", "Straight", "ThreeWay", "FourWay"]
        );
        assert!(!catalog.is_empty());
        assert!(Catalog::new().is_empty());
    }
}
