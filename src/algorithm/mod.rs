/// Bitset of palette indexes for candidate tracking
pub mod bitset;
/// Caching of signature compatibility filters
pub mod cache;
/// Main solver loop and run reporting
pub mod executor;
/// Signature computation and candidate refresh
pub mod propagation;
/// Minimum-entropy cell selection and variant choice
pub mod selection;
