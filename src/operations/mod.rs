pub mod analysis;
pub mod contour;
pub mod extraction;
pub mod finish;
pub mod slab;
