mod ceilings;
mod floors;

pub use ceilings::GenerateCeilings;
pub use floors::GenerateFloors;
