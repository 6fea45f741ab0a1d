mod extract_rooms;

pub use extract_rooms::{ExtractRooms, ExtractedRoom, Extraction};
