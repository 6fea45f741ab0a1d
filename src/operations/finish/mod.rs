//! Finish walls lining the wall-bounded parts of spaces.

mod generate_wall_finish;
mod join;
mod offset;
mod trim;

pub use generate_wall_finish::{FinishWall, GenerateWallFinish, WallFinish, DEFAULT_ROOM_HEIGHT};
pub use offset::{connect_corner, OffsetBoundary, OffsetPiece};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod fixtures {
    use crate::geometry::{BoundarySegment, Segment};
    use crate::host::{ElementHost, ElementId, ElementType, MemoryHost, Space, WallSpec};
    use crate::math::{Point3, Vector3};

    pub(crate) struct Fixture {
        pub(crate) host: MemoryHost,
        pub(crate) finish_type: ElementType,
        pub(crate) level: ElementId,
        /// Base walls in boundary order: bottom, right, top, left.
        pub(crate) base: Vec<ElementId>,
        pub(crate) space: Space,
    }

    /// A 4 x 3 room whose boundary runs along the inner faces of four
    /// 200 mm walls.
    pub(crate) fn walled_room() -> Fixture {
        let mut host = MemoryHost::new();
        let base_type = host.add_wall_type("Basic 200", 0.2);
        let finish_id = host.add_wall_type("Gypsum 20", 0.02);
        let level = host.add_level("Level 0", 0.0);

        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 3.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        ];
        let outward = [
            Vector3::new(0.0, -0.1, 0.0),
            Vector3::new(0.1, 0.0, 0.0),
            Vector3::new(0.0, 0.1, 0.0),
            Vector3::new(-0.1, 0.0, 0.0),
        ];
        let mut base = Vec::new();
        let mut boundary = Vec::new();
        for i in 0..4 {
            let face = Segment::line(corners[i], corners[(i + 1) % 4]).unwrap();
            let spec = WallSpec::new(face.translated(&outward[i]), base_type, level, 3.0);
            let wall = host.create_wall(&spec).unwrap();
            base.push(wall);
            boundary.push(BoundarySegment::new(face, Some(wall)));
        }

        Fixture {
            host,
            finish_type: ElementType {
                id: finish_id,
                name: "Gypsum 20".into(),
                width: 0.02,
            },
            level,
            base,
            space: Space::new("Office").with_height(2.7).with_boundary(boundary),
        }
    }
}
