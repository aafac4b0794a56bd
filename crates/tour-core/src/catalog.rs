//! The fixed itinerary: named camera poses captured in the live museum
//! scene, plus the camera pose type the navigator mutates.
//!
//! Rotations are XYZ-order Euler angles in radians (the convention the
//! poses were authored in). The catalog is ordered and read-only after
//! construction; there are no error conditions here.

use glam::{EulerRot, Quat, Vec3};

/// A named fixed camera position + orientation.
#[derive(Clone, Debug)]
pub struct Viewpoint {
    pub name: &'static str,
    pub position: Vec3,
    /// XYZ Euler angles, radians.
    pub rotation: Vec3,
}

/// Camera position + orientation, shared with the renderer and mutated by
/// the navigator during transitions and by the forward-walk path.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    /// XYZ Euler angles, radians.
    pub rotation: Vec3,
}

impl CameraPose {
    pub fn from_viewpoint(vp: &Viewpoint) -> Self {
        Self {
            position: vp.position,
            rotation: vp.rotation,
        }
    }

    /// Orientation as a quaternion (XYZ intrinsic order).
    #[inline]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Local forward axis in world space (camera looks down -Z).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Translate along the local forward axis by `step` world units.
    pub fn translate_forward(&mut self, step: f32) {
        self.position += self.forward() * step;
    }
}

/// Ordered, fixed sequence of viewpoints. Indexed access only; never
/// mutated after startup.
#[derive(Clone, Debug)]
pub struct ViewpointCatalog {
    viewpoints: Vec<Viewpoint>,
}

impl ViewpointCatalog {
    pub fn new(viewpoints: Vec<Viewpoint>) -> Self {
        Self { viewpoints }
    }

    /// The itinerary of the Pearl Rhythm art-archive museum scene.
    ///
    /// "Exhibit 10" and "Exhibit 11" share a pose in the authored data;
    /// they are kept verbatim. The marker position filter suppresses both
    /// while the camera sits on that pose.
    pub fn museum() -> Self {
        Self::new(vec![
            Viewpoint {
                name: "Overview",
                position: Vec3::new(5.670_851_6, 61.187_885, 114.135_735),
                rotation: Vec3::new(-0.091_011_45, -0.015_141_105, -0.001_381_777_6),
            },
            Viewpoint {
                name: "Exhibit 1",
                position: Vec3::new(9.822_356, 36.269_962, -158.898_15),
                rotation: Vec3::new(-0.091_011, -0.015_141, -0.001_382),
            },
            Viewpoint {
                name: "Exhibit 2",
                position: Vec3::new(-4.770_131_4, 33.120_25, -261.390_72),
                rotation: Vec3::new(3.114_591_8, 0.178_455_06, -3.136_798_6),
            },
            Viewpoint {
                name: "Exhibit 3",
                position: Vec3::new(32.912_218, 41.178_604, -179.612_56),
                rotation: Vec3::new(-0.035_747_64, -0.396_662_4, -0.013_815_824),
            },
            Viewpoint {
                name: "Exhibit 4",
                position: Vec3::new(-64.806_06, 85.838_524, -53.675_63),
                rotation: Vec3::new(-2.129_618, -0.569_405_2, -2.430_068),
            },
            Viewpoint {
                name: "Exhibit 6",
                position: Vec3::new(11.552_906, 25.882_95, 272.712_04),
                rotation: Vec3::new(-0.091_011, -0.015_141, -0.001_382),
            },
            Viewpoint {
                name: "Exhibit 7",
                position: Vec3::new(22.300_896, 62.292_28, -538.828_13),
                rotation: Vec3::new(-2.309_489_3, -0.790_077, -2.479_122),
            },
            Viewpoint {
                name: "Exhibit 8",
                position: Vec3::new(-247.081_45, 33.446_762, 4.912_084_7),
                rotation: Vec3::new(-1.424_976, -1.434_821_2, -1.423_636_9),
            },
            Viewpoint {
                name: "Exhibit 9",
                position: Vec3::new(-99.651_96, 32.171_63, 4.299_873_3),
                rotation: Vec3::new(0.831_986_56, -1.485_226_9, 0.830_161_44),
            },
            Viewpoint {
                name: "Exhibit 10",
                position: Vec3::new(-175.618_57, 58.222_946, -0.690_353_5),
                rotation: Vec3::new(-0.336_081_72, 1.509_970_1, 0.335_505_82),
            },
            Viewpoint {
                name: "Exhibit 11",
                position: Vec3::new(-175.618_57, 58.222_946, -0.690_353_5),
                rotation: Vec3::new(-0.336_081_72, 1.509_970_1, 0.335_505_82),
            },
            Viewpoint {
                name: "Exhibit 12",
                position: Vec3::new(-238.060_39, 54.233_303, 113.047_88),
                rotation: Vec3::new(0.103_697_8, -0.354_717_74, 0.036_130_836),
            },
            Viewpoint {
                name: "Exhibit 13",
                position: Vec3::new(-268.883_64, 62.238_104, -264.409_4),
                rotation: Vec3::new(2.913_181, -1.343_843_1, 2.918_844),
            },
        ])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.viewpoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.viewpoints.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Viewpoint> {
        self.viewpoints.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Viewpoint> {
        self.viewpoints.iter()
    }

    /// Pose of the first viewpoint; where the camera starts. Origin pose
    /// for an empty catalog.
    pub fn initial_pose(&self) -> CameraPose {
        self.viewpoints
            .first()
            .map(CameraPose::from_viewpoint)
            .unwrap_or_default()
    }
}
