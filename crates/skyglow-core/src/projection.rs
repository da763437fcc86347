//! Globe projection: spherical coordinates → rotated 3D → screen space.

use crate::config::GlobeOrder;
use crate::constants::{
    GLOBE_POINTER_PITCH, GLOBE_POINTER_YAW, GLOBE_TILT, GLOBE_TILT_WOBBLE,
    GLOBE_TILT_WOBBLE_FREQ, PERSPECTIVE_BASE, PERSPECTIVE_SPAN,
};
use crate::field::GlobeParticle;
use crate::geometry::Circle;
use glam::{Vec2, Vec3};

/// Unit-sphere point for a longitude/latitude pair (radians, y up).
#[inline]
pub fn spherical_to_unit(lon: f32, lat: f32) -> Vec3 {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    Vec3::new(cos_lat * cos_lon, sin_lat, cos_lat * sin_lon)
}

/// Yaw around the vertical axis followed by pitch around the horizontal one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    /// Autorotation plus a small oscillating tilt, offset by pointer parallax.
    ///
    /// `pointer` is the normalized pointer position in `[-1, 1]²`, weighted
    /// by `strength`.
    pub fn at(spin: f32, elapsed_ms: f64, pointer: Vec2, strength: f32) -> Self {
        let wobble = (elapsed_ms * GLOBE_TILT_WOBBLE_FREQ).sin() as f32 * GLOBE_TILT_WOBBLE;
        Self {
            yaw: spin + pointer.x * GLOBE_POINTER_YAW * strength,
            pitch: GLOBE_TILT + wobble + pointer.y * GLOBE_POINTER_PITCH * strength,
        }
    }

    #[inline]
    pub fn rotate(&self, p: Vec3) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let x1 = p.x * cy - p.z * sy;
        let z1 = p.x * sy + p.z * cy;
        let (sp, cp) = self.pitch.sin_cos();
        let y2 = p.y * cp - z1 * sp;
        let z2 = p.y * sp + z1 * cp;
        Vec3::new(x1, y2, z2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Index into the globe particle array.
    pub index: usize,
    pub screen: Vec2,
    /// Rotated depth in `[-1, 1]`; positive faces the viewer.
    pub z: f32,
    /// `z` remapped to `[0, 1]`.
    pub depth: f32,
    pub perspective: f32,
}

impl Projected {
    #[inline]
    pub fn is_front(&self) -> bool {
        self.z >= 0.0
    }
}

#[inline]
pub fn project(index: usize, particle: &GlobeParticle, orientation: &Orientation, globe: &Circle) -> Projected {
    let r = orientation.rotate(particle.unit);
    let depth = ((r.z + 1.0) * 0.5).clamp(0.0, 1.0);
    let perspective = PERSPECTIVE_BASE + depth * PERSPECTIVE_SPAN;
    let reach = globe.radius * particle.shell * perspective;
    Projected {
        index,
        // screen y grows downward; north stays up
        screen: globe.center + Vec2::new(r.x, -r.y) * reach,
        z: r.z,
        depth,
        perspective,
    }
}

/// Draw-ordered projection of the whole globe layer.
///
/// `out` is reused between frames. Returns the number of leading entries
/// that form the back pass (always 0 for depth sort, which has one pass).
pub fn project_ordered(
    particles: &[GlobeParticle],
    orientation: &Orientation,
    globe: &Circle,
    order: GlobeOrder,
    out: &mut Vec<Projected>,
) -> usize {
    out.clear();
    out.extend(
        particles
            .iter()
            .enumerate()
            .map(|(i, p)| project(i, p, orientation, globe)),
    );
    match order {
        GlobeOrder::TwoPass => {
            // stable: keeps generation order inside each hemisphere
            out.sort_by_key(|p| p.is_front());
            out.iter().take_while(|p| !p.is_front()).count()
        }
        GlobeOrder::DepthSort => {
            out.sort_by(|a, b| a.z.total_cmp(&b.z));
            0
        }
    }
}
