use crate::{region::Rect, utils::Vec3, Error};

/// Simulation box, represented by a rectangular box and a periodic flag
/// shared by all three axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    rect: Rect,
    periodic: bool,
}
impl Container {
    // Creation

    /// Create a new container from boundary values
    pub fn new(
        xlo: f64,
        xhi: f64,
        ylo: f64,
        yhi: f64,
        zlo: f64,
        zhi: f64,
        periodic: bool,
    ) -> Result<Self, Error> {
        let rect = Rect::new(xlo, xhi, ylo, yhi, zlo, zhi)?;
        Ok(Self { rect, periodic })
    }
    /// Create a container of the given side lengths centred on the origin
    pub fn from_lengths(lx: f64, ly: f64, lz: f64, periodic: bool) -> Result<Self, Error> {
        Ok(Self {
            rect: Rect::centered(lx, ly, lz)?,
            periodic,
        })
    }
    pub fn from_rect(rect: Rect, periodic: bool) -> Self {
        Self { rect, periodic }
    }

    // Getters

    pub fn is_periodic(&self) -> bool {
        self.periodic
    }
    /// A reference to the rectangular box
    pub fn rect(&self) -> &Rect {
        &self.rect
    }
    pub fn lo(&self) -> Vec3 {
        self.rect.lo()
    }
    pub fn hi(&self) -> Vec3 {
        self.rect.hi()
    }
    pub fn lengths(&self) -> Vec3 {
        self.rect.lengths()
    }

    // Geometry

    /// Wrap a coordinate back into the box if the box is periodic.
    ///
    /// Coordinates are expected to be at most one box length outside, which
    /// holds for any single integration step or division placement.
    pub fn wrap(&self, coord: &mut Vec3) {
        if !self.periodic {
            return;
        }
        let lo = self.rect.lo();
        let hi = self.rect.hi();
        let lengths = self.rect.lengths();
        for i in 0..3 {
            if coord[i] < lo[i] {
                coord[i] += lengths[i];
            } else if coord[i] > hi[i] {
                coord[i] -= lengths[i];
            }
        }
    }

    /// Displacement reduced to its minimum image under periodic wrap
    pub fn minimum_image(&self, mut dr: Vec3) -> Vec3 {
        if !self.periodic {
            return dr;
        }
        let lengths = self.rect.lengths();
        for i in 0..3 {
            let half = 0.5 * lengths[i];
            if dr[i] > half {
                dr[i] -= lengths[i];
            } else if dr[i] < -half {
                dr[i] += lengths[i];
            }
        }
        dr
    }

    /// `a - b` under the minimum image convention
    pub fn displacement(&self, a: &Vec3, b: &Vec3) -> Vec3 {
        self.minimum_image([a[0] - b[0], a[1] - b[1], a[2] - b[2]])
    }
}
