/// Three component vector used for positions, directors, forces and torques
pub type Vec3 = [f64; 3];

pub fn distance_squared(coord1: &Vec3, coord2: &Vec3) -> f64 {
    let x = coord1[0] - coord2[0];
    let y = coord1[1] - coord2[1];
    let z = coord1[2] - coord2[2];
    x * x + y * y + z * z
}

pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn norm_squared(a: &Vec3) -> f64 {
    dot(a, a)
}

pub fn norm(a: &Vec3) -> f64 {
    norm_squared(a).sqrt()
}

pub fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale(a: &Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

/// `a + s * b`
pub fn add_scaled(a: &Vec3, b: &Vec3, s: f64) -> Vec3 {
    [a[0] + s * b[0], a[1] + s * b[1], a[2] + s * b[2]]
}

pub fn add_assign(a: &mut Vec3, b: &Vec3) {
    a[0] += b[0];
    a[1] += b[1];
    a[2] += b[2];
}

pub fn sub_assign(a: &mut Vec3, b: &Vec3) {
    a[0] -= b[0];
    a[1] -= b[1];
    a[2] -= b[2];
}

/// Unit vector along `a`, or `None` for a zero (or non-finite) vector.
///
/// ```rust
/// use acmd::utils::normalize;
///
/// assert_eq!(normalize(&[0.0, 3.0, 4.0]), Some([0.0, 0.6, 0.8]));
/// assert_eq!(normalize(&[0.0, 0.0, 0.0]), None);
/// ```
pub fn normalize(a: &Vec3) -> Option<Vec3> {
    let len = norm(a);
    if len > 0.0 && len.is_finite() {
        Some([a[0] / len, a[1] / len, a[2] / len])
    } else {
        None
    }
}

/// Component of `a` orthogonal to the unit vector `n`
pub fn reject(a: &Vec3, n: &Vec3) -> Vec3 {
    add_scaled(a, n, -dot(a, n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cross_is_orthogonal_to_both_inputs() {
        let a = [1.0, 2.0, -0.5];
        let b = [-3.0, 0.25, 4.0];
        let c = cross(&a, &b);
        assert_relative_eq!(dot(&a, &c), 0.0, epsilon = 1e-12);
        assert_relative_eq!(dot(&b, &c), 0.0, epsilon = 1e-12);
        assert_eq!(cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn reject_removes_normal_component() {
        let n = [0.0, 0.0, 1.0];
        assert_eq!(reject(&[1.0, -2.0, 5.0], &n), [1.0, -2.0, 0.0]);
    }

    #[test]
    fn normalize_rejects_non_finite() {
        assert_eq!(normalize(&[f64::NAN, 0.0, 0.0]), None);
        assert_eq!(normalize(&[f64::INFINITY, 0.0, 0.0]), None);
    }
}
