//! Small vector helpers over plain `[f32; 3]` arrays.

/// A point or a vector in world space.
pub type Vec3 = [f32; 3];

/// Lengths below this are treated as zero.
pub(crate) const EPSILON: f32 = 1e-6;

#[inline]
#[must_use]
pub(crate) fn dot(a: &Vec3, b: &Vec3) -> f32 {
    a[0].mul_add(b[0], a[1].mul_add(b[1], a[2] * b[2]))
}

#[inline]
#[must_use]
pub(crate) fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    [
        a[1].mul_add(b[2], -(a[2] * b[1])),
        a[2].mul_add(b[0], -(a[0] * b[2])),
        a[0].mul_add(b[1], -(a[1] * b[0])),
    ]
}

#[inline]
#[must_use]
pub(crate) fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
#[must_use]
pub(crate) fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
#[must_use]
pub(crate) fn scale(a: &Vec3, factor: f32) -> Vec3 {
    [a[0] * factor, a[1] * factor, a[2] * factor]
}

#[inline]
#[must_use]
pub(crate) fn length(a: &Vec3) -> f32 {
    dot(a, a).sqrt()
}

#[inline]
#[must_use]
pub(crate) fn distance(a: &Vec3, b: &Vec3) -> f32 {
    length(&sub(b, a))
}

/// `a + (b - a) * t`, computed per component.
#[inline]
#[must_use]
pub(crate) fn lerp(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
    [
        (b[0] - a[0]).mul_add(t, a[0]),
        (b[1] - a[1]).mul_add(t, a[1]),
        (b[2] - a[2]).mul_add(t, a[2]),
    ]
}

/// Returns `a` scaled to unit length, or `fallback` when `a` has no usable length.
#[inline]
#[must_use]
pub(crate) fn normalize_or(a: &Vec3, fallback: Vec3) -> Vec3 {
    let len = length(a);
    if len <= EPSILON || !len.is_finite() {
        return fallback;
    }
    let inv_len = 1.0 / len;
    [a[0] * inv_len, a[1] * inv_len, a[2] * inv_len]
}

/// Picks a world axis that is far from collinear with the unit vector `v`.
#[inline]
#[must_use]
pub(crate) fn non_collinear_axis(v: &Vec3) -> Vec3 {
    if v[0].abs() < 0.9 {
        [1.0, 0.0, 0.0]
    } else {
        [0.0, 1.0, 0.0]
    }
}

/// Rotates `v` by `angle` radians around the unit `axis` (Rodrigues' formula).
#[must_use]
pub(crate) fn rotate_around(v: &Vec3, axis: &Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    let k_cross_v = cross(axis, v);
    let k_dot_v = dot(axis, v);
    let along_axis = scale(axis, k_dot_v * (1.0 - cos));
    add(&add(&scale(v, cos), &scale(&k_cross_v, sin)), &along_axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalize_zero_vector_uses_fallback() {
        assert_eq!(normalize_or(&[0.0; 3], [0.0, 0.0, 1.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn normalize_gives_unit_length() {
        let v = normalize_or(&[3.0, 4.0, 12.0], [0.0, 0.0, 1.0]);
        assert_abs_diff_eq!(length(&v), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v[0], 3.0 / 13.0, epsilon = 1e-6);
    }

    #[test]
    fn cross_of_axes() {
        assert_eq!(cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn rotate_quarter_turn_around_z() {
        let r = rotate_around(&[1.0, 0.0, 0.0], &[0.0, 0.0, 1.0], std::f32::consts::FRAC_PI_2);
        assert_abs_diff_eq!(r[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(r[1], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(r[2], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn non_collinear_axis_switches_for_x_aligned_input() {
        assert_eq!(non_collinear_axis(&[1.0, 0.0, 0.0]), [0.0, 1.0, 0.0]);
        assert_eq!(non_collinear_axis(&[0.0, 0.0, 1.0]), [1.0, 0.0, 0.0]);
    }
}
