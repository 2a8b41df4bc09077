//! Flat Phong lighting for one surface normal.

use glam::DVec3;
use image::Rgb;

use super::Shading;

/// Exponent of the specular highlight.
pub const SPECULAR_EXP: i32 = 4;

/// Ambient term: ambient color scaled by the ambient coefficients.
pub fn ambient_term(shading: &Shading) -> DVec3 {
    shading.ambient * shading.reflect.ambient
}

/// Diffuse term: light color scaled by `kd * max(0, N.L)`.
pub fn diffuse_term(normal: DVec3, light_dir: DVec3, shading: &Shading) -> DVec3 {
    let n_dot_l = normal.dot(light_dir).max(0.0);
    shading.light.color * shading.reflect.diffuse * n_dot_l
}

/// Specular term: light color scaled by `ks * max(0, R.V)^SPECULAR_EXP`,
/// where R is the light direction reflected about the normal.
pub fn specular_term(normal: DVec3, light_dir: DVec3, view: DVec3, shading: &Shading) -> DVec3 {
    let n_dot_l = normal.dot(light_dir);
    if n_dot_l <= 0.0 {
        return DVec3::ZERO;
    }
    let reflected = 2.0 * n_dot_l * normal - light_dir;
    let r_dot_v = reflected.dot(view).max(0.0);
    shading.light.color * shading.reflect.specular * r_dot_v.powi(SPECULAR_EXP)
}

/// Compute the color of a surface with the given (unnormalized) normal.
///
/// Evaluates ambient + diffuse + specular and clamps each channel to 0-255.
pub fn compute_lighting(normal: DVec3, shading: &Shading) -> Rgb<u8> {
    let n = normal.normalize_or_zero();
    let l = shading.light.location.normalize_or_zero();
    let v = shading.view.normalize_or_zero();

    let lit = ambient_term(shading) + diffuse_term(n, l, shading) + specular_term(n, l, v, shading);
    let clamped = lit.clamp(DVec3::ZERO, DVec3::splat(255.0));

    Rgb([clamped.x as u8, clamped.y as u8, clamped.z as u8])
}
