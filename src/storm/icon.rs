//! Spiral storm icon.

use super::surface::RenderSurface;
use crate::config::AnimationConfig;
use eframe::egui::{Color32, Pos2, Stroke};
use std::f32::consts::TAU;

const ARM_COUNT: usize = 6;
/// Radius where each arm starts
const BASE_RADIUS: f32 = 8.0;
/// Controls both how far an arm reaches and how tightly it curls
const SPIRAL_FACTOR: f32 = 10.0;
/// Points sampled along each arm
const ARM_STEPS: usize = 32;
const ARM_WIDTH: f32 = 4.0;
const DOT_RADIUS: f32 = 5.0;

const LABEL_SIZE: f32 = 14.0;
/// Vertical offsets below the center for the name, wind and pressure lines
const LABEL_OFFSETS: [f32; 3] = [53.0, 64.0, 75.0];

/// Spin rate in degrees per second for an intensity class.
///
/// Stronger storms spin faster; the curve is purely visual.
pub fn spin_rate(class: u8, config: &AnimationConfig) -> f32 {
    config.spin_base_deg_per_sec
        + config.spin_class_gain * (class as f32).powf(config.spin_class_exponent)
}

/// Logarithmic-spiral arms around `center`, rotated by `rotation_deg`.
pub fn spiral_arms(center: Pos2, rotation_deg: f32) -> Vec<Vec<Pos2>> {
    let rotation = rotation_deg.to_radians();
    let arm_step = TAU / ARM_COUNT as f32;

    (0..ARM_COUNT)
        .map(|arm| {
            let arm_angle = arm_step * arm as f32;
            (1..=ARM_STEPS)
                .map(|t| {
                    let t = t as f32;
                    let radius = BASE_RADIUS + SPIRAL_FACTOR * t.ln_1p();
                    // Screen Y points down, so subtracting spins counterclockwise
                    let angle = arm_angle + t / SPIRAL_FACTOR - rotation;
                    Pos2::new(
                        center.x + angle.cos() * radius,
                        center.y + angle.sin() * radius,
                    )
                })
                .collect()
        })
        .collect()
}

/// Draws the spiral, the center dot and the three label lines.
pub fn draw_icon(
    surface: &mut dyn RenderSurface,
    center: Pos2,
    rotation_deg: f32,
    color: Color32,
    labels: [&str; 3],
) {
    let stroke = Stroke::new(ARM_WIDTH, color);
    for arm in spiral_arms(center, rotation_deg) {
        surface.polyline(arm, stroke);
    }
    surface.circle_filled(center, DOT_RADIUS, color);

    let label_color = Color32::from_white_alpha(color.a());
    for (label, offset) in labels.iter().zip(LABEL_OFFSETS) {
        surface.text(
            Pos2::new(center.x, center.y + offset),
            label,
            LABEL_SIZE,
            label_color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Outer radius of the icon in pixels.
    fn icon_radius() -> f32 {
        BASE_RADIUS + SPIRAL_FACTOR * (ARM_STEPS as f32).ln_1p()
    }

    #[test]
    fn stronger_storms_spin_faster() {
        let config = AnimationConfig::default();
        let rates: Vec<f32> = (0..=5).map(|c| spin_rate(c, &config)).collect();
        assert_eq!(rates[0], config.spin_base_deg_per_sec);
        assert!(rates.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn arms_stay_within_icon_radius() {
        let center = Pos2::new(200.0, 150.0);
        let arms = spiral_arms(center, 37.0);
        assert_eq!(arms.len(), ARM_COUNT);
        let limit = icon_radius() + 1e-3;
        for arm in &arms {
            assert_eq!(arm.len(), ARM_STEPS);
            assert!(arm.iter().all(|p| p.distance(center) <= limit));
        }
    }

    #[test]
    fn full_turn_is_identity() {
        let center = Pos2::new(0.0, 0.0);
        let a = spiral_arms(center, 10.0);
        let b = spiral_arms(center, 370.0);
        for (arm_a, arm_b) in a.iter().zip(&b) {
            for (p, q) in arm_a.iter().zip(arm_b) {
                assert!(p.distance(*q) < 1e-3);
            }
        }
    }
}
