//! Canvas 2d presentation of one engine frame.
//!
//! Pure read-only over the engine: every layer derives from polygon, trail,
//! effects and the energy scalars. Draw order is back to front; the
//! transition overlay is painted last by the caller's switcher state.

use app_core::constants::SUBTLETY;
use app_core::{EffectKind, EngineState};
use glam::Vec2;
use web_sys as web;

const TAU: f64 = std::f64::consts::TAU;
const TRACE_FADE_SEC: f32 = 6.0;

pub fn draw(ctx: &web::CanvasRenderingContext2d, engine: &EngineState, now: f64) {
    clear(ctx, engine, now);
    draw_depth_hull(ctx, engine, now);
    draw_trace(ctx, engine, now);
    draw_memories(ctx, engine, now);
    draw_bloom(ctx, engine);
    draw_ghost_polygon(ctx, engine);
    draw_transients(ctx, engine, now);
    draw_quiet_orbit(ctx, engine, now);
    draw_shape_field(ctx, engine, now);
    draw_angle_echoes(ctx, engine);
    draw_symmetry_halo(ctx, engine);
}

/// Dimming wash plus a pulse ring while a world switch is in flight.
pub fn draw_transition(
    ctx: &web::CanvasRenderingContext2d,
    width: f32,
    height: f32,
    t: f32,
    overlay: f32,
) {
    if overlay <= 0.0 {
        return;
    }
    let center = Vec2::new(width * 0.5, height * 0.52);
    let pulse = (t * std::f32::consts::PI).sin();
    let radius = width.min(height) * (0.18 + pulse * 0.04);
    ctx.save();
    ctx.set_fill_style_str(&format!("rgba(8, 2, 8, {overlay})"));
    ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
    ctx.set_stroke_style_str(&format!("rgba(255, 213, 232, {})", overlay * 0.6));
    ctx.set_line_width(1.4);
    stroke_circle(ctx, center, radius);
    ctx.restore();
}

fn clear(ctx: &web::CanvasRenderingContext2d, engine: &EngineState, now: f64) {
    let (w, h) = (engine.width as f64, engine.height as f64);
    let center = engine.center;
    let drift = now * 0.08;
    let gradient = ctx.create_radial_gradient(
        center.x as f64 + drift.cos() * w * 0.2,
        center.y as f64 + drift.sin() * h * 0.2,
        w * 0.1,
        center.x as f64,
        center.y as f64,
        w * 0.9,
    );
    match gradient {
        Ok(gradient) => {
            let _ = gradient.add_color_stop(0.0, "rgba(70, 10, 48, 0.9)");
            let _ = gradient.add_color_stop(0.5, "rgba(26, 3, 20, 0.95)");
            let _ = gradient.add_color_stop(1.0, "rgba(8, 2, 8, 1)");
            ctx.set_fill_style_canvas_gradient(&gradient);
        }
        Err(_) => ctx.set_fill_style_str("rgb(8, 2, 8)"),
    }
    ctx.fill_rect(0.0, 0.0, w, h);
}

/// Slowly drifting dark copy of the polygon behind everything else.
fn draw_depth_hull(ctx: &web::CanvasRenderingContext2d, engine: &EngineState, now: f64) {
    let points = engine.polygon.positions();
    if points.len() < 3 {
        return;
    }
    let centroid = engine.polygon.centroid();
    let drift = Vec2::new(
        ((now * 0.4).cos() * 12.0) as f32,
        ((now * 0.5).sin() * 10.0) as f32,
    );
    let scale = 1.03 + ((now * 0.6).sin() * 0.01) as f32;
    ctx.save();
    ctx.set_fill_style_str("rgba(12, 3, 10, 0.55)");
    ctx.set_shadow_color("rgba(255, 103, 179, 0.15)");
    ctx.set_shadow_blur(18.0);
    ctx.begin_path();
    for (i, p) in points.iter().enumerate() {
        let q = centroid + (*p - centroid) * scale + drift;
        if i == 0 {
            ctx.move_to(q.x as f64, q.y as f64);
        } else {
            ctx.line_to(q.x as f64, q.y as f64);
        }
    }
    ctx.close_path();
    ctx.fill();
    ctx.restore();
}

fn draw_trace(ctx: &web::CanvasRenderingContext2d, engine: &EngineState, now: f64) {
    let energy = &engine.energy;
    ctx.save();
    ctx.set_line_cap("round");
    let base_width =
        2.4 + ((energy.calm * 1.5 + energy.loop_settle * 1.2) * SUBTLETY) as f64;
    let saturation = 80.0 + engine.mood * 10.0 + energy.excited * 6.0;
    let lightness = 58.0 + engine.mood * 8.0 + energy.excited * 6.0;
    let jump_limit = engine.width.min(engine.height) * 0.6;

    let mut prev: Option<Vec2> = None;
    for sample in engine.trail.iter() {
        let Some(p) = prev else {
            prev = Some(sample.pos);
            continue;
        };
        let current = sample.pos;
        prev = Some(current);
        if p.distance(current) > jump_limit {
            // Screen wrap; the two halves of the path stay disconnected.
            continue;
        }
        let age = (now - sample.at) as f32;
        let alpha = (1.0 - age / TRACE_FADE_SEC).max(0.0);
        if alpha <= 0.0 {
            continue;
        }
        ctx.set_line_width(base_width);
        ctx.set_stroke_style_str(&format!(
            "hsla(330, {saturation}%, {lightness}%, {})",
            alpha * 0.9
        ));
        stroke_segment(ctx, p, current);

        if energy.phase_bloom > 0.0 {
            // Parallel echo offset along the segment normal.
            let dir = current - p;
            let len = dir.length().max(1.0);
            let normal = Vec2::new(-dir.y, dir.x) / len * energy.phase_bloom * 2.0;
            ctx.set_line_width(1.0);
            ctx.set_stroke_style_str(&format!(
                "hsla(330, {saturation}%, {}%, {})",
                lightness + 8.0,
                alpha * 0.35
            ));
            stroke_segment(ctx, p + normal, current + normal);
        }
        if energy.excited > 0.15 {
            let glow = (energy.excited * 0.35).min(0.35);
            ctx.set_line_width(1.0);
            ctx.set_stroke_style_str(&format!("rgba(120, 205, 255, {})", alpha * glow));
            stroke_segment(ctx, p, current);
        }
    }
    ctx.restore();
}

fn draw_memories(ctx: &web::CanvasRenderingContext2d, engine: &EngineState, now: f64) {
    ctx.save();
    ctx.set_line_width(1.0);
    for (index, memory) in engine.detector.memories.iter().enumerate() {
        let age = (now - memory.at) as f32;
        let alpha = (0.2 - age * 0.04).max(0.0) * (1.0 - index as f32 * 0.15);
        if alpha <= 0.0 || memory.points.len() < 3 {
            continue;
        }
        ctx.set_stroke_style_str(&format!("rgba(255, 103, 179, {alpha})"));
        path_closed(ctx, &memory.points);
        ctx.stroke();
    }
    ctx.restore();
}

/// Idealized polygon flash around screen center while a detection is fresh.
fn draw_bloom(ctx: &web::CanvasRenderingContext2d, engine: &EngineState) {
    let Some(sides) = engine.detector.detected else {
        return;
    };
    let alpha = engine.detector.bloom;
    if alpha <= 0.0 {
        return;
    }
    ctx.save();
    ctx.set_global_alpha(alpha as f64);
    ctx.set_stroke_style_str("rgba(255, 213, 232, 0.55)");
    ctx.set_line_width(1.4);
    stroke_regular_polygon(ctx, engine.center, engine.base_step * 2.2, sides, 0.0);
    ctx.set_global_alpha(1.0);
    ctx.restore();
}

fn draw_ghost_polygon(ctx: &web::CanvasRenderingContext2d, engine: &EngineState) {
    let Some(sides) = engine.detector.detected else {
        return;
    };
    let alpha = engine.detector.bloom;
    if alpha <= 0.0 {
        return;
    }
    ctx.save();
    ctx.set_global_alpha((alpha * 0.7) as f64);
    ctx.set_stroke_style_str("rgba(255, 213, 232, 0.35)");
    ctx.set_line_width(1.2);
    stroke_regular_polygon(
        ctx,
        engine.polygon.centroid(),
        engine.base_step * 2.6,
        sides,
        engine.rotation * 0.2,
    );
    ctx.set_global_alpha(1.0);
    ctx.restore();
}

/// All the short-lived decorations in one pass over the effects list. The
/// visual fades run slightly shorter than the effect lifetimes so nothing is
/// still visible on the frame it gets swept.
fn draw_transients(ctx: &web::CanvasRenderingContext2d, engine: &EngineState, now: f64) {
    ctx.save();
    for effect in &engine.effects.transients {
        let progress = match effect.kind {
            EffectKind::Burst { .. } => effect.age(now) / 1.2,
            EffectKind::Sparkle { .. } => effect.age(now) / 0.6,
            EffectKind::Whisper
            | EffectKind::Wave { .. }
            | EffectKind::WrapPortal { .. } => effect.age(now) / 1.1,
            EffectKind::Seed { .. } => effect.progress(now),
        };
        if progress >= 1.0 {
            continue;
        }
        let fade = 1.0 - progress;
        let pos = effect.pos;
        match effect.kind {
            EffectKind::Burst { radius } => {
                ctx.set_stroke_style_str(&format!(
                    "rgba(255, 103, 179, {})",
                    fade * 0.2 * SUBTLETY
                ));
                ctx.set_line_width(1.4);
                stroke_circle(ctx, pos, radius + progress * radius * 2.4);
            }
            EffectKind::Sparkle { angle, radius } => {
                let offset = radius * (0.6 + progress);
                let p = pos + Vec2::new(angle.cos(), angle.sin()) * offset;
                ctx.set_fill_style_str(&format!(
                    "rgba(255, 213, 232, {})",
                    fade * 0.35 * SUBTLETY
                ));
                fill_circle(ctx, p, 2.0);
            }
            EffectKind::Seed { radius, .. } => {
                ctx.set_stroke_style_str(&format!("rgba(255, 213, 232, {})", fade * 0.35));
                ctx.set_line_width(1.2);
                stroke_circle(ctx, pos, radius + progress * 18.0);
            }
            EffectKind::Whisper => {
                ctx.set_fill_style_str(&format!(
                    "rgba(255, 213, 232, {})",
                    fade * 0.22 * SUBTLETY
                ));
                fill_circle(ctx, pos, 2.4);
            }
            EffectKind::Wave { radius } => {
                let _ = ctx.set_global_composite_operation("lighter");
                ctx.set_stroke_style_str(&format!(
                    "rgba(120, 205, 255, {})",
                    fade * 0.65 * SUBTLETY
                ));
                ctx.set_line_width(2.0);
                stroke_circle(ctx, pos, radius + progress * radius * 3.0);
                let _ = ctx.set_global_composite_operation("source-over");
            }
            EffectKind::WrapPortal { radius } => {
                ctx.set_stroke_style_str(&format!(
                    "rgba(255, 213, 232, {})",
                    fade * 0.2 * SUBTLETY
                ));
                ctx.set_line_width(1.1);
                stroke_circle(ctx, pos, radius + progress * radius * 1.6);
            }
        }
    }
    if let Some(portal) = &engine.effects.portal {
        let progress = portal.progress(now);
        if progress < 1.0 {
            ctx.set_stroke_style_str(&format!(
                "rgba(255, 213, 232, {})",
                (1.0 - progress) * 0.12 * SUBTLETY
            ));
            ctx.set_line_width(1.2);
            stroke_circle(ctx, portal.pos, portal.radius);
        }
    }
    ctx.restore();
}

fn draw_quiet_orbit(ctx: &web::CanvasRenderingContext2d, engine: &EngineState, now: f64) {
    if engine.energy.calm < 0.75 {
        return;
    }
    let centroid = engine.polygon.centroid();
    let radius = engine.base_step * 0.35;
    let angle = (now * 0.6) as f32;
    let p = centroid + Vec2::new(angle.cos(), angle.sin()) * radius;
    ctx.save();
    ctx.set_fill_style_str(&format!("rgba(255, 213, 232, {})", 0.25 * SUBTLETY));
    fill_circle(ctx, p, 2.0);
    ctx.restore();
}

/// The polygon itself: outline, balanced-edge highlights, the recent-touch
/// ring and the vertex pulses.
fn draw_shape_field(ctx: &web::CanvasRenderingContext2d, engine: &EngineState, now: f64) {
    let points = engine.polygon.positions();
    if points.len() < 3 {
        return;
    }
    ctx.save();
    ctx.set_line_width(1.2);
    let mood_light = 52.0 + engine.mood * 10.0;
    ctx.set_stroke_style_str(&format!("hsla(330, 75%, {mood_light}%, 0.3)"));
    path_closed(ctx, &points);
    ctx.stroke();

    if engine.symmetry > 0.85 {
        let edges = app_core::geometry::polygon_edge_lengths(&points);
        let avg: f32 = edges.iter().sum::<f32>() / edges.len() as f32;
        for (index, edge) in edges.iter().enumerate() {
            let diff = (edge - avg).abs() / avg;
            if diff > 0.12 {
                continue;
            }
            let alpha = (0.12 - diff) / 0.12;
            let next = (index + 1) % points.len();
            ctx.set_stroke_style_str(&format!(
                "rgba(255, 213, 232, {})",
                alpha * 0.18 * SUBTLETY
            ));
            ctx.set_line_width(1.6);
            stroke_segment(ctx, points[index], points[next]);
        }
    }

    if let Some((index, touched_at)) = engine.last_touch {
        let age = (now - touched_at) as f32;
        if age < 1.1 {
            if let Some(point) = points.get(index) {
                let alpha = (1.0 - age / 1.1) * 0.35 * SUBTLETY;
                ctx.set_stroke_style_str(&format!("rgba(255, 213, 232, {alpha})"));
                ctx.set_line_width(1.4);
                stroke_circle(ctx, *point, 16.0);
            }
        }
    }

    for (index, point) in points.iter().enumerate() {
        let pulse = ((now * 2.0) as f32 + index as f32).sin() * 2.0;
        ctx.set_fill_style_str("rgba(255, 213, 232, 0.7)");
        fill_circle(ctx, *point, 6.0 + pulse * 0.2);
        ctx.set_stroke_style_str("rgba(255, 103, 179, 0.5)");
        ctx.set_line_width(1.0);
        stroke_circle(ctx, *point, 12.0 + pulse);
    }
    ctx.restore();
}

/// Chords between vertices whose interior angles nearly agree.
fn draw_angle_echoes(ctx: &web::CanvasRenderingContext2d, engine: &EngineState) {
    let points = engine.polygon.positions();
    let angles = &engine.last_angles;
    if angles.len() != points.len() {
        // One frame behind right after an insert or delete.
        return;
    }
    let threshold = 6.0_f32;
    ctx.save();
    ctx.set_line_width(1.0);
    for i in 0..angles.len() {
        for j in (i + 1)..angles.len() {
            let diff = (angles[i] - angles[j]).abs();
            if diff > threshold {
                continue;
            }
            let alpha = 1.0 - diff / threshold;
            ctx.set_stroke_style_str(&format!("rgba(255, 213, 232, {})", alpha * 0.25));
            stroke_segment(ctx, points[i], points[j]);
        }
    }
    ctx.restore();
}

fn draw_symmetry_halo(ctx: &web::CanvasRenderingContext2d, engine: &EngineState) {
    if engine.symmetry < 0.8 {
        return;
    }
    let points = engine.polygon.positions();
    let alpha = (engine.symmetry - 0.8) / 0.2;
    ctx.save();
    ctx.set_stroke_style_str(&format!(
        "rgba(255, 213, 232, {})",
        alpha * 0.12 * SUBTLETY
    ));
    ctx.set_line_width(2.2);
    path_closed(ctx, &points);
    ctx.stroke();
    ctx.restore();
}

fn path_closed(ctx: &web::CanvasRenderingContext2d, points: &[Vec2]) {
    ctx.begin_path();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            ctx.move_to(p.x as f64, p.y as f64);
        } else {
            ctx.line_to(p.x as f64, p.y as f64);
        }
    }
    ctx.close_path();
}

fn stroke_segment(ctx: &web::CanvasRenderingContext2d, a: Vec2, b: Vec2) {
    ctx.begin_path();
    ctx.move_to(a.x as f64, a.y as f64);
    ctx.line_to(b.x as f64, b.y as f64);
    ctx.stroke();
}

fn stroke_circle(ctx: &web::CanvasRenderingContext2d, center: Vec2, radius: f32) {
    ctx.begin_path();
    let _ = ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    ctx.stroke();
}

fn fill_circle(ctx: &web::CanvasRenderingContext2d, center: Vec2, radius: f32) {
    ctx.begin_path();
    let _ = ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    ctx.fill();
}

fn stroke_regular_polygon(
    ctx: &web::CanvasRenderingContext2d,
    center: Vec2,
    radius: f32,
    sides: u32,
    rotation: f32,
) {
    let step = std::f32::consts::TAU / sides as f32;
    ctx.begin_path();
    for i in 0..=sides {
        let angle = i as f32 * step - std::f32::consts::FRAC_PI_2 + rotation;
        let x = center.x + angle.cos() * radius;
        let y = center.y + angle.sin() * radius;
        if i == 0 {
            ctx.move_to(x as f64, y as f64);
        } else {
            ctx.line_to(x as f64, y as f64);
        }
    }
    ctx.stroke();
}
