//! Scene cameras, effect composition and world/screen transforms.
//!
//! A [`Camera`]'s `position` is the world point shown at the viewport's
//! top-left corner at zoom 1.0. Zoom scales around the viewport center, so
//! changing it keeps the world point under the center fixed.
//!
//! The [`CameraManager`] owns every named camera and the live effect list.
//! Each [`CameraManager::update`] advances the effects: Zoom, Pan and Follow
//! rewrite the active camera's base zoom/position in the order they were
//! applied, while Shake and Sway contribute a transient offset that is summed
//! and added on top. The final view is clamped to the scene bounds.

pub mod effect;

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec2;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crystal_data::{DEFAULT_LOGICAL_HEIGHT, DEFAULT_LOGICAL_WIDTH};

use crate::geometry::Rect;

pub use effect::{CameraEffect, CameraEffectKind, EffectType};

use effect::smoothstep;

/// Name of the camera every manager starts with.
pub const MAIN_CAMERA: &str = "main";

/// Zoom can never drop below this, whatever the settings say.
const MIN_ZOOM_FLOOR: f32 = 0.01;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("no camera named '{0}'")]
    NotFound(String),
    #[error("a camera named '{0}' already exists")]
    DuplicateName(String),
    #[error("no saved camera state to restore")]
    NoSavedState,
}

/// Tuning shared by all cameras of a manager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Screen size in pixels.
    pub viewport: Vec2,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub edge_scroll_enabled: bool,
    /// Distance in pixels from a viewport edge that triggers edge scrolling.
    pub edge_scroll_margin: f32,
    /// World units per second.
    pub edge_scroll_speed: f32,
    /// Exponential approach rate used by [`CameraManager::follow`].
    pub follow_smoothing: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(DEFAULT_LOGICAL_WIDTH as f32, DEFAULT_LOGICAL_HEIGHT as f32),
            min_zoom: 0.5,
            max_zoom: 4.0,
            edge_scroll_enabled: false,
            edge_scroll_margin: 20.0,
            edge_scroll_speed: 300.0,
            follow_smoothing: 5.0,
        }
    }
}

/// Viewport onto a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    name: String,
    position: Vec2,
    zoom: f32,
    offset: Vec2,
    viewport: Vec2,
    scene_size: Vec2,
    min_zoom: f32,
    max_zoom: f32,
    pub edge_scroll_enabled: bool,
}

impl Camera {
    /// Camera at the origin, zoom 1.0, bounded by a scene the size of the viewport.
    pub fn new(name: impl Into<String>, settings: &CameraSettings) -> Self {
        let min_zoom = settings.min_zoom.max(MIN_ZOOM_FLOOR);
        Self {
            name: name.into(),
            position: Vec2::ZERO,
            zoom: 1.0_f32.clamp(min_zoom, settings.max_zoom.max(min_zoom)),
            offset: Vec2::ZERO,
            viewport: settings.viewport,
            scene_size: settings.viewport,
            min_zoom,
            max_zoom: settings.max_zoom.max(min_zoom),
            edge_scroll_enabled: settings.edge_scroll_enabled,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base position, before transient effect offsets.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Transient offset from Shake/Sway effects.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn scene_size(&self) -> Vec2 {
        self.scene_size
    }

    /// Position actually used for rendering: base plus offset, clamped.
    pub fn view_position(&self) -> Vec2 {
        self.clamp_position(self.position + self.offset)
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = self.clamp_position(position);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.position = self.clamp_position(self.position);
    }

    pub fn set_scene_bounds(&mut self, width: f32, height: f32) {
        self.scene_size = Vec2::new(width.max(0.0), height.max(0.0));
        self.position = self.clamp_position(self.position);
    }

    /// Put `point` at the center of the view.
    pub fn center_on(&mut self, point: Vec2) {
        self.set_position(point - self.viewport_center());
    }

    /// World point under the center of the viewport.
    pub fn view_center(&self) -> Vec2 {
        self.view_position() + self.viewport_center()
    }

    /// World-space rectangle currently on screen.
    pub fn visible_rect(&self) -> Rect {
        let half = self.viewport_center() / self.zoom;
        let center = self.view_center();
        Rect::new(center - half, center + half)
    }

    pub fn transform_position(&self, world: Vec2) -> Vec2 {
        let vc = self.viewport_center();
        vc + (world - self.view_position() - vc) * self.zoom
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let vc = self.viewport_center();
        (screen - vc) / self.zoom + self.view_position() + vc
    }

    pub fn is_visible(&self, world: Vec2) -> bool {
        self.visible_rect().contains(world)
    }

    fn viewport_center(&self) -> Vec2 {
        self.viewport * 0.5
    }

    fn clamp_position(&self, position: Vec2) -> Vec2 {
        let vc = self.viewport_center();
        let half = vc / self.zoom;
        Vec2::new(
            clamp_axis(position.x, vc.x, half.x, self.scene_size.x),
            clamp_axis(position.y, vc.y, half.y, self.scene_size.y),
        )
    }
}

// The view center is `position + vc` and must stay within `[half, scene - half]`.
// When the view is wider than the scene it is centered instead.
fn clamp_axis(position: f32, vc: f32, half: f32, scene: f32) -> f32 {
    if 2.0 * half >= scene {
        scene * 0.5 - vc
    } else {
        position.clamp(half - vc, scene - half - vc)
    }
}

/// Snapshot taken by [`CameraManager::save_state`].
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub camera: String,
    pub position: Vec2,
    pub zoom: f32,
}

/// Named cameras, the active one, and the effects driving it.
#[derive(Debug)]
pub struct CameraManager {
    cameras: Vec<Camera>,
    active: usize,
    effects: Vec<CameraEffect>,
    entity_positions: HashMap<String, Vec2>,
    saved: Vec<CameraState>,
    settings: CameraSettings,
    rng: StdRng,
}

impl CameraManager {
    pub fn new(settings: CameraSettings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Manager with a deterministic shake generator.
    pub fn with_seed(settings: CameraSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: CameraSettings, rng: StdRng) -> Self {
        Self {
            cameras: vec![Camera::new(MAIN_CAMERA, &settings)],
            active: 0,
            effects: Vec::new(),
            entity_positions: HashMap::new(),
            saved: Vec::new(),
            settings,
            rng,
        }
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Register a new camera sharing the current scene bounds.
    ///
    /// # Errors
    /// [`CameraError::DuplicateName`] if the name is taken.
    pub fn add_camera(&mut self, name: &str) -> Result<&mut Camera, CameraError> {
        if self.camera(name).is_some() {
            warn!("camera '{name}' already exists");
            return Err(CameraError::DuplicateName(name.to_string()));
        }
        let bounds = self.active_camera().scene_size();
        let mut camera = Camera::new(name, &self.settings);
        camera.set_scene_bounds(bounds.x, bounds.y);
        self.cameras.push(camera);
        debug!("added camera '{name}'");
        let index = self.cameras.len() - 1;
        Ok(&mut self.cameras[index])
    }

    /// Make `name` the active camera.
    ///
    /// Zoom, Pan, Shake and Sway effects belong to the camera they were
    /// started on and are dropped by a switch; Follow carries over.
    ///
    /// # Errors
    /// [`CameraError::NotFound`] for unknown names; the active camera is left unchanged.
    pub fn switch_camera(&mut self, name: &str) -> Result<(), CameraError> {
        let Some(index) = self.cameras.iter().position(|c| c.name == name) else {
            warn!("cannot switch to unknown camera '{name}'");
            return Err(CameraError::NotFound(name.to_string()));
        };
        if index != self.active {
            self.cameras[self.active].offset = Vec2::ZERO;
            let before = self.effects.len();
            self.effects.retain(|e| e.kind.is_follow());
            if self.effects.len() != before {
                debug!("{} camera effect(s) cancelled by camera switch", before - self.effects.len());
            }
            self.active = index;
            info!("active camera is now '{name}'");
        }
        Ok(())
    }

    pub fn camera(&self, name: &str) -> Option<&Camera> {
        self.cameras.iter().find(|c| c.name == name)
    }

    pub fn camera_mut(&mut self, name: &str) -> Option<&mut Camera> {
        self.cameras.iter_mut().find(|c| c.name == name)
    }

    pub fn camera_names(&self) -> impl Iterator<Item = &str> {
        self.cameras.iter().map(Camera::name)
    }

    pub fn active_camera(&self) -> &Camera {
        &self.cameras[self.active]
    }

    pub fn active_camera_mut(&mut self) -> &mut Camera {
        &mut self.cameras[self.active]
    }

    pub fn active_name(&self) -> &str {
        self.active_camera().name()
    }

    /// Update clamping bounds on every camera.
    pub fn set_scene_bounds(&mut self, width: f32, height: f32) {
        for camera in &mut self.cameras {
            camera.set_scene_bounds(width, height);
        }
        debug!("camera scene bounds set to {width}x{height}");
    }

    pub fn center_on(&mut self, point: Vec2) {
        self.active_camera_mut().center_on(point);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.active_camera_mut().set_zoom(zoom);
    }

    pub fn transform_position(&self, world: Vec2) -> Vec2 {
        self.active_camera().transform_position(world)
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.active_camera().screen_to_world(screen)
    }

    pub fn visible_rect(&self) -> Rect {
        self.active_camera().visible_rect()
    }

    pub fn is_visible(&self, world: Vec2) -> bool {
        self.active_camera().is_visible(world)
    }

    /// Start an effect on the active camera.
    ///
    /// Shakes stack; any other effect replaces a live effect of the same type.
    /// Zoom and Pan remember the camera's zoom/position at this moment.
    pub fn apply_effect(&mut self, mut effect: CameraEffect) {
        let effect_type = effect.effect_type();
        if effect_type != EffectType::Shake {
            self.effects.retain(|e| e.effect_type() != effect_type);
        }
        let camera = &self.cameras[self.active];
        match &mut effect.kind {
            CameraEffectKind::Zoom { from, .. } if from.is_none() => *from = Some(camera.zoom),
            CameraEffectKind::Pan { from, .. } if from.is_none() => *from = Some(camera.position),
            _ => {},
        }
        debug!("camera effect {effect_type} applied to '{}'", camera.name);
        self.effects.push(effect);
    }

    /// Follow `target` using the configured smoothing rate.
    pub fn follow(&mut self, target: impl Into<String>, deadzone: Vec2, smooth: bool) {
        let smoothing = self.settings.follow_smoothing;
        self.apply_effect(CameraEffect::follow(target, deadzone, smooth, smoothing));
    }

    /// Remove every live effect of the given type. Returns whether any were removed.
    pub fn remove_effect(&mut self, effect_type: EffectType) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.effect_type() != effect_type);
        let removed = self.effects.len() != before;
        if removed && matches!(effect_type, EffectType::Shake | EffectType::Sway) {
            self.recompute_offset();
        }
        removed
    }

    /// Drop all effects and any transient offset.
    pub fn reset_effects(&mut self) {
        self.effects.clear();
        self.cameras[self.active].offset = Vec2::ZERO;
    }

    pub fn active_effects(&self) -> &[CameraEffect] {
        &self.effects
    }

    pub fn has_effect(&self, effect_type: EffectType) -> bool {
        self.effects.iter().any(|e| e.effect_type() == effect_type)
    }

    /// Report where an entity is, for Follow effects targeting it.
    pub fn set_entity_position(&mut self, name: impl Into<String>, position: Vec2) {
        self.entity_positions.insert(name.into(), position);
    }

    pub fn entity_position(&self, name: &str) -> Option<Vec2> {
        self.entity_positions.get(name).copied()
    }

    /// Advance all effects by `dt` seconds and recompose the active camera.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        let camera = &mut self.cameras[self.active];
        let mut offset = Vec2::ZERO;

        for effect in &mut self.effects {
            effect.elapsed += dt;
            let finished = effect.is_finished();
            let progress = effect.progress();
            match &effect.kind {
                CameraEffectKind::Shake { intensity } => {
                    if !finished {
                        let jitter = Vec2::new(self.rng.random_range(-1.0..=1.0), self.rng.random_range(-1.0..=1.0));
                        offset += jitter * *intensity * (1.0 - progress);
                    }
                },
                CameraEffectKind::Sway { amplitude, frequency } => {
                    if !finished {
                        offset += *amplitude * (TAU * frequency * effect.elapsed).sin();
                    }
                },
                CameraEffectKind::Zoom { from, target } => {
                    let zoom = if finished {
                        *target
                    } else {
                        let from = from.unwrap_or(camera.zoom);
                        from + (target - from) * smoothstep(progress)
                    };
                    camera.set_zoom(zoom);
                },
                CameraEffectKind::Pan { from, target } => {
                    let position = if finished {
                        *target
                    } else {
                        from.unwrap_or(camera.position).lerp(*target, progress)
                    };
                    camera.set_position(position);
                },
                CameraEffectKind::Follow {
                    target,
                    deadzone,
                    smooth,
                    smoothing,
                } => {
                    if let Some(&entity) = self.entity_positions.get(target) {
                        follow_step(camera, entity, *deadzone, *smooth, *smoothing, dt);
                    }
                },
            }
        }

        let before = self.effects.len();
        self.effects.retain(|e| !e.is_finished());
        if self.effects.len() != before {
            debug!("{} camera effect(s) expired", before - self.effects.len());
        }
        camera.offset = offset;
    }

    /// Pan the active camera when the mouse sits near a viewport edge.
    ///
    /// Returns whether the camera was asked to move.
    pub fn edge_scroll(&mut self, mouse: Vec2, dt: f32) -> bool {
        let margin = self.settings.edge_scroll_margin;
        let speed = self.settings.edge_scroll_speed;
        let camera = &mut self.cameras[self.active];
        if !camera.edge_scroll_enabled {
            return false;
        }

        let viewport = camera.viewport;
        let mut dir = Vec2::ZERO;
        if mouse.x < margin {
            dir.x -= 1.0;
        }
        if mouse.x > viewport.x - margin {
            dir.x += 1.0;
        }
        if mouse.y < margin {
            dir.y -= 1.0;
        }
        if mouse.y > viewport.y - margin {
            dir.y += 1.0;
        }
        if dir == Vec2::ZERO {
            return false;
        }

        let position = camera.position + dir.normalize() * speed * dt;
        camera.set_position(position);
        true
    }

    /// Push the active camera's name, position and zoom. Effects are not saved.
    pub fn save_state(&mut self) {
        let camera = self.active_camera();
        let state = CameraState {
            camera: camera.name.clone(),
            position: camera.position,
            zoom: camera.zoom,
        };
        debug!("saved camera state for '{}'", state.camera);
        self.saved.push(state);
    }

    /// Pop the last saved state and make its camera active again.
    ///
    /// # Errors
    /// [`CameraError::NoSavedState`] when nothing was saved, or
    /// [`CameraError::NotFound`] if the saved camera no longer resolves.
    pub fn restore_state(&mut self) -> Result<CameraState, CameraError> {
        let state = self.saved.pop().ok_or(CameraError::NoSavedState)?;
        self.switch_camera(&state.camera)?;
        let camera = self.active_camera_mut();
        camera.set_zoom(state.zoom);
        camera.set_position(state.position);
        Ok(state)
    }

    pub fn saved_states(&self) -> usize {
        self.saved.len()
    }

    fn recompute_offset(&mut self) {
        if !self.effects.iter().any(|e| e.kind.is_shake() || e.kind.is_sway()) {
            self.cameras[self.active].offset = Vec2::ZERO;
        }
    }
}

impl Default for CameraManager {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

/// Move `camera` so `entity` is back inside the deadzone around the view center.
fn follow_step(camera: &mut Camera, entity: Vec2, deadzone: Vec2, smooth: bool, smoothing: f32, dt: f32) {
    let center = camera.position + camera.viewport_center();
    let half = deadzone * 0.5;
    let delta = entity - center;
    let shift = Vec2::new(excess(delta.x, half.x), excess(delta.y, half.y));
    if shift == Vec2::ZERO {
        return;
    }
    let factor = if smooth {
        1.0 - (-smoothing.max(0.0) * dt).exp()
    } else {
        1.0
    };
    camera.set_position(camera.position + shift * factor);
}

fn excess(delta: f32, half: f32) -> f32 {
    if delta > half {
        delta - half
    } else if delta < -half {
        delta + half
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> CameraManager {
        let settings = CameraSettings {
            viewport: Vec2::new(800.0, 600.0),
            ..CameraSettings::default()
        };
        let mut cameras = CameraManager::with_seed(settings, 7);
        cameras.set_scene_bounds(2000.0, 1200.0);
        cameras
    }

    fn assert_close(a: Vec2, b: Vec2, tol: f32) {
        assert!((a - b).length() < tol, "{a} != {b}");
    }

    #[test]
    fn zoom_scales_around_viewport_center() {
        let mut cameras = manager();
        cameras.active_camera_mut().set_position(Vec2::new(100.0, 100.0));
        cameras.set_zoom(2.0);
        // view center stays put
        assert_close(cameras.transform_position(Vec2::new(500.0, 400.0)), Vec2::new(400.0, 300.0), 1e-3);
        assert_close(cameras.transform_position(Vec2::new(600.0, 400.0)), Vec2::new(600.0, 300.0), 1e-3);
        let rect = cameras.visible_rect();
        assert_close(rect.min, Vec2::new(300.0, 250.0), 1e-3);
        assert_close(rect.max, Vec2::new(700.0, 550.0), 1e-3);
    }

    #[test]
    fn screen_to_world_inverts_transform() {
        let mut cameras = manager();
        for (pos, zoom) in [(Vec2::ZERO, 1.0), (Vec2::new(350.0, 220.0), 1.7), (Vec2::new(900.0, 500.0), 0.8)] {
            cameras.active_camera_mut().set_zoom(zoom);
            cameras.active_camera_mut().set_position(pos);
            for p in [Vec2::new(0.0, 0.0), Vec2::new(1234.5, 987.0), Vec2::new(-50.0, 3000.0)] {
                let back = cameras.screen_to_world(cameras.transform_position(p));
                assert_close(back, p, 0.01);
            }
        }
    }

    #[test]
    fn small_scene_is_centered() {
        let mut cameras = manager();
        cameras.set_scene_bounds(400.0, 300.0);
        cameras.center_on(Vec2::new(0.0, 0.0));
        assert_close(cameras.active_camera().view_center(), Vec2::new(200.0, 150.0), 1e-3);
    }

    #[test]
    fn zoom_is_clamped_to_limits() {
        let mut cameras = manager();
        cameras.set_zoom(100.0);
        assert_eq!(cameras.active_camera().zoom(), 4.0);
        cameras.set_zoom(0.0);
        assert_eq!(cameras.active_camera().zoom(), 0.5);
    }

    #[test]
    fn second_zoom_replaces_first_but_shakes_stack() {
        let mut cameras = manager();
        cameras.apply_effect(CameraEffect::zoom(2.0, 1.0));
        cameras.apply_effect(CameraEffect::zoom(3.0, 1.0));
        cameras.apply_effect(CameraEffect::shake(4.0, 1.0));
        cameras.apply_effect(CameraEffect::shake(2.0, 1.0));
        let zooms = cameras
            .active_effects()
            .iter()
            .filter(|e| e.effect_type() == EffectType::Zoom)
            .count();
        assert_eq!(zooms, 1);
        let shakes = cameras.active_effects().iter().filter(|e| e.kind.is_shake()).count();
        assert_eq!(shakes, 2);
    }

    #[test]
    fn zoom_effect_lands_exactly_on_target() {
        let mut cameras = manager();
        cameras.apply_effect(CameraEffect::zoom(2.5, 0.5));
        cameras.update(0.25);
        let mid = cameras.active_camera().zoom();
        assert!(mid > 1.0 && mid < 2.5);
        cameras.update(0.25);
        assert_eq!(cameras.active_camera().zoom(), 2.5);
        assert!(!cameras.has_effect(EffectType::Zoom));
    }

    #[test]
    fn sway_follows_sine() {
        let mut cameras = manager();
        cameras.center_on(Vec2::new(1000.0, 600.0));
        cameras.apply_effect(CameraEffect::sway(Vec2::new(10.0, 0.0), 0.25, None));
        cameras.update(1.0);
        // sin(2π * 0.25 * 1.0) = 1
        assert_close(cameras.active_camera().offset(), Vec2::new(10.0, 0.0), 1e-3);
        assert!(cameras.remove_effect(EffectType::Sway));
        assert_eq!(cameras.active_camera().offset(), Vec2::ZERO);
    }

    #[test]
    fn follow_without_smoothing_snaps_to_deadzone_edge() {
        let mut cameras = manager();
        cameras.center_on(Vec2::new(1000.0, 600.0));
        cameras.apply_effect(CameraEffect::follow("hero", Vec2::new(100.0, 100.0), false, 0.0));
        cameras.set_entity_position("hero", Vec2::new(1020.0, 600.0));
        cameras.update(0.016);
        assert_close(cameras.active_camera().view_center(), Vec2::new(1000.0, 600.0), 1e-3);

        cameras.set_entity_position("hero", Vec2::new(1200.0, 600.0));
        cameras.update(0.016);
        assert_close(cameras.active_camera().view_center(), Vec2::new(1150.0, 600.0), 1e-3);
    }

    #[test]
    fn smooth_follow_approaches_gradually() {
        let mut cameras = manager();
        cameras.center_on(Vec2::new(1000.0, 600.0));
        cameras.apply_effect(CameraEffect::follow("hero", Vec2::ZERO, true, 5.0));
        cameras.set_entity_position("hero", Vec2::new(1100.0, 600.0));
        cameras.update(0.1);
        let x = cameras.active_camera().view_center().x;
        assert!(x > 1000.0 && x < 1100.0);
    }

    #[test]
    fn follow_uses_configured_smoothing() {
        let mut cameras = manager();
        cameras.follow("hero", Vec2::new(40.0, 40.0), true);
        let follow = cameras.active_effects()[0].kind.clone();
        assert_eq!(
            follow,
            CameraEffectKind::Follow {
                target: "hero".into(),
                deadzone: Vec2::new(40.0, 40.0),
                smooth: true,
                smoothing: 5.0,
            }
        );
    }

    #[test]
    fn switching_cameras_cancels_transitions_but_keeps_follow() {
        let mut cameras = manager();
        cameras.add_camera("closeup").unwrap();
        cameras.apply_effect(CameraEffect::pan(Vec2::new(900.0, 500.0), 1.0));
        cameras.apply_effect(CameraEffect::shake(6.0, 1.0));
        cameras.follow("hero", Vec2::ZERO, false);
        cameras.update(0.5);
        let main_position = cameras.active_camera().position();

        cameras.switch_camera("closeup").unwrap();
        assert_eq!(cameras.active_effects().len(), 1);
        assert!(cameras.has_effect(EffectType::Follow));
        assert_eq!(cameras.camera(MAIN_CAMERA).unwrap().offset(), Vec2::ZERO);

        cameras.update(0.5);
        assert_eq!(cameras.active_camera().position(), Vec2::ZERO);
        assert_eq!(cameras.camera(MAIN_CAMERA).unwrap().position(), main_position);
    }

    #[test]
    fn edge_scroll_requires_enablement() {
        let mut cameras = manager();
        cameras.center_on(Vec2::new(1000.0, 600.0));
        assert!(!cameras.edge_scroll(Vec2::new(1.0, 300.0), 0.5));
        cameras.active_camera_mut().edge_scroll_enabled = true;
        assert!(cameras.edge_scroll(Vec2::new(1.0, 300.0), 0.5));
        assert_close(cameras.active_camera().view_center(), Vec2::new(850.0, 600.0), 1e-3);
        assert!(!cameras.edge_scroll(Vec2::new(400.0, 300.0), 0.5));
    }

    #[test]
    fn save_and_restore_round_trip() {
        let mut cameras = manager();
        cameras.center_on(Vec2::new(700.0, 500.0));
        cameras.save_state();
        cameras.add_camera("cutscene").unwrap();
        cameras.switch_camera("cutscene").unwrap();
        cameras.center_on(Vec2::new(1500.0, 800.0));

        let state = cameras.restore_state().unwrap();
        assert_eq!(state.camera, MAIN_CAMERA);
        assert_eq!(cameras.active_name(), MAIN_CAMERA);
        assert_close(cameras.active_camera().view_center(), Vec2::new(700.0, 500.0), 1e-3);
        assert_eq!(cameras.restore_state(), Err(CameraError::NoSavedState));
    }

    #[test]
    fn lookup_failures_leave_state_alone() {
        let mut cameras = manager();
        assert_eq!(
            cameras.switch_camera("nowhere"),
            Err(CameraError::NotFound("nowhere".into()))
        );
        assert_eq!(cameras.active_name(), MAIN_CAMERA);
        assert!(matches!(cameras.add_camera(MAIN_CAMERA), Err(CameraError::DuplicateName(_))));
        assert_eq!(cameras.camera_names().count(), 1);
    }
}
