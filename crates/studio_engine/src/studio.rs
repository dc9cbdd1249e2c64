//! Frame orchestrator
//!
//! [`Studio`] owns the camera, the scene objects, the game rules and the
//! status indicator, and advances all of them one frame at a time:
//!
//! 1. one discrete key action (shoot, or move forward/backward)
//! 2. mouse look and zoom
//! 3. viewport resize
//! 4. proximity damage against last frame's positions
//! 5. object movement and drawing
//! 6. status overlay, then present
//!
//! Rendering, text and input stay behind traits so the loop runs headless.

use thiserror::Error;

use crate::assets::{AssetError, AssetLoader, MeshData};
use crate::config::ConfigError;
use crate::core::config::StudioConfig;
use crate::foundation::math::{Vec2, Vec3};
use crate::foundation::time::{Clock, Timer};
use crate::game::control::GameControl;
use crate::game::status::{Headline, StatusDisplay};
use crate::input::{InputFrame, InputManager, InputSource, KeyAction};
use crate::physics::Ray;
use crate::render::backend::RenderBackend;
use crate::render::camera::{Camera, CameraMovement};
use crate::render::overlay::TextOverlay;
use crate::scene::environment::StudioEnvironment;
use crate::scene::geometry;
use crate::scene::instanced_field::FieldLayout;
use crate::scene::object::{FrameContext, SceneObject, SceneObjectKind};
use crate::scene::{EnemySphere, InstancedField, MeshObject, OverlayRect};
use crate::systems::proximity::check_proximity;
use crate::systems::targeting::{cast_targets, TargetHit};

const PLAYER_COLOR: Vec3 = Vec3::new(0.8, 0.8, 0.8);
const FIELD_COLOR: Vec3 = Vec3::new(0.6, 0.5, 0.4);
const FIELD_SEED_SALT: u64 = 0xf1e1d;

/// Studio errors
#[derive(Error, Debug)]
pub enum StudioError {
    /// Scene setup produced nothing usable
    #[error("Studio initialization failed: {0}")]
    InitializationFailed(String),

    /// Camera frustum cannot produce a projection
    #[error("Invalid viewing frustum: {0}")]
    InvalidFrustum(String),

    /// Configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Model data could not be used
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// What happened during one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Discrete action taken
    pub action: Option<KeyAction>,
    /// Object selected by this frame's shot
    pub target: Option<TargetHit>,
    /// Threats that reached the camera
    pub strikes: usize,
    /// Status headline shown
    pub headline: Headline,
    /// Draws that failed and were skipped
    pub render_failures: usize,
}

/// The shooting studio
pub struct Studio {
    config: StudioConfig,
    camera: Camera,
    lighting: StudioEnvironment,
    screen_size: Vec2,
    player_position: Vec3,
    game_stage: i32,
    objects: Vec<SceneObjectKind>,
    indicator: OverlayRect,
    game: GameControl,
    input: InputManager,
    timer: Timer,
    should_stop: bool,
}

impl Studio {
    /// Build a studio from `config`, loading models through `loader`
    ///
    /// Objects are created in draw order: enemy spheres, player meshes, then
    /// the instanced field. Missing models fall back to procedural geometry.
    pub fn new(config: StudioConfig, loader: &dyn AssetLoader) -> Result<Self, StudioError> {
        log::info!("Initializing studio...");

        let camera = camera_setting(&config)?;
        config.validate()?;

        let lighting = StudioEnvironment::new(&config.lighting, &config.window);
        let screen_size = lighting.screen_size;
        let mut studio = Self {
            camera,
            screen_size,
            player_position: Vec3::zeros(),
            game_stage: 1,
            objects: Vec::new(),
            indicator: OverlayRect::new(Vec3::zeros()),
            game: GameControl::from_config(&config.gameplay),
            input: InputManager::new(),
            timer: Timer::new(),
            should_stop: false,
            lighting,
            config,
        };
        studio.ready(loader)?;

        log::info!("Studio ready with {} objects", studio.objects.len());
        Ok(studio)
    }

    fn ready(&mut self, loader: &dyn AssetLoader) -> Result<(), StudioError> {
        let scene = self.config.scene.clone();
        let gameplay = &self.config.gameplay;

        for i in 0..scene.enemy_sphere_count {
            let mut sphere = EnemySphere::new(scene.seed.wrapping_add(i as u64))
                .with_timing(gameplay.sphere_focus_timeout, gameplay.sphere_lifetime);
            sphere.transform(Vec3::repeat(scene.sphere_scale), Vec3::from(scene.sphere_spawn));
            self.objects.push(sphere.into());
        }

        let player_parts = load_parts(loader, scene.player_model.as_deref(), geometry::dart)?;
        for part in player_parts {
            let mut mesh = MeshObject::new(part, PLAYER_COLOR)
                .with_focus_timeout(self.config.gameplay.mesh_focus_timeout);
            mesh.transform(Vec3::repeat(scene.player_scale), Vec3::from(scene.player_position));
            self.objects.push(mesh.into());
        }

        let layout = FieldLayout {
            count: scene.field_instances,
            radius: scene.field_radius,
            offset: scene.field_offset,
        };
        let field_parts = load_parts(loader, scene.field_model.as_deref(), geometry::icosahedron)?;
        for (i, part) in field_parts.into_iter().enumerate() {
            let seed = (scene.seed ^ FIELD_SEED_SALT).wrapping_add(i as u64);
            let mut field = InstancedField::new(part, &layout, seed);
            field.set_color(FIELD_COLOR);
            field.transform(Vec3::repeat(scene.field_scale), Vec3::from(scene.field_position));
            self.objects.push(field.into());
        }

        if self.objects.is_empty() {
            return Err(StudioError::InitializationFailed(
                "no scene objects could be created".to_string(),
            ));
        }

        self.indicator.fit_screen(self.screen_size.x, self.screen_size.y);
        Ok(())
    }

    /// Append an object after the configured ones
    pub fn add_object(&mut self, object: impl Into<SceneObjectKind>) {
        self.objects.push(object.into());
    }

    /// Run frames until the input asks to stop or the frame limit is hit
    ///
    /// Returns the number of frames rendered.
    pub fn run(
        &mut self,
        clock: &impl Clock,
        input: &mut impl InputSource,
        backend: &mut dyn RenderBackend,
        overlay: &mut dyn TextOverlay,
    ) -> u64 {
        log::info!("Starting frame loop...");
        let mut frames = 0;

        while !self.should_stop {
            if self.config.engine.max_frames.is_some_and(|max| frames >= max) {
                log::info!("Frame limit {} reached", frames);
                break;
            }

            let sample = input.poll();
            if sample.should_stop() {
                self.request_stop();
                break;
            }

            self.frame(clock.now(), &sample, backend, overlay);
            frames += 1;
        }

        log::info!(
            "Frame loop finished after {} frames at stage {}",
            frames,
            self.game.stage()
        );
        frames
    }

    /// Advance and render a single frame at time `now`
    pub fn frame(
        &mut self,
        now: f64,
        sample: &InputFrame,
        backend: &mut dyn RenderBackend,
        overlay: &mut dyn TextOverlay,
    ) -> FrameReport {
        let delta_time = self.timer.tick(now);
        let commands = self.input.update(sample);

        let mut target = None;
        match commands.action {
            Some(KeyAction::Shoot) => {
                let ray = Ray::new(self.camera.position(), self.camera.front());
                target = cast_targets(
                    &mut self.objects,
                    &ray,
                    &mut self.game,
                    now,
                    self.config.gameplay.max_target_distance,
                );
                self.game.shoot(now);
            }
            Some(KeyAction::Forward) => {
                self.camera.process_keyboard(CameraMovement::Forward, delta_time);
            }
            Some(KeyAction::Backward) => {
                self.camera.process_keyboard(CameraMovement::Backward, delta_time);
            }
            None => {}
        }

        let (dx, dy) = commands.look;
        self.camera
            .process_mouse_movement(dx, dy, self.config.camera.constrain_pitch);
        if commands.scroll != 0.0 {
            self.camera.process_mouse_scroll(commands.scroll);
        }

        if sample.resized {
            self.resize(sample.framebuffer);
        }

        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix();

        let mut env = self.environment();
        let strikes = check_proximity(
            &mut self.objects,
            &mut env,
            &mut self.game,
            now,
            self.config.gameplay.proximity_margin,
        );
        self.player_position = env.player_position;

        let frame = FrameContext {
            now,
            view,
            projection,
            env: &env,
        };
        let mut render_failures = 0;
        for object in &mut self.objects {
            object.advance(now, &env);
            if let Err(e) = object.draw(&frame, backend) {
                log::warn!("Skipping {} draw: {}", object.object_type(), e);
                render_failures += 1;
            }
        }

        let status = StatusDisplay::compose(&mut self.game, now);
        self.indicator.set_color(status.indicator);
        if let Err(e) = self.indicator.draw(&frame, backend) {
            log::warn!("Skipping indicator draw: {}", e);
            render_failures += 1;
        }
        for line in &status.lines {
            overlay.print(&line.text, line.position, line.scale, line.color, &env);
        }
        if let Headline::StageCleared(stage) = status.headline {
            self.game_stage = stage;
        }

        backend.present();

        FrameReport {
            delta_time,
            action: commands.action,
            target,
            strikes,
            headline: status.headline,
            render_failures,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn resize(&mut self, (width, height): (u32, u32)) {
        if width == 0 || height == 0 {
            // Minimised; keep the last usable aspect
            return;
        }
        self.camera.set_aspect_ratio(width as f32 / height as f32);
        self.screen_size = Vec2::new(width as f32, height as f32);
        self.indicator.fit_screen(self.screen_size.x, self.screen_size.y);
    }

    /// This frame's environment, built from the current camera and stage
    pub fn environment(&self) -> StudioEnvironment {
        StudioEnvironment {
            view_position: self.camera.position(),
            front: self.camera.front(),
            player_position: self.player_position,
            screen_size: self.screen_size,
            game_stage: self.game_stage,
            ..self.lighting.clone()
        }
    }

    /// Stop after the current frame
    pub fn request_stop(&mut self) {
        log::info!("Studio shutdown requested");
        self.should_stop = true;
    }

    /// Whether the loop has been asked to stop
    pub fn should_stop(&self) -> bool {
        self.should_stop
    }

    /// The camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Scene objects in draw order
    pub fn objects(&self) -> &[SceneObjectKind] {
        &self.objects
    }

    /// Mutable scene object access
    pub fn objects_mut(&mut self) -> &mut [SceneObjectKind] {
        &mut self.objects
    }

    /// The status indicator
    pub fn indicator(&self) -> &OverlayRect {
        &self.indicator
    }

    /// Game rules and counters
    pub fn game(&self) -> &GameControl {
        &self.game
    }

    /// Mutable game access
    pub fn game_mut(&mut self) -> &mut GameControl {
        &mut self.game
    }

    /// Back to stage 1 with full energies; objects drop to stage-1 speed
    pub fn restart(&mut self) {
        self.game.restart();
        self.game_stage = self.game.stage();
    }

    /// Stage the objects currently move at
    pub fn game_stage(&self) -> i32 {
        self.game_stage
    }

    /// Frame timing
    pub fn timer(&self) -> &Timer {
        &self.timer
    }
}

/// Place the camera and set up its frustum
#[allow(clippy::cast_precision_loss)]
fn camera_setting(config: &StudioConfig) -> Result<Camera, StudioError> {
    let window = &config.window;
    let cam = &config.camera;

    if window.width == 0 || window.height == 0 {
        return Err(StudioError::InvalidFrustum(format!(
            "zero-sized screen {}x{}",
            window.width, window.height
        )));
    }
    if cam.near <= 0.0 || cam.far <= cam.near {
        return Err(StudioError::InvalidFrustum(format!(
            "near {} and far {} planes",
            cam.near, cam.far
        )));
    }
    if !(cam.fov > 0.0 && cam.fov < 180.0) {
        return Err(StudioError::InvalidFrustum(format!("field of view {}", cam.fov)));
    }

    let position = Vec3::from(cam.position);
    let target = Vec3::from(cam.target);
    if (target - position).norm() <= f32::EPSILON {
        return Err(StudioError::InvalidFrustum(
            "camera position and target coincide".to_string(),
        ));
    }

    let mut camera = Camera::new(position, target, Vec3::from(cam.world_up))
        .with_speed(cam.speed)
        .with_sensitivity(cam.sensitivity);
    camera.set_viewing_frustum(cam.near, cam.far, cam.fov, window.aspect_ratio());
    Ok(camera)
}

/// Load model parts from `path`, or build the fallback when it is unusable
fn load_parts(
    loader: &dyn AssetLoader,
    path: Option<&str>,
    fallback: fn() -> MeshData,
) -> Result<Vec<MeshData>, StudioError> {
    let Some(path) = path else {
        return Ok(vec![fallback()]);
    };

    match loader.load(path) {
        Ok(parts) if !parts.is_empty() => Ok(parts),
        Ok(_) => {
            log::warn!("Model {} has no mesh parts, using procedural geometry", path);
            Ok(vec![fallback()])
        }
        Err(AssetError::NotFound(missing)) => {
            log::warn!("Model {} not found, using procedural geometry", missing);
            Ok(vec![fallback()])
        }
        Err(e) => {
            log::error!("Failed to load model {}: {}", path, e);
            Err(e.into())
        }
    }
}
