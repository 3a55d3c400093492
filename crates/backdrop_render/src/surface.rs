//! Render surface lifecycle
//!
//! A [`RenderSurface`] is mounted with [`start`](RenderSurface::start) and
//! torn down with [`stop`](RenderSurface::stop). Everything acquired in
//! `start` (GPU context, pipelines, buffers, input listeners) is released in
//! `stop`, and calling `stop` again is a no-op.

use std::sync::Arc;

use backdrop_core::{GalaxyScene, TickReport};
use backdrop_math::{mat4, Euler, Vec3};
use slotmap::{new_key_type, SlotMap};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::camera::Camera3D;
use crate::context::{AdapterKind, RenderContext};
use crate::geometry::SphereMesh;
use crate::pipeline::{
    FrameMatrices, GradientPipeline, GradientUniforms, PointCloud, PointUniforms, PointsPipeline,
    SphereObject, SpherePipeline, SphereUniforms,
};

/// Frame submission error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// What a started surface is able to draw
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceMode {
    /// Full scene on a hardware adapter
    Animated,
    /// Software adapter: background gradient only, no ticks
    StaticGradient,
    /// No adapter at all: nothing drawn, nothing ticked
    Unavailable,
}

impl SurfaceMode {
    pub fn is_animated(self) -> bool {
        self == SurfaceMode::Animated
    }
}

impl std::fmt::Display for SurfaceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceMode::Animated => write!(f, "animated"),
            SurfaceMode::StaticGradient => write!(f, "static gradient"),
            SurfaceMode::Unavailable => write!(f, "unavailable"),
        }
    }
}

// ==================== Listener Registry ====================

new_key_type! {
    /// Handle to a registered input listener
    pub struct ListenerKey;
}

/// Input streams the surface can subscribe to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Pointer,
    Scroll,
    Visibility,
    Resize,
}

impl ListenerKind {
    pub const ALL: [ListenerKind; 4] = [
        ListenerKind::Pointer,
        ListenerKind::Scroll,
        ListenerKind::Visibility,
        ListenerKind::Resize,
    ];
}

/// Listeners a mount has registered; events of unregistered kinds are dropped
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: SlotMap<ListenerKey, ListenerKind>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: ListenerKind) -> ListenerKey {
        self.listeners.insert(kind)
    }

    pub fn remove(&mut self, key: ListenerKey) -> Option<ListenerKind> {
        self.listeners.remove(key)
    }

    /// True if at least one listener of `kind` is registered
    pub fn listens(&self, kind: ListenerKind) -> bool {
        self.listeners.values().any(|&k| k == kind)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every listener, returning how many there were
    pub fn clear(&mut self) -> usize {
        let count = self.listeners.len();
        self.listeners.clear();
        count
    }
}

// ==================== Pixel Ratio ====================

/// Device scale factor clamped into `[1, max_ratio]`
pub fn effective_pixel_ratio(scale_factor: f64, max_ratio: f32) -> f32 {
    let max_ratio = if max_ratio.is_finite() { max_ratio.max(1.0) } else { 1.0 };
    let scale = scale_factor as f32;
    if scale.is_finite() {
        scale.clamp(1.0, max_ratio)
    } else {
        1.0
    }
}

/// Surface size for a window: logical size times the capped ratio, never below 1x1
pub fn surface_extent(physical: PhysicalSize<u32>, scale_factor: f64, max_ratio: f32) -> PhysicalSize<u32> {
    let scale = if scale_factor.is_finite() && scale_factor > 0.0 { scale_factor } else { 1.0 };
    let ratio = effective_pixel_ratio(scale, max_ratio) as f64;
    let width = (physical.width as f64 / scale * ratio).round() as u32;
    let height = (physical.height as f64 / scale * ratio).round() as u32;
    PhysicalSize::new(width.max(1), height.max(1))
}

// ==================== Surface ====================

/// Start-time switches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceOptions {
    pub vsync: bool,
    /// Draw the radial background gradient
    pub background: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            vsync: true,
            background: true,
        }
    }
}

/// GPU objects mirroring the scene, one per drawable
struct SceneGpu {
    points: PointsPipeline,
    spheres: SpherePipeline,
    clouds: Vec<PointCloud>,
    orbs: Vec<SphereObject>,
    core_outer: SphereObject,
    core_inner: SphereObject,
    nebulae: Vec<SphereObject>,
    uploaded: bool,
}

impl SceneGpu {
    fn new(context: &RenderContext, scene: &GalaxyScene) -> Self {
        let device = &context.device;
        let samples = context.sample_count;
        let points = PointsPipeline::new(device, context.format(), samples);
        let mesh = SphereMesh::for_tier(scene.profile().is_mobile);
        let spheres = SpherePipeline::new(device, context.format(), samples, &mesh);

        let clouds: Vec<PointCloud> = scene
            .systems()
            .filter(|s| s.point_style().is_some())
            .map(|s| points.create_cloud(device, &format!("{:?} Instances", s.kind()), s.buffer().as_slice()))
            .collect();
        let orbs: Vec<SphereObject> = scene
            .floating_orbs()
            .map(|o| o.orbs().iter().map(|_| spheres.create_object(device, "Orb Uniforms")).collect())
            .unwrap_or_default();
        let nebulae: Vec<SphereObject> = scene
            .nebulae()
            .iter()
            .map(|_| spheres.create_object(device, "Nebula Uniforms"))
            .collect();

        Self {
            core_outer: spheres.create_object(device, "Core Outer Uniforms"),
            core_inner: spheres.create_object(device, "Core Inner Uniforms"),
            points,
            spheres,
            clouds,
            orbs,
            nebulae,
            uploaded: true,
        }
    }

    /// Write this frame's uniforms, and positions when they moved
    fn prepare(&mut self, queue: &wgpu::Queue, scene: &GalaxyScene, frame: &FrameMatrices, report: TickReport) {
        let upload = !self.uploaded || report.buffers_dirty();
        let point_systems = scene.systems().filter_map(|s| s.point_style().map(|style| (s, style)));
        for (cloud, (system, style)) in self.clouds.iter().zip(point_systems) {
            if upload {
                self.points.upload_positions(queue, cloud, system.buffer().as_slice());
            }
            let model = cloud_model(system.rotation());
            self.points.update_uniforms(queue, cloud, &PointUniforms::new(frame, model, &style));
        }
        self.uploaded = true;

        let core = scene.galaxy_core();
        let c = core.config();
        let shells = [
            (&self.core_outer, core.outer_rotation(), &c.outer),
            (&self.core_inner, core.inner_rotation(), &c.inner),
        ];
        for (object, rotation, shell) in shells {
            let model = mat4::model(c.position, rotation, c.scale * shell.radius);
            self.spheres.update_uniforms(queue, object, &SphereUniforms::new(frame, model, shell));
        }

        for (object, nebula) in self.nebulae.iter().zip(scene.nebulae()) {
            let n = nebula.config();
            let model = mat4::model(n.position, nebula.rotation(), n.scale * n.shell.radius);
            self.spheres.update_uniforms(queue, object, &SphereUniforms::new(frame, model, &n.shell));
        }

        if let Some(orbs) = scene.floating_orbs() {
            for (i, (object, orb)) in self.orbs.iter().zip(orbs.orbs()).enumerate() {
                let shell = orb.shell(orbs.config());
                let model = mat4::model(orbs.buffer().get(i), orb.rotation, orb.radius);
                self.spheres.update_uniforms(queue, object, &SphereUniforms::new(frame, model, &shell));
            }
        }
    }

    /// Far to near: nebulae, core shells, orbs, then additive points
    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        for object in &self.nebulae {
            self.spheres.draw(pass, object);
        }
        self.spheres.draw(pass, &self.core_outer);
        self.spheres.draw(pass, &self.core_inner);
        for object in &self.orbs {
            self.spheres.draw(pass, object);
        }
        for cloud in &self.clouds {
            self.points.draw(pass, cloud);
        }
    }

    fn destroy(&self) {
        for cloud in &self.clouds {
            cloud.destroy();
        }
        for object in self.orbs.iter().chain(&self.nebulae) {
            object.destroy();
        }
        self.core_outer.destroy();
        self.core_inner.destroy();
        self.spheres.destroy();
    }
}

struct Mounted {
    context: RenderContext,
    /// Multisampled target resolved into the swapchain image
    msaa: Option<wgpu::TextureView>,
    gradient: GradientPipeline,
    scene: Option<SceneGpu>,
}

/// The drawable backdrop attached to a window
#[derive(Default)]
pub struct RenderSurface {
    mounted: Option<Mounted>,
    mode: Option<SurfaceMode>,
    listeners: ListenerRegistry,
    options: SurfaceOptions,
    max_pixel_ratio: f32,
}

impl RenderSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the GPU and register listeners for `scene`
    ///
    /// Never fails: acquisition problems are logged and reflected in the
    /// returned mode. Starting a running surface returns its current mode.
    pub fn start(&mut self, window: Arc<Window>, scene: &GalaxyScene, options: SurfaceOptions) -> SurfaceMode {
        if let Some(mode) = self.mode {
            log::warn!("Render surface already started ({})", mode);
            return mode;
        }

        self.options = options;
        self.max_pixel_ratio = scene.config().performance.max_pixel_ratio;
        let ratio = effective_pixel_ratio(window.scale_factor(), self.max_pixel_ratio);
        let size = surface_extent(window.inner_size(), window.scale_factor(), self.max_pixel_ratio);

        let antialias = scene.config().performance.antialias;
        let mode = match pollster::block_on(RenderContext::new(window, size, options.vsync, antialias)) {
            Ok(context) => {
                let gradient = GradientPipeline::new(
                    &context.device,
                    context.format(),
                    context.sample_count,
                    &GradientUniforms::from_stops(&scene.config().background),
                );
                let (scene_gpu, mode) = match context.adapter_kind {
                    AdapterKind::Hardware => (Some(SceneGpu::new(&context, scene)), SurfaceMode::Animated),
                    AdapterKind::Software => (None, SurfaceMode::StaticGradient),
                };
                self.mounted = Some(Mounted {
                    msaa: context.create_msaa_view(),
                    context,
                    gradient,
                    scene: scene_gpu,
                });
                mode
            }
            Err(e) => {
                log::warn!("Backdrop disabled: {}", e);
                SurfaceMode::Unavailable
            }
        };

        let kinds: &[ListenerKind] = match mode {
            SurfaceMode::Animated => &ListenerKind::ALL,
            SurfaceMode::StaticGradient => &[ListenerKind::Visibility, ListenerKind::Resize],
            SurfaceMode::Unavailable => &[],
        };
        for &kind in kinds {
            self.listeners.register(kind);
        }

        log::info!(
            "Render surface started: {} at {}x{} (pixel ratio {:.2}, {}x MSAA), {} listeners",
            mode,
            size.width,
            size.height,
            ratio,
            self.sample_count(),
            self.listeners.len()
        );
        self.mode = Some(mode);
        mode
    }

    /// Release every GPU resource and listener; safe to call repeatedly
    pub fn stop(&mut self) {
        let removed = self.listeners.clear();
        if let Some(mounted) = self.mounted.take() {
            if let Some(scene) = &mounted.scene {
                scene.destroy();
            }
            mounted.gradient.destroy();
        }
        if self.mode.take().is_some() {
            log::info!("Render surface stopped, {} listeners removed", removed);
        }
    }

    pub fn is_running(&self) -> bool {
        self.mode.is_some()
    }

    /// Mode of the current mount, `None` when stopped
    pub fn mode(&self) -> Option<SurfaceMode> {
        self.mode
    }

    pub fn listens(&self, kind: ListenerKind) -> bool {
        self.listeners.listens(kind)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Follow a window resize; the device profile of the mount is unchanged
    pub fn resize(&mut self, physical: PhysicalSize<u32>, scale_factor: f64) {
        if physical.width == 0 || physical.height == 0 {
            return;
        }
        if let Some(mounted) = &mut self.mounted {
            mounted
                .context
                .resize(surface_extent(physical, scale_factor, self.max_pixel_ratio));
            mounted.msaa = mounted.context.create_msaa_view();
        }
    }

    /// Current surface size, if mounted
    pub fn size(&self) -> Option<PhysicalSize<u32>> {
        self.mounted.as_ref().map(|m| m.context.size)
    }

    /// Samples per pixel of the mount; 1 when stopped or not antialiased
    pub fn sample_count(&self) -> u32 {
        self.mounted.as_ref().map_or(1, |m| m.context.sample_count)
    }

    /// Draw one frame of `scene` as seen from `camera`
    ///
    /// `report` says what the last tick moved; positions are only re-uploaded
    /// when particle buffers changed.
    pub fn render(&mut self, scene: &GalaxyScene, camera: &Camera3D, report: TickReport) -> Result<(), RenderError> {
        let Some(mounted) = &mut self.mounted else {
            return Ok(());
        };

        let output = match mounted.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                mounted.context.reconfigure();
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        if let Some(scene_gpu) = &mut mounted.scene {
            let frame = FrameMatrices {
                view: camera.view_matrix(),
                projection: camera.projection_matrix(mounted.context.aspect_ratio()),
            };
            scene_gpu.prepare(&mounted.context.queue, scene, &frame, report);
        }

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let (target, resolve_target) = match &mounted.msaa {
            Some(msaa) => (msaa, Some(&view)),
            None => (&view, None),
        };
        let mut encoder = mounted
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Backdrop Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        // Only the resolved image is presented
                        store: if resolve_target.is_some() {
                            wgpu::StoreOp::Discard
                        } else {
                            wgpu::StoreOp::Store
                        },
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if self.options.background {
                mounted.gradient.draw(&mut pass);
            }
            if let Some(scene_gpu) = &mounted.scene {
                scene_gpu.draw(&mut pass);
            }
        }

        mounted.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl Drop for RenderSurface {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Model matrix for a rigidly rotated cloud centred on the origin
pub fn cloud_model(rotation: Euler) -> backdrop_math::Mat4 {
    mat4::model(Vec3::ZERO, rotation, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_pixel_ratio_caps() {
        // Desktop allows up to 1.5
        assert_eq!(effective_pixel_ratio(2.0, 1.5), 1.5);
        assert_eq!(effective_pixel_ratio(1.25, 1.5), 1.25);
        // Mobile is pinned at 1
        assert_eq!(effective_pixel_ratio(3.0, 1.0), 1.0);
        // Never below 1
        assert_eq!(effective_pixel_ratio(0.5, 1.5), 1.0);
        assert_eq!(effective_pixel_ratio(f64::NAN, 1.5), 1.0);
    }

    #[test]
    fn test_surface_extent_uses_capped_ratio() {
        // 1920x1080 logical on a 2x display
        let size = surface_extent(PhysicalSize::new(3840, 2160), 2.0, 1.5);
        assert_eq!(size, PhysicalSize::new(2880, 1620));
        // Mobile 375x667 logical on a 3x display
        let size = surface_extent(PhysicalSize::new(1125, 2001), 3.0, 1.0);
        assert_eq!(size, PhysicalSize::new(375, 667));
    }

    #[test]
    fn test_surface_extent_never_zero() {
        assert_eq!(surface_extent(PhysicalSize::new(0, 0), 1.0, 1.5), PhysicalSize::new(1, 1));
    }

    #[test]
    fn test_registry_tracks_kinds() {
        let mut registry = ListenerRegistry::new();
        let pointer = registry.register(ListenerKind::Pointer);
        registry.register(ListenerKind::Scroll);
        assert!(registry.listens(ListenerKind::Pointer));
        assert!(!registry.listens(ListenerKind::Resize));

        assert_eq!(registry.remove(pointer), Some(ListenerKind::Pointer));
        assert_eq!(registry.remove(pointer), None);
        assert!(!registry.listens(ListenerKind::Pointer));
        assert_eq!(registry.clear(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_stop_without_start_is_a_no_op() {
        let mut surface = RenderSurface::new();
        surface.stop();
        surface.stop();
        assert!(!surface.is_running());
        assert_eq!(surface.mode(), None);
        assert_eq!(surface.listener_count(), 0);
        assert_eq!(surface.sample_count(), 1);
        assert!(!surface.listens(ListenerKind::Pointer));
    }

    #[test]
    fn test_cloud_model_is_pure_rotation() {
        let m = cloud_model(Euler::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        let p = mat4::transform_point(m, Vec3::X);
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }
}
