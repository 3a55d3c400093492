//! WGPU device, queue and surface management
//!
//! Acquisition walks down a ladder: a high-performance hardware adapter
//! first, then the platform's fallback (software) adapter. Which rung was
//! reached decides how much the surface will draw.

use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Why a context could not be acquired
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// No adapter at all, not even a software one
    NoAdapter,
    /// An adapter was found but refused to give us a device
    DeviceRequest(String),
    /// The window could not be turned into a presentable surface
    CreateSurface(String),
    /// The surface reports no usable format for the adapter
    Unsupported,
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::NoAdapter => write!(f, "No graphics adapter available"),
            SurfaceError::DeviceRequest(msg) => write!(f, "Device request failed: {}", msg),
            SurfaceError::CreateSurface(msg) => write!(f, "Surface creation failed: {}", msg),
            SurfaceError::Unsupported => write!(f, "Surface not supported by adapter"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Which rung of the adapter ladder the context is running on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdapterKind {
    Hardware,
    Software,
}

/// Owns the GPU device and the window surface
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub adapter_kind: AdapterKind,
    /// Samples per pixel of every pipeline; 1 means no multisampling
    pub sample_count: u32,
}

/// Samples per pixel for the surface format: 4 when antialiasing was asked
/// for and the adapter can multisample and resolve the format, else 1
pub fn msaa_sample_count(antialias: bool, features: wgpu::TextureFormatFeatureFlags) -> u32 {
    if antialias
        && features.sample_count_supported(4)
        && features.contains(wgpu::TextureFormatFeatureFlags::MULTISAMPLE_RESOLVE)
    {
        4
    } else {
        1
    }
}

impl RenderContext {
    /// Create a context for `window`, configured at `size` (already pixel-ratio capped)
    pub async fn new(
        window: Arc<Window>,
        size: PhysicalSize<u32>,
        vsync: bool,
        antialias: bool,
    ) -> Result<Self, SurfaceError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| SurfaceError::CreateSurface(e.to_string()))?;

        let (adapter, adapter_kind) = match Self::request_adapter(&instance, &surface, false).await {
            Some(adapter) => (adapter, AdapterKind::Hardware),
            None => {
                log::warn!("No hardware adapter, trying the fallback adapter");
                let adapter = Self::request_adapter(&instance, &surface, true)
                    .await
                    .ok_or(SurfaceError::NoAdapter)?;
                (adapter, AdapterKind::Software)
            }
        };

        let info = adapter.get_info();
        let adapter_kind = if info.device_type == wgpu::DeviceType::Cpu {
            AdapterKind::Software
        } else {
            adapter_kind
        };
        log::info!("Using adapter {} ({:?}, {:?})", info.name, info.backend, adapter_kind);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Backdrop Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .map_err(|e| SurfaceError::DeviceRequest(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        // Hex colors are authored for direct display, so prefer a non-sRGB target
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(SurfaceError::Unsupported)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(SurfaceError::Unsupported)?;

        let sample_count = msaa_sample_count(antialias, adapter.get_texture_format_features(format).flags);
        if antialias && sample_count == 1 {
            log::info!("{:?} cannot be multisampled here, antialiasing disabled", format);
        }

        let size = PhysicalSize::new(size.width.max(1), size.height.max(1));
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            adapter_kind,
            sample_count,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
        fallback: bool,
    ) -> Option<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: fallback,
                compatible_surface: Some(surface),
            })
            .await
    }

    /// Reconfigure the surface; zero sizes are ignored
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.size = size;
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Reconfigure at the current size, after the surface was lost or outdated
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.size.width as f32 / self.size.height.max(1) as f32
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Multisampled color target at the current size, `None` without MSAA
    pub fn create_msaa_view(&self) -> Option<wgpu::TextureView> {
        if self.sample_count <= 1 {
            return None;
        }
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Color Target"),
            size: wgpu::Extent3d {
                width: self.config.width,
                height: self.config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: self.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: self.config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }
}
