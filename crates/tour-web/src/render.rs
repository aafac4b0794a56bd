use glam::Mat4;
use web_sys as web;
use wgpu::util::DeviceExt;

use tour_core::catalog::CameraPose;
use tour_core::marker::{MarkerSet, RING_COLORS};
use tour_core::picking;

use crate::loader::ModelData;

mod helpers;
mod rings;

use rings::{ring_instances, unit_annulus_mesh, RingInstance};

static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
static RING_WGSL: &str = include_str!("../shaders/ring.wgsl");

/// One vertex of the museum model.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    light_color: [f32; 4],
    ambient: [f32; 4],
}

struct ModelBuffers {
    vertex_buf: wgpu::Buffer,
    index_buf: wgpu::Buffer,
    index_count: u32,
}

/// WebGPU state: surface, pipelines, and the scene's GPU resources.
pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    scene_pipeline: wgpu::RenderPipeline,
    ring_pipeline: wgpu::RenderPipeline,
    uniform_buf: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    model: Option<ModelBuffers>,

    ring_vertex_buf: wgpu::Buffer,
    ring_vertex_count: u32,
    ring_instance_buf: wgpu::Buffer,
    ring_instance_capacity: u32,
    ring_instance_count: u32,

    width: u32,
    height: u32,
    view_proj: Mat4,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = helpers::create_depth_texture(&device, width, height);

        let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            }],
        });

        let scene_pipeline = helpers::create_scene_pipeline(&device, &bgl, format, SCENE_WGSL);
        let ring_pipeline = helpers::create_ring_pipeline(&device, &bgl, format, RING_WGSL);

        let annulus = unit_annulus_mesh();
        let ring_vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ring_vertices"),
            contents: bytemuck::cast_slice(&annulus),
            usage: wgpu::BufferUsages::VERTEX,
        });
        // Two rings per marker; sized for the full catalog and regrown on
        // demand.
        let ring_instance_capacity = 32;
        let ring_instance_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ring_instances"),
            size: (ring_instance_capacity as usize * std::mem::size_of::<RingInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            scene_pipeline,
            ring_pipeline,
            uniform_buf,
            bind_group,
            model: None,
            ring_vertex_buf,
            ring_vertex_count: annulus.len() as u32,
            ring_instance_buf,
            ring_instance_capacity,
            ring_instance_count: 0,
            width,
            height,
            view_proj: Mat4::IDENTITY,
        })
    }

    /// Upload the loaded museum geometry; replaces any previous model.
    pub fn upload_model(&mut self, model: &ModelData) {
        let vertex_buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("model_vertices"),
                contents: bytemuck::cast_slice(&model.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("model_indices"),
                contents: bytemuck::cast_slice(&model.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        self.model = Some(ModelBuffers {
            vertex_buf,
            index_buf,
            index_count: model.indices.len() as u32,
        });
    }

    /// Recompute the view-projection matrix for the camera pose.
    pub fn set_camera(&mut self, pose: &CameraPose) {
        let aspect = self.width as f32 / (self.height as f32).max(1.0);
        self.view_proj = picking::projection(aspect) * picking::view_matrix(pose);
    }

    /// Mirror the current marker set into the ring instance buffer. The
    /// set is tiny, so it is rewritten wholesale every frame.
    pub fn sync_markers(&mut self, markers: &MarkerSet) {
        let instances = ring_instances(markers, RING_COLORS);
        if instances.len() as u32 > self.ring_instance_capacity {
            self.ring_instance_capacity = instances.len().next_power_of_two() as u32;
            self.ring_instance_buf = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("ring_instances"),
                size: (self.ring_instance_capacity as usize
                    * std::mem::size_of::<RingInstance>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.ring_instance_buf, 0, bytemuck::cast_slice(&instances));
        }
        self.ring_instance_count = instances.len() as u32;
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = helpers::create_depth_texture(&self.device, width, height);
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        let light_dir = glam::Vec3::from_array(crate::constants::LIGHT_DIRECTION).normalize();
        let uniforms = SceneUniforms {
            view_proj: self.view_proj.to_cols_array_2d(),
            light_dir: [light_dir.x, light_dir.y, light_dir.z, 0.0],
            light_color: [crate::constants::DIRECTIONAL_INTENSITY; 4],
            ambient: [crate::constants::AMBIENT_INTENSITY; 4],
        };
        self.queue
            .write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(&uniforms));

        let frame = self
            .surface
            .get_current_texture()
            .map_err(|e| anyhow::anyhow!("surface error: {:?}", e))?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tour_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tour_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_bind_group(0, &self.bind_group, &[]);
            if let Some(model) = &self.model {
                pass.set_pipeline(&self.scene_pipeline);
                pass.set_vertex_buffer(0, model.vertex_buf.slice(..));
                pass.set_index_buffer(model.index_buf.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..model.index_count, 0, 0..1);
            }
            if self.ring_instance_count > 0 {
                pass.set_pipeline(&self.ring_pipeline);
                pass.set_vertex_buffer(0, self.ring_vertex_buf.slice(..));
                pass.set_vertex_buffer(1, self.ring_instance_buf.slice(..));
                pass.draw(0..self.ring_vertex_count, 0..self.ring_instance_count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
