use super::SurfaceError;
use crate::core::geometry;
use crate::core::shapes::{Material, MeshId, Transform};
use crate::core::{Camera, DrawSurface, SceneBackend, ShapeKind, Viewport};
use crate::dom;
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;
use web_sys as web;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MeshUniforms {
    mvp: [[f32; 4]; 4],
    main_color: [f32; 4],
    // rgb + intensity in w
    emissive: [f32; 4],
    // x: opacity
    params: [f32; 4],
}

struct GpuMesh {
    vertices: wgpu::Buffer,
    vertex_count: u32,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    material: Material,
    model: Mat4,
}

/// Retained wireframe scene on a WebGPU canvas.
pub struct GpuScene {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    meshes: Vec<GpuMesh>,
}

impl GpuScene {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(SurfaceError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("backdrop_device"),
                },
                None,
            )
            .await
            .map_err(|e| SurfaceError::Device(format!("{:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(SurfaceError::NoFormat)?;
        // Topmost backdrop layer; composites over the 2D layers beneath it.
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("wireframe_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::WIREFRAME_WGSL.into()),
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("wireframe_bgl"),
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
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("wireframe_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("wireframe_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vec3>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        log::info!(
            "[shapes] WebGPU ready {}x{} {:?} {:?}",
            width,
            height,
            format,
            alpha_mode
        );
        Ok(Self {
            canvas: canvas.clone(),
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group_layout,
            meshes: Vec::new(),
        })
    }

    fn reconfigure(&mut self) {
        let w = self.canvas.width().max(1);
        let h = self.canvas.height().max(1);
        if w == self.config.width && h == self.config.height {
            return;
        }
        self.config.width = w;
        self.config.height = h;
        self.surface.configure(&self.device, &self.config);
    }

    fn uniforms(mesh: &GpuMesh, view_proj: Mat4) -> MeshUniforms {
        let main = mesh.material.colors.main.to_rgb();
        let emissive = mesh.material.colors.emissive.to_rgb();
        MeshUniforms {
            mvp: (view_proj * mesh.model).to_cols_array_2d(),
            main_color: [main[0], main[1], main[2], 1.0],
            emissive: [
                emissive[0],
                emissive[1],
                emissive[2],
                mesh.material.emissive_intensity,
            ],
            params: [mesh.material.opacity.clamp(0.0, 1.0), 0.0, 0.0, 0.0],
        }
    }
}

impl DrawSurface for GpuScene {
    fn resize(&mut self, viewport: Viewport) {
        dom::size_canvas(&self.canvas, viewport, dom::device_pixel_ratio());
        self.reconfigure();
    }
}

impl SceneBackend for GpuScene {
    fn create_mesh(&mut self, kind: ShapeKind, material: &Material) -> MeshId {
        let wire = geometry::build(kind);
        let vertices = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("wireframe_vertices"),
                contents: bytemuck::cast_slice(&wire.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let uniforms = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("wireframe_uniforms"),
            size: std::mem::size_of::<MeshUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("wireframe_bg"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });
        self.meshes.push(GpuMesh {
            vertices,
            vertex_count: wire.vertices.len() as u32,
            uniforms,
            bind_group,
            material: *material,
            model: Mat4::IDENTITY,
        });
        log::info!(
            "[shapes] mesh {:?}: {} segments",
            kind,
            wire.segment_count()
        );
        self.meshes.len() - 1
    }

    fn set_transform(&mut self, mesh: MeshId, transform: &Transform) {
        if !transform.is_finite() {
            return;
        }
        if let Some(m) = self.meshes.get_mut(mesh) {
            m.model = transform.matrix();
        }
    }

    fn render(&mut self, camera: &Camera) {
        let view_proj = camera.view_projection();
        for mesh in &self.meshes {
            let u = Self::uniforms(mesh, view_proj);
            self.queue.write_buffer(&mesh.uniforms, 0, bytemuck::bytes_of(&u));
        }

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                log::error!("[shapes] surface error: {:?}", e);
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("wireframe_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("wireframe_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            for mesh in &self.meshes {
                rpass.set_bind_group(0, &mesh.bind_group, &[]);
                rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
                rpass.draw(0..mesh.vertex_count, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
    }
}
