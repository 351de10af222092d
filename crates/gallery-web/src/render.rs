use gallery_core::scene::{DrawItem, Glyph, NodeId, TextureId};
use gallery_core::{
    mirror_matrix, Gallery, TextureState, AMBIENT_LIGHT, ARTWORK_FALLBACK_COLOR, CLEAR_COLOR,
    REFLECTOR_STRENGTH,
};
use glam::{Mat4, Vec3};
use web_sys as web;
use wgpu;
use wgpu::util::DeviceExt;

pub mod helpers;
pub mod mesh;
mod targets;

use targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    mirror: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light_pos: [f32; 4],
    light_dir: [f32; 4],
    light_params: [f32; 4],
    light_color: [f32; 4],
    screen: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MeshUniforms {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
    color: [f32; 4],
    flags: [f32; 4],
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, data: &mesh::MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }

    fn draw<'p>(&self, rpass: &mut wgpu::RenderPass<'p>) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// GPU resources for one scene mesh.
struct MeshDraw {
    node: NodeId,
    texture: Option<TextureId>,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    textured: bool,
}

struct FloorDraw {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    format: wgpu::TextureFormat,

    mesh_pipeline: wgpu::RenderPipeline,
    floor_pipeline: wgpu::RenderPipeline,
    mesh_bgl: wgpu::BindGroupLayout,
    linear_sampler: wgpu::Sampler,

    main_globals: wgpu::Buffer,
    main_globals_bg: wgpu::BindGroup,
    mirror_globals: wgpu::Buffer,
    mirror_globals_bg: wgpu::BindGroup,

    cube: GpuMesh,
    quad: GpuMesh,
    fallback_view: wgpu::TextureView,
    artwork_views: Vec<Option<wgpu::TextureView>>,
    texture_generation: Option<u64>,

    draws: Vec<MeshDraw>,
    floor: Option<FloorDraw>,
    targets: RenderTargets,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        reflection_size: (u32, u32),
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

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
                    // Default limits keep older WebGPU implementations happy
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
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
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
            label: Some("gallery_shader"),
            source: wgpu::ShaderSource::Wgsl(gallery_core::GALLERY_WGSL.into()),
        });

        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
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
        let mesh_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    // uniforms
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    // tex
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    // sampler
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("gallery_pl"),
            bind_group_layouts: &[&globals_bgl, &mesh_bgl],
            push_constant_ranges: &[],
        });
        let mesh_pipeline = helpers::make_mesh_pipeline(
            &device,
            "mesh_pipeline",
            &pipeline_layout,
            &shader,
            "vs_main",
            "fs_main",
            format,
        );
        let floor_pipeline = helpers::make_mesh_pipeline(
            &device,
            "floor_pipeline",
            &pipeline_layout,
            &shader,
            "vs_floor",
            "fs_floor",
            format,
        );

        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let make_globals = |label: &str| {
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<Globals>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &globals_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            (buffer, bg)
        };
        let (main_globals, main_globals_bg) = make_globals("main_globals");
        let (mirror_globals, mirror_globals_bg) = make_globals("mirror_globals");

        let cube = GpuMesh::upload(&device, "unit_cube", &mesh::unit_cube());
        let quad = GpuMesh::upload(&device, "unit_quad", &mesh::unit_quad());

        // 1x1 white texture bound wherever no artwork is available
        let white = gallery_core::DecodedImage {
            width: 1,
            height: 1,
            rgba: vec![255, 255, 255, 255],
        };
        let (_, fallback_view) = helpers::upload_rgba_texture(&device, &queue, "fallback", &white);

        let targets = RenderTargets::new(&device, format, width, height, reflection_size);

        log::info!(
            "[gpu] surface {}x{} format={:?} reflection={}x{}",
            width,
            height,
            format,
            reflection_size.0,
            reflection_size.1
        );

        let [r, g, b] = CLEAR_COLOR;
        let mut state = Self {
            surface,
            device,
            queue,
            config,
            format,
            mesh_pipeline,
            floor_pipeline,
            mesh_bgl,
            linear_sampler,
            main_globals,
            main_globals_bg,
            mirror_globals,
            mirror_globals_bg,
            cube,
            quad,
            fallback_view,
            artwork_views: Vec::new(),
            texture_generation: None,
            draws: Vec::new(),
            floor: None,
            targets,
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        };
        state.rebuild_floor_bind_group();
        Ok(state)
    }

    /// Reconfigure the surface and size-dependent targets when either size changed.
    pub fn resize_if_needed(&mut self, width: u32, height: u32, reflection_size: (u32, u32)) {
        if width == 0 || height == 0 || reflection_size.0 == 0 || reflection_size.1 == 0 {
            return;
        }
        if width == self.width
            && height == self.height
            && reflection_size == self.targets.reflection_size
        {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets
            .recreate(&self.device, self.format, width, height, reflection_size);
        // The floor samples the reflection view, which was just replaced
        self.rebuild_floor_bind_group();
        log::info!(
            "[gpu] resized to {}x{} reflection={}x{}",
            width,
            height,
            reflection_size.0,
            reflection_size.1
        );
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, gallery: &Gallery) -> Result<(), wgpu::SurfaceError> {
        self.sync_textures(gallery);
        let items = gallery.scene().draw_list();
        self.ensure_draws(&items);
        self.write_mesh_uniforms(&items);
        self.write_floor_uniforms(gallery);
        self.write_globals(gallery);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: mirrored scene into the reflection target
        {
            let mut rpass = self.begin_pass(
                &mut encoder,
                "reflection_pass",
                &self.targets.reflection_view,
                &self.targets.reflection_depth_view,
            );
            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_bind_group(0, &self.mirror_globals_bg, &[]);
            for d in &self.draws {
                rpass.set_bind_group(1, &d.bind_group, &[]);
                self.cube.draw(&mut rpass);
            }
        }

        // Pass 2: scene then floor into the swapchain
        {
            let mut rpass =
                self.begin_pass(&mut encoder, "scene_pass", &view, &self.targets.depth_view);
            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_bind_group(0, &self.main_globals_bg, &[]);
            for d in &self.draws {
                rpass.set_bind_group(1, &d.bind_group, &[]);
                self.cube.draw(&mut rpass);
            }
            if let Some(floor) = &self.floor {
                rpass.set_pipeline(&self.floor_pipeline);
                rpass.set_bind_group(1, &floor.bind_group, &[]);
                self.quad.draw(&mut rpass);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl<'a> GpuState<'a> {
    fn begin_pass<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        label: &str,
        target: &wgpu::TextureView,
        depth: &wgpu::TextureView,
    ) -> wgpu::RenderPass<'e> {
        encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            })
    }

    /// Upload artwork that finished loading since the last frame.
    fn sync_textures(&mut self, gallery: &Gallery) {
        let textures = gallery.textures();
        if self.texture_generation == Some(textures.generation()) {
            return;
        }
        self.texture_generation = Some(textures.generation());
        if self.artwork_views.len() != textures.len() {
            self.artwork_views.resize_with(textures.len(), || None);
        }
        for (id, state) in textures.iter() {
            let Some(img) = state.image() else {
                if let TextureState::Failed(_) = state {
                    log::debug!("[gpu] artwork-{} stays on the fallback color", id.0);
                }
                continue;
            };
            if self.artwork_views[id.0].is_some() {
                continue;
            }
            let max_edge = self.device.limits().max_texture_dimension_2d;
            if img.width > max_edge || img.height > max_edge {
                log::warn!(
                    "[gpu] artwork-{} is {}x{}, over the device limit {}; keeping the fallback color",
                    id.0,
                    img.width,
                    img.height,
                    max_edge
                );
                continue;
            }
            let label = format!("artwork-{}", id.0);
            let (_, view) = helpers::upload_rgba_texture(&self.device, &self.queue, &label, img);
            self.artwork_views[id.0] = Some(view);
            log::debug!("[gpu] uploaded {} ({}x{})", label, img.width, img.height);
        }
        // Rebind any draw whose texture just became available
        for i in 0..self.draws.len() {
            let wants = self.draws[i]
                .texture
                .is_some_and(|t| self.artwork_views.get(t.0).is_some_and(|v| v.is_some()));
            if wants && !self.draws[i].textured {
                let texture = self.draws[i].texture;
                self.draws[i].bind_group =
                    self.mesh_bind_group(&self.draws[i].uniform_buffer, texture);
                self.draws[i].textured = true;
            }
        }
    }

    fn artwork_view(&self, texture: Option<TextureId>) -> Option<&wgpu::TextureView> {
        texture.and_then(|t| self.artwork_views.get(t.0)).and_then(|v| v.as_ref())
    }

    fn mesh_bind_group(
        &self,
        uniform_buffer: &wgpu::Buffer,
        texture: Option<TextureId>,
    ) -> wgpu::BindGroup {
        let view = self.artwork_view(texture).unwrap_or(&self.fallback_view);
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_bg"),
            layout: &self.mesh_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.linear_sampler),
                },
            ],
        })
    }

    fn create_uniform_buffer(&self, label: &str) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<MeshUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// The scene layout is fixed after build, so draws are created once and
    /// only rebuilt if the mesh set changes.
    fn ensure_draws(&mut self, items: &[DrawItem]) {
        let same = self.draws.len() == items.len()
            && self.draws.iter().zip(items).all(|(d, it)| d.node == it.node);
        if same {
            return;
        }
        let mut draws = Vec::with_capacity(items.len());
        for it in items {
            let uniform_buffer = self.create_uniform_buffer("mesh_uniforms");
            let texture = it.mesh.material.texture;
            let bind_group = self.mesh_bind_group(&uniform_buffer, texture);
            draws.push(MeshDraw {
                node: it.node,
                texture,
                textured: self.artwork_view(texture).is_some(),
                uniform_buffer,
                bind_group,
            });
        }
        log::debug!("[gpu] prepared {} mesh draws", draws.len());
        self.draws = draws;
    }

    fn write_mesh_uniforms(&self, items: &[DrawItem]) {
        for (d, it) in self.draws.iter().zip(items) {
            let material = it.mesh.material;
            let color = if material.texture.is_some() && !d.textured {
                ARTWORK_FALLBACK_COLOR
            } else {
                material.color
            };
            let glyph = match material.glyph {
                Glyph::None => 0.0,
                Glyph::ChevronLeft => 1.0,
                Glyph::ChevronRight => 2.0,
            };
            let u = MeshUniforms {
                model: (it.world * Mat4::from_scale(it.mesh.geometry.unit_scale())).to_cols_array_2d(),
                normal: it.world.to_cols_array_2d(),
                color: [color[0], color[1], color[2], 1.0],
                flags: [if d.textured { 1.0 } else { 0.0 }, glyph, 0.0, 0.0],
            };
            self.queue
                .write_buffer(&d.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
    }

    fn rebuild_floor_bind_group(&mut self) {
        let uniform_buffer = match self.floor.take() {
            Some(f) => f.uniform_buffer,
            None => self.create_uniform_buffer("floor_uniforms"),
        };
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("floor_bg"),
            layout: &self.mesh_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&self.targets.reflection_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.linear_sampler),
                },
            ],
        });
        self.floor = Some(FloorDraw {
            uniform_buffer,
            bind_group,
        });
    }

    fn write_floor_uniforms(&self, gallery: &Gallery) {
        let (Some(floor), Some(reflector)) = (&self.floor, gallery.reflector()) else {
            return;
        };
        let world = gallery.scene().world_matrix(gallery.reflector_node());
        let scale = Vec3::new(reflector.radius * 2.0, reflector.radius * 2.0, 1.0);
        let c = reflector.color;
        let u = MeshUniforms {
            model: (world * Mat4::from_scale(scale)).to_cols_array_2d(),
            normal: world.to_cols_array_2d(),
            color: [c[0], c[1], c[2], 1.0],
            flags: [0.0; 4],
        };
        self.queue
            .write_buffer(&floor.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    fn write_globals(&self, gallery: &Gallery) {
        let camera = gallery.camera();
        let view_proj = camera.view_proj();
        let (light_pos, light_dir, light_params) = match gallery.scene().spot_lights().first() {
            Some((_, pos, light)) => {
                let dir = (light.target - *pos).normalize_or_zero();
                let cos_outer = light.angle.cos();
                let cos_inner = (light.angle * (1.0 - light.penumbra)).cos();
                (
                    [pos.x, pos.y, pos.z, light.intensity],
                    [dir.x, dir.y, dir.z, light.distance],
                    [cos_outer, cos_inner, light.decay, AMBIENT_LIGHT],
                )
            }
            None => ([0.0; 4], [0.0, -1.0, 0.0, 1.0], [1.0, 1.0, 2.0, AMBIENT_LIGHT]),
        };
        let floor_y = gallery
            .scene()
            .world_position(gallery.reflector_node())
            .y;
        let mut globals = Globals {
            view_proj: view_proj.to_cols_array_2d(),
            mirror: Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [camera.eye.x, camera.eye.y, camera.eye.z, 1.0],
            light_pos,
            light_dir,
            light_params,
            light_color: [1.0, 1.0, 1.0, 1.0],
            screen: [
                self.width as f32,
                self.height as f32,
                REFLECTOR_STRENGTH,
                0.0,
            ],
        };
        self.queue
            .write_buffer(&self.main_globals, 0, bytemuck::bytes_of(&globals));
        globals.mirror = mirror_matrix(floor_y).to_cols_array_2d();
        self.queue
            .write_buffer(&self.mirror_globals, 0, bytemuck::bytes_of(&globals));
    }
}
