use crate::helpers::{create_depth_texture, create_uniform_buffer, make_mesh_pipeline, uniform_layout_entry};
use crate::mesh::GpuMesh;
use crate::skybox::{create_skybox_resources, SkyboxResources};
use crate::uniforms::{clear_color, pedestal_color, SceneUniforms, SkyUniforms};
use glam::Mat4;
use showcase_core::{pedestal_meshes, AssetKey, CubeFaces, FrameSink, FrameSnapshot, ModelData, Rgb};

pub struct GpuState<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    view_format: wgpu::TextureFormat,
    depth_view: wgpu::TextureView,

    scene_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    object_bgl: wgpu::BindGroupLayout,
    opaque_pipeline: wgpu::RenderPipeline,
    glass_pipeline: wgpu::RenderPipeline,

    pedestal: Vec<GpuMesh>,
    product: Vec<GpuMesh>,
    case: Vec<GpuMesh>,
    skybox: Option<SkyboxResources>,

    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    /// `surface` must have been created from `instance`.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'w>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
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
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // WebGPU canvases only offer non-sRGB formats; render through an sRGB view.
        let view_format = format.add_srgb_suffix();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let (_, depth_view) = create_depth_texture(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SCENE_WGSL.into()),
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[uniform_layout_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[uniform_layout_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let scene_uniform_buffer = create_uniform_buffer::<SceneUniforms>(&device, "scene_uniforms");
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&scene_bgl, &object_bgl],
            push_constant_ranges: &[],
        });
        let opaque_pipeline = make_mesh_pipeline(
            &device,
            "opaque_pipeline",
            &pl,
            &shader,
            "fs_lit",
            view_format,
            Some(wgpu::BlendState::REPLACE),
            true,
            Some(wgpu::Face::Back),
        );
        let glass_pipeline = make_mesh_pipeline(
            &device,
            "glass_pipeline",
            &pl,
            &shader,
            "fs_glass",
            view_format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
            None,
        );

        let pedestal = pedestal_meshes(Rgb::default())
            .iter()
            .enumerate()
            .map(|(i, m)| GpuMesh::upload(&device, &object_bgl, &format!("pedestal_{i}"), m))
            .collect();

        log::info!("[render] surface {width}x{height} {format:?}");
        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            depth_view,
            scene_uniform_buffer,
            scene_bind_group,
            object_bgl,
            opaque_pipeline,
            glass_pipeline,
            pedestal,
            product: Vec::new(),
            case: Vec::new(),
            skybox: None,
            width,
            height,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Uploads a loaded model into the slot named by `key`, replacing any
    /// previous one.
    pub fn attach_model(&mut self, key: AssetKey, model: &ModelData) {
        let meshes: Vec<GpuMesh> = model
            .meshes
            .iter()
            .enumerate()
            .map(|(i, m)| GpuMesh::upload(&self.device, &self.object_bgl, &format!("{key:?}_{i}"), m))
            .collect();
        log::info!("[render] uploaded {key:?}: {} mesh(es)", meshes.len());
        match key {
            AssetKey::Product => self.product = meshes,
            AssetKey::Case => self.case = meshes,
            AssetKey::Environment | AssetKey::Narration => {
                log::warn!("[render] {key:?} has no mesh slot");
            }
        }
    }

    pub fn set_environment(&mut self, faces: &CubeFaces) {
        self.skybox = Some(create_skybox_resources(
            &self.device,
            &self.queue,
            self.view_format,
            faces,
        ));
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (_, view) = create_depth_texture(&self.device, width, height);
            self.depth_view = view;
        }
    }

    /// Reconfigures the surface at its current size after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, frame: &FrameSnapshot) -> Result<(), wgpu::SurfaceError> {
        self.queue.write_buffer(
            &self.scene_uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::from_snapshot(frame)),
        );
        let pedestal = pedestal_color(frame);
        for mesh in &self.pedestal {
            mesh.write_uniforms(&self.queue, Mat4::IDENTITY, pedestal);
        }
        if let Some(model) = frame.product {
            for mesh in &self.product {
                mesh.write_uniforms(&self.queue, model, mesh.base_color);
            }
        }
        if let Some(model) = frame.case {
            for mesh in &self.case {
                mesh.write_uniforms(&self.queue, model, mesh.base_color);
            }
        }
        if let Some(sky) = &self.skybox {
            self.queue.write_buffer(
                &sky.uniform_buffer,
                0,
                bytemuck::bytes_of(&SkyUniforms::from_snapshot(frame)),
            );
        }

        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let [r, g, b, a] = clear_color(frame);
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
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

            if let Some(sky) = &self.skybox {
                rpass.set_pipeline(&sky.pipeline);
                rpass.set_bind_group(0, &sky.bind_group, &[]);
                rpass.draw(0..3, 0..1);
            }

            rpass.set_pipeline(&self.opaque_pipeline);
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            for mesh in &self.pedestal {
                mesh.draw(&mut rpass);
            }
            if frame.product.is_some() {
                for mesh in &self.product {
                    mesh.draw(&mut rpass);
                }
            }

            if frame.case.is_some() && !self.case.is_empty() {
                rpass.set_pipeline(&self.glass_pipeline);
                rpass.set_bind_group(0, &self.scene_bind_group, &[]);
                for mesh in &self.case {
                    mesh.draw(&mut rpass);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl FrameSink for GpuState<'_> {
    type Error = wgpu::SurfaceError;

    fn present(&mut self, frame: &FrameSnapshot) -> Result<(), Self::Error> {
        self.render(frame)
    }
}
