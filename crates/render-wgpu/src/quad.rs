use crate::buffer::{IndexBuffer, UniformBuffer, VertexBuffer, matrix_uniform};
use crate::gpu::RenderError;
use crate::shaders;
use crate::texture::Texture2d;
use bytemuck::{Pod, Zeroable};
use glint_matrix::Matrix;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct QuadUniforms {
    mvp: [[f32; 4]; 4],
    tint: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    position: [f32; 2],
    uv: [f32; 2],
}

const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Unit quad centered on the origin.
fn quad_mesh() -> ([QuadVertex; 4], [u16; 6]) {
    #[rustfmt::skip]
    let vertices = [
        QuadVertex { position: [-0.5,  0.5], uv: [0.0, 0.0] },
        QuadVertex { position: [-0.5, -0.5], uv: [0.0, 1.0] },
        QuadVertex { position: [ 0.5, -0.5], uv: [1.0, 1.0] },
        QuadVertex { position: [ 0.5,  0.5], uv: [1.0, 0.0] },
    ];
    let indices = [0, 1, 2, 0, 2, 3];
    (vertices, indices)
}

/// Checkerboard pixels for the quad's default texture.
fn checker_pixels(size: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let value = if (x + y) % 2 == 0 { 255 } else { 180 };
            pixels.extend_from_slice(&[value, value, value, 255]);
        }
    }
    pixels
}

/// Renders one transformed quad per frame, the transform coming from
/// glint-matrix.
pub struct QuadRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: VertexBuffer,
    index_buffer: IndexBuffer,
    uniforms: UniformBuffer,
    texture: Texture2d,
}

impl QuadRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let uniforms = UniformBuffer::new(
            device,
            "quad_uniforms",
            &QuadUniforms {
                mvp: IDENTITY,
                tint: [1.0, 1.0, 1.0, 1.0],
            },
        );

        let texture = Texture2d::from_rgba8(
            device,
            queue,
            "quad_texture",
            8,
            8,
            &checker_pixels(8),
            wgpu::AddressMode::ClampToEdge,
            wgpu::FilterMode::Nearest,
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quad_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::QUAD_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("quad_pipeline_layout"),
            bind_group_layouts: &[uniforms.layout(), texture.layout()],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quad_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<QuadVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x2,
                        1 => Float32x2,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let (vertices, indices) = quad_mesh();
        let vertex_buffer = VertexBuffer::new(device, "quad_vertices", vertices.as_slice());
        let index_buffer = IndexBuffer::new(device, "quad_indices", indices.as_slice());

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            uniforms,
            texture,
        }
    }

    /// Render one frame: clear to black and draw the quad under `mvp`.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        mvp: &Matrix,
        tint: [f32; 4],
    ) -> Result<(), RenderError> {
        self.uniforms.write(
            queue,
            &QuadUniforms {
                mvp: matrix_uniform(mvp)?,
                tint,
            },
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("quad_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("quad_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, self.uniforms.bind_group(), &[]);
            pass.set_bind_group(1, self.texture.bind_group(), &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice());
            pass.set_index_buffer(self.index_buffer.slice(), self.index_buffer.format());
            pass.draw_indexed(0..self.index_buffer.count(), 0, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_uniform_layouts_match_shader_contract() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 16);
        assert_eq!(std::mem::size_of::<QuadUniforms>(), 80);
    }

    #[test]
    fn quad_mesh_indices_stay_in_range() {
        let (vertices, indices) = quad_mesh();
        assert_eq!(vertices.len(), 4);
        assert_eq!(indices.len(), 6);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn checker_pixels_cover_texture_and_are_opaque() {
        let pixels = checker_pixels(8);
        assert_eq!(pixels.len(), 8 * 8 * 4);
        assert!(pixels.chunks_exact(4).all(|p| p[3] == 255));
    }
}
