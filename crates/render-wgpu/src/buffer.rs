use crate::gpu::RenderError;
use bytemuck::Pod;
use glint_matrix::Matrix;
use wgpu::util::DeviceExt;

/// Convert a 4x4 row-major matrix into the column-major array a shader
/// uniform expects.
pub fn matrix_uniform(matrix: &Matrix) -> Result<[[f32; 4]; 4], RenderError> {
    if matrix.rows() != 4 || matrix.columns() != 4 {
        return Err(RenderError::UniformShape {
            rows: matrix.rows(),
            columns: matrix.columns(),
        });
    }
    let mut columns = [[0.0_f32; 4]; 4];
    for (i, row) in matrix.as_slice().chunks_exact(4).enumerate() {
        for (j, &value) in row.iter().enumerate() {
            columns[j][i] = value;
        }
    }
    Ok(columns)
}

/// Uniform buffer with its bind group, visible to both shader stages.
pub struct UniformBuffer {
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl UniformBuffer {
    pub fn new<T: Pod>(device: &wgpu::Device, label: &str, initial: &T) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(initial),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
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
            label: Some(label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            layout,
            bind_group,
        }
    }

    /// Stream a new value into the buffer. The value's layout must match the
    /// one the buffer was created with.
    pub fn write<T: Pod>(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Vertex buffer that supports streaming updates.
pub struct VertexBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

impl VertexBuffer {
    pub fn new<T: Pod>(device: &wgpu::Device, label: &str, vertices: &[T]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            buffer,
            count: vertices.len() as u32,
        }
    }

    /// Overwrite the contents. The new data must not exceed the original
    /// allocation.
    pub fn write<T: Pod>(&mut self, queue: &wgpu::Queue, vertices: &[T]) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
        self.count = vertices.len() as u32;
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Index buffer of `u16` indices.
pub struct IndexBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

impl IndexBuffer {
    pub fn new(device: &wgpu::Device, label: &str, indices: &[u16]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            buffer,
            count: indices.len() as u32,
        }
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    pub fn format(&self) -> wgpu::IndexFormat {
        wgpu::IndexFormat::Uint16
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_uniform_transposes_to_column_major() {
        let mut m = Matrix::new(4, 4).unwrap();
        m[(0, 3)] = 7.0;
        m[(2, 1)] = -3.0;

        let columns = matrix_uniform(&m).unwrap();
        assert_eq!(columns[3][0], 7.0);
        assert_eq!(columns[1][2], -3.0);
        assert_eq!(columns[0][3], 0.0);
    }

    #[test]
    fn matrix_uniform_rejects_non_4x4() {
        let m = Matrix::new(3, 3).unwrap();
        assert!(matches!(
            matrix_uniform(&m),
            Err(RenderError::UniformShape {
                rows: 3,
                columns: 3
            })
        ));
    }

    #[test]
    fn matrix_uniform_puts_translation_in_last_column() {
        let t = Matrix::translation(1.0, 2.0, 3.0).unwrap();
        let columns = matrix_uniform(&t).unwrap();
        assert_eq!(columns[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
