use bytemuck::Zeroable;
use glam::Vec3;

/// Sink for per-particle transforms, the simulation's only presentation seam.
///
/// The integrator calls [`update_instance`](Self::update_instance) once per
/// particle per step; the host owns all drawing-resource lifecycle. Between
/// steps the backing store has one exclusive writer (the simulation) and one
/// exclusive reader (the host).
///
/// Instanced-buffer rendering is [`InstanceBuffer`]; a per-object-mesh host
/// implements the same trait and moves its scene nodes instead.
pub trait ParticleRenderer {
    fn update_instance(&mut self, id: u32, position: Vec3, scale: f32, emissive: f32);
}

/// One instanced-draw record. 32 bytes, matches the WGSL instance layout.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Instance {
    pub position: [f32; 3],
    pub scale: f32,
    pub emissive: f32,
    _pad: [f32; 3],
}

/// Flat instance buffer for instanced-draw hosts.
///
/// The whole buffer is rewritten every step, so resizing just zero-fills.
pub struct InstanceBuffer {
    data: Vec<Instance>,
}

impl InstanceBuffer {
    pub fn new(count: usize) -> Self {
        Self {
            data: vec![Instance::zeroed(); count],
        }
    }

    pub fn resize(&mut self, count: usize) {
        self.data = vec![Instance::zeroed(); count];
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[Instance] {
        &self.data
    }

    /// Raw bytes for direct GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

impl ParticleRenderer for InstanceBuffer {
    fn update_instance(&mut self, id: u32, position: Vec3, scale: f32, emissive: f32) {
        self.data[id as usize] = Instance {
            position: position.to_array(),
            scale,
            emissive,
            _pad: [0.0; 3],
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_record_is_32_bytes() {
        assert_eq!(std::mem::size_of::<Instance>(), 32);
    }

    #[test]
    fn buffer_records_updates() {
        let mut buf = InstanceBuffer::new(3);
        buf.update_instance(1, Vec3::new(1.0, 2.0, 3.0), 0.8, 0.5);
        let inst = buf.as_slice()[1];
        assert_eq!(inst.position, [1.0, 2.0, 3.0]);
        assert_eq!(inst.scale, 0.8);
        assert_eq!(inst.emissive, 0.5);
        assert_eq!(buf.as_bytes().len(), 3 * 32);
    }
}
