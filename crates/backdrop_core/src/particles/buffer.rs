//! Flat position storage for one particle system

use backdrop_math::Vec3;

/// `3 * count` floats laid out as consecutive `(x, y, z)` triples
///
/// The length is fixed at construction; there is no way to grow or shrink
/// the buffer, so a tick can never reallocate it.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleBuffer {
    data: Box<[f32]>,
}

impl ParticleBuffer {
    /// Zero-filled buffer for `count` particles
    pub fn new(count: usize) -> Self {
        Self {
            data: vec![0.0; count * 3].into_boxed_slice(),
        }
    }

    /// Number of particles
    #[inline]
    pub fn count(&self) -> usize {
        self.data.len() / 3
    }

    /// Number of floats (always `3 * count`)
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Vec3 {
        let i = index * 3;
        Vec3::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: Vec3) {
        let i = index * 3;
        self.data[i] = value.x;
        self.data[i + 1] = value.y;
        self.data[i + 2] = value.z;
    }

    /// Raw floats, ready for a vertex/instance buffer upload
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.data.chunks_exact(3).map(|c| Vec3::new(c[0], c[1], c[2]))
    }

    /// True when no coordinate is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_three_times_count() {
        let buffer = ParticleBuffer::new(17);
        assert_eq!(buffer.len(), 51);
        assert_eq!(buffer.count(), 17);
        assert!(ParticleBuffer::new(0).is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut buffer = ParticleBuffer::new(3);
        buffer.set(1, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(buffer.get(1), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(&buffer.as_slice()[3..6], &[1.0, 2.0, 3.0]);
        assert_eq!(buffer.get(0), Vec3::ZERO);
    }

    #[test]
    fn test_iter_visits_every_particle() {
        let mut buffer = ParticleBuffer::new(4);
        for i in 0..4 {
            buffer.set(i, Vec3::new(i as f32, 0.0, 0.0));
        }
        let xs: Vec<f32> = buffer.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_is_finite_detects_nan() {
        let mut buffer = ParticleBuffer::new(2);
        assert!(buffer.is_finite());
        buffer.set(1, Vec3::new(0.0, f32::NAN, 0.0));
        assert!(!buffer.is_finite());
    }
}
