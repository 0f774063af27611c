//! Typed GPU-visible buffers with update-in-place semantics.
//!
//! A [`GpuBuffer`] is allocated once from initial contents and then
//! refilled in place on parameter edits. Updates never patch subranges:
//! the whole logical content is rewritten each time, so in-flight GPU
//! reads of previous contents are never mixed with new data. Capacity
//! only grows; an update larger than the current capacity reallocates
//! rather than trapping.

use std::marker::PhantomData;

use wgpu::util::DeviceExt;

use crate::error::ResourceError;

/// Capacity (in elements) after an update of `needed` elements against a
/// buffer currently holding `current` elements of capacity.
///
/// Doubles on growth so interactive edits that oscillate around a size
/// don't reallocate every time; never shrinks.
#[must_use]
pub(crate) const fn grown_capacity(current: usize, needed: usize) -> usize {
    if needed <= current {
        current
    } else {
        let doubled = current.saturating_mul(2);
        if needed > doubled {
            needed
        } else {
            doubled
        }
    }
}

/// A typed GPU buffer owning one device-visible block.
///
/// The element stride is fixed at `size_of::<T>()` for the buffer's
/// lifetime. `len` is the logical element count (what a draw binds);
/// `capacity` is the allocated element count (`len <= capacity` always).
pub struct GpuBuffer<T: bytemuck::Pod> {
    buffer: wgpu::Buffer,
    len: usize,
    capacity: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> GpuBuffer<T> {
    /// Allocate a buffer sized and filled from `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for a zero-element allocation or one
    /// exceeding the device's `max_buffer_size` limit.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Result<Self, ResourceError> {
        let buffer = Self::allocate(device, label, data, usage)?;
        Ok(Self {
            buffer,
            len: data.len(),
            capacity: data.len(),
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        })
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Result<wgpu::Buffer, ResourceError> {
        if data.is_empty() {
            return Err(ResourceError::new(label, "zero-sized allocation"));
        }
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let max = device.limits().max_buffer_size;
        if bytes.len() as u64 > max {
            return Err(ResourceError::new(
                label,
                format!("{} bytes exceeds device limit of {max}", bytes.len()),
            ));
        }
        Ok(
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytes,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            }),
        )
    }

    /// Replace the buffer's contents with `data` (discard-and-rewrite).
    ///
    /// When `data` fits the allocated capacity the device memory is
    /// rewritten in place and the logical length updated — no
    /// reallocation. When it doesn't fit, the buffer is reallocated to
    /// at least the new count (doubling growth). Returns `true` if a
    /// reallocation happened, so callers holding bindings to the old
    /// buffer know to rebind.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if a required reallocation is rejected
    /// by the device.
    pub fn update(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> Result<bool, ResourceError> {
        if data.len() > self.capacity {
            let capacity = grown_capacity(self.capacity, data.len());
            // Allocate at the grown capacity, then write the payload.
            self.buffer = Self::allocate_raw(
                device,
                &self.label,
                capacity,
                self.usage,
            )?;
            self.capacity = capacity;
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
            self.len = data.len();
            return Ok(true);
        }

        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.len = data.len();
        Ok(false)
    }

    fn allocate_raw(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Result<wgpu::Buffer, ResourceError> {
        let size = (capacity * std::mem::size_of::<T>()) as u64;
        let max = device.limits().max_buffer_size;
        if size == 0 {
            return Err(ResourceError::new(label, "zero-sized allocation"));
        }
        if size > max {
            return Err(ResourceError::new(
                label,
                format!("{size} bytes exceeds device limit of {max}"),
            ));
        }
        Ok(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }))
    }

    /// The underlying wgpu buffer, for binding.
    #[must_use]
    pub const fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Logical element count (what a draw should cover).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// `true` if the logical element count is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated element capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Fixed element stride in bytes.
    #[must_use]
    pub const fn stride(&self) -> usize {
        std::mem::size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::grown_capacity;

    #[test]
    fn capacity_unchanged_for_smaller_or_equal_updates() {
        assert_eq!(grown_capacity(100, 100), 100);
        assert_eq!(grown_capacity(100, 50), 100);
        assert_eq!(grown_capacity(100, 0), 100);
    }

    #[test]
    fn capacity_grows_to_at_least_the_new_count() {
        assert!(grown_capacity(100, 101) >= 101);
        assert!(grown_capacity(4, 100_000) >= 100_000);
        assert!(grown_capacity(0, 1) >= 1);
    }

    #[test]
    fn growth_doubles_for_small_overshoots() {
        // An edit just past capacity shouldn't reallocate again on the
        // next small increase.
        assert_eq!(grown_capacity(100, 101), 200);
        assert_eq!(grown_capacity(200, 201), 400);
    }

    #[test]
    fn capacity_is_monotonic() {
        let mut capacity = 10;
        for needed in [5, 10, 11, 8, 40, 39, 41, 200] {
            let next = grown_capacity(capacity, needed);
            assert!(next >= capacity);
            assert!(next >= needed);
            capacity = next;
        }
    }
}
