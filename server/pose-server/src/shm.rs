//! Read-only access to caller-owned shared-memory regions.
//!
//! Regions are plain files under the shm directory (`/dev/shm` on Linux);
//! the external caller creates and removes them. The wire format is
//! little-endian: vertices as `f32` `[x, y, z]` triples, edges as `u32`
//! index pairs, objects concatenated back to back.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use memmap2::Mmap;
use nalgebra::Point3;

const VERTEX_STRIDE: usize = 3 * std::mem::size_of::<f32>();
const EDGE_STRIDE: usize = 2 * std::mem::size_of::<u32>();

/// A mapped shared-memory region.
pub struct SharedRegion {
    map: Mmap,
}

impl SharedRegion {
    /// Map the named region under `dir` read-only.
    ///
    /// Names must be bare file names; anything resembling a path is
    /// rejected.
    pub fn open(dir: &Path, name: &str) -> Result<Self> {
        if name.is_empty() || name.contains('/') || name.contains("..") {
            bail!("invalid shared memory name {name:?}");
        }
        let path = dir.join(name);
        let file =
            File::open(&path).with_context(|| format!("shared memory region {name:?} not found"))?;
        // SAFETY: the region is mapped read-only and the caller contract
        // is that the producer does not mutate it while a request that
        // references it is in flight.
        let map = unsafe { Mmap::map(&file) }
            .with_context(|| format!("failed to map shared memory region {name:?}"))?;
        Ok(Self { map })
    }

    /// Decode `count` vertices from the front of the region.
    pub fn vertices(&self, count: usize) -> Result<Vec<Point3<f64>>> {
        let bytes = self.take(count, VERTEX_STRIDE, "vertex")?;
        let mut vertices = Vec::with_capacity(count);
        for triple in bytes.chunks_exact(VERTEX_STRIDE) {
            let x = f32::from_le_bytes([triple[0], triple[1], triple[2], triple[3]]);
            let y = f32::from_le_bytes([triple[4], triple[5], triple[6], triple[7]]);
            let z = f32::from_le_bytes([triple[8], triple[9], triple[10], triple[11]]);
            vertices.push(Point3::new(f64::from(x), f64::from(y), f64::from(z)));
        }
        Ok(vertices)
    }

    /// Decode `count` edge index pairs from the front of the region.
    pub fn edges(&self, count: usize) -> Result<Vec<[u32; 2]>> {
        let bytes = self.take(count, EDGE_STRIDE, "edge")?;
        let mut edges = Vec::with_capacity(count);
        for pair in bytes.chunks_exact(EDGE_STRIDE) {
            let a = u32::from_le_bytes([pair[0], pair[1], pair[2], pair[3]]);
            let b = u32::from_le_bytes([pair[4], pair[5], pair[6], pair[7]]);
            edges.push([a, b]);
        }
        Ok(edges)
    }

    fn take(&self, count: usize, stride: usize, what: &str) -> Result<&[u8]> {
        let needed = count
            .checked_mul(stride)
            .context("byte count overflows usize")?;
        if self.map.len() < needed {
            bail!(
                "shared memory region too small: {} bytes for {count} {what} entries, have {}",
                needed,
                self.map.len()
            );
        }
        Ok(&self.map[..needed])
    }
}
