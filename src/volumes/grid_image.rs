// Copyright @yucwang 2026

use crate::core::volume::{check_direction, ImageVolume};
use crate::math::constants::{Float, Index3, Matrix3f, Vector3f};
use std::fs;

/// Dense scalar image, x fastest then y then z.
pub struct GridImage {
    data: Vec<Float>,
    size: Index3,
    spacing: Vector3f,
    origin: Vector3f,
    direction: Matrix3f,
}

impl GridImage {
    pub fn new(size: Index3, data: Vec<Float>) -> Result<Self, String> {
        let expected = size[0]
            .checked_mul(size[1])
            .and_then(|v| v.checked_mul(size[2]))
            .ok_or_else(|| "image dimensions overflow".to_string())?;
        if data.len() != expected {
            return Err(format!("image data has {} values, expected {}", data.len(), expected));
        }

        Ok(Self {
            data,
            size,
            spacing: Vector3f::new(1.0, 1.0, 1.0),
            origin: Vector3f::zeros(),
            direction: Matrix3f::identity(),
        })
    }

    pub fn filled(size: Index3, value: Float) -> Self {
        Self::from_fn(size, |_| value)
    }

    pub fn from_fn<F: Fn(Index3) -> Float>(size: Index3, f: F) -> Self {
        let mut data = Vec::with_capacity(size[0] * size[1] * size[2]);
        for z in 0..size[2] {
            for y in 0..size[1] {
                for x in 0..size[0] {
                    data.push(f([x, y, z]));
                }
            }
        }

        Self {
            data,
            size,
            spacing: Vector3f::new(1.0, 1.0, 1.0),
            origin: Vector3f::zeros(),
            direction: Matrix3f::identity(),
        }
    }

    /// Load a single channel `VOL` v3 grid. The file's bounding box encloses
    /// the voxel cells, so the origin sits at the centre of the first cell.
    pub fn from_file(path: &str) -> Result<Self, String> {
        log::info!("Starting reading volume from: {}.", path);
        let bytes = fs::read(path).map_err(|e| format!("failed to read {}: {}", path, e))?;
        let mut cursor = 4usize;

        if bytes.len() < 4 {
            return Err("vol file too small".to_string());
        }
        if &bytes[0..3] != b"VOL" {
            return Err("invalid vol header".to_string());
        }
        let version = bytes[3];
        if version != 3 {
            return Err(format!("unsupported vol version: {}", version));
        }

        let encoding = read_i32(&bytes, &mut cursor)?;
        let xres = read_i32(&bytes, &mut cursor)?;
        let yres = read_i32(&bytes, &mut cursor)?;
        let zres = read_i32(&bytes, &mut cursor)?;
        let channels = read_i32(&bytes, &mut cursor)?;

        if encoding != 1 {
            return Err(format!("unsupported vol encoding: {}", encoding));
        }
        if xres <= 0 || yres <= 0 || zres <= 0 {
            return Err("vol dimensions must be positive".to_string());
        }
        if channels != 1 {
            return Err(format!("only scalar volumes are supported, got {} channels", channels));
        }

        let mut p_min = Vector3f::zeros();
        let mut p_max = Vector3f::zeros();
        for idx in 0..3 {
            p_min[idx] = read_f32(&bytes, &mut cursor)?;
        }
        for idx in 0..3 {
            p_max[idx] = read_f32(&bytes, &mut cursor)?;
        }

        let size = [xres as usize, yres as usize, zres as usize];
        let mut spacing = Vector3f::zeros();
        for idx in 0..3 {
            let extent = p_max[idx] - p_min[idx];
            if extent <= 0.0 {
                return Err("vol bounding box must have a positive extent".to_string());
            }
            spacing[idx] = extent / size[idx] as Float;
        }

        let expected = size[0]
            .checked_mul(size[1])
            .and_then(|v| v.checked_mul(size[2]))
            .ok_or_else(|| "vol dimensions overflow".to_string())?;
        let available = bytes.len() - cursor;
        match expected.checked_mul(4) {
            Some(needed) if needed <= available => {}
            _ => {
                return Err(format!(
                    "vol data truncated: {} voxels declared, {} bytes available", expected, available));
            }
        }
        let mut data = Vec::with_capacity(expected);
        for _ in 0..expected {
            data.push(read_f32(&bytes, &mut cursor)?);
        }

        log::info!("Volume loaded, size = {}x{}x{}.", size[0], size[1], size[2]);
        let mut image = Self::new(size, data)?;
        image.set_spacing(spacing);
        image.set_origin(p_min + spacing * 0.5);
        Ok(image)
    }

    pub fn set_spacing(&mut self, spacing: Vector3f) {
        self.spacing = spacing;
    }

    pub fn set_origin(&mut self, origin: Vector3f) {
        self.origin = origin;
    }

    pub fn set_direction(&mut self, direction: Matrix3f) -> Result<(), String> {
        check_direction(&direction)?;
        self.direction = direction;
        Ok(())
    }

    pub fn with_spacing(mut self, spacing: Vector3f) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_origin(mut self, origin: Vector3f) -> Self {
        self.origin = origin;
        self
    }

    pub fn data(&self) -> &[Float] {
        &self.data
    }

    fn linear_index(&self, index: Index3) -> usize {
        (index[2] * self.size[1] + index[1]) * self.size[0] + index[0]
    }
}

impl ImageVolume for GridImage {
    fn size(&self) -> Index3 {
        self.size
    }

    fn spacing(&self) -> Vector3f {
        self.spacing
    }

    fn origin(&self) -> Vector3f {
        self.origin
    }

    fn direction(&self) -> Matrix3f {
        self.direction
    }

    fn value(&self, index: Index3) -> Float {
        self.data[self.linear_index(index)]
    }
}

fn read_i32(bytes: &[u8], cursor: &mut usize) -> Result<i32, String> {
    if *cursor + 4 > bytes.len() {
        return Err("unexpected eof while reading i32".to_string());
    }
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[*cursor..*cursor + 4]);
    *cursor += 4;
    Ok(i32::from_le_bytes(buf))
}

fn read_f32(bytes: &[u8], cursor: &mut usize) -> Result<Float, String> {
    if *cursor + 4 > bytes.len() {
        return Err("unexpected eof while reading f32".to_string());
    }
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[*cursor..*cursor + 4]);
    *cursor += 4;
    Ok(Float::from_le_bytes(buf))
}

/// Serialize `values` as a single channel `VOL` v3 file. Used by tests and tools.
pub fn vol_bytes(size: Index3, p_min: Vector3f, p_max: Vector3f, values: &[Float]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"VOL");
    bytes.push(3u8);
    bytes.extend_from_slice(&1i32.to_le_bytes()); // encoding
    for res in size.iter() {
        bytes.extend_from_slice(&(*res as i32).to_le_bytes());
    }
    bytes.extend_from_slice(&1i32.to_le_bytes()); // channels
    for v in p_min.iter().chain(p_max.iter()) {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}
