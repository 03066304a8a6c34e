// Radiance HDR environment decoding.
//
// The equirectangular image is box-filtered down to a small grid; the
// renderer looks it up by direction for ambient and specular light.

use std::io::Cursor;

use super::error::AssetError;

#[derive(Debug, Clone)]
pub struct EnvironmentMap {
    pub width: u32,
    pub height: u32,
    /// Linear RGBA, row-major, top row first.
    pub texels: Vec<[f32; 4]>,
}

impl EnvironmentMap {
    pub fn from_hdr_bytes(bytes: &[u8], grid: (u32, u32)) -> Result<Self, AssetError> {
        let img = image::load(Cursor::new(bytes), image::ImageFormat::Hdr)?.to_rgba32f();
        let (w, h) = img.dimensions();
        let src: Vec<[f32; 4]> = img.pixels().map(|p| p.0).collect();
        Ok(Self::downsample(&src, w, h, grid))
    }

    /// Average `src` into a `grid` sized map.
    pub fn downsample(src: &[[f32; 4]], w: u32, h: u32, grid: (u32, u32)) -> Self {
        let (gw, gh) = (grid.0.max(1), grid.1.max(1));
        let mut texels = vec![[0.0f32; 4]; (gw * gh) as usize];
        if w == 0 || h == 0 || src.len() < (w * h) as usize {
            return Self::uniform([0.0, 0.0, 0.0], gw, gh);
        }
        for gy in 0..gh {
            let y0 = gy * h / gh;
            let y1 = ((gy + 1) * h / gh).max(y0 + 1).min(h);
            for gx in 0..gw {
                let x0 = gx * w / gw;
                let x1 = ((gx + 1) * w / gw).max(x0 + 1).min(w);
                let mut acc = [0.0f32; 3];
                let mut n = 0.0f32;
                for y in y0..y1 {
                    for x in x0..x1 {
                        let p = src[(y * w + x) as usize];
                        acc[0] += p[0];
                        acc[1] += p[1];
                        acc[2] += p[2];
                        n += 1.0;
                    }
                }
                let n = n.max(1.0);
                texels[(gy * gw + gx) as usize] = [acc[0] / n, acc[1] / n, acc[2] / n, 1.0];
            }
        }
        Self {
            width: gw,
            height: gh,
            texels,
        }
    }

    pub fn uniform(rgb: [f32; 3], width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            texels: vec![[rgb[0], rgb[1], rgb[2], 1.0]; (width * height) as usize],
        }
    }

    /// Mean radiance over the map.
    pub fn average(&self) -> [f32; 3] {
        let n = self.texels.len().max(1) as f32;
        let mut acc = [0.0f32; 3];
        for t in &self.texels {
            acc[0] += t[0];
            acc[1] += t[1];
            acc[2] += t[2];
        }
        [acc[0] / n, acc[1] / n, acc[2] / n]
    }
}
