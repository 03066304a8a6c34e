// LED-style frequency display rasterised into an RGBA bitmap.
//
// The bitmap is rebuilt from scratch each frame from the current analyser
// bins only; no bar state carries over between frames.

use super::constants::*;

/// One lit LED segment. `level` counts from the bottom of its bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub level: usize,
    pub intensity: f32,
}

/// Brightness of segment `level` in a stack of `count`, linear from the
/// minimum at the bottom to the maximum at the top.
#[inline]
pub fn segment_intensity(level: usize, count: usize) -> f32 {
    if count <= 1 {
        return WAVEFORM_MAX_INTENSITY;
    }
    let t = level as f32 / (count - 1) as f32;
    WAVEFORM_MIN_INTENSITY + (WAVEFORM_MAX_INTENSITY - WAVEFORM_MIN_INTENSITY) * t
}

/// Bin index sampled for bar `i` of `half_bars`.
#[inline]
pub fn bin_index(i: usize, buffer_len: usize, half_bars: usize) -> usize {
    if half_bars == 0 || buffer_len == 0 {
        return 0;
    }
    (i * buffer_len / half_bars).min(buffer_len - 1)
}

/// Number of segments lit for a bar of `bar_height` pixels.
#[inline]
pub fn segment_count(bar_height: f32) -> usize {
    (bar_height / (WAVEFORM_SEGMENT_HEIGHT + WAVEFORM_SEGMENT_GAP))
        .floor()
        .max(0.0) as usize
}

/// Lay out the mirrored bars for a `width` x `height` bitmap. Segments are
/// emitted bar by bar, right side first then its mirror on the left.
pub fn layout_segments(magnitudes: &[u8], width: f32, height: f32) -> Vec<Segment> {
    let half_bars = WAVEFORM_BAR_COUNT / 2;
    let center_x = width * 0.5;
    let pitch = WAVEFORM_BAR_WIDTH + WAVEFORM_BAR_GAP;
    let step = WAVEFORM_SEGMENT_HEIGHT + WAVEFORM_SEGMENT_GAP;
    let mut out = Vec::new();
    if magnitudes.is_empty() {
        return out;
    }
    for i in 0..half_bars {
        let value = magnitudes[bin_index(i, magnitudes.len(), half_bars)] as f32 / 255.0;
        let bar_height = value * height;
        let count = segment_count(bar_height);
        let right_x = center_x + i as f32 * pitch + WAVEFORM_BAR_GAP * 0.5;
        let left_x = center_x - (i + 1) as f32 * pitch + WAVEFORM_BAR_GAP * 0.5;
        for level in 0..count {
            let y = height - (level + 1) as f32 * step;
            let intensity = segment_intensity(level, count);
            for x in [right_x, left_x] {
                out.push(Segment {
                    x,
                    y,
                    width: WAVEFORM_BAR_WIDTH,
                    height: WAVEFORM_SEGMENT_HEIGHT,
                    level,
                    intensity,
                });
            }
        }
    }
    out
}

/// Offscreen bitmap backing the display texture.
pub struct WaveformCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    dirty: bool,
}

impl WaveformCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
            dirty: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|b| *b == 0)
    }

    /// Hand out the pixels for upload if they changed since the last call.
    pub fn take_dirty(&mut self) -> Option<&[u8]> {
        if self.dirty {
            self.dirty = false;
            Some(&self.pixels)
        } else {
            None
        }
    }

    /// Redraw for this frame. Paused playback leaves the bitmap blank.
    pub fn draw(&mut self, playing: bool, magnitudes: &[u8]) -> usize {
        self.pixels.fill(0);
        self.dirty = true;
        if !playing {
            return 0;
        }
        let segments = layout_segments(magnitudes, self.width as f32, self.height as f32);
        for s in &segments {
            let rgba = [
                to_byte(WAVEFORM_LED_RGB[0] * s.intensity),
                to_byte(WAVEFORM_LED_RGB[1] * s.intensity),
                to_byte(WAVEFORM_LED_RGB[2] * s.intensity),
                255,
            ];
            self.fill_rect(s.x, s.y, s.width, s.height, rgba);
        }
        segments.len()
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, rgba: [u8; 4]) {
        let x0 = x.round().clamp(0.0, self.width as f32) as u32;
        let y0 = y.round().clamp(0.0, self.height as f32) as u32;
        let x1 = (x + w).round().clamp(0.0, self.width as f32) as u32;
        let y1 = (y + h).round().clamp(0.0, self.height as f32) as u32;
        for row in y0..y1 {
            let start = ((row * self.width + x0) * 4) as usize;
            let end = ((row * self.width + x1) * 4) as usize;
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
