// Host-side tests for the LED waveform bitmap.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod waveform {
    include!("../src/core/waveform.rs");
}

use constants::*;
use waveform::*;

#[test]
fn intensity_ramps_from_min_to_max() {
    assert_eq!(segment_intensity(0, 10), WAVEFORM_MIN_INTENSITY);
    assert_eq!(segment_intensity(9, 10), WAVEFORM_MAX_INTENSITY);
    let mid = segment_intensity(5, 11);
    assert!((mid - 0.75).abs() < 1e-6);
    // A single segment is drawn at full brightness
    assert_eq!(segment_intensity(0, 1), WAVEFORM_MAX_INTENSITY);
}

#[test]
fn bins_are_sampled_evenly() {
    // 128 bins over 14 bars
    assert_eq!(bin_index(0, 128, 14), 0);
    assert_eq!(bin_index(1, 128, 14), 9);
    assert_eq!(bin_index(13, 128, 14), 118);
    assert_eq!(bin_index(5, 0, 14), 0);
    // Fewer bins than bars clamps to the last bin
    assert!(bin_index(13, 4, 14) < 4);
}

#[test]
fn segment_count_floors() {
    assert_eq!(segment_count(0.0), 0);
    assert_eq!(segment_count(5.9), 0);
    assert_eq!(segment_count(6.0), 1);
    assert_eq!(segment_count(128.0), 21);
}

#[test]
fn full_scale_fills_every_bar_symmetrically() {
    let mags = vec![255u8; 128];
    let segs = layout_segments(&mags, 256.0, 128.0);
    let per_bar = segment_count(128.0);
    assert_eq!(segs.len(), WAVEFORM_BAR_COUNT * per_bar);

    // Right and left members of each pair mirror around the centre
    for pair in segs.chunks_exact(2) {
        let (r, l) = (pair[0], pair[1]);
        assert_eq!(r.y, l.y);
        assert_eq!(r.level, l.level);
        let r_mid = r.x + r.width * 0.5 - 128.0;
        let l_mid = 128.0 - (l.x + l.width * 0.5);
        assert!((r_mid - l_mid).abs() < WAVEFORM_BAR_GAP + 1e-3);
        assert!(r.x >= 128.0 && l.x < 128.0);
    }
}

#[test]
fn silence_lights_nothing() {
    let segs = layout_segments(&[0u8; 128], 256.0, 128.0);
    assert!(segs.is_empty());
    assert!(layout_segments(&[], 256.0, 128.0).is_empty());
}

#[test]
fn segments_stack_upward_from_bottom() {
    let segs = layout_segments(&[255u8; 128], 256.0, 128.0);
    let bottom = segs.iter().find(|s| s.level == 0).unwrap();
    let next = segs.iter().find(|s| s.level == 1).unwrap();
    assert_eq!(bottom.y, 128.0 - (WAVEFORM_SEGMENT_HEIGHT + WAVEFORM_SEGMENT_GAP));
    assert!(next.y < bottom.y);
    assert!(next.intensity > bottom.intensity);
}

#[test]
fn paused_draw_leaves_bitmap_blank() {
    let mut c = WaveformCanvas::new(WAVEFORM_WIDTH, WAVEFORM_HEIGHT);
    assert_eq!(c.draw(true, &[255u8; 128]), WAVEFORM_BAR_COUNT * 21);
    assert!(!c.is_blank());
    assert_eq!(c.draw(false, &[255u8; 128]), 0);
    assert!(c.is_blank());
}

#[test]
fn redraw_does_not_accumulate() {
    let mut c = WaveformCanvas::new(WAVEFORM_WIDTH, WAVEFORM_HEIGHT);
    c.draw(true, &[255u8; 128]);
    let loud: Vec<u8> = c.pixels().to_vec();
    c.draw(true, &[40u8; 128]);
    let lit_loud = loud.chunks_exact(4).filter(|p| p[3] != 0).count();
    let lit_quiet = c.pixels().chunks_exact(4).filter(|p| p[3] != 0).count();
    assert!(lit_quiet < lit_loud);
}

#[test]
fn dirty_flag_is_consumed_once() {
    let mut c = WaveformCanvas::new(8, 4);
    assert!(c.take_dirty().is_some());
    assert!(c.take_dirty().is_none());
    c.draw(false, &[]);
    let px = c.take_dirty().map(|p| p.len());
    assert_eq!(px, Some(8 * 4 * 4));
}
