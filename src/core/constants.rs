// Shared tuning constants for the viewer. Angles are radians unless noted.

// Pointer-driven rotation
pub const POINTER_MAX_YAW_DEG: f32 = 20.0; // horizontal pointer -> rotation about Y
pub const POINTER_MAX_PITCH_DEG: f32 = 10.0; // vertical pointer -> rotation about X
pub const ROTATION_SMOOTHING: f32 = 0.05; // current += (target - current) * k

// Buttons
pub const BUTTON_PRESS_ANGLE: f32 = 0.25; // added to the registered X rotation
pub const BUTTON_DEADBAND: f32 = 0.1; // deviation that counts as "pressed"
pub const BUTTON_PRESS_SEC: f32 = 0.15;
pub const BUTTON_RELEASE_SEC: f32 = 0.25;

// Waveform bitmap
pub const WAVEFORM_WIDTH: u32 = 256;
pub const WAVEFORM_HEIGHT: u32 = 128;
pub const WAVEFORM_BAR_COUNT: usize = 28; // mirrored pairs, half per side
pub const WAVEFORM_BAR_WIDTH: f32 = 6.0;
pub const WAVEFORM_BAR_GAP: f32 = 3.0;
pub const WAVEFORM_SEGMENT_HEIGHT: f32 = 4.0;
pub const WAVEFORM_SEGMENT_GAP: f32 = 2.0;
pub const WAVEFORM_MIN_INTENSITY: f32 = 0.5;
pub const WAVEFORM_MAX_INTENSITY: f32 = 1.0;
pub const WAVEFORM_LED_RGB: [f32; 3] = [0.25, 1.0, 0.55];

// Audio analyser
pub const ANALYSER_FFT_SIZE: u32 = 256;
pub const ANALYSER_SMOOTHING: f64 = 0.8;

// Responsive layout
pub const NARROW_BREAKPOINT_PX: f32 = 768.0;
pub const SCALE_TOUCH_NARROW: f32 = 0.6;
pub const SCALE_TOUCH_WIDE: f32 = 0.8;
pub const SCALE_DESKTOP: f32 = 1.0;

// Overlay
pub const OVERLAY_OFFSET_PX: f32 = 40.0; // pushed below the projected anchor

// Camera
pub const CAMERA_EYE: [f32; 3] = [0.0, 0.4, 5.0];
pub const CAMERA_FOV_DEG: f32 = 35.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

// Model fitting: the loaded model is normalised so its largest extent matches this
pub const MODEL_FIT_EXTENT: f32 = 2.4;

// Lighting and post
pub const AMBIENT_FALLBACK: [f32; 3] = [0.35, 0.35, 0.4];
pub const ENVIRONMENT_GRID: (u32, u32) = (64, 32);
pub const EXPOSURE: f32 = 1.1;
pub const BLOOM_STRENGTH: f32 = 0.6;
pub const BLOOM_THRESHOLD: f32 = 0.85;
