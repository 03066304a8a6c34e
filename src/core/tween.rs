// Per-frame tween scheduler.
//
// Tasks are kept in an explicit list and advanced once per frame by the
// owner. A new tween on a target that is already animating does not cancel
// the older one: both keep writing and, because tasks are applied in the
// order they were started, the most recent one wins for that frame.

use glam::Vec3;

/// Ease-out cubic: fast start, gentle settle.
#[inline]
pub fn ease_out_cubic(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Target values for the components of a three-component property.
/// Components left as `None` keep their start value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisTargets {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl AxisTargets {
    pub fn x(value: f32) -> Self {
        Self {
            x: Some(value),
            ..Self::default()
        }
    }

    pub fn all(v: Vec3) -> Self {
        Self {
            x: Some(v.x),
            y: Some(v.y),
            z: Some(v.z),
        }
    }

    fn resolve(&self, start: Vec3) -> Vec3 {
        Vec3::new(
            self.x.unwrap_or(start.x),
            self.y.unwrap_or(start.y),
            self.z.unwrap_or(start.z),
        )
    }
}

/// Runs when a task reaches progress 1. Receives the scheduler so it can
/// chain a follow-up tween, the final value, and the completion time.
pub type Completion<K> = Box<dyn FnOnce(&mut TweenScheduler<K>, Vec3, f64)>;

struct TweenTask<K> {
    target: K,
    start: Vec3,
    end: Vec3,
    start_sec: f64,
    duration_sec: f32,
    easing: fn(f32) -> f32,
    on_complete: Option<Completion<K>>,
}

impl<K> TweenTask<K> {
    fn progress(&self, now_sec: f64) -> f32 {
        if self.duration_sec <= 0.0 {
            return 1.0;
        }
        (((now_sec - self.start_sec) as f32) / self.duration_sec).clamp(0.0, 1.0)
    }
}

pub struct TweenScheduler<K> {
    tasks: Vec<TweenTask<K>>,
}

impl<K> Default for TweenScheduler<K> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<K: Copy> TweenScheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween from `current` toward `to` over `duration_sec`.
    ///
    /// `current` is the snapshot taken by the caller at invocation time.
    pub fn animate(
        &mut self,
        target: K,
        current: Vec3,
        to: AxisTargets,
        duration_sec: f32,
        now_sec: f64,
        on_complete: Option<Completion<K>>,
    ) {
        self.tasks.push(TweenTask {
            target,
            start: current,
            end: to.resolve(current),
            start_sec: now_sec,
            duration_sec: duration_sec.max(0.0),
            easing: ease_out_cubic,
            on_complete,
        });
    }

    pub fn active(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_animating(&self, target: K) -> bool
    where
        K: PartialEq,
    {
        self.tasks.iter().any(|t| t.target == target)
    }

    /// Advance every task to `now_sec`, handing each interpolated value to
    /// `apply`. Finished tasks are dropped and their completions run after
    /// the sweep, in start order; tweens they start are first advanced on
    /// the next call.
    pub fn advance(&mut self, now_sec: f64, mut apply: impl FnMut(K, Vec3)) {
        let mut finished = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            let task = &self.tasks[i];
            let progress = task.progress(now_sec);
            let eased = (task.easing)(progress);
            apply(task.target, task.start.lerp(task.end, eased));
            if progress >= 1.0 {
                finished.push(self.tasks.remove(i));
            } else {
                i += 1;
            }
        }
        for mut task in finished {
            if let Some(done) = task.on_complete.take() {
                done(self, task.end, now_sec);
            }
        }
    }
}
