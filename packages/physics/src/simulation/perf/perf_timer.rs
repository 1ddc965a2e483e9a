#[cfg(target_arch = "wasm32")]
type Stamp = f64;
#[cfg(not(target_arch = "wasm32"))]
type Stamp = std::time::Instant;

#[cfg(target_arch = "wasm32")]
fn now() -> Stamp {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now() -> Stamp {
    std::time::Instant::now()
}

#[cfg(target_arch = "wasm32")]
fn ms_between(from: Stamp, to: Stamp) -> f64 {
    (to - from).max(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
fn ms_between(from: Stamp, to: Stamp) -> f64 {
    to.duration_since(from).as_secs_f64() * 1000.0
}

/// Split clock for pipeline phases.
///
/// Inert (always reads 0) unless perf metrics were on when it was armed,
/// so the hot path never touches the system clock.
pub(crate) struct PhaseClock {
    mark: Option<Stamp>,
}

impl PhaseClock {
    pub(crate) fn arm(enabled: bool) -> Self {
        Self { mark: enabled.then(now) }
    }

    /// Milliseconds since the last split (or arming), then restart from now
    pub(crate) fn split(&mut self) -> f64 {
        match self.mark.as_mut() {
            Some(mark) => {
                let t = now();
                let ms = ms_between(*mark, t);
                *mark = t;
                ms
            }
            None => 0.0,
        }
    }
}
