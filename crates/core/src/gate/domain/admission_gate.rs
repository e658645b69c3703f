use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Outcome of offering a frame to the gate.
#[derive(Debug)]
#[must_use = "dropping an Admitted result immediately releases the gate"]
pub enum Admission {
    /// Inference may run. The permit must be completed (or dropped) once it
    /// finishes, successfully or not.
    Admitted(InferencePermit),
    /// Another inference is in flight; the frame is discarded.
    Dropped,
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted(_))
    }
}

/// Counters of gate decisions since construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GateStats {
    pub admitted: u64,
    pub dropped: u64,
}

#[derive(Debug, Default)]
struct GateState {
    in_flight: AtomicBool,
    admitted: AtomicU64,
    dropped: AtomicU64,
}

/// Single-flight admission control for inference.
///
/// Frames arrive at a fixed rate while inference may take longer than the
/// inter-frame interval. The gate admits a frame only while nothing is in
/// flight and drops everything else; dropped frames are never queued.
///
/// Admission hands out an [`InferencePermit`] that releases the gate when it
/// is completed or dropped. The permit is `Send`, so release may happen on a
/// different thread than admission.
#[derive(Clone, Debug, Default)]
pub struct FrameGate {
    state: Arc<GateState>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offer(&self) -> Admission {
        let acquired = self
            .state
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();

        if acquired {
            self.state.admitted.fetch_add(1, Ordering::Relaxed);
            Admission::Admitted(InferencePermit {
                state: Arc::clone(&self.state),
            })
        } else {
            self.state.dropped.fetch_add(1, Ordering::Relaxed);
            Admission::Dropped
        }
    }

    /// Whether an admitted inference has not completed yet.
    pub fn is_busy(&self) -> bool {
        self.state.in_flight.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> GateStats {
        GateStats {
            admitted: self.state.admitted.load(Ordering::Relaxed),
            dropped: self.state.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Exclusive right to run one inference.
///
/// Not `Clone`: exactly one release per admission.
#[derive(Debug)]
#[must_use = "dropping the permit immediately releases the gate"]
pub struct InferencePermit {
    state: Arc<GateState>,
}

impl InferencePermit {
    /// Releases the gate so the next offered frame can be admitted.
    pub fn complete(self) {
        // Release happens in Drop.
    }
}

impl Drop for InferencePermit {
    fn drop(&mut self) {
        self.state.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Barrier, Mutex};
    use std::thread;

    #[test]
    fn test_first_offer_is_admitted() {
        let gate = FrameGate::new();
        let admission = gate.offer();
        assert!(admission.is_admitted());
        assert!(gate.is_busy());
    }

    #[test]
    fn test_unbound_admission_releases_at_end_of_statement() {
        let gate = FrameGate::new();
        let admitted = gate.offer().is_admitted();
        assert!(admitted);
        assert!(!gate.is_busy());
        assert_eq!(gate.stats().admitted, 1);
    }

    #[test]
    fn test_offer_while_in_flight_is_dropped() {
        let gate = FrameGate::new();
        let _permit = gate.offer();
        assert!(!gate.offer().is_admitted());
        assert!(!gate.offer().is_admitted());
        assert_eq!(
            gate.stats(),
            GateStats {
                admitted: 1,
                dropped: 2
            }
        );
    }

    #[test]
    fn test_complete_reopens_gate() {
        let gate = FrameGate::new();
        match gate.offer() {
            Admission::Admitted(permit) => permit.complete(),
            Admission::Dropped => panic!("expected admission"),
        }
        assert!(!gate.is_busy());
        assert!(gate.offer().is_admitted());
    }

    #[test]
    fn test_dropping_permit_releases_gate() {
        let gate = FrameGate::new();
        {
            let _admission = gate.offer();
        }
        assert!(!gate.is_busy());
    }

    #[test]
    fn test_panic_during_inference_releases_gate() {
        let gate = FrameGate::new();
        let admission = gate.offer();
        let result = thread::spawn(move || {
            let _held = admission;
            panic!("inference blew up");
        })
        .join();
        assert!(result.is_err());
        assert!(!gate.is_busy());
    }

    #[test]
    fn test_clones_share_state() {
        let gate = FrameGate::new();
        let other = gate.clone();
        let _permit = gate.offer();
        assert!(other.is_busy());
        assert!(!other.offer().is_admitted());
    }

    #[test]
    fn test_permit_completed_on_another_thread() {
        let gate = FrameGate::new();
        let permit = match gate.offer() {
            Admission::Admitted(p) => p,
            Admission::Dropped => panic!("expected admission"),
        };
        thread::spawn(move || permit.complete()).join().unwrap();
        assert!(gate.offer().is_admitted());
    }

    #[test]
    fn test_concurrent_offers_admit_exactly_one() {
        const THREADS: usize = 16;
        let gate = FrameGate::new();
        let barrier = Arc::new(Barrier::new(THREADS));
        let permits = Arc::new(Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let gate = gate.clone();
                let barrier = Arc::clone(&barrier);
                let permits = Arc::clone(&permits);
                thread::spawn(move || {
                    barrier.wait();
                    if let Admission::Admitted(p) = gate.offer() {
                        permits.lock().unwrap().push(p);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(permits.lock().unwrap().len(), 1);
        let stats = gate.stats();
        assert_eq!(stats.admitted, 1);
        assert_eq!(stats.dropped, (THREADS - 1) as u64);
    }

    #[test]
    fn test_never_two_inferences_overlap() {
        let gate = FrameGate::new();
        let active = Arc::new(AtomicUsize::new(0));
        let max_active = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = gate.clone();
                let active = Arc::clone(&active);
                let max_active = Arc::clone(&max_active);
                thread::spawn(move || {
                    for _ in 0..200 {
                        if let Admission::Admitted(permit) = gate.offer() {
                            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                            max_active.fetch_max(now, Ordering::SeqCst);
                            thread::yield_now();
                            active.fetch_sub(1, Ordering::SeqCst);
                            permit.complete();
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(max_active.load(Ordering::SeqCst), 1);
        let stats = gate.stats();
        assert_eq!(stats.admitted + stats.dropped, 1600);
    }
}
