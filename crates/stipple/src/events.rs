//! Event types and sinks for observing stippling runs.
//!
//! [`crate::sampling::VoidAndClusterSampler::run_with_events`] reports progress
//! through an [`EventSink`]. Events are purely observational and never change the
//! placement result.
use crate::sampling::Sample;

/// Describes events emitted while placing stipples.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum StippleEvent {
    /// Emitted once before the first placement.
    RunStarted {
        height: usize,
        width: usize,
        /// Number of samples the run will place.
        target_count: usize,
        /// Side length of the repulsion kernel.
        kernel_side: usize,
    },

    /// Emitted after each placement, in placement order.
    SamplePlaced {
        /// Position of the sample in the sequence.
        index: usize,
        sample: Sample,
    },

    /// Emitted once after the last placement.
    RunFinished {
        /// Number of samples placed.
        placed: usize,
    },

    /// Non-fatal warning generated during the run.
    Warning {
        /// Context string (e.g. the phase that produced it).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

impl StippleEvent {
    pub fn kind(&self) -> StippleEventKind {
        match self {
            StippleEvent::RunStarted { .. } => StippleEventKind::RunStarted,
            StippleEvent::SamplePlaced { .. } => StippleEventKind::SamplePlaced,
            StippleEvent::RunFinished { .. } => StippleEventKind::RunFinished,
            StippleEvent::Warning { .. } => StippleEventKind::Warning,
        }
    }
}

/// Discriminant of [`StippleEvent`], used to filter what a sink receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StippleEventKind {
    RunStarted,
    SamplePlaced,
    RunFinished,
    Warning,
}

/// A generic event sink that accepts [`StippleEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: StippleEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: StippleEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: StippleEvent) {}

    #[inline]
    fn wants(&self, _kind: StippleEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(StippleEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(StippleEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(StippleEvent),
{
    #[inline]
    fn send(&mut self, event: StippleEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<StippleEvent>,
    only: Option<Vec<StippleEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect only events whose kind is in `kinds`.
    pub fn only(kinds: impl IntoIterator<Item = StippleEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<StippleEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[StippleEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: StippleEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: StippleEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: StippleEvent) {
        let kind = event.kind();
        for sink in &mut self.sinks {
            if sink.wants(kind) {
                sink.send(event.clone());
            }
        }
    }

    fn wants(&self, kind: StippleEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(ctx: &str) -> StippleEvent {
        StippleEvent::Warning {
            context: ctx.into(),
            message: "m".into(),
        }
    }

    #[test]
    fn unit_sink_wants_nothing() {
        let sink = ();
        assert!(!sink.wants(StippleEventKind::SamplePlaced));
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(StippleEvent::RunFinished { placed: 3 });
        assert_eq!(sink.len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn vec_sink_filters_by_kind() {
        let mut sink = VecSink::only([StippleEventKind::RunFinished]);
        assert!(!sink.wants(StippleEventKind::Warning));
        sink.send(warning("a"));
        sink.send(StippleEvent::RunFinished { placed: 1 });
        assert_eq!(sink.as_slice(), &[StippleEvent::RunFinished { placed: 1 }]);
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![
            VecSink::new(),
            VecSink::only([StippleEventKind::RunStarted]),
        ]);
        assert!(multi.wants(StippleEventKind::Warning));
        multi.send(warning("ctx"));
        let sinks = multi.into_inner();
        assert_eq!(sinks[0].len(), 1);
        assert_eq!(sinks[1].len(), 0);
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        drop(sink);
        assert_eq!(count, 1);
    }
}
