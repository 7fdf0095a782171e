//! Event types and sinks for observing brush strokes and registry changes.
//!
//! The inventory UI listens for [`BrushEvent::CategoryAdded`]; editors and tests can
//! collect per-instance events with a [`VecSink`] or forward them with a [`FnSink`].
use glam::Vec3;

use crate::brush::store::PlacedInstance;
use crate::brush::stroke::StrokeResult;
use crate::brush::{BrushMode, CategoryId};

/// Why a candidate did not produce a placement or removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// A same-category instance lies within the minimum spacing.
    Spacing,
    /// The erase thinning roll spared the instance.
    Thinned,
}

/// Describes events emitted by brush operations.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum BrushEvent {
    /// A stroke passed the rate limit and started processing.
    StrokeStarted {
        mode: BrushMode,
        /// Brush center after terrain resolution by the caller.
        center: Vec3,
        /// Brush radius, clamped to >= 0.
        radius: f32,
        /// Number of candidates generated for this stroke.
        candidates: usize,
    },

    /// A candidate was evaluated but not acted on.
    CandidateRejected {
        position: Vec3,
        reason: RejectReason,
    },

    /// An instance was spawned and recorded.
    InstancePlaced { instance: PlacedInstance },

    /// An instance was despawned and forgotten.
    InstanceErased { instance: PlacedInstance },

    /// A stroke finished.
    StrokeFinished {
        mode: BrushMode,
        result: StrokeResult,
    },

    /// A custom category was appended to the registry and made active.
    CategoryAdded {
        /// Index of the new category in the registry.
        index: usize,
        category: CategoryId,
        name: String,
        /// Asset handle of the category's representative template.
        asset: String,
    },

    /// Non-fatal warning.
    Warning {
        /// Context string (e.g. category name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`BrushEvent`], used by sinks to opt out of event construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrushEventKind {
    StrokeStarted,
    CandidateRejected,
    InstancePlaced,
    InstanceErased,
    StrokeFinished,
    CategoryAdded,
    Warning,
}

impl BrushEvent {
    pub fn kind(&self) -> BrushEventKind {
        match self {
            BrushEvent::StrokeStarted { .. } => BrushEventKind::StrokeStarted,
            BrushEvent::CandidateRejected { .. } => BrushEventKind::CandidateRejected,
            BrushEvent::InstancePlaced { .. } => BrushEventKind::InstancePlaced,
            BrushEvent::InstanceErased { .. } => BrushEventKind::InstanceErased,
            BrushEvent::StrokeFinished { .. } => BrushEventKind::StrokeFinished,
            BrushEvent::CategoryAdded { .. } => BrushEventKind::CategoryAdded,
            BrushEvent::Warning { .. } => BrushEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`BrushEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: BrushEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: BrushEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: BrushEvent) {}

    #[inline]
    fn wants(&self, _kind: BrushEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(BrushEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(BrushEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(BrushEvent),
{
    #[inline]
    fn send(&mut self, event: BrushEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<BrushEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<BrushEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[BrushEvent] {
        &self.events
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: BrushEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
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
    fn send(&mut self, event: BrushEvent) {
        self.events.push(event);
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
    fn send(&mut self, event: BrushEvent) {
        let Some((last, rest)) = self.sinks.split_last_mut() else {
            return;
        };
        for sink in rest {
            if sink.wants(event.kind()) {
                sink.send(event.clone());
            }
        }
        if last.wants(event.kind()) {
            last.send(event);
        }
    }

    fn wants(&self, kind: BrushEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(context: &str) -> BrushEvent {
        BrushEvent::Warning {
            context: context.into(),
            message: "msg".into(),
        }
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(BrushEventKind::InstancePlaced));
        assert!(VecSink::new().wants(BrushEventKind::InstancePlaced));
    }

    #[test]
    fn vec_sink_collects_and_counts_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(BrushEvent::CandidateRejected {
            position: Vec3::ZERO,
            reason: RejectReason::Spacing,
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.count(BrushEventKind::Warning), 1);
        assert_eq!(sink.count(BrushEventKind::CandidateRejected), 1);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![VecSink::new(), VecSink::new()]);
        multi.send(warning("ctx"));
        assert_eq!(multi.len(), 2);
        let sinks = multi.into_inner();
        assert_eq!(sinks[0].len(), 1);
        assert_eq!(sinks[1].len(), 1);
        assert!(matches!(
            sinks[1].as_slice()[0],
            BrushEvent::Warning { ref context, .. } if context == "ctx"
        ));
    }

    #[test]
    fn empty_multi_sink_drops_events() {
        let mut multi: MultiSink<VecSink> = MultiSink::default();
        multi.send(warning("ctx"));
        assert!(multi.is_empty());
        assert!(!multi.wants(BrushEventKind::Warning));
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        sink.send(warning("ctx"));
        drop(sink);
        assert_eq!(count, 2);
    }
}
