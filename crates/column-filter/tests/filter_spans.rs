//! Integration tests for the tracing output of the filter entry points.

use std::sync::Arc;

use column_filter::filter::{MultiSelectFilter, SelectFilter};
use column_filter_core::logging::targets;
use parking_lot::Mutex;
use tracing::span::{Attributes, Id};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Records the spans opened and the warnings emitted under the filter target.
#[derive(Clone, Default)]
struct Recorder {
    spans: Arc<Mutex<Vec<&'static str>>>,
    warnings: Arc<Mutex<usize>>,
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        let metadata = attrs.metadata();
        if metadata.target() == targets::FILTER {
            self.spans.lock().push(metadata.name());
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target() == targets::FILTER && *metadata.level() == Level::WARN {
            *self.warnings.lock() += 1;
        }
    }
}

fn record(f: impl FnOnce()) -> Recorder {
    let recorder = Recorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    tracing::subscriber::with_default(subscriber, f);
    recorder
}

#[test]
fn test_multiselect_entry_points_open_filter_spans() {
    let recorder = record(|| {
        let mut filter = MultiSelectFilter::new("col");
        filter.populate(["a", "b"]);
        filter.update(["a", "b", "c"]);
        filter.set_user_selection(["a"]);
        filter.reset();
    });

    assert_eq!(
        *recorder.spans.lock(),
        vec!["populate", "update", "set_user_selection", "reset"]
    );
    assert_eq!(*recorder.warnings.lock(), 0);
}

#[test]
fn test_select_entry_points_open_filter_spans() {
    let recorder = record(|| {
        let mut filter = SelectFilter::new("col");
        filter.populate(["a", "b"]);
        filter.update(["c"]);
        filter.set_user_selection(["b"]);
        filter.reset();
    });

    assert_eq!(
        *recorder.spans.lock(),
        vec!["populate", "update", "set_user_selection", "reset"]
    );
}

#[test]
fn test_second_populate_warns_for_both_kinds() {
    let recorder = record(|| {
        let mut multi = MultiSelectFilter::new("col");
        multi.populate(["a"]);
        multi.populate(["a", "b"]);

        let mut single = SelectFilter::new("col");
        single.populate(["a"]);
        single.populate(["b"]);
    });

    assert_eq!(*recorder.warnings.lock(), 2);
}
