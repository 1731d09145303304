// crates/logging/src/visitor.rs
use std::fmt;
use tracing::field::{Field, Visit};

/// Collects an event's message and fields for the text formatter and the
/// syslog layer.
#[derive(Default)]
pub(crate) struct FieldVisitor {
    msg: String,
    fields: Vec<(&'static str, String)>,
}

impl FieldVisitor {
    /// `message k=v k=v`, fields in recording order.
    pub(crate) fn render(&self) -> String {
        let mut out = self.msg.clone();
        for (k, v) in &self.fields {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(k);
            out.push('=');
            out.push_str(v);
        }
        out
    }

    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.msg.push_str(&value);
        } else {
            self.fields.push((field.name(), value));
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    struct Capture(Arc<Mutex<Vec<String>>>);

    impl<S: Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &tracing::Event<'_>, _: Context<'_, S>) {
            let mut visitor = FieldVisitor::default();
            event.record(&mut visitor);
            self.0.lock().unwrap().push(visitor.render());
        }
    }

    fn rendered(f: impl FnOnce()) -> Vec<String> {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sub = tracing_subscriber::registry().with(Capture(lines.clone()));
        tracing::subscriber::with_default(sub, f);
        let out = lines.lock().unwrap().clone();
        out
    }

    #[test]
    fn message_leads_fields_in_order() {
        let lines = rendered(|| {
            tracing::warn!(pid = 7, path = "/tmp/x", "reaped");
        });
        assert_eq!(lines, ["reaped pid=7 path=/tmp/x"]);
    }

    #[test]
    fn fields_without_message() {
        let lines = rendered(|| tracing::info!(status = 1));
        assert_eq!(lines, ["status=1"]);
    }
}
