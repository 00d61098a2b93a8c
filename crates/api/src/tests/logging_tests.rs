// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations emit one `info` event each.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::{AccessLevel, CloseReportRequest, close_report, set_logo};

use super::helpers::{TEST_BASE_URL, create_test_now, file_test_report, setup_test_persistence};

struct MessageVisitor<'a>(&'a mut Option<String>);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}

/// Records the message of every `info` event.
#[derive(Clone, Default)]
struct InfoLog(Arc<Mutex<Vec<String>>>);

impl InfoLog {
    fn count(&self, message: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|m| *m == message).count()
    }
}

impl<S: Subscriber> Layer<S> for InfoLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::INFO {
            return;
        }
        let mut message: Option<String> = None;
        event.record(&mut MessageVisitor(&mut message));
        if let Some(message) = message {
            self.0.lock().unwrap().push(message);
        }
    }
}

#[test]
fn test_state_changes_are_logged_once() {
    let log = InfoLog::default();
    let subscriber = tracing_subscriber::registry().with(log.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut persistence = setup_test_persistence();
        let report_id = file_test_report(&mut persistence, "Logged once");
        close_report(
            &mut persistence,
            AccessLevel::Quality,
            report_id,
            CloseReportRequest::default(),
            Vec::new(),
            create_test_now(),
            TEST_BASE_URL,
        )
        .unwrap();
        set_logo(
            &mut persistence,
            AccessLevel::Quality,
            &[0x89, b'P', b'N', b'G'],
            Some("image/png"),
        )
        .unwrap();
    });

    assert_eq!(log.count("Filed report"), 1);
    assert_eq!(log.count("Applied lifecycle transition"), 1);
    assert_eq!(log.count("Stored logo"), 1);
}
