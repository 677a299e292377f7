mod common;

use std::time::Duration;

use common::{RecordingOpener, Recorder, instant, paced};
use text_to_mouth::{LinkError, LinkOptions, MouthLink, preview};

use text_to_mouth::Viseme::{ClosedM as M, OpenA as A, OpenE as E};

#[test]
fn test_hi_writes_three_shapes_in_order() {
    let recorder = Recorder::default();
    let mut link = MouthLink::with_options(RecordingOpener::new(&recorder), instant());
    assert!(link.connect("/dev/fake", 9600));
    assert!(link.is_open());
    assert_eq!(link.address(), Some("/dev/fake"));

    assert!(link.animate("Hi"));
    link.wait();
    assert!(!link.is_busy());
    assert_eq!(recorder.shapes(), vec![A, E, M]);
}

#[test]
fn test_two_spaces_write_nothing() {
    let recorder = Recorder::default();
    let mut link = MouthLink::with_options(RecordingOpener::new(&recorder), instant());
    assert!(link.connect("/dev/fake", 9600));
    assert!(link.animate("  "));
    link.wait();
    assert!(recorder.bytes().is_empty());
}

#[test]
fn test_unreachable_address() {
    let recorder = Recorder::default();
    let mut link = MouthLink::with_options(RecordingOpener::unreachable(&recorder), instant());
    assert!(!link.connect("/dev/nowhere", 9600));
    assert!(!link.is_open());
    assert!(!link.animate("Hello"));

    match link.try_connect("/dev/nowhere", 9600) {
        Err(LinkError::Open { address, .. }) => assert_eq!(address, "/dev/nowhere"),
        other => panic!("expected open error, got {other:?}"),
    }
    link.disconnect();
    assert!(recorder.bytes().is_empty());
    assert_eq!(recorder.closes(), 0);
}

#[test]
fn test_animate_requires_connection() {
    let recorder = Recorder::default();
    let mut link = MouthLink::with_options(RecordingOpener::new(&recorder), instant());
    assert!(!link.animate("Hi"));
    assert!(!link.is_busy());
    assert!(recorder.bytes().is_empty());
}

#[test]
fn test_overlapping_animation_is_dropped() {
    let recorder = Recorder::default();
    let mut link = MouthLink::with_options(RecordingOpener::new(&recorder), paced(20));
    assert!(link.connect("/dev/fake", 9600));

    assert!(link.animate("Hello world"));
    assert!(link.is_busy());
    assert!(!link.animate("Zzz quick fox"));
    assert!(link.is_busy());

    link.wait();
    assert_eq!(recorder.shapes(), preview("Hello world"));

    // idle again, so the next one is accepted
    assert!(link.animate("o"));
    link.wait();
    let mut expected = preview("Hello world");
    expected.extend(preview("o"));
    assert_eq!(recorder.shapes(), expected);
}

#[test]
fn test_disconnect_waits_for_animation() {
    let recorder = Recorder::default();
    let mut link = MouthLink::with_options(RecordingOpener::new(&recorder), paced(30));
    assert!(link.connect("/dev/fake", 9600));
    assert!(link.animate("Hi"));

    link.disconnect();
    assert!(!link.is_busy());
    assert!(!link.is_open());
    assert_eq!(link.address(), None);
    // the full animation, then the closing shape
    assert_eq!(recorder.shapes(), vec![A, E, M, M]);
    assert_eq!(recorder.closes(), 1);

    link.disconnect();
    assert_eq!(recorder.closes(), 1);
}

#[test]
fn test_write_failure_aborts_and_still_closes() {
    let recorder = Recorder::failing_after(1);
    let mut link = MouthLink::with_options(RecordingOpener::new(&recorder), paced(5));
    assert!(link.connect("/dev/fake", 9600));
    assert!(link.animate("Hi there"));
    link.wait();
    assert!(!link.is_busy());
    assert_eq!(recorder.shapes(), vec![A]);

    link.disconnect();
    assert!(!link.is_open());
    assert_eq!(recorder.closes(), 1);
}

#[test]
fn test_disconnect_while_busy_after_write_failure() {
    let recorder = Recorder::failing_after(1);
    let mut link = MouthLink::with_options(RecordingOpener::new(&recorder), paced(20));
    assert!(link.connect("/dev/fake", 9600));
    assert!(link.animate("Hi there"));
    assert!(link.is_busy());

    link.disconnect();
    assert!(!link.is_busy());
    assert!(!link.is_open());
    assert_eq!(recorder.closes(), 1);
    assert_eq!(recorder.shapes(), vec![A]);
}

#[test]
fn test_settle_delay_after_open() {
    let recorder = Recorder::default();
    let options = LinkOptions {
        settle: Duration::from_millis(50),
        ..instant()
    };
    let mut link = MouthLink::with_options(RecordingOpener::new(&recorder), options);
    let started = std::time::Instant::now();
    assert!(link.connect("/dev/fake", 9600));
    assert!(started.elapsed() >= Duration::from_millis(50));
}

#[test]
fn test_reconnect_closes_previous_handle() {
    let recorder = Recorder::default();
    let mut link = MouthLink::with_options(RecordingOpener::new(&recorder), instant());
    assert!(link.connect("/dev/first", 9600));
    assert!(link.connect("/dev/second", 9600));
    assert_eq!(link.address(), Some("/dev/second"));
    assert_eq!(recorder.opens(), 2);
    assert_eq!(recorder.closes(), 1);
    assert_eq!(recorder.shapes(), vec![M]);
}

#[test]
fn test_scope_disconnects_on_drop() {
    let recorder = Recorder::default();
    {
        let mut scope = MouthLink::with_options(RecordingOpener::new(&recorder), paced(10))
            .enter("/dev/fake", 9600);
        assert!(scope.connected());
        assert!(scope.animate("Ma"));
    }
    assert_eq!(recorder.shapes(), vec![A, M, M]);
    assert_eq!(recorder.closes(), 1);
}

#[test]
fn test_scope_disconnects_on_early_return() {
    fn upstream() -> Result<String, String> {
        Err("upstream went away".to_string())
    }

    fn body(recorder: &Recorder) -> Result<(), String> {
        let mut scope =
            MouthLink::with_options(RecordingOpener::new(recorder), instant()).enter("/dev/fake", 9600);
        scope.animate("ah");
        let reply = upstream()?;
        scope.animate(&reply);
        Ok(())
    }

    let recorder = Recorder::default();
    assert!(body(&recorder).is_err());
    assert_eq!(recorder.shapes(), vec![A, M, M]);
    assert_eq!(recorder.closes(), 1);
}

#[test]
fn test_scope_with_unreachable_address() {
    let recorder = Recorder::default();
    {
        let scope = MouthLink::with_options(RecordingOpener::unreachable(&recorder), instant())
            .enter("/dev/nowhere", 9600);
        assert!(!scope.connected());
        assert!(!scope.is_open());
    }
    assert!(recorder.bytes().is_empty());
    assert_eq!(recorder.closes(), 0);
}

#[test]
fn test_drop_closes_link() {
    let recorder = Recorder::default();
    {
        let mut link = MouthLink::with_options(RecordingOpener::new(&recorder), instant());
        assert!(link.connect("/dev/fake", 9600));
    }
    assert_eq!(recorder.shapes(), vec![M]);
    assert_eq!(recorder.closes(), 1);
}
