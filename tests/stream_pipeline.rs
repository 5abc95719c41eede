//! End-to-end pipeline tests over a real localhost TCP connection.

use drishti_io::camera::PatternCamera;
use drishti_io::detect::{Detection, StubDetector};
use drishti_io::display::FrameSink;
use drishti_io::error::Result;
use drishti_io::frame::Frame;
use drishti_io::pipeline::{run_consumer, run_producer};
use drishti_io::sampling::{Annotation, SamplingState};
use drishti_io::streaming::{FrameSender, StreamReceiver};
use drishti_io::transport::{TcpListenerEndpoint, TcpTransport};
use std::sync::atomic::AtomicBool;
use std::thread;

#[derive(Default)]
struct RecordingSink {
    presented: Vec<Vec<Annotation>>,
}

impl FrameSink for RecordingSink {
    fn present(&mut self, _frame: &Frame, annotations: &[Annotation]) -> Result<()> {
        self.presented.push(annotations.to_vec());
        Ok(())
    }
}

#[test]
fn test_payloads_survive_tcp_round_trip_in_order() {
    let endpoint = TcpListenerEndpoint::bind("127.0.0.1:0").unwrap();
    let addr = endpoint.local_addr().unwrap();

    let payloads: Vec<Vec<u8>> = vec![
        b"first".to_vec(),
        vec![],
        (0u8..=255).collect(),
        vec![0xAA; 100_000], // spans many read chunks
    ];
    let expected = payloads.clone();

    let sender_thread = thread::spawn(move || {
        let transport = endpoint.accept_one().unwrap();
        let mut sender = FrameSender::new(transport, 80);
        for p in &payloads {
            sender.send_payload(p).unwrap();
        }
        // Dropping the sender closes the stream, signalling clean EOF
    });

    let transport = TcpTransport::connect(&addr.to_string()).unwrap();
    let mut receiver = StreamReceiver::new(transport);

    for p in &expected {
        assert_eq!(&receiver.next_payload().unwrap().unwrap(), p);
    }
    assert!(receiver.next_payload().unwrap().is_none());

    sender_thread.join().unwrap();
}

#[test]
fn test_full_pipeline_producer_to_consumer() {
    let endpoint = TcpListenerEndpoint::bind("127.0.0.1:0").unwrap();
    let addr = endpoint.local_addr().unwrap();

    let producer_thread = thread::spawn(move || {
        let transport = endpoint.accept_one().unwrap();
        let mut camera = PatternCamera::bounded(64, 48, 9);
        let mut sender = FrameSender::new(transport, 85);
        let running = AtomicBool::new(true);
        run_producer(&mut camera, &mut sender, &running).unwrap()
    });

    let transport = TcpTransport::connect(&addr.to_string()).unwrap();
    let mut receiver = StreamReceiver::new(transport);
    // Detect every third frame on half-resolution copies
    let mut sampling = SamplingState::new(2, 0.5).unwrap();
    let mut detector = StubDetector::scripted(vec![
        vec![Detection::new(10.0, 20.0, 30.0, 40.0, "person", 0.9)],
        vec![],
        vec![Detection::new(0.0, 0.0, 4.0, 4.0, "cat", 0.2)], // filtered out
    ]);
    let mut sink = RecordingSink::default();
    let running = AtomicBool::new(true);

    let stats = run_consumer(
        &mut receiver,
        &mut sampling,
        Some(&mut detector),
        &mut sink,
        &running,
    )
    .unwrap();

    let sent = producer_thread.join().unwrap();
    assert_eq!(sent, 9);
    assert_eq!(stats.frames, 9);
    assert_eq!(stats.detected_frames, 3);
    assert_eq!(detector.call_count(), 3);

    // Only the first selected frame carries a reported detection, remapped
    // from half-scale space back to full resolution
    assert_eq!(stats.annotations, 1);
    assert_eq!(sink.presented.len(), 9);
    let first = &sink.presented[0];
    assert_eq!(first.len(), 1);
    let b = first[0].bbox;
    assert_eq!((b.x, b.y, b.w, b.h), (20, 40, 60, 80));
    assert!(sink.presented[1..].iter().all(|a| a.is_empty()));
}

#[test]
fn test_viewer_disconnect_stops_producer_cleanly() {
    let endpoint = TcpListenerEndpoint::bind("127.0.0.1:0").unwrap();
    let addr = endpoint.local_addr().unwrap();

    let producer_thread = thread::spawn(move || {
        let transport = endpoint.accept_one().unwrap();
        let mut camera = PatternCamera::new(32, 32); // unbounded
        let mut sender = FrameSender::new(transport, 80);
        let running = AtomicBool::new(true);
        // Must end via the disconnect path, not an error
        run_producer(&mut camera, &mut sender, &running)
    });

    {
        let transport = TcpTransport::connect(&addr.to_string()).unwrap();
        let mut receiver = StreamReceiver::new(transport);
        // Take a couple of frames, then drop the connection
        assert!(receiver.next_frame().unwrap().is_some());
        assert!(receiver.next_frame().unwrap().is_some());
    }

    let sent = producer_thread.join().unwrap().unwrap();
    assert!(sent >= 2);
}
