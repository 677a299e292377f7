#![allow(dead_code)]

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use text_to_mouth::{LinkOptions, Opener, Pacing, Transport, Viseme};

/// Shared view of everything written to a [`RecordingTransport`].
#[derive(Clone, Default)]
pub struct Recorder {
    writes: Arc<Mutex<Vec<u8>>>,
    opens: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    fail_after: Option<usize>,
}

impl Recorder {
    /// Writes start failing once `count` bytes went through.
    pub fn failing_after(count: usize) -> Self {
        Self {
            fail_after: Some(count),
            ..Self::default()
        }
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.writes.lock().clone()
    }

    pub fn shapes(&self) -> Vec<Viseme> {
        self.bytes()
            .into_iter()
            .map(|b| Viseme::from_byte(b).expect("only shape bytes are written"))
            .collect()
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

pub struct RecordingTransport {
    recorder: Recorder,
}

impl Transport for RecordingTransport {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        let mut writes = self.recorder.writes.lock();
        if self.recorder.fail_after.is_some_and(|n| writes.len() >= n) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "cable pulled"));
        }
        writes.push(byte);
        Ok(())
    }

    fn close(&mut self) {
        self.recorder.closes.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct RecordingOpener {
    pub recorder: Recorder,
    pub reachable: bool,
}

impl RecordingOpener {
    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            reachable: true,
        }
    }

    pub fn unreachable(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            reachable: false,
        }
    }
}

impl Opener for RecordingOpener {
    type Transport = RecordingTransport;

    fn open(&self, address: &str, _rate: u32) -> io::Result<RecordingTransport> {
        if !self.reachable {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such device: {address}"),
            ));
        }
        self.recorder.opens.fetch_add(1, Ordering::SeqCst);
        Ok(RecordingTransport {
            recorder: self.recorder.clone(),
        })
    }
}

/// No settle delay, no pauses.
pub fn instant() -> LinkOptions {
    LinkOptions {
        settle: Duration::ZERO,
        pacing: Pacing::instant(),
    }
}

/// No settle delay, a fixed pause per character.
pub fn paced(step_ms: u64) -> LinkOptions {
    let step = Duration::from_millis(step_ms);
    LinkOptions {
        settle: Duration::ZERO,
        pacing: Pacing {
            step_min: step,
            step_max: step,
            closing_pause: step,
        },
    }
}

pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<String>,
    pub body: String,
}

/// One-shot HTTP server answering the first request with `status` and `body`.
///
/// Returns the base URL and a handle yielding the request it received.
pub fn serve_once(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let url = format!("http://{}", listener.local_addr().unwrap());
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut headers = Vec::new();
        let mut content_length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end().to_string();
            if line.is_empty() {
                break;
            }
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            headers.push(line);
        }
        let mut request_body = vec![0; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();

        CapturedRequest {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: String::from_utf8(request_body).unwrap(),
        }
    });

    (url, handle)
}

pub fn chat_reply(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
    .to_string()
}
