//! Captures formatted `tracing` output so unit tests can assert on warnings

use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use tracing::Level;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a thread-local subscriber, returning its value and the WARN output
pub(crate) fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(Level::WARN)
        .with_ansi(false)
        .without_time()
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    let output = String::from_utf8_lossy(&buffer.0.lock()).into_owned();
    (value, output)
}
