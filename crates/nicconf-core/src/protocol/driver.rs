//! Device configuration driver
//!
//! Sends commands with the device's fixed pacing and runs the
//! save / restart / verify cycle that ends every session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{
    commands::{GET_SIMLIB, RESTART, SAVE, VERSION},
    Clock, CommandSet, ConnectionConfig, Framing, ProtocolError, SessionTiming, Transport,
    ATTENTION_TOKEN,
};

/// What the device said after verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Decoded response text, empty if nothing was buffered
    pub response: String,
    /// Raw bytes read before decoding
    pub bytes_captured: usize,
    /// When the capture was taken
    pub completed_at: DateTime<Utc>,
}

impl SessionOutcome {
    /// True if the device sent nothing back
    pub fn is_silent(&self) -> bool {
        self.bytes_captured == 0
    }
}

/// Decode device output, replacing invalid UTF-8 with U+FFFD
pub fn decode_response(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Drives one configuration session over an open transport
pub struct Driver<T: Transport, C: Clock> {
    transport: T,
    clock: C,
    timing: SessionTiming,
    drain_after_wake: bool,
    closed: bool,
}

impl<T: Transport, C: Clock> Driver<T, C> {
    /// Take ownership of an open transport, using the timing in `config`
    pub fn new(transport: T, clock: C, config: &ConnectionConfig) -> Self {
        Self {
            transport,
            clock,
            timing: config.timing,
            drain_after_wake: config.drain_after_wake,
            closed: false,
        }
    }

    /// Write `text` with the given framing, then pause for `settle`.
    ///
    /// Write errors are returned as-is; nothing is retried.
    pub fn send(
        &mut self,
        text: &str,
        framing: Framing,
        settle: Duration,
    ) -> Result<(), ProtocolError> {
        match framing {
            Framing::Line => tracing::info!("Sending: {}", text),
            Framing::Raw => tracing::info!("Sending raw: {}", text),
        }

        let bytes = framing.encode(text);
        self.transport.write_all(&bytes)?;
        tracing::debug!(
            "wrote {} bytes, settling {}ms",
            bytes.len(),
            settle.as_millis()
        );

        self.clock.sleep(settle);
        Ok(())
    }

    /// Send a line-framed command with the default settle
    pub fn send_line(&mut self, text: &str) -> Result<(), ProtocolError> {
        let settle = self.timing.settle();
        self.send(text, Framing::Line, settle)
    }

    /// Wake the device: attention token, then an empty line.
    ///
    /// No acknowledgement is expected. Must be repeated after every restart.
    pub fn wake(&mut self) -> Result<(), ProtocolError> {
        tracing::info!("Waking device");
        let settle = self.timing.settle();
        self.send(ATTENTION_TOKEN, Framing::Raw, settle)?;
        self.send("", Framing::Line, settle)?;

        if self.drain_after_wake {
            self.drain()?;
        }
        tracing::info!("Device awake");
        Ok(())
    }

    fn drain(&mut self) -> Result<(), ProtocolError> {
        let bytes = self.read_buffered()?;
        if !bytes.is_empty() {
            tracing::debug!("post-wake output: {:?}", decode_response(&bytes));
        }
        Ok(())
    }

    /// One snapshot of buffered input: a single bounded read of exactly what
    /// is available, or no read at all when nothing is.
    pub fn read_buffered(&mut self) -> Result<Vec<u8>, ProtocolError> {
        let available = self.transport.bytes_available()?;
        if available == 0 {
            return Ok(Vec::new());
        }
        let bytes = self.transport.read(available)?;
        tracing::debug!("read {} of {} available bytes", bytes.len(), available);
        Ok(bytes)
    }

    /// Send every command in `commands`, in order
    pub fn play(&mut self, commands: &CommandSet) -> Result<(), ProtocolError> {
        tracing::info!(
            "Applying configuration {} ({} commands)",
            commands.name(),
            commands.len()
        );
        for command in commands {
            self.send_line(command.as_str())?;
        }
        Ok(())
    }

    /// Save, restart, wait out the reboot, re-wake, verify and capture the response
    pub fn finalize(&mut self) -> Result<SessionOutcome, ProtocolError> {
        tracing::info!("Saving and restarting");
        let save_settle = self.timing.save_settle();
        self.send(SAVE, Framing::Line, save_settle)?;
        self.send_line(RESTART)?;

        let reboot = self.timing.reboot_wait();
        tracing::info!(
            "Device is restarting, waiting {:?} before verification",
            reboot
        );
        self.clock.sleep(reboot);

        self.wake()?;

        tracing::info!("Verifying status");
        self.send_line(VERSION)?;
        self.send_line(GET_SIMLIB)?;

        self.capture()
    }

    fn capture(&mut self) -> Result<SessionOutcome, ProtocolError> {
        let bytes = self.read_buffered()?;
        if bytes.is_empty() {
            tracing::warn!("No response buffered after verification");
        }

        Ok(SessionOutcome {
            response: decode_response(&bytes),
            bytes_captured: bytes.len(),
            completed_at: Utc::now(),
        })
    }

    /// Close the transport. Safe to call more than once; only the first call closes.
    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.transport.close();
        }
    }
}

impl<T: Transport, C: Clock> Drop for Driver<T, C> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MockTransport {
        written: Vec<Vec<u8>>,
        pending: Vec<u8>,
        reads: usize,
        closes: usize,
    }

    impl Transport for MockTransport {
        fn write_all(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
            self.written.push(bytes.to_vec());
            Ok(())
        }

        fn bytes_available(&mut self) -> Result<usize, ProtocolError> {
            Ok(self.pending.len())
        }

        fn read(&mut self, max: usize) -> Result<Vec<u8>, ProtocolError> {
            self.reads += 1;
            let n = max.min(self.pending.len());
            Ok(self.pending.drain(..n).collect())
        }

        fn close(&mut self) {
            self.closes += 1;
        }
    }

    #[derive(Default)]
    struct MockClock {
        sleeps: RefCell<Vec<Duration>>,
    }

    impl Clock for MockClock {
        fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
        }
    }

    #[test]
    fn test_decode_response_replaces_invalid_bytes() {
        let text = decode_response(b"V1.2\xff\xfeOK");
        assert_eq!(text, "V1.2\u{FFFD}\u{FFFD}OK");
    }

    #[test]
    fn test_send_settles_after_write() {
        let clock = MockClock::default();
        let config = ConnectionConfig::default();
        let mut driver = Driver::new(MockTransport::default(), &clock, &config);
        driver
            .send("$vers", Framing::Line, Duration::from_secs(3))
            .unwrap();
        assert_eq!(driver.transport.written, vec![b"$vers\r\n".to_vec()]);
        assert_eq!(*clock.sleeps.borrow(), vec![Duration::from_secs(3)]);
    }

    #[test]
    fn test_drain_after_wake_reads_buffered_output() {
        let clock = MockClock::default();
        let mut config = ConnectionConfig::default();
        config.drain_after_wake = true;
        let transport = MockTransport {
            pending: b"READY\r\n".to_vec(),
            ..Default::default()
        };
        let mut driver = Driver::new(transport, &clock, &config);
        driver.wake().unwrap();
        assert_eq!(driver.transport.reads, 1);
        assert!(driver.transport.pending.is_empty());
    }

    #[test]
    fn test_close_is_idempotent() {
        let clock = MockClock::default();
        let config = ConnectionConfig::default();
        let mut driver = Driver::new(MockTransport::default(), &clock, &config);
        driver.close();
        driver.close();
        assert_eq!(driver.transport.closes, 1);
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_reboot_wait_logged_with_fraction() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .without_time()
            .finish();

        let clock = MockClock::default();
        let mut config = ConnectionConfig::default();
        config.timing.unit_ms = 250;
        tracing::subscriber::with_default(subscriber, || {
            let mut driver = Driver::new(MockTransport::default(), &clock, &config);
            driver.finalize().unwrap();
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(
            output.contains("waiting 10.25s before verification"),
            "{output}"
        );
    }

    #[test]
    fn test_silent_outcome() {
        let clock = MockClock::default();
        let config = ConnectionConfig::default();
        let mut driver = Driver::new(MockTransport::default(), &clock, &config);
        let outcome = driver.finalize().unwrap();
        assert!(outcome.is_silent());
        assert_eq!(outcome.response, "");
        assert_eq!(driver.transport.reads, 0);
    }
}
