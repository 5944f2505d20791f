//! Scoped acquisition of the selfie capture device
//!
//! A [`CameraSession`] wraps an open stream and guarantees the underlying
//! tracks are stopped when the session ends, whether through an explicit
//! [`CameraSession::close`] or by dropping the guard on an early exit
//! (navigation away, submission, error paths).

use thiserror::Error;

/// Failures when acquiring or using the capture device
#[derive(Debug, Error)]
pub enum CameraError {
    /// The user denied the capture permission; the caller should fall back
    /// to a file upload
    #[error("Camera permission denied")]
    PermissionDenied,

    /// No usable device, or the device failed mid-session
    #[error("Camera unavailable: {0}")]
    Unavailable(String),
}

/// A capture device that can be opened into a live stream
pub trait CameraDevice: Send + Sync {
    /// Requests the device and opens a stream
    ///
    /// # Returns
    /// The live stream, or [`CameraError::PermissionDenied`] /
    /// [`CameraError::Unavailable`] when acquisition fails
    fn open_stream(&self) -> Result<Box<dyn CameraStream>, CameraError>;
}

/// An open capture stream
pub trait CameraStream: Send {
    /// Captures a single frame as a data-URL encoded image
    fn capture_frame(&mut self) -> Result<String, CameraError>;

    /// Stops all tracks, releasing the device; idempotent
    fn stop_tracks(&mut self);
}

/// RAII guard over an open stream; stops the tracks exactly once
pub struct CameraSession {
    stream: Option<Box<dyn CameraStream>>,
}

impl CameraSession {
    /// Opens a session on the given device
    pub fn open(device: &dyn CameraDevice) -> Result<Self, CameraError> {
        let stream = device.open_stream()?;
        Ok(Self {
            stream: Some(stream),
        })
    }

    /// Captures a frame from the live stream
    pub fn capture(&mut self) -> Result<String, CameraError> {
        match self.stream.as_mut() {
            Some(stream) => stream.capture_frame(),
            None => Err(CameraError::Unavailable("Session already closed".into())),
        }
    }

    /// Stops the stream and ends the session
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_tracks();
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    //! In-memory capture device for tests

    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::{CameraDevice, CameraError, CameraStream};

    /// Configurable fake device; hands out a flag that flips when the
    /// stream's tracks are stopped
    #[derive(Default)]
    pub struct MockCameraDevice {
        deny_permission: bool,
        released: Arc<AtomicBool>,
    }

    impl MockCameraDevice {
        pub fn new() -> Self {
            Self::default()
        }

        /// Simulates the user denying the capture permission
        pub fn with_denied_permission() -> Self {
            Self {
                deny_permission: true,
                ..Self::default()
            }
        }

        /// Observes whether the last opened stream has stopped its tracks
        pub fn released_flag(&self) -> Arc<AtomicBool> {
            Arc::clone(&self.released)
        }
    }

    impl CameraDevice for MockCameraDevice {
        fn open_stream(&self) -> Result<Box<dyn CameraStream>, CameraError> {
            if self.deny_permission {
                return Err(CameraError::PermissionDenied);
            }
            self.released.store(false, Ordering::SeqCst);
            Ok(Box::new(MockCameraStream {
                released: Arc::clone(&self.released),
            }))
        }
    }

    struct MockCameraStream {
        released: Arc<AtomicBool>,
    }

    impl CameraStream for MockCameraStream {
        fn capture_frame(&mut self) -> Result<String, CameraError> {
            if self.released.load(Ordering::SeqCst) {
                return Err(CameraError::Unavailable("Tracks stopped".into()));
            }
            Ok("data:image/png;base64,iVBORw0KGgo=".to_string())
        }

        fn stop_tracks(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }
}
