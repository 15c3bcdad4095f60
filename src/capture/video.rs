//! Video files decoded by an `ffmpeg` child process.
//!
//! `ffprobe` reports the coded stream dimensions, then `ffmpeg` writes raw
//! RGB24 frames to its stdout at the file's native rate (`-re`). Display
//! rotation is not applied (`-noautorotate`), so every frame has the probed
//! size. Each [`VideoFile::read`] pulls exactly one frame's worth of bytes.

use std::ffi::OsString;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::thread::{self, JoinHandle};

use super::{AcquisitionError, FrameSource};
use crate::buffer::ImageBuffer;
use crate::camera::CameraError;

/// A running decoder for one video file.
#[derive(Debug)]
pub struct VideoFile {
    path: PathBuf,
    child: Child,
    stdout: ChildStdout,
    /// Collects ffmpeg's stderr so a failed decode can be told from EOF
    stderr_thread: Option<JoinHandle<Vec<String>>>,
    width: u32,
    height: u32,
}

impl VideoFile {
    /// Probe `path` and start decoding it.
    ///
    /// # Errors
    /// * `AcquisitionError::VideoOpen` - If the file is missing or has no video stream
    /// * `AcquisitionError::FfmpegNotFound` - If ffprobe/ffmpeg are not installed
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AcquisitionError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AcquisitionError::VideoOpen {
                path: path.to_path_buf(),
                reason: "no such file".to_string(),
            });
        }

        let (width, height) = probe_dimensions(path)?;
        log::info!("Opening video {} ({}x{})", path.display(), width, height);

        let mut child = Command::new("ffmpeg")
            .args(decoder_args(path))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(path, e))?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(AcquisitionError::StreamFailed(
                "ffmpeg stdout was not captured".to_string(),
            ));
        };

        let stderr_thread = child.stderr.take().map(|stderr| {
            thread::spawn(move || {
                let mut lines = Vec::new();
                for line in BufReader::new(stderr).lines() {
                    match line {
                        Ok(l) => {
                            log::debug!("[ffmpeg] {}", l);
                            lines.push(l);
                        }
                        Err(_) => break,
                    }
                }
                lines
            })
        });

        Ok(Self {
            path: path.to_path_buf(),
            child,
            stdout,
            stderr_thread,
            width,
            height,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }

    /// Decide why stdout closed once ffmpeg has exited.
    fn end_of_stream(&mut self) -> AcquisitionError {
        let success = match self.child.wait() {
            Ok(status) => status.success(),
            Err(e) => {
                log::warn!("Failed to wait for ffmpeg: {}", e);
                false
            }
        };
        let stderr = self
            .stderr_thread
            .take()
            .and_then(|h| h.join().ok())
            .unwrap_or_default();
        stream_end_error(success, &stderr)
    }
}

impl FrameSource for VideoFile {
    fn read(&mut self) -> Result<ImageBuffer, AcquisitionError> {
        let mut data = vec![0u8; self.frame_len()];
        if let Err(e) = self.stdout.read_exact(&mut data) {
            return Err(if e.kind() == ErrorKind::UnexpectedEof {
                self.end_of_stream()
            } else {
                AcquisitionError::StreamFailed(e.to_string())
            });
        }
        let frame = crate::camera::rgb_from_raw(self.width, self.height, data)
            .map_err(|e: CameraError| AcquisitionError::StreamFailed(e.to_string()))?;
        Ok(ImageBuffer::Color(frame))
    }

    fn is_live(&self) -> bool {
        true
    }

    fn detail(&self) -> Option<String> {
        let (width, height) = self.dimensions();
        Some(format!("{}x{}", width, height))
    }
}

impl Drop for VideoFile {
    fn drop(&mut self) {
        if matches!(self.child.try_wait(), Ok(None)) {
            let _ = self.child.kill();
        }
        match self.child.wait() {
            Ok(status) => log::debug!("ffmpeg for {} exited: {}", self.path.display(), status),
            Err(e) => log::warn!("Failed to reap ffmpeg: {}", e),
        }
    }
}

/// Arguments for decoding `path` to raw RGB24 frames on stdout.
fn decoder_args(path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-v", "error", "-noautorotate", "-re", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(path.as_os_str().to_os_string());
    args.extend(["-f", "rawvideo", "-pix_fmt", "rgb24", "-"].map(OsString::from));
    args
}

/// A clean exit with nothing on stderr is the end of the file; anything
/// else is a decode failure.
fn stream_end_error(success: bool, stderr: &[String]) -> AcquisitionError {
    if success && stderr.is_empty() {
        AcquisitionError::StreamEnded
    } else if stderr.is_empty() {
        AcquisitionError::StreamFailed("ffmpeg exited with an error".to_string())
    } else {
        AcquisitionError::StreamFailed(stderr.join("; "))
    }
}

fn spawn_error(path: &Path, e: std::io::Error) -> AcquisitionError {
    if e.kind() == ErrorKind::NotFound {
        AcquisitionError::FfmpegNotFound
    } else {
        AcquisitionError::VideoOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

/// Ask ffprobe for the first video stream's width and height.
fn probe_dimensions(path: &Path) -> Result<(u32, u32), AcquisitionError> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height",
            "-of",
            "csv=s=x:p=0",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| spawn_error(path, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AcquisitionError::VideoOpen {
            path: path.to_path_buf(),
            reason: stderr.trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_dimensions(&stdout).ok_or_else(|| AcquisitionError::VideoOpen {
        path: path.to_path_buf(),
        reason: "no video stream found".to_string(),
    })
}

/// Parse ffprobe's `WIDTHxHEIGHT` output.
fn parse_dimensions(output: &str) -> Option<(u32, u32)> {
    let line = output.lines().map(str::trim).find(|l| !l.is_empty())?;
    let mut parts = line.split('x').filter(|p| !p.is_empty());
    let width: u32 = parts.next()?.trim().parse().ok()?;
    let height: u32 = parts.next()?.trim().parse().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}
