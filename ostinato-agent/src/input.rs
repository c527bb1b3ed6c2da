//! evdev device discovery and event counting.
//!
//! Devices are located by their handler class in
//! `/proc/bus/input/devices` (`kbd` for keyboards, `mouse` for pointing
//! devices). Each device gets a dedicated reader thread that parses raw
//! `input_event` records and bumps a shared atomic counter; the reporting
//! loop drains the counters at each interval.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

// Event type codes from linux/input-event-codes.h.
const EV_KEY: u16 = 0x01;
const EV_REL: u16 = 0x02;
const EV_ABS: u16 = 0x03;

/// Size of `struct input_event` on 64-bit Linux: two 64-bit timestamp
/// fields followed by type, code, and value.
const INPUT_EVENT_SIZE: usize = 24;

/// Minimum gap between counted mouse motion events. Motion arrives as a
/// dense stream; one count per gap keeps the numbers comparable to
/// discrete clicks and key presses.
const MOTION_THROTTLE: Duration = Duration::from_millis(50);

/// Shared counters fed by the reader threads.
pub struct ActivityCounters {
    keyboard: Arc<AtomicU64>,
    mouse: Arc<AtomicU64>,
}

impl ActivityCounters {
    /// Returns both counts and resets them to zero.
    pub fn drain(&self) -> (u64, u64) {
        (
            self.keyboard.swap(0, Ordering::Relaxed),
            self.mouse.swap(0, Ordering::Relaxed),
        )
    }
}

/// Locates the first event device with a `kbd` handler.
///
/// # Errors
///
/// Returns an error if `/proc/bus/input/devices` cannot be read or lists
/// no such device.
pub fn find_keyboard_device() -> Result<PathBuf, Box<dyn std::error::Error>> {
    find_device("kbd")
}

/// Locates the first event device with a `mouse` handler.
///
/// # Errors
///
/// Returns an error if `/proc/bus/input/devices` cannot be read or lists
/// no such device.
pub fn find_mouse_device() -> Result<PathBuf, Box<dyn std::error::Error>> {
    find_device("mouse")
}

fn find_device(handler: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let listing = std::fs::read_to_string("/proc/bus/input/devices")?;
    device_from_listing(&listing, handler).ok_or_else(|| {
        format!("no input device with a '{handler}' handler in /proc/bus/input/devices").into()
    })
}

/// Picks the event node of the first device block whose handlers include
/// the given class.
fn device_from_listing(listing: &str, handler: &str) -> Option<PathBuf> {
    for block in listing.split("\n\n") {
        let Some(handlers) = block
            .lines()
            .find_map(|line| line.strip_prefix("H: Handlers="))
        else {
            continue;
        };

        let fields: Vec<&str> = handlers.split_whitespace().collect();
        if fields.iter().any(|f| f.starts_with(handler))
            && let Some(event) = fields.iter().find(|f| f.starts_with("event"))
        {
            return Some(PathBuf::from(format!("/dev/input/{event}")));
        }
    }
    None
}

/// Opens both devices and spawns a reader thread per device.
///
/// # Errors
///
/// Returns an I/O error if either device cannot be opened (typically a
/// permissions problem — reading evdev requires root or the `input`
/// group).
pub fn spawn_readers(keyboard: &Path, mouse: &Path) -> std::io::Result<ActivityCounters> {
    let counters = ActivityCounters {
        keyboard: Arc::new(AtomicU64::new(0)),
        mouse: Arc::new(AtomicU64::new(0)),
    };

    let keyboard_file = File::open(keyboard)?;
    let keyboard_count = Arc::clone(&counters.keyboard);
    thread::spawn(move || read_keyboard(keyboard_file, &keyboard_count));

    let mouse_file = File::open(mouse)?;
    let mouse_count = Arc::clone(&counters.mouse);
    thread::spawn(move || read_mouse(mouse_file, &mouse_count));

    Ok(counters)
}

/// Counts key presses (value 1), ignoring releases and autorepeat.
fn read_keyboard(mut file: File, count: &AtomicU64) {
    let mut buf = [0u8; INPUT_EVENT_SIZE];
    while file.read_exact(&mut buf).is_ok() {
        let (event_type, _code, value) = parse_event(&buf);
        if event_type == EV_KEY && value == 1 {
            count.fetch_add(1, Ordering::Relaxed);
        }
    }
    tracing::warn!("keyboard device closed, no longer counting");
}

/// Counts button presses/releases and throttled motion.
fn read_mouse(mut file: File, count: &AtomicU64) {
    let mut buf = [0u8; INPUT_EVENT_SIZE];
    let mut last_motion: Option<Instant> = None;

    while file.read_exact(&mut buf).is_ok() {
        let (event_type, _code, value) = parse_event(&buf);
        if event_type == EV_KEY && (value == 0 || value == 1) {
            count.fetch_add(1, Ordering::Relaxed);
        } else if (event_type == EV_REL || event_type == EV_ABS)
            && last_motion.is_none_or(|t| t.elapsed() >= MOTION_THROTTLE)
        {
            last_motion = Some(Instant::now());
            count.fetch_add(1, Ordering::Relaxed);
        }
    }
    tracing::warn!("mouse device closed, no longer counting");
}

/// Extracts (type, code, value) from a raw `input_event` record.
fn parse_event(buf: &[u8; INPUT_EVENT_SIZE]) -> (u16, u16, i32) {
    let event_type = u16::from_ne_bytes([buf[16], buf[17]]);
    let code = u16::from_ne_bytes([buf[18], buf[19]]);
    let value = i32::from_ne_bytes([buf[20], buf[21], buf[22], buf[23]]);
    (event_type, code, value)
}
