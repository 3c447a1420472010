use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn buffer() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Start holding warnings back, e.g. while a table is being written to stdout.
pub fn activate() {
    *buffer() = Some(Vec::new());
}

/// Stop holding warnings back and return everything collected so far.
pub fn drain() -> Vec<String> {
    buffer().take().unwrap_or_default()
}

/// Record a warning. Held while buffering is active, printed to stderr otherwise.
pub fn warn(msg: String) {
    let mut guard = buffer();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// `eprintln!` that goes through the warning buffer.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::warn(format!($($arg)*))
    };
}
