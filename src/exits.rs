//! Exit handling: signal handlers, cancellation, and terminal cleanup.

use std::sync::atomic::{AtomicBool, Ordering};

/// Set by the first SIGINT/SIGTERM/SIGHUP; polled by the producer between
/// batches.
static CANCEL: AtomicBool = AtomicBool::new(false);

/// Cancellation flag shared with the pipeline.
pub fn cancel_flag() -> &'static AtomicBool {
    &CANCEL
}

/// Cleanup function registered with atexit - runs on any exit
extern "C" fn cleanup_on_exit() {
    // Only print escape codes if stdout is a TTY (not when piping)
    unsafe {
        if libc::isatty(1) == 1 {
            let reset = b"\x1b[0m\x1b[?25h";
            libc::write(1, reset.as_ptr() as *const libc::c_void, reset.len());
        }
    }
}

/// First signal asks the pipeline to stop after in-flight writes; a second
/// one exits immediately (atexit still restores the terminal).
extern "C" fn signal_handler(_: libc::c_int) {
    if CANCEL.swap(true, Ordering::SeqCst) {
        unsafe { libc::exit(130) }
    }
}

/// Install all signal handlers and register atexit cleanup.
/// Call this early in main().
pub fn install_handlers() {
    unsafe {
        libc::atexit(cleanup_on_exit);
        for sig in [libc::SIGINT, libc::SIGTERM, libc::SIGHUP] {
            libc::signal(sig, signal_handler as *const () as libc::sighandler_t);
        }
    }
}
