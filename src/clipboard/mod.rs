use arboard::Clipboard;

/// Maximum clipboard size (10MB) accepted for writes
pub const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Backend(#[from] arboard::Error),
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("Cannot copy empty text to clipboard")]
    Empty,
    #[error("Text too large for clipboard ({size} bytes, max {max})")]
    TooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Host clipboard capability used by the history engine (allows fakes in tests)
pub trait ClipboardAccess {
    /// Current clipboard text; an empty string when the clipboard holds no text
    fn read_text(&mut self) -> Result<String>;

    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard implementation using arboard
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new()?;
        Ok(Self { clipboard })
    }

    /// Write `text` and keep serving it until another application takes the clipboard.
    ///
    /// On X11 and Wayland the copying process owns the selection, so the text is only
    /// pasteable while this call blocks. Other platforms keep the contents after the
    /// process exits and this returns straight away.
    pub fn write_text_and_wait(&mut self, text: &str) -> Result<()> {
        validate_clipboard_text(text)?;
        self.serve_until_replaced(text)
    }

    #[cfg(all(unix, not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))))]
    fn serve_until_replaced(&mut self, text: &str) -> Result<()> {
        use arboard::SetExtLinux;

        self.clipboard.set().wait().text(text)?;
        Ok(())
    }

    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    fn serve_until_replaced(&mut self, text: &str) -> Result<()> {
        self.write_text(text)
    }
}

/// Whether clipboard contents disappear when the process that copied them exits
pub const fn clipboard_owned_by_process() -> bool {
    cfg!(all(unix, not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))))
}

impl ClipboardAccess for SystemClipboard {
    fn read_text(&mut self) -> Result<String> {
        match self.clipboard.get_text() {
            Ok(text) => Ok(text),
            // Images, files, or nothing at all: not a failure, just no text
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text)?;
        Ok(())
    }
}

/// In-process clipboard with failure injection, for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: String,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    /// Simulate another application copying `text`
    pub fn set_external(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl ClipboardAccess for MemoryClipboard {
    fn read_text(&mut self) -> Result<String> {
        if self.fail_reads {
            return Err(ClipboardError::Unavailable("simulated read failure".to_string()));
        }
        Ok(self.text.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.fail_writes {
            return Err(ClipboardError::Unavailable("simulated write failure".to_string()));
        }
        self.text = text.to_string();
        self.writes += 1;
        Ok(())
    }
}

/// Validates clipboard text without accessing system clipboard
pub fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(ClipboardError::Empty);
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        return Err(ClipboardError::TooLarge { size: text.len(), max: MAX_CLIPBOARD_SIZE });
    }

    Ok(())
}

/// Validate then write through any clipboard implementation
pub fn copy_with<C: ClipboardAccess + ?Sized>(clipboard: &mut C, text: &str) -> Result<()> {
    validate_clipboard_text(text)?;
    clipboard.write_text(text)
}

/// Copy text to the system clipboard.
///
/// # Errors
/// Returns error if:
/// - Text is empty
/// - Text is too large for clipboard (>10MB)
/// - Clipboard is locked by another process
/// - System clipboard is unavailable (headless environment)
///
/// # Platform Support
/// - macOS: pasteboard API
/// - Linux: X11 or Wayland (data-control protocol)
/// - Windows: Win32 clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    // Validate first, before initializing clipboard (for better error messages in CI)
    validate_clipboard_text(text)?;

    let mut clipboard = SystemClipboard::new()?;
    clipboard.write_text(text)
}
