use crossterm::event::KeyEvent;

/// All events funnelled through the main loop's mpsc channel.
#[derive(Debug)]
pub enum AppEvent {
    /// A keypress from the keyboard-reading thread.
    Key(KeyEvent),
    /// The terminal was resized to `(width, height)`.
    Resize(u16, u16),
    /// A scheduled one-second wake-up came due.
    Tick,
}
