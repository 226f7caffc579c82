use ratatui::style::Color;

/// Number of work sessions in one cycle; the last one is followed by a long break.
pub const SESSIONS_PER_CYCLE: u8 = 4;

/// Which kind of interval is currently counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    /// Foreground color used for the countdown.
    pub fn color(self) -> Color {
        match self {
            SessionKind::Work => Color::Rgb(0xe7, 0x82, 0x84),
            SessionKind::ShortBreak => Color::Rgb(0xa6, 0xd1, 0x89),
            SessionKind::LongBreak => Color::Rgb(0x8c, 0xaa, 0xee),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::ShortBreak => "short break",
            SessionKind::LongBreak => "long break",
        }
    }
}

/// Session lengths in seconds, keyed by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub work_secs: u32,
    pub short_break_secs: u32,
    pub long_break_secs: u32,
}

impl SessionPolicy {
    pub fn duration(&self, kind: SessionKind) -> u32 {
        match kind {
            SessionKind::Work => self.work_secs,
            SessionKind::ShortBreak => self.short_break_secs,
            SessionKind::LongBreak => self.long_break_secs,
        }
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            work_secs: 25,
            short_break_secs: 5,
            long_break_secs: 30,
        }
    }
}
