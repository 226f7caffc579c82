use ratatui::{
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

use crate::session::SESSIONS_PER_CYCLE;
use crate::timer::TimerState;

const HELP: &str = "Press 's' to start, 'p' to pause, 'q' to quit.";

/// Rows taken by the status bar and body, excluded from vertical padding.
const CHROME_ROWS: i32 = 7;

/// Push the current frame to the terminal.
pub fn draw(frame: &mut Frame, state: &TimerState) {
    frame.render_widget(Paragraph::new(render(state)), frame.area());
}

/// Build the full frame for `state`: status bar, vertical padding, then the
/// body centered within the viewport width.
pub fn render(state: &TimerState) -> Text<'static> {
    let status = if state.running { "Running" } else { "Stopped" };
    let status_text = format!(
        " Cycle: {}/{} Timer: {status} ",
        state.cycle_index + 1,
        SESSIONS_PER_CYCLE,
    );
    let status_bar = Line::from(Span::styled(
        status_text,
        Style::default()
            .fg(Color::Indexed(7))
            .bg(Color::Indexed(236)),
    ));

    let padding = ((i32::from(state.viewport_height) - CHROME_ROWS) / 2).max(0) as usize;

    let width = state.viewport_width;
    let time_left = centered(
        vec![
            Span::raw("Time Left: "),
            Span::styled(
                format_remaining(state.remaining_secs),
                Style::default().fg(state.kind.color()),
            ),
        ],
        width,
    );
    let controls = centered(
        vec![Span::styled(
            HELP,
            Style::default().fg(Color::Rgb(0x83, 0x8b, 0xa7)),
        )],
        width,
    );

    let mut lines = Vec::with_capacity(padding + 5);
    lines.push(status_bar);
    lines.extend((0..=padding).map(|_| Line::default()));
    lines.push(time_left);
    lines.push(Line::default());
    lines.push(controls);
    Text::from(lines)
}

/// `MM:SS`, both fields zero-padded.
pub fn format_remaining(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Left-pad `spans` so the line sits in the middle of `width` columns.
fn centered(mut spans: Vec<Span<'static>>, width: u16) -> Line<'static> {
    let content: usize = spans.iter().map(Span::width).sum();
    let pad = usize::from(width).saturating_sub(content) / 2;
    if pad > 0 {
        spans.insert(0, Span::raw(" ".repeat(pad)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionKind;
    use crate::timer::TimerEngine;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn state(width: u16, height: u16) -> TimerState {
        TimerEngine::default().initial_state(width, height)
    }

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn index_of(text: &Text, needle: &str) -> usize {
        text.lines
            .iter()
            .position(|l| plain(l).contains(needle))
            .expect("line should be present")
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_remaining(65), "01:05");
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(25), "00:25");
        assert_eq!(format_remaining(30 * 60), "30:00");
    }

    #[test]
    fn status_bar_shows_cycle_and_run_state() {
        let mut s = state(80, 24);
        assert_eq!(plain(&render(&s).lines[0]), " Cycle: 1/4 Timer: Stopped ");

        s.running = true;
        s.cycle_index = 3;
        assert_eq!(plain(&render(&s).lines[0]), " Cycle: 4/4 Timer: Running ");
    }

    #[test]
    fn body_is_padded_vertically() {
        // (24 - 7) / 2 = 8 padding rows, plus the separator row.
        let text = render(&state(80, 24));
        assert_eq!(index_of(&text, "Time Left:"), 1 + 8 + 1);
        assert!(text.lines[1..10].iter().all(|l| plain(l).is_empty()));
        assert_eq!(index_of(&text, HELP), 12);
    }

    #[test]
    fn short_viewport_renders_at_top() {
        for height in [0, 3, 7, 8] {
            let text = render(&state(80, height));
            assert_eq!(index_of(&text, "Time Left:"), 2, "height {height}");
        }
    }

    #[test]
    fn body_is_centered_horizontally() {
        let text = render(&state(40, 10));
        let line = plain(&text.lines[index_of(&text, "Time Left:")]);
        // "Time Left: 00:25" is 16 columns wide.
        assert_eq!(line, format!("{}Time Left: 00:25", " ".repeat(12)));
    }

    #[test]
    fn narrow_viewport_gets_no_horizontal_padding() {
        let text = render(&state(0, 10));
        let help = plain(&text.lines[index_of(&text, HELP)]);
        assert_eq!(help, HELP);
    }

    #[test]
    fn countdown_colored_by_session_kind() {
        let mut s = state(80, 24);
        for kind in [SessionKind::Work, SessionKind::ShortBreak, SessionKind::LongBreak] {
            s.kind = kind;
            let text = render(&s);
            let line = &text.lines[index_of(&text, "Time Left:")];
            let timer = line
                .spans
                .iter()
                .find(|span| span.content == "00:25")
                .expect("timer span");
            assert_eq!(timer.style.fg, Some(kind.color()));
        }
    }

    #[test]
    fn draw_renders_into_terminal() {
        let backend = TestBackend::new(60, 15);
        let mut terminal = Terminal::new(backend).unwrap();
        let s = state(60, 15);
        terminal.draw(|frame| draw(frame, &s)).unwrap();

        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = (0..15u16)
            .map(|y| (0..60u16).map(|x| buffer[(x, y)].symbol()).collect())
            .collect();
        assert!(rows[0].starts_with(" Cycle: 1/4 Timer: Stopped"));
        assert!(rows[6].contains("Time Left: 00:25"));
        assert!(rows[8].contains(HELP));
    }
}
