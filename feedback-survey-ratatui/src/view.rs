//! Rendering of every survey screen.

use feedback_survey::{Clock, KeyValueStore, Phase, QuestionKind, SurveyRunner, catalog};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{Theme, UiState};

/// Draw whatever the runner currently shows.
pub fn draw<S: KeyValueStore, C: Clock>(
    frame: &mut Frame,
    runner: &SurveyRunner<S, C>,
    ui: &UiState,
    theme: &Theme,
    title: &str,
) {
    match runner.phase() {
        Phase::Welcome => draw_welcome(frame, runner, theme, title),
        Phase::InProgress | Phase::Confirming => draw_question(frame, runner, ui, theme, title),
        Phase::ThankYou => {
            let text = runner
                .definition()
                .thank_you
                .as_deref()
                .unwrap_or(catalog::THANK_YOU);
            draw_message(frame, theme, " Submitted ", text);
        }
        Phase::ComeBackLater => {
            draw_message(frame, theme, " Already Completed ", catalog::COME_BACK_LATER);
        }
    }
}

fn centered(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Min(5),
            Constraint::Percentage(35),
        ])
        .split(area)[1]
}

fn draw_welcome<S: KeyValueStore, C: Clock>(
    frame: &mut Frame,
    runner: &SurveyRunner<S, C>,
    theme: &Theme,
    title: &str,
) {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(theme.highlight).bold());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let welcome = runner
        .definition()
        .welcome
        .as_deref()
        .unwrap_or(catalog::WELCOME);
    let mut lines = vec![
        Line::from(welcome.to_string()).style(Style::default().fg(theme.primary).bold()),
        Line::default(),
    ];
    let restored = runner.answers().len();
    if restored > 0 {
        lines.push(
            Line::from(format!("{restored} earlier answer(s) restored"))
                .style(Style::default().fg(theme.secondary)),
        );
        lines.push(Line::default());
    }
    lines.push(Line::from("[ Start ]  press Enter").style(Style::default().fg(theme.highlight)));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered(inner));
}

fn draw_message(frame: &mut Frame, theme: &Theme, block_title: &str, text: &str) {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.success))
        .title(block_title.to_string())
        .title_style(Style::default().fg(theme.success).bold());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(text.to_string())
        .style(Style::default().fg(theme.text).bold())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered(inner));
}

fn draw_question<S: KeyValueStore, C: Clock>(
    frame: &mut Frame,
    runner: &SurveyRunner<S, C>,
    ui: &UiState,
    theme: &Theme,
    title: &str,
) {
    let area = frame.area();
    let confirming = runner.phase() == Phase::Confirming;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),                               // Header
            Constraint::Length(2),                               // Progress bar
            Constraint::Min(8),                                  // Question
            Constraint::Length(if confirming { 4 } else { 0 }), // Confirm prompt
            Constraint::Length(3),                               // Help
        ])
        .split(area);

    let header = Paragraph::new(title.to_string())
        .style(Style::default().fg(theme.primary).bold())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(header, chunks[0]);

    draw_progress(
        frame,
        chunks[1],
        theme,
        runner.current_index() + 1,
        runner.definition().len(),
    );

    let content_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Prompt
            Constraint::Min(3),    // Answer area
            Constraint::Length(1), // Previous / Next / Skip
        ])
        .split(chunks[2]);

    let question = runner.current_question();
    let prompt = Paragraph::new(question.prompt().to_string())
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .title(format!(" Question {} ", runner.current_index() + 1))
                .title_style(Style::default().fg(theme.highlight)),
        );
    frame.render_widget(prompt, content_chunks[0]);

    match question.kind() {
        QuestionKind::Rating { options } => {
            let mut spans = Vec::with_capacity(options.len() * 2);
            for (i, option) in options.iter().enumerate() {
                let style = if i == ui.selected_option() {
                    Style::default().fg(theme.highlight).bold().reversed()
                } else {
                    Style::default().fg(theme.text)
                };
                spans.push(Span::styled(format!("[ {option} ]"), style));
                spans.push(Span::raw(" "));
            }
            let buttons = Paragraph::new(Line::from(spans))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.border))
                        .title(" Rating ")
                        .title_style(Style::default().fg(theme.secondary)),
                );
            frame.render_widget(buttons, content_chunks[1]);
        }
        QuestionKind::Text => {
            let area = content_chunks[1];
            // Scroll sideways so the cursor stays inside the borders.
            let inner_width = usize::from(area.width.saturating_sub(2));
            let scroll = ui.cursor_pos().saturating_sub(inner_width.saturating_sub(1));
            let input = Paragraph::new(ui.input().to_string())
                .style(Style::default().fg(theme.text))
                .scroll((0, u16::try_from(scroll).unwrap_or(u16::MAX)))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.border))
                        .title(" Your feedback ")
                        .title_style(Style::default().fg(theme.secondary)),
                );
            frame.render_widget(input, area);

            if inner_width > 0 {
                let column = u16::try_from(ui.cursor_pos() - scroll).unwrap_or(0);
                frame.set_cursor_position((area.x + 1 + column, area.y + 1));
            }
        }
    }

    let enabled = Style::default().fg(theme.text);
    let disabled = Style::default().fg(theme.border).dim();
    let nav = Line::from(vec![
        Span::styled(
            "◄ Previous",
            if runner.is_first() { disabled } else { enabled },
        ),
        Span::raw("    "),
        Span::styled(
            "Next ►",
            if runner.is_last() || confirming {
                disabled
            } else {
                enabled
            },
        ),
        Span::raw("    "),
        Span::styled("Skip", if confirming { disabled } else { enabled }),
    ]);
    frame.render_widget(
        Paragraph::new(nav).alignment(Alignment::Center),
        content_chunks[2],
    );

    if confirming {
        let confirm = Paragraph::new(vec![
            Line::from("Are you sure you want to submit the survey?"),
            Line::from("[ Yes ]  press Enter").style(Style::default().fg(theme.success).bold()),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.success))
                .title(" Confirm Submit ")
                .title_style(Style::default().fg(theme.success).bold()),
        );
        frame.render_widget(confirm, chunks[3]);
    }

    let help_text = match (question.kind(), confirming) {
        (_, true) => "Enter: Submit  Shift+Tab: Previous  Ctrl+R: Restart  Esc: Quit",
        (QuestionKind::Rating { .. }, false) => {
            "←/→: Select  Enter: Answer  Tab: Next  Shift+Tab: Previous  Ctrl+S: Skip  Esc: Quit"
        }
        (QuestionKind::Text, false) => {
            "Type your answer  Enter: Answer  Tab: Next  Shift+Tab: Previous  Ctrl+S: Skip  Esc: Quit"
        }
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(theme.border))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(help, chunks[4]);
}

/// Thin progress bar with a "current / total" caption below it.
fn draw_progress(frame: &mut Frame, area: Rect, theme: &Theme, current: usize, total: usize) {
    let progress_text = format!(" {current} / {total} ");
    let bar_width = area.width.saturating_sub(2);
    let text_width = u16::try_from(progress_text.len()).unwrap_or(bar_width);

    let ratio = if total == 0 {
        0.0
    } else {
        current as f32 / total as f32
    };
    let filled_width = (ratio * f32::from(bar_width)) as u16;

    let bar_x = area.x + 1;
    let bar_y = area.y;

    let track = "─".repeat(usize::from(bar_width));
    frame.render_widget(
        Paragraph::new(track).style(Style::default().fg(theme.border)),
        Rect::new(bar_x, bar_y, bar_width, 1),
    );

    if filled_width > 0 {
        let filled = "━".repeat(usize::from(filled_width));
        frame.render_widget(
            Paragraph::new(filled).style(Style::default().fg(theme.primary)),
            Rect::new(bar_x, bar_y, filled_width, 1),
        );
    }

    let text_x = bar_x + bar_width.saturating_sub(text_width) / 2;
    frame.render_widget(
        Paragraph::new(progress_text).style(Style::default().fg(theme.secondary)),
        Rect::new(text_x, bar_y + 1, text_width.min(bar_width), 1),
    );
}
