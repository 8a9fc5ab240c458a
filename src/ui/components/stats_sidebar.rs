use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::engine::controller::RunController;
use crate::engine::run::RunStatus;
use crate::session::result::RunResult;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

pub struct StatsSidebar<'a> {
    controller: &'a RunController,
    history: &'a [RunResult],
    theme: &'a Theme,
}

impl<'a> StatsSidebar<'a> {
    pub fn new(controller: &'a RunController, history: &'a [RunResult], theme: &'a Theme) -> Self {
        Self {
            controller,
            history,
            theme,
        }
    }
}

/// Two lines per run: what was sorted, then the counts and swap ratio.
fn format_result(result: &RunResult) -> [String; 2] {
    let outcome = if result.completed {
        t!("ui.completed")
    } else {
        t!("ui.cancelled")
    };
    [
        format!(
            "{:<9} n={:<3} {outcome}",
            result.algorithm.as_str(),
            result.size,
        ),
        format!(
            "  {}c {}s ({:.2})",
            result.comparisons,
            result.swaps,
            result.swap_ratio(),
        ),
    ]
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let run = self.controller.run();

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(9),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(area);

        // Current run
        {
            let status_color = match run.status {
                RunStatus::Ready => colors.fg(),
                RunStatus::Running => colors.bar_highlight(),
                RunStatus::Done => colors.bar_sorted(),
            };
            let label_style = Style::default().fg(colors.text_dim());
            let value_style = Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD);

            let rows: Vec<(String, String, Style)> = vec![
                (
                    t!("ui.status").to_string(),
                    run.status.label(),
                    value_style.fg(status_color),
                ),
                (
                    t!("ui.algorithm").to_string(),
                    self.controller.algorithm().title().to_string(),
                    value_style,
                ),
                (
                    t!("ui.comparisons").to_string(),
                    run.comparisons.to_string(),
                    value_style,
                ),
                (t!("ui.swaps").to_string(), run.swaps.to_string(), value_style),
                (
                    t!("ui.speed").to_string(),
                    format!("{}ms", self.controller.speed_ms()),
                    value_style,
                ),
                (
                    t!("ui.size").to_string(),
                    run.array.len().to_string(),
                    value_style,
                ),
            ];

            let lines: Vec<Line> = rows
                .into_iter()
                .map(|(label, value, style)| {
                    Line::from(vec![
                        Span::styled(format!(" {label:<13}"), label_style),
                        Span::styled(value, style),
                    ])
                })
                .collect();

            let block = Block::bordered()
                .title(format!(" {} ", run.status.label()))
                .border_style(Style::default().fg(colors.border()));
            Paragraph::new(lines).block(block).render(sections[0], buf);
        }

        ProgressBar::new(&t!("ui.progress"), run.progress(), self.theme)
            .done(run.status == RunStatus::Done)
            .render(sections[1], buf);

        // Recent runs
        {
            let lines: Vec<Line> = if self.history.is_empty() {
                vec![Line::from(Span::styled(
                    format!(" {}", t!("ui.no_runs")),
                    Style::default().fg(colors.text_dim()),
                ))]
            } else {
                self.history
                    .iter()
                    .flat_map(|r| {
                        let color = if r.completed {
                            colors.fg()
                        } else {
                            colors.warning()
                        };
                        format_result(r).map(|text| {
                            Line::from(Span::styled(format!(" {text}"), Style::default().fg(color)))
                        })
                    })
                    .collect()
            };

            let block = Block::bordered()
                .title(format!(" {} ", t!("ui.recent_runs")))
                .border_style(Style::default().fg(colors.border()));
            Paragraph::new(lines).block(block).render(sections[2], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::engine::algorithm::Algorithm;

    #[test]
    fn test_format_result_shows_counts_and_swap_ratio() {
        let result = RunResult {
            algorithm: Algorithm::Bubble,
            size: 5,
            comparisons: 10,
            swaps: 4,
            speed_ms: 50,
            elapsed_secs: 0.5,
            completed: true,
            timestamp: Utc::now(),
        };
        let [head, counts] = format_result(&result);
        assert!(head.starts_with("bubble"));
        assert!(head.contains("n=5"));
        assert_eq!(counts, "  10c 4s (0.40)");
    }
}
