use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::engine::algorithm::Algorithm;
use crate::ui::theme::Theme;

/// Algorithm picker. Each entry shows its hotkey, title and explanation.
pub struct Menu<'a> {
    pub items: Vec<Algorithm>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            items: Algorithm::ALL.to_vec(),
            selected: 0,
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn select(&mut self, algorithm: Algorithm) {
        if let Some(pos) = self.items.iter().position(|&a| a == algorithm) {
            self.selected = pos;
        }
    }

    pub fn current(&self) -> Algorithm {
        self.items[self.selected]
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("ui.select_algorithm")))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            t!("ui.title").to_string(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let item_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(5))
                    .collect::<Vec<_>>(),
            )
            .split(layout[1]);

        for (i, algorithm) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{}] {}", i + 1, algorithm.title());
            let lines = vec![
                Line::from(Span::styled(
                    label_text,
                    Style::default()
                        .fg(if is_selected {
                            colors.accent()
                        } else {
                            colors.fg()
                        })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(
                    format!("     {}", algorithm.description()),
                    Style::default().fg(colors.text_dim()),
                )),
            ];

            if i < item_layout.len() {
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .render(item_layout[i], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let theme = Theme::default();
        let mut menu = Menu::new(&theme);
        assert_eq!(menu.current(), Algorithm::Bubble);
        menu.prev();
        assert_eq!(menu.current(), Algorithm::Insertion);
        menu.next();
        menu.next();
        assert_eq!(menu.current(), Algorithm::Selection);
    }

    #[test]
    fn test_select_by_algorithm() {
        let theme = Theme::default();
        let mut menu = Menu::new(&theme);
        menu.select(Algorithm::Insertion);
        assert_eq!(menu.selected, 2);
    }
}
