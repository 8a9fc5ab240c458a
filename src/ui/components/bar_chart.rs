use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Widget};

use crate::engine::run::{RunStatus, SortRun};
use crate::ui::theme::Theme;

const EIGHTHS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Renders the run's array as vertical bars scaled to `max(array, 1)`.
pub struct BarChart<'a> {
    run: &'a SortRun,
    title: String,
    theme: &'a Theme,
}

impl<'a> BarChart<'a> {
    pub fn new(run: &'a SortRun, title: String, theme: &'a Theme) -> Self {
        Self { run, title, theme }
    }
}

/// Sorted-green once done, highlight-red under comparison, default otherwise.
pub fn bar_color(run: &SortRun, index: usize, theme: &Theme) -> Color {
    let colors = &theme.colors;
    if run.status == RunStatus::Done {
        colors.bar_sorted()
    } else if run.is_highlighted(index) {
        colors.bar_highlight()
    } else {
        colors.bar_default()
    }
}

/// Column width per bar and whether a one-column gap follows it.
fn bar_geometry(width: u16, count: usize) -> (u16, u16) {
    if count == 0 {
        return (0, 0);
    }
    let slot = (width as usize / count).max(1) as u16;
    if slot >= 3 { (slot - 1, 1) } else { (slot, 0) }
}

impl Widget for BarChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 || self.run.array.is_empty() {
            return;
        }

        let (bar_w, gap) = bar_geometry(inner.width, self.run.array.len());
        let used = (bar_w + gap) as usize * self.run.array.len();
        let left_pad = (inner.width as usize).saturating_sub(used) as u16 / 2;
        let bottom = inner.y + inner.height - 1;

        for index in 0..self.run.array.len() {
            let x0 = inner.x + left_pad + index as u16 * (bar_w + gap);
            if x0 + bar_w > inner.x + inner.width {
                break;
            }

            let eighths = (self.run.bar_ratio(index) * inner.height as f64 * 8.0).round() as u32;
            let full_rows = (eighths / 8) as u16;
            let partial = (eighths % 8) as usize;
            let style = Style::default().fg(bar_color(self.run, index, self.theme));

            for x in x0..x0 + bar_w {
                for row in 0..full_rows.min(inner.height) {
                    buf[(x, bottom - row)].set_symbol(EIGHTHS[7]).set_style(style);
                }
                if partial > 0 && full_rows < inner.height {
                    buf[(x, bottom - full_rows)]
                        .set_symbol(EIGHTHS[partial - 1])
                        .set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(run: &SortRun, width: u16, height: u16) -> Buffer {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        BarChart::new(run, "Bars".to_string(), &theme).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_bar_color_precedence() {
        let theme = Theme::default();
        let colors = &theme.colors;
        let mut run = SortRun::new(vec![3, 1, 2]);
        run.status = RunStatus::Running;
        run.highlighted = vec![0, 1];
        assert_eq!(bar_color(&run, 0, &theme), colors.bar_highlight());
        assert_eq!(bar_color(&run, 2, &theme), colors.bar_default());

        run.status = RunStatus::Done;
        assert_eq!(bar_color(&run, 0, &theme), colors.bar_sorted());
    }

    #[test]
    fn test_bar_geometry() {
        assert_eq!(bar_geometry(40, 10), (3, 1));
        assert_eq!(bar_geometry(20, 10), (2, 0));
        assert_eq!(bar_geometry(5, 10), (1, 0));
        assert_eq!(bar_geometry(5, 0), (0, 0));
    }

    #[test]
    fn test_tallest_bar_fills_inner_height() {
        // 2 bars in a 10x6 area: inner is 8x4, slot 4 -> bar width 3 + gap.
        let run = SortRun::new(vec![50, 100]);
        let buf = render(&run, 10, 6);
        for y in 1..5 {
            assert_eq!(buf[(5, y)].symbol(), "█");
        }
        // Half-height bar fills the bottom two rows only.
        assert_eq!(buf[(1, 4)].symbol(), "█");
        assert_eq!(buf[(1, 3)].symbol(), "█");
        assert_eq!(buf[(1, 2)].symbol(), " ");
    }

    #[test]
    fn test_highlighted_bar_uses_highlight_color() {
        let theme = Theme::default();
        let mut run = SortRun::new(vec![100, 100]);
        run.status = RunStatus::Running;
        run.highlighted = vec![1];
        let buf = render(&run, 10, 6);
        assert_eq!(buf[(1, 4)].fg, theme.colors.bar_default());
        assert_eq!(buf[(5, 4)].fg, theme.colors.bar_highlight());
    }

    #[test]
    fn test_empty_array_renders_only_border() {
        let run = SortRun::default();
        let buf = render(&run, 10, 6);
        assert_eq!(buf[(3, 3)].symbol(), " ");
    }
}
