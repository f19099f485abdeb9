use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::deck::{Category, Item};
use crate::ui::theme::Theme;

/// The flashcard: case name on top, solution (once revealed) underneath.
pub struct CardView<'a> {
    pub category: Category,
    pub item: Option<&'a Item>,
    pub solution: &'a str,
    pub theme: &'a Theme,
}

impl<'a> CardView<'a> {
    pub fn new(category: Category, item: Option<&'a Item>, solution: &'a str, theme: &'a Theme) -> Self {
        Self {
            category,
            item,
            solution,
            theme,
        }
    }
}

impl Widget for CardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.category))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.card_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let Some(item) = self.item else {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No cases enabled",
                    Style::default().fg(colors.warning()).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Toggle a case on in the list to start drilling",
                    Style::default().fg(colors.text_dim()),
                )),
            ])
            .alignment(Alignment::Center);
            empty.render(inner, buf);
            return;
        };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Length(2),
                Constraint::Min(2),
            ])
            .split(inner);

        let name = Paragraph::new(Line::from(Span::styled(
            item.base_name(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        name.render(layout[1], buf);

        let solution_line = if self.solution.is_empty() {
            Line::from(Span::styled(
                "press [s] to reveal",
                Style::default().fg(colors.text_dim()),
            ))
        } else {
            Line::from(Span::styled(
                self.solution,
                Style::default()
                    .fg(colors.solution())
                    .add_modifier(Modifier::BOLD),
            ))
        };
        Paragraph::new(solution_line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(layout[2], buf);
    }
}
