use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::deck::{Category, Deck};
use crate::store::schema::ProfileData;
use crate::ui::theme::Theme;

pub struct StatsView<'a> {
    pub profile: &'a ProfileData,
    pub deck: &'a Deck,
    pub session_cards: u32,
    pub theme: &'a Theme,
}

impl<'a> StatsView<'a> {
    pub fn new(profile: &'a ProfileData, deck: &'a Deck, session_cards: u32, theme: &'a Theme) -> Self {
        Self {
            profile,
            deck,
            session_cards,
            theme,
        }
    }

    fn category_lines(&self, category: Category) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{category:<12}{:>7}{:>10}{:>8}", "shown", "revealed", "rate"),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        for item in self.deck.pool(category).items() {
            let stats = self.profile.case_stats(category, item);
            let style = if stats.shown == 0 {
                Style::default().fg(colors.text_dim())
            } else {
                Style::default().fg(colors.fg())
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "{:<12}{:>7}{:>10}{:>7.0}%",
                    item.base_name(),
                    stats.shown,
                    stats.revealed,
                    stats.reveal_rate() * 100.0
                ),
                style,
            )));
        }
        lines
    }
}

impl Widget for StatsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Statistics ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(inner);

        let summary = vec![
            Line::from(vec![
                Span::styled("  Cards: ", Style::default().fg(colors.text_dim())),
                Span::styled(
                    format!("{} total, {} this session", self.profile.total_cards, self.session_cards),
                    Style::default().fg(colors.fg()),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Reveals: ", Style::default().fg(colors.text_dim())),
                Span::styled(
                    self.profile.total_reveals.to_string(),
                    Style::default().fg(colors.fg()),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Streak: ", Style::default().fg(colors.text_dim())),
                Span::styled(
                    format!(
                        "{} days (best {})",
                        self.profile.streak_days, self.profile.best_streak
                    ),
                    Style::default().fg(colors.solution()),
                ),
            ]),
        ];
        Paragraph::new(summary).render(layout[0], buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(layout[1]);

        for (category, column) in Category::ALL.into_iter().zip(columns.iter()) {
            let mut lines = vec![Line::from("")];
            lines.extend(self.category_lines(category));
            Paragraph::new(lines).render(column.inner(ratatui::layout::Margin::new(2, 0)), buf);
        }
    }
}
