use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::deck::{CategoryPool, Item};
use crate::ui::theme::Theme;

/// Checkbox list of every case in the active category.
pub struct ToggleList<'a> {
    pub pool: &'a CategoryPool,
    pub selected: usize,
    pub current: Option<&'a Item>,
    pub theme: &'a Theme,
}

impl<'a> ToggleList<'a> {
    pub fn new(pool: &'a CategoryPool, selected: usize, current: Option<&'a Item>, theme: &'a Theme) -> Self {
        Self {
            pool,
            selected,
            current,
            theme,
        }
    }
}

impl Widget for ToggleList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = format!(
            " Cases {}/{} ",
            self.pool.enabled_count(),
            self.pool.items().len()
        );
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let visible = inner.height as usize;
        if visible == 0 {
            return;
        }
        // Keep the cursor row on screen
        let offset = self.selected.saturating_sub(visible - 1);

        let lines: Vec<Line> = self
            .pool
            .items()
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, item)| {
                let enabled = self.pool.is_enabled(item);
                let is_selected = i == self.selected;
                let is_current = self.current == Some(item);

                let cursor = if is_selected { ">" } else { " " };
                let checkbox = if enabled { "[x]" } else { "[ ]" };
                let marker = if is_current { " *" } else { "" };

                let mut name_style = Style::default().fg(if enabled {
                    colors.fg()
                } else {
                    colors.text_dim()
                });
                if is_selected {
                    name_style = name_style.bg(colors.accent_dim()).add_modifier(Modifier::BOLD);
                }

                Line::from(vec![
                    Span::styled(cursor, Style::default().fg(colors.accent())),
                    Span::styled(
                        format!(" {checkbox} "),
                        Style::default().fg(if enabled {
                            colors.enabled()
                        } else {
                            colors.disabled()
                        }),
                    ),
                    Span::styled(item.base_name().to_string(), name_style),
                    Span::styled(marker, Style::default().fg(colors.accent())),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
