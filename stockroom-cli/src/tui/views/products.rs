use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::notify::{Toast, ToastKind};
use crate::state::{ProductView, Stats, StockLevel, format_price};

fn level_color(level: StockLevel) -> Color {
    match level {
        StockLevel::InStock => Color::Green,
        StockLevel::Low => Color::Yellow,
        StockLevel::OutOfStock => Color::Red,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn draw(
    frame: &mut Frame,
    rows: &[ProductView],
    stats: Stats,
    table_state: &mut TableState,
    toast: Option<&Toast>,
    confirm_delete: Option<&str>,
    loading: bool,
    last_refresh: Option<chrono::DateTime<chrono::Local>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Stats
            Constraint::Min(5),    // Products table
            Constraint::Length(1), // Legend
            Constraint::Length(1), // Status
        ])
        .split(frame.area());

    draw_title_bar(frame, chunks[0]);
    draw_stats(frame, chunks[1], stats);
    draw_products_table(frame, chunks[2], rows, table_state);

    // Legend
    let legend_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(chunks[3]);

    let legend = Line::from(vec![
        Span::styled(" a", Style::default().fg(Color::Green).bold()),
        Span::styled(":add ", Style::default().fg(Color::DarkGray)),
        Span::styled("e", Style::default().fg(Color::Cyan).bold()),
        Span::styled(":edit ", Style::default().fg(Color::DarkGray)),
        Span::styled("d", Style::default().fg(Color::Red).bold()),
        Span::styled(":delete ", Style::default().fg(Color::DarkGray)),
        Span::styled("r", Style::default().fg(Color::Yellow).bold()),
        Span::styled(":reload ", Style::default().fg(Color::DarkGray)),
        Span::styled("q", Style::default().fg(Color::Magenta).bold()),
        Span::styled(":quit", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(legend), legend_chunks[0]);

    let refresh_time = last_refresh
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("{} ", refresh_time),
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Right),
        legend_chunks[1],
    );

    // Status bar / Confirmation
    if let Some(name) = confirm_delete {
        let mut spans = vec![
            Span::styled(" \u{26a0} ", Style::default().fg(Color::Red)),
            Span::styled(
                format!("Delete product \"{}\"? ", name),
                Style::default().fg(Color::Red).bold(),
            ),
            Span::styled("[y]", Style::default().fg(Color::Green).bold()),
            Span::styled("es / ", Style::default().fg(Color::DarkGray)),
            Span::styled("[n]", Style::default().fg(Color::Red).bold()),
            Span::styled("o ", Style::default().fg(Color::DarkGray)),
        ];
        // A refused confirmation keeps the prompt up, so its toast goes beside it
        if let Some(toast) = toast {
            spans.extend(toast_spans(toast));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[4]);
    } else if let Some(toast) = toast {
        frame.render_widget(Paragraph::new(Line::from(toast_spans(toast))), chunks[4]);
    } else if loading {
        frame.render_widget(
            Paragraph::new(Span::styled(
                " Loading...",
                Style::default().fg(Color::DarkGray),
            )),
            chunks[4],
        );
    }
}

fn toast_spans(toast: &Toast) -> Vec<Span<'static>> {
    let color = match toast.kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    };
    vec![
        Span::styled(
            format!(" {} ", toast.kind.icon()),
            Style::default().fg(color).bold(),
        ),
        Span::styled(toast.message.clone(), Style::default().fg(color)),
    ]
}

fn draw_title_bar(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" stockroom ", Style::default().fg(Color::Cyan).bold()),
        Span::styled("[Products]", Style::default().fg(Color::White).bold()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(title), inner);
}

fn draw_stats(frame: &mut Frame, area: Rect, stats: Stats) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(block.clone(), area);

    let line = Line::from(vec![
        Span::styled(" Products: ", Style::default().fg(Color::DarkGray)),
        Span::styled(stats.count.to_string(), Style::default().fg(Color::White).bold()),
        Span::styled("   Total value: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format_price(stats.total_value),
            Style::default().fg(Color::White).bold(),
        ),
        Span::styled("   Units in stock: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            stats.total_stock.to_string(),
            Style::default().fg(Color::White).bold(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), block.inner(area));
}

fn draw_products_table(
    frame: &mut Frame,
    area: Rect,
    rows: &[ProductView],
    table_state: &mut TableState,
) {
    let block = Block::default()
        .title(" Products ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                " No products yet. Press a to add one.",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block),
            area,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("ID").style(Style::default().fg(Color::Cyan)),
        Cell::from("NAME").style(Style::default().fg(Color::Cyan)),
        Cell::from("PRICE").style(Style::default().fg(Color::Cyan)),
        Cell::from("STOCK").style(Style::default().fg(Color::Cyan)),
    ])
    .style(Style::default().bold())
    .bottom_margin(1);

    let selected_idx = table_state.selected();
    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let bg = if selected_idx == Some(idx) {
                Color::Indexed(236)
            } else {
                Color::Reset
            };
            let color = level_color(row.level);

            Row::new(vec![
                Cell::from(Span::styled(
                    row.id.to_string(),
                    Style::default().fg(Color::DarkGray).bg(bg),
                )),
                Cell::from(Span::styled(row.name.clone(), Style::default().bg(bg))),
                Cell::from(Span::styled(
                    row.price.clone(),
                    Style::default().fg(Color::White).bold().bg(bg),
                )),
                Cell::from(Span::styled(
                    format!("{} ({})", row.stock, row.level.label()),
                    Style::default().fg(color).bg(bg),
                )),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(22),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(block);

    frame.render_stateful_widget(table, area, table_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Product;
    use crate::notify::Notifier;
    use crate::state::ClientState;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn sample_state() -> ClientState {
        let mut state = ClientState::new();
        state.replace(vec![
            Product {
                id: 1,
                name: "Hammer".to_string(),
                price: 10.0,
                stock: 2,
            },
            Product {
                id: 2,
                name: "Nails".to_string(),
                price: 5.0,
                stock: 40,
            },
        ]);
        state
    }

    #[test]
    fn test_draw_table_and_stats() {
        let state = sample_state();
        let mut table_state = TableState::default();
        table_state.select(Some(0));

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|frame| {
                draw(
                    frame,
                    &state.rows(),
                    state.stats(),
                    &mut table_state,
                    None,
                    None,
                    false,
                    None,
                )
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Hammer"));
        assert!(text.contains("$10.00"));
        assert!(text.contains("2 (low)"));
        assert!(text.contains("40 (in stock)"));
        assert!(text.contains("Products: 2"));
        assert!(text.contains("Total value: $220.00"));
        assert!(text.contains("Units in stock: 42"));
    }

    #[test]
    fn test_draw_empty_list() {
        let mut table_state = TableState::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|frame| {
                draw(
                    frame,
                    &[],
                    Stats::default(),
                    &mut table_state,
                    None,
                    None,
                    false,
                    None,
                )
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("No products yet"));
        assert!(text.contains("Total value: $0.00"));
    }

    #[test]
    fn test_confirmation_with_toast() {
        let state = sample_state();
        let mut table_state = TableState::default();
        let mut notifier = Notifier::new();
        notifier.error("Another request is in progress");

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|frame| {
                draw(
                    frame,
                    &state.rows(),
                    state.stats(),
                    &mut table_state,
                    notifier.current(),
                    Some("Hammer"),
                    false,
                    None,
                )
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Delete product \"Hammer\"?"));
        assert!(text.contains("Another request is in progress"));

        terminal
            .draw(|frame| {
                draw(
                    frame,
                    &state.rows(),
                    state.stats(),
                    &mut table_state,
                    notifier.current(),
                    None,
                    false,
                    None,
                )
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(!text.contains("Delete product"));
        assert!(text.contains("Another request is in progress"));
    }
}
