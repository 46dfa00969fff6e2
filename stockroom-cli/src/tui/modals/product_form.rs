//! Modal for adding or editing a product

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::client::{Product, ProductInput};
use crate::form::{FormError, ProductForm};
use crate::tui::types::FormMode;

pub struct ProductFormModal {
    pub mode: FormMode,
    pub form: ProductForm,
    pub focused_field: usize,
}

impl ProductFormModal {
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            form: ProductForm::new(),
            focused_field: 0,
        }
    }

    pub fn edit(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit(product.id),
            form: ProductForm::from_product(product),
            focused_field: 0,
        }
    }

    pub fn field_count() -> usize {
        4 // name, price, stock, submit
    }

    pub fn focus_next(&mut self) {
        self.focused_field = (self.focused_field + 1) % Self::field_count();
    }

    pub fn focus_prev(&mut self) {
        self.focused_field = if self.focused_field == 0 {
            Self::field_count() - 1
        } else {
            self.focused_field - 1
        };
    }

    pub fn current_input(&mut self) -> Option<&mut String> {
        match self.focused_field {
            0 => Some(&mut self.form.name),
            1 => Some(&mut self.form.price),
            2 => Some(&mut self.form.stock),
            _ => None,
        }
    }

    pub fn is_numeric_field(&self) -> bool {
        self.focused_field == 1 || self.focused_field == 2
    }

    pub fn is_submit_field(&self) -> bool {
        self.focused_field == 3
    }

    /// Characters accepted in the price and stock fields.
    pub fn is_valid_numeric_char(c: char) -> bool {
        c.is_ascii_digit() || c == '.' || c == '-'
    }

    pub fn validate(&self) -> Result<ProductInput, FormError> {
        self.form.validate()
    }
}

pub fn draw(frame: &mut Frame, modal: &ProductFormModal) {
    let area = centered_rect(50, 12, frame.area());
    frame.render_widget(Clear, area);

    let title = match modal.mode {
        FormMode::Add => " Add Product ".to_string(),
        FormMode::Edit(id) => format!(" Edit Product #{} ", id),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block.clone(), area);

    let inner = block.inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Name
            Constraint::Length(2), // Price
            Constraint::Length(2), // Stock
            Constraint::Length(2), // Submit
        ])
        .split(inner);

    let fields = [
        (" Name:  ", &modal.form.name, None),
        (" Price: ", &modal.form.price, Some(" (e.g. 9.99)")),
        (" Stock: ", &modal.form.stock, Some(" (units, 0 or more)")),
    ];

    for (idx, (label, value, hint)) in fields.into_iter().enumerate() {
        let focused = modal.focused_field == idx;
        let value_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let mut spans = vec![
            Span::styled(label, Style::default().fg(Color::Cyan)),
            Span::styled(value.as_str(), value_style),
        ];
        if focused {
            spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
        }
        if let Some(hint) = hint
            && value.is_empty()
            && !focused
        {
            spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[idx]);
    }

    let submit_label = match modal.mode {
        FormMode::Add => " [ Add ] ",
        FormMode::Edit(_) => " [ Save ] ",
    };
    let submit_style = if modal.is_submit_field() {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Cyan)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(submit_label, submit_style)).alignment(Alignment::Center),
        chunks[3],
    );
}

pub(crate) fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - height.min(100)) / 2),
            Constraint::Length(height),
            Constraint::Percentage((100 - height.min(100)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
