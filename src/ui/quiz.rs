use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, Widget};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let question = app.current_question();
    let has_image = question.image().is_some();
    let chunks = create_layout(area, has_image);

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[1], question.text());

    let widget_chunk = if has_image {
        let image = question.image().unwrap();
        render_image_line(frame, chunks[2], &image.0.display().to_string());
        chunks[3]
    } else {
        chunks[2]
    };

    render_input_widget(frame, widget_chunk, app);

    let controls_chunk = if has_image { chunks[4] } else { chunks[3] };
    render_controls(frame, controls_chunk, app.current_widget());
}

fn create_layout(area: Rect, has_image: bool) -> std::rc::Rc<[Rect]> {
    if has_image {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .margin(1)
        .split(area)
    } else {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .margin(2)
        .split(area)
    }
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = format!(
        "{}/{}",
        app.current_question_number(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_image_line(frame: &mut Frame, area: Rect, path: &str) {
    let widget = Paragraph::new(format!("image: {}", path)).fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_input_widget(frame: &mut Frame, area: Rect, app: &App) {
    match app.current_widget() {
        Widget::Text(state) => render_text_entry(frame, area, state.borrow().value()),
        Widget::Single(state) => {
            let state = state.borrow();
            let markers: Vec<bool> = (0..state.options().len())
                .map(|index| state.chosen() == Some(index))
                .collect();
            render_options(frame, area, state.options(), &markers, app.highlight(), false);
        }
        Widget::Multi(state) => {
            let state = state.borrow();
            let markers: Vec<bool> = (0..state.options().len())
                .map(|index| state.is_checked(index))
                .collect();
            render_options(frame, area, state.options(), &markers, app.highlight(), true);
        }
        Widget::Missing => render_missing(frame, area),
    }
}

fn render_text_entry(frame: &mut Frame, area: Rect, value: &str) {
    let widget = Paragraph::new(format!("{}_", value)).fg(Color::Cyan).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[String],
    marked: &[bool],
    highlighted: usize,
    multi: bool,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_highlighted = index == highlighted;
        let style = if is_highlighted {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if is_highlighted { ">" } else { " " };
        let marker = match (multi, marked[index]) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(x)",
            (false, false) => "( )",
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", cursor), style),
            Span::styled(format!("{} ", marker), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_missing(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("no input is available for this question")
        .fg(Color::Red)
        .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, current: &Widget) {
    let hints = match current {
        Widget::Text(_) => "type your answer  ·  enter next  ·  esc quit",
        Widget::Single(_) => "j/k move  ·  space select  ·  enter next  ·  q quit",
        Widget::Multi(_) => "j/k move  ·  space toggle  ·  enter next  ·  q quit",
        Widget::Missing => "enter next  ·  q quit",
    };
    let widget = Paragraph::new(hints)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
