//! UI rendering for the front panel.

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use super::app::PanelApp;
use crate::machine::{MachineVariant, OperatingSwitch, ZeroizeSwitch};

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &PanelApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(5),
            Constraint::Min(5),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    draw_switches(frame, top[0], app);
    draw_counters(frame, top[1], app);
    draw_rotors(frame, chunks[1], app);
    draw_tape(frame, chunks[2], app);
    draw_status(frame, chunks[3], app);
    draw_help(frame, chunks[4]);
}

/// Draw the three selector switches.
fn draw_switches(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let master = app.controller.operating_switch();
    let master_style = if master == OperatingSwitch::Off {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    let zeroize = app.controller.zeroize_switch();
    let zeroize_label = match zeroize {
        ZeroizeSwitch::Zeroize => "Zeroize",
        ZeroizeSwitch::Neutral => "(middle)",
        ZeroizeSwitch::Operate => "Operate",
    };
    let variant = app.controller.variant();
    let variant_label = match variant {
        MachineVariant::Neutral => "(middle)".to_string(),
        other => other.to_string(),
    };

    let content = vec![
        Line::from(vec![
            Span::raw("Master:   "),
            Span::styled(format!("{:?} ({})", master, master.label()), master_style),
        ]),
        Line::from(vec![
            Span::raw("Zeroize:  "),
            Span::styled(zeroize_label, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::raw("Machine:  "),
            Span::styled(variant_label, Style::default().fg(Color::White)),
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Switches ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, area);
}

/// Draw the keystroke counter and the lockup state.
fn draw_counters(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let locked = app.controller.is_locked();
    let content = vec![
        Line::from(vec![
            Span::raw("Counter: "),
            Span::styled(
                format!("{:04}", app.controller.keystroke_count()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::raw("Stop:    "),
            if locked {
                Span::styled("LOCKED", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            } else {
                Span::styled("clear", Style::default().fg(Color::Green))
            },
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Counter ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );

    frame.render_widget(paragraph, area);
}

/// Draw the rotor position windows.
fn draw_rotors(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let cage = &app.controller.cage;
    let content = vec![
        Line::from(vec![
            Span::raw("Cipher:  "),
            Span::styled(spaced(&cage.cipher_positions()), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::raw("Control: "),
            Span::styled(spaced(&cage.control_positions()), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::raw("Index:   "),
            Span::styled(spaced(&cage.index_positions()), Style::default().fg(Color::White)),
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Rotors ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );

    frame.render_widget(paragraph, area);
}

/// Draw the paper tape.
fn draw_tape(frame: &mut Frame, area: Rect, app: &PanelApp) {
    // Show the tail of a long tape.
    let width = (area.width as usize).saturating_sub(4);
    let visible: String = if app.tape.len() > width {
        app.tape.chars().skip(app.tape.len() - width).collect()
    } else {
        app.tape.clone()
    };

    let paragraph = Paragraph::new(visible)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .title(" Paper tape ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );

    frame.render_widget(paragraph, area);
}

/// Draw the status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default().title(" Status ").borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw the help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(
        "A-Z 0-9 - Space: keys  Enter: Blank  Tab: master  F2: zeroize  F3: type  F4: tear tape  F5: counter  Esc: quit",
    ))
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().title(" Help ").borders(Borders::ALL));

    frame.render_widget(help, area);
}

/// Space out a position string so it reads like separate rotor windows.
fn spaced(positions: &str) -> String {
    positions
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
