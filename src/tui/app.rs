//! Front panel application state and logic.

use crate::machine::{
    Key, MachineController, MachineSettings, MachineVariant, OperatingSwitch, ZeroizeSwitch,
};

/// Front panel state.
pub struct PanelApp {
    /// The machine being operated.
    pub controller: MachineController,
    /// The paper tape output.
    pub tape: String,
    /// Status message to display.
    pub status: String,
    /// Should we quit?
    pub should_quit: bool,
}

impl PanelApp {
    /// Power up a machine with the given rotor orders.
    pub fn new(settings: &MachineSettings) -> Self {
        Self {
            controller: MachineController::new(settings),
            tape: String::new(),
            status: "Machine off. Tab: master switch, F2: zeroize, F3: machine type.".into(),
            should_quit: false,
        }
    }

    /// Press one key and print whatever comes out.
    pub fn press(&mut self, key: Key) {
        let emitted = self.controller.handle_key(key);
        self.tape.push_str(&emitted);
        if self.controller.is_locked() {
            self.status =
                "Locked: no outer cipher rotor movement. Turn the master switch out of E/D."
                    .into();
        }
    }

    /// Rotate the master switch to its next position.
    pub fn cycle_operating_switch(&mut self) {
        let next = match self.controller.operating_switch() {
            OperatingSwitch::Off => OperatingSwitch::Plaintext,
            OperatingSwitch::Plaintext => OperatingSwitch::Reset,
            OperatingSwitch::Reset => OperatingSwitch::Encrypt,
            OperatingSwitch::Encrypt => OperatingSwitch::Decrypt,
            OperatingSwitch::Decrypt => OperatingSwitch::Off,
        };
        let emitted = self.controller.set_operating_switch(next);
        self.tape.push_str(&emitted);
        self.status = format!("Master switch: {:?}", next);
    }

    /// Flip the zeroize/operate switch to its next position.
    pub fn cycle_zeroize_switch(&mut self) {
        let next = match self.controller.zeroize_switch() {
            ZeroizeSwitch::Zeroize => ZeroizeSwitch::Neutral,
            ZeroizeSwitch::Neutral => ZeroizeSwitch::Operate,
            ZeroizeSwitch::Operate => ZeroizeSwitch::Zeroize,
        };
        self.controller.set_zeroize_switch(next);
        self.status = format!("Zeroize switch: {:?}", next);
    }

    /// Flip the machine-type switch to its next position.
    pub fn cycle_variant(&mut self) {
        let next = match self.controller.variant() {
            MachineVariant::Csp889 => MachineVariant::Neutral,
            MachineVariant::Neutral => MachineVariant::Csp2900,
            MachineVariant::Csp2900 => MachineVariant::Csp889,
        };
        self.controller.set_variant(next);
        self.status = format!("Machine type: {}", next);
    }

    /// Tear off the paper tape.
    pub fn tear_tape(&mut self) {
        self.tape.clear();
        self.status = "Tape torn off.".into();
    }

    /// Push the counter clear button.
    pub fn clear_counter(&mut self) {
        self.controller.clear_keystroke_count();
        self.status = "Counter cleared.".into();
    }
}

/// Run the front panel.
pub fn run_panel(settings: &MachineSettings) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::Duration;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create app
    let mut app = PanelApp::new(settings);

    // Main loop
    loop {
        // Draw
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        // Handle input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc => app.should_quit = true,
                        KeyCode::Tab => app.cycle_operating_switch(),
                        KeyCode::F(2) => app.cycle_zeroize_switch(),
                        KeyCode::F(3) => app.cycle_variant(),
                        KeyCode::F(4) => app.tear_tape(),
                        KeyCode::F(5) => app.clear_counter(),
                        // The unlabeled Blank key sits on Enter.
                        KeyCode::Enter => app.press(Key::Blank),
                        KeyCode::Char(c) => {
                            if let Ok(key) = Key::from_char(c) {
                                app.press(key);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
