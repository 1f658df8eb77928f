//! SIGABA Emulator - CLI Entry Point
//!
//! Commands:
//! - `sigaba-emu encrypt <text>` - Encipher a message
//! - `sigaba-emu decrypt <text>` - Decipher a message
//! - `sigaba-emu panel` - Interactive front panel
//! - `sigaba-emu test` - Run the built-in self-test

use clap::{Args, Parser, Subcommand};

use sigaba::{
    keystrokes, MachineController, MachineSettings, MachineVariant, OperatingSwitch,
    ZeroizeSwitch,
};

#[derive(Parser)]
#[command(name = "sigaba-emu")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "An emulator of the ECM Mark II (SIGABA) rotor cipher machine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encipher a message
    Encrypt {
        /// The message text (letters and spaces)
        text: String,
        #[command(flatten)]
        opts: MachineOpts,
        /// Print a JSON report instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Decipher a message
    Decrypt {
        /// The ciphertext (letter groups; spaces are ignored)
        text: String,
        #[command(flatten)]
        opts: MachineOpts,
        /// Print a JSON report instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Interactive front panel
    Panel {
        #[command(flatten)]
        opts: MachineOpts,
    },
    /// Run the built-in self-test
    Test,
}

/// Rotor orders, starting positions and machine type shared by the
/// subcommands. Absent or malformed values degrade to the documented
/// defaults, exactly as the machine's own setup procedure does.
#[derive(Args)]
struct MachineOpts {
    /// Cipher rotor order, e.g. 0N1N2N3N4N
    #[arg(long)]
    cipher_order: Option<String>,
    /// Control rotor order, e.g. 5N6N7N8N9N
    #[arg(long)]
    control_order: Option<String>,
    /// Index rotor order, e.g. 0N1N2N3N4N
    #[arg(long)]
    index_order: Option<String>,
    /// Cipher rotor starting positions (5 letters; default zeroized)
    #[arg(long)]
    cipher_pos: Option<String>,
    /// Control rotor starting positions (5 letters; default zeroized)
    #[arg(long)]
    control_pos: Option<String>,
    /// Index rotor starting positions (5 digits; default 00000)
    #[arg(long, default_value = "00000")]
    index_pos: String,
    /// Machine type: 889 or 2900
    #[arg(long, default_value = "889")]
    machine: String,
}

impl MachineOpts {
    fn settings(&self) -> MachineSettings {
        MachineSettings::from_strings(
            self.cipher_order.as_deref(),
            self.control_order.as_deref(),
            self.index_order.as_deref(),
        )
    }

    fn variant(&self) -> MachineVariant {
        match self.machine.as_str() {
            "2900" => MachineVariant::Csp2900,
            _ => MachineVariant::Csp889,
        }
    }

    /// Power up, zeroize, and dial in the requested state.
    fn controller(&self) -> MachineController {
        let mut controller = MachineController::new(&self.settings());
        controller.set_variant(self.variant());
        controller.set_zeroize_switch(ZeroizeSwitch::Operate);
        if let Some(pos) = &self.cipher_pos {
            controller.cage.set_cipher_positions(pos);
        }
        if let Some(pos) = &self.control_pos {
            controller.cage.set_control_positions(pos);
        }
        controller.cage.set_index_positions(&self.index_pos);
        controller
    }
}

/// What a batch session leaves behind, for the `--json` output.
#[derive(serde::Serialize)]
struct SessionReport {
    output: String,
    cipher_positions: String,
    control_positions: String,
    index_positions: String,
    keystrokes: u32,
    locked: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Encrypt { text, opts, json }) => {
            run_session(&text, &opts, OperatingSwitch::Encrypt, json);
        }
        Some(Commands::Decrypt { text, opts, json }) => {
            run_session(&text, &opts, OperatingSwitch::Decrypt, json);
        }
        Some(Commands::Panel { opts }) => {
            run_panel(&opts);
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("SIGABA Emulator v0.1.0");
            println!("An ECM Mark II (CSP-889/2900) cipher machine emulator");
            println!();
            println!("Use --help for available commands");
            println!();
            demo_machine();
        }
    }
}

fn run_session(text: &str, opts: &MachineOpts, switch: OperatingSwitch, json: bool) {
    let keys = match keystrokes(text) {
        Ok(keys) => keys,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let mut controller = opts.controller();
    controller.set_operating_switch(switch);

    let mut tape = String::new();
    for key in keys {
        tape.push_str(&controller.handle_key(key));
    }

    if controller.is_locked() {
        eprintln!("⚠️  Machine locked: no outer cipher rotor movement for 21 characters.");
        eprintln!("   Check the index rotor installation.");
    }

    if json {
        let report = SessionReport {
            output: tape,
            cipher_positions: controller.cage.cipher_positions(),
            control_positions: controller.cage.control_positions(),
            index_positions: controller.cage.index_positions(),
            keystrokes: controller.keystroke_count(),
            locked: controller.is_locked(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("❌ Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", tape);
        println!();
        println!("Cipher rotors:  {}", controller.cage.cipher_positions());
        println!("Control rotors: {}", controller.cage.control_positions());
        println!("Index rotors:   {}", controller.cage.index_positions());
        println!("Keystrokes:     {}", controller.keystroke_count());
    }
}

#[cfg(feature = "tui")]
fn run_panel(opts: &MachineOpts) {
    // The panel powers up like the real machine: switches off/zeroize,
    // rotors zeroized. Orders come from the flags; positions are dialed in
    // at the panel.
    if let Err(e) = sigaba::run_panel(&opts.settings()) {
        eprintln!("❌ Panel error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn run_panel(_opts: &MachineOpts) {
    eprintln!("❌ This build has no front panel (tui feature disabled)");
    std::process::exit(1);
}

fn demo_machine() {
    println!("━━━ Quick demo ━━━");
    println!();

    let opts = MachineOpts {
        cipher_order: None,
        control_order: None,
        index_order: None,
        cipher_pos: None,
        control_pos: None,
        index_pos: "00000".into(),
        machine: "889".into(),
    };

    let mut machine = opts.controller();
    machine.set_operating_switch(OperatingSwitch::Encrypt);

    let plaintext = "ATTACK AT DAWN";
    let mut ciphertext = String::new();
    for key in keystrokes(plaintext).unwrap_or_default() {
        ciphertext.push_str(&machine.handle_key(key));
    }

    println!("Rotor orders (daily key): cipher 0N1N2N3N4N, control 5N6N7N8N9N");
    println!("All rotors zeroized, index rotors at 00000, CSP-889.");
    println!();
    println!("  {} -> {}", plaintext, ciphertext);
    println!();
    println!("✓ Run `sigaba-emu decrypt \"{}\"` to read it back.", ciphertext);
}

fn run_self_test() {
    use sigaba::{Direction, Key, RotorCage};

    println!("━━━ SIGABA Emulator Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: substitution is its own inverse under direction flip
    print!("Substitution bijectivity... ");
    let mut cage = RotorCage::new(&MachineSettings::default());
    cage.zeroize();
    cage.set_index_positions("00000");
    let mut ok = true;
    for contact in 0..26 {
        let enciphered = cage.substitute(Direction::Encrypt, contact);
        if cage.substitute(Direction::Decrypt, enciphered) != contact {
            ok = false;
            break;
        }
    }
    if ok {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    // Test 2: odometer carry from the zeroized position
    print!("Control bank odometer... ");
    let mut cage = RotorCage::new(&MachineSettings::default());
    cage.zeroize();
    cage.step_control_bank();
    if cage.control_positions() == "ONNNO" {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {})", cage.control_positions());
        failed += 1;
    }

    // Test 3: known-answer encryption
    print!("Known-answer encryption... ");
    let opts = MachineOpts {
        cipher_order: None,
        control_order: None,
        index_order: None,
        cipher_pos: None,
        control_pos: None,
        index_pos: "00000".into(),
        machine: "889".into(),
    };
    let mut machine = opts.controller();
    machine.set_operating_switch(OperatingSwitch::Encrypt);
    let mut tape = String::new();
    for key in keystrokes("HELLO").unwrap() {
        tape.push_str(&machine.handle_key(key));
    }
    if tape == "HHAXL" {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {}, expected HHAXL)", tape);
        failed += 1;
    }

    // Test 4: round trip through two freshly set machines
    print!("Encrypt/decrypt round trip... ");
    let mut enc = opts.controller();
    enc.set_operating_switch(OperatingSwitch::Encrypt);
    let mut ciphertext = String::new();
    for key in keystrokes("THE QUICK BROWN FOX").unwrap() {
        ciphertext.push_str(&enc.handle_key(key));
    }
    let mut dec = opts.controller();
    dec.set_operating_switch(OperatingSwitch::Decrypt);
    let mut plaintext = String::new();
    for key in keystrokes(&ciphertext).unwrap() {
        plaintext.push_str(&dec.handle_key(key));
    }
    if plaintext == "THE QUICK BROWN FOX" {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {:?})", plaintext);
        failed += 1;
    }

    // Test 5: the Blank key steps rotors without printing ciphertext
    print!("Blank key motion... ");
    let mut machine = opts.controller();
    machine.set_operating_switch(OperatingSwitch::Encrypt);
    let before = machine.cage.cipher_positions();
    let emitted = machine.handle_key(Key::Blank);
    if emitted == " " && machine.cage.cipher_positions() != before {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
