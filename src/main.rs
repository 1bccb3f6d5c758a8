#[cfg(feature = "display")]
mod display;

use std::process::ExitCode;

use dmg::debugger::Trace;
use dmg::{BootRom, Machine};

// Command line arguments
struct Args {
    boot: String,
    steps: usize,
    frames: Option<usize>,
    trace: bool,
    dump_regs: bool,
    gui: bool,
}

fn parse_args() -> Result<Args, lexopt::Error> {
    use lexopt::prelude::*;

    let help_msg = "\
USAGE:
    dmg [OPTIONS] [BOOTROM]

ARGS:
    <BOOTROM>    Filepath of the bootstrap ROM image copied to 0x0000 at
                 power-on. (default: boot.bin)

OPTIONS:
    -h, --help          Print this help message.
    -n, --steps=NUM     Headless mode: execute up to NUM instructions, then
                          print the register dump. (default: 1000000)
    -f, --frames=NUM    Headless mode: run until NUM frames have completed
                          instead of counting instructions.
    -t, --trace         Print every fetch and decoded mnemonic.
    -d, --dump          With --trace: also dump registers before each
                          instruction.
    -g, --gui           Open a native window and render frames as they
                          complete (requires the `display` build feature).";

    let mut boot = None;
    let mut steps = 1_000_000usize;
    let mut frames = None;
    let mut trace = false;
    let mut dump_regs = false;
    let mut gui = false;

    let mut parser = lexopt::Parser::from_env();

    while let Some(arg) = parser.next()? {
        match arg {
            Short('n') | Long("steps") => steps = parser.value()?.parse()?,
            Short('f') | Long("frames") => frames = Some(parser.value()?.parse()?),
            Short('t') | Long("trace") => trace = true,
            Short('d') | Long("dump") => dump_regs = true,
            Short('g') | Long("gui") => gui = true,
            Short('h') | Long("help") => {
                println!("{help_msg}");
                std::process::exit(0);
            }
            Value(v) if boot.is_none() => boot = Some(v.string()?),
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Args {
        boot: boot.unwrap_or_else(|| "boot.bin".into()),
        steps,
        frames,
        trace,
        dump_regs,
        gui,
    })
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("dmg: {e}");
            return ExitCode::FAILURE;
        }
    };

    let boot = match BootRom::load_from_file(&args.boot) {
        Ok(boot) => boot,
        Err(e) => {
            eprintln!("dmg: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut machine = match Machine::new(&boot) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("dmg: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.trace {
        machine.attach_debugger(Box::new(Trace::new(args.dump_regs)));
    }

    if args.gui {
        #[cfg(feature = "display")]
        {
            if let Err(e) = display::run(machine) {
                eprintln!("dmg: display error: {e}");
                return ExitCode::FAILURE;
            }
            return ExitCode::SUCCESS;
        }
        #[cfg(not(feature = "display"))]
        {
            eprintln!("dmg: built without the `display` feature; rerun with --features display");
            return ExitCode::FAILURE;
        }
    }

    run_headless(&mut machine, &args)
}

fn run_headless(machine: &mut Machine, args: &Args) -> ExitCode {
    let result = match args.frames {
        Some(frames) => run_frames(machine, frames, args.steps),
        None => machine.run(args.steps),
    };

    match result {
        Ok(()) => {
            println!("{}", machine.cpu().state());
            println!("time: {} cycles", machine.cpu().time());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("dmg: {e}");
            eprintln!("{}", machine.cpu().state());
            ExitCode::FAILURE
        }
    }
}

fn run_frames(
    machine: &mut Machine,
    frames: usize,
    steps_per_frame: usize,
) -> Result<(), dmg::CoreError> {
    for _ in 0..frames {
        machine.run_frame(steps_per_frame)?;
    }
    Ok(())
}
