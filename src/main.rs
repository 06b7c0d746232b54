//! Bytecode VM core CLI.
//!
//! This binary has a single executable behavior: given a `.clbc` bytecode
//! image, load it as a raw byte stream and disassemble it to stdout. There
//! is no lexer, parser, or interpreter loop to drive a REPL over (out of
//! scope for this crate), so with no arguments it prints usage rather than
//! starting one.

use std::env;
use std::fs;
use std::process;

use clox_vm::{disassemble, CodeBlock};

const VERSION: &str = "0.1.0";

fn usage() -> String {
    format!(
        r#"clox-vm disassembler v{0}

Usage:
    clox-vm <file.clbc>

Arguments:
    <file.clbc>
        Path to a raw bytecode image: a sequence of instructions, each an
        opcode byte followed by operand bytes, with no file container or
        header.

Options:
    -h, --help
        Show this help message and exit.
    -v, --version
        Show version."#,
        VERSION
    )
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() == 1 {
        println!("{}", usage());
        return;
    }

    if args[1] == "-h" || args[1] == "--help" {
        println!("{}", usage());
        return;
    }

    if args[1] == "-v" || args[1] == "--version" {
        println!("clox-vm-{}-{}: v{}", env::consts::OS, env::consts::ARCH, VERSION);
        return;
    }

    let path = &args[1];

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("cannot open '{}': {}", path, e);
            process::exit(1);
        }
    };

    let mut block = CodeBlock::new(0);
    block.write(&bytes);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = disassemble(&block, &mut handle) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
