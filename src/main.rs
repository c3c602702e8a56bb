use amplify::engine::Engine;
use std::io::{self, BufRead};

mod aei;
use aei::command::parse_command;
use aei::protocol::handle_command;

fn main() {
    env_logger::init();
    println!("amplify - amplitude amplification checkers engine");

    let stdin = io::stdin();
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let input = match line {
            Ok(input) => input,
            Err(err) => {
                eprintln!("{}", err);
                break;
            }
        };

        if let Some(cmd) = parse_command(&input) {
            if let Err(err) = handle_command(&cmd, &mut engine) {
                if engine.options.strict_mode {
                    eprintln!("error: {:#}", err);
                    std::process::exit(1);
                } else {
                    eprintln!("{:#}", err);
                }
            }
        }
    }
}
