//! AEI protocol implementation

use std::io::{self, Write};
use amplify::{
    core::Position,
    engine::{Engine, SearchOptions},
    grover::recommend::{DEFAULT_CONDITIONS, DEFAULT_MAX_MOVES, DEFAULT_SHOTS},
};
use anyhow::{bail, ensure, Result};
use indoc::formatdoc;

fn handshake(engine: &Engine) -> String {
    formatdoc! {"
        id name amplify {version}
        id author amplify contributors
        option name conditions type spin default {conditions} min 1 max 3
        option name shots type spin default {shots} min 1
        option name seed type string default none
        option name schedule type string default default
        option name marking type combo default exact var exact var atleast
        option name trace type check default false
        option name maxmoves type spin default {max_moves} min 1
        option name strictmode type check default {strict}
        aeiok",
        version = env!("CARGO_PKG_VERSION"),
        conditions = DEFAULT_CONDITIONS,
        shots = DEFAULT_SHOTS,
        max_moves = DEFAULT_MAX_MOVES,
        strict = engine.options.strict_mode,
    }
}

/// Handle an AEI command
pub fn handle_command(cmd: &str, engine: &mut Engine) -> Result<()> {
    let parts: Vec<&str> = cmd.split_whitespace().collect();

    if parts.is_empty() {
        return Ok(());
    }

    match parts[0] {
        "aei" => {
            println!("{}", handshake(engine));
            io::stdout().flush()?;
        }
        "isready" => {
            println!("readyok");
            io::stdout().flush()?;
        }
        "setoption" => {
            ensure!(parts.len() == 5 && parts[1] == "name" && parts[3] == "value",
                "invalid setoption command");

            let option_name = parts[2];
            let option_value = parts[4];

            engine.set_option(option_name, option_value)?;
        }
        "position" => {
            ensure!(parts.len() >= 2, "position command requires at least 2 arguments");

            match parts[1] {
                "startpos" => {
                    engine.reset_position();
                }
                "fen" if parts.len() >= 3 => {
                    let fen = parts[2..].join(" ");
                    let position = fen.parse::<Position>()?;

                    engine.set_position(position);
                }
                _ => bail!("invalid position command")
            }
        }
        "moves" => {
            let moves = engine.legal_moves();
            for (index, mv) in moves.iter().enumerate() {
                println!("move {} {}", index, mv);
            }
            io::stdout().flush()?;
        }
        "go" => {
            let args = parts[1..].join(" ");
            let search_options = args.parse::<SearchOptions>()?;

            let result = engine.go(&search_options);

            if let Some(set) = &result.recommendations {
                for entry in &set.entries {
                    println!("info rec {}", entry);
                }
                for event in set.trace.iter().flatten() {
                    println!("info trace {}", event);
                }
            }
            if let Some(err) = &result.error {
                println!("info error {}", err);
            }
            println!("info time {:.3}", result.elapsed);

            match result.best_move {
                Some(mv) => println!("bestmove {}", mv),
                None => println!("bestmove none"),
            }
            io::stdout().flush()?;
        }
        "display" => {
            engine.display();
        }
        "getfen" => {
            println!("{}", engine.get_fen());
        }
        "quit" => {
            std::process::exit(0);
        }
        cmd => {
            bail!("Unknown command: {}", cmd);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_lists_options() {
        let text = handshake(&Engine::new());
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("id name amplify"));
        assert_eq!(lines.last(), Some(&"aeiok"));
        assert!(text.contains("option name shots type spin default 10000 min 1"));
        assert!(text.contains("option name strictmode type check default true"));
    }

    #[test]
    fn test_state_changing_commands() {
        let mut engine = Engine::new();

        handle_command("setoption name shots value 64", &mut engine).unwrap();
        assert_eq!(engine.options.grover.shots, 64);

        handle_command("position fen 8/8/8/3B4/2R5/8/8/8 b", &mut engine).unwrap();
        assert_eq!(engine.get_fen(), "8/8/8/3B4/2R5/8/8/8 b");

        handle_command("position startpos", &mut engine).unwrap();
        assert_eq!(engine.position, Position::default());
    }

    #[test]
    fn test_malformed_commands() {
        let mut engine = Engine::new();

        assert!(handle_command("setoption name shots", &mut engine).is_err());
        assert!(handle_command("setoption name shots value", &mut engine).is_err());
        assert!(handle_command("position", &mut engine).is_err());
        assert!(handle_command("position fen 8/8 r", &mut engine).is_err());
        assert!(handle_command("go depth 4", &mut engine).is_err());
        assert!(handle_command("fly", &mut engine).is_err());
        assert!(handle_command("   ", &mut engine).is_ok());
    }
}
