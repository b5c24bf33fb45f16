//! tensem REPL - interactive evaluation of tensor-encoded logic over a world.

use candle_core::Device;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::env;
use tensem::{
    best_device, exists, forall, no, some, Connectives, Result, TruthTable, TruthVector, World,
    WorldConfig,
};
use tracing_subscriber::EnvFilter;

/// State shared by every REPL command.
struct Session {
    device: Device,
    connectives: Connectives,
    world: World,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let device = best_device();
    let connectives = Connectives::new(&device)?;

    // If a world file is provided, load it
    if args.len() > 1 {
        let file_path = &args[1];
        let world = match WorldConfig::load(file_path).and_then(|c| World::from_config(&c, &device)) {
            Ok(world) => world,
            Err(e) => {
                eprintln!("Error loading {}: {}", file_path, e);
                std::process::exit(1);
            }
        };
        println!("Loaded: {}", file_path);

        let session = Session {
            device,
            connectives,
            world,
        };

        // If --repl flag is passed, continue to REPL after loading
        if args.len() > 2 && args[2] == "--repl" {
            return run_repl(session);
        }

        print_state(&session.world)?;
        return Ok(());
    }

    println!("tensem v0.1.0 - logic as tensor algebra");
    println!("Type :help for commands, :quit to exit\n");

    let world = World::pets(&device)?;
    run_repl(Session {
        device,
        connectives,
        world,
    })
}

fn run_repl(mut session: Session) -> Result<()> {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("Error: failed to create editor: {}", err);
            return Ok(());
        }
    };

    loop {
        let readline = rl.readline("tensem> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(trimmed);

                match handle_command(trimmed, &mut session) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => println!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Bye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

/// Handle one REPL line.
/// Returns false if REPL should exit
fn handle_command(cmd: &str, session: &mut Session) -> Result<bool> {
    let parts: Vec<&str> = cmd.split_whitespace().collect();
    let command = parts[0];
    let args = &parts[1..];

    match command {
        ":quit" | ":q" | ":exit" => {
            println!("Bye!");
            return Ok(false);
        }

        ":help" | ":h" | ":?" => {
            print_help();
        }

        ":domain" | ":d" => {
            let domain = session.world.domain();
            println!("Domain of {} entities:", domain.size());
            for (i, name) in domain.entity_names().enumerate() {
                println!("  {} : {}", i, name);
            }
        }

        ":sets" => {
            print_sets(&session.world)?;
        }

        ":world" | ":w" => match args {
            ["pets"] => session.world = World::pets(&session.device)?,
            ["mathematicians"] => session.world = World::mathematicians(&session.device)?,
            _ => println!("Usage: :world <pets|mathematicians>"),
        },

        ":table" | ":t" => match args {
            [name] => match truth_table(name, session)? {
                Some(table) => print!("{}", table),
                None => println!("Unknown connective: {}", name),
            },
            _ => println!("Usage: :table <and|or|implies|implies-via-or|xor|iff|nand>"),
        },

        ":holds" => match args {
            [set, entity] => {
                let predicate = session.world.propositional(set)?;
                let entity = session.world.domain().entity_named(entity)?;
                print_truth(&predicate.apply(&entity)?);
            }
            _ => println!("Usage: :holds <set> <entity>"),
        },

        ":forall" => match args {
            [x, y] => print_truth(&forall(session.world.set(x)?, session.world.set(y)?)?),
            _ => println!("Usage: :forall <set> <set>"),
        },

        ":exists" => match args {
            [x] => print_truth(&exists(session.world.set(x)?)?),
            _ => println!("Usage: :exists <set>"),
        },

        ":some" => match args {
            [x, y] => print_truth(&some(session.world.set(x)?, session.world.set(y)?)?),
            _ => println!("Usage: :some <set> <set>"),
        },

        ":no" => match args {
            [x, y] => print_truth(&no(session.world.set(x)?, session.world.set(y)?)?),
            _ => println!("Usage: :no <set> <set>"),
        },

        ":restrict" => match args {
            [filter, set] => {
                let restricted = session
                    .world
                    .predicate(filter)?
                    .restrict(session.world.set(set)?)?;
                let names = session.world.domain().member_names(&restricted)?;
                println!("{{{}}}", names.join(", "));
            }
            _ => println!("Usage: :restrict <filter-set> <set>"),
        },

        ":complement" => match args {
            [set] => {
                let complement = session.world.set(set)?.complement()?;
                let names = session.world.domain().member_names(&complement)?;
                println!("{{{}}}", names.join(", "));
            }
            _ => println!("Usage: :complement <set>"),
        },

        _ => {
            println!("Unknown command: {}. Type :help for commands.", command);
        }
    }

    Ok(true)
}

fn truth_table(name: &str, session: &Session) -> Result<Option<TruthTable>> {
    let c = &session.connectives;
    let device = &session.device;
    let table = match name {
        "and" => TruthTable::evaluate(device, |x, y| c.and(x, y))?,
        "or" => TruthTable::evaluate(device, |x, y| c.or(x, y))?,
        "implies" => TruthTable::evaluate(device, |x, y| c.implies(x, y))?,
        "implies-via-or" => TruthTable::evaluate(device, |x, y| c.implies_via_or(x, y))?,
        "xor" => TruthTable::evaluate(device, |x, y| c.xor(x, y))?,
        "iff" => TruthTable::evaluate(device, |x, y| c.biconditional(x, y))?,
        "nand" => TruthTable::evaluate(device, |x, y| c.nand(x, y))?,
        _ => return Ok(None),
    };
    Ok(Some(table))
}

fn print_truth(value: &TruthVector) {
    let coords = value.truth().coords();
    println!("{} ({}, {})", value, coords[0], coords[1]);
}

fn print_sets(world: &World) -> Result<()> {
    let names: Vec<&str> = world.set_names().collect();
    if names.is_empty() {
        println!("No sets defined");
        return Ok(());
    }
    println!("Sets:");
    for name in names {
        let members = world.domain().member_names(world.set(name)?)?;
        println!("  {} = {{{}}}", name, members.join(", "));
    }
    Ok(())
}

fn print_state(world: &World) -> Result<()> {
    let domain = world.domain();
    let entities: Vec<&str> = domain.entity_names().collect();
    println!("Entities ({}): {}", domain.size(), entities.join(", "));
    print_sets(world)
}

fn print_help() {
    println!(
        r#"tensem Commands:
  :help, :h, :?              Show this help
  :quit, :q                  Exit the REPL
  :domain, :d                List the entities of the current world
  :sets                      List the named sets and their members
  :world, :w <name>          Switch built-in world (pets, mathematicians)

Connectives:
  :table, :t <op>            Truth table of and|or|implies|implies-via-or|xor|iff|nand

Predicates:
  :holds <set> <entity>      Apply the (2, N) predicate of a set to an entity
  :restrict <filter> <set>   Apply the diagonal filter of one set to another
  :complement <set>          Everything not in the set

Quantifiers:
  :forall <x> <y>            All x are y
  :exists <x>                Something is x
  :some <x> <y>              Some x are y
  :no <x> <y>                No x are y"#
    );
}
