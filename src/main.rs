use clap::Parser;
use minipascal::{check_source, diagnostic, CompilationError, CompileOptions};
use std::fs;
use std::path::PathBuf;

/// Verifica léxica, sintática e semanticamente um programa.
#[derive(Parser)]
#[command(name = "mpc")]
#[command(about = "Front end do compilador da linguagem (program/inicio/fim)", long_about = None)]
#[command(version)]
struct Cli {
    /// Arquivo fonte
    file: PathBuf,
    /// Imprime cada token consumido pelo parser
    #[arg(long)]
    trace: bool,
    /// Confere aridade e tipos dos argumentos nas chamadas de procedimento
    #[arg(long)]
    strict: bool,
    /// Imprime a AST quando o programa é aceito
    #[arg(long)]
    dump_ast: bool,
    /// Mais mensagens de log em stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}", diagnostic::render(&CompilationError::Io(e), ""));
            std::process::exit(1);
        }
    };

    let options = CompileOptions { trace_tokens: cli.trace, strict_calls: cli.strict };
    match check_source(&source, options) {
        Ok(program) => {
            if cli.dump_ast {
                println!("{:#?}", program);
            }
            println!("Programa \"{}\" aceito.", program.name);
        }
        Err(e) => {
            log::debug!("falha na fase {}", e.phase());
            eprintln!("{}", diagnostic::render(&e, &source));
            std::process::exit(1);
        }
    }
}
