use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Options for an interactive session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Overrides the configured data file
    pub data_file: Option<PathBuf>,
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Session(SessionOptions),
    Help,
    Version,
    ShowConfig,
    SetDataFile(PathBuf),
    SetColor(bool),
    SetLogLevel(String),
}

/// 处理 CLI 命令
/// 返回 Some 表示应该进入交互会话，None 表示已处理完毕应该退出
pub fn handle_cli() -> Result<Option<SessionOptions>> {
    let args: Vec<String> = env::args().collect();

    let action = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!("Run 'ttrack --help' for usage");
            std::process::exit(1);
        }
    };

    match action {
        CliAction::Session(options) => return Ok(Some(options)),
        CliAction::Help => print_help(),
        CliAction::Version => print_version(),
        CliAction::ShowConfig => crate::config::show_config()?,
        CliAction::SetDataFile(path) => crate::config::set_data_file(path)?,
        CliAction::SetColor(enabled) => crate::config::set_color(enabled)?,
        CliAction::SetLogLevel(level) => crate::config::set_log_level(&level)?,
    }

    Ok(None)
}

/// Interpret the arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<CliAction, String> {
    if args.is_empty() {
        return Ok(CliAction::Session(SessionOptions::default()));
    }

    match args[0].as_str() {
        "--file" | "-f" => {
            let path = args
                .get(1)
                .ok_or("Missing path\nUsage: ttrack --file <path>".to_string())?;
            if args.len() > 2 {
                return Err(format!("Unexpected argument: {}", args[2]));
            }
            Ok(CliAction::Session(SessionOptions {
                data_file: Some(PathBuf::from(path)),
            }))
        }
        "config" => parse_config_args(&args[1..]),
        "--help" | "-h" | "help" => Ok(CliAction::Help),
        "--version" | "-V" | "-v" => Ok(CliAction::Version),
        cmd => Err(format!("Unknown command: {}", cmd)),
    }
}

fn parse_config_args(args: &[String]) -> Result<CliAction, String> {
    if args.is_empty() {
        return Ok(CliAction::ShowConfig);
    }

    let value = args.get(1).map(|s| s.as_str());
    match (args[0].as_str(), value) {
        ("show", _) => Ok(CliAction::ShowConfig),
        ("data-file", Some(path)) => Ok(CliAction::SetDataFile(PathBuf::from(path))),
        ("data-file", None) => Err("Usage: ttrack config data-file <path>".to_string()),
        ("color", Some("on")) => Ok(CliAction::SetColor(true)),
        ("color", Some("off")) => Ok(CliAction::SetColor(false)),
        ("color", _) => Err("Usage: ttrack config color <on|off>".to_string()),
        ("log-level", Some(level)) => Ok(CliAction::SetLogLevel(level.to_string())),
        ("log-level", None) => Err("Usage: ttrack config log-level <level>".to_string()),
        (option, _) => Err(format!(
            "Unknown config option: {}\nAvailable options: show, data-file, color, log-level",
            option
        )),
    }
}

/// 打印帮助信息
fn print_help() {
    println!("ttrack - a line-oriented terminal task tracker\n");
    println!("USAGE:");
    println!("    ttrack                      Start an interactive session");
    println!("    ttrack --file <path>        Start a session on a specific data file");
    println!("    ttrack config [show]        Show the current configuration");
    println!("    ttrack config data-file <path>");
    println!("    ttrack config color <on|off>");
    println!("    ttrack config log-level <off|error|warn|info|debug|trace>");
    println!("    ttrack --help               Show this help");
    println!("    ttrack --version            Show version information\n");

    println!("SESSION COMMANDS:");
    println!("    list                                    Show all tasks");
    println!("    todo <description>                      Add a to-do");
    println!("    deadline <description> /by <date>       Add a deadline");
    println!("    event <description> /from <date> /to <date>");
    println!("                                            Add an event");
    println!("    mark <n>                                Mark task n as done");
    println!("    delete <n>                              Delete task n");
    println!("    bye                                     End the session\n");

    println!("Dates are written like: 2 Dec 2019 1800");
}

/// 打印版本信息
fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const NAME: &str = env!("CARGO_PKG_NAME");
    println!("{} {}", NAME, VERSION);
}
