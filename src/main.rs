use anyhow::Result;
use std::io;

mod app;
mod cli;
mod config;
mod error;
mod fs;
mod input;
mod logging;
mod models;
mod ui;

use app::App;
use fs::FileStore;
use ui::Ui;

fn main() -> Result<()> {
    // 处理 CLI 命令
    let Some(options) = cli::handle_cli()? else {
        // CLI 命令已处理，直接退出
        return Ok(());
    };

    // 配置损坏时使用默认配置继续运行
    let config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {:#}, using defaults", e);
        config::Config::default()
    });

    let _logger = match config::get_log_dir()
        .and_then(|dir| logging::init_logging(&config.log_level, &dir))
    {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };

    let data_file = match options.data_file {
        Some(path) => path,
        None => config.resolve_data_file()?,
    };
    log::info!("event=session_start data_file={}", data_file.display());

    let stdout = io::stdout();
    let ui = Ui::new(stdout.lock(), config.color);
    let mut app = App::new(FileStore::new(data_file), ui);

    // 运行会话
    if let Err(err) = app.run(io::stdin().lock()) {
        log::error!("event=session status=error error={}", err);
        eprintln!("An unexpected error occurred: {}", err);
    }

    Ok(())
}
