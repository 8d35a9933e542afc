use clap::Parser;
use dotenvy::dotenv;

fn main() -> std::process::ExitCode {
    // Load .env so TODO_SNAPSHOT_PATH/CONFIG_PATH can come from a dotfile.
    // Logging stays quiet unless RUST_LOG asks for it; the CLI owns stdout.
    dotenv().ok();
    if std::env::var("RUST_LOG").is_ok() {
        common::utils::logging::init_logging_default();
    }

    let parsed = cli::Cli::parse();

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    rt.block_on(cli::run(parsed))
}
