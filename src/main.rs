use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod columns;
mod controller;
mod domain;
mod model;
mod rows;
mod ui;

use controller::Controller;
use domain::{DtvConfig, DtvError, Message};
use model::{Model, Status};
use ui::TableUI;

#[derive(Parser)]
#[command(version, about = "View a users csv with drag-reorderable columns.")]
struct Cli {
    /// CSV file with the user records
    #[arg(default_value = "fake_users_500.csv")]
    path: String,
}

fn main() -> ExitCode {
    let result = run();
    ratatui::restore();
    match result {
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run() -> Result<(), DtvError> {
    let cli = Cli::parse();
    init_logging()?;

    let path = shellexpand::full(&cli.path)
        .map_err(|e| DtvError::LoadingFailed(e.to_string()))?
        .to_string();

    let cfg = DtvConfig::default();

    // A load failure degrades to a table with headers and no rows
    let mut model = match Model::load(PathBuf::from(path)) {
        Ok(model) => model,
        Err(e) => {
            error!("Loading failed: {e:?}");
            Model::empty()
        }
    };

    let ui = TableUI::new(cfg.max_column_width);
    let controller = Controller::new(&cfg);

    let mut terminal = ratatui::init();
    let size = terminal.size()?;
    model.update(Message::Resize(size.width as usize, size.height as usize))?;

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        if let Some(message) = controller.handle_event()? {
            model.update(message)?;
        };
    }

    Ok(())
}

// A tui owns the terminal, so logs go to a file and only when asked for.
fn init_logging() -> Result<(), DtvError> {
    if std::env::var("RUST_LOG").is_err() {
        return Ok(());
    }
    let file = std::fs::File::create("dtv.log")?;
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file)
                .with_ansi(false),
        )
        .with(ErrorLayer::default())
        .init();
    Ok(())
}
