mod app;
mod audio;
mod config;
mod error;
mod library;
mod logging;
mod playlist;
mod runtime;
mod storage;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
