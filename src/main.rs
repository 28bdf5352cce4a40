mod access;
mod app;
mod catalog;
mod config;
mod query;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
