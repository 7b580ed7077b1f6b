mod app;
mod effects;
mod logging;
mod persistence;
mod render;

fn main() -> anyhow::Result<()> {
    app::run_app()
}
