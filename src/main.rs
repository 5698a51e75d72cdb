use clap::Parser;
use particle_network::{app::NetworkApp, options::LaunchOptions};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = LaunchOptions::parse();
    log::debug!("Launch options: {:?}", options);

    NetworkApp::new(&options)?.run()
}
