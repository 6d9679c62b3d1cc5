mod configure;
mod generate;
mod poll;

use configure::Config;
use env_logger::Env;
use eyre::Result;
use poll::Prober;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let prober = Prober::new(config)?;
    prober.register_sighandler()?;
    prober.run().await
}
