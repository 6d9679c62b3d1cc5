mod configure;
mod pool;
mod serve;

use configure::Config;
use env_logger::Env;
use log::error;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = Config::from_env().and_then(serve::run) {
        error!("[ server ] {err:#}");
        std::process::exit(1);
    }
}
