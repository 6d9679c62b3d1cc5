use eyre::{Result, WrapErr};
use log::{error, info};
use rand::thread_rng;
use reqwest::{Client, Url};
use serde_json::Value;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::{Arc, Mutex};
use tokio::time;

use crate::configure::Config;
use crate::generate::request_id;

const ID_LENGTH: usize = 10;

pub struct Prober {
    config: Config,
    client: Client,
    terminate_flag: Arc<Mutex<bool>>,
}

impl Prober {
    pub fn new(config: Config) -> Result<Self> {
        let client = build_client(&config.api_base_url)?;
        Ok(Self {
            config,
            client,
            terminate_flag: Arc::new(Mutex::new(false)),
        })
    }

    pub fn register_sighandler(&self) -> Result<()> {
        let terminate_flag = self.terminate_flag.clone();
        ctrlc::set_handler(move || {
            let mut terminate_flag = terminate_flag.lock().unwrap();
            *terminate_flag = true;
        })
        .wrap_err("set Ctrl-C handler")
    }

    #[cfg(test)]
    fn terminate_handle(&self) -> Arc<Mutex<bool>> {
        self.terminate_flag.clone()
    }

    /// One request per iteration, forever. A failed iteration is logged and
    /// the next one runs after the configured interval regardless.
    pub async fn run(self) -> Result<()> {
        loop {
            if *self.terminate_flag.lock().unwrap() {
                break;
            }

            let request_id = request_id(ID_LENGTH, &mut thread_rng());
            match self.poll_once(&request_id).await {
                Ok(response) => info!("[ client ] Response - {request_id}: {response}"),
                Err(err) => error!("[ client ] Error: {err:#}"),
            }

            info!(
                "[ client ] Waiting {}s for next request...",
                self.config.request_interval.as_secs_f64()
            );
            time::sleep(self.config.request_interval).await;
        }

        Ok(())
    }

    async fn poll_once(&self, request_id: &str) -> Result<Value> {
        let request_url = format!("{}/{}", self.config.api_base_url, request_id);
        info!("[ client ] Sending GET to {request_url} ...");
        let response = self.client.get(&request_url).send().await?;
        let body = response.json::<Value>().await?;
        Ok(body)
    }
}

fn build_client(api_base_url: &str) -> Result<Client> {
    let url: Url = api_base_url
        .parse()
        .wrap_err_with(|| format!("Invalid API_BASE_URL {api_base_url:?}"))?;

    let mut builder = Client::builder();
    if let Some((host, addr)) = ipv4_addr_of(&url) {
        builder = builder.resolve(&host, addr);
    }
    builder.build().wrap_err("build http client")
}

/// First A record for a named host, so v4 wins when the resolver returns
/// both families. Literal-IP hosts and failed lookups fall through to the
/// client's own resolution.
fn ipv4_addr_of(url: &Url) -> Option<(String, SocketAddr)> {
    let host = url.domain()?.to_string();
    let port = url.port_or_known_default()?;
    let mut addrs = (host.as_str(), port).to_socket_addrs().ok()?;
    let addr = addrs.find(|addr| addr.is_ipv4())?;
    Some((host, addr))
}
