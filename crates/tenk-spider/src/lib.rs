pub mod edgar;
pub mod fetch;
pub mod pipeline;
pub mod roster;

/// Shortcut for required API elements.
pub(crate) mod http {
    pub(crate) use dotenv::var;
    pub(crate) use reqwest::Client as HttpClient;
}

/// Fallback identification for SEC requests; EDGAR rejects clients with no
/// `User-Agent` header.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:130.0) Gecko/20100101 Firefox/130.0";

/// Build the shared HTTP client, reading the `USER_AGENT` environment
/// variable where set.
pub(crate) fn std_client_build() -> http::HttpClient {
    reqwest::ClientBuilder::new()
        .user_agent(http::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()))
        .build()
        .expect("failed to build reqwest client")
}

/// Pretty-print an elapsed timer for trace output.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:.2}s", time.elapsed().as_secs_f64())
}
