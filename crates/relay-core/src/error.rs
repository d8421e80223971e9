use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error(
        "not authenticated: set RELAY_DEPLOY_KEY or add a deploy_key to ~/.relayrc"
    )]
    NotAuthenticated,

    #[error("deploy key rejected by the platform: check your credentials")]
    BadCredentials,

    #[error("no linked app: this directory has no .relay-app.json")]
    NotLinked,

    #[error("cannot define percent and user. Use only one or the other.")]
    PercentAndUser,

    #[error("cancelled promote")]
    Cancelled,

    #[error("{}", format_reasons("Promotion failed for the following reasons", .0))]
    PromotionRejected(Vec<String>),

    #[error("{}", format_reasons("Promotion failed for the following reasons", .0))]
    ReviewFailed(Vec<String>),

    #[error("{}", format_reasons("Migration failed for the following reasons", .0))]
    MigrationRejected(Vec<String>),

    #[error("API request failed: {status} {message}")]
    Api { status: u16, message: String },

    #[error("zip not found: install the zip utility to package migration code")]
    ZipNotInstalled,

    #[error("packaging failed: {0}")]
    Package(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, RelayError>;

/// One bullet per reason, in the order the platform returned them.
fn format_reasons(prefix: &str, reasons: &[String]) -> String {
    let bullets: Vec<String> = reasons.iter().map(|r| format!("* {r}")).collect();
    format!("{prefix}:\n\n{}\n", bullets.join("\n"))
}
