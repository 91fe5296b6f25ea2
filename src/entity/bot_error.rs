/// Coarse classification of a [`BotError`], used to pick the user-facing
/// message and the recovery path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Something the user can fix by sending different input.
    InvalidInput,
    /// Network failure, timeout or 5xx from the data provider.
    UpstreamUnavailable,
    /// The data provider asked us to slow down.
    RateLimited,
    /// Anything unexpected. Logged, apologised for, session reset.
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("A wallet nicknamed \"{0}\" is already saved")]
    NicknameTaken(String),

    #[error("This address is already saved as \"{0}\"")]
    DuplicateAddress(String),

    #[error("Wallet \"{0}\" not found")]
    WalletNotFound(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Telegram API error: {0}")]
    TelegramApi(#[from] teloxide::RequestError),
}

impl BotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::InvalidInput(_)
            | BotError::NicknameTaken(_)
            | BotError::DuplicateAddress(_)
            | BotError::WalletNotFound(_)
            | BotError::InvalidAddress(_)
            | BotError::NotFound(_) => ErrorKind::InvalidInput,
            BotError::RateLimited { .. } => ErrorKind::RateLimited,
            BotError::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            BotError::Internal(_) | BotError::TelegramApi(_) => ErrorKind::Internal,
        }
    }

    /// Transient failures get one automatic retry before surfacing.
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::UpstreamUnavailable
    }
}

pub type BotResult<T> = std::result::Result<T, BotError>;
