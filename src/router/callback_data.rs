use std::fmt;

/// Telegram rejects callback data longer than this.
pub const MAX_CALLBACK_DATA_BYTES: usize = 64;

/// A button press, encoded as `screen:action[:param]` callback data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    MainMenu,
    Demo,
    EndChat,
    Back,
    Cancel,
    WalletMenu,
    SaveWallet,
    MyWallets,
    SelectWallet(String),
    ViewHoldings(String),
    WalletTransfers(String),
    DeleteWallet(String),
    ConfirmDelete(String),
    TokenMenu,
    TokenDetails,
    TokenDetailsFor(String),
    TokenTransfers,
    TokenTransfersFor(String),
    InstructionNames,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::MainMenu => write!(f, "main:menu"),
            Action::Demo => write!(f, "main:demo"),
            Action::EndChat => write!(f, "main:end"),
            Action::Back => write!(f, "nav:back"),
            Action::Cancel => write!(f, "nav:cancel"),
            Action::WalletMenu => write!(f, "wallet:menu"),
            Action::SaveWallet => write!(f, "wallet:save"),
            Action::MyWallets => write!(f, "wallet:list"),
            Action::SelectWallet(nick) => write!(f, "wallet:select:{}", nick),
            Action::ViewHoldings(nick) => write!(f, "wallet:holdings:{}", nick),
            Action::WalletTransfers(nick) => write!(f, "wallet:transfers:{}", nick),
            Action::DeleteWallet(nick) => write!(f, "wallet:delete:{}", nick),
            Action::ConfirmDelete(nick) => write!(f, "wallet:confirm_delete:{}", nick),
            Action::TokenMenu => write!(f, "token:menu"),
            Action::TokenDetails => write!(f, "token:details"),
            Action::TokenDetailsFor(mint) => write!(f, "token:details:{}", mint),
            Action::TokenTransfers => write!(f, "token:transfers"),
            Action::TokenTransfersFor(mint) => write!(f, "token:transfers:{}", mint),
            Action::InstructionNames => write!(f, "token:instructions"),
        }
    }
}

impl Action {
    /// Parses callback data. Unknown or malformed data yields `None`.
    pub fn decode(data: &str) -> Option<Action> {
        let mut parts = data.splitn(3, ':');
        let screen = parts.next()?;
        let action = parts.next()?;
        let param = parts.next().filter(|p| !p.is_empty()).map(str::to_string);

        let decoded = match (screen, action, param) {
            ("main", "menu", None) => Action::MainMenu,
            ("main", "demo", None) => Action::Demo,
            ("main", "end", None) => Action::EndChat,
            ("nav", "back", None) => Action::Back,
            ("nav", "cancel", None) => Action::Cancel,
            ("wallet", "menu", None) => Action::WalletMenu,
            ("wallet", "save", None) => Action::SaveWallet,
            ("wallet", "list", None) => Action::MyWallets,
            ("wallet", "select", Some(nick)) => Action::SelectWallet(nick),
            ("wallet", "holdings", Some(nick)) => Action::ViewHoldings(nick),
            ("wallet", "transfers", Some(nick)) => Action::WalletTransfers(nick),
            ("wallet", "delete", Some(nick)) => Action::DeleteWallet(nick),
            ("wallet", "confirm_delete", Some(nick)) => Action::ConfirmDelete(nick),
            ("token", "menu", None) => Action::TokenMenu,
            ("token", "details", None) => Action::TokenDetails,
            ("token", "details", Some(mint)) => Action::TokenDetailsFor(mint),
            ("token", "transfers", None) => Action::TokenTransfers,
            ("token", "transfers", Some(mint)) => Action::TokenTransfersFor(mint),
            ("token", "instructions", None) => Action::InstructionNames,
            _ => return None,
        };
        Some(decoded)
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }
}
