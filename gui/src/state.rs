use std::path::PathBuf;

// -- Screens --

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Screen {
    /// No account exposed yet.
    Connect,
    /// Connected: identity chip and the claim form.
    Claim,
}

// -- Launch options --

/// Flags the desktop app understands. Same names as the CLI.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct LaunchOptions {
    pub(crate) config: Option<PathBuf>,
    pub(crate) wallet_url: Option<String>,
    pub(crate) rpc_url: Option<String>,
    pub(crate) insecure: bool,
    pub(crate) verbose: bool,
}

impl LaunchOptions {
    pub(crate) fn from_args(args: impl IntoIterator<Item = String>) -> Self {
        let mut opts = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => opts.config = args.next().map(PathBuf::from),
                "--wallet-url" => opts.wallet_url = args.next(),
                "--rpc-url" => opts.rpc_url = args.next(),
                "--insecure" => opts.insecure = true,
                "--verbose" | "-v" => opts.verbose = true,
                _ => {}
            }
        }
        opts
    }

    /// Parse process args, with `SUBCLAIM_*` env vars filling unset URLs.
    pub(crate) fn from_env() -> Self {
        let mut opts = Self::from_args(std::env::args().skip(1));
        if opts.wallet_url.is_none() {
            opts.wallet_url = std::env::var("SUBCLAIM_WALLET_URL").ok();
        }
        if opts.rpc_url.is_none() {
            opts.rpc_url = std::env::var("SUBCLAIM_RPC_URL").ok();
        }
        opts
    }
}
