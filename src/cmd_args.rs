use std::ffi::OsString;

pub use clap::Parser;
use clap::Subcommand;

use crate::models::PaymentMethod;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Profile to read the gateway host and API key from. Default is 'default'.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Gateway base URL, overriding the profile's host
    #[clap(long, help = "gateway base URL (overrides the profile)")]
    base_url: Option<String>,

    /// API key, overriding the profile's api_key
    #[clap(long, help = "gateway API key (overrides the profile)")]
    api_key: Option<String>,

    /// Show the raw JSON payloads returned by the gateway
    #[clap(short = 'r', long, help = "show raw gateway payloads")]
    raw: bool,

    /// Verbose mode
    /// Optional. Log request/response traffic to stderr.
    #[clap(
        short = 'v',
        long,
        help = "Print verbose message",
        default_value = "false"
    )]
    verbose: bool,

    #[command(subcommand)]
    command: Option<FlowCommand>,
}

/// The flow to run
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum FlowCommand {
    /// Look up an invoice by its payment reference
    Invoice {
        /// Payment reference
        reference: String,
    },
    /// Submit a payment
    Pay {
        /// OTP reference
        reference: String,
        /// Amount in MRO
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Unique transaction identifier
        transaction_id: String,
        /// Mobile number, 8 digits without the +222 prefix
        phone_number: String,
        /// Request shape: JSON body (post) or path segments (get)
        #[arg(short = 'm', long, value_enum, default_value_t = PaymentMethod::Post)]
        method: PaymentMethod,
    },
    /// Check the status of a payment
    Verify {
        /// Transaction identifier
        transaction_id: String,
    },
    /// Interactive session keeping every flow's state between commands
    Shell,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    base_url: Option<String>,
    api_key: Option<String>,
    raw: bool,
    verbose: bool,
    command: FlowCommand,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            base_url: args.base_url,
            api_key: args.api_key,
            raw: args.raw,
            verbose: args.verbose,
            command: args.command.unwrap_or(FlowCommand::Shell),
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn raw(&self) -> bool {
        self.raw
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn command(&self) -> &FlowCommand {
        &self.command
    }
}
