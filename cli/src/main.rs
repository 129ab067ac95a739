//! atto: a minimal wallet for block-lattice accounts.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use atto_crypto::{derive_private_key, generate_seed, parse_seed_hex, Account, SEED_LEN};
use atto_rpc::{HttpTransport, NodeClient};
use atto_types::Raw;
use atto_wallet_core::{Wallet, WalletConfig};
use clap::Parser;
use tracing::debug;

const AFTER_HELP: &str = "\
The address, balance, representative and send subcommands expect a seed as
the first line of their standard input. Showing the first address of a newly
generated seed could work like this:
    atto new | tee seed.txt | atto address

The balance subcommand receives everything receivable before it prints the
balance. The send subcommand asks for confirmation on the terminal unless -y
is given.";

#[derive(Parser)]
#[command(
    name = "atto",
    version,
    about = "Minimal wallet for block-lattice accounts",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Index of the account derived from the seed.
    #[arg(short = 'a', long = "account", default_value_t = 0)]
    account_index: u32,

    /// Send without asking for confirmation.
    #[arg(short = 'y', long = "yes")]
    yes: bool,

    /// Path to a TOML configuration file.
    #[arg(long, env = "ATTO_CONFIG")]
    config: Option<PathBuf>,

    /// Node RPC URL; overrides the configuration file.
    #[arg(long, env = "ATTO_NODE_URL")]
    node: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a new seed.
    #[command(visible_alias = "n")]
    New,

    /// Print the account's address.
    #[command(visible_alias = "a")]
    Address,

    /// Receive everything receivable and print the balance.
    #[command(visible_alias = "b")]
    Balance,

    /// Change the account's representative.
    #[command(visible_alias = "r")]
    Representative { representative: String },

    /// Send AMOUNT to RECIPIENT.
    #[command(visible_alias = "s")]
    Send { amount: String, recipient: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => WalletConfig::from_toml_file(path)
            .with_context(|| format!("could not load {}", path.display()))?,
        None => WalletConfig::default(),
    };
    if let Some(node) = cli.node {
        config.node_url = node;
    }
    atto_utils::init_logging(config.log_format, &config.log_level)?;
    debug!(node = %config.node_url, account_index = cli.account_index, "starting");

    match cli.command {
        Command::New => {
            println!("{}", hex::encode_upper(generate_seed()?));
        }
        Command::Address => {
            let seed = read_seed()?;
            let private_key = derive_private_key(&seed, cli.account_index)?;
            println!(
                "{}",
                Account::from_private_key(&private_key, &config.address_prefix)
            );
        }
        Command::Balance => {
            let wallet = open_wallet(&config, cli.account_index)?;
            let (info, received) = wallet.receive_pending().await?;
            for entry in &received {
                eprintln!(
                    "Received {} from {}",
                    display_amount(&config, &entry.receivable.amount),
                    entry.receivable.source
                );
            }
            println!("{}", display_amount(&config, &info.balance));
        }
        Command::Representative { representative } => {
            let representative = Account::from_address(&representative)?;
            let wallet = open_wallet(&config, cli.account_index)?;
            eprint!("Creating change block... ");
            wallet.change_representative(representative).await?;
            eprintln!("done");
        }
        Command::Send { amount, recipient } => {
            let recipient = Account::from_address(&recipient)?;
            // Reject malformed amounts before asking.
            config.unit().decimal_to_raw(&amount)?;
            let wallet = open_wallet(&config, cli.account_index)?;
            if !cli.yes && !confirm_send(&amount, &config.unit_name, &recipient)? {
                eprintln!("Send aborted.");
                return Ok(());
            }
            eprint!("Creating send block... ");
            wallet.send(&amount, &recipient).await?;
            eprintln!("done");
        }
    }
    Ok(())
}

fn open_wallet(config: &WalletConfig, index: u32) -> anyhow::Result<Wallet<HttpTransport>> {
    let seed = read_seed()?;
    let client = NodeClient::new(config.http_transport()?);
    Ok(Wallet::from_seed(client, &seed, index, config)?)
}

/// The seed is the first line of stdin, as 64 hex characters.
fn read_seed() -> anyhow::Result<[u8; SEED_LEN]> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("could not read the seed from standard input")?;
    if line.trim().is_empty() {
        bail!("expected a seed as the first line of standard input");
    }
    Ok(parse_seed_hex(&line)?)
}

fn display_amount(config: &WalletConfig, raw: &Raw) -> String {
    format!("{} {}", config.unit().raw_to_decimal(raw), config.unit_name)
}

/// Ask on the terminal itself, since stdin carries the seed.
fn confirm_send(amount: &str, unit_name: &str, recipient: &Account) -> anyhow::Result<bool> {
    let tty_path = if cfg!(windows) { "CONIN$" } else { "/dev/tty" };
    let tty = File::open(tty_path).context("could not open terminal for confirmation input")?;

    eprint!("Send {amount} {unit_name} to {recipient}? [y/N]: ");
    io::stderr().flush()?;
    let mut answer = String::new();
    BufReader::new(tty).read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_send_with_flags() {
        let cli = Cli::try_parse_from(["atto", "-a", "3", "-y", "send", "1.5", "nano_x"]).unwrap();
        assert_eq!(cli.account_index, 3);
        assert!(cli.yes);
        assert!(matches!(
            cli.command,
            Command::Send { ref amount, ref recipient } if amount == "1.5" && recipient == "nano_x"
        ));
    }

    #[test]
    fn short_aliases() {
        let cli = Cli::try_parse_from(["atto", "b"]).unwrap();
        assert!(matches!(cli.command, Command::Balance));
        let cli = Cli::try_parse_from(["atto", "r", "nano_rep"]).unwrap();
        assert!(matches!(cli.command, Command::Representative { .. }));
    }

    #[test]
    fn representative_needs_an_argument() {
        assert!(Cli::try_parse_from(["atto", "representative"]).is_err());
    }

    #[test]
    fn amounts_show_unit() {
        let config = WalletConfig::default();
        let raw: Raw = "1500000000000000000000000000000".parse().unwrap();
        assert_eq!(display_amount(&config, &raw), "1.5 NANO");
    }
}
