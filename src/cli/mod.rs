//! CLI routing and command dispatch.

use crate::core::paths::VaultPaths;
use crate::models::config::PolicySection;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod credential;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub paths: VaultPaths,
    pub non_interactive: bool,
    pub policy: PolicySection,
}

#[derive(Parser, Debug)]
#[command(
    name = "credvault",
    version,
    about = "Personal credential vault: per-(user, platform) password hashes"
)]
pub struct Cli {
    /// Vault directory (default: $CREDVAULT_ROOT or ~/.credvault)
    #[arg(long, global = true, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Run in non-interactive mode (no prompts, suitable for automation)
    #[arg(long, global = true, env = "CREDVAULT_NON_INTERACTIVE")]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let paths = VaultPaths::resolve(self.root)?;

        // Load policy from config.toml if present (best-effort): a broken
        // config should not block read-only commands.
        let policy = match crate::core::config::load(&paths.config_toml) {
            Ok(config) => config.policy,
            Err(e) => {
                eprintln!("warning: cannot read policy from config.toml: {}", e);
                PolicySection::default()
            }
        };

        let ctx = CliContext {
            paths,
            non_interactive: self.non_interactive,
            policy,
        };

        match self.command {
            Commands::Store(args) => credential::run_store(&ctx, args),
            Commands::Verify(args) => credential::run_verify(&ctx, args),
            Commands::Update(args) => credential::run_update(&ctx, args),
            Commands::Delete(args) => credential::run_delete(&ctx, args),
            Commands::List(args) => credential::run_list(&ctx, args),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a new credential (never overwrites an existing one)
    Store(credential::StoreArgs),
    /// Verify a password against the stored credential
    Verify(credential::VerifyArgs),
    /// Replace a stored password, proving the old one first
    Update(credential::UpdateArgs),
    /// Delete a credential
    Delete(credential::DeleteArgs),
    /// List stored credentials (hash tokens only, never plaintext)
    List(credential::ListArgs),
}
