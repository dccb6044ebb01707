//! Command handlers for the five vault operations.
//!
//! This layer only collects input, holds the lock around mutations, and
//! renders typed outcomes; normalization, hashing, and the state transitions
//! live in [`crate::core::store`].

use crate::cli::CliContext;
use crate::constants;
use crate::core::file_lock::FileLock;
use crate::core::json_store::JsonStore;
use crate::core::normalize;
use crate::core::store::{CredentialStore, StoreOutcome, UpdateOutcome};
use crate::models::config::PolicySection;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use dialoguer::Password;
use serde::Serialize;
use std::io::Read;
use zeroize::Zeroizing;

// One generic refusal for verify/update, whether the record is missing or the
// password is wrong. Distinguishing the two would let a caller probe which
// (username, platform) pairs exist.
const AUTH_FAILURE_MSG: &str = "password is incorrect or no such credential exists";

fn parse_username(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("username cannot be empty".into());
    }
    Ok(s.to_string())
}

fn parse_platform(s: &str) -> Result<String, String> {
    if normalize::normalize_platform(s).is_empty() {
        return Err("platform cannot be empty".into());
    }
    Ok(s.to_string())
}

#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Account username (case-sensitive, stored as given)
    #[arg(value_parser = parse_username)]
    pub username: String,

    /// Platform or application name (normalized before storage)
    #[arg(value_parser = parse_platform)]
    pub platform: String,

    /// Read the password from stdin instead of an interactive prompt
    #[arg(long)]
    pub from_stdin: bool,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Account username
    #[arg(value_parser = parse_username)]
    pub username: String,

    /// Platform or application name
    #[arg(value_parser = parse_platform)]
    pub platform: String,

    /// Read the password from stdin instead of an interactive prompt
    #[arg(long)]
    pub from_stdin: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Account username
    #[arg(value_parser = parse_username)]
    pub username: String,

    /// Platform or application name
    #[arg(value_parser = parse_platform)]
    pub platform: String,

    /// Read old and new passwords from stdin (first and second line)
    #[arg(long)]
    pub from_stdin: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Account username
    #[arg(value_parser = parse_username)]
    pub username: String,

    /// Platform or application name
    #[arg(value_parser = parse_platform)]
    pub platform: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format: table|json
    #[arg(long, default_value = "table")]
    pub format: String,
}

#[derive(Serialize)]
struct ListItem {
    username: String,
    platform: String,
    hash: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

fn open_store(ctx: &CliContext) -> CredentialStore<JsonStore> {
    CredentialStore::new(JsonStore::new(ctx.paths.store_file.clone()))
}

pub fn run_store(ctx: &CliContext, args: StoreArgs) -> Result<()> {
    ctx.paths.ensure_root()?;

    if ctx.non_interactive && !args.from_stdin {
        bail!("--non-interactive requires --from-stdin for store");
    }
    let password = read_password(args.from_stdin, "Password")?;
    check_password_policy(&ctx.policy, &password)?;

    let _vault_lock = FileLock::exclusive(&ctx.paths.vault_lock)?;
    let mut store = open_store(ctx);
    let platform = normalize::normalize_platform(&args.platform);
    match store.store(&args.username, &args.platform, &password)? {
        StoreOutcome::Stored => {
            println!("Stored credential for '{}' on '{}'", args.username, platform);
        }
        StoreOutcome::AlreadyExists => {
            println!(
                "A credential for '{}' on '{}' is already stored (use update to replace it)",
                args.username, platform
            );
        }
    }
    Ok(())
}

pub fn run_verify(ctx: &CliContext, args: VerifyArgs) -> Result<()> {
    if ctx.non_interactive && !args.from_stdin {
        bail!("--non-interactive requires --from-stdin for verify");
    }
    let password = read_password(args.from_stdin, "Password to verify")?;

    let store = open_store(ctx);
    if store.verify(&args.username, &args.platform, &password)? {
        println!("Password is correct");
        Ok(())
    } else {
        bail!(AUTH_FAILURE_MSG);
    }
}

pub fn run_update(ctx: &CliContext, args: UpdateArgs) -> Result<()> {
    if ctx.non_interactive && !args.from_stdin {
        bail!("--non-interactive requires --from-stdin for update");
    }
    let (old_password, new_password) = if args.from_stdin {
        read_password_pair_stdin()?
    } else {
        (
            prompt_password("Old password")?,
            prompt_password("New password")?,
        )
    };
    check_password_policy(&ctx.policy, &new_password)?;

    let _vault_lock = FileLock::exclusive(&ctx.paths.vault_lock)?;
    let mut store = open_store(ctx);
    match store.update(&args.username, &args.platform, &old_password, &new_password)? {
        UpdateOutcome::Updated => {
            println!(
                "Updated credential for '{}' on '{}'",
                args.username,
                normalize::normalize_platform(&args.platform)
            );
            Ok(())
        }
        UpdateOutcome::Rejected => bail!(AUTH_FAILURE_MSG),
    }
}

pub fn run_delete(ctx: &CliContext, args: DeleteArgs) -> Result<()> {
    let _vault_lock = FileLock::exclusive(&ctx.paths.vault_lock)?;
    let mut store = open_store(ctx);
    let platform = normalize::normalize_platform(&args.platform);
    let removed = store.delete(&args.username, &args.platform)?;
    if removed > 0 {
        println!("Deleted credential for '{}' on '{}'", args.username, platform);
    } else {
        println!("No credential found for '{}' on '{}'", args.username, platform);
    }
    Ok(())
}

pub fn run_list(ctx: &CliContext, args: ListArgs) -> Result<()> {
    if args.format != "table" && args.format != "json" {
        bail!("invalid format: {} (use table|json)", args.format);
    }

    let store = open_store(ctx);
    let items: Vec<ListItem> = store
        .list_all()?
        .into_iter()
        .map(|cred| ListItem {
            username: cred.username,
            platform: cred.platform,
            hash: cred.hash,
            created_at: cred.created_at,
            updated_at: cred.updated_at,
        })
        .collect();

    if args.format == "json" {
        let json = serde_json::to_string_pretty(&items).context("serialize list")?;
        println!("{}", json);
        return Ok(());
    }

    if items.is_empty() {
        println!("No credentials stored");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Username").add_attribute(Attribute::Bold),
        Cell::new("Platform").add_attribute(Attribute::Bold),
        Cell::new("Hash").add_attribute(Attribute::Bold),
        Cell::new("Created").add_attribute(Attribute::Bold),
        Cell::new("Updated").add_attribute(Attribute::Bold),
    ]);

    for item in items {
        table.add_row(vec![
            item.username,
            item.platform,
            item.hash,
            format_local(item.created_at),
            item.updated_at
                .map(format_local)
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    println!("{}", table);
    Ok(())
}

fn format_local(ts: DateTime<Utc>) -> String {
    let local: DateTime<Local> = ts.into();
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn check_password_policy(policy: &PolicySection, password: &str) -> Result<()> {
    if let Err(min) = policy.check_password_length(password) {
        bail!(
            "policy: password shorter than minimum length {} (set in config.toml [policy])",
            min
        );
    }
    Ok(())
}

fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    let password = Zeroizing::new(
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(false)
            .interact()
            .context("read password from prompt")?,
    );
    check_password_size(&password)?;
    Ok(password)
}

fn read_password(from_stdin: bool, prompt: &str) -> Result<Zeroizing<String>> {
    if !from_stdin {
        return prompt_password(prompt);
    }
    let buf = read_stdin()?;
    let password = Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string());
    if password.is_empty() {
        bail!("password from stdin is empty");
    }
    check_password_size(&password)?;
    Ok(password)
}

/// Old password on the first line of stdin, new password on the second.
fn read_password_pair_stdin() -> Result<(Zeroizing<String>, Zeroizing<String>)> {
    let buf = read_stdin()?;
    let mut lines = buf.lines();
    let old = Zeroizing::new(
        lines
            .next()
            .filter(|l| !l.is_empty())
            .context("expected old password on first line of stdin")?
            .to_string(),
    );
    let new = Zeroizing::new(
        lines
            .next()
            .filter(|l| !l.is_empty())
            .context("expected new password on second line of stdin")?
            .to_string(),
    );
    check_password_size(&old)?;
    check_password_size(&new)?;
    Ok((old, new))
}

fn read_stdin() -> Result<Zeroizing<String>> {
    let mut buf = Zeroizing::new(String::new());
    std::io::stdin()
        .read_to_string(&mut *buf)
        .context("read password from stdin")?;
    Ok(buf)
}

fn check_password_size(password: &str) -> Result<()> {
    if password.len() > constants::MAX_PASSWORD_SIZE {
        bail!(
            "password exceeds maximum size ({} bytes, max {} bytes)",
            password.len(),
            constants::MAX_PASSWORD_SIZE
        );
    }
    Ok(())
}
