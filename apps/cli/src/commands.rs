//! # Subcommand Handlers
//!
//! Each handler takes already-read input and returns the text to print, so
//! the handlers stay testable without touching stdout or the file system.

use std::path::PathBuf;

use qrwari_core::bill::{payment_requests, resolve_payee, summary_lines};
use qrwari_core::{
    build, detect_id_type, split_event, split_event_strict, CoreError, Event, IdType, Money,
    SplitResult,
};
use tracing::info;

use crate::config::QrwariConfig;
use crate::error::CliResult;

/// Parses an event document.
pub fn parse_event(json: &str) -> CliResult<Event> {
    Ok(serde_json::from_str(json)?)
}

/// Splits honoring the `strict_references` setting.
fn run_split(event: &Event, config: &QrwariConfig) -> CliResult<SplitResult> {
    let result = if config.split.strict_references {
        split_event_strict(event)?
    } else {
        split_event(event)?
    };
    Ok(result)
}

/// Picks the flag over the configured payee.
fn payee<'a>(flag: Option<&'a str>, config: &'a QrwariConfig) -> CliResult<&'a str> {
    flag.map(str::trim)
        .filter(|id| !id.is_empty())
        .or_else(|| config.promptpay_id())
        .ok_or_else(|| CoreError::MissingPromptPayId.into())
}

// =============================================================================
// split
// =============================================================================

/// `qrwari split <event.json>`: the split result as pretty JSON.
pub fn split(event_json: &str, config: &QrwariConfig) -> CliResult<String> {
    let event = parse_event(event_json)?;
    let result = run_split(&event, config)?;
    Ok(serde_json::to_string_pretty(&result)?)
}

// =============================================================================
// detect
// =============================================================================

/// `qrwari detect <raw>`: the id type, or `unsupported`.
pub fn detect(raw: &str) -> String {
    match detect_id_type(raw) {
        Some(id_type) => id_type.to_string(),
        None => "unsupported".to_string(),
    }
}

// =============================================================================
// qr
// =============================================================================

/// `qrwari qr`: a single payload for the payee.
///
/// The id type is detected unless given; bank accounts and other types the
/// classifier never returns need an explicit `--id-type`.
pub fn qr(
    amount: Option<Money>,
    promptpay_id: Option<&str>,
    id_type: Option<IdType>,
    config: &QrwariConfig,
) -> CliResult<String> {
    let raw = payee(promptpay_id, config)?;
    let id_type = match id_type {
        Some(id_type) => id_type,
        None => resolve_payee(raw)?,
    };

    let input = config.locale.payload_input(id_type, raw, amount);
    Ok(build(&input)?.content)
}

// =============================================================================
// bill
// =============================================================================

/// `qrwari bill <event.json>`: one payment code per participant, then the
/// summary.
///
/// ```text
/// Dinner
///
/// Ann  ฿33.33
/// 00020101021229370016A000000677010111...
///
/// ...
///
/// Summary
/// Ann    ฿33.33
/// Total  ฿100.00
/// ```
pub fn bill(
    event_json: &str,
    promptpay_id: Option<&str>,
    config: &QrwariConfig,
) -> CliResult<String> {
    let event = parse_event(event_json)?;
    let raw = payee(promptpay_id, config)?;
    let split = run_split(&event, config)?;
    let requests = payment_requests(&split, raw, &config.locale)?;

    let mut sections = Vec::with_capacity(requests.len() + 2);
    if !event.name.is_empty() {
        sections.push(event.name.clone());
    }
    for request in &requests {
        sections.push(format!(
            "{}  {}\n{}",
            request.participant.name, request.amount, request.payload.content
        ));
    }
    sections.push(format!("Summary\n{}", summary_lines(&split).join("\n")));

    Ok(sections.join("\n\n"))
}

// =============================================================================
// config
// =============================================================================

/// `qrwari config show`: the effective configuration as TOML.
pub fn show_config(config: &QrwariConfig) -> CliResult<String> {
    Ok(toml::to_string_pretty(config)?)
}

/// `qrwari config set-payee <id>`: checks the id and stores it.
///
/// Rewrites the stored file only; environment overrides stay out of it and
/// a missing file is created.
pub fn set_payee(promptpay_id: &str, config_path: Option<PathBuf>) -> CliResult<String> {
    let id_type = resolve_payee(promptpay_id)?;
    let mut config = QrwariConfig::load_file(config_path.clone())?;
    config.payee.promptpay_id = Some(promptpay_id.trim().to_string());
    config.save(config_path)?;

    info!(%id_type, "Payee updated");
    Ok(format!("Payee set to {} ({})", promptpay_id.trim(), id_type))
}
