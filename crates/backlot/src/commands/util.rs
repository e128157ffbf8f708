//! Small helpers shared by command handlers.

use std::io::IsTerminal;

use url::form_urlencoded;

use crate::cli::{GlobalOpts, ListOpts};
use crate::error::CliError;

/// Build the query string that seeds a list controller's URL state.
pub fn seed_query(
    opts: &ListOpts,
    extra: &[(&str, Option<String>)],
) -> Result<String, CliError> {
    let mut ser = form_urlencoded::Serializer::new(String::new());

    if opts.page > 1 {
        ser.append_pair("page", &opts.page.to_string());
    }
    if let Some(limit) = opts.limit {
        ser.append_pair("limit", &limit.to_string());
    }
    if let Some(ref search) = opts.search {
        ser.append_pair("search", search);
    }
    for raw in &opts.filters {
        let (key, value) = raw.split_once('=').ok_or_else(|| CliError::Validation {
            field: "filter".into(),
            reason: format!("expected KEY=VALUE, got '{raw}'"),
        })?;
        ser.append_pair(key, value);
    }
    for (key, value) in extra {
        if let Some(value) = value {
            ser.append_pair(key, value);
        }
    }

    Ok(ser.finish())
}

/// Derive a URL slug from a display name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_owned()
}

/// Confirm a destructive operation, honoring `--yes` and refusing to
/// hang in non-interactive contexts.
pub fn confirm(action: &str, global: &GlobalOpts) -> Result<(), CliError> {
    if global.yes {
        return Ok(());
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.to_owned(),
        });
    }

    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!("Delete {action}?"))
        .default(false)
        .interact()
        .map_err(|e| CliError::Prompt(e.to_string()))?;

    if confirmed {
        Ok(())
    } else {
        Err(CliError::Aborted)
    }
}
