use eyre::WrapErr;
use vcapenv_catalog::ServiceCredentials;
use vcapenv_core::Error;
use vcapenv_utils::{is_secret_field, mask_secret};

use crate::commands::Context;

pub fn execute(context: &Context, name: &str, reveal: bool) -> eyre::Result<()> {
    let catalog = context
        .catalog()?
        .ok_or_else(|| Error::service_not_found("*", Some(name), Vec::new()))?;
    let service = catalog.by_name(name).ok_or_else(|| {
        Error::service_not_found("*", Some(name), catalog.service_types().map(str::to_string).collect())
    })?;

    println!("type: {}", service.service_type());
    println!("name: {}", service.name().unwrap_or("-"));
    println!("label: {}", service.label().unwrap_or("-"));
    println!("plan: {}", service.plan().unwrap_or("-"));
    println!("tags: {}", service.tags().join(", "));
    println!("credentials:");
    for (key, value) in credential_lines(service.credentials(), reveal)
        .wrap_err_with(|| format!("failed to render credentials of '{name}'"))?
    {
        println!("  {key}: {value}");
    }
    Ok(())
}

fn credential_lines(
    credentials: &ServiceCredentials,
    reveal: bool,
) -> eyre::Result<Vec<(String, String)>> {
    let mut lines = Vec::new();
    for key in credentials.keys() {
        let value = match credentials.get(key) {
            Some(value) => value,
            // Arrays, objects and null print as JSON
            None => serde_json::to_string(&credentials.raw().get(key))?,
        };
        let value = if reveal || !is_secret_field(key) {
            value
        } else {
            mask_secret(&value)
        };
        lines.push((key.to_string(), value));
    }
    Ok(lines)
}
