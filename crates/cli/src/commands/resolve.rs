use vcapenv_catalog::resolve_placeholders;

use crate::commands::Context;

pub fn execute(context: &Context, value: &str) -> eyre::Result<()> {
    println!("{}", resolve_placeholders(value, context.lookup.as_ref()));
    Ok(())
}
