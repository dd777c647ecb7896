use crate::commands::Context;

pub fn execute(
    context: &Context,
    default_key_or_uri: &str,
    scheme: &str,
    type_selector: &str,
    name_selector: Option<&str>,
) -> eyre::Result<()> {
    let resolver = context.connection_resolver()?;
    let uri = resolver.resolve_uri(default_key_or_uri, scheme, type_selector, name_selector)?;
    println!("{uri}");
    Ok(())
}
