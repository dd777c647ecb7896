use crate::commands::Context;

pub fn execute(context: &Context) -> eyre::Result<()> {
    let Some(catalog) = context.catalog()? else {
        eprintln!("No services bound ({} is not set)", context.settings.blob_variable);
        return Ok(());
    };

    for service in catalog.iter() {
        println!(
            "{}\t{}\t{}\t{}",
            service.service_type(),
            service.name().unwrap_or("-"),
            service.label().unwrap_or("-"),
            service.plan().unwrap_or("-"),
        );
    }
    Ok(())
}
