use crate::commands::{Commands, Context};

impl Commands {
    pub fn execute(self, context: &Context) -> eyre::Result<()> {
        match self {
            Commands::List => crate::commands::list::execute(context),
            Commands::Show { name, reveal } => crate::commands::show::execute(context, &name, reveal),
            Commands::Uri {
                default_key_or_uri,
                scheme,
                type_selector,
                name_selector,
            } => crate::commands::uri::execute(
                context,
                &default_key_or_uri,
                &scheme,
                &type_selector,
                name_selector.as_deref(),
            ),
            Commands::Resolve { value } => crate::commands::resolve::execute(context, &value),
        }
    }
}
