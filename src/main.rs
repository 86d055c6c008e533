use anyhow::{Context, Result};
use clap::Parser;

use actionperm::config::Config;
use actionperm::core::ResourceDescriptor;
use actionperm::serializers::{select_backend, FrameworkVersion};
use actionperm::utils::logging;

#[derive(Parser)]
#[clap(version = "0.1.0", author = "actionperm Contributors")]
enum Cli {
    /// Print the permissions each action requires for a resource
    Resolve {
        #[clap(short, long, default_value = "actionperm.toml")]
        config: String,
        #[clap(short, long)]
        namespace: String,
        #[clap(short, long)]
        type_name: String,
        /// Only print this action
        #[clap(short, long)]
        action: Option<String>,
    },
    /// Validate a configuration file
    Check {
        #[clap(short, long, default_value = "actionperm.toml")]
        config: String,
    },
    /// Show which serializer backend a framework version uses
    Serializer {
        #[clap(short = 'f', long)]
        framework_version: String,
    },
}

fn load_config(path: &str) -> Result<Config> {
    Config::load(path).with_context(|| format!("Failed to load config from '{}'", path))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli {
        Cli::Resolve {
            config,
            namespace,
            type_name,
            action,
        } => {
            let config = load_config(&config)?;
            logging::init(&config.log)?;

            let policy = config.build_viewset_permissions()?;
            let resource = ResourceDescriptor::new(namespace, type_name);
            let actions = match &action {
                Some(action) => vec![action.as_str()],
                None => policy.perms_map().actions(),
            };
            for action in actions {
                let perms = policy.permissions_for_action(Some(action), &resource)?;
                println!("{:<16} {}", action, perms.join(", "));
            }
        }
        Cli::Check { config } => {
            let config = load_config(&config)?;
            logging::init(&config.log)?;

            let policy = config.build_viewset_permissions()?;
            let without_model = config.build_without_model_permissions();
            println!("debug: {}", config.debug);
            println!("model actions: {}", policy.perms_map().actions().join(", "));
            println!(
                "default list routes: {}",
                config.permissions.default_list_routes.join(", ")
            );
            if without_model.perms_map().is_empty() {
                println!("without-model actions: (none)");
            } else {
                println!(
                    "without-model actions: {}",
                    without_model.perms_map().actions().join(", ")
                );
            }
        }
        Cli::Serializer { framework_version } => {
            let version: FrameworkVersion = framework_version.parse()?;
            let backend = select_backend(version)?;
            println!("{} -> {}", version, backend);
            if backend.is_deprecated() {
                println!("note: the inheritance fix is no longer needed for {}", version);
            }
        }
    }

    logging::shutdown();
    Ok(())
}
