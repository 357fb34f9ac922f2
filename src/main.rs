//! `pihole` - manage a Pi-hole's local DNS, CNAME records, groups and blocking
//! from the command line.
//!
//! Connection settings come from flags or the `PIHOLE_*` environment
//! variables. Every command prints its result as JSON on stdout; logs go to
//! stderr.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pihole::api::DEFAULT_URL;
use pihole::resources::{
    AdBlockerResource, CnameRecordResource, DnsRecordResource, GroupResource, GroupSpec, Resource,
    AD_BLOCKER_ID,
};
use pihole::types::{AdBlockStatus, CnameRecord, DnsRecord, DomainKind};
use pihole::{data_sources, Client, Config};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pi-hole base URL
    #[arg(long, env = "PIHOLE_URL", default_value = DEFAULT_URL, global = true)]
    url: String,

    /// Admin dashboard password
    #[arg(long, env = "PIHOLE_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    /// API token, used instead of a password
    #[arg(long, env = "PIHOLE_API_TOKEN", hide_env_values = true, global = true)]
    api_token: Option<String>,

    /// PEM file with an additional root certificate
    #[arg(long, env = "PIHOLE_CA_FILE", global = true)]
    ca_file: Option<PathBuf>,

    /// Existing dashboard session ID to reuse
    #[arg(long, env = "__PIHOLE_SESSION_ID", hide = true, global = true)]
    session_id: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "PIHOLE_TIMEOUT", global = true)]
    timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "PIHOLE_LOG_LEVEL", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Local DNS records
    Dns {
        #[command(subcommand)]
        command: DnsCommand,
    },
    /// Local CNAME records
    Cname {
        #[command(subcommand)]
        command: CnameCommand,
    },
    /// Client groups
    Group {
        #[command(subcommand)]
        command: GroupCommand,
    },
    /// Allow and deny list entries
    Domains {
        #[command(subcommand)]
        command: DomainsCommand,
    },
    /// Ad-blocking status
    Adblock {
        #[command(subcommand)]
        command: AdblockCommand,
    },
}

#[derive(Subcommand)]
enum DnsCommand {
    List,
    Get { domain: String },
    Create { domain: String, ip: IpAddr },
    Update { domain: String, ip: IpAddr },
    Delete { domain: String },
}

#[derive(Subcommand)]
enum CnameCommand {
    List,
    Get { domain: String },
    Create { domain: String, target: String },
    Update { domain: String, target: String },
    Delete { domain: String },
}

#[derive(Subcommand)]
enum GroupCommand {
    List,
    Get {
        name: String,
    },
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        disabled: bool,
    },
    Update {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        disabled: bool,
    },
    Delete {
        name: String,
    },
}

#[derive(Subcommand)]
enum DomainsCommand {
    List {
        /// Only show one list: allow or deny
        #[arg(long = "type")]
        kind: Option<DomainKind>,
    },
}

#[derive(Subcommand)]
enum AdblockCommand {
    Status,
    Enable,
    Disable,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct Deleted<'a> {
    deleted: &'a str,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            url: self.url.clone(),
            password: self.password.clone(),
            api_token: self.api_token.clone(),
            ca_file: self.ca_file.clone(),
            session_id: self.session_id.clone(),
            user_agent: None,
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

async fn run_dns(client: Arc<Client>, command: DnsCommand) -> anyhow::Result<()> {
    let records = DnsRecordResource::new(client.clone());
    match command {
        DnsCommand::List => print_json(&data_sources::dns_records(&client).await?),
        DnsCommand::Get { domain } => print_json(&client.get_dns_record(&domain).await?),
        DnsCommand::Create { domain, ip } => {
            print_json(&records.create(&DnsRecord::new(domain, ip)).await?)
        }
        DnsCommand::Update { domain, ip } => {
            print_json(&records.update(&domain, &DnsRecord::new(domain.clone(), ip)).await?)
        }
        DnsCommand::Delete { domain } => {
            records.delete(&domain).await?;
            print_json(&Deleted { deleted: &domain })
        }
    }
}

async fn run_cname(client: Arc<Client>, command: CnameCommand) -> anyhow::Result<()> {
    let records = CnameRecordResource::new(client.clone());
    match command {
        CnameCommand::List => print_json(&data_sources::cname_records(&client).await?),
        CnameCommand::Get { domain } => print_json(&client.get_cname_record(&domain).await?),
        CnameCommand::Create { domain, target } => {
            print_json(&records.create(&CnameRecord::new(domain, target)).await?)
        }
        CnameCommand::Update { domain, target } => print_json(
            &records
                .update(&domain, &CnameRecord::new(domain.clone(), target))
                .await?,
        ),
        CnameCommand::Delete { domain } => {
            records.delete(&domain).await?;
            print_json(&Deleted { deleted: &domain })
        }
    }
}

async fn run_group(client: Arc<Client>, command: GroupCommand) -> anyhow::Result<()> {
    let groups = GroupResource::new(client.clone());
    match command {
        GroupCommand::List => print_json(&data_sources::groups(&client).await?),
        GroupCommand::Get { name } => print_json(&client.get_group(&name).await?),
        GroupCommand::Create {
            name,
            description,
            disabled,
        } => {
            let spec = GroupSpec::new(name)
                .description(description)
                .enabled(!disabled);
            print_json(&groups.create(&spec).await?)
        }
        GroupCommand::Update {
            name,
            description,
            disabled,
        } => {
            let existing = client.get_group(&name).await?;
            let spec = GroupSpec::new(name)
                .description(description)
                .enabled(!disabled);
            print_json(&groups.update(&GroupResource::id(&existing), &spec).await?)
        }
        GroupCommand::Delete { name } => {
            client.delete_group(&name).await?;
            print_json(&Deleted { deleted: &name })
        }
    }
}

async fn run_adblock(client: Arc<Client>, command: AdblockCommand) -> anyhow::Result<()> {
    let blocker = AdBlockerResource::new(client);
    let status = match command {
        AdblockCommand::Status => blocker.read(AD_BLOCKER_ID).await?,
        AdblockCommand::Enable => Some(
            blocker
                .update(AD_BLOCKER_ID, &AdBlockStatus { enabled: true })
                .await?,
        ),
        AdblockCommand::Disable => Some(
            blocker
                .update(AD_BLOCKER_ID, &AdBlockStatus { enabled: false })
                .await?,
        ),
    };
    print_json(&status)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pihole={}", cli.log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();
    debug!(url = %config.url, "connecting to Pi-hole");
    let client = Arc::new(
        config
            .client()
            .await
            .with_context(|| format!("failed to connect to Pi-hole at {}", config.url))?,
    );

    match cli.command {
        Commands::Dns { command } => run_dns(client, command).await,
        Commands::Cname { command } => run_cname(client, command).await,
        Commands::Group { command } => run_group(client, command).await,
        Commands::Domains {
            command: DomainsCommand::List { kind },
        } => print_json(&data_sources::domains(&client, kind).await?),
        Commands::Adblock { command } => run_adblock(client, command).await,
    }
}
