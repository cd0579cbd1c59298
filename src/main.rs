mod cli;
mod error;
mod output;

use std::path::Path;

use clap::Parser;
use cli::{AssetsCommand, Command, LogsCommand, PageArgs, UsersCommand};
use dam::query::{ACTION_TYPE, CATEGORY, END_DATE, SEARCH, START_DATE};
use dam::{
    action_counts, ActivityLog, Asset, CsvRecord, Dam, DamConfig, ExportOutcome, FilterSet,
    ListController, LoadState, NewAsset, NewUser, Resource, Role, Searchable, Session, User,
};
use error::CliError;
use serde::Serialize;
use tracing::info;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv(); // load .env if present

    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

async fn run(cli: cli::Cli) -> Result<(), CliError> {
    let config = DamConfig {
        base_url: cli
            .api_url
            .unwrap_or_else(|| dam::config::DEFAULT_API_URL.to_string()),
        token: cli.token,
        ..Default::default()
    };
    let mut session = match &config.token {
        Some(t) => Session::with_token(t.clone()),
        None => Session::anonymous(),
    };
    if let Some(role) = &cli.role {
        session = session.with_role(role.parse()?);
    }
    let mut dam = Dam::new(&config, session);
    let json = cli.json;

    match cli.command {
        Command::Login(args) => {
            let login = dam.login(&args.username, &args.password).await?;
            println!("{}\t{}", login.username, login.role);
        }

        Command::Assets(cmd) => match cmd {
            AssetsCommand::List { filters, paging } => {
                let mut list = dam.asset_list();
                list.set_filter(SEARCH, filters.search);
                list.set_filter(CATEGORY, filters.category);
                load(&dam, &mut list).await?;
                show(&mut list, &paging, json)?;
            }
            AssetsCommand::Upload(args) => {
                require(&dam, Role::can_upload)?;
                let bytes = tokio::fs::read(&args.path).await?;
                let file_name = args
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                let name = args.name.unwrap_or_else(|| {
                    args.path
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_default()
                });
                let meta = NewAsset {
                    name,
                    description: args.description,
                    category: args.category,
                    tags: NewAsset::parse_tags(&args.tags),
                    keywords: args.keywords,
                    is_public: !args.private,
                };
                let asset = dam.upload_asset(&file_name, bytes, None, &meta).await?;
                println!("{}\t{}\t{}", asset.id, asset.name, asset.file_type);
            }
            AssetsCommand::Delete { id } => {
                require(&dam, Role::can_delete_assets)?;
                dam.delete_asset(id).await?;
                info!(id, "asset deleted");
            }
            AssetsCommand::Export { filters, out } => {
                let filters = FilterSet::new()
                    .with(SEARCH, filters.search)
                    .with(CATEGORY, filters.category);
                export::<Asset>(&dam, &filters, &out).await?;
            }
        },

        Command::Users(cmd) => {
            require(&dam, Role::can_manage_users)?;
            match cmd {
                UsersCommand::List { search, paging } => {
                    let mut list = dam.user_list();
                    list.set_filter(SEARCH, search);
                    load(&dam, &mut list).await?;
                    show(&mut list, &paging, json)?;
                }
                UsersCommand::Create {
                    username,
                    email,
                    password,
                    role,
                } => {
                    let user = dam
                        .create_user(&NewUser {
                            username,
                            email,
                            password,
                            role: role.parse()?,
                        })
                        .await?;
                    println!("{}\t{}\t{}", user.id, user.username, user.role);
                }
                UsersCommand::SetRole { id, role } => {
                    let user = dam.update_user_role(id, role.parse()?).await?;
                    println!("{}\t{}\t{}", user.id, user.username, user.role);
                }
                UsersCommand::Delete { id } => {
                    dam.delete_user(id).await?;
                    info!(id, "user deleted");
                }
                UsersCommand::Export { out } => {
                    export::<User>(&dam, &FilterSet::new(), &out).await?;
                }
            }
        }

        Command::Logs(cmd) => {
            require(&dam, Role::can_view_activity)?;
            match cmd {
                LogsCommand::List {
                    filters,
                    paging,
                    stats,
                } => {
                    let mut list = dam.activity_log();
                    list.replace_filters(log_filters(filters));
                    load(&dam, &mut list).await?;
                    if stats {
                        for (action, count) in action_counts(list.items()) {
                            println!("{action}\t{count}");
                        }
                    } else {
                        show(&mut list, &paging, json)?;
                    }
                }
                LogsCommand::Export { filters, out } => {
                    export::<ActivityLog>(&dam, &log_filters(filters), &out).await?;
                }
            }
        }
    }

    Ok(())
}

fn log_filters(args: cli::LogFilterArgs) -> FilterSet {
    FilterSet::new()
        .with(SEARCH, args.search)
        .with(ACTION_TYPE, args.action)
        .with(START_DATE, args.from)
        .with(END_DATE, args.to)
}

/// Refuse up front when the session's role is known to lack `check`.
fn require(dam: &Dam, check: fn(Role) -> bool) -> Result<(), CliError> {
    let session = dam.session();
    if session.permits(check) {
        return Ok(());
    }
    Err(CliError::NotPermitted(session.role.unwrap_or(Role::Viewer)))
}

async fn load<T>(dam: &Dam, list: &mut ListController<T>) -> Result<(), CliError>
where
    T: Clone + Searchable + Resource,
{
    list.fetch(&dam.http_client, 1).await;
    match list.state() {
        LoadState::Error(msg) => Err(CliError::List(msg.clone())),
        _ => Ok(()),
    }
}

fn show<T>(list: &mut ListController<T>, paging: &PageArgs, json: bool) -> Result<(), CliError>
where
    T: Clone + Searchable + CsvRecord + Serialize,
{
    list.set_page_size(paging.page_size);
    if let Some(q) = &paging.grep {
        list.set_local_search(q.clone());
    }
    list.pager_mut().set_page(paging.page);

    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    output::write_page(list.pager(), json, &mut lock)?;
    Ok(())
}

async fn export<T: Resource + CsvRecord>(
    dam: &Dam,
    filters: &FilterSet,
    out: &Path,
) -> Result<(), CliError> {
    let outcome = dam.export::<T>(filters, out).await;
    match outcome {
        ExportOutcome::Failed(_) => Err(CliError::Export(outcome.message())),
        _ => {
            println!("{}", outcome.message());
            Ok(())
        }
    }
}
